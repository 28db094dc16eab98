//! IAU 2006 precession of the equator.
//!
//! Builds the rotation from the J2000.0 mean equator and equinox to
//! the mean equator and equinox of date, using the P03 equatorial
//! angles ψ_A, ω_A, χ_A.
//!
//! Source: Capitaine, Wallace & Chapront 2003, _Astronomy &
//! Astrophysics_ 412, 567-586; IERS Conventions 2010, Ch. 5.
//! Public domain (IAU standard).

use crate::obliquity::OBLIQUITY_J2000_ARCSEC;
use crate::vector::{mxm, r1, r3};

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// The three equatorial precession angles in arcseconds: (ψ_A, ω_A, χ_A).
///
/// `t` is Julian centuries of TDB since J2000.0.
pub fn precession_angles_arcsec(t: f64) -> (f64, f64, f64) {
    let psi_a = (5038.481507
        + (-1.0790069 + (-0.00114045 + (0.000132851 - 0.0000000951 * t) * t) * t) * t)
        * t;

    let omega_a = OBLIQUITY_J2000_ARCSEC
        + (-0.025754 + (0.0512623 + (-0.00772503 + (-0.000000467 + 0.0000003337 * t) * t) * t) * t)
            * t;

    let chi_a = (10.556403
        + (-2.3814292 + (-0.00121197 + (0.000170663 - 0.0000000560 * t) * t) * t) * t)
        * t;

    (psi_a, omega_a, chi_a)
}

/// Precession matrix: J2000 mean equator → mean equator of date.
///
/// P = R3(χ_A) · R1(−ω_A) · R3(−ψ_A) · R1(ε₀)
pub fn precession_matrix(t: f64) -> [[f64; 3]; 3] {
    let (psi_a, omega_a, chi_a) = precession_angles_arcsec(t);
    let eps0 = OBLIQUITY_J2000_ARCSEC * ARCSEC_TO_RAD;
    let psi_a = psi_a * ARCSEC_TO_RAD;
    let omega_a = omega_a * ARCSEC_TO_RAD;
    let chi_a = chi_a * ARCSEC_TO_RAD;

    let m = mxm(&r1(-omega_a), &r3(-psi_a));
    mxm(&mxm(&r3(chi_a), &m), &r1(eps0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{length_of, mxv, transpose};

    #[test]
    fn identity_at_j2000() {
        let p = precession_matrix(0.0);
        for (i, row) in p.iter().enumerate() {
            for (j, &x) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((x - expected).abs() < 1e-12, "P[{i}][{j}] = {x}");
            }
        }
    }

    #[test]
    fn psi_a_rate() {
        // Dominant linear term: ~5038.5″ per century.
        let (psi_a, _, _) = precession_angles_arcsec(1.0);
        assert!((psi_a - 5037.4).abs() < 1.0, "ψ_A(1) = {psi_a}");
    }

    #[test]
    fn orthonormal() {
        let p = precession_matrix(0.24);
        let pt = transpose(&p);
        for i in 0..3 {
            for j in 0..3 {
                let mut s = 0.0;
                for k in 0..3 {
                    s += p[i][k] * pt[k][j];
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((s - expected).abs() < 1e-13);
            }
        }
    }

    #[test]
    fn equinox_drifts_west() {
        // The equinox of date slides westward, so the J2000 equinox
        // direction acquires positive right ascension in the
        // mean-of-date frame.
        let p = precession_matrix(0.24);
        let v = mxv(&p, &[1.0, 0.0, 0.0]);
        assert!(v[1] > 0.0, "y = {}", v[1]);
        assert!((length_of(&v) - 1.0).abs() < 1e-14);
    }

    #[test]
    fn ra_precession_rate() {
        // Precession in RA: ψ_A cos ε₀ − χ_A ≈ 4612″ per century.
        let t = 0.72;
        let p = precession_matrix(t);
        let v = mxv(&p, &[1.0, 0.0, 0.0]);
        let shift_arcsec = v[1].atan2(v[0]).to_degrees() * 3600.0;
        let rate = shift_arcsec / t;
        assert!((rate - 4612.0).abs() < 10.0, "rate = {rate}″/cy");
    }
}
