//! Earth Rotation Angle and Greenwich sidereal time.
//!
//! Inputs are UT1 Julian Dates; callers convert UTC→UT1 through a
//! [`crate::Timescale`] first. The apparent variant (GAST) takes the
//! equation of the equinoxes as an argument so this crate stays free
//! of any nutation-series dependency.
//!
//! Sources: ERA from IERS Conventions 2010, Eq. 5.15; GMST polynomial
//! from Capitaine et al. 2003, Table 2. Public domain.

use std::f64::consts::{PI, TAU};

use crate::julian::J2000_JD;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Ratio of the sidereal rate to the solar rate (revolutions per UT1 day).
pub const SIDEREAL_RATE: f64 = 1.002_737_811_911_354_6;

/// Earth Rotation Angle at a UT1 Julian Date, radians in [0, 2π).
///
/// θ = 2π (0.7790572732640 + 1.00273781191135448 · Du), Du = JD_UT1 − J2000.
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    (TAU * (0.779_057_273_264_0 + SIDEREAL_RATE * du)).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time at a UT1 Julian Date, radians in [0, 2π).
///
/// ERA plus the precession-in-RA polynomial, T in Julian centuries UT1.
pub fn gmst_rad(jd_ut1: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd_ut1);
    let t = (jd_ut1 - J2000_JD) / 36_525.0;

    let poly_arcsec = 0.014506
        + (4612.156534
            + (1.3915817 + (-0.00000044 + (-0.000029956 - 0.0000000368 * t) * t) * t) * t)
            * t;

    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Greenwich Apparent Sidereal Time: GMST corrected by the equation of
/// the equinoxes (Δψ cos ε, supplied by the caller in radians).
pub fn gast_rad(jd_ut1: f64, equation_of_equinoxes_rad: f64) -> f64 {
    (gmst_rad(jd_ut1) + equation_of_equinoxes_rad).rem_euclid(TAU)
}

/// Local sidereal time from a Greenwich value and an east longitude.
pub fn local_sidereal_time_rad(greenwich_rad: f64, longitude_east_rad: f64) -> f64 {
    (greenwich_rad + longitude_east_rad).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000() {
        // ERA at J2000.0 ≈ 280.46°
        let deg = earth_rotation_angle_rad(J2000_JD).to_degrees();
        assert!((deg - 280.46).abs() < 0.1, "ERA = {deg}");
    }

    #[test]
    fn gmst_at_j2000_midnight() {
        // 2000-Jan-01 0h UT1: GMST ≈ 6h 39m 51s ≈ 99.97°
        let deg = gmst_rad(2_451_544.5).to_degrees();
        assert!((deg - 99.97).abs() < 0.1, "GMST = {deg}");
    }

    #[test]
    fn gast_reduces_to_gmst() {
        let jd = 2_460_000.5;
        assert_eq!(gast_rad(jd, 0.0), gmst_rad(jd));
    }

    #[test]
    fn gast_applies_offset() {
        let jd = 2_460_000.5;
        let eqeq = 1.0e-4;
        let diff = (gast_rad(jd, eqeq) - gmst_rad(jd)).rem_euclid(TAU);
        assert!((diff - eqeq).abs() < 1e-15);
    }

    #[test]
    fn ranges() {
        for &jd in &[2_441_317.5, 2_451_545.0, 2_460_310.5] {
            for &v in &[
                earth_rotation_angle_rad(jd),
                gmst_rad(jd),
                gast_rad(jd, 5.0e-5),
            ] {
                assert!((0.0..TAU).contains(&v), "out of range: {v}");
            }
        }
    }

    #[test]
    fn lst_wraps() {
        let lst = local_sidereal_time_rad(TAU - 0.1, 0.3);
        assert!((lst - 0.2).abs() < 1e-12);
    }
}
