//! Reference-frame rotations for the apparent-position pipeline.
//!
//! This crate provides:
//! - Vector and rotation-matrix primitives
//! - The ICRS ↔ J2000 frame tie
//! - IAU 2006 precession and mean obliquity
//! - IAU 2000B nutation, the nutation matrix, and the equation of
//!   the equinoxes
//! - Cartesian ↔ spherical conversion and the ecliptic-of-date
//!   rotation

pub mod bias;
pub mod nutation;
pub mod obliquity;
pub mod precession;
pub mod spherical;
pub mod vector;

pub use bias::icrs_to_j2000;
pub use nutation::{
    NutationAngles, equation_of_equinoxes_rad, fundamental_arguments, nutation_iau2000b,
    nutation_matrix,
};
pub use obliquity::{OBLIQUITY_J2000_ARCSEC, mean_obliquity_arcsec, mean_obliquity_rad};
pub use precession::{precession_angles_arcsec, precession_matrix};
pub use spherical::{
    Spherical, cartesian_to_spherical, equatorial_to_ecliptic, spherical_to_cartesian,
};
pub use vector::{cross, dot, length_of, mtxv, mxm, mxv, r1, r2, r3, spin_z, transpose};

/// Julian centuries of TDB since J2000.0 for a TDB Julian Date.
pub fn julian_centuries(jd_tdb: f64) -> f64 {
    (jd_tdb - 2_451_545.0) / 36_525.0
}

/// The full ICRS → true-equator-of-date rotation N·P·B at one epoch.
///
/// `t` is Julian centuries of TDB since J2000.0. The nutation angles
/// are taken as an argument so callers that already computed them for
/// the equation of the equinoxes do not pay for the series twice.
pub fn icrs_to_true_of_date(t: f64, angles: &NutationAngles) -> [[f64; 3]; 3] {
    let np = mxm(&nutation_matrix(t, angles), &precession_matrix(t));
    mxm(&np, &icrs_to_j2000())
}
