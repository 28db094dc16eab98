//! ICRS ↔ J2000 frame tie.
//!
//! The ICRS axes differ from the J2000.0 mean equator and equinox by a
//! fixed sub-arcsecond offset. The matrix is composed from the three
//! IERS frame-bias angles rather than transcribed, so the rotation is
//! exact to machine precision.
//!
//! Source: IERS Conventions 2010, Eq. 5.21. Public domain.

use crate::vector::{mxm, r1, r2, r3};

/// Frame-bias angles in arcseconds: (ξ₀, η₀, dα₀).
const XI0_ARCSEC: f64 = -0.016_617_0;
const ETA0_ARCSEC: f64 = -0.006_819_2;
const DA0_ARCSEC: f64 = -0.014_60;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Rotation taking ICRS components to J2000 mean-equator components.
///
/// B = R1(−η₀) · R2(ξ₀) · R3(dα₀)
pub fn icrs_to_j2000() -> [[f64; 3]; 3] {
    let xi0 = XI0_ARCSEC * ARCSEC_TO_RAD;
    let eta0 = ETA0_ARCSEC * ARCSEC_TO_RAD;
    let da0 = DA0_ARCSEC * ARCSEC_TO_RAD;
    mxm(&mxm(&r1(-eta0), &r2(xi0)), &r3(da0))
}
