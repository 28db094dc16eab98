//! Aberration and gravitational light deflection.
//!
//! Formulas follow the classical reduction sequence (USNO Circular
//! 179 / NOVAS): special-relativistic aberration from the observer's
//! barycentric velocity, and single-deflector gravitational bending
//! in the deflector's static field.

use vega_frames::{dot, length_of};

use crate::C_AU_DAY;

/// Aberrate a relative position for the observer's velocity.
///
/// `position_au` is the target relative to the observer,
/// `velocity_au_day` the observer's barycentric velocity, and
/// `light_time_days` the already-solved light travel time.
pub fn add_aberration(
    position_au: &mut [f64; 3],
    velocity_au_day: &[f64; 3],
    light_time_days: f64,
) {
    let p1mag = light_time_days * C_AU_DAY;
    let vemag = length_of(velocity_au_day);
    if vemag == 0.0 || p1mag == 0.0 {
        return;
    }
    let beta = vemag / C_AU_DAY;
    let cosd = dot(position_au, velocity_au_day) / (p1mag * vemag);
    let gammai = (1.0 - beta * beta).sqrt();
    let p = beta * cosd;
    let q = (1.0 + p / (1.0 + gammai)) * light_time_days;
    let r = 1.0 + p;

    for (x, &v) in position_au.iter_mut().zip(velocity_au_day) {
        *x = (gammai * *x + q * v) / r;
    }
}

/// Bend a relative position in one deflector's gravitational field.
///
/// `position_au` is the target relative to the observer;
/// `deflector_to_observer` and `deflector_to_target` run from the
/// deflector outward; `mu` is the deflector's gravitational parameter
/// in AU³/day². A target coincident with the deflector (observing the
/// deflector itself) is left untouched.
pub fn add_deflection(
    position_au: &mut [f64; 3],
    deflector_to_observer: &[f64; 3],
    deflector_to_target: &[f64; 3],
    mu: f64,
) {
    let pmag = length_of(position_au);
    let qmag = length_of(deflector_to_target);
    let emag = length_of(deflector_to_observer);
    if pmag == 0.0 || qmag < 1.0e-10 || emag < 1.0e-10 {
        return;
    }

    let phat = [
        position_au[0] / pmag,
        position_au[1] / pmag,
        position_au[2] / pmag,
    ];
    let qhat = [
        deflector_to_target[0] / qmag,
        deflector_to_target[1] / qmag,
        deflector_to_target[2] / qmag,
    ];
    let ehat = [
        deflector_to_observer[0] / emag,
        deflector_to_observer[1] / emag,
        deflector_to_observer[2] / emag,
    ];

    let pdotq = dot(&phat, &qhat);
    let edotp = dot(&ehat, &phat);
    let qdote = dot(&qhat, &ehat);

    let fac1 = 2.0 * mu / (C_AU_DAY * C_AU_DAY * emag);
    let fac2 = 1.0 + qdote;

    for i in 0..3 {
        position_au[i] += fac1 / fac2 * (pdotq * ehat[i] - edotp * qhat[i]) * pmag;
    }
}

/// Angle of a target above or below Earth's limb, as seen from a
/// geocentric observer position.
///
/// Both vectors are geocentric. Returns `(limb_angle_deg,
/// nadir_angle)`: the limb angle is positive above the limb; the
/// nadir angle expresses the target's zenith distance as a fraction
/// of the limb's, >1 meaning above the limb.
pub fn limb_angle(
    target_geocentric_au: &[f64; 3],
    observer_geocentric_au: &[f64; 3],
    earth_radius_au: f64,
) -> (f64, f64) {
    let disobj = length_of(target_geocentric_au);
    let disobs = length_of(observer_geocentric_au);

    // Apparent angular radius of the limb; π/2 from inside the ellipsoid.
    let aprad = if disobs >= earth_radius_au {
        (earth_radius_au / disobs).asin()
    } else {
        std::f64::consts::FRAC_PI_2
    };

    let zdlim = std::f64::consts::PI - aprad;

    let coszd = if disobj == 0.0 || disobs == 0.0 {
        1.0
    } else {
        (dot(target_geocentric_au, observer_geocentric_au) / (disobj * disobs)).clamp(-1.0, 1.0)
    };
    let zdobj = coszd.acos();

    let limb_deg = (zdlim - zdobj).to_degrees();
    let nadir = (std::f64::consts::PI - zdobj) / aprad;

    (limb_deg, nadir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AU_KM, EARTH_RADIUS_KM, MU_SUN_AU3_DAY2};

    #[test]
    fn aberration_magnitude_annual() {
        // Earth's ~30 km/s orbital velocity displaces a transverse
        // target by the aberration constant, ~20.5″.
        let mut p = [1.0, 0.0, 0.0];
        let v = [0.0, 30.0 * 86_400.0 / AU_KM, 0.0]; // 30 km/s in AU/day
        add_aberration(&mut p, &v, 1.0 / C_AU_DAY);
        let shift_arcsec = p[1].atan2(p[0]).to_degrees() * 3600.0;
        assert!((shift_arcsec - 20.5).abs() < 0.3, "shift = {shift_arcsec}″");
    }

    #[test]
    fn aberration_noop_for_radial_motion() {
        // Velocity along the line of sight changes no direction.
        let mut p = [1.0, 0.0, 0.0];
        let v = [1.0e-2, 0.0, 0.0];
        add_aberration(&mut p, &v, 1.0 / C_AU_DAY);
        assert!(p[1].abs() < 1e-15 && p[2].abs() < 1e-15);
    }

    #[test]
    fn deflection_grazing_sun() {
        // A ray grazing the solar limb bends by ~1.75″; at elongation
        // 90° the bend drops to ~0.004″. Check the grazing case to a
        // loose tolerance.
        let r_sun_au = 696_000.0 / AU_KM;
        // Sun at the origin, observer at 1 AU on +x, target 10 AU on
        // the far side, offset so the ray grazes the limb.
        let sun_to_observer = [1.0, 0.0, 0.0];
        let target_bary = [-10.0, r_sun_au * 11.0, 0.0];
        let mut p = [target_bary[0] - 1.0, target_bary[1], 0.0];
        let sun_to_target = target_bary;
        let before = p[1].atan2(-p[0]);
        add_deflection(&mut p, &sun_to_observer, &sun_to_target, MU_SUN_AU3_DAY2);
        let after = p[1].atan2(-p[0]);
        let bend_arcsec = (after - before).to_degrees() * 3600.0;
        // Grazing-incidence bend with these finite distances ≈ 1.6″.
        assert!(
            bend_arcsec > 1.0 && bend_arcsec < 2.5,
            "bend = {bend_arcsec}″"
        );
    }

    #[test]
    fn deflection_skips_the_deflector_itself() {
        let mut p = [1.0, 0.0, 0.0];
        let before = p;
        add_deflection(&mut p, &[1.0, 0.0, 0.0], &[0.0, 0.0, 0.0], MU_SUN_AU3_DAY2);
        assert_eq!(p, before);
    }

    #[test]
    fn limb_angle_overhead_target() {
        let er_au = EARTH_RADIUS_KM / AU_KM;
        let obs = [er_au, 0.0, 0.0];
        let target = [2.0 * er_au, 0.0, 0.0]; // straight up
        let (limb_deg, nadir) = limb_angle(&target, &obs, er_au);
        assert!((limb_deg - 90.0).abs() < 0.01, "limb = {limb_deg}°");
        assert!(nadir > 1.0);
    }

    #[test]
    fn limb_angle_below_horizon() {
        let er_au = EARTH_RADIUS_KM / AU_KM;
        let obs = [er_au, 0.0, 0.0];
        let target = [-2.0 * er_au, 0.0, 0.0]; // through the planet
        let (limb_deg, nadir) = limb_angle(&target, &obs, er_au);
        assert!(limb_deg < -80.0, "limb = {limb_deg}°");
        assert!(nadir < 1.0);
    }
}
