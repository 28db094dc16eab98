//! Built-in low-precision ephemeris for the Sun, Earth, and Moon.
//!
//! Truncated classical series: solar position good to ~0.01° in
//! longitude, lunar to ~0.3°. Enough to exercise the full pipeline
//! and the event searches without binary kernel files; callers who
//! need milliarcsecond work plug in a real provider instead.
//!
//! The Sun is pinned to the origin, so states are heliocentric rather
//! than strictly barycentric. The ~0.005 AU barycenter offset cancels
//! in every relative position this system computes.
//!
//! Sources: solar series from Meeus, _Astronomical Algorithms_,
//! ch. 25; lunar series from the abridged ELP-2000/82 tables in
//! ch. 47. Both are standard published reductions.

use vega_frames::julian_centuries;

use crate::error::EphemerisError;
use crate::{AU_KM, Body, Ephemeris, StateVector};

/// Obliquity of the J2000 ecliptic, radians.
const EPS_J2000_RAD: f64 = 84_381.406 / 3600.0 * std::f64::consts::PI / 180.0;

/// Step for the velocity central difference, days.
const VELOCITY_STEP_DAYS: f64 = 0.01;

/// The built-in analytic provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn state_at(&self, body: Body, jd_tdb: &[f64]) -> Result<Vec<StateVector>, EphemerisError> {
        match body {
            Body::Sun => Ok(vec![StateVector::ZERO; jd_tdb.len()]),
            Body::Earth => Ok(jd_tdb
                .iter()
                .map(|&jd| state_by_difference(earth_heliocentric, jd))
                .collect()),
            Body::Moon => Ok(jd_tdb
                .iter()
                .map(|&jd| state_by_difference(moon_barycentric, jd))
                .collect()),
            other => Err(EphemerisError::UnsupportedBody(other)),
        }
    }
}

/// Position at `jd` plus a central-difference velocity.
fn state_by_difference(position: fn(f64) -> [f64; 3], jd: f64) -> StateVector {
    let p = position(jd);
    let before = position(jd - VELOCITY_STEP_DAYS);
    let after = position(jd + VELOCITY_STEP_DAYS);
    StateVector {
        position_au: p,
        velocity_au_day: [
            (after[0] - before[0]) / (2.0 * VELOCITY_STEP_DAYS),
            (after[1] - before[1]) / (2.0 * VELOCITY_STEP_DAYS),
            (after[2] - before[2]) / (2.0 * VELOCITY_STEP_DAYS),
        ],
    }
}

/// Accumulated general precession in degrees, for referring an
/// of-date longitude back to the J2000 equinox.
fn general_precession_deg(t: f64) -> f64 {
    (5028.796195 * t + 1.1054348 * t * t) / 3600.0
}

/// J2000 equatorial vector from J2000 ecliptic longitude/latitude
/// (degrees) and distance (AU).
fn ecliptic_to_equatorial_j2000(lon_deg: f64, lat_deg: f64, distance_au: f64) -> [f64; 3] {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let (sin_eps, cos_eps) = EPS_J2000_RAD.sin_cos();
    let x = distance_au * lat.cos() * lon.cos();
    let y = distance_au * lat.cos() * lon.sin();
    let z = distance_au * lat.sin();
    [x, y * cos_eps - z * sin_eps, y * sin_eps + z * cos_eps]
}

/// Geometric geocentric solar position, J2000 equatorial AU.
fn sun_geocentric(jd_tdb: f64) -> [f64; 3] {
    let t = julian_centuries(jd_tdb);

    let l0 = 280.46646 + 36_000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.0001537 * t * t).to_radians();
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let true_lon_of_date = l0 + c;
    let nu = m + c.to_radians();
    let r = 1.000001018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    let lon_j2000 = true_lon_of_date - general_precession_deg(t);
    ecliptic_to_equatorial_j2000(lon_j2000, 0.0, r)
}

/// Earth's heliocentric position: the solar position reversed.
fn earth_heliocentric(jd_tdb: f64) -> [f64; 3] {
    let s = sun_geocentric(jd_tdb);
    [-s[0], -s[1], -s[2]]
}

/// The Moon's position relative to the origin: Earth plus the
/// geocentric lunar series.
fn moon_barycentric(jd_tdb: f64) -> [f64; 3] {
    let e = earth_heliocentric(jd_tdb);
    let m = moon_geocentric(jd_tdb);
    [e[0] + m[0], e[1] + m[1], e[2] + m[2]]
}

/// Geocentric lunar position, J2000 equatorial AU.
///
/// Truncated to the largest periodic terms; the smallest retained
/// longitude amplitude is 0.011°.
fn moon_geocentric(jd_tdb: f64) -> [f64; 3] {
    let t = julian_centuries(jd_tdb);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    // Mean longitude, elongation, anomalies, argument of latitude.
    let lp = 218.3164477 + 481_267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = (297.8501921 + 445_267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0)
        .to_radians();
    let m = (357.5291092 + 35_999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0).to_radians();
    let mp = (134.9633964 + 477_198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0)
        .to_radians();
    let f = (93.2720950 + 483_202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0)
        .to_radians();

    let lon_correction_deg = 6.288774 * mp.sin()
        + 1.274027 * (2.0 * d - mp).sin()
        + 0.658314 * (2.0 * d).sin()
        + 0.213618 * (2.0 * mp).sin()
        - 0.185116 * m.sin()
        - 0.114332 * (2.0 * f).sin()
        + 0.058793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057066 * (2.0 * d - m - mp).sin()
        + 0.053322 * (2.0 * d + mp).sin()
        + 0.045758 * (2.0 * d - m).sin()
        - 0.040923 * (m - mp).sin()
        - 0.034720 * d.sin()
        - 0.030383 * (m + mp).sin()
        + 0.015327 * (2.0 * d - 2.0 * f).sin()
        - 0.012528 * (mp + 2.0 * f).sin()
        + 0.010980 * (mp - 2.0 * f).sin();

    let lat_deg = 5.128122 * f.sin()
        + 0.280602 * (mp + f).sin()
        + 0.277693 * (mp - f).sin()
        + 0.173237 * (2.0 * d - f).sin()
        + 0.055413 * (2.0 * d - mp + f).sin()
        + 0.046271 * (2.0 * d - mp - f).sin()
        + 0.032573 * (2.0 * d + f).sin()
        + 0.017198 * (2.0 * mp + f).sin();

    let distance_km = 385_000.56 - 20_905.355 * mp.cos()
        - 3_699.111 * (2.0 * d - mp).cos()
        - 2_955.968 * (2.0 * d).cos()
        - 569.925 * (2.0 * mp).cos()
        + 246.158 * (2.0 * d - 2.0 * mp).cos()
        - 204.586 * (2.0 * d - m).cos()
        - 170.733 * (2.0 * d + mp).cos()
        - 152.138 * (2.0 * d - m - mp).cos();

    let lon_j2000 = lp + lon_correction_deg - general_precession_deg(t);
    ecliptic_to_equatorial_j2000(lon_j2000, lat_deg, distance_km / AU_KM)
}
