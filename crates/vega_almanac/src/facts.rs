//! Simple illumination facts: phase angle and illuminated fraction.

use vega_core::{Body, Ephemeris, body_barycentric, geocenter};
use vega_time::{Time, Timescale};

use crate::error::SearchError;

/// Sun–body–Earth phase angle in radians, per instant.
///
/// Observes the body from the geocenter, then looks back from the
/// body — at its light-emission epoch — toward the Sun, and measures
/// the angle between that direction and the reversed line of sight.
pub fn phase_angle(
    ephemeris: &dyn Ephemeris,
    ts: &Timescale,
    body: Body,
    t: &Time,
) -> Result<Vec<f64>, SearchError> {
    let earth = geocenter(t, ephemeris)?;
    let toward_body = earth.observe(body, ephemeris)?;

    // The body's own epoch: our time minus the light travel time.
    let emission = ts.tt_jd(
        t.tt()
            .iter()
            .zip(toward_body.light_time_days())
            .map(|(&jd, &lt)| jd - lt)
            .collect(),
    );
    let from_body = body_barycentric(body, &emission, ephemeris)?;
    let toward_sun = from_body.observe(Body::Sun, ephemeris)?;

    Ok(toward_body.reversed().separation_rad(&toward_sun))
}

/// Fraction of a body's disk illuminated, 0 to 1, per instant.
///
/// Treats the body as a uniform sphere: `(1 + cos a) / 2` for phase
/// angle `a`.
pub fn fraction_illuminated(
    ephemeris: &dyn Ephemeris,
    ts: &Timescale,
    body: Body,
    t: &Time,
) -> Result<Vec<f64>, SearchError> {
    Ok(phase_angle(ephemeris, ts, body, t)?
        .into_iter()
        .map(|a| 0.5 * (1.0 + a.cos()))
        .collect())
}
