//! Observable-function builders.
//!
//! Each builder owns references to its oracle, timescale, and (where
//! relevant) observer, and evaluates as a pure function over a batch
//! of instants. The `rough_period` each one reports is what sizes the
//! search engine's initial partition.

use std::f64::consts::TAU;

use vega_core::{Body, Ephemeris, OrbitPropagator, Topos, geocenter};
use vega_time::{SECONDS_PER_DAY, Time, Timescale};

use crate::error::SearchError;
use crate::search::{ContinuousObservable, DiscreteObservable};

/// The standard rise/set altitude: refraction plus semidiameter for
/// the Sun and Moon, in degrees.
pub const STANDARD_HORIZON_DEG: f64 = -0.8333;

/// Which quarter of the circle an angle falls in: 0 through 3.
///
/// Floor-division by a quarter turn, modulo 4 — a monotonically
/// stepping integer whose transitions are what the search detects.
pub(crate) fn quadrant(angle_rad: f64) -> u8 {
    ((angle_rad / (TAU / 4.0)).floor().rem_euclid(4.0)) as u8
}

/// Whether the Sun stands above the rise/set horizon for a surface
/// observer. Transitions are sunrises and sunsets.
pub struct SunAboveHorizon<'a> {
    ephemeris: &'a dyn Ephemeris,
    timescale: &'a Timescale,
    topos: &'a Topos,
    horizon_deg: f64,
}

impl<'a> SunAboveHorizon<'a> {
    pub fn new(ephemeris: &'a dyn Ephemeris, timescale: &'a Timescale, topos: &'a Topos) -> Self {
        Self::with_horizon(ephemeris, timescale, topos, STANDARD_HORIZON_DEG)
    }

    pub fn with_horizon(
        ephemeris: &'a dyn Ephemeris,
        timescale: &'a Timescale,
        topos: &'a Topos,
        horizon_deg: f64,
    ) -> Self {
        Self {
            ephemeris,
            timescale,
            topos,
            horizon_deg,
        }
    }

    /// Apparent solar altitude in degrees at each instant.
    pub fn altitude_deg(&self, t: &Time) -> Result<Vec<f64>, SearchError> {
        let horizontal = self
            .topos
            .at(t, self.ephemeris, self.timescale)?
            .observe(Body::Sun, self.ephemeris)?
            .apparent(self.ephemeris)?
            .horizontal(self.timescale)?;
        Ok(horizontal.alt_degrees())
    }
}

impl DiscreteObservable for SunAboveHorizon<'_> {
    fn rough_period_days(&self) -> f64 {
        0.5 // two transitions a day
    }

    fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError> {
        Ok(self
            .altitude_deg(t)?
            .into_iter()
            .map(|alt| u8::from(alt > self.horizon_deg))
            .collect())
    }
}

/// The Moon's phase quarter, 0 = new through 3 = last quarter:
/// the quadrant of the Moon–Sun difference in apparent ecliptic
/// longitude of date, seen from the geocenter.
pub struct MoonPhase<'a> {
    ephemeris: &'a dyn Ephemeris,
}

impl<'a> MoonPhase<'a> {
    pub fn new(ephemeris: &'a dyn Ephemeris) -> Self {
        Self { ephemeris }
    }
}

impl DiscreteObservable for MoonPhase<'_> {
    fn rough_period_days(&self) -> f64 {
        7.0 // one quarter per week
    }

    fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError> {
        let earth = geocenter(t, self.ephemeris)?;
        let moon = earth
            .observe(Body::Moon, self.ephemeris)?
            .apparent(self.ephemeris)?;
        let sun = earth
            .observe(Body::Sun, self.ephemeris)?
            .apparent(self.ephemeris)?;
        Ok(moon
            .ecliptic_lon_lat()
            .iter()
            .zip(sun.ecliptic_lon_lat())
            .map(|(m, s)| quadrant(m.lon_rad - s.lon_rad))
            .collect())
    }
}

/// The quarter of the year, 0 = spring through 3 = winter: the
/// quadrant of the Sun's apparent ecliptic longitude of date.
/// Transitions are the equinoxes and solstices.
pub struct Season<'a> {
    ephemeris: &'a dyn Ephemeris,
}

impl<'a> Season<'a> {
    pub fn new(ephemeris: &'a dyn Ephemeris) -> Self {
        Self { ephemeris }
    }
}

impl DiscreteObservable for Season<'_> {
    fn rough_period_days(&self) -> f64 {
        90.0
    }

    fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError> {
        let sun = geocenter(t, self.ephemeris)?
            .observe(Body::Sun, self.ephemeris)?
            .apparent(self.ephemeris)?;
        Ok(sun
            .ecliptic_lon_lat()
            .iter()
            .map(|s| quadrant(s.lon_rad))
            .collect())
    }
}

/// Apparent altitude and azimuth of a satellite, degrees, at each
/// instant. The shared evaluation behind the satellite observables
/// and the pass procedure.
pub fn satellite_altaz(
    orbiter: &dyn OrbitPropagator,
    ephemeris: &dyn Ephemeris,
    timescale: &Timescale,
    topos: &Topos,
    t: &Time,
) -> Result<(Vec<f64>, Vec<f64>), SearchError> {
    let horizontal = topos
        .at(t, ephemeris, timescale)?
        .observe_orbiter(orbiter, ephemeris)?
        .apparent(ephemeris)?
        .horizontal(timescale)?;
    Ok((horizontal.alt_degrees(), horizontal.az_degrees()))
}

/// Whether a satellite stands at or above an altitude threshold.
/// Transitions are pass rises and sets.
pub struct SatelliteAboveHorizon<'a> {
    orbiter: &'a dyn OrbitPropagator,
    ephemeris: &'a dyn Ephemeris,
    timescale: &'a Timescale,
    topos: &'a Topos,
    threshold_deg: f64,
}

impl<'a> SatelliteAboveHorizon<'a> {
    pub fn new(
        orbiter: &'a dyn OrbitPropagator,
        ephemeris: &'a dyn Ephemeris,
        timescale: &'a Timescale,
        topos: &'a Topos,
        threshold_deg: f64,
    ) -> Self {
        Self {
            orbiter,
            ephemeris,
            timescale,
            topos,
            threshold_deg,
        }
    }
}

impl DiscreteObservable for SatelliteAboveHorizon<'_> {
    fn rough_period_days(&self) -> f64 {
        // One orbital period in days, from the mean motion.
        TAU / self.orbiter.mean_motion_rad_per_min() / (24.0 * 60.0)
    }

    fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError> {
        let (alt, _) = satellite_altaz(self.orbiter, self.ephemeris, self.timescale, self.topos, t)?;
        Ok(alt
            .into_iter()
            .map(|a| u8::from(a >= self.threshold_deg))
            .collect())
    }
}

/// Whether a satellite's altitude is increasing, by a one-second
/// backward finite difference. The falling edge inside a pass is the
/// apex.
pub struct SatelliteAscending<'a> {
    orbiter: &'a dyn OrbitPropagator,
    ephemeris: &'a dyn Ephemeris,
    timescale: &'a Timescale,
    topos: &'a Topos,
}

impl<'a> SatelliteAscending<'a> {
    pub fn new(
        orbiter: &'a dyn OrbitPropagator,
        ephemeris: &'a dyn Ephemeris,
        timescale: &'a Timescale,
        topos: &'a Topos,
    ) -> Self {
        Self {
            orbiter,
            ephemeris,
            timescale,
            topos,
        }
    }
}

impl DiscreteObservable for SatelliteAscending<'_> {
    fn rough_period_days(&self) -> f64 {
        1.0
    }

    fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError> {
        let earlier = self.timescale.tt_jd(
            t.tt()
                .iter()
                .map(|&jd| jd - 1.0 / SECONDS_PER_DAY)
                .collect(),
        );
        let (now, _) =
            satellite_altaz(self.orbiter, self.ephemeris, self.timescale, self.topos, t)?;
        let (before, _) = satellite_altaz(
            self.orbiter,
            self.ephemeris,
            self.timescale,
            self.topos,
            &earlier,
        )?;
        Ok(now
            .iter()
            .zip(&before)
            .map(|(a, b)| u8::from(a > b))
            .collect())
    }
}

/// A satellite's altitude as a continuous observable, for locating
/// the apex directly with the maxima finder.
pub struct SatelliteAltitude<'a> {
    orbiter: &'a dyn OrbitPropagator,
    ephemeris: &'a dyn Ephemeris,
    timescale: &'a Timescale,
    topos: &'a Topos,
}

impl<'a> SatelliteAltitude<'a> {
    pub fn new(
        orbiter: &'a dyn OrbitPropagator,
        ephemeris: &'a dyn Ephemeris,
        timescale: &'a Timescale,
        topos: &'a Topos,
    ) -> Self {
        Self {
            orbiter,
            ephemeris,
            timescale,
            topos,
        }
    }
}

impl ContinuousObservable for SatelliteAltitude<'_> {
    fn rough_period_days(&self) -> f64 {
        TAU / self.orbiter.mean_motion_rad_per_min() / (24.0 * 60.0)
    }

    fn values(&self, t: &Time) -> Result<Vec<f64>, SearchError> {
        let (alt, _) = satellite_altaz(self.orbiter, self.ephemeris, self.timescale, self.topos, t)?;
        Ok(alt)
    }
}
