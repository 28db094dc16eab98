//! Satellite pass prediction.
//!
//! Composes two discrete searches: visibility transitions give the
//! rise/set pairs, and the ascending-to-descending flip inside each
//! pair gives the apex. Azimuths and the apex altitude are then read
//! off by direct evaluation at the already-known instants.

use vega_core::{Ephemeris, OrbitPropagator, Topos};
use vega_time::Timescale;

use crate::config::{ONE_SECOND_DAYS, SearchConfig};
use crate::error::SearchError;
use crate::observables::{SatelliteAboveHorizon, SatelliteAscending, satellite_altaz};
use crate::search::find_discrete;

/// One complete pass over a ground station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatellitePass {
    /// Rise time (crossing up through the threshold), TT Julian Date.
    pub rise_jd_tt: f64,
    /// Azimuth at rise, degrees [0, 360).
    pub rise_azimuth_deg: f64,
    /// Apex time, TT Julian Date.
    pub apex_jd_tt: f64,
    /// Azimuth at apex, degrees [0, 360).
    pub apex_azimuth_deg: f64,
    /// Altitude at apex, degrees.
    pub apex_altitude_deg: f64,
    /// Set time (crossing back down), TT Julian Date.
    pub set_jd_tt: f64,
    /// Azimuth at set, degrees [0, 360).
    pub set_azimuth_deg: f64,
}

/// Predict all complete passes in `[jd_start_tt, jd_end_tt]` that
/// reach at least `threshold_deg` above the horizon.
///
/// Rise and set times are refined to one second. Partial passes are
/// dropped: a pass already in progress at the interval start (the
/// first transition is a set) and a pass still in progress at the end
/// (a trailing rise with no set) are both discarded — widen the
/// interval to capture them.
pub fn satellite_passes(
    orbiter: &dyn OrbitPropagator,
    ephemeris: &dyn Ephemeris,
    ts: &Timescale,
    topos: &Topos,
    jd_start_tt: f64,
    jd_end_tt: f64,
    threshold_deg: f64,
) -> Result<Vec<SatellitePass>, SearchError> {
    let config = SearchConfig::with_epsilon(ONE_SECOND_DAYS);

    let visible = SatelliteAboveHorizon::new(orbiter, ephemeris, ts, topos, threshold_deg);
    let transitions = find_discrete(ts, jd_start_tt, jd_end_tt, &visible, &config)?;

    let ascending = SatelliteAscending::new(orbiter, ephemeris, ts, topos);

    let mut passes = Vec::new();
    let mut i = 0;

    // Skip a leading set: its rise fell before the interval.
    while i < transitions.len() && transitions[i].value == 0 {
        i += 1;
    }

    while i + 1 < transitions.len() {
        let rise = &transitions[i];
        let set = &transitions[i + 1];

        // The apex is where "still climbing" flips off between rise
        // and set. A bracket too degenerate to show the flip (set
        // within epsilon of rise) yields no pass.
        let flips = find_discrete(ts, rise.jd_tt, set.jd_tt, &ascending, &config);
        let apex_jd_tt = match flips {
            Ok(f) if !f.is_empty() => f[0].jd_tt,
            Ok(_) | Err(SearchError::InvalidRange { .. }) => {
                i += 2;
                continue;
            }
            Err(e) => return Err(e),
        };

        let t = ts.tt_jd(vec![rise.jd_tt, apex_jd_tt, set.jd_tt]);
        let (alt, az) = satellite_altaz(orbiter, ephemeris, ts, topos, &t)?;

        passes.push(SatellitePass {
            rise_jd_tt: rise.jd_tt,
            rise_azimuth_deg: az[0],
            apex_jd_tt,
            apex_azimuth_deg: az[1],
            apex_altitude_deg: alt[1],
            set_jd_tt: set.jd_tt,
            set_azimuth_deg: az[2],
        });

        i += 2;
    }

    Ok(passes)
}
