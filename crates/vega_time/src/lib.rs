//! Time-scale conversions (TT/TDB/UT1/UTC) and sidereal angles.
//!
//! This crate provides:
//! - [`Timescale`], the injected conversion context holding ΔT and
//!   leap-second tables (no process-wide default — callers pass it
//!   explicitly wherever a conversion is needed)
//! - [`Time`], a batch of instants with TT as the canonical scale and
//!   the other scales derived on first request and cached
//! - Julian Date ↔ calendar conversion
//! - Earth Rotation Angle, GMST, and GAST

pub mod error;
pub mod julian;
pub mod sidereal;
mod tables;

use std::cell::OnceCell;

pub use error::TimeError;
pub use julian::{CalendarDate, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};
pub use sidereal::{
    SIDEREAL_RATE, earth_rotation_angle_rad, gast_rad, gmst_rad, local_sidereal_time_rad,
};

/// TT − TAI offset in seconds (fixed by definition).
pub const TT_MINUS_TAI: f64 = 32.184;

/// TDB − TT in seconds at a TT Julian Date.
///
/// Periodic series from USNO Circular 179, eq. 2.6. The argument is
/// nominally TDB, but the two scales never differ by more than ~2 ms,
/// far below the series' own accuracy, so TT is accepted directly.
pub fn tdb_minus_tt_seconds(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000_JD) / 36_525.0;
    0.001_657 * (628.3076 * t + 6.2401).sin()
        + 0.000_022 * (575.3385 * t + 4.2970).sin()
        + 0.000_014 * (1256.6152 * t + 6.1969).sin()
        + 0.000_005 * (606.9777 * t + 4.0212).sin()
        + 0.000_005 * (52.9691 * t + 0.4444).sin()
        + 0.000_002 * (21.3299 * t + 5.5431).sin()
        + 0.000_010 * t * (628.3076 * t + 4.2490).sin()
}

/// Conversion context: ΔT table and leap-second table.
///
/// Constructed once and passed by reference into every function that
/// converts between scales. There is deliberately no global default.
#[derive(Debug, Clone)]
pub struct Timescale {
    /// (decimal year, TT−UT1 seconds), sorted ascending.
    delta_t: Vec<(f64, f64)>,
    /// (jd_utc, TAI−UTC seconds), sorted ascending; step function.
    leap_seconds: Vec<(f64, f64)>,
}

impl Timescale {
    /// Timescale backed by the built-in 1972–2026 tables.
    pub fn builtin() -> Self {
        Self {
            delta_t: tables::DELTA_T.to_vec(),
            leap_seconds: tables::LEAP_SECONDS.to_vec(),
        }
    }

    /// Timescale from caller-supplied tables.
    ///
    /// `delta_t` pairs are `(decimal_year, TT−UT1 seconds)`;
    /// `leap_seconds` pairs are `(jd_utc, TAI−UTC seconds)`.
    /// Both must be non-empty and sorted ascending by their first field.
    pub fn from_tables(
        delta_t: Vec<(f64, f64)>,
        leap_seconds: Vec<(f64, f64)>,
    ) -> Result<Self, TimeError> {
        if delta_t.is_empty() {
            return Err(TimeError::InvalidTable("delta_t table is empty"));
        }
        if leap_seconds.is_empty() {
            return Err(TimeError::InvalidTable("leap-second table is empty"));
        }
        if delta_t.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(TimeError::InvalidTable("delta_t table is not sorted"));
        }
        if leap_seconds.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(TimeError::InvalidTable("leap-second table is not sorted"));
        }
        Ok(Self {
            delta_t,
            leap_seconds,
        })
    }

    /// ΔT = TT − UT1 in seconds at a TT Julian Date.
    ///
    /// Linear interpolation inside the table, clamped to the end
    /// values outside it.
    pub fn delta_t_seconds(&self, jd_tt: f64) -> f64 {
        let year = 2000.0 + (jd_tt - J2000_JD) / 365.25;
        let table = &self.delta_t;

        let (first_year, first_dt) = table[0];
        let (last_year, last_dt) = table[table.len() - 1];
        if year <= first_year {
            return first_dt;
        }
        if year >= last_year {
            return last_dt;
        }

        let idx = table.partition_point(|&(y, _)| y < year).saturating_sub(1);
        let (y0, d0) = table[idx];
        let (y1, d1) = table[idx + 1];
        d0 + (year - y0) / (y1 - y0) * (d1 - d0)
    }

    /// TAI − UTC in seconds at a UTC Julian Date (step function).
    ///
    /// Dates before the first table entry clamp to its value.
    pub fn tai_minus_utc_seconds(&self, jd_utc: f64) -> f64 {
        let table = &self.leap_seconds;
        let idx = table.partition_point(|&(jd, _)| jd <= jd_utc);
        if idx == 0 {
            return table[0].1;
        }
        table[idx - 1].1
    }

    /// A batch of instants from TT Julian Dates.
    pub fn tt_jd(&self, jd_tt: Vec<f64>) -> Time {
        Time::from_tt(jd_tt)
    }

    /// A batch-of-one instant from a single TT Julian Date.
    pub fn tt_jd_scalar(&self, jd_tt: f64) -> Time {
        Time::from_tt(vec![jd_tt])
    }

    /// A batch of instants from TDB Julian Dates.
    pub fn tdb_jd(&self, jd_tdb: Vec<f64>) -> Time {
        let tt: Vec<f64> = jd_tdb
            .iter()
            .map(|&jd| jd - tdb_minus_tt_seconds(jd) / SECONDS_PER_DAY)
            .collect();
        let time = Time::from_tt(tt);
        let _ = time.tdb_cell.set(jd_tdb);
        time
    }

    /// A batch of instants from UT1 Julian Dates.
    ///
    /// ΔT is looked up at the UT1 date; the scales differ by under a
    /// minute and ΔT drifts well below a second per year, so a second
    /// pass would change nothing at table resolution.
    pub fn ut1_jd(&self, jd_ut1: Vec<f64>) -> Time {
        let tt: Vec<f64> = jd_ut1
            .iter()
            .map(|&jd| jd + self.delta_t_seconds(jd) / SECONDS_PER_DAY)
            .collect();
        let time = Time::from_tt(tt);
        let _ = time.ut1_cell.set(jd_ut1);
        time
    }

    /// A batch of instants from UTC Julian Dates.
    pub fn utc_jd(&self, jd_utc: Vec<f64>) -> Time {
        let tt: Vec<f64> = jd_utc
            .iter()
            .map(|&jd| {
                let tai = jd + self.tai_minus_utc_seconds(jd) / SECONDS_PER_DAY;
                tai + TT_MINUS_TAI / SECONDS_PER_DAY
            })
            .collect();
        let time = Time::from_tt(tt);
        let _ = time.utc_cell.set(jd_utc);
        time
    }

    /// A batch-of-one instant from a UTC calendar date.
    pub fn utc_cal(
        &self,
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Time, TimeError> {
        let day_frac = day as f64
            + hour as f64 / 24.0
            + minute as f64 / 1440.0
            + second / SECONDS_PER_DAY;
        let jd_utc = calendar_to_jd(year, month, day_frac)?;
        Ok(self.utc_jd(vec![jd_utc]))
    }

    /// `n` evenly spaced instants from `jd_tt_start` to `jd_tt_end`
    /// inclusive. `n` must be at least 2.
    pub fn linspace(&self, jd_tt_start: f64, jd_tt_end: f64, n: usize) -> Time {
        let n = n.max(2);
        let step = (jd_tt_end - jd_tt_start) / (n - 1) as f64;
        let jd = (0..n).map(|i| jd_tt_start + step * i as f64).collect();
        Time::from_tt(jd)
    }
}

/// A batch of instants. TT Julian Date is the canonical representation;
/// TDB, UT1, and UTC are derived on first request and cached, so
/// repeated conversion is exactly idempotent.
///
/// Batch-of-one is the scalar case; see [`Time::only`].
#[derive(Debug, Clone)]
pub struct Time {
    tt: Vec<f64>,
    tdb_cell: OnceCell<Vec<f64>>,
    ut1_cell: OnceCell<Vec<f64>>,
    utc_cell: OnceCell<Vec<f64>>,
}

impl Time {
    fn from_tt(tt: Vec<f64>) -> Self {
        Self {
            tt,
            tdb_cell: OnceCell::new(),
            ut1_cell: OnceCell::new(),
            utc_cell: OnceCell::new(),
        }
    }

    /// Number of instants in the batch.
    pub fn len(&self) -> usize {
        self.tt.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.tt.is_empty()
    }

    /// TT Julian Dates.
    pub fn tt(&self) -> &[f64] {
        &self.tt
    }

    /// TDB Julian Dates.
    pub fn tdb(&self) -> &[f64] {
        self.tdb_cell.get_or_init(|| {
            self.tt
                .iter()
                .map(|&jd| jd + tdb_minus_tt_seconds(jd) / SECONDS_PER_DAY)
                .collect()
        })
    }

    /// UT1 Julian Dates, via the timescale's ΔT table.
    pub fn ut1(&self, ts: &Timescale) -> &[f64] {
        self.ut1_cell.get_or_init(|| {
            self.tt
                .iter()
                .map(|&jd| jd - ts.delta_t_seconds(jd) / SECONDS_PER_DAY)
                .collect()
        })
    }

    /// UTC Julian Dates, via the timescale's leap-second table.
    ///
    /// The leap count is looked up at a TAI-based first guess and then
    /// once more at the resulting UTC, which settles the value even
    /// right at a leap boundary.
    pub fn utc(&self, ts: &Timescale) -> &[f64] {
        self.utc_cell.get_or_init(|| {
            self.tt
                .iter()
                .map(|&jd| {
                    let tai = jd - TT_MINUS_TAI / SECONDS_PER_DAY;
                    let guess = tai - ts.tai_minus_utc_seconds(tai) / SECONDS_PER_DAY;
                    tai - ts.tai_minus_utc_seconds(guess) / SECONDS_PER_DAY
                })
                .collect()
        })
    }

    /// The single TT Julian Date of a batch-of-one.
    pub fn only(&self) -> Result<f64, TimeError> {
        if self.tt.len() == 1 {
            Ok(self.tt[0])
        } else {
            Err(TimeError::NotScalar { len: self.tt.len() })
        }
    }

    /// Calendar form of each instant's UTC value.
    pub fn calendar_utc(&self, ts: &Timescale) -> Vec<CalendarDate> {
        self.utc(ts).iter().map(|&jd| CalendarDate::from_jd(jd)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tdb_minus_tt_bounded() {
        // The series amplitude is under 2 ms at any epoch.
        for &jd in &[2_441_317.5, J2000_JD, 2_460_310.5] {
            assert!(tdb_minus_tt_seconds(jd).abs() < 0.002);
        }
    }

    #[test]
    fn tt_tdb_roundtrip() {
        let ts = Timescale::builtin();
        let jd = 2_460_000.5;
        let t = ts.tt_jd_scalar(jd);
        let tdb = t.tdb()[0];
        let back = ts.tdb_jd(vec![tdb]);
        assert!((back.tt()[0] - jd).abs() < 1e-12);
    }

    #[test]
    fn utc_roundtrip() {
        let ts = Timescale::builtin();
        let t = ts.utc_cal(2023, 6, 15, 12, 0, 0.0).unwrap();
        let jd_utc = t.utc(&ts)[0];
        let back = ts.utc_jd(vec![jd_utc]);
        assert!((back.tt()[0] - t.tt()[0]).abs() < 1e-10);
    }

    #[test]
    fn utc_offset_matches_leap_count_2023() {
        let ts = Timescale::builtin();
        let t = ts.utc_cal(2023, 1, 1, 0, 0, 0.0).unwrap();
        // TT − UTC = 32.184 + 37 = 69.184 s in 2023.
        let offset_s = (t.tt()[0] - t.utc(&ts)[0]) * SECONDS_PER_DAY;
        assert!((offset_s - 69.184).abs() < 1e-6, "offset = {offset_s}");
    }

    #[test]
    fn conversion_is_idempotent() {
        let ts = Timescale::builtin();
        let t = ts.utc_cal(2023, 6, 15, 4, 30, 0.0).unwrap();
        let a = t.ut1(&ts).to_vec();
        let b = t.ut1(&ts).to_vec();
        assert_eq!(a, b);
        let c = t.utc(&ts).to_vec();
        let d = t.utc(&ts).to_vec();
        assert_eq!(c, d);
    }

    #[test]
    fn delta_t_interpolates() {
        let ts = Timescale::builtin();
        // Mid-2000s: ΔT between the 2002 and 2005 table values.
        let jd_2003 = calendar_to_jd(2003, 7, 1.0).unwrap();
        let dt = ts.delta_t_seconds(jd_2003);
        assert!(dt > 64.3 && dt < 64.69, "ΔT(2003.5) = {dt}");
    }

    #[test]
    fn delta_t_clamps_outside_table() {
        let ts = Timescale::builtin();
        let early = ts.delta_t_seconds(calendar_to_jd(1950, 1, 1.0).unwrap());
        let late = ts.delta_t_seconds(calendar_to_jd(2100, 1, 1.0).unwrap());
        assert!((early - 42.23).abs() < 1e-9);
        assert!((late - 69.10).abs() < 1e-9);
    }

    #[test]
    fn leap_count_steps() {
        let ts = Timescale::builtin();
        let before = calendar_to_jd(2016, 12, 31.5).unwrap();
        let after = calendar_to_jd(2017, 1, 1.5).unwrap();
        assert_eq!(ts.tai_minus_utc_seconds(before), 36.0);
        assert_eq!(ts.tai_minus_utc_seconds(after), 37.0);
    }

    #[test]
    fn linspace_endpoints() {
        let ts = Timescale::builtin();
        let t = ts.linspace(2_460_000.5, 2_460_001.5, 5);
        assert_eq!(t.len(), 5);
        assert!((t.tt()[0] - 2_460_000.5).abs() < 1e-12);
        assert!((t.tt()[4] - 2_460_001.5).abs() < 1e-12);
        assert!((t.tt()[2] - 2_460_001.0).abs() < 1e-12);
    }

    #[test]
    fn only_rejects_batches() {
        let ts = Timescale::builtin();
        let t = ts.tt_jd(vec![2_460_000.5, 2_460_001.5]);
        assert_eq!(t.only(), Err(TimeError::NotScalar { len: 2 }));
        let s = ts.tt_jd_scalar(2_460_000.5);
        assert_eq!(s.only(), Ok(2_460_000.5));
    }

    #[test]
    fn from_tables_validates() {
        assert!(Timescale::from_tables(vec![], vec![(0.0, 10.0)]).is_err());
        assert!(Timescale::from_tables(vec![(2000.0, 64.0)], vec![]).is_err());
        assert!(
            Timescale::from_tables(
                vec![(2005.0, 64.0), (2000.0, 64.0)],
                vec![(0.0, 10.0)],
            )
            .is_err()
        );
    }
}
