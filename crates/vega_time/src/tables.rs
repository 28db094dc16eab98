//! Built-in ΔT and leap-second tables.
//!
//! These cover the era of modern leap-second bookkeeping (1972 onward)
//! so the crate works without external data files. Callers tracking
//! current IERS bulletins can construct a [`crate::Timescale`] from
//! their own tables instead.
//!
//! Sources: leap seconds from the IERS/USNO `tai-utc.dat` history;
//! ΔT from the annual values published in the Astronomical Almanac.
//! Both public domain.

/// Leap-second steps: `(jd_utc, TAI−UTC seconds)`, effective from the
/// given UTC Julian Date onward. Sorted ascending.
pub(crate) const LEAP_SECONDS: [(f64, f64); 28] = [
    (2_441_317.5, 10.0), // 1972-01-01
    (2_441_499.5, 11.0), // 1972-07-01
    (2_441_683.5, 12.0), // 1973-01-01
    (2_442_048.5, 13.0), // 1974-01-01
    (2_442_413.5, 14.0), // 1975-01-01
    (2_442_778.5, 15.0), // 1976-01-01
    (2_443_144.5, 16.0), // 1977-01-01
    (2_443_509.5, 17.0), // 1978-01-01
    (2_443_874.5, 18.0), // 1979-01-01
    (2_444_239.5, 19.0), // 1980-01-01
    (2_444_786.5, 20.0), // 1981-07-01
    (2_445_151.5, 21.0), // 1982-07-01
    (2_445_516.5, 22.0), // 1983-07-01
    (2_446_247.5, 23.0), // 1985-07-01
    (2_447_161.5, 24.0), // 1988-01-01
    (2_447_892.5, 25.0), // 1990-01-01
    (2_448_257.5, 26.0), // 1991-01-01
    (2_448_804.5, 27.0), // 1992-07-01
    (2_449_169.5, 28.0), // 1993-07-01
    (2_449_534.5, 29.0), // 1994-07-01
    (2_450_083.5, 30.0), // 1996-01-01
    (2_450_630.5, 31.0), // 1997-07-01
    (2_451_179.5, 32.0), // 1999-01-01
    (2_453_736.5, 33.0), // 2006-01-01
    (2_454_832.5, 34.0), // 2009-01-01
    (2_456_109.5, 35.0), // 2012-07-01
    (2_457_204.5, 36.0), // 2015-07-01
    (2_457_754.5, 37.0), // 2017-01-01
];

/// ΔT = TT − UT1 in seconds at the start of each listed year.
/// Linear interpolation between entries; clamped outside the range.
pub(crate) const DELTA_T: [(f64, f64); 24] = [
    (1972.0, 42.23),
    (1974.0, 44.49),
    (1976.0, 46.46),
    (1978.0, 48.53),
    (1980.0, 50.54),
    (1982.0, 52.17),
    (1984.0, 53.79),
    (1986.0, 54.87),
    (1988.0, 55.82),
    (1990.0, 56.86),
    (1992.0, 58.31),
    (1994.0, 59.98),
    (1996.0, 61.63),
    (1998.0, 62.97),
    (2000.0, 63.83),
    (2002.0, 64.30),
    (2005.0, 64.69),
    (2008.0, 65.46),
    (2011.0, 66.32),
    (2014.0, 67.28),
    (2017.0, 68.59),
    (2020.0, 69.36),
    (2023.0, 69.20),
    (2026.0, 69.10),
];
