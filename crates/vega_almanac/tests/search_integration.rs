//! Search-engine accuracy against observables with analytic answers.

use std::f64::consts::TAU;

use vega_almanac::{
    ContinuousObservable, DiscreteObservable, SearchConfig, SearchError, find_discrete,
    find_maxima,
};
use vega_time::{Time, Timescale};

/// High/low with a known period: transitions at `phase + k·period/2`.
struct SquareWave {
    period_days: f64,
    phase_jd: f64,
}

impl DiscreteObservable for SquareWave {
    fn rough_period_days(&self) -> f64 {
        self.period_days / 2.0
    }

    fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError> {
        Ok(t.tt()
            .iter()
            .map(|&jd| {
                let cycles = (jd - self.phase_jd) / self.period_days;
                u8::from(cycles.rem_euclid(1.0) < 0.5)
            })
            .collect())
    }
}

/// A sinusoid whose maxima sit at `phase + k·period`.
struct Sinusoid {
    period_days: f64,
    phase_jd: f64,
}

impl ContinuousObservable for Sinusoid {
    fn rough_period_days(&self) -> f64 {
        self.period_days
    }

    fn values(&self, t: &Time) -> Result<Vec<f64>, SearchError> {
        Ok(t.tt()
            .iter()
            .map(|&jd| (TAU * (jd - self.phase_jd) / self.period_days).cos())
            .collect())
    }
}

#[test]
fn every_transition_found_within_epsilon() {
    let ts = Timescale::builtin();
    let config = SearchConfig::default();
    let wave = SquareWave {
        period_days: 0.8,
        phase_jd: 2_460_000.61,
    };

    let start = 2_460_000.5;
    let end = 2_460_004.5;
    let events = find_discrete(&ts, start, end, &wave, &config).unwrap();

    // Transitions every 0.4 days from the phase epoch.
    let mut expected = Vec::new();
    let mut k = 0;
    loop {
        let jd = 2_460_000.61 + 0.4 * k as f64;
        if jd >= end {
            break;
        }
        if jd > start {
            expected.push(jd);
        }
        k += 1;
    }

    assert_eq!(events.len(), expected.len());
    for (event, want) in events.iter().zip(&expected) {
        assert!(
            (event.jd_tt - want).abs() <= config.epsilon_days,
            "found {} expected {} (err {:.2e} d)",
            event.jd_tt,
            want,
            (event.jd_tt - want).abs()
        );
    }

    // Values alternate, starting from the state after the first flip.
    for pair in events.windows(2) {
        assert_ne!(pair[0].value, pair[1].value);
    }
}

#[test]
fn epsilon_actually_tightens_the_answer() {
    let ts = Timescale::builtin();
    let wave = SquareWave {
        period_days: 1.0,
        phase_jd: 2_460_000.737,
    };

    let loose = SearchConfig::with_epsilon(0.01);
    let tight = SearchConfig::with_epsilon(1e-9);

    let e_loose = find_discrete(&ts, 2_460_000.5, 2_460_001.2, &wave, &loose).unwrap();
    let e_tight = find_discrete(&ts, 2_460_000.5, 2_460_001.2, &wave, &tight).unwrap();

    assert_eq!(e_loose.len(), 1);
    assert_eq!(e_tight.len(), 1);
    assert!((e_loose[0].jd_tt - 2_460_000.737).abs() <= 0.01);
    assert!((e_tight[0].jd_tt - 2_460_000.737).abs() <= 1e-9);
}

#[test]
fn fan_out_width_does_not_change_the_answer() {
    let ts = Timescale::builtin();
    let wave = SquareWave {
        period_days: 0.9,
        phase_jd: 2_460_000.55,
    };
    for num in [4, 12, 25] {
        let config = SearchConfig {
            num,
            ..SearchConfig::default()
        };
        let events = find_discrete(&ts, 2_460_000.5, 2_460_002.5, &wave, &config).unwrap();
        assert!(!events.is_empty());
        for event in &events {
            let cycles = (event.jd_tt - 2_460_000.55) / 0.9;
            let dist_to_half = (cycles * 2.0 - (cycles * 2.0).round()).abs() * 0.45;
            assert!(
                dist_to_half <= config.epsilon_days,
                "num={num}: event {0} off a half-cycle by {dist_to_half}",
                event.jd_tt
            );
        }
    }
}

#[test]
fn maxima_found_within_epsilon() {
    let ts = Timescale::builtin();
    let config = SearchConfig::default();
    let f = Sinusoid {
        period_days: 1.3,
        phase_jd: 2_460_000.9,
    };
    let maxima = find_maxima(&ts, 2_460_000.5, 2_460_003.5, &f, &config).unwrap();

    // Peaks at 2460000.9 and 2460002.2 (2460003.5 sits on the edge).
    assert!(maxima.len() >= 2, "found {} maxima", maxima.len());
    for m in &maxima {
        let cycles = (m.jd_tt - 2_460_000.9) / 1.3;
        let off = (cycles - cycles.round()).abs() * 1.3;
        assert!(off <= config.epsilon_days, "peak {} off by {off}", m.jd_tt);
        assert!(m.value > 0.999_999);
    }
}

#[test]
fn maxima_search_rejects_reversed_range() {
    let ts = Timescale::builtin();
    let f = Sinusoid {
        period_days: 1.0,
        phase_jd: 2_460_000.5,
    };
    assert!(matches!(
        find_maxima(&ts, 2_460_001.5, 2_460_000.5, &f, &SearchConfig::default()),
        Err(SearchError::InvalidRange { .. })
    ));
}

#[test]
fn search_is_pure() {
    let ts = Timescale::builtin();
    let wave = SquareWave {
        period_days: 0.7,
        phase_jd: 2_460_000.66,
    };
    let config = SearchConfig::default();
    let runs: Vec<_> = (0..3)
        .map(|_| find_discrete(&ts, 2_460_000.5, 2_460_002.5, &wave, &config).unwrap())
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}
