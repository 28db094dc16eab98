//! The discrete-event search engine.
//!
//! `find_discrete` locates the instants where a finite-valued
//! function of time changes value; `find_maxima` locates local maxima
//! of a continuous one. Both lay a uniform partition across the
//! interval sized by the observable's `rough_period`, evaluate the
//! whole batch at once, and then repeatedly re-partition only the
//! brackets that straddle an event until the first bracket's width
//! drops below epsilon.
//!
//! Because every bracket descends from the same uniform partition,
//! all brackets shrink at the same rate, so testing the first one is
//! a valid convergence proxy for the rest. Events closer together
//! than the initial sample spacing are not separated — callers keep
//! that from happening by supplying an honest `rough_period`.

use vega_time::{Time, Timescale};

use crate::config::SearchConfig;
use crate::error::SearchError;

/// A finite-valued observable: the search detects changes in its
/// value, not the value itself.
pub trait DiscreteObservable {
    /// Estimated days between interesting transitions. A sampling
    /// density hint, never a correctness guarantee.
    fn rough_period_days(&self) -> f64;

    /// Evaluate the observable at every instant of the batch.
    fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError>;
}

/// A continuous observable, searched for local maxima.
pub trait ContinuousObservable {
    /// Estimated days between maxima.
    fn rough_period_days(&self) -> f64;

    /// Evaluate the observable at every instant of the batch.
    fn values(&self, t: &Time) -> Result<Vec<f64>, SearchError>;
}

/// One detected transition: the time its bracket closed on, and the
/// observable's value just after the change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Transition time, TT Julian Date (upper bracket bound, within
    /// epsilon of the true crossing).
    pub jd_tt: f64,
    /// The observable's value after the transition.
    pub value: u8,
}

/// One detected local maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Maximum {
    /// Time of the maximum, TT Julian Date, within epsilon.
    pub jd_tt: f64,
    /// The observable's value at the peak sample.
    pub value: f64,
}

/// `count` evenly spaced values from `a` to `b` inclusive.
fn linspace(a: f64, b: f64, count: usize) -> Vec<f64> {
    let count = count.max(2);
    let step = (b - a) / (count - 1) as f64;
    (0..count).map(|i| a + step * i as f64).collect()
}

/// Initial sample grid: `max(1, span/rough_period) · num` points.
fn initial_grid(start: f64, end: f64, rough_period: f64, num: usize) -> Vec<f64> {
    let periods = ((end - start) / rough_period).max(1.0);
    let count = (periods * num as f64).floor() as usize;
    linspace(start, end, count)
}

/// Re-partition each bracket into `num` interior samples (endpoints
/// included), all brackets concatenated into one flat batch.
fn refine(brackets: &[(f64, f64)], num: usize) -> Vec<f64> {
    let mut jd = Vec::with_capacity(brackets.len() * num);
    for &(lo, hi) in brackets {
        for j in 0..num {
            let u = j as f64 / (num - 1) as f64;
            jd.push(lo * (1.0 - u) + hi * u);
        }
    }
    jd
}

/// Find the times at which a discrete observable changes value.
///
/// Returns one [`Transition`] per detected change, in time order;
/// an interval over which the observable is constant yields an empty
/// vector. The interval must run forward: `start < end` in TT Julian
/// Dates, else [`SearchError::InvalidRange`].
///
/// At most one transition is detected per initial coarse bracket; if
/// the observable's `rough_period` overestimates the spacing between
/// events, the extras are silently missed.
pub fn find_discrete<O: DiscreteObservable + ?Sized>(
    ts: &Timescale,
    jd_start_tt: f64,
    jd_end_tt: f64,
    observable: &O,
    config: &SearchConfig,
) -> Result<Vec<Transition>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !(jd_start_tt < jd_end_tt) {
        return Err(SearchError::InvalidRange {
            start: jd_start_tt,
            end: jd_end_tt,
        });
    }

    let mut jd = initial_grid(
        jd_start_tt,
        jd_end_tt,
        observable.rough_period_days(),
        config.num,
    );

    for _ in 0..config.max_refinements {
        let t = ts.tt_jd(jd.clone());
        let y = observable.values(&t)?;

        let indices: Vec<usize> = (0..y.len().saturating_sub(1))
            .filter(|&i| y[i] != y[i + 1])
            .collect();
        if indices.is_empty() {
            return Ok(Vec::new());
        }

        let brackets: Vec<(f64, f64)> =
            indices.iter().map(|&i| (jd[i], jd[i + 1])).collect();

        // All brackets came from one uniform partition, so the first
        // one's width stands in for the rest.
        if brackets[0].1 - brackets[0].0 <= config.epsilon_days {
            return Ok(indices
                .iter()
                .map(|&i| Transition {
                    jd_tt: jd[i + 1],
                    value: y[i + 1],
                })
                .collect());
        }

        jd = refine(&brackets, config.num);
    }

    Err(SearchError::NonConvergence {
        refinements: config.max_refinements,
    })
}

/// Find local maxima of a continuous observable.
///
/// A maximum is bracketed by three consecutive samples whose slope
/// turns from rising to falling. Fails with
/// [`SearchError::NoMaximumFound`] if the sampled interval contains
/// no such bracket at all.
pub fn find_maxima<O: ContinuousObservable + ?Sized>(
    ts: &Timescale,
    jd_start_tt: f64,
    jd_end_tt: f64,
    observable: &O,
    config: &SearchConfig,
) -> Result<Vec<Maximum>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !(jd_start_tt < jd_end_tt) {
        return Err(SearchError::InvalidRange {
            start: jd_start_tt,
            end: jd_end_tt,
        });
    }

    let mut jd = initial_grid(
        jd_start_tt,
        jd_end_tt,
        observable.rough_period_days(),
        config.num,
    );

    for _ in 0..config.max_refinements {
        let t = ts.tt_jd(jd.clone());
        let y = observable.values(&t)?;

        // Rising-then-falling triples: slope sign +1 followed by -1.
        let indices: Vec<usize> = (0..y.len().saturating_sub(2))
            .filter(|&i| y[i + 1] > y[i] && y[i + 2] < y[i + 1])
            .collect();
        if indices.is_empty() {
            return Err(SearchError::NoMaximumFound);
        }

        let brackets: Vec<(f64, f64)> =
            indices.iter().map(|&i| (jd[i], jd[i + 2])).collect();

        if brackets[0].1 - brackets[0].0 <= config.epsilon_days {
            return Ok(indices
                .iter()
                .map(|&i| Maximum {
                    jd_tt: jd[i + 1],
                    value: y[i + 1],
                })
                .collect());
        }

        jd = refine(&brackets, config.num);
    }

    Err(SearchError::NonConvergence {
        refinements: config.max_refinements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A step function with known transition times.
    struct Steps {
        at: Vec<f64>,
        rough: f64,
    }

    impl DiscreteObservable for Steps {
        fn rough_period_days(&self) -> f64 {
            self.rough
        }

        fn values(&self, t: &Time) -> Result<Vec<u8>, SearchError> {
            Ok(t.tt()
                .iter()
                .map(|&jd| self.at.iter().filter(|&&a| jd >= a).count() as u8)
                .collect())
        }
    }

    /// A smooth hump peaking at a known time.
    struct Hump {
        peak: f64,
    }

    impl ContinuousObservable for Hump {
        fn rough_period_days(&self) -> f64 {
            1.0
        }

        fn values(&self, t: &Time) -> Result<Vec<f64>, SearchError> {
            Ok(t.tt()
                .iter()
                .map(|&jd| -(jd - self.peak) * (jd - self.peak))
                .collect())
        }
    }

    fn ts() -> Timescale {
        Timescale::builtin()
    }

    #[test]
    fn finds_known_transition() {
        let f = Steps {
            at: vec![2_460_000.73],
            rough: 0.5,
        };
        let config = SearchConfig::default();
        let events =
            find_discrete(&ts(), 2_460_000.5, 2_460_001.5, &f, &config).unwrap();
        assert_eq!(events.len(), 1);
        assert!((events[0].jd_tt - 2_460_000.73).abs() <= config.epsilon_days);
        assert_eq!(events[0].value, 1);
    }

    #[test]
    fn constant_function_yields_empty() {
        let f = Steps {
            at: vec![],
            rough: 0.5,
        };
        let events =
            find_discrete(&ts(), 2_460_000.5, 2_460_001.5, &f, &SearchConfig::default())
                .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn reversed_range_rejected() {
        let f = Steps {
            at: vec![],
            rough: 0.5,
        };
        let err = find_discrete(&ts(), 2_460_001.5, 2_460_000.5, &f, &SearchConfig::default())
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidRange { .. }));
    }

    #[test]
    fn equal_range_rejected() {
        let f = Steps {
            at: vec![],
            rough: 0.5,
        };
        let err = find_discrete(&ts(), 2_460_000.5, 2_460_000.5, &f, &SearchConfig::default())
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidRange { .. }));
    }

    #[test]
    fn idempotent() {
        let f = Steps {
            at: vec![2_460_000.9, 2_460_001.4],
            rough: 0.4,
        };
        let config = SearchConfig::default();
        let a = find_discrete(&ts(), 2_460_000.5, 2_460_001.5, &f, &config).unwrap();
        let b = find_discrete(&ts(), 2_460_000.5, 2_460_001.5, &f, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn maximum_at_known_time() {
        let f = Hump { peak: 2_460_000.81 };
        let config = SearchConfig::default();
        let maxima = find_maxima(&ts(), 2_460_000.5, 2_460_001.5, &f, &config).unwrap();
        assert_eq!(maxima.len(), 1);
        assert!((maxima[0].jd_tt - 2_460_000.81).abs() <= config.epsilon_days);
    }

    #[test]
    fn monotonic_function_has_no_maximum() {
        struct Ramp;
        impl ContinuousObservable for Ramp {
            fn rough_period_days(&self) -> f64 {
                1.0
            }
            fn values(&self, t: &Time) -> Result<Vec<f64>, SearchError> {
                Ok(t.tt().to_vec())
            }
        }
        let err = find_maxima(&ts(), 2_460_000.5, 2_460_001.5, &Ramp, &SearchConfig::default())
            .unwrap_err();
        assert_eq!(err, SearchError::NoMaximumFound);
    }

    #[test]
    fn refinement_guard_trips() {
        let f = Steps {
            at: vec![2_460_000.73],
            rough: 0.5,
        };
        let config = SearchConfig {
            epsilon_days: 1e-300, // unreachable
            num: 12,
            max_refinements: 3,
        };
        let err = find_discrete(&ts(), 2_460_000.5, 2_460_001.5, &f, &config).unwrap_err();
        assert_eq!(err, SearchError::NonConvergence { refinements: 3 });
    }

    #[test]
    fn invalid_config_rejected() {
        let f = Steps {
            at: vec![],
            rough: 0.5,
        };
        let config = SearchConfig {
            epsilon_days: -1.0,
            num: 12,
            max_refinements: 64,
        };
        assert!(matches!(
            find_discrete(&ts(), 2_460_000.5, 2_460_001.5, &f, &config),
            Err(SearchError::InvalidConfig(_))
        ));
    }
}
