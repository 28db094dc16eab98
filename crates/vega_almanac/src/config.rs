//! Search configuration.

use vega_time::SECONDS_PER_DAY;

/// One second expressed as a fraction of a day, the epsilon the
/// satellite-pass procedure uses.
pub const ONE_SECOND_DAYS: f64 = 1.0 / SECONDS_PER_DAY;

/// Tuning knobs for the adaptive refinement loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Convergence threshold for a bracket's width, in days
    /// (default 1 ms).
    pub epsilon_days: f64,
    /// Samples laid across each bracket per refinement round
    /// (default 12).
    pub num: usize,
    /// Cap on refinement rounds; exceeding it is a fatal
    /// non-convergence error (default 64).
    pub max_refinements: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epsilon_days: 0.001 / SECONDS_PER_DAY,
            num: 12,
            max_refinements: 64,
        }
    }
}

impl SearchConfig {
    /// Default configuration with a custom epsilon.
    pub fn with_epsilon(epsilon_days: f64) -> Self {
        Self {
            epsilon_days,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.epsilon_days.is_finite() || self.epsilon_days <= 0.0 {
            return Err("epsilon_days must be positive");
        }
        if self.num < 2 {
            return Err("num must be at least 2");
        }
        if self.max_refinements == 0 {
            return Err("max_refinements must be > 0");
        }
        Ok(())
    }
}
