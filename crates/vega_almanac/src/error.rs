//! Error types for the event search engine.

use std::error::Error;
use std::fmt::{Display, Formatter};

use vega_core::ObserveError;
use vega_time::TimeError;

/// Errors from `find_discrete`, `find_maxima`, and the composite
/// search procedures.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// The search interval is empty or reversed.
    InvalidRange { start: f64, end: f64 },
    /// The maxima search saw no rising-to-falling bracket anywhere in
    /// the sampled interval.
    NoMaximumFound,
    /// The refinement loop hit its iteration cap before the first
    /// bracket shrank below epsilon.
    NonConvergence { refinements: u32 },
    /// A search configuration failed validation.
    InvalidConfig(&'static str),
    /// An observable failed while being evaluated.
    Observe(ObserveError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "start {start} must be earlier than end {end}")
            }
            Self::NoMaximumFound => write!(f, "no maximum found in the search interval"),
            Self::NonConvergence { refinements } => {
                write!(f, "search failed to converge after {refinements} refinements")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid search config: {msg}"),
            Self::Observe(e) => write!(f, "observable evaluation failed: {e}"),
        }
    }
}

impl Error for SearchError {}

impl From<ObserveError> for SearchError {
    fn from(e: ObserveError) -> Self {
        Self::Observe(e)
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Observe(ObserveError::Time(e))
    }
}
