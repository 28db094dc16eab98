//! Error types for time-scale handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar conversion or conversion-table construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar input is out of range (bad month, day, etc.).
    InvalidCalendar(&'static str),
    /// A ΔT or leap-second table failed validation.
    InvalidTable(&'static str),
    /// A scalar was requested from a batch of length != 1.
    NotScalar { len: usize },
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCalendar(msg) => write!(f, "invalid calendar date: {msg}"),
            Self::InvalidTable(msg) => write!(f, "invalid conversion table: {msg}"),
            Self::NotScalar { len } => {
                write!(f, "expected a single instant, batch has {len}")
            }
        }
    }
}

impl Error for TimeError {}
