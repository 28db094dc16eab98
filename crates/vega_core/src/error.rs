//! Error types for the observation pipeline.

use std::error::Error;
use std::fmt::{Display, Formatter};

use vega_time::TimeError;

use crate::Body;

/// Errors reported by ephemeris and propagator providers.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The provider has no data for this body.
    UnsupportedBody(Body),
    /// The requested epoch is outside the provider's coverage.
    EpochOutOfRange { jd_tdb: f64 },
    /// Provider-specific failure.
    Provider(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBody(body) => write!(f, "unsupported body: {body:?}"),
            Self::EpochOutOfRange { jd_tdb } => write!(f, "epoch out of range: {jd_tdb}"),
            Self::Provider(msg) => write!(f, "ephemeris provider error: {msg}"),
        }
    }
}

impl Error for EphemerisError {}

/// Errors from the observe → apparent → horizontal pipeline.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ObserveError {
    /// `horizontal()` was called on a position whose observer carries
    /// no surface basis — only a `Topos` observer defines a horizon.
    MissingObserverFrame,
    /// The ephemeris oracle failed.
    Ephemeris(EphemerisError),
    /// A time conversion failed.
    Time(TimeError),
}

impl Display for ObserveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingObserverFrame => write!(
                f,
                "horizontal coordinates require an observer at a surface location"
            ),
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for ObserveError {}

impl From<EphemerisError> for ObserveError {
    fn from(e: EphemerisError) -> Self {
        Self::Ephemeris(e)
    }
}

impl From<TimeError> for ObserveError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
