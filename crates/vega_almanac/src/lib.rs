//! Discrete-event search over astronomical observables.
//!
//! This crate provides:
//! - [`find_discrete`] and [`find_maxima`], the adaptive-refinement
//!   search engine over batch-evaluated functions of time
//! - Observable builders: sun above horizon, moon phase quarter,
//!   season quarter, satellite visibility and ascent
//! - [`satellite_passes`], the composite rise/apex/set procedure
//! - Phase-angle and illuminated-fraction facts
//! - [`CircularOrbit`], a minimal propagator behind the
//!   [`vega_core::OrbitPropagator`] seam

pub mod config;
pub mod error;
pub mod facts;
pub mod observables;
pub mod passes;
pub mod satellite;
pub mod search;

pub use config::{ONE_SECOND_DAYS, SearchConfig};
pub use error::SearchError;
pub use facts::{fraction_illuminated, phase_angle};
pub use observables::{
    MoonPhase, STANDARD_HORIZON_DEG, SatelliteAboveHorizon, SatelliteAltitude,
    SatelliteAscending, Season, SunAboveHorizon, satellite_altaz,
};
pub use passes::{SatellitePass, satellite_passes};
pub use satellite::CircularOrbit;
pub use search::{
    ContinuousObservable, DiscreteObservable, Maximum, Transition, find_discrete, find_maxima,
};

/// Season names indexed by the [`Season`] observable's quarters.
pub const SEASONS: [&str; 4] = ["Spring", "Summer", "Autumn", "Winter"];

/// Phase names indexed by the [`MoonPhase`] observable's quarters.
pub const MOON_PHASES: [&str; 4] = ["New Moon", "First Quarter", "Full Moon", "Last Quarter"];
