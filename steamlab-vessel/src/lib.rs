//! Piston-cylinder property state engine for steamlab.
//!
//! This crate owns the single authoritative [`ThermodynamicState`] of the
//! simulated water mass and evolves it through physically constrained delta
//! operations: heat addition at constant pressure or volume, and pressure
//! changes with or without insulation. Every operation resolves a full
//! candidate state through the property provider and commits it atomically,
//! so a failed operation leaves the previous state untouched.

mod config;
mod engine;
mod error;
mod state;
mod tick;
mod vessel;

pub use config::IterationConfig;
pub use engine::VesselEngine;
pub use error::StateError;
pub use state::ThermodynamicState;
pub use tick::{TickConfig, TickInput};
pub use vessel::Vessel;
