//! # particlebox
//!
//! Hard disks bouncing in a 2D box centered on the origin.
//!
//! Each frame advances positions with a fixed step, applies a constant
//! acceleration, reflects particles off the walls with a restitution
//! coefficient, finds every overlapping pair by brute force, and exchanges
//! impulses along the line of centers.
//!
//! - `core`: particle state and the per-frame update
//! - `config`: run parameters and YAML scenarios
//! - `sampling`: random initial conditions
//! - `python` (feature `python`): NumPy-facing wrapper for plotting frontends

pub mod config;
pub mod core;
pub mod error;
pub mod sampling;

#[cfg(feature = "python")]
mod python;

pub use crate::config::{SimParams, SimulationConfig};
pub use crate::core::{InitialState, Simulation, Snapshot, StepReport};
pub use crate::error::{Error, Result};
