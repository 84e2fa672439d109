//! Run parameters and YAML scenario loading.
//!
//! A scenario document has up to three sections, all optional; missing keys
//! take the defaults below. When `initial` is present it is used as is and
//! `sampling` is ignored.
//!
//! ```yaml
//! params:
//!   box_width: 60.0
//!   box_height: 30.0
//!   acceleration: [0.0, -1.0]
//!   restitution_bc: 1.0         # particle-wall
//!   restitution_pc: 1.0         # particle-particle
//!   dt: 1.0                     # position step
//!   acceleration_dt: 1.0        # velocity kick step
//!   acceleration_schedule: alternating   # or always_before_boundary / always_after_boundary
//!   impulse_policy: unconditional        # or skip_separating
//!
//! sampling:
//!   n_particles: 5
//!   position_limits_x: [-24.0, 24.0]
//!   position_limits_y: [-12.0, 12.0]
//!   velocity_limits_x: [-120.0, 120.0]
//!   velocity_limits_y: [-60.0, 60.0]
//!   radius_range: [0.5, 2.0]
//!   mass: { kind: from_radius }  # or { kind: constant, value: 1.0 }
//!   avoid_overlap: false
//!   seed: 42
//!
//! initial:                       # explicit per-particle state
//!   positions: [[-1.0, 0.0], [1.0, 0.0]]
//!   velocities: [[1.0, 0.0], [-1.0, 0.0]]
//!   radii: [0.5, 0.5]
//!   masses: [1.0, 1.0]
//! ```

use crate::core::boundary::BoxBounds;
use crate::core::integrator::AccelerationSchedule;
use crate::core::particle::InitialState;
use crate::core::resolve::ImpulsePolicy;
use crate::core::sim::Simulation;
use crate::error::{Error, Result};
use crate::sampling::{sample_initial_state, SamplingConfig};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Scalar parameters of a simulation: box, field, collision model and steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub box_width: f64,
    pub box_height: f64,
    /// Constant acceleration applied to every particle.
    pub acceleration: [f64; 2],
    /// Restitution for particle-wall contacts, in [0, 1].
    pub restitution_bc: f64,
    /// Restitution for particle-particle contacts, in [0, 1].
    pub restitution_pc: f64,
    /// Time step for the position update.
    pub dt: f64,
    /// Time step for the velocity kick.
    pub acceleration_dt: f64,
    pub acceleration_schedule: AccelerationSchedule,
    pub impulse_policy: ImpulsePolicy,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            box_width: 60.0,
            box_height: 30.0,
            acceleration: [0.0, -1.0],
            restitution_bc: 1.0,
            restitution_pc: 1.0,
            dt: 1.0,
            acceleration_dt: 1.0,
            acceleration_schedule: AccelerationSchedule::default(),
            impulse_policy: ImpulsePolicy::default(),
        }
    }
}

impl SimParams {
    /// Parameters for a box of the given size with no acceleration and elastic contacts.
    pub fn for_box(box_width: f64, box_height: f64) -> Self {
        Self {
            box_width,
            box_height,
            acceleration: [0.0, 0.0],
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> BoxBounds {
        BoxBounds::new(self.box_width, self.box_height)
    }

    /// Check every parameter; called by [`Simulation::new`].
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("box_width", self.box_width), ("box_height", self.box_height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.acceleration.iter().all(|a| a.is_finite()) {
            return Err(Error::InvalidParam("acceleration must be finite".into()));
        }
        for (name, e) in [
            ("restitution_bc", self.restitution_bc),
            ("restitution_pc", self.restitution_pc),
        ] {
            if !(0.0..=1.0).contains(&e) {
                return Err(Error::InvalidParam(format!("{name} must lie in [0, 1]")));
            }
        }
        for (name, dt) in [("dt", self.dt), ("acceleration_dt", self.acceleration_dt)] {
            if !dt.is_finite() || dt <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// A complete scenario: run parameters plus the initial state, given
/// explicitly or drawn from `sampling`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub params: SimParams,
    pub sampling: SamplingConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<InitialState>,
}

impl SimulationConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let cfg = Self::from_reader(BufReader::new(file))?;
        log::info!("loaded scenario from {}", path.as_ref().display());
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The explicit initial state if one is given, otherwise a sampled one.
    pub fn initial_state(&self) -> Result<InitialState> {
        match &self.initial {
            Some(initial) => Ok(initial.clone()),
            None => sample_initial_state(&self.sampling),
        }
    }

    /// Resolve the initial state and construct the simulation.
    pub fn build(&self) -> Result<Simulation> {
        Simulation::new(self.initial_state()?, self.params.clone())
    }
}
