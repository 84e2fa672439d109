//! Fixed-step motion update.
//!
//! Positions are advanced with the current velocity (`x + v dt`), and the
//! shared acceleration is applied as a separate velocity kick
//! (`v += a dt_acc`). Where the kick sits relative to boundary resolution is
//! described by [`AccelerationOrder`].

use crate::core::field::VectorField;
use crate::core::particle::ParticleSystem;
use serde::{Deserialize, Serialize};

/// Placement of the acceleration kick within one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelerationOrder {
    /// Kick velocities before wall reflection.
    BeforeBoundary,
    /// Kick velocities after wall reflection.
    AfterBoundary,
}

impl AccelerationOrder {
    /// Parity rule: even frames kick before the walls, odd frames after.
    #[inline]
    pub fn for_frame(frame_index: u64) -> Self {
        if frame_index % 2 == 0 {
            AccelerationOrder::BeforeBoundary
        } else {
            AccelerationOrder::AfterBoundary
        }
    }
}

/// How a simulation picks the [`AccelerationOrder`] for each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationSchedule {
    /// Alternate by frame parity (see [`AccelerationOrder::for_frame`]).
    #[default]
    Alternating,
    AlwaysBeforeBoundary,
    AlwaysAfterBoundary,
}

impl AccelerationSchedule {
    pub fn order_for(self, frame_index: u64) -> AccelerationOrder {
        match self {
            AccelerationSchedule::Alternating => AccelerationOrder::for_frame(frame_index),
            AccelerationSchedule::AlwaysBeforeBoundary => AccelerationOrder::BeforeBoundary,
            AccelerationSchedule::AlwaysAfterBoundary => AccelerationOrder::AfterBoundary,
        }
    }
}

/// Tentative positions after one step of free flight: `position + velocity * dt`.
///
/// Pure; the system is left untouched so the boundary pass can decide the
/// final positions.
pub fn translate(system: &ParticleSystem, dt: f64) -> VectorField {
    system.position.scaled_sum(dt, &system.velocity)
}

/// Apply the shared acceleration to every velocity: `v += a * dt`.
pub fn accelerate(system: &mut ParticleSystem, dt: f64) {
    let a = system.acceleration();
    system.velocity.add_uniform(dt, a);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particle::InitialState;
    use crate::error::Result;

    fn system(acceleration: [f64; 2]) -> Result<ParticleSystem> {
        let init = InitialState {
            positions: vec![[0.0, 0.0], [1.0, -1.0]],
            velocities: vec![[1.0, 2.0], [-0.5, 0.0]],
            radii: vec![0.1, 0.1],
            masses: vec![1.0, 1.0],
        };
        ParticleSystem::from_initial(&init, acceleration)
    }

    #[test]
    fn translate_does_not_mutate() -> Result<()> {
        let sys = system([0.0, -1.0])?;
        let tentative = translate(&sys, 0.5);
        assert_eq!(tentative.to_points(), vec![[0.5, 1.0], [0.75, -1.0]]);
        assert_eq!(sys.position().get(0), [0.0, 0.0]);
        assert_eq!(sys.velocity().get(0), [1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn accelerate_kicks_all_velocities() -> Result<()> {
        let mut sys = system([0.0, -2.0])?;
        accelerate(&mut sys, 0.25);
        assert_eq!(sys.velocity().to_points(), vec![[1.0, 1.5], [-0.5, -0.5]]);
        assert_eq!(sys.position().get(1), [1.0, -1.0]);
        Ok(())
    }

    #[test]
    fn parity_rule() {
        use AccelerationOrder::{AfterBoundary, BeforeBoundary};
        assert_eq!(AccelerationOrder::for_frame(0), BeforeBoundary);
        assert_eq!(AccelerationOrder::for_frame(1), AfterBoundary);
        assert_eq!(AccelerationOrder::for_frame(10), BeforeBoundary);
        assert_eq!(
            AccelerationSchedule::AlwaysAfterBoundary.order_for(4),
            AccelerationOrder::AfterBoundary
        );
        assert_eq!(
            AccelerationSchedule::Alternating.order_for(7),
            AccelerationOrder::AfterBoundary
        );
    }
}
