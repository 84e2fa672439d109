//! Simulation core: particle state and the per-frame physics update.
//!
//! Modules, leaf to root: `field` (per-particle 2D arrays), `particle`
//! (the particle system), `integrator`, `boundary`, `detect`, `resolve`,
//! and `sim` (the stepper that chains them).

pub mod boundary;
pub mod detect;
pub mod field;
pub mod integrator;
pub mod particle;
pub mod resolve;
pub mod sim;

pub use boundary::{resolve_boundary, BoxBounds};
pub use detect::{detect_collisions, distance_matrix, overlapping_pairs, Pair};
pub use field::{VectorField, DIM};
pub use integrator::{accelerate, translate, AccelerationOrder, AccelerationSchedule};
pub use particle::{InitialState, ParticleSystem};
pub use resolve::{resolve_collisions, ImpulsePolicy, ResolveReport};
pub use sim::{Simulation, Snapshot, StepReport};
