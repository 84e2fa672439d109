use crate::config::SimParams;
use crate::core::boundary::apply_boundary;
use crate::core::detect::detect_collisions;
use crate::core::field::{VectorField, DIM};
use crate::core::integrator::{accelerate, translate, AccelerationOrder};
use crate::core::particle::{InitialState, ParticleSystem};
use crate::core::resolve::apply_impulses;
use crate::error::Result;
use ndarray::Array1;

/// Counts gathered while advancing one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particle-wall contacts resolved (a corner hit counts twice).
    pub wall_contacts: usize,
    /// Particle pairs that received an impulse.
    pub pair_collisions: usize,
    /// Overlapping pairs skipped because their centers coincide.
    pub degenerate_pairs: usize,
    /// Overlapping pairs skipped because they were already separating.
    pub separating_pairs_skipped: usize,
}

/// Read-only view of the state after a frame, handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Most recently stepped frame; `None` before the first step.
    pub frame_index: Option<u64>,
    pub position: &'a VectorField,
    pub velocity: &'a VectorField,
    pub radius: &'a Array1<f64>,
    pub report: StepReport,
}

/// Fixed-step simulation of hard disks in a box.
///
/// Owns the particle system exclusively. Each [`Simulation::step`] runs:
/// translate, acceleration kick (before or after the walls), wall resolution,
/// all-pairs detection, impulse resolution.
#[derive(Debug, Clone)]
pub struct Simulation {
    system: ParticleSystem,
    params: SimParams,
    /// Index of the next frame used by [`Simulation::advance`].
    next_frame: u64,
    last_frame: Option<u64>,
    last_report: StepReport,
}

impl Simulation {
    /// Build a simulation from initial conditions and run parameters.
    ///
    /// Errors:
    /// - `Error::InvalidParam` / `Error::LengthMismatch` for any malformed input
    pub fn new(initial: InitialState, params: SimParams) -> Result<Self> {
        params.validate()?;
        let system = ParticleSystem::from_initial(&initial, params.acceleration)?;
        log::debug!(
            "simulation of {} particles in a {}x{} box",
            system.len(),
            params.box_width,
            params.box_height
        );
        Ok(Self {
            system,
            params,
            next_frame: 0,
            last_frame: None,
            last_report: StepReport::default(),
        })
    }

    /// Advance one frame, picking the acceleration order from the configured schedule.
    ///
    /// `frame_index` should increase monotonically across calls for the
    /// alternating schedule to mean anything; this is not checked.
    pub fn step(&mut self, frame_index: u64) -> Snapshot<'_> {
        let order = self.params.acceleration_schedule.order_for(frame_index);
        self.step_with_order(frame_index, order)
    }

    /// Advance one frame with an explicit acceleration order.
    pub fn step_with_order(&mut self, frame_index: u64, order: AccelerationOrder) -> Snapshot<'_> {
        let p = &self.params;
        let sys = &mut self.system;

        let tentative = translate(sys, p.dt);
        if order == AccelerationOrder::BeforeBoundary {
            accelerate(sys, p.acceleration_dt);
        }
        let wall_contacts = apply_boundary(sys, tentative, p.bounds(), p.restitution_bc);
        if order == AccelerationOrder::AfterBoundary {
            accelerate(sys, p.acceleration_dt);
        }

        let pairs = detect_collisions(sys);
        let resolved = apply_impulses(sys, &pairs, p.restitution_pc, p.impulse_policy);

        self.last_report = StepReport {
            wall_contacts,
            pair_collisions: resolved.applied,
            degenerate_pairs: resolved.degenerate,
            separating_pairs_skipped: resolved.separating_skipped,
        };
        log::debug!("frame {frame_index} ({order:?}): {:?}", self.last_report);

        self.last_frame = Some(frame_index);
        self.next_frame = frame_index.saturating_add(1);
        self.snapshot()
    }

    /// Step `frames` times, continuing from the last frame index.
    pub fn advance(&mut self, frames: u64) -> Snapshot<'_> {
        for _ in 0..frames {
            self.step(self.next_frame);
        }
        self.snapshot()
    }

    /// View of the current state without stepping.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            frame_index: self.last_frame,
            position: self.system.position(),
            velocity: self.system.velocity(),
            radius: self.system.radius(),
            report: self.last_report,
        }
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Index of the most recently stepped frame, if any.
    pub fn frame(&self) -> Option<u64> {
        self.last_frame
    }

    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.system.len()
    }

    /// Compute total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.system.kinetic_energy()
    }

    /// Compute total linear momentum (diagnostic).
    pub fn momentum(&self) -> [f64; DIM] {
        self.system.momentum()
    }
}
