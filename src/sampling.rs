//! Random initial conditions.
//!
//! Positions, velocities and radii are drawn independently and uniformly per
//! axis from inclusive ranges. By default masses equal radii.

use crate::core::particle::InitialState;
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How particle masses are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MassRule {
    /// `mass[i] = radius[i]`. Requires strictly positive radii.
    #[default]
    FromRadius,
    /// The same mass for every particle.
    Constant { value: f64 },
}

/// Limits for drawing an [`InitialState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub n_particles: usize,
    pub position_limits_x: [f64; 2],
    pub position_limits_y: [f64; 2],
    pub velocity_limits_x: [f64; 2],
    pub velocity_limits_y: [f64; 2],
    pub radius_range: [f64; 2],
    pub mass: MassRule,
    /// Redraw positions until no two disks overlap.
    pub avoid_overlap: bool,
    /// RNG seed; `None` draws a fresh seed from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::for_box(5, 60.0, 30.0)
    }
}

impl SamplingConfig {
    /// Limits derived from the box size: positions keep a margin of a tenth of
    /// the box on every side, velocity limits are five times the position limits.
    pub fn for_box(n_particles: usize, box_width: f64, box_height: f64) -> Self {
        let px = 0.5 * box_width - 0.1 * box_width;
        let py = 0.5 * box_height - 0.1 * box_height;
        Self {
            n_particles,
            position_limits_x: [-px, px],
            position_limits_y: [-py, py],
            velocity_limits_x: [-5.0 * px, 5.0 * px],
            velocity_limits_y: [-5.0 * py, 5.0 * py],
            radius_range: [0.5, 2.0],
            mass: MassRule::FromRadius,
            avoid_overlap: false,
            seed: None,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, [lo, hi]) in [
            ("position_limits_x", self.position_limits_x),
            ("position_limits_y", self.position_limits_y),
            ("velocity_limits_x", self.velocity_limits_x),
            ("velocity_limits_y", self.velocity_limits_y),
            ("radius_range", self.radius_range),
        ] {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite with low <= high"
                )));
            }
        }
        let [r_lo, _] = self.radius_range;
        match self.mass {
            MassRule::FromRadius if r_lo <= 0.0 => Err(Error::InvalidParam(
                "radius_range must be > 0 when masses follow radii".into(),
            )),
            MassRule::Constant { value } if !value.is_finite() || value <= 0.0 => Err(
                Error::InvalidParam("constant mass must be finite and > 0".into()),
            ),
            _ if r_lo < 0.0 => Err(Error::InvalidParam("radius_range must be >= 0".into())),
            _ => Ok(()),
        }
    }
}

const MAX_PLACEMENT_ATTEMPTS: usize = 100_000;

/// Draw an initial state according to `cfg`.
///
/// Errors:
/// - `Error::InvalidParam` on inverted or non-finite limits, radii or masses
///   that would be rejected by the particle system, or when `avoid_overlap`
///   cannot place a particle.
pub fn sample_initial_state(cfg: &SamplingConfig) -> Result<InitialState> {
    cfg.validate()?;
    let mut rng: StdRng = match cfg.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    };

    let n = cfg.n_particles;
    let mut state = InitialState {
        positions: Vec::with_capacity(n),
        velocities: Vec::with_capacity(n),
        radii: Vec::with_capacity(n),
        masses: Vec::with_capacity(n),
    };
    let draw = |rng: &mut StdRng, [lo, hi]: [f64; 2]| rng.random_range(lo..=hi);

    for id in 0..n {
        let radius = draw(&mut rng, cfg.radius_range);
        let mut attempts = 0usize;
        let position = loop {
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                return Err(Error::InvalidParam(format!(
                    "could not place particle {id} without overlap after {attempts} attempts"
                )));
            }
            attempts += 1;
            let p = [
                draw(&mut rng, cfg.position_limits_x),
                draw(&mut rng, cfg.position_limits_y),
            ];
            if !cfg.avoid_overlap || !overlaps_existing(&state, p, radius) {
                break p;
            }
        };
        if attempts > 1 {
            log::debug!("placed particle {id} after {attempts} attempts");
        }
        let velocity = [
            draw(&mut rng, cfg.velocity_limits_x),
            draw(&mut rng, cfg.velocity_limits_y),
        ];
        let mass = match cfg.mass {
            MassRule::FromRadius => radius,
            MassRule::Constant { value } => value,
        };

        state.positions.push(position);
        state.velocities.push(velocity);
        state.radii.push(radius);
        state.masses.push(mass);
    }
    Ok(state)
}

fn overlaps_existing(state: &InitialState, p: [f64; 2], radius: f64) -> bool {
    state
        .positions
        .iter()
        .zip(&state.radii)
        .any(|(q, &r)| (p[0] - q[0]).hypot(p[1] - q[1]) < radius + r)
}
