use crate::core::field::{VectorField, DIM};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Initial conditions for a run, one entry per particle.
///
/// Produced by [`crate::sampling::sample_initial_state`] or supplied directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    pub positions: Vec<[f64; DIM]>,
    pub velocities: Vec<[f64; DIM]>,
    pub radii: Vec<f64>,
    pub masses: Vec<f64>,
}

impl InitialState {
    /// Number of particles, taken from `positions`.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// The particle population: kinematic state plus fixed per-particle properties.
///
/// Fields:
/// - `position`, `velocity`: mutated by every step
/// - `acceleration`: one constant vector shared by all particles
/// - `radius` (>= 0), `mass` (> 0): fixed at construction
/// - `radius_sum`: cached `radius[i] + radius[j]`, the contact threshold
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub(crate) position: VectorField,
    pub(crate) velocity: VectorField,
    acceleration: [f64; DIM],
    pub(crate) radius: Array1<f64>,
    mass: Array1<f64>,
    radius_sum: Array2<f64>,
}

impl ParticleSystem {
    /// Create a particle system after validating invariants.
    ///
    /// Errors:
    /// - `Error::LengthMismatch` if any array disagrees with `position` on N
    /// - `Error::InvalidParam` if a radius is negative, a mass is non-positive,
    ///   or any value is NaN/inf
    pub fn new(
        position: VectorField,
        velocity: VectorField,
        radius: Array1<f64>,
        mass: Array1<f64>,
        acceleration: [f64; DIM],
    ) -> Result<Self> {
        let n = position.len();
        check_len("velocities", n, velocity.len())?;
        check_len("radii", n, radius.len())?;
        check_len("masses", n, mass.len())?;

        if !position.is_finite() {
            return Err(Error::InvalidParam("positions must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocities must be finite".into()));
        }
        if let Some(i) = radius.iter().position(|r| !r.is_finite() || *r < 0.0) {
            return Err(Error::InvalidParam(format!(
                "radius of particle {i} must be finite and >= 0"
            )));
        }
        if let Some(i) = mass.iter().position(|m| !m.is_finite() || *m <= 0.0) {
            return Err(Error::InvalidParam(format!(
                "mass of particle {i} must be finite and > 0"
            )));
        }
        if !acceleration.iter().all(|a| a.is_finite()) {
            return Err(Error::InvalidParam("acceleration must be finite".into()));
        }

        let radius_sum = Array2::from_shape_fn((n, n), |(i, j)| radius[i] + radius[j]);
        Ok(Self {
            position,
            velocity,
            acceleration,
            radius,
            mass,
            radius_sum,
        })
    }

    /// Build a system from an [`InitialState`] and the shared acceleration.
    pub fn from_initial(initial: &InitialState, acceleration: [f64; DIM]) -> Result<Self> {
        Self::new(
            VectorField::from_points(&initial.positions),
            VectorField::from_points(&initial.velocities),
            Array1::from_vec(initial.radii.clone()),
            Array1::from_vec(initial.masses.clone()),
            acceleration,
        )
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn position(&self) -> &VectorField {
        &self.position
    }

    pub fn velocity(&self) -> &VectorField {
        &self.velocity
    }

    pub fn acceleration(&self) -> [f64; DIM] {
        self.acceleration
    }

    pub fn radius(&self) -> &Array1<f64> {
        &self.radius
    }

    pub fn mass(&self) -> &Array1<f64> {
        &self.mass
    }

    /// Contact threshold matrix, `radius_sum[[i, j]] = radius[i] + radius[j]`.
    pub fn radius_sum(&self) -> &Array2<f64> {
        &self.radius_sum
    }

    /// Total kinetic energy: sum of 1/2 m |v|^2.
    pub fn kinetic_energy(&self) -> f64 {
        let v = &self.velocity;
        self.mass
            .iter()
            .zip(v.x.iter().zip(v.y.iter()))
            .map(|(&m, (&vx, &vy))| 0.5 * m * (vx * vx + vy * vy))
            .sum()
    }

    /// Total linear momentum: sum of m v.
    pub fn momentum(&self) -> [f64; DIM] {
        let v = &self.velocity;
        [self.mass.dot(&v.x), self.mass.dot(&v.y)]
    }
}

fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::LengthMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}
