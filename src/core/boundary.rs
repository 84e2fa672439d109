use crate::core::field::VectorField;
use crate::core::particle::ParticleSystem;
use crate::error::{Error, Result};
use ndarray::Array1;

/// Axis-aligned box centered on the origin: x in [-width/2, width/2],
/// y in [-height/2, height/2].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    pub width: f64,
    pub height: f64,
}

impl BoxBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a disk of `radius` centered at `p` lies inside the box (with `slack`).
    pub fn contains(&self, p: [f64; 2], radius: f64, slack: f64) -> bool {
        p[0].abs() + radius <= 0.5 * self.width + slack
            && p[1].abs() + radius <= 0.5 * self.height + slack
    }
}

/// Finalize `tentative` as the system's positions after resolving wall contacts.
///
/// Per axis, a particle touching past the upper wall (`x + r > half`) or the
/// lower wall (`x - r < -half`) gets its velocity component replaced by
/// `-restitution_bc * v` and its coordinate snapped to the contact plane.
/// Both walls are tested against the unclamped coordinate, so a particle wider
/// than the box is reflected twice and left on the lower contact plane.
///
/// Returns the number of (particle, wall) contacts resolved.
///
/// Errors with `Error::LengthMismatch` if `tentative` does not hold exactly
/// one position per particle; the system is left untouched.
pub fn resolve_boundary(
    system: &mut ParticleSystem,
    tentative: VectorField,
    bounds: BoxBounds,
    restitution_bc: f64,
) -> Result<usize> {
    if tentative.len() != system.len() {
        return Err(Error::LengthMismatch {
            what: "tentative positions",
            expected: system.len(),
            found: tentative.len(),
        });
    }
    Ok(apply_boundary(system, tentative, bounds, restitution_bc))
}

/// [`resolve_boundary`] for a `tentative` field already known to match N.
pub(crate) fn apply_boundary(
    system: &mut ParticleSystem,
    mut tentative: VectorField,
    bounds: BoxBounds,
    restitution_bc: f64,
) -> usize {
    let radius = &system.radius;
    let contacts = resolve_axis(
        &mut tentative.x,
        &mut system.velocity.x,
        radius,
        0.5 * bounds.width,
        restitution_bc,
    ) + resolve_axis(
        &mut tentative.y,
        &mut system.velocity.y,
        radius,
        0.5 * bounds.height,
        restitution_bc,
    );
    system.position = tentative;
    contacts
}

fn resolve_axis(
    pos: &mut Array1<f64>,
    vel: &mut Array1<f64>,
    radius: &Array1<f64>,
    half: f64,
    restitution: f64,
) -> usize {
    let mut contacts = 0usize;
    for ((p, v), &r) in pos.iter_mut().zip(vel.iter_mut()).zip(radius.iter()) {
        let upper = *p + r > half;
        let lower = *p - r < -half;
        // Not f64::clamp: it panics when the radius exceeds the half extent.
        if upper {
            *v = -restitution * *v;
            *p = half - r;
            contacts += 1;
        }
        if lower {
            *v = -restitution * *v;
            *p = -half + r;
            contacts += 1;
        }
    }
    contacts
}
