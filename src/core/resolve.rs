use crate::core::detect::Pair;
use crate::core::field::{dot, sub, VectorField, DIM};
use crate::core::particle::ParticleSystem;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Whether pairs that already move apart still receive an impulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulsePolicy {
    /// Apply the impulse to every overlapping pair, whatever its relative motion.
    /// An overlapping pair that is separating can gain energy this way.
    #[default]
    Unconditional,
    /// Skip overlapping pairs whose normal relative velocity is not closing.
    SkipSeparating,
}

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Pairs that received an impulse.
    pub applied: usize,
    /// Pairs skipped because their centers coincide.
    pub degenerate: usize,
    /// Pairs skipped by [`ImpulsePolicy::SkipSeparating`].
    pub separating_skipped: usize,
}

/// Velocity changes for one pair, to be subtracted from `v[i]` and `v[j]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PairImpulse {
    dv_i: [f64; DIM],
    dv_j: [f64; DIM],
    /// `dot(v_i - v_j, p_i - p_j)`; negative while the pair is closing.
    approach: f64,
}

/// Velocity change of both particles of `pair` along their line of centers.
///
/// With `rv = v_i - v_j`, `rp = p_i - p_j` and `M = m_i + m_j`:
///
/// ```text
/// dv_i = (1 + e) m_j / M * dot(rv, rp) / |rp|^2 * rp
/// dv_j = (1 + e) m_i / M * dot(rv, rp) / |rp|^2 * (-rp)
/// ```
///
/// Errors with `Error::DegenerateGeometry` when `|rp|^2` is zero or subnormal.
fn pair_impulse(
    position: &VectorField,
    velocity: &VectorField,
    mass: (f64, f64),
    pair: Pair,
    restitution: f64,
) -> Result<PairImpulse> {
    let Pair { i, j } = pair;
    let rp = sub(position.get(i), position.get(j));
    let rv = sub(velocity.get(i), velocity.get(j));
    let dist_sq = dot(rp, rp);
    if !dist_sq.is_normal() {
        return Err(Error::DegenerateGeometry { i, j });
    }

    let approach = dot(rv, rp);
    let (mi, mj) = mass;
    let scale = (1.0 + restitution) * approach / (dist_sq * (mi + mj));
    let (fi, fj) = (scale * mj, scale * mi);
    Ok(PairImpulse {
        dv_i: [fi * rp[0], fi * rp[1]],
        dv_j: [-fj * rp[0], -fj * rp[1]],
        approach,
    })
}

/// Apply pairwise collision impulses to the system's velocities.
///
/// Every impulse is computed from the velocities as they are on entry, then
/// all of them are subtracted in the order given. A particle touching several
/// others therefore accumulates one independent change per pair.
///
/// Pairs with coincident centers are logged and skipped. The only error is
/// `Error::PairOutOfRange`, checked for every pair before any velocity changes.
pub fn resolve_collisions(
    system: &mut ParticleSystem,
    pairs: &[Pair],
    restitution_pc: f64,
    policy: ImpulsePolicy,
) -> Result<ResolveReport> {
    let len = system.len();
    if let Some(&Pair { i, j }) = pairs.iter().find(|p| p.i >= len || p.j >= len) {
        return Err(Error::PairOutOfRange { i, j, len });
    }
    Ok(apply_impulses(system, pairs, restitution_pc, policy))
}

/// [`resolve_collisions`] for pairs already known to index into the system.
pub(crate) fn apply_impulses(
    system: &mut ParticleSystem,
    pairs: &[Pair],
    restitution_pc: f64,
    policy: ImpulsePolicy,
) -> ResolveReport {
    let mut report = ResolveReport::default();
    let mut impulses = Vec::with_capacity(pairs.len());
    for &pair in pairs {
        let mass = (system.mass()[pair.i], system.mass()[pair.j]);
        match pair_impulse(
            &system.position,
            &system.velocity,
            mass,
            pair,
            restitution_pc,
        ) {
            Ok(imp) => {
                if policy == ImpulsePolicy::SkipSeparating && imp.approach >= 0.0 {
                    report.separating_skipped += 1;
                    continue;
                }
                impulses.push((pair, imp));
            }
            Err(e) => {
                log::warn!("skipping collision: {e}");
                report.degenerate += 1;
            }
        }
    }

    let v = &mut system.velocity;
    for (Pair { i, j }, imp) in impulses {
        log::trace!("impulse {i}<->{j}: dv_i={:?} dv_j={:?}", imp.dv_i, imp.dv_j);
        v.x[i] -= imp.dv_i[0];
        v.y[i] -= imp.dv_i[1];
        v.x[j] -= imp.dv_j[0];
        v.y[j] -= imp.dv_j[1];
        report.applied += 1;
    }
    report
}
