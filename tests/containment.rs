//! Property-based tests for the boundary pass.
//!
//! For arbitrary populations, fields and restitution coefficients, every
//! particle must sit inside the box (accounting for its radius) after every
//! step, including the first step out of an initial state far outside it.

use particlebox::core::{resolve_boundary, translate, BoxBounds, ParticleSystem};
use particlebox::{InitialState, SimParams, Simulation};
use proptest::prelude::*;

const SLACK: f64 = 1e-9;

fn arb_particle(extent: f64) -> impl Strategy<Value = ([f64; 2], [f64; 2], f64, f64)> {
    (
        (-2.0 * extent..2.0 * extent, -2.0 * extent..2.0 * extent),
        (-50.0..50.0_f64, -50.0..50.0_f64),
        0.0..1.0_f64,
        0.1..10.0_f64,
    )
        .prop_map(|((x, y), (vx, vy), r, m)| ([x, y], [vx, vy], r, m))
}

fn initial(parts: Vec<([f64; 2], [f64; 2], f64, f64)>) -> InitialState {
    InitialState {
        positions: parts.iter().map(|p| p.0).collect(),
        velocities: parts.iter().map(|p| p.1).collect(),
        radii: parts.iter().map(|p| p.2).collect(),
        masses: parts.iter().map(|p| p.3).collect(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn single_boundary_pass_contains_any_overshoot(
        parts in prop::collection::vec(arb_particle(10.0), 1..12),
        dt in 0.01..100.0_f64,
        restitution in 0.0..=1.0_f64,
    ) {
        let bounds = BoxBounds::new(20.0, 12.0);
        let init = initial(parts);
        let mut sys = ParticleSystem::from_initial(&init, [0.0, 0.0])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let tentative = translate(&sys, dt);
        resolve_boundary(&mut sys, tentative, bounds, restitution)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        for i in 0..sys.len() {
            let p = sys.position().get(i);
            prop_assert!(p[0].abs() <= 10.0 + SLACK, "x = {}", p[0]);
            prop_assert!(p[1].abs() <= 6.0 + SLACK, "y = {}", p[1]);
            prop_assert!(bounds.contains(p, sys.radius()[i], SLACK));
        }
    }

    #[test]
    fn stepping_keeps_particles_inside(
        parts in prop::collection::vec(arb_particle(8.0), 1..10),
        gy in -20.0..0.0_f64,
        restitution_bc in 0.0..=1.0_f64,
        restitution_pc in 0.0..=1.0_f64,
    ) {
        let params = SimParams {
            acceleration: [0.0, gy],
            restitution_bc,
            restitution_pc,
            dt: 0.05,
            acceleration_dt: 0.05,
            ..SimParams::for_box(16.0, 10.0)
        };
        let bounds = params.bounds();
        let mut sim = Simulation::new(initial(parts), params)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        for frame in 0..40 {
            let snap = sim.step(frame);
            prop_assert!(snap.velocity.is_finite(), "velocity blew up at frame {}", frame);
            for i in 0..snap.position.len() {
                prop_assert!(
                    bounds.contains(snap.position.get(i), snap.radius[i], SLACK),
                    "particle {} outside at frame {}: {:?}",
                    i,
                    frame,
                    snap.position.get(i)
                );
            }
        }
    }
}
