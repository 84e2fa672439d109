use approx::assert_relative_eq;
use particlebox::core::{resolve_collisions, ImpulsePolicy, Pair, ParticleSystem};
use particlebox::error::Result;
use particlebox::{InitialState, SimParams, Simulation};

fn normal_relative_velocity(sys: &ParticleSystem, i: usize, j: usize) -> f64 {
    let (pi, pj) = (sys.position().get(i), sys.position().get(j));
    let (vi, vj) = (sys.velocity().get(i), sys.velocity().get(j));
    (vi[0] - vj[0]) * (pi[0] - pj[0]) + (vi[1] - vj[1]) * (pi[1] - pj[1])
}

/// No field, elastic contacts, no wall contact: kinetic energy stays constant
/// through several separate collisions.
#[test]
fn energy_conserved_without_acceleration() -> Result<()> {
    let init = InitialState {
        positions: vec![
            [-3.0, 0.0],
            [3.0, 0.0],
            [-3.0, 20.0],
            [3.0, 20.5],
            [0.0, -20.0],
        ],
        velocities: vec![
            [1.0, 0.0],
            [-1.0, 0.0],
            [2.0, 0.1],
            [-0.5, -0.2],
            [0.3, 0.3],
        ],
        radii: vec![1.0, 1.0, 0.8, 1.4, 0.5],
        masses: vec![1.0, 3.0, 0.5, 2.0, 1.0],
    };
    let params = SimParams {
        dt: 0.01,
        ..SimParams::for_box(1000.0, 1000.0)
    };
    let mut sim = Simulation::new(init, params)?;
    let e0 = sim.kinetic_energy();

    let mut collisions = 0usize;
    for frame in 0..600 {
        let snap = sim.step(frame);
        assert_eq!(snap.report.wall_contacts, 0);
        collisions += snap.report.pair_collisions;
    }
    assert!(
        collisions >= 2,
        "expected both pairs to collide, saw {collisions}"
    );

    let e1 = sim.kinetic_energy();
    let rel = ((e1 - e0) / e0).abs();
    assert!(
        rel < 1e-9,
        "relative energy drift {} too large (E0={}, E1={})",
        rel,
        e0,
        e1
    );
    Ok(())
}

/// An isolated collision leaves total momentum unchanged, elastic or not.
#[test]
fn momentum_conserved_through_collisions() -> Result<()> {
    for restitution_pc in [1.0, 0.6, 0.0] {
        let init = InitialState {
            positions: vec![[-2.0, 0.3], [2.0, -0.3]],
            velocities: vec![[1.5, 0.0], [-0.5, 0.2]],
            radii: vec![1.0, 0.7],
            masses: vec![2.5, 1.0],
        };
        let params = SimParams {
            dt: 0.05,
            restitution_pc,
            ..SimParams::for_box(500.0, 500.0)
        };
        let mut sim = Simulation::new(init, params)?;
        let p0 = sim.momentum();
        let mut hits = 0;
        for frame in 0..100 {
            hits += sim.step(frame).report.pair_collisions;
        }
        assert!(hits > 0, "pair never collided (e = {restitution_pc})");
        let p1 = sim.momentum();
        assert_relative_eq!(p0[0], p1[0], epsilon = 1e-12);
        assert_relative_eq!(p0[1], p1[1], epsilon = 1e-12);
    }
    Ok(())
}

/// With e = 1 a closing pair leaves the resolver separating at the same
/// normal speed.
#[test]
fn closing_pair_separates_after_resolution() -> Result<()> {
    let init = InitialState {
        positions: vec![[0.0, 0.0], [1.0, 0.6]],
        velocities: vec![[0.7, 0.4], [-0.9, 0.1]],
        radii: vec![0.6, 0.6],
        masses: vec![1.0, 4.0],
    };
    let mut sys = ParticleSystem::from_initial(&init, [0.0, 0.0])?;
    let before = normal_relative_velocity(&sys, 0, 1);
    assert!(before < 0.0);

    let policy = ImpulsePolicy::Unconditional;
    let report = resolve_collisions(&mut sys, &[Pair::new(0, 1)], 1.0, policy)?;
    assert_eq!(report.applied, 1);
    let after = normal_relative_velocity(&sys, 0, 1);
    assert!(after > 0.0, "pair still closing: {after}");
    assert_relative_eq!(after, -before, epsilon = 1e-12);
    Ok(())
}

/// Skipping separating pairs keeps an overlapping pair from being pulled back.
#[test]
fn skip_separating_policy_lets_overlap_drift_apart() -> Result<()> {
    let init = InitialState {
        positions: vec![[-0.5, 0.0], [0.5, 0.0]],
        velocities: vec![[-1.0, 0.0], [1.0, 0.0]],
        radii: vec![1.0, 1.0],
        masses: vec![1.0, 1.0],
    };
    let params = SimParams {
        dt: 0.1,
        impulse_policy: ImpulsePolicy::SkipSeparating,
        ..SimParams::for_box(100.0, 100.0)
    };
    let mut sim = Simulation::new(init, params)?;
    let snap = sim.step(0);
    assert_eq!(snap.report.pair_collisions, 0);
    assert_eq!(snap.report.separating_pairs_skipped, 1);
    assert_eq!(snap.velocity.get(0), [-1.0, 0.0]);
    assert_eq!(snap.velocity.get(1), [1.0, 0.0]);
    Ok(())
}
