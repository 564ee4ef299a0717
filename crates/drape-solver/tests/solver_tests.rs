//! Integration tests for drape-solver.

use drape_compute::{ParallelBackend, SequentialBackend};
use drape_math::Vec3;
use drape_mesh::{build_grid_cloth, ClothConstraints, Constraint, ConstraintKind};
use drape_solver::config::SimulationParams;
use drape_solver::relax::{max_strain, project_distance, relax, relax_pass};
use drape_solver::state::ParticleState;

fn two_particles(a: Vec3, b: Vec3, pinned: [bool; 2]) -> ParticleState {
    ParticleState::new(&[a.x, a.y, a.z, b.x, b.y, b.z], pinned.to_vec()).unwrap()
}

// ─── SimulationParams Tests ───────────────────────────────────

#[test]
fn params_defaults() {
    let params = SimulationParams::default();
    assert_eq!(params.gravity, [0.0, -9.81, 0.0]);
    assert_eq!(params.iterations, 5);
    assert!((params.dt - 1.0 / 60.0).abs() < 1e-9);
}

#[test]
fn params_clamp_iterations() {
    let low = SimulationParams {
        iterations: 0,
        ..Default::default()
    };
    let high = SimulationParams {
        iterations: 50,
        ..Default::default()
    };
    assert_eq!(low.clamped_iterations(), 2);
    assert_eq!(high.clamped_iterations(), 10);
    assert_eq!(SimulationParams::preview().clamped_iterations(), 2);
    assert_eq!(SimulationParams::high_quality().clamped_iterations(), 10);
}

#[test]
fn params_stiffness_per_kind() {
    let params = SimulationParams {
        structural_stiffness: 1.5,
        shear_stiffness: 0.5,
        bend_stiffness: -1.0,
        ..Default::default()
    };
    assert_eq!(params.stiffness(ConstraintKind::Structural), 1.0);
    assert_eq!(params.stiffness(ConstraintKind::Shear), 0.5);
    assert_eq!(params.stiffness(ConstraintKind::Bend), 0.0);
}

#[test]
fn params_partial_json_uses_defaults() {
    let params: SimulationParams = serde_json::from_str(r#"{"iterations": 8}"#).unwrap();
    assert_eq!(params.iterations, 8);
    assert_eq!(params.damping, SimulationParams::default().damping);
}

#[test]
fn params_serialization_roundtrip() {
    let params = SimulationParams::high_quality();
    let json = serde_json::to_string(&params).unwrap();
    let back: SimulationParams = serde_json::from_str(&json).unwrap();
    assert_eq!(params, back);
}

#[test]
fn params_toml_roundtrip() {
    let params = SimulationParams::high_quality();
    let text = toml::to_string(&params).unwrap();
    let back: SimulationParams = toml::from_str(&text).unwrap();
    assert_eq!(back, params);
}

// ─── ParticleState Tests ──────────────────────────────────────

#[test]
fn state_rejects_mismatched_pins() {
    assert!(ParticleState::new(&[0.0; 9], vec![false; 2]).is_err());
    assert!(ParticleState::new(&[0.0; 8], vec![false; 3]).is_err());
}

#[test]
fn state_starts_at_rest() {
    let state = two_particles(Vec3::ZERO, Vec3::X, [false, false]);
    assert_eq!(state.vertex_count(), 2);
    assert_eq!(state.active_slot(), 0);
    assert_eq!(state.displacement(1), Vec3::ZERO);
}

#[test]
fn integrate_free_fall_from_rest() {
    let mut state = two_particles(Vec3::ZERO, Vec3::X, [false, false]);
    let params = SimulationParams::default();
    state.integrate(&SequentialBackend, &params);

    let dt2g = params.dt * params.dt * -9.81;
    assert!((state.position(0).y - dt2g).abs() < 1e-7);
    assert_eq!(state.previous().load_vec3(0), Vec3::ZERO);
    assert_eq!(state.active_slot(), 1);
}

#[test]
fn integrate_carries_damped_velocity() {
    let mut state = two_particles(Vec3::ZERO, Vec3::X, [false, false]);
    let params = SimulationParams {
        gravity: [0.0; 3],
        damping: 0.5,
        ..Default::default()
    };
    // Give particle 0 a velocity of +0.1 X per tick.
    state.previous().store_vec3(0, Vec3::new(-0.1, 0.0, 0.0));

    state.integrate(&SequentialBackend, &params);
    assert!((state.position(0) - Vec3::new(0.05, 0.0, 0.0)).length() < 1e-7);
    assert_eq!(state.previous().load_vec3(0), Vec3::ZERO);
}

#[test]
fn integrate_leaves_pinned_in_place() {
    let mut state = two_particles(Vec3::new(0.0, 2.0, 0.0), Vec3::X, [true, false]);
    let params = SimulationParams::default();
    for _ in 0..10 {
        state.integrate(&ParallelBackend, &params);
    }
    assert_eq!(state.position(0), Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(state.displacement(0), Vec3::ZERO);
    assert!(state.position(1).y < 0.0);
}

#[test]
fn integrate_records_start_positions_as_previous() {
    let mut state = two_particles(Vec3::ZERO, Vec3::X, [false, false]);
    let before = state.view().to_vec();
    state.integrate(&SequentialBackend, &SimulationParams::default());
    assert_eq!(state.previous().to_vec(), before);
    assert_ne!(state.view().to_vec(), before);
}

#[test]
fn reset_restores_rest_state() {
    let mut state = two_particles(Vec3::ZERO, Vec3::X, [false, false]);
    let initial = state.view().to_vec();
    for _ in 0..3 {
        state.integrate(&SequentialBackend, &SimulationParams::default());
    }
    state.reset(&initial).unwrap();
    assert_eq!(state.active_slot(), 0);
    assert_eq!(state.view().to_vec(), initial);
    assert_eq!(state.previous().to_vec(), initial);

    // A second reset is a no-op.
    state.reset(&initial).unwrap();
    assert_eq!(state.view().to_vec(), initial);
}

#[test]
fn reset_rejects_wrong_length() {
    let mut state = two_particles(Vec3::ZERO, Vec3::X, [false, false]);
    assert!(state.reset(&[0.0; 3]).is_err());
}

#[test]
fn view_reports_positions() {
    let state = two_particles(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, -5.0, 6.0), [false; 2]);
    let view = state.view();
    assert_eq!(view.len(), 2);
    assert_eq!(view.get(1), Vec3::new(4.0, -5.0, 6.0));
    assert_eq!(view.min_y(), Some(-5.0));
    assert_eq!(view.iter().count(), 2);
}

#[test]
fn kinetic_energy_ignores_pinned() {
    let state = two_particles(Vec3::ZERO, Vec3::X, [true, false]);
    state.previous().store_vec3(0, Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(state.kinetic_energy(1.0, 1.0), 0.0);
    state.previous().store_vec3(1, Vec3::new(1.0, -1.0, 0.0));
    assert!((state.kinetic_energy(1.0, 1.0) - 0.5).abs() < 1e-9);
}

// ─── Projection Tests ─────────────────────────────────────────

#[test]
fn projection_splits_evenly_between_free_endpoints() {
    let (di, dj) = project_distance(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0, 1.0, false, false);
    assert_eq!(di, Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(dj, Vec3::new(-0.5, 0.0, 0.0));
}

#[test]
fn projection_moves_only_free_endpoint() {
    let (di, dj) = project_distance(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0, 1.0, true, false);
    assert_eq!(di, Vec3::ZERO);
    assert_eq!(dj, Vec3::new(-1.0, 0.0, 0.0));

    let (di, dj) = project_distance(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0, 1.0, false, true);
    assert_eq!(di, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(dj, Vec3::ZERO);
}

#[test]
fn projection_ignores_fully_pinned() {
    let (di, dj) = project_distance(Vec3::ZERO, Vec3::X * 3.0, 1.0, 1.0, true, true);
    assert_eq!(di, Vec3::ZERO);
    assert_eq!(dj, Vec3::ZERO);
}

#[test]
fn projection_scales_with_stiffness() {
    let (di, _) = project_distance(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0, 0.5, false, false);
    assert_eq!(di, Vec3::new(0.25, 0.0, 0.0));
}

#[test]
fn projection_coincident_endpoints_is_zero() {
    let p = Vec3::new(0.3, 0.3, 0.3);
    let (di, dj) = project_distance(p, p, 1.0, 1.0, false, false);
    assert_eq!(di, Vec3::ZERO);
    assert_eq!(dj, Vec3::ZERO);
}

#[test]
fn projection_pushes_compressed_apart() {
    let (di, dj) = project_distance(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 1.0, 1.0, false, false);
    assert!(di.x < 0.0);
    assert!(dj.x > 0.0);
}

// ─── Relaxation Tests ─────────────────────────────────────────

#[test]
fn relax_pass_restores_single_constraint() {
    let state = two_particles(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), [false, false]);
    let constraints = [Constraint::new(0u32, 1u32, 1.0)];
    relax_pass(&state, &constraints, 1.0, &SequentialBackend);
    assert!((state.position(0).distance(state.position(1)) - 1.0).abs() < 1e-6);
    assert!((state.position(0).x - 0.5).abs() < 1e-6);
}

#[test]
fn relax_leaves_relaxed_grid_unchanged() {
    let cloth = build_grid_cloth(4, 4, 0.1);
    let state = ParticleState::new(&cloth.mesh.positions, vec![false; 16]).unwrap();
    let before = state.view().to_vec();

    let stats = relax(&state, &cloth.constraints, &SimulationParams::zero_gravity(), &ParallelBackend);
    assert_eq!(stats.len(), 3);
    for (a, b) in before.iter().zip(state.view().to_vec()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn relax_reduces_strain_of_stretched_grid() {
    let cloth = build_grid_cloth(6, 6, 0.1);
    let stretched: Vec<f32> = cloth.mesh.positions.iter().map(|v| v * 1.2).collect();
    let state = ParticleState::new(&stretched, vec![false; 36]).unwrap();

    let before = max_strain(&state, &cloth.constraints.structural);
    relax(&state, &cloth.constraints, &SimulationParams::high_quality(), &SequentialBackend);
    let after = max_strain(&state, &cloth.constraints.structural);
    assert!(after < before, "strain {before} -> {after}");
}

#[test]
fn relax_never_moves_pinned() {
    let cloth = build_grid_cloth(5, 5, 0.1);
    let mut pinned = vec![false; 25];
    pinned[..5].iter_mut().for_each(|p| *p = true);
    let stretched: Vec<f32> = cloth.mesh.positions.iter().map(|v| v * 1.3).collect();
    let state = ParticleState::new(&stretched, pinned).unwrap();

    relax(&state, &cloth.constraints, &SimulationParams::default(), &ParallelBackend);
    for i in 0..5 {
        let expected = Vec3::new(stretched[i * 3], stretched[i * 3 + 1], stretched[i * 3 + 2]);
        assert_eq!(state.position(i), expected);
    }
}

#[test]
fn relax_reports_each_kind() {
    let cloth = build_grid_cloth(3, 3, 0.1);
    let state = ParticleState::new(&cloth.mesh.positions, vec![false; 9]).unwrap();
    let stats = relax(&state, &cloth.constraints, &SimulationParams::default(), &SequentialBackend);
    let kinds: Vec<_> = stats.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, ConstraintKind::ALL.to_vec());
    assert_eq!(stats[0].constraints, cloth.constraints.structural.len());
    assert!(stats.iter().all(|s| s.passes == 5));
}

#[test]
fn relax_empty_constraints_is_noop() {
    let state = two_particles(Vec3::ZERO, Vec3::X, [false, false]);
    relax(&state, &ClothConstraints::default(), &SimulationParams::default(), &SequentialBackend);
    assert_eq!(state.position(1), Vec3::X);
}
