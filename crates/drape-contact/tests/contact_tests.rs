//! Integration tests for drape-contact.

use drape_compute::{ParallelBackend, SequentialBackend};
use drape_contact::body::BodyCollider;
use drape_contact::collision_pipeline::CollisionPipeline;
use drape_contact::ground_plane::GroundPlane;
use drape_contact::params::CollisionParams;
use drape_contact::response::{respond, ContactResult};
use drape_math::Vec3;
use drape_mesh::generators::cuboid;
use drape_mesh::TriangleMesh;
use drape_sdf::build_sdf;
use drape_solver::ParticleState;

fn state_with(points: &[Vec3], pinned: Vec<bool>) -> ParticleState {
    let flat: Vec<f32> = points.iter().flat_map(|p| p.to_array()).collect();
    ParticleState::new(&flat, pinned).unwrap()
}

fn body_box() -> TriangleMesh {
    cuboid(
        Vec3::new(-0.537, -0.411, -0.463),
        Vec3::new(0.529, 0.617, 0.487),
    )
}

// ─── Response Tests ───────────────────────────────────────────

#[test]
fn respond_pushes_along_normal() {
    let (pos, _) = respond(Vec3::ZERO, Vec3::ZERO, Vec3::Y, 0.25, 0.0, 0.0);
    assert_eq!(pos, Vec3::new(0.0, 0.25, 0.0));
}

#[test]
fn respond_applies_friction_to_tangential_velocity() {
    // Velocity (0.2, 0, 0) along the surface.
    let (pos, prev) = respond(Vec3::ZERO, Vec3::new(-0.2, 0.0, 0.0), Vec3::Y, 0.1, 0.25, 0.0);
    let v = pos - prev;
    assert!((v - Vec3::new(0.15, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn respond_reflects_approaching_velocity_with_restitution() {
    // Moving down into the surface at 0.4 per tick.
    let (pos, prev) = respond(Vec3::ZERO, Vec3::new(0.0, 0.4, 0.0), Vec3::Y, 0.1, 0.0, 0.5);
    let v = pos - prev;
    assert!((v - Vec3::new(0.0, 0.2, 0.0)).length() < 1e-6);
}

#[test]
fn respond_zero_restitution_stops_approach() {
    let (pos, prev) = respond(Vec3::ZERO, Vec3::new(0.1, 0.4, 0.0), Vec3::Y, 0.1, 0.0, 0.0);
    let v = pos - prev;
    assert!(v.y.abs() < 1e-6);
    assert!((v.x + 0.1).abs() < 1e-6);
}

#[test]
fn respond_keeps_separating_velocity() {
    let (pos, prev) = respond(Vec3::ZERO, Vec3::new(0.0, -0.3, 0.0), Vec3::Y, 0.1, 0.0, 0.0);
    let v = pos - prev;
    assert!((v - Vec3::new(0.0, 0.3, 0.0)).length() < 1e-6);
}

#[test]
fn contact_result_merge() {
    let a = ContactResult {
        resolved_count: 2,
        max_penetration: 0.1,
    };
    let b = ContactResult {
        resolved_count: 3,
        max_penetration: 0.05,
    };
    let m = a.merge(b);
    assert_eq!(m.resolved_count, 5);
    assert_eq!(m.max_penetration, 0.1);
}

#[test]
fn collision_params_clamp() {
    let p = CollisionParams::new(2.0, -1.0, -0.1);
    assert_eq!(p, CollisionParams::new(1.0, 0.0, 0.0));
    let json = serde_json::to_string(&CollisionParams::default()).unwrap();
    let back: CollisionParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, CollisionParams::default());
}

// ─── Ground Plane Tests ───────────────────────────────────────

#[test]
fn ground_clamps_exactly_to_plane() {
    let state = state_with(&[Vec3::new(0.3, -0.123, 0.7), Vec3::new(0.0, 0.5, 0.0)], vec![false; 2]);
    state.previous().store_vec3(0, Vec3::new(0.2, -0.02, 0.7));

    let result = GroundPlane::new(0.0).resolve(&state, &SequentialBackend);
    assert_eq!(result.resolved_count, 1);
    assert!((result.max_penetration - 0.123).abs() < 1e-6);

    let p = state.position(0);
    assert_eq!(p.y, 0.0);
    assert_eq!(p.x, 0.3);
    // Downward velocity removed, tangential kept.
    let v = state.displacement(0);
    assert!(v.y.abs() < 1e-6);
    assert!((v.x - 0.1).abs() < 1e-6);
    // Particle above the plane untouched.
    assert_eq!(state.position(1), Vec3::new(0.0, 0.5, 0.0));
}

#[test]
fn ground_is_idempotent() {
    let points: Vec<Vec3> = (0..100)
        .map(|i| Vec3::new(i as f32 * 0.01, (i as f32 * 0.37).sin() * 0.2, 0.0))
        .collect();
    let state = state_with(&points, vec![false; 100]);
    let ground = GroundPlane::new(0.0);

    ground.resolve(&state, &ParallelBackend);
    let once = state.view().to_vec();
    let prev_once = state.previous().to_vec();

    let second = ground.resolve(&state, &ParallelBackend);
    assert_eq!(second.resolved_count, 0);
    assert_eq!(state.view().to_vec(), once);
    assert_eq!(state.previous().to_vec(), prev_once);
    assert!(state.view().iter().all(|p| p.y >= 0.0));
}

#[test]
fn ground_skips_pinned() {
    let state = state_with(&[Vec3::new(0.0, -1.0, 0.0)], vec![true]);
    let result = GroundPlane::new(0.0).resolve(&state, &SequentialBackend);
    assert_eq!(result.resolved_count, 0);
    assert_eq!(state.position(0).y, -1.0);
}

#[test]
fn ground_at_custom_height() {
    let state = state_with(&[Vec3::new(0.0, 0.4, 0.0)], vec![false]);
    GroundPlane::new(0.5).resolve(&state, &SequentialBackend);
    assert_eq!(state.position(0).y, 0.5);
}

// ─── Body Collider Tests ──────────────────────────────────────

#[test]
fn body_without_sdf_is_noop() {
    let state = state_with(&[Vec3::ZERO], vec![false]);
    let mut body = BodyCollider::new(CollisionParams::default());
    assert!(!body.is_active());

    let result = body.resolve(&state, &SequentialBackend);
    assert_eq!(result, ContactResult::default());
    // Second call stays quiet and still does nothing.
    body.resolve(&state, &SequentialBackend);
    assert_eq!(state.position(0), Vec3::ZERO);
}

#[test]
fn body_pushes_particle_out_through_nearest_face() {
    let sdf = build_sdf(&body_box(), 32).unwrap();
    let mut body = BodyCollider::with_sdf(sdf, CollisionParams::new(0.0, 0.0, 0.005));

    let start = Vec3::new(0.013, 0.58, 0.021);
    let state = state_with(&[start], vec![false]);
    let result = body.resolve(&state, &SequentialBackend);

    assert_eq!(result.resolved_count, 1);
    assert!(result.max_penetration > 0.005);
    let p = state.position(0);
    assert!(p.y > start.y, "particle should move up, got {p:?}");
    assert!((p.x - start.x).abs() < 0.01);
    assert!((p.z - start.z).abs() < 0.01);
}

#[test]
fn body_ignores_far_and_outside_particles() {
    let sdf = build_sdf(&body_box(), 16).unwrap();
    let mut body = BodyCollider::with_sdf(sdf, CollisionParams::default());

    let outside_grid = Vec3::new(5.0, 5.0, 5.0);
    let inside_grid_far = Vec3::new(0.0, 0.0, 0.0) + Vec3::new(0.0, 0.66, 0.0);
    let state = state_with(&[outside_grid, inside_grid_far], vec![false; 2]);
    let before = state.view().to_vec();

    let grid = body.sdf().unwrap();
    assert!(grid.sample(outside_grid).is_none());
    let d = grid.sample(inside_grid_far).unwrap();
    assert!(d > CollisionParams::default().thickness);

    let result = body.resolve(&state, &SequentialBackend);
    assert_eq!(result.resolved_count, 0);
    assert_eq!(state.view().to_vec(), before);
}

#[test]
fn body_skips_pinned() {
    let sdf = build_sdf(&body_box(), 16).unwrap();
    let mut body = BodyCollider::with_sdf(sdf, CollisionParams::default());
    let start = Vec3::new(0.013, 0.58, 0.021);
    let state = state_with(&[start], vec![true]);
    assert_eq!(body.resolve(&state, &SequentialBackend).resolved_count, 0);
    assert_eq!(state.position(0), start);
}

#[test]
fn body_rebuild_and_release() {
    let mut body = BodyCollider::new(CollisionParams::default());
    let resolution = body.rebuild(&body_box(), 8).unwrap().resolution();
    assert_eq!(resolution, 8);
    assert!(body.is_active());

    // A failed rebuild keeps the current grid.
    assert!(body.rebuild(&TriangleMesh::default(), 8).is_err());
    assert_eq!(body.sdf().map(|g| g.resolution()), Some(8));

    let released = body.release();
    assert!(released.is_some());
    assert!(!body.is_active());
}

#[test]
fn body_set_sdf_returns_previous_grid() {
    let mut body = BodyCollider::new(CollisionParams::default());
    assert!(body.set_sdf(build_sdf(&body_box(), 4).unwrap()).is_none());
    let old = body.set_sdf(build_sdf(&body_box(), 6).unwrap());
    assert_eq!(old.map(|g| g.resolution()), Some(4));
    assert_eq!(body.sdf().map(|g| g.resolution()), Some(6));
}

#[test]
fn body_update_params_keeps_grid() {
    let mut body = BodyCollider::with_sdf(build_sdf(&body_box(), 4).unwrap(), CollisionParams::default());
    body.update_params(0.8, 0.2, 0.01);
    assert_eq!(body.params(), CollisionParams::new(0.8, 0.2, 0.01));
    assert!(body.is_active());
}

// ─── Pipeline Tests ───────────────────────────────────────────

#[test]
fn pipeline_runs_ground_and_reports_inactive_body() {
    let state = state_with(&[Vec3::new(0.0, -0.2, 0.0)], vec![false]);
    let mut pipeline = CollisionPipeline::default();
    let result = pipeline.step(&state, &SequentialBackend);
    assert_eq!(result.ground.resolved_count, 1);
    assert!(!result.body_active);
    assert_eq!(result.total().resolved_count, 1);
}

#[test]
fn pipeline_with_body() {
    let state = state_with(&[Vec3::new(0.013, 0.58, 0.021)], vec![false]);
    let body = BodyCollider::with_sdf(build_sdf(&body_box(), 32).unwrap(), CollisionParams::default());
    let mut pipeline = CollisionPipeline::new(GroundPlane::new(-10.0), body);
    let result = pipeline.step(&state, &ParallelBackend);
    assert!(result.body_active);
    assert_eq!(result.ground.resolved_count, 0);
    assert_eq!(result.body.resolved_count, 1);
}
