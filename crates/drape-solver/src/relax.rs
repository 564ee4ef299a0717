//! Distance-constraint relaxation.
//!
//! Each pass projects every constraint of one kind in parallel. Two
//! constraints sharing a particle may read and write it concurrently;
//! whichever store lands last wins. This is the approximate Gauss-Seidel
//! scheme of position-based dynamics, made sound by the atomic cells of
//! [`ComputeBuffer`](drape_compute::ComputeBuffer). The end of a dispatch
//! separates passes and kinds.

use drape_compute::ComputeBackend;
use drape_math::Vec3;
use drape_mesh::{ClothConstraints, Constraint, ConstraintKind};
use drape_types::constants::EPSILON;

use crate::config::SimulationParams;
use crate::state::ParticleState;

/// Work done on one constraint kind during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxStats {
    pub kind: ConstraintKind,
    pub constraints: usize,
    pub passes: u32,
}

/// Position corrections `(Δp_i, Δp_j)` for one constraint.
///
/// The correction along the constraint axis is
/// `stiffness · (length − rest)`, split evenly between two free
/// endpoints, given entirely to the free endpoint when the other is
/// pinned, and dropped when both are pinned. Coincident endpoints have no
/// axis and get no correction.
pub fn project_distance(
    p_i: Vec3,
    p_j: Vec3,
    rest_length: f32,
    stiffness: f32,
    pinned_i: bool,
    pinned_j: bool,
) -> (Vec3, Vec3) {
    let d = p_j - p_i;
    let length = d.length();
    if length < EPSILON || (pinned_i && pinned_j) {
        return (Vec3::ZERO, Vec3::ZERO);
    }

    let correction = d * ((length - rest_length) / length * stiffness);
    match (pinned_i, pinned_j) {
        (false, false) => (correction * 0.5, -correction * 0.5),
        (true, false) => (Vec3::ZERO, -correction),
        (false, true) => (correction, Vec3::ZERO),
        (true, true) => (Vec3::ZERO, Vec3::ZERO),
    }
}

/// One parallel pass over `constraints`, in place on the current positions.
pub fn relax_pass(
    state: &ParticleState,
    constraints: &[Constraint],
    stiffness: f32,
    backend: &dyn ComputeBackend,
) {
    let positions = state.positions();
    let pinned = state.pinned();

    backend.dispatch(constraints.len(), &|k| {
        let c = constraints[k];
        let (i, j) = (c.i.index(), c.j.index());
        let p_i = positions.load_vec3(i);
        let p_j = positions.load_vec3(j);

        let (di, dj) = project_distance(p_i, p_j, c.rest_length, stiffness, pinned[i], pinned[j]);
        if di != Vec3::ZERO {
            positions.store_vec3(i, p_i + di);
        }
        if dj != Vec3::ZERO {
            positions.store_vec3(j, p_j + dj);
        }
    });
}

/// Relaxes structural, shear, then bend constraints, each for the
/// clamped iteration count.
pub fn relax(
    state: &ParticleState,
    constraints: &ClothConstraints,
    params: &SimulationParams,
    backend: &dyn ComputeBackend,
) -> Vec<RelaxStats> {
    let passes = params.clamped_iterations();

    constraints
        .sets()
        .map(|(kind, set)| {
            let stiffness = params.stiffness(kind);
            if !set.is_empty() && stiffness > 0.0 {
                for _ in 0..passes {
                    relax_pass(state, set, stiffness, backend);
                }
            }
            RelaxStats {
                kind,
                constraints: set.len(),
                passes,
            }
        })
        .collect()
}

/// Largest relative length error `|length − rest| / rest` over `constraints`.
///
/// Constraints with a zero rest length are skipped.
pub fn max_strain(state: &ParticleState, constraints: &[Constraint]) -> f32 {
    let positions = state.positions();
    constraints
        .iter()
        .filter(|c| c.rest_length > EPSILON)
        .map(|c| {
            let length = positions
                .load_vec3(c.i.index())
                .distance(positions.load_vec3(c.j.index()));
            (length - c.rest_length).abs() / c.rest_length
        })
        .fold(0.0, f32::max)
}
