//! Free-function interface over [`ClothSimulation`].

use drape_mesh::{ClothConstraints, TriangleMesh};
use drape_sdf::SdfGrid;
use drape_solver::{PositionsView, SimulationParams};
use drape_types::constants::DEFAULT_SDF_RESOLUTION;
use drape_types::DrapeResult;

use crate::pipeline::{ClothSimulation, StepReport};

/// Builds a `rows × cols` cloth grid with `spacing` between neighbours.
///
/// Dimensions below 2 are raised to 2.
pub fn build_grid_cloth(rows: usize, cols: usize, spacing: f32) -> (TriangleMesh, ClothConstraints) {
    let cloth = drape_mesh::build_grid_cloth(rows, cols, spacing);
    (cloth.mesh, cloth.constraints)
}

/// Creates a simulation; with `body_mesh`, also builds the body SDF at the
/// default resolution.
pub fn create_simulation(
    mesh: TriangleMesh,
    constraints: ClothConstraints,
    params: SimulationParams,
    pinned: Vec<bool>,
    body_mesh: Option<&TriangleMesh>,
) -> DrapeResult<ClothSimulation> {
    let mut sim = ClothSimulation::new(mesh, constraints, params, pinned)?;
    if let Some(body) = body_mesh {
        sim.rebuild_body_sdf(body, DEFAULT_SDF_RESOLUTION)?;
    }
    Ok(sim)
}

/// Advances `sim` by one tick.
pub fn step_simulation(sim: &mut ClothSimulation, params: &SimulationParams) -> StepReport {
    sim.step_with(params)
}

/// Read-only view of the current particle positions.
pub fn current_positions(sim: &ClothSimulation) -> PositionsView<'_> {
    sim.positions()
}

/// Puts every particle back at rest in `initial`.
pub fn reset_simulation(sim: &mut ClothSimulation, initial: &[f32]) -> DrapeResult<()> {
    sim.reset(initial)
}

/// Builds the signed distance grid of a closed body mesh.
pub fn build_sdf(body: &TriangleMesh, resolution: u32) -> DrapeResult<SdfGrid> {
    drape_sdf::build_sdf(body, resolution)
}

/// Changes body collision response without rebuilding the SDF.
pub fn update_collision_params(
    sim: &mut ClothSimulation,
    friction: f32,
    restitution: f32,
    thickness: f32,
) {
    sim.update_collision_params(friction, restitution, thickness);
}
