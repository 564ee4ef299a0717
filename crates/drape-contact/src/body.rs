//! Body collision against a signed distance field.
//!
//! The collider owns the body's [`SdfGrid`]. It starts without one, in
//! which case body collision is skipped and reported once. A rebuild
//! replaces the grid in a single move; `&mut self` guarantees no pass is
//! reading the old grid at that time.

use drape_compute::ComputeBackend;
use drape_mesh::TriangleMesh;
use drape_sdf::{build_sdf, SdfGrid};
use drape_solver::ParticleState;
use drape_types::DrapeResult;

use crate::params::CollisionParams;
use crate::response::{respond, ContactResult, ContactTally};

/// Cloth-vs-body collider backed by an optional SDF.
#[derive(Debug, Clone, Default)]
pub struct BodyCollider {
    sdf: Option<SdfGrid>,
    params: CollisionParams,
    reported_missing: bool,
}

impl BodyCollider {
    /// Creates a collider without an SDF.
    pub fn new(params: CollisionParams) -> Self {
        Self {
            sdf: None,
            params: params.clamped(),
            reported_missing: false,
        }
    }

    /// Creates a collider around an existing grid.
    pub fn with_sdf(sdf: SdfGrid, params: CollisionParams) -> Self {
        Self {
            sdf: Some(sdf),
            ..Self::new(params)
        }
    }

    #[inline]
    pub fn sdf(&self) -> Option<&SdfGrid> {
        self.sdf.as_ref()
    }

    /// Returns true once an SDF is installed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.sdf.is_some()
    }

    #[inline]
    pub fn params(&self) -> CollisionParams {
        self.params
    }

    /// Replaces the response parameters. The grid is untouched.
    pub fn update_params(&mut self, friction: f32, restitution: f32, thickness: f32) {
        self.params = CollisionParams::new(friction, restitution, thickness);
    }

    /// Installs `sdf`, returning the grid it replaces.
    pub fn set_sdf(&mut self, sdf: SdfGrid) -> Option<SdfGrid> {
        self.reported_missing = false;
        self.sdf.replace(sdf)
    }

    /// Builds a grid for `mesh` and installs it.
    ///
    /// On failure the current grid, if any, stays in place.
    pub fn rebuild(&mut self, mesh: &TriangleMesh, resolution: u32) -> DrapeResult<&SdfGrid> {
        let grid = build_sdf(mesh, resolution)?;
        self.reported_missing = false;
        let grid: &SdfGrid = self.sdf.insert(grid);
        Ok(grid)
    }

    /// Removes the grid, disabling body collision.
    pub fn release(&mut self) -> Option<SdfGrid> {
        self.sdf.take()
    }

    /// Pushes free particles out of the body.
    ///
    /// A particle collides when its sampled distance is below the contact
    /// thickness. Particles outside the grid are skipped.
    pub fn resolve(&mut self, state: &ParticleState, backend: &dyn ComputeBackend) -> ContactResult {
        let Some(sdf) = self.sdf.as_ref() else {
            if !self.reported_missing {
                tracing::warn!("body SDF not built; body collision disabled");
                self.reported_missing = true;
            }
            return ContactResult::default();
        };

        let CollisionParams {
            friction,
            restitution,
            thickness,
        } = self.params;
        let positions = state.positions();
        let previous = state.previous();
        let pinned = state.pinned();
        let tally = ContactTally::default();

        backend.dispatch(state.vertex_count(), &|i| {
            if pinned[i] {
                return;
            }
            let pos = positions.load_vec3(i);
            let uvw = sdf.world_to_uvw(pos);
            if !SdfGrid::contains_uvw(uvw) {
                return;
            }

            let penetration = thickness - sdf.sample_uvw(uvw);
            if penetration <= 0.0 {
                return;
            }

            let normal = sdf.normal_uvw(uvw);
            let (corrected, prev) = respond(
                pos,
                previous.load_vec3(i),
                normal,
                penetration,
                friction,
                restitution,
            );
            positions.store_vec3(i, corrected);
            previous.store_vec3(i, prev);
            tally.record(penetration);
        });

        tally.finish()
    }
}
