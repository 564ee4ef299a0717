//! Ground plane collision.
//!
//! Prevents particles from falling through a horizontal plane at
//! `y = height`. Penetrating particles are placed exactly on the plane
//! and lose the downward part of their velocity. There is no bounce and
//! no friction.

use drape_compute::ComputeBackend;
use drape_math::Vec3;
use drape_solver::ParticleState;
use drape_types::constants::GROUND_HEIGHT;

use crate::response::{respond, ContactResult, ContactTally};

/// Ground plane collision at a fixed Y height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// Height of the ground plane (Y coordinate).
    pub height: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::new(GROUND_HEIGHT)
    }
}

impl GroundPlane {
    /// Creates a new ground plane at the given height.
    pub fn new(height: f32) -> Self {
        Self { height }
    }

    /// Clamps every free particle below the plane onto it.
    ///
    /// Idempotent: a second pass finds nothing below the plane.
    pub fn resolve(&self, state: &ParticleState, backend: &dyn ComputeBackend) -> ContactResult {
        let positions = state.positions();
        let previous = state.previous();
        let pinned = state.pinned();
        let tally = ContactTally::default();
        let height = self.height;

        backend.dispatch(state.vertex_count(), &|i| {
            if pinned[i] {
                return;
            }
            let pos = positions.load_vec3(i);
            let depth = height - pos.y;
            if depth <= 0.0 {
                return;
            }

            let (corrected, prev) = respond(pos, previous.load_vec3(i), Vec3::Y, depth, 0.0, 0.0);
            // Snap exactly onto the plane; previous moves by the same rounding.
            let snap = height - corrected.y;
            positions.store_vec3(i, corrected.with_y(height));
            previous.store_vec3(i, prev + Vec3::Y * snap);
            tally.record(depth);
        });

        tally.finish()
    }
}
