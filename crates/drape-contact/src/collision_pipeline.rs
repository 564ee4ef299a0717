//! Collision stage of a simulation tick: ground first, then body.

use drape_compute::ComputeBackend;
use drape_solver::ParticleState;

use crate::body::BodyCollider;
use crate::ground_plane::GroundPlane;
use crate::response::ContactResult;

/// Ground plane plus SDF body collider, run in that order.
#[derive(Debug, Clone, Default)]
pub struct CollisionPipeline {
    pub ground: GroundPlane,
    pub body: BodyCollider,
}

impl CollisionPipeline {
    pub fn new(ground: GroundPlane, body: BodyCollider) -> Self {
        Self { ground, body }
    }

    /// Runs both colliders over the current particle positions.
    pub fn step(&mut self, state: &ParticleState, backend: &dyn ComputeBackend) -> CollisionStepResult {
        let ground = self.ground.resolve(state, backend);
        let body_active = self.body.is_active();
        let body = self.body.resolve(state, backend);
        CollisionStepResult {
            ground,
            body,
            body_active,
        }
    }
}

/// Result of one collision stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionStepResult {
    pub ground: ContactResult,
    pub body: ContactResult,
    /// Whether an SDF was available for body collision.
    pub body_active: bool,
}

impl CollisionStepResult {
    /// Ground and body results combined.
    pub fn total(&self) -> ContactResult {
        self.ground.merge(self.body)
    }
}
