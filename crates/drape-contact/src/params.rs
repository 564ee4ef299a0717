//! Collision response parameters.

use drape_types::constants::{DEFAULT_CONTACT_THICKNESS, DEFAULT_FRICTION, DEFAULT_RESTITUTION};
use serde::{Deserialize, Serialize};

/// Response parameters for body collision.
///
/// Independent of the SDF: changing them never requires a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionParams {
    /// Fraction of tangential velocity removed on contact, 0.0–1.0.
    pub friction: f32,
    /// Fraction of approaching normal velocity reflected, 0.0–1.0.
    pub restitution: f32,
    /// Separation kept between particles and the body surface.
    pub thickness: f32,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            restitution: DEFAULT_RESTITUTION,
            thickness: DEFAULT_CONTACT_THICKNESS,
        }
    }
}

impl CollisionParams {
    pub fn new(friction: f32, restitution: f32, thickness: f32) -> Self {
        Self {
            friction,
            restitution,
            thickness,
        }
        .clamped()
    }

    /// Friction and restitution clamped to [0, 1], thickness to ≥ 0.
    pub fn clamped(self) -> Self {
        Self {
            friction: self.friction.clamp(0.0, 1.0),
            restitution: self.restitution.clamp(0.0, 1.0),
            thickness: self.thickness.max(0.0),
        }
    }
}
