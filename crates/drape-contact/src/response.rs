//! Velocity-aware position correction shared by all colliders.

use std::sync::atomic::{AtomicU32, Ordering};

use drape_math::Vec3;
use serde::{Deserialize, Serialize};

/// Result of one collider pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResult {
    /// Number of particles pushed out.
    pub resolved_count: u32,
    /// Deepest penetration found before correction.
    pub max_penetration: f32,
}

impl ContactResult {
    /// Combines the results of two passes.
    pub fn merge(self, other: ContactResult) -> ContactResult {
        ContactResult {
            resolved_count: self.resolved_count + other.resolved_count,
            max_penetration: self.max_penetration.max(other.max_penetration),
        }
    }
}

/// Pushes a particle out along `normal` by `penetration` and adjusts its
/// implied velocity.
///
/// With `v = position − previous`, the tangential part of `v` is scaled
/// by `1 − friction`. The normal part is reflected and scaled by
/// `restitution` when it points into the surface, and kept otherwise.
/// Returns the new `(position, previous)`.
pub fn respond(
    position: Vec3,
    previous: Vec3,
    normal: Vec3,
    penetration: f32,
    friction: f32,
    restitution: f32,
) -> (Vec3, Vec3) {
    let corrected = position + normal * penetration;

    let velocity = position - previous;
    let vn = velocity.dot(normal);
    let normal_part = normal * vn;
    let tangential = (velocity - normal_part) * (1.0 - friction);
    let normal_part = if vn < 0.0 {
        -normal_part * restitution
    } else {
        normal_part
    };

    (corrected, corrected - (tangential + normal_part))
}

/// Lock-free tally of contacts written from concurrent work items.
#[derive(Debug, Default)]
pub(crate) struct ContactTally {
    resolved: AtomicU32,
    max_penetration_bits: AtomicU32,
}

impl ContactTally {
    /// Records one contact. `penetration` must be positive; positive
    /// `f32` values order the same as their bit patterns.
    pub(crate) fn record(&self, penetration: f32) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
        self.max_penetration_bits
            .fetch_max(penetration.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn finish(self) -> ContactResult {
        ContactResult {
            resolved_count: self.resolved.into_inner(),
            max_penetration: f32::from_bits(self.max_penetration_bits.into_inner()),
        }
    }
}
