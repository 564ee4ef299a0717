//! # drape-math
//!
//! Vector math and geometric kernels for the drape engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `UVec3`, etc.)
//! - Axis-aligned bounding boxes
//! - Closest point on a triangle (Ericson's Voronoi-region test)
//! - Ray/triangle intersection (Möller–Trumbore)

pub mod aabb;
pub mod triangle;

pub use aabb::Aabb;
pub use triangle::{closest_point_on_triangle, ray_triangle_intersect, Triangle};

// Re-export glam types as the canonical math types for drape.
pub use glam::{IVec3, UVec3, Vec3};
