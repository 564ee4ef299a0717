//! # drape-sdf
//!
//! Converts a closed triangle mesh (the body) into a signed distance
//! voxel grid used for cloth-vs-body collision.
//!
//! The build runs in four stages:
//! 1. **Layout**: padded bounding box and a shared cubic cell size
//! 2. **Rasterize**: exact closest-point distances near each triangle
//! 3. **Jump flood**: propagate nearest-surface data to every voxel
//! 4. **Sign**: ray-cast parity for voxels near the surface
//!
//! Distances are negative inside the body and positive outside.

pub mod builder;
pub mod grid;
pub mod jump_flood;
pub mod layout;
pub mod rasterize;
pub mod sign;

pub use builder::{build_sdf, SdfBuildConfig};
pub use grid::SdfGrid;
pub use jump_flood::jump_steps;
pub use layout::GridLayout;
pub use rasterize::Voxel;
