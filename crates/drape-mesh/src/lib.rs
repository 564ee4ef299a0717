//! # drape-mesh
//!
//! Triangle mesh representation, cloth grid construction, and the
//! distance constraints that hold a cloth grid together.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Flat interleaved positions plus a triangle index list.
//!   Used both for cloth and for collision bodies.
//! - [`Constraint`] / [`ClothConstraints`]: Structural, shear, and bend
//!   distance constraints with rest lengths.
//! - [`GridCloth`]: Output of the grid builder ([`grid::build_grid_cloth`]).
//! - Procedural body generators (UV spheres, boxes).

pub mod constraint;
pub mod generators;
pub mod grid;
pub mod mesh;

pub use constraint::{ClothConstraints, Constraint, ConstraintKind};
pub use grid::{build_grid_cloth, ClothPattern, GridCloth, GridClothSpec};
pub use mesh::TriangleMesh;
