//! Grid cloth builder.
//!
//! Produces a rectangular cloth of `rows × cols` particles together with
//! its structural, shear, and bend constraints. Row 0 is the bottom edge
//! of the cloth; rows extend upward (+Y) and columns extend along +X, so a
//! grid placed at a positive height lies entirely above the ground. The
//! sheet faces +Z, in front of the body.
//!
//! Constraint counts are fixed functions of the grid size:
//!
//! ```text
//! structural = (cols − 1)·rows + cols·(rows − 1)
//! shear      = 2·(cols − 1)·(rows − 1)
//! bend       = rows·max(cols − 2, 0) + max(rows − 2, 0)·cols
//! ```

use std::ops::Range;

use drape_math::Vec3;
use drape_types::constants::{
    GRID_FORWARD_OFFSET, GRID_VERTICAL_OFFSET, MIN_GRID_DIMENSION,
};
use serde::{Deserialize, Serialize};

use crate::constraint::{ClothConstraints, Constraint};
use crate::mesh::TriangleMesh;

/// Full description of a grid cloth, including where its bottom edge starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridClothSpec {
    pub rows: usize,
    pub cols: usize,
    /// Distance between neighbouring particles (meters).
    pub spacing: f32,
    /// Position of the centre of the bottom row.
    pub origin: Vec3,
}

impl GridClothSpec {
    /// A grid at the default placement above and in front of the body.
    pub fn new(rows: usize, cols: usize, spacing: f32) -> Self {
        Self {
            rows,
            cols,
            spacing,
            origin: Vec3::new(0.0, GRID_VERTICAL_OFFSET, GRID_FORWARD_OFFSET),
        }
    }

    /// Overrides the placement of the bottom-row centre.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Returns `(rows, cols)` clamped to the minimum grid dimension.
    pub fn clamped_dimensions(&self) -> (usize, usize) {
        (
            self.rows.max(MIN_GRID_DIMENSION),
            self.cols.max(MIN_GRID_DIMENSION),
        )
    }

    /// Builds the cloth mesh and its constraints.
    pub fn build(&self) -> GridCloth {
        let (rows, cols) = self.clamped_dimensions();
        if (rows, cols) != (self.rows, self.cols) {
            tracing::debug!(
                requested_rows = self.rows,
                requested_cols = self.cols,
                rows,
                cols,
                "grid dimensions clamped"
            );
        }

        let mesh = build_mesh(rows, cols, self.spacing, self.origin);
        let constraints = build_constraints(&mesh, rows, cols);

        GridCloth {
            rows,
            cols,
            mesh,
            constraints,
        }
    }
}

/// Cloth pattern descriptor as supplied by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothPattern {
    pub rows: usize,
    pub cols: usize,
    pub spacing: f32,
    /// Hold the highest row of the garment fixed.
    pub pin_top_row: bool,
}

impl Default for ClothPattern {
    fn default() -> Self {
        Self {
            rows: 24,
            cols: 24,
            spacing: 0.04,
            pin_top_row: true,
        }
    }
}

impl ClothPattern {
    /// Builds the grid cloth at the default placement.
    pub fn build(&self) -> GridCloth {
        GridClothSpec::new(self.rows, self.cols, self.spacing).build()
    }

    /// Per-vertex pin flags for a cloth built from this pattern.
    pub fn pinned_mask(&self) -> Vec<bool> {
        let spec = GridClothSpec::new(self.rows, self.cols, self.spacing);
        let (rows, cols) = spec.clamped_dimensions();
        let mut pinned = vec![false; rows * cols];
        if self.pin_top_row {
            pinned[top_row(rows, cols)].iter_mut().for_each(|p| *p = true);
        }
        pinned
    }
}

/// Output of the grid builder.
#[derive(Debug, Clone)]
pub struct GridCloth {
    /// Rows after clamping.
    pub rows: usize,
    /// Columns after clamping.
    pub cols: usize,
    pub mesh: TriangleMesh,
    pub constraints: ClothConstraints,
}

impl GridCloth {
    /// Index of the particle at `(row, col)`.
    #[inline]
    pub fn vertex_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Particle indices of the highest row.
    pub fn top_row(&self) -> Range<usize> {
        top_row(self.rows, self.cols)
    }
}

fn top_row(rows: usize, cols: usize) -> Range<usize> {
    (rows - 1) * cols..rows * cols
}

/// Builds a `rows × cols` grid cloth at the default placement.
///
/// Dimensions below 2 are clamped up; this never fails.
pub fn build_grid_cloth(rows: usize, cols: usize, spacing: f32) -> GridCloth {
    GridClothSpec::new(rows, cols, spacing).build()
}

fn build_mesh(rows: usize, cols: usize, spacing: f32, origin: Vec3) -> TriangleMesh {
    let quads = (rows - 1) * (cols - 1);
    let mut mesh = TriangleMesh::with_capacity(rows * cols, quads * 2);

    let half_width = (cols - 1) as f32 * spacing * 0.5;
    for r in 0..rows {
        for c in 0..cols {
            mesh.push_vertex(Vec3::new(
                origin.x + c as f32 * spacing - half_width,
                origin.y + r as f32 * spacing,
                origin.z,
            ));
        }
    }

    // Two triangles per quad, counter-clockwise seen from +Z.
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let v00 = (r * cols + c) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + cols as u32;
            let v11 = v01 + 1;

            mesh.push_triangle(v00, v10, v01);
            mesh.push_triangle(v10, v11, v01);
        }
    }

    mesh
}

fn build_constraints(mesh: &TriangleMesh, rows: usize, cols: usize) -> ClothConstraints {
    let idx = |r: usize, c: usize| r * cols + c;
    let link = |a: usize, b: usize| {
        Constraint::new(a, b, mesh.position(a).distance(mesh.position(b)))
    };

    let mut constraints = ClothConstraints {
        structural: Vec::with_capacity((cols - 1) * rows + cols * (rows - 1)),
        shear: Vec::with_capacity(2 * (cols - 1) * (rows - 1)),
        bend: Vec::with_capacity(
            rows * cols.saturating_sub(2) + rows.saturating_sub(2) * cols,
        ),
    };

    // Structural: horizontal edges, then vertical edges
    for r in 0..rows {
        for c in 0..cols - 1 {
            constraints.structural.push(link(idx(r, c), idx(r, c + 1)));
        }
    }
    for r in 0..rows - 1 {
        for c in 0..cols {
            constraints.structural.push(link(idx(r, c), idx(r + 1, c)));
        }
    }

    // Shear: both diagonals of every quad
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            constraints.shear.push(link(idx(r, c), idx(r + 1, c + 1)));
            constraints.shear.push(link(idx(r, c + 1), idx(r + 1, c)));
        }
    }

    // Bend: skip one particle along rows, then along columns
    for r in 0..rows {
        for c in 0..cols.saturating_sub(2) {
            constraints.bend.push(link(idx(r, c), idx(r, c + 2)));
        }
    }
    for r in 0..rows.saturating_sub(2) {
        for c in 0..cols {
            constraints.bend.push(link(idx(r, c), idx(r + 2, c)));
        }
    }

    constraints
}
