//! Core triangle mesh type.
//!
//! Positions are stored interleaved, `[x0, y0, z0, x1, y1, z1, ...]`,
//! which is the layout uploaded to compute buffers and handed to the
//! renderer. Triangles are a flat index list, three indices per triangle.

use drape_math::{Aabb, Triangle, Vec3};
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

/// A triangle mesh with interleaved vertex positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions, three floats per vertex.
    pub positions: Vec<f32>,

    /// Triangle indices: each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        let base = i * 3;
        Vec3::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        let base = i * 3;
        self.positions[base] = p.x;
        self.positions[base + 1] = p.y;
        self.positions[base + 2] = p.z;
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the corner positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: usize) -> Triangle {
        let [a, b, c] = self.triangle(t);
        Triangle::new(
            self.position(a as usize),
            self.position(b as usize),
            self.position(c as usize),
        )
    }

    /// Iterates over all triangles by value.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(move |t| self.triangle_positions(t))
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, p: Vec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&[p.x, p.y, p.z]);
        index
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Axis-aligned bounds of all vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points((0..self.vertex_count()).map(|i| self.position(i)))
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity * 3),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Position and index arrays are multiples of 3
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    /// - All coordinates are finite
    pub fn validate(&self) -> DrapeResult<()> {
        if self.positions.len() % 3 != 0 {
            return Err(DrapeError::InvalidMesh(
                "Position count is not divisible by 3".into(),
            ));
        }
        if self.indices.len() % 3 != 0 {
            return Err(DrapeError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }
        if let Some(i) = self.positions.iter().position(|v| !v.is_finite()) {
            return Err(DrapeError::InvalidMesh(format!(
                "Non-finite coordinate at vertex {}",
                i / 3
            )));
        }

        let n = self.vertex_count();
        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(DrapeError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(DrapeError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a validated mesh from interleaved position data and indices,
    /// the layout used by body meshes coming from avatar/shape modules.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> DrapeResult<Self> {
        let mesh = Self {
            positions: positions.to_vec(),
            indices: indices.to_vec(),
        };
        mesh.validate()?;
        Ok(mesh)
    }
}
