//! Voxel grid placement.
//!
//! The grid covers the body's bounding box padded by a fraction of each
//! axis span. A single cell size (the largest per-axis `span / resolution`)
//! is shared by all axes, so the grid is `resolution` cells along every
//! axis even when the box itself is not a cube.

use drape_math::{Aabb, UVec3, Vec3};
use drape_mesh::TriangleMesh;
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

/// Placement of a cubic voxel grid in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Voxels per axis.
    pub resolution: u32,
    /// Padded bounds of the body mesh.
    pub bounds: Aabb,
    /// Edge length of one voxel.
    pub cell_size: f32,
}

impl GridLayout {
    /// Computes the layout for `mesh` at the given resolution.
    ///
    /// Fails for a mesh without vertices or one whose padded bounds have
    /// zero extent along every axis.
    pub fn for_mesh(mesh: &TriangleMesh, resolution: u32, padding: f32) -> DrapeResult<Self> {
        let bounds = mesh
            .bounds()
            .ok_or_else(|| DrapeError::InvalidMesh("body mesh has no vertices".into()))?
            .padded(padding);

        let cell_size = (bounds.size() / resolution as f32).max_element();
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(DrapeError::InvalidMesh(format!(
                "body mesh bounds have no extent (cell size {cell_size})"
            )));
        }

        Ok(Self {
            resolution,
            bounds,
            cell_size,
        })
    }

    /// Total number of voxels.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        let r = self.resolution as usize;
        r * r * r
    }

    /// Flat index of voxel `(x, y, z)`; X varies fastest.
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let r = self.resolution as usize;
        x as usize + y as usize * r + z as usize * r * r
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coords(&self, index: usize) -> UVec3 {
        let r = self.resolution as usize;
        UVec3::new(
            (index % r) as u32,
            ((index / r) % r) as u32,
            (index / (r * r)) as u32,
        )
    }

    /// World position of the centre of voxel `coords`: `min + (index + 0.5) · cell_size`.
    #[inline]
    pub fn voxel_center(&self, coords: UVec3) -> Vec3 {
        self.bounds.min + (coords.as_vec3() + 0.5) * self.cell_size
    }

    /// World-space extent covered by the voxels along each axis.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        Vec3::splat(self.cell_size * self.resolution as f32)
    }

    /// Inclusive voxel range whose cells overlap `[min, max]`, clipped to the grid.
    pub fn voxel_range(&self, min: Vec3, max: Vec3) -> (UVec3, UVec3) {
        let last = (self.resolution - 1) as f32;
        let lo = ((min - self.bounds.min) / self.cell_size - 0.5)
            .floor()
            .clamp(Vec3::ZERO, Vec3::splat(last));
        let hi = ((max - self.bounds.min) / self.cell_size - 0.5)
            .ceil()
            .clamp(Vec3::ZERO, Vec3::splat(last));
        (lo.as_uvec3(), hi.as_uvec3())
    }
}
