//! The signed distance voxel grid and its lookups.
//!
//! World positions map to normalized grid coordinates (UVW) in `[0, 1]³`
//! over the voxel extent, `uvw = (p − min) · inv_size`. Lookups use the
//! nearest voxel, matching a point-sampled 3D texture.

use drape_math::{Aabb, UVec3, Vec3};
use drape_types::{DrapeError, DrapeResult};

use crate::layout::GridLayout;

/// A cubic grid of signed distances (negative inside, positive outside).
#[derive(Debug, Clone)]
pub struct SdfGrid {
    layout: GridLayout,
    distances: Vec<f32>,
}

impl SdfGrid {
    /// Wraps precomputed distances. `distances.len()` must be `resolution³`.
    pub fn from_parts(layout: GridLayout, distances: Vec<f32>) -> DrapeResult<Self> {
        if distances.len() != layout.voxel_count() {
            return Err(DrapeError::InvalidConfig(format!(
                "SDF has {} values, expected {} for resolution {}",
                distances.len(),
                layout.voxel_count(),
                layout.resolution
            )));
        }
        Ok(Self { layout, distances })
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.layout.resolution
    }

    /// Padded bounds of the body mesh the grid was built from.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.layout.bounds
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.layout.cell_size
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Flat distances, X fastest then Y then Z.
    #[inline]
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// World position of a voxel centre.
    #[inline]
    pub fn voxel_center(&self, x: u32, y: u32, z: u32) -> Vec3 {
        self.layout.voxel_center(UVec3::new(x, y, z))
    }

    #[inline]
    pub fn distance_at_voxel(&self, x: u32, y: u32, z: u32) -> f32 {
        self.distances[self.layout.index(x, y, z)]
    }

    /// Maps a world position to normalized grid coordinates.
    #[inline]
    pub fn world_to_uvw(&self, p: Vec3) -> Vec3 {
        (p - self.layout.bounds.min) / self.layout.extent()
    }

    /// Returns true if `uvw` lies inside the unit cube.
    #[inline]
    pub fn contains_uvw(uvw: Vec3) -> bool {
        uvw.cmpge(Vec3::ZERO).all() && uvw.cmple(Vec3::ONE).all()
    }

    /// Nearest-voxel lookup at normalized coordinates, clamped to the edge voxels.
    pub fn sample_uvw(&self, uvw: Vec3) -> f32 {
        let r = self.layout.resolution;
        let cell = (uvw * r as f32)
            .floor()
            .clamp(Vec3::ZERO, Vec3::splat((r - 1) as f32))
            .as_uvec3();
        self.distance_at_voxel(cell.x, cell.y, cell.z)
    }

    /// Signed distance at a world position, or `None` outside the grid.
    pub fn sample(&self, p: Vec3) -> Option<f32> {
        let uvw = self.world_to_uvw(p);
        Self::contains_uvw(uvw).then(|| self.sample_uvw(uvw))
    }

    /// Central-difference gradient at normalized coordinates, one voxel
    /// (`1 / resolution`) apart along each axis. Not normalized.
    pub fn gradient_uvw(&self, uvw: Vec3) -> Vec3 {
        let eps = 1.0 / self.layout.resolution as f32;
        let axis = |e: Vec3| self.sample_uvw(uvw + e) - self.sample_uvw(uvw - e);
        Vec3::new(
            axis(Vec3::new(eps, 0.0, 0.0)),
            axis(Vec3::new(0.0, eps, 0.0)),
            axis(Vec3::new(0.0, 0.0, eps)),
        )
    }

    /// Central-difference gradient at a world position.
    pub fn gradient(&self, p: Vec3) -> Vec3 {
        self.gradient_uvw(self.world_to_uvw(p))
    }

    /// Outward surface normal at normalized coordinates.
    ///
    /// A vanishing or non-finite gradient falls back to +Y.
    pub fn normal_uvw(&self, uvw: Vec3) -> Vec3 {
        self.gradient_uvw(uvw).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Outward surface normal at a world position.
    pub fn normal(&self, p: Vec3) -> Vec3 {
        self.normal_uvw(self.world_to_uvw(p))
    }

    /// Returns true if `p` is inside the grid and the body.
    pub fn is_inside(&self, p: Vec3) -> bool {
        self.sample(p).is_some_and(|d| d < 0.0)
    }

    /// Smallest stored distance (deepest inside point).
    pub fn min_distance(&self) -> f32 {
        self.distances.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Number of voxels classified as inside.
    pub fn inside_count(&self) -> usize {
        self.distances.iter().filter(|&&d| d < 0.0).count()
    }
}
