//! SDF build entry point.
//!
//! Runs layout → rasterize → jump flood → sign, logging the time spent in
//! each stage. A build is expected once per body-mesh change, never per
//! frame.

use std::time::Instant;

use drape_mesh::TriangleMesh;
use drape_types::constants::{
    DEFAULT_SDF_RESOLUTION, MAX_SDF_RESOLUTION, MIN_SDF_RESOLUTION, SDF_BOUNDS_PADDING,
    SDF_SIGN_BAND_CELLS,
};
use drape_types::{DrapeError, DrapeResult};
use serde::{Deserialize, Serialize};

use crate::grid::SdfGrid;
use crate::jump_flood::jump_flood;
use crate::layout::GridLayout;
use crate::rasterize::rasterize;
use crate::sign::classify;

/// Parameters of an SDF build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdfBuildConfig {
    /// Voxels per axis. Clamped to the supported range when building.
    pub resolution: u32,
    /// Fraction of each axis span added on both sides of the bounding box.
    pub padding: f32,
    /// Sign classification band, in cell widths.
    pub sign_band_cells: f32,
}

impl Default for SdfBuildConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_SDF_RESOLUTION,
            padding: SDF_BOUNDS_PADDING,
            sign_band_cells: SDF_SIGN_BAND_CELLS,
        }
    }
}

impl SdfBuildConfig {
    /// Default configuration at a given resolution.
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    /// Builds the signed distance grid for a closed body mesh.
    pub fn build(&self, mesh: &TriangleMesh) -> DrapeResult<SdfGrid> {
        mesh.validate()?;
        if mesh.triangle_count() == 0 {
            return Err(DrapeError::InvalidMesh("body mesh has no triangles".into()));
        }

        let resolution = self.resolution.clamp(MIN_SDF_RESOLUTION, MAX_SDF_RESOLUTION);
        if resolution != self.resolution {
            tracing::warn!(
                requested = self.resolution,
                resolution,
                "SDF resolution clamped"
            );
        }

        let start = Instant::now();
        let layout = GridLayout::for_mesh(mesh, resolution, self.padding)?;

        let voxels = rasterize(mesh, &layout);
        let rasterized_at = start.elapsed();

        let voxels = jump_flood(voxels, &layout);
        let flooded_at = start.elapsed();

        let band = self.sign_band_cells * layout.cell_size;
        let distances = classify(&voxels, mesh, &layout, band);
        let total = start.elapsed();

        tracing::debug!(
            rasterize_ms = rasterized_at.as_secs_f64() * 1e3,
            flood_ms = (flooded_at - rasterized_at).as_secs_f64() * 1e3,
            sign_ms = (total - flooded_at).as_secs_f64() * 1e3,
            "SDF stage timings"
        );

        let grid = SdfGrid::from_parts(layout, distances)?;
        tracing::info!(
            resolution,
            triangles = mesh.triangle_count(),
            cell_size = layout.cell_size,
            inside = grid.inside_count(),
            elapsed_ms = total.as_secs_f64() * 1e3,
            "built body SDF"
        );
        Ok(grid)
    }
}

/// Builds the signed distance grid of `mesh` at `resolution` voxels per axis.
pub fn build_sdf(mesh: &TriangleMesh, resolution: u32) -> DrapeResult<SdfGrid> {
    SdfBuildConfig::with_resolution(resolution).build(mesh)
}
