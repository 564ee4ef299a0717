//! Jump Flood distance propagation.
//!
//! Each pass lets every voxel look at its 26 neighbours `step` voxels away
//! and take over a neighbour's surface point when going through that
//! neighbour (`neighbour distance + hop`) is shorter than what the voxel
//! already has. An adopted point is stored with its exact distance from the
//! voxel centre. Steps halve from `⌊resolution / 2⌋` down to 1, so
//! information crosses the grid in `O(log resolution)` passes.

use rayon::prelude::*;

use drape_math::IVec3;

use crate::layout::GridLayout;
use crate::rasterize::Voxel;

/// Jump sizes for a grid of the given resolution: `⌊R/2⌋, ⌊R/4⌋, …, 1`.
///
/// A resolution of 64 yields `[32, 16, 8, 4, 2, 1]`. Resolutions below 2
/// yield no passes.
pub fn jump_steps(resolution: u32) -> Vec<u32> {
    std::iter::successors(Some(resolution / 2), |&s| Some(s / 2))
        .take_while(|&s| s >= 1)
        .collect()
}

/// Runs all jump flood passes over `voxels` and returns the flooded grid.
pub fn jump_flood(voxels: Vec<Voxel>, layout: &GridLayout) -> Vec<Voxel> {
    let mut src = voxels;
    let mut dst = src.clone();

    for step in jump_steps(layout.resolution) {
        flood_pass(&src, &mut dst, layout, step);
        std::mem::swap(&mut src, &mut dst);
    }

    src
}

/// One double-buffered pass: reads only `src`, writes only `dst`.
fn flood_pass(src: &[Voxel], dst: &mut [Voxel], layout: &GridLayout, step: u32) {
    let r = layout.resolution as i32;
    let step = step as i32;

    dst.par_iter_mut().enumerate().for_each(|(index, out)| {
        let coords = layout.coords(index);
        let center = layout.voxel_center(coords);
        let here = coords.as_ivec3();
        let mut best = src[index];

        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let offset = IVec3::new(dx, dy, dz) * step;
                    let there = here + offset;
                    if there.min_element() < 0 || there.max_element() >= r {
                        continue;
                    }

                    let neighbour = src[layout.index(there.x as u32, there.y as u32, there.z as u32)];
                    let Some(closest) = neighbour.closest else {
                        continue;
                    };

                    let hop = offset.as_vec3().length() * layout.cell_size;
                    if neighbour.distance + hop < best.distance {
                        best = Voxel {
                            distance: center.distance(closest),
                            closest: Some(closest),
                        };
                    }
                }
            }
        }

        *out = best;
    });
}
