//! Inside/outside classification by ray parity.
//!
//! A ray along +X from the voxel centre crosses a closed surface an odd
//! number of times exactly when the centre is inside. Only voxels within
//! a narrow band of the surface are classified; every other voxel keeps
//! its positive unsigned distance, which bounds the cost of the
//! `voxels × triangles` ray test.

use rayon::prelude::*;

use drape_math::{ray_triangle_intersect, Aabb, Triangle, Vec3};
use drape_mesh::TriangleMesh;

use crate::layout::GridLayout;
use crate::rasterize::Voxel;

/// Number of triangles hit by the ray `origin + t·X`, `t > 0`.
///
/// Triangles whose Y/Z extent excludes the ray, or that lie entirely
/// behind the origin, are rejected before the exact test.
pub fn count_crossings(origin: Vec3, triangles: &[(Triangle, Aabb)]) -> usize {
    triangles
        .iter()
        .filter(|(_, aabb)| {
            aabb.max.x >= origin.x
                && (aabb.min.y..=aabb.max.y).contains(&origin.y)
                && (aabb.min.z..=aabb.max.z).contains(&origin.z)
        })
        .filter(|(tri, _)| ray_triangle_intersect(origin, Vec3::X, tri.a, tri.b, tri.c).is_some())
        .count()
}

/// Produces signed distances from flooded voxels.
///
/// `band` is the largest unsigned distance that is ray-cast.
pub fn classify(voxels: &[Voxel], mesh: &TriangleMesh, layout: &GridLayout, band: f32) -> Vec<f32> {
    let triangles: Vec<(Triangle, Aabb)> = mesh.triangles().map(|t| (t, t.aabb())).collect();

    voxels
        .par_iter()
        .enumerate()
        .map(|(index, voxel)| {
            if voxel.distance > band {
                return voxel.distance;
            }
            let center = layout.voxel_center(layout.coords(index));
            if count_crossings(center, &triangles) % 2 == 1 {
                -voxel.distance
            } else {
                voxel.distance
            }
        })
        .collect()
}
