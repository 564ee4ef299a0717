//! Triangle rasterization into the voxel grid.
//!
//! Every triangle writes exact distances into the voxels covering its
//! bounding box. A voxel keeps the smallest distance seen across all
//! triangles and the closest surface point that produced it. Voxels no
//! triangle touches stay at `+∞` with no closest point; the jump flood
//! fills them in afterwards.

use rayon::prelude::*;

use drape_math::{Triangle, UVec3, Vec3};
use drape_mesh::TriangleMesh;

use crate::layout::GridLayout;

/// Per-voxel nearest-surface record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voxel {
    /// Unsigned distance to the surface (`+∞` when unknown).
    pub distance: f32,
    /// Surface point that realises `distance`, if any.
    pub closest: Option<Vec3>,
}

impl Voxel {
    /// A voxel no surface information has reached yet.
    pub const EMPTY: Voxel = Voxel {
        distance: f32::INFINITY,
        closest: None,
    };

    /// Returns true if the voxel carries a surface point.
    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.closest.is_some()
    }
}

/// A triangle together with the inclusive voxel range it covers.
struct Footprint {
    tri: Triangle,
    lo: UVec3,
    hi: UVec3,
}

/// Rasterizes all triangles of `mesh` into a fresh voxel array.
///
/// Work is split by Z slice, so each slice is owned by exactly one task and
/// the result does not depend on scheduling.
pub fn rasterize(mesh: &TriangleMesh, layout: &GridLayout) -> Vec<Voxel> {
    let footprints: Vec<Footprint> = mesh
        .triangles()
        .map(|tri| {
            let aabb = tri.aabb();
            let (lo, hi) = layout.voxel_range(aabb.min, aabb.max);
            Footprint { tri, lo, hi }
        })
        .collect();

    let r = layout.resolution as usize;
    let mut voxels = vec![Voxel::EMPTY; layout.voxel_count()];

    voxels
        .par_chunks_mut(r * r)
        .enumerate()
        .for_each(|(z, slice)| {
            let z = z as u32;
            for fp in footprints.iter().filter(|fp| (fp.lo.z..=fp.hi.z).contains(&z)) {
                for y in fp.lo.y..=fp.hi.y {
                    for x in fp.lo.x..=fp.hi.x {
                        let center = layout.voxel_center(UVec3::new(x, y, z));
                        let closest = fp.tri.closest_point(center);
                        let distance = center.distance(closest);

                        let voxel = &mut slice[x as usize + y as usize * r];
                        if distance < voxel.distance {
                            *voxel = Voxel {
                                distance,
                                closest: Some(closest),
                            };
                        }
                    }
                }
            }
        });

    voxels
}
