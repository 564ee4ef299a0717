//! Procedural body meshes for collision tests, benchmarks, and demos.
//!
//! These generators produce deterministic, closed meshes with
//! outward-facing counter-clockwise winding.

use drape_math::Vec3;

use crate::mesh::TriangleMesh;

/// Generates a UV sphere centered at `center`.
///
/// # Arguments
/// - `radius`: Sphere radius in meters.
/// - `stacks`: Number of horizontal slices (latitude divisions).
/// - `slices`: Number of vertical slices (longitude divisions).
///
/// The seam column is duplicated, so the mesh is closed geometrically
/// but not topologically.
pub fn uv_sphere(center: Vec3, radius: f32, stacks: usize, slices: usize) -> TriangleMesh {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let vertex_count = (stacks + 1) * (slices + 1);
    let tri_count = stacks * slices * 2;
    let mut mesh = TriangleMesh::with_capacity(vertex_count, tri_count);

    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32; // 0 to PI
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..=slices {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let dir = Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta);
            mesh.push_vertex(center + dir * radius);
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * (slices + 1) + j) as u32;
            let b = a + (slices + 1) as u32;

            // Skip degenerate triangles at poles
            if i != 0 {
                mesh.push_triangle(a, a + 1, b);
            }
            if i != stacks - 1 {
                mesh.push_triangle(a + 1, b + 1, b);
            }
        }
    }

    mesh
}

/// Generates an axis-aligned box spanning `[min, max]`, two triangles per face.
pub fn cuboid(min: Vec3, max: Vec3) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(8, 12);
    for k in 0..8u32 {
        mesh.push_vertex(Vec3::new(
            if k & 1 == 0 { min.x } else { max.x },
            if k & 2 == 0 { min.y } else { max.y },
            if k & 4 == 0 { min.z } else { max.z },
        ));
    }

    // Corner k has bit 0 = +X, bit 1 = +Y, bit 2 = +Z.
    const FACES: [[u32; 4]; 6] = [
        [0, 4, 6, 2], // -X
        [1, 3, 7, 5], // +X
        [0, 1, 5, 4], // -Y
        [2, 6, 7, 3], // +Y
        [0, 2, 3, 1], // -Z
        [4, 5, 7, 6], // +Z
    ];
    for [a, b, c, d] in FACES {
        mesh.push_triangle(a, b, c);
        mesh.push_triangle(a, c, d);
    }

    mesh
}
