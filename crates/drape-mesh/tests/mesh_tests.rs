//! Integration tests for drape-mesh.

use drape_math::Vec3;
use drape_mesh::generators::{cuboid, uv_sphere};
use drape_mesh::grid::{build_grid_cloth, ClothPattern, GridClothSpec};
use drape_mesh::{ConstraintKind, TriangleMesh};
use drape_types::constants::GRID_VERTICAL_OFFSET;
use drape_types::ParticleId;

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        indices: vec![0, 1, 2],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn set_position_roundtrip() {
    let mut mesh = make_single_triangle();
    mesh.set_position(2, Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(&mesh.positions[6..9], &[4.0, 5.0, 6.0]);
}

#[test]
fn triangle_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    let tri = mesh.triangle_positions(0);
    assert_eq!(tri.c, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_ragged_positions() {
    let mut mesh = make_single_triangle();
    mesh.positions.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_nan() {
    let mut mesh = make_single_triangle();
    mesh.positions[4] = f32::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn from_interleaved() {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 1, 2]).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert!(TriangleMesh::from_interleaved(&positions, &[0, 1, 5]).is_err());
}

#[test]
fn bounds_of_empty_mesh() {
    assert!(TriangleMesh::default().bounds().is_none());
}

#[test]
fn mesh_serialization() {
    let mesh = make_single_triangle();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Grid Builder Tests ───────────────────────────────────────

#[test]
fn grid_10x10_vertex_count() {
    let cloth = build_grid_cloth(10, 10, 1.0);
    assert_eq!(cloth.mesh.vertex_count(), 100);
    assert_eq!(cloth.mesh.positions.len(), 300);
}

#[test]
fn grid_5_cols_4_rows_triangles() {
    let cloth = build_grid_cloth(4, 5, 1.0);
    assert_eq!(cloth.mesh.triangle_count(), 2 * (5 - 1) * (4 - 1));
    assert_eq!(cloth.mesh.triangle_count(), 24);
    assert_eq!(cloth.mesh.indices.len(), 144);
    assert!(cloth.mesh.validate().is_ok());
}

#[test]
fn constraint_counts_match_formulas() {
    for rows in 2..8 {
        for cols in 2..8 {
            let cloth = build_grid_cloth(rows, cols, 0.5);
            let c = &cloth.constraints;
            assert_eq!(c.structural.len(), (cols - 1) * rows + cols * (rows - 1));
            assert_eq!(c.shear.len(), 2 * (cols - 1) * (rows - 1));
            assert_eq!(
                c.bend.len(),
                rows * cols.saturating_sub(2) + rows.saturating_sub(2) * cols
            );
        }
    }
}

#[test]
fn degenerate_dimensions_clamp_to_2x2() {
    let cloth = build_grid_cloth(1, 1, 1.0);
    assert_eq!((cloth.rows, cloth.cols), (2, 2));
    assert_eq!(cloth.mesh.vertex_count(), 4);
    assert_eq!(cloth.mesh.triangle_count(), 2);
    assert!(cloth.constraints.bend.is_empty());

    let zero = build_grid_cloth(0, 0, 1.0);
    assert_eq!(zero.mesh.vertex_count(), 4);
}

#[test]
fn rest_lengths_match_initial_positions() {
    let spacing = 0.25;
    let cloth = build_grid_cloth(5, 6, spacing);
    for (kind, set) in cloth.constraints.sets() {
        let expected = match kind {
            ConstraintKind::Structural => spacing,
            ConstraintKind::Shear => spacing * 2f32.sqrt(),
            ConstraintKind::Bend => 2.0 * spacing,
        };
        for c in set {
            let d = cloth.mesh.position(c.i.index()).distance(cloth.mesh.position(c.j.index()));
            assert!((c.rest_length - d).abs() < 1e-6);
            assert!((c.rest_length - expected).abs() < 1e-5, "{} rest {}", kind.name(), c.rest_length);
        }
    }
}

#[test]
fn constraints_reference_valid_particles() {
    let cloth = build_grid_cloth(7, 3, 1.0);
    let max = cloth.constraints.max_particle().unwrap();
    assert!(max.index() < cloth.mesh.vertex_count());
    assert_eq!(max, ParticleId(20));
}

#[test]
fn winding_faces_forward() {
    let cloth = build_grid_cloth(3, 3, 1.0);
    for tri in cloth.mesh.triangles() {
        let n = (tri.b - tri.a).cross(tri.c - tri.a);
        assert!(n.z > 0.0);
    }
}

#[test]
fn grid_is_placed_above_and_in_front() {
    let spec = GridClothSpec::new(4, 4, 0.1);
    let cloth = spec.build();
    let bottom = cloth.mesh.position(cloth.vertex_index(0, 0));
    assert!((bottom.y - spec.origin.y).abs() < 1e-6);
    assert!(bottom.z > 0.0);
    let top = cloth.mesh.position(cloth.vertex_index(3, 0));
    assert!((top.y - (spec.origin.y + 0.3)).abs() < 1e-5);
    // Rows are centred on the origin in X.
    let left = cloth.mesh.position(cloth.vertex_index(0, 0)).x;
    let right = cloth.mesh.position(cloth.vertex_index(0, 3)).x;
    assert!((left + right).abs() < 1e-6);
}

#[test]
fn tall_grid_starts_above_ground() {
    let cloth = build_grid_cloth(4, 4, 1.0);
    let min_y = cloth.mesh.bounds().unwrap().min.y;
    assert!((min_y - GRID_VERTICAL_OFFSET).abs() < 1e-6, "lowest row at {min_y}");
    for i in cloth.top_row() {
        assert!((cloth.mesh.position(i).y - (GRID_VERTICAL_OFFSET + 3.0)).abs() < 1e-5);
    }
}

#[test]
fn grid_with_origin() {
    let cloth = GridClothSpec::new(2, 3, 1.0)
        .with_origin(Vec3::new(0.0, 5.0, -1.0))
        .build();
    assert_eq!(cloth.mesh.position(0), Vec3::new(-1.0, 5.0, -1.0));
    assert_eq!(cloth.mesh.position(5), Vec3::new(1.0, 6.0, -1.0));
    assert_eq!(cloth.top_row(), 3..6);
}

#[test]
fn pattern_pins_top_row() {
    let pattern = ClothPattern {
        rows: 4,
        cols: 5,
        spacing: 0.1,
        pin_top_row: true,
    };
    let mask = pattern.pinned_mask();
    assert_eq!(mask.len(), 20);
    assert!(mask[15..].iter().all(|&p| p));
    assert!(mask[..15].iter().all(|&p| !p));

    // The pinned row is the highest one.
    let cloth = pattern.build();
    let pinned_y = cloth.mesh.position(15).y;
    assert!((0..20).all(|i| cloth.mesh.position(i).y <= pinned_y));

    let loose = ClothPattern { pin_top_row: false, ..pattern };
    assert!(loose.pinned_mask().iter().all(|&p| !p));
}

#[test]
fn pattern_mask_matches_clamped_grid() {
    let pattern = ClothPattern {
        rows: 1,
        cols: 1,
        spacing: 1.0,
        pin_top_row: true,
    };
    assert_eq!(pattern.pinned_mask().len(), pattern.build().mesh.vertex_count());
}

// ─── Body Generator Tests ─────────────────────────────────────

#[test]
fn uv_sphere_basic() {
    let mesh = uv_sphere(Vec3::ZERO, 1.0, 8, 16);
    assert!(mesh.vertex_count() > 0);
    assert!(mesh.triangle_count() > 0);
    assert!(mesh.validate().is_ok());
}

#[test]
fn uv_sphere_radius() {
    let center = Vec3::new(0.0, 1.0, 0.0);
    let mesh = uv_sphere(center, 2.5, 8, 16);
    for i in 0..mesh.vertex_count() {
        let dist = mesh.position(i).distance(center);
        assert!((dist - 2.5).abs() < 1e-4, "Vertex {} at distance {}", i, dist);
    }
}

#[test]
fn uv_sphere_faces_outward() {
    let mesh = uv_sphere(Vec3::ZERO, 1.0, 8, 16);
    for tri in mesh.triangles() {
        let n = (tri.b - tri.a).cross(tri.c - tri.a);
        let centroid = (tri.a + tri.b + tri.c) / 3.0;
        assert!(n.dot(centroid) > 0.0);
    }
}

#[test]
fn cuboid_is_closed_and_outward() {
    let mesh = cuboid(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate().is_ok());
    for tri in mesh.triangles() {
        let n = (tri.b - tri.a).cross(tri.c - tri.a);
        let centroid = (tri.a + tri.b + tri.c) / 3.0;
        assert!(n.dot(centroid) > 0.0);
    }
}
