use glam::Vec3;

use super::{MeshAsset, Vertex};

/// Faces as (outward normal, tangent u, tangent v); `u x v == normal`.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Axis-aligned cube spanning `[-1, 1]` on every axis.
///
/// 24 vertices (4 per face, flat normals), 12 triangles. Each face maps the
/// full `[0, 1]` UV square. Triangles `2f` and `2f + 1` belong to face `f`.
pub fn cube() -> MeshAsset {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (n, u, v)) in FACES.iter().enumerate() {
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (su, sv) in corners {
            let p = *n + *u * su + *v * sv;
            vertices.push(Vertex::new(
                p.to_array(),
                n.to_array(),
                [(su + 1.0) * 0.5, (sv + 1.0) * 0.5],
            ));
        }

        let base = face as u32 * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    // Static data: 24 vertices and in-range indices always validate.
    match MeshAsset::from_vertices(&vertices, indices) {
        Ok(mesh) => mesh,
        Err(e) => unreachable!("built-in cube failed validation: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_triangles() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn cube_corners_lie_on_unit_box() {
        let mesh = cube();
        for i in 0..mesh.vertex_count() as u32 {
            let p = mesh.position(i);
            assert_eq!(p.abs(), Vec3::ONE);
        }
    }

    #[test]
    fn cube_windings_face_outward() {
        let mesh = cube();
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            let (pa, pb, pc) = (mesh.position(a), mesh.position(b), mesh.position(c));
            let geometric = (pb - pa).cross(pc - pa).normalize();
            assert!(geometric.dot(mesh.normal(a)) > 0.99, "triangle {t}");
        }
    }
}
