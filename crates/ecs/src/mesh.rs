use glam::Vec3;

use crate::buffer::Vertex;

/// Vertices in the built-in cube mesh (6 faces, 2 triangles each).
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Face normal, then the in-plane `u` and `v` axes with `u × v = normal`.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Texture coordinates of the two counter-clockwise triangles of a face.
const FACE_CORNERS: [(f32, f32); 6] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
];

/// Unit cube centred on the origin, wound counter-clockwise, with per-face normals.
pub fn cube_vertices() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(CUBE_VERTEX_COUNT);
    for (normal, u, v) in FACES {
        for (s, t) in FACE_CORNERS {
            let p = normal * 0.5 + u * (s - 0.5) + v * (t - 0.5);
            out.push(Vertex {
                position: p.to_array(),
                texcoord: [s, t],
                normal: normal.to_array(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_expected_vertex_count() {
        assert_eq!(cube_vertices().len(), CUBE_VERTEX_COUNT);
    }

    #[test]
    fn cube_fits_unit_bounds() {
        for v in cube_vertices() {
            for c in v.position {
                assert!((-0.5..=0.5).contains(&c));
            }
        }
    }

    #[test]
    fn triangles_face_outwards() {
        let verts = cube_vertices();
        for tri in verts.chunks(3) {
            let a = Vec3::from_array(tri[0].position);
            let b = Vec3::from_array(tri[1].position);
            let c = Vec3::from_array(tri[2].position);
            let n = Vec3::from_array(tri[0].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }
}
