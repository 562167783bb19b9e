//! Face and vertex normal computation.
//!
//! # Winding
//!
//! Faces are wound counter-clockwise when seen from their front side, so the
//! face normal is `normalize((v1 - v0) × (v2 - v0))` by the right-hand rule and
//! points out of the front. The rasterizer uses the same convention for
//! backface culling.
//!
//! Degenerate input never produces NaN: a zero-area triangle gets the zero
//! normal and keeps its face-normal slot unset, and a vertex touched by no
//! face gets the zero normal.

use crate::adjacency::AdjacencyTable;
use crate::face::Face;
use crate::math::vec3::Vec3;

/// How adjacent face normals are combined into a vertex normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalWeighting {
    /// Plain arithmetic mean of the adjacent face normals.
    #[default]
    Mean,
    /// Each face weighted by its area.
    Area,
    /// Each face weighted by the angle of its corner at the vertex.
    Angle,
}

/// Unnormalized face normal; its length is twice the triangle's area.
#[inline]
fn face_cross(vertices: &[Vec3], face: &Face) -> Vec3 {
    let v0 = vertices[face.a as usize - 1];
    let v1 = vertices[face.b as usize - 1];
    let v2 = vertices[face.c as usize - 1];
    (v1 - v0).cross(v2 - v0)
}

/// Computes one normal per face and assigns each non-degenerate face its
/// face-normal slot (the slot id is the 1-based face id).
pub fn compute_face_normals(vertices: &[Vec3], faces: &mut [Face]) -> Vec<Vec3> {
    faces
        .iter_mut()
        .enumerate()
        .map(|(i, face)| {
            let normal = face_cross(vertices, face).normalize();
            face.face_normal = (normal != Vec3::ZERO).then_some(i as u32 + 1);
            normal
        })
        .collect()
}

/// Computes one normal per vertex from the normals of its adjacent faces.
///
/// Must run after [`compute_face_normals`]. Every face listed in the table
/// gets the vertex-normal slot of each of its corners filled (the slot id is
/// the 1-based vertex id).
pub fn compute_vertex_normals(
    vertices: &[Vec3],
    faces: &mut [Face],
    face_normals: &[Vec3],
    adjacency: &AdjacencyTable,
    weighting: NormalWeighting,
) -> Vec<Vec3> {
    (0..vertices.len())
        .map(|v| {
            let vertex_id = v as u32 + 1;
            let mut sum = Vec3::ZERO;
            let mut count = 0usize;

            for face_id in adjacency.faces_of(v) {
                let face = &mut faces[face_id as usize - 1];
                let Some(corner) = face.corner_of(vertex_id) else {
                    continue;
                };
                face.vertex_normals[corner] = Some(vertex_id);

                let weight = match weighting {
                    NormalWeighting::Mean => 1.0,
                    NormalWeighting::Area => face_cross(vertices, face).magnitude() * 0.5,
                    NormalWeighting::Angle => corner_angle(vertices, face, corner),
                };
                sum += face_normals[face_id as usize - 1] * weight;
                count += 1;
            }

            if count == 0 {
                return Vec3::ZERO;
            }
            (sum / count as f64).normalize()
        })
        .collect()
}

/// Interior angle of `face` at the given corner, in radians.
fn corner_angle(vertices: &[Vec3], face: &Face, corner: usize) -> f64 {
    let ids = face.corners();
    let at = vertices[ids[corner] as usize - 1];
    let next = vertices[ids[(corner + 1) % 3] as usize - 1];
    let prev = vertices[ids[(corner + 2) % 3] as usize - 1];
    (next - at).angle_between(prev - at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn build(vertices: &[Vec3], faces: &mut [Face], weighting: NormalWeighting) -> Vec<Vec3> {
        let face_normals = compute_face_normals(vertices, faces);
        let adjacency = AdjacencyTable::build(faces, vertices.len());
        compute_vertex_normals(vertices, faces, &face_normals, &adjacency, weighting)
    }

    #[test]
    fn ccw_triangle_faces_positive_z() {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mut faces = [Face::new(1, 2, 3)];
        let normals = compute_face_normals(&vertices, &mut faces);

        assert_eq!(normals[0], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(faces[0].face_normal, Some(1));
    }

    #[test]
    fn face_normals_have_unit_length() {
        let vertices = [
            Vec3::new(0.3, -2.0, 5.0),
            Vec3::new(7.0, 1.5, -1.0),
            Vec3::new(-4.0, 3.0, 0.25),
            Vec3::new(0.0, 0.0, 100.0),
        ];
        let mut faces = [Face::new(1, 2, 3), Face::new(2, 4, 3), Face::new(4, 1, 2)];
        for normal in compute_face_normals(&vertices, &mut faces) {
            assert_relative_eq!(normal.magnitude(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_area_triangle_gets_zero_normal() {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        ];
        let mut faces = [Face::new(1, 2, 3)];
        let normals = build(&vertices, &mut faces, NormalWeighting::Mean);

        assert_eq!(normals, vec![Vec3::ZERO; 3]);
        assert_eq!(faces[0].face_normal, None);
        assert!(!faces[0].is_renderable());
    }

    #[test]
    fn coplanar_fan_vertex_normal_matches_face_normal() {
        // Square split into four triangles around a center vertex, all in z = 2.
        let vertices = [
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::new(-1.0, 1.0, 2.0),
        ];
        let mut faces = [
            Face::new(1, 2, 3),
            Face::new(1, 3, 4),
            Face::new(1, 4, 5),
            Face::new(1, 5, 2),
        ];
        for weighting in [
            NormalWeighting::Mean,
            NormalWeighting::Area,
            NormalWeighting::Angle,
        ] {
            let normals = build(&vertices, &mut faces.clone(), weighting);
            assert_relative_eq!(normals[0].x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(normals[0].y, 0.0, epsilon = 1e-12);
            assert_relative_eq!(normals[0].z, 1.0, epsilon = 1e-12);
        }

        build(&vertices, &mut faces, NormalWeighting::Mean);
        assert!(faces.iter().all(Face::is_renderable));
        assert_eq!(faces[1].vertex_normals, [Some(1), Some(3), Some(4)]);
    }

    #[test]
    fn unused_vertex_gets_zero_normal() {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        let mut faces = [Face::new(1, 2, 3)];
        let normals = build(&vertices, &mut faces, NormalWeighting::Mean);
        assert_eq!(normals[3], Vec3::ZERO);
    }

    #[test]
    fn mean_weighting_ignores_triangle_size() {
        // Edge shared by a large +Z face and a small +X face.
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.1),
        ];
        let mut faces = [Face::new(1, 3, 2), Face::new(1, 2, 4)];
        let mean = build(&vertices, &mut faces.clone(), NormalWeighting::Mean);
        let area = build(&vertices, &mut faces, NormalWeighting::Area);

        let diagonal = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert_relative_eq!(mean[0].x.abs(), diagonal.x, epsilon = 1e-12);
        assert_relative_eq!(mean[0].z.abs(), diagonal.z, epsilon = 1e-12);
        assert!(area[0].z.abs() > area[0].x.abs());
    }
}
