//! Raw mesh geometry and OBJ loading.
//!
//! [`MeshData`] is the hand-off point between file parsing and the renderer:
//! plain vertex positions plus 1-based triangle index triples. Loading goes
//! through `tobj`, which ignores statements other than geometry and
//! triangulates polygons. `tobj` splits the file into one model per `g`/`o`
//! group, so identical positions are welded back into a single vertex and
//! vertex normals stay smooth across group boundaries.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::math::vec3::Vec3;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read mesh file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh contains no triangles")]
    Empty,
}

/// Vertex positions and 1-based triangle corner indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

/// Cube faces wound so every normal points outward.
pub const CUBE_FACES: [[u32; 3]; 12] = [
    // Front face
    [1, 2, 3],
    [1, 3, 4],
    // Right face
    [4, 3, 5],
    [4, 5, 6],
    // Back face
    [6, 5, 7],
    [6, 7, 8],
    // Left face
    [8, 7, 2],
    [8, 2, 1],
    // Top face
    [2, 7, 5],
    [2, 5, 3],
    // Bottom face
    [6, 8, 1],
    [6, 1, 4],
];

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

impl MeshData {
    /// A 2×2×2 cube centered on the origin.
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
        }
    }

    /// Loads and validates an OBJ file. All objects in the file are merged
    /// into one mesh.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mesh = Self::from_obj_reader(&mut data.as_slice())?;
        info!(
            "Loaded {:?}: {} vertices, {} faces",
            path,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Parses and validates OBJ text from a reader. Material libraries are
    /// not loaded.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Ok(Default::default()))?;
        Self::from_models(&models)
    }

    fn from_models(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut mesh = MeshData::default();
        // Position bit pattern -> 1-based vertex id.
        let mut ids: HashMap<[u64; 3], u32> = HashMap::new();
        for model in models {
            let local: Vec<u32> = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| {
                    let key = [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()];
                    *ids.entry(key).or_insert_with(|| {
                        mesh.vertices.push(Vec3::new(p[0], p[1], p[2]));
                        mesh.vertices.len() as u32
                    })
                })
                .collect();

            for t in model.mesh.indices.chunks_exact(3) {
                let mut face = [0; 3];
                for (slot, &index) in face.iter_mut().zip(t) {
                    *slot = local.get(index as usize).copied().ok_or_else(|| {
                        LoadError::IndexOutOfRange {
                            face: mesh.faces.len() + 1,
                            index: index + 1,
                            vertex_count: local.len(),
                        }
                    })?;
                }
                mesh.faces.push(face);
            }
        }
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks that every face corner names an existing vertex.
    ///
    /// The renderer does not bounds-check indices, so untrusted geometry
    /// should pass through here before becoming a [`crate::Model`].
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.faces.is_empty() {
            return Err(LoadError::Empty);
        }
        let vertex_count = self.vertices.len();
        for (face, corners) in self.faces.iter().enumerate() {
            if let Some(&index) = corners
                .iter()
                .find(|&&i| i == 0 || i as usize > vertex_count)
            {
                return Err(LoadError::IndexOutOfRange {
                    face: face + 1,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    #[test]
    fn parses_triangles_and_quads() {
        let obj = "\
# a square and a triangle
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
f 1 2 3 4
f 1 2 5
";
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.faces.len(), 3);
        assert_eq!(mesh.vertices[2], Vec3::new(1.0, 1.0, 0.0));
        assert!(mesh.faces.iter().flatten().all(|&i| (1..=5).contains(&i)));
        assert_eq!(mesh.faces[2], [1, 2, 5]);
    }

    #[test]
    fn faces_with_normals_and_uvs_keep_positions_shared() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vn 0 0 1
vt 0 0
f 1/1/1 2/1/1 3/1/1
f 2/1/1 4/1/1 3/1/1
";
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[1, 2, 3], [2, 4, 3]]);
    }

    #[test]
    fn groups_sharing_an_edge_share_vertices() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 1
g a
f 1 2 3
g b
f 2 4 3
";
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[1, 2, 3], [2, 4, 3]]);

        // The shared edge gets one smoothed normal per vertex.
        let model = crate::Model::from_mesh(mesh, crate::NormalWeighting::Mean);
        let normals = model.vertex_normals();
        let a = model.face_normals()[0];
        let b = model.face_normals()[1];
        let expected = ((a + b) / 2.0).normalize();
        assert_relative_eq!(normals[1].x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(normals[1].y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(normals[1].z, expected.z, epsilon = 1e-12);
        assert_eq!(normals[1], normals[2]);
    }

    #[test]
    fn positions_keep_double_precision() {
        let obj = "v 0.1 0.2 0.3\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.vertices[0], Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn directory_path_is_io_error() {
        let err = MeshData::from_obj(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn mesh_without_faces_is_rejected() {
        let obj = "v 0 0 0\nv 1 0 0\n";
        let err = MeshData::from_obj_reader(&mut Cursor::new(obj)).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MeshData::from_obj("/nonexistent/mesh.obj").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn validate_catches_bad_indices() {
        let mut mesh = MeshData::cube();
        assert!(mesh.validate().is_ok());

        mesh.faces.push([1, 2, 9]);
        match mesh.validate() {
            Err(LoadError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            }) => {
                assert_eq!((face, index, vertex_count), (13, 9, 8));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        mesh.faces.pop();
        mesh.faces.push([0, 1, 2]);
        assert!(mesh.validate().is_err());
    }
}
