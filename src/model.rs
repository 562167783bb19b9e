//! A renderable triangle mesh with precomputed normals.
//!
//! Geometry and normals are fixed once the [`Model`] is built. Only the world
//! position, base color and shading mode may change between frames, so a
//! model can be shared read-only between renders.

use std::time::Instant;

use log::{debug, warn};

use crate::adjacency::AdjacencyTable;
use crate::colors::Rgb;
use crate::face::Face;
use crate::math::vec3::Vec3;
use crate::mesh::MeshData;
use crate::normals::{self, NormalWeighting};

/// Lighting fidelity used when rasterizing a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Base color, no lighting.
    #[default]
    None,
    /// One Lambert intensity per face.
    Flat,
    /// Lambert intensity per vertex, interpolated across the face.
    Gouraud,
    /// Vertex normals interpolated and lit per pixel.
    Phong,
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::None => write!(f, "None"),
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Gouraud => write!(f, "Gouraud"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}

pub struct Model {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    face_normals: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
    adjacency: AdjacencyTable,

    position: Vec3,
    color: Rgb,
    shading: ShadingMode,
}

impl Model {
    /// Builds a model from raw geometry using mean-weighted vertex normals.
    ///
    /// Face corners are 1-based and must reference existing vertices; use
    /// [`MeshData::validate`] on untrusted input first.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self::with_weighting(vertices, faces, NormalWeighting::default())
    }

    pub fn with_weighting(
        vertices: Vec<Vec3>,
        mut faces: Vec<Face>,
        weighting: NormalWeighting,
    ) -> Self {
        let start = Instant::now();
        let face_normals = normals::compute_face_normals(&vertices, &mut faces);
        debug!("Face normals: {:?}", start.elapsed());

        let start = Instant::now();
        let adjacency = AdjacencyTable::build(&faces, vertices.len());
        debug!(
            "Adjacent faces: {:?} (max degree {})",
            start.elapsed(),
            adjacency.degree()
        );

        let start = Instant::now();
        let vertex_normals = normals::compute_vertex_normals(
            &vertices,
            &mut faces,
            &face_normals,
            &adjacency,
            weighting,
        );
        debug!("Vertex normals: {:?}", start.elapsed());

        let degenerate = faces.iter().filter(|f| f.face_normal.is_none()).count();
        if degenerate > 0 {
            warn!("{degenerate} zero-area faces will not be rendered");
        }

        Self {
            vertices,
            faces,
            face_normals,
            vertex_normals,
            adjacency,
            position: Vec3::ZERO,
            color: Rgb::WHITE,
            shading: ShadingMode::default(),
        }
    }

    pub fn from_mesh(mesh: MeshData, weighting: NormalWeighting) -> Self {
        let faces = mesh.faces.into_iter().map(Face::from).collect();
        Self::with_weighting(mesh.vertices, faces, weighting)
    }

    // ============ Geometry ============

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    pub fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    // ============ Per-frame state ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) -> &mut Self {
        self.color = color;
        self
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    pub fn set_shading(&mut self, shading: ShadingMode) -> &mut Self {
        self.shading = shading;
        self
    }
}
