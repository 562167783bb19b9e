//! Triangle rasterization.
//!
//! The rasterizer owns coverage, depth interpolation and the depth test;
//! per-pixel color comes from a [`PixelShader`].

mod edgefunction;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use shader::{FlatShader, GouraudShader, PhongShader, PixelShader};

use crate::camera::Projected;
use crate::math::vec3::Vec3;

/// A triangle ready for rasterization in screen space.
///
/// `x`/`y` are pixel coordinates and `z` is the view-space depth of each
/// corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
}

impl Triangle {
    pub fn new(points: [Vec3; 3]) -> Self {
        Self { points }
    }

    pub fn from_projected(projected: [Projected; 3]) -> Self {
        Self::new(projected.map(|p| Vec3::new(p.x, p.y, p.depth)))
    }

    /// Twice the signed screen-space area.
    ///
    /// Positive when the triangle's front side (see [`crate::normals`]) faces
    /// the camera, negative for back faces, zero for degenerate triangles.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        let [v0, v1, v2] = self.points;
        edge_function(v0, v1, v2)
    }

    /// Whether the screen bounding box overlaps a `width × height` viewport.
    pub fn overlaps_viewport(&self, width: u32, height: u32) -> bool {
        let [v0, v1, v2] = self.points;
        let min_x = v0.x.min(v1.x).min(v2.x);
        let max_x = v0.x.max(v1.x).max(v2.x);
        let min_y = v0.y.min(v1.y).min(v2.y);
        let max_y = v0.y.max(v1.y).max(v2.y);
        max_x >= 0.0 && min_x < width as f64 && max_y >= 0.0 && min_y < height as f64
    }
}

/// Edge function for point P relative to edge (A -> B).
///
/// ```text
/// E(P) = (B.x - A.x) * (P.y - A.y) - (B.y - A.y) * (P.x - A.x)
/// ```
///
/// This is the 2D cross product (B - A) × (P - A) in pixel coordinates.
#[inline]
pub(crate) fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
