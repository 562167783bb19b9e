//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's bounding box and clip it to the frame
//! 2. For each pixel center in the box, evaluate the three edge functions
//! 3. A pixel is inside the triangle if all edge functions share the sign of
//!    the triangle's signed area
//!
//! # Barycentric Coordinates
//!
//! The edge function values are proportional to screen-space barycentric
//! coordinates:
//!
//! ```text
//! lambda_i = E_i(P) / (E_0 + E_1 + E_2)
//! ```
//!
//! Where E_i is the edge function for the edge opposite to vertex i.
//!
//! # Perspective Correction
//!
//! Screen-space weights are not linear in view space. Depth is recovered as
//! `z = 1 / Σ(lambda_i / z_i)` and the shader receives the corrected weights
//! `lambda_i * z / z_i`, which are linear across the triangle in world space.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::PixelShader;
use super::{edge_function, Triangle};
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Signed areas below this are treated as degenerate.
const MIN_AREA: f64 = 1e-12;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates over all pixels in the triangle's bounding box and uses edge
/// functions to decide coverage. Handles both windings; culling is the
/// caller's decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// Rasterizes `triangle` into `buffer`, coloring covered pixels that pass
    /// the depth test with `shader`.
    ///
    /// Returns the number of pixels written. Degenerate triangles write
    /// nothing.
    pub fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        let [v0, v1, v2] = triangle.points;

        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Compute bounding box, clipped to the frame
        // ─────────────────────────────────────────────────────────────────────
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Signed area (2x triangle area)
        // ─────────────────────────────────────────────────────────────────────
        let area = triangle.signed_area();
        if area.abs() < MIN_AREA {
            return 0;
        }
        let inv_area = 1.0 / area;
        let inv_depth = [1.0 / v0.z, 1.0 / v1.z, 1.0 / v2.z];

        // ─────────────────────────────────────────────────────────────────────
        // Step 3: Iterate over all pixels in bounding box
        // ─────────────────────────────────────────────────────────────────────
        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let p = Vec3::new(x as f64 + 0.5, y as f64 + 0.5, 0.0);

                let w0 = edge_function(v1, v2, p);
                let w1 = edge_function(v2, v0, p);
                let w2 = edge_function(v0, v1, p);

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if !inside {
                    continue;
                }

                let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
                let depth_weights = [
                    lambda[0] * inv_depth[0],
                    lambda[1] * inv_depth[1],
                    lambda[2] * inv_depth[2],
                ];
                let depth = 1.0 / (depth_weights[0] + depth_weights[1] + depth_weights[2]);

                // Skip shading for occluded pixels.
                if !buffer.is_nearer(x, y, depth) {
                    continue;
                }

                let corrected = depth_weights.map(|w| w * depth);
                if buffer.set_pixel_with_depth(x, y, depth, shader.shade(corrected)) {
                    written += 1;
                }
            }
        }
        written
    }
}
