//! Core rendering pipeline.
//!
//! [`render`] turns a [`Model`], a [`Camera`] and a light position into a
//! complete frame. Each call clears the frame buffer first and fills it
//! completely before returning, so a frame depends only on its inputs.
//! [`Engine`] bundles a reusable frame buffer with the render options for
//! callers that draw every tick.

use std::time::Instant;

use log::debug;

use crate::camera::Camera;
use crate::colors;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::model::{Model, ShadingMode};
use crate::render::rasterizer::{FlatShader, GouraudShader, PhongShader};
use crate::render::{EdgeFunctionRasterizer, FrameBuffer, Triangle};

/// Settings that are not part of the scene itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Skip faces whose front side points away from the camera.
    pub backface_culling: bool,
    /// Minimum light intensity for lit shading modes.
    pub ambient_floor: f64,
    /// Color of pixels no triangle covers.
    pub background: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            backface_culling: true,
            ambient_floor: 0.0,
            background: colors::BACKGROUND,
        }
    }
}

/// What happened to the faces of one render call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub faces_drawn: usize,
    /// Faces without normals (zero-area geometry).
    pub faces_skipped: usize,
    /// Faces outside the depth range or the viewport.
    pub faces_clipped: usize,
    pub faces_culled: usize,
    pub pixels_written: usize,
}

/// Renders `model` as seen by `camera`, lit by a point light at
/// `light_position`, using the default [`RenderOptions`].
///
/// The frame buffer must have the camera's dimensions.
pub fn render(frame: &mut FrameBuffer, camera: &Camera, model: &Model, light_position: Vec3) {
    render_with_options(frame, camera, model, light_position, &RenderOptions::default());
}

pub fn render_with_options(
    frame: &mut FrameBuffer,
    camera: &Camera,
    model: &Model,
    light_position: Vec3,
    options: &RenderOptions,
) -> RenderStats {
    debug_assert_eq!(
        (frame.width(), frame.height()),
        (camera.width(), camera.height()),
        "Frame buffer size doesn't match camera"
    );

    let start = Instant::now();
    frame.clear(options.background, camera.far());

    let light = PointLight::with_ambient_floor(light_position, options.ambient_floor);
    let rasterizer = EdgeFunctionRasterizer::new();
    let vertices = model.vertices();
    let vertex_normals = model.vertex_normals();
    let offset = model.position();
    let base = model.color();
    let mut stats = RenderStats::default();

    for face in model.faces() {
        let (Some(face_normal), [Some(n0), Some(n1), Some(n2)]) =
            (face.face_normal, face.vertex_normals)
        else {
            stats.faces_skipped += 1;
            continue;
        };

        // Model Space --> World Space
        let corners = face.corners().map(|i| vertices[i as usize - 1] + offset);

        // World Space --> Screen Space; any corner outside (near, far] drops the face.
        let (Some(p0), Some(p1), Some(p2)) = (
            camera.project_vertex(corners[0]),
            camera.project_vertex(corners[1]),
            camera.project_vertex(corners[2]),
        ) else {
            stats.faces_clipped += 1;
            continue;
        };
        let triangle = Triangle::from_projected([p0, p1, p2]);

        if !triangle.overlaps_viewport(frame.width(), frame.height()) {
            stats.faces_clipped += 1;
            continue;
        }
        if options.backface_culling && triangle.signed_area() < 0.0 {
            stats.faces_culled += 1;
            continue;
        }

        let normals = [n0, n1, n2].map(|slot| vertex_normals[slot as usize - 1]);
        let written = match model.shading() {
            ShadingMode::None => {
                rasterizer.fill_triangle(&triangle, frame, &FlatShader::new(base.pack()))
            }
            ShadingMode::Flat => {
                let normal = model.face_normals()[face_normal as usize - 1];
                let shader = FlatShader::lit(base, &light, normal, corners);
                rasterizer.fill_triangle(&triangle, frame, &shader)
            }
            ShadingMode::Gouraud => {
                let shader = GouraudShader::new(base, &light, normals, corners);
                rasterizer.fill_triangle(&triangle, frame, &shader)
            }
            ShadingMode::Phong => {
                let shader = PhongShader::new(base, &light, normals, corners);
                rasterizer.fill_triangle(&triangle, frame, &shader)
            }
        };

        stats.faces_drawn += 1;
        stats.pixels_written += written;
    }

    debug!("Render ({}): {:?} {:?}", model.shading(), start.elapsed(), stats);
    stats
}

/// A frame buffer plus render options, reused across frames.
pub struct Engine {
    frame: FrameBuffer,
    options: RenderOptions,
    last_stats: RenderStats,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_options(width, height, RenderOptions::default())
    }

    pub fn with_options(width: u32, height: u32, options: RenderOptions) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            options,
            last_stats: RenderStats::default(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Renders one frame, resizing the buffer first if the camera's
    /// dimensions changed.
    pub fn render(
        &mut self,
        camera: &Camera,
        model: &Model,
        light_position: Vec3,
    ) -> &FrameBuffer {
        if (self.frame.width(), self.frame.height()) != (camera.width(), camera.height()) {
            self.frame.resize(camera.width(), camera.height());
        }
        self.last_stats =
            render_with_options(&mut self.frame, camera, model, light_position, &self.options);
        &self.frame
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}
