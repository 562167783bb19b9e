//! A CPU-based software renderer for triangle meshes.
//!
//! Meshes are turned into a [`Model`] once (face normals, vertex adjacency and
//! vertex normals are computed up front), then drawn every frame from a
//! first-person [`Camera`] with a depth buffer and one of four shading modes.
//! SDL2 is used only by the optional `window` feature for display and input.
//!
//! # Quick Start
//!
//! ```no_run
//! use projection3d::prelude::*;
//!
//! let mut model = Model::from_mesh(MeshData::cube(), NormalWeighting::Mean);
//! model.set_position(Vec3::new(0.0, 0.0, 5.0)).set_shading(ShadingMode::Phong);
//!
//! let camera = Camera::new(800, 600, 70.0, 0.0, 100.0);
//! let mut frame = FrameBuffer::new(800, 600);
//! render(&mut frame, &camera, &model, camera.position());
//! frame.save("cube.png")?;
//! # Ok::<(), image::ImageError>(())
//! ```

// Public API - exposed to library consumers
pub mod adjacency;
pub mod camera;
pub mod colors;
pub mod engine;
pub mod face;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod normals;
pub mod render;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, MovementKeys, Projected};
pub use engine::{render, render_with_options, Engine, RenderOptions, RenderStats};
pub use face::Face;
pub use mesh::{LoadError, MeshData};
pub use model::{Model, ShadingMode};
pub use normals::NormalWeighting;
pub use render::FrameBuffer;

/// Prelude module for convenient imports.
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, MovementKeys, MOUSE_SENSITIVITY};

    // Pipeline
    pub use crate::engine::{render, render_with_options, Engine, RenderOptions};

    // Geometry
    pub use crate::mesh::{LoadError, MeshData};
    pub use crate::model::{Model, ShadingMode};
    pub use crate::normals::NormalWeighting;

    // Math & color
    pub use crate::colors::Rgb;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::FrameBuffer;

    // Window & Input
    #[cfg(feature = "window")]
    pub use crate::window::{FpsCounter, FrameLimiter, InputState, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::{
        EdgeFunctionRasterizer, FlatShader, GouraudShader, PhongShader, Triangle,
    };
    pub use crate::render::FrameBuffer;
}
