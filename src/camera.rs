//! First-person camera and perspective projection.
//!
//! # Coordinate System
//!
//! View space is **left-handed**:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles in degrees.
//!
//! - **Yaw**: Rotation around Y-axis, kept in `[0, 360)` (positive = turn right)
//! - **Pitch**: Rotation around X-axis, clamped to `[-90, 90]` (positive = look down)
//!
//! At yaw 0 the camera looks along +Z and moving forward walks along +Z.
//!
//! # Screen mapping
//!
//! `fov` is the horizontal field of view. Projected points land in pixel
//! coordinates with `(0, 0)` at the **top-left** of the image: row 0 of the
//! frame buffer is the top row.

use crate::math::vec3::Vec3;

/// Degrees of rotation per pixel of mouse movement.
pub const MOUSE_SENSITIVITY: f64 = 0.16;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_FOV: f64 = 70.0;
pub const DEFAULT_NEAR: f64 = 0.0;
pub const DEFAULT_FAR: f64 = 100.0;

/// World units moved per input tick while a movement key is held.
pub const MOVE_STEP: f64 = 0.15;

/// Which movement keys are held during an input tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementKeys {
    /// Net direction along one axis; opposing keys cancel.
    #[inline]
    fn axis(positive: bool, negative: bool) -> f64 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Horizontal pixel coordinate (may fall outside the frame).
    pub x: f64,
    /// Vertical pixel coordinate, growing downward.
    pub y: f64,
    /// View-space depth along the camera's forward axis.
    pub depth: f64,
}

impl Projected {
    /// Integer pixel containing this point.
    pub fn pixel(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,
    fov: f64,
    near: f64,
    far: f64,

    // Fixed at construction.
    aspect: f64,
    h: f64,
    w: f64,

    position: Vec3,
    yaw: f64,
    pitch: f64,
}

impl Camera {
    /// Creates a camera at the origin looking along +Z.
    ///
    /// # Arguments
    /// * `width`, `height` - Image size in pixels
    /// * `fov` - Horizontal field of view in degrees
    /// * `near`, `far` - Depth range; points must satisfy `near < depth <= far`
    pub fn new(width: u32, height: u32, fov: f64, near: f64, far: f64) -> Self {
        let aspect = width as f64 / height as f64;
        let h = 1.0 / (fov.to_radians() / 2.0).tan();
        Self {
            width,
            height,
            fov,
            near,
            far,
            aspect,
            h,
            w: aspect * h,
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Turns the camera by a mouse movement in pixels.
    pub fn process_mouse_delta(&mut self, dx: f64, dy: f64) {
        self.set_yaw(self.yaw + dx * MOUSE_SENSITIVITY);
        self.set_pitch(self.pitch + dy * MOUSE_SENSITIVITY);
    }

    /// Moves the camera by `step` world units for one input tick.
    ///
    /// Walking and strafing stay in the horizontal plane picked by yaw; pitch
    /// never tilts movement. Flying up or down ignores orientation.
    pub fn process_keyboard(&mut self, step: f64, keys: &MovementKeys) {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let forward = MovementKeys::axis(keys.forward, keys.back) * step;
        let right = MovementKeys::axis(keys.right, keys.left) * step;
        let up = MovementKeys::axis(keys.up, keys.down) * step;

        self.position.x += forward * sin_yaw + right * cos_yaw;
        self.position.z += forward * cos_yaw - right * sin_yaw;
        self.position.y += up;
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Transforms a world-space point into view space.
    ///
    /// Applies the inverse of the camera pose: translate by `-position`, undo
    /// yaw around Y, then undo pitch around X.
    #[inline]
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        (world - self.position)
            .rotate_y(-self.yaw.to_radians())
            .rotate_x(-self.pitch.to_radians())
    }

    /// Projects a world-space point to pixel coordinates plus view depth.
    ///
    /// Returns `None` when the point is not strictly beyond the near plane or
    /// lies past the far plane.
    #[inline]
    pub fn project_vertex(&self, world: Vec3) -> Option<Projected> {
        let view = self.to_view(world);
        if view.z <= self.near || view.z > self.far {
            return None;
        }
        let xn = self.h * view.x / view.z;
        let yn = self.w * view.y / view.z;
        Some(Projected {
            x: (1.0 + xn) * self.width as f64 / 2.0,
            y: (1.0 - yn) * self.height as f64 / 2.0,
            depth: view.z,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal field of view in degrees.
    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Horizontal projection scale, `1 / tan(fov / 2)`.
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Vertical projection scale, `aspect * h`.
    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Yaw in degrees, in `[0, 360)`.
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Sets yaw in degrees, wrapping into `[0, 360)`.
    pub fn set_yaw(&mut self, yaw: f64) {
        let wrapped = yaw.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        self.yaw = if wrapped >= 360.0 { 0.0 } else { wrapped };
    }

    /// Pitch in degrees, in `[-90, 90]`.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Sets pitch in degrees, clamped to `[-90, 90]`.
    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch.clamp(-90.0, 90.0);
    }
}

// =============================================================================
// Tests
// =============================================================================
