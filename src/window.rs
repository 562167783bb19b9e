//! SDL2 presenter for interactive viewing.
//!
//! The window only shows finished frames and translates input into
//! [`MovementKeys`] and mouse deltas; all rendering happens in
//! [`crate::engine`].

use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::camera::MovementKeys;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Input gathered during one call to [`Window::poll_events`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Relative mouse motion in pixels; only collected while grabbed.
    pub mouse_delta: (i32, i32),
    pub keys: MovementKeys,
    pub grabbed: bool,
}

impl InputState {
    /// Movement keys that should drive the camera. Nothing moves while the
    /// mouse is released.
    pub fn movement(&self) -> MovementKeys {
        if self.grabbed {
            self.keys
        } else {
            MovementKeys::default()
        }
    }
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Frames-per-second over a rolling one second window.
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: f64,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    /// Counts one frame. Returns the new rate once per second.
    pub fn tick(&mut self) -> Option<f64> {
        self.frames += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        self.fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = Instant::now();
        Some(self.fps)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

// Field order matters: the texture borrows from `texture_creator` and must be
// dropped first.
pub struct Window {
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    sdl_context: sdl2::Sdl,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            sdl_context,
            width,
            height,
        })
    }

    /// Streaming texture whose byte layout matches [`crate::FrameBuffer::to_rgba_bytes`].
    fn create_texture(
        texture_creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: texture_creator is heap-allocated and lives as long as Window,
        // and the texture field is dropped before it.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending events into `input`.
    ///
    /// `G` toggles mouse grab. While grabbed the cursor is hidden and relative
    /// motion accumulates into `input.mouse_delta`. Movement keys are sampled
    /// from the keyboard state after the queue is empty.
    pub fn poll_events(&mut self, input: &mut InputState) -> WindowEvent {
        input.mouse_delta = (0, 0);
        let mut result = WindowEvent::None;

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(Keycode::G),
                    repeat: false,
                    ..
                } => {
                    input.grabbed = !input.grabbed;
                    self.sdl_context.mouse().set_relative_mouse_mode(input.grabbed);
                }
                Event::MouseMotion { xrel, yrel, .. } if input.grabbed => {
                    input.mouse_delta.0 += xrel;
                    input.mouse_delta.1 += yrel;
                }
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => result = WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }

        let state = self.event_pump.keyboard_state();
        input.keys = MovementKeys {
            forward: state.is_scancode_pressed(Scancode::W),
            back: state.is_scancode_pressed(Scancode::S),
            left: state.is_scancode_pressed(Scancode::A),
            right: state.is_scancode_pressed(Scancode::D),
            up: state.is_scancode_pressed(Scancode::Space),
            down: state.is_scancode_pressed(Scancode::LShift),
        };
        result
    }

    /// Shows a frame of RGBA bytes, top row first.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
