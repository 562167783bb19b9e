//! Color and depth storage for one frame.
//!
//! Both buffers are row-major with a stride of `width`: the pixel at `(x, y)`
//! lives at index `y * width + x`, and row 0 is the **top** of the image.
//! Colors use the packed `0xAABBGGRR` format described in [`crate::colors`].
//!
//! # Depth Buffer
//!
//! The depth buffer stores view-space depth (distance along the camera's
//! forward axis). Smaller values are closer to the camera. A render resets it
//! to the camera's far distance, so nothing beyond the far plane can pass the
//! depth test.

use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::colors::{self, Rgb};

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f64>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![f64::INFINITY; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fills every pixel with `color` and every depth with `depth`.
    pub fn clear(&mut self, color: u32, depth: f64) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(depth);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel and its depth are written only if `depth` is strictly smaller
    /// (nearer) than the stored value. Silently ignores out-of-bounds
    /// coordinates. Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f64, color: u32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Whether `depth` would pass the depth test at (x, y).
    #[inline]
    pub fn is_nearer(&self, x: i32, y: i32, depth: f64) -> bool {
        self.index(x, y)
            .is_some_and(|idx| depth < self.depth_buffer[idx])
    }

    /// Set a pixel without depth testing.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    pub fn colors(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f64] {
        &self.depth_buffer
    }

    /// The frame as `R, G, B, A` bytes, top row first.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|pixel| pixel.to_le_bytes())
            .collect()
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let pixel = self.color_buffer[(y * self.width + x) as usize];
            image::Rgba(pixel.to_le_bytes())
        })
    }

    /// Writes the frame to an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save(&path)?;
        info!("Saved {}x{} frame to {:?}", self.width, self.height, path.as_ref());
        Ok(())
    }

    /// Counts pixels that differ from `background`.
    pub fn covered_pixels(&self, background: u32) -> usize {
        self.color_buffer
            .iter()
            .filter(|&&pixel| pixel != background)
            .count()
    }

    /// RGB channels of the pixel at (x, y).
    pub fn rgb_at(&self, x: i32, y: i32) -> Option<Rgb> {
        self.get_pixel(x, y).map(colors::unpack_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_is_strict() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear(colors::BACKGROUND, 10.0);

        assert!(fb.set_pixel_with_depth(1, 1, 5.0, 0xFF00_00FF));
        assert!(!fb.set_pixel_with_depth(1, 1, 5.0, 0xFF00_FF00));
        assert!(!fb.set_pixel_with_depth(1, 1, 7.0, 0xFF00_FF00));
        assert!(fb.set_pixel_with_depth(1, 1, 4.0, 0xFFFF_0000));

        assert_eq!(fb.get_pixel(1, 1), Some(0xFFFF_0000));
        assert_eq!(fb.depth_at(1, 1), Some(4.0));
    }

    #[test]
    fn far_depth_rejects_equal_and_beyond() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.clear(colors::BACKGROUND, 100.0);
        assert!(!fb.set_pixel_with_depth(0, 0, 100.0, 0xFFFF_FFFF));
        assert!(!fb.set_pixel_with_depth(0, 0, 150.0, 0xFFFF_FFFF));
        assert_eq!(fb.covered_pixels(colors::BACKGROUND), 0);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(-1, 0, 0xFFFF_FFFF);
        fb.set_pixel(0, 2, 0xFFFF_FFFF);
        assert!(!fb.set_pixel_with_depth(2, 0, 0.0, 0xFFFF_FFFF));
        assert_eq!(fb.get_pixel(5, 5), None);
        assert_eq!(fb.covered_pixels(colors::BACKGROUND), 0);
    }

    #[test]
    fn row_major_top_first_bytes() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(1, 0, Rgb::new(1, 2, 3).pack());
        fb.set_pixel(0, 1, Rgb::new(4, 5, 6).pack());

        let bytes = fb.to_rgba_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 255]);
        assert_eq!(&bytes[8..12], &[4, 5, 6, 255]);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);

        let image = fb.to_image();
        assert_eq!(image.get_pixel(1, 0).0, [1, 2, 3, 255]);
        assert_eq!(image.as_raw(), &bytes);
    }
}
