//! Color types and the packed pixel format.
//!
//! # Pixel format
//!
//! A pixel is a `u32` laid out as `0xAABBGGRR`: red in the low byte, alpha in
//! the high byte. Written out little-endian, each pixel becomes the byte
//! sequence `R, G, B, A`, which is what `image::RgbaImage` and SDL's
//! `ABGR8888` texture format expect. Alpha is always opaque.

/// Cleared frame color: opaque black.
pub const BACKGROUND: u32 = 0xFF00_0000;

const ALPHA: u32 = 0xFF00_0000;

/// An 8-bit per channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales every channel by `intensity` (clamped to `[0, 1]`), truncating
    /// toward zero.
    #[inline]
    pub fn scale(self, intensity: f64) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f64 * k) as u8,
            g: (self.g as f64 * k) as u8,
            b: (self.b as f64 * k) as u8,
        }
    }

    /// Packs into the `0xAABBGGRR` pixel format.
    #[inline]
    pub fn pack(self) -> u32 {
        ALPHA | (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Splits a pixel back into its RGB channels.
#[inline]
pub fn unpack_color(pixel: u32) -> Rgb {
    Rgb {
        r: pixel as u8,
        g: (pixel >> 8) as u8,
        b: (pixel >> 16) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_is_bit_exact_abgr() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).pack(), 0xFF56_3412);
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).pack().to_le_bytes(), [0x12, 0x34, 0x56, 0xFF]);
    }

    #[test]
    fn background_is_opaque_black() {
        assert_eq!(Rgb::BLACK.pack(), BACKGROUND);
    }

    #[test]
    fn unpack_roundtrips_channels() {
        let color = Rgb::new(200, 100, 7);
        assert_eq!(unpack_color(color.pack()), color);
    }

    #[test]
    fn scale_truncates() {
        assert_eq!(Rgb::new(255, 100, 3).scale(0.5), Rgb::new(127, 50, 1));
        assert_eq!(Rgb::WHITE.scale(1.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.scale(-2.0), Rgb::BLACK);
    }
}
