//! Output image buffer.

use prism_core::Color;

/// Clamp each channel to [0, 1].
pub fn clamp_color(color: Color) -> Color {
    color.clamp(Color::ZERO, Color::ONE)
}

/// A width x height grid of colors, stored row-major with row 0 at the
/// top of the picture.
///
/// Everything upstream works in unclamped linear values; only the final
/// pixel store clamps.
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Store a pixel at (x, y), clamping each channel to [0, 1].
    pub fn put(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = clamp_color(color);
    }

    /// Row-major pixel storage.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable row-major pixel storage, for renderers that write whole
    /// rows at a time.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Convert to 8-bit RGBA bytes for display or saving.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            let c = clamp_color(*color);
            bytes.push((c.x * 255.0) as u8);
            bytes.push((c.y * 255.0) as u8);
            bytes.push((c.z * 255.0) as u8);
            bytes.push(255);
        }
        bytes
    }
}
