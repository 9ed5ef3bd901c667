//! Grayscale conversion.
//!
//! Uses ITU-R BT.601 luma coefficients applied to the buffer's B, G, R
//! channel order: `gray = 0.114·B + 0.587·G + 0.299·R`, clamped to 0-255 and
//! truncated.

use ndarray::{Array2, Array3, ArrayView3};

use crate::buffer::{PixelBuffer, BLUE, CHANNELS, GREEN, RED};

/// ITU-R BT.601 luma coefficients
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

#[inline]
fn luma(b: u8, g: u8, r: u8) -> u8 {
    let gray = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
    gray.clamp(0.0, 255.0) as u8
}

fn luma_of(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    Array2::from_shape_fn((height, width), |(y, x)| {
        luma(input[[y, x, BLUE]], input[[y, x, GREEN]], input[[y, x, RED]])
    })
}

/// Reduce a buffer to a single luma plane of shape `(height, width)`.
pub fn luma_plane(buffer: &PixelBuffer) -> Array2<u8> {
    luma_of(buffer.view())
}

/// Convert to grayscale, keeping three channels with B = G = R = luma.
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    let plane = luma_plane(buffer);
    let output = Array3::from_shape_fn((buffer.height(), buffer.width(), CHANNELS), |(y, x, _)| {
        plane[[y, x]]
    });
    PixelBuffer::from_array_unchecked(output)
}
