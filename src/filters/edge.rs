//! Outline extraction: Sobel gradient magnitude on the luma plane.
//!
//! Steps:
//! 1. Reduce to grayscale (BT.601 luma, see [`super::grayscale`]).
//! 2. Correlate the interior of the plane with the 3x3 Sobel X and Y
//!    kernels. The 1-pixel border is not computed and keeps magnitude 0.
//! 3. `magnitude = sqrt(gx² + gy²)`, rescaled so the strongest edge maps to
//!    255. A plane without any gradient stays all zero.
//! 4. Samples whose rescaled magnitude exceeds [`OUTLINE_THRESHOLD`] keep
//!    that magnitude in all three channels; every other pixel becomes white.

use ndarray::{Array2, Array3};

use super::grayscale::luma_plane;
use super::kernel::{SOBEL_X, SOBEL_Y};
use crate::buffer::{PixelBuffer, CHANNELS};

/// Rescaled magnitudes at or below this value become background.
pub const OUTLINE_THRESHOLD: f64 = 50.0;

/// Sobel gradient magnitude of a single-channel plane.
///
/// Border rows and columns are left at 0.
pub fn sobel_magnitude(plane: &Array2<u8>) -> Array2<f64> {
    let (height, width) = plane.dim();
    let mut output = Array2::<f64>::zeros((height, width));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut gx = 0.0f64;
            let mut gy = 0.0f64;

            for ky in 0..3 {
                for kx in 0..3 {
                    let v = plane[[y + ky - 1, x + kx - 1]] as f64;
                    gx += v * SOBEL_X[ky][kx];
                    gy += v * SOBEL_Y[ky][kx];
                }
            }

            output[[y, x]] = (gx * gx + gy * gy).sqrt();
        }
    }

    output
}

/// Rescale magnitudes to 0-255 by the plane maximum.
pub fn normalize_magnitude(magnitude: &Array2<f64>) -> Array2<f64> {
    let max = magnitude.iter().copied().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return Array2::zeros(magnitude.dim());
    }
    magnitude.mapv(|m| m / max * 255.0)
}

/// Extract an outline drawing: edge strength on a white background.
pub fn outline(buffer: &PixelBuffer) -> PixelBuffer {
    let gray = luma_plane(buffer);
    let normalized = normalize_magnitude(&sobel_magnitude(&gray));

    let output = Array3::from_shape_fn((buffer.height(), buffer.width(), CHANNELS), |(y, x, _)| {
        let m = normalized[[y, x]];
        if m > OUTLINE_THRESHOLD {
            m as u8
        } else {
            255
        }
    });

    PixelBuffer::from_array_unchecked(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_edge(width: usize, height: usize, split: usize) -> PixelBuffer {
        let data = Array3::from_shape_fn((height, width, 3), |(_, x, _)| if x < split { 0 } else { 255 });
        PixelBuffer::from_array(data).unwrap()
    }

    #[test]
    fn test_sobel_magnitude_flat_is_zero() {
        let plane = Array2::<u8>::from_elem((5, 5), 128);
        assert!(sobel_magnitude(&plane).iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_sobel_magnitude_detects_vertical_edge() {
        let plane = Array2::from_shape_fn((5, 5), |(_, x)| if x < 2 { 0u8 } else { 100 });
        let mag = sobel_magnitude(&plane);

        // Column 1 straddles the step: |1*0 - 1*100| * (1 + 2 + 1) = 400
        assert_eq!(mag[[2, 1]], 400.0);
        assert_eq!(mag[[2, 2]], 400.0);
        assert_eq!(mag[[2, 3]], 0.0);
        // Border untouched
        assert_eq!(mag[[0, 1]], 0.0);
        assert_eq!(mag[[2, 0]], 0.0);
    }

    #[test]
    fn test_normalize_zero_plane() {
        let mag = Array2::<f64>::zeros((3, 3));
        assert!(normalize_magnitude(&mag).iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_outline_flat_image_is_white() {
        let buffer = PixelBuffer::filled(6, 6, [40, 80, 120]);
        let result = outline(&buffer);
        assert!(result.as_slice().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_outline_marks_edge_pixels() {
        let buffer = vertical_edge(6, 5, 3);
        let result = outline(&buffer);

        // Strongest response is rescaled to exactly 255 on both sides of the step.
        assert_eq!(result.pixel(2, 2), Some([255, 255, 255]));
        assert_eq!(result.pixel(3, 2), Some([255, 255, 255]));
        // Flat regions and borders are background.
        assert_eq!(result.pixel(1, 2), Some([255, 255, 255]));
        assert_eq!(result.pixel(0, 0), Some([255, 255, 255]));
    }

    #[test]
    fn test_outline_keeps_scaled_magnitude_above_threshold() {
        // Strong step at column 2, weak step at column 5.
        let data = Array3::from_shape_fn((5, 8, 3), |(_, x, _)| match x {
            0..=1 => 0u8,
            2..=4 => 200,
            _ => 250,
        });
        let buffer = PixelBuffer::from_array(data).unwrap();
        let result = outline(&buffer);

        // Strong edge magnitude 4 * 200 = 800, weak edge 4 * 50 = 200.
        // Rescaled weak edge = 200 / 800 * 255 = 63.75 -> kept as 63.
        assert_eq!(result.pixel(4, 2), Some([63, 63, 63]));
        assert_eq!(result.pixel(5, 2), Some([63, 63, 63]));
        assert_eq!(result.pixel(1, 2), Some([255, 255, 255]));
        // Inside the flat band: background.
        assert_eq!(result.pixel(3, 2), Some([255, 255, 255]));
    }

    #[test]
    fn test_outline_threshold_is_exclusive() {
        let banded = |far: u8| {
            let data = Array3::from_shape_fn((5, 8, 3), |(_, x, _)| match x {
                0..=1 => 0u8,
                2..=4 => if far == 240 { 200 } else { 255 },
                _ => far,
            });
            outline(&PixelBuffer::from_array(data).unwrap())
        };

        // Weak edge 4 * 50 against strong 4 * 255: exactly 50 after rescaling.
        let at_threshold = banded(205);
        assert_eq!(at_threshold.pixel(4, 2), Some([255, 255, 255]));
        assert_eq!(at_threshold.pixel(5, 2), Some([255, 255, 255]));

        // Weak edge 4 * 40 against strong 4 * 200: 51 after rescaling.
        let above = banded(240);
        assert_eq!(above.pixel(4, 2), Some([51, 51, 51]));
        assert_eq!(above.pixel(5, 2), Some([51, 51, 51]));
    }

    #[test]
    fn test_outline_tiny_image() {
        let buffer = PixelBuffer::filled(2, 1, [9, 9, 9]);
        let result = outline(&buffer);
        assert_eq!(result.as_slice(), &[255; 6]);
    }
}
