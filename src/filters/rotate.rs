//! Arbitrary-angle rotation with nearest-neighbor sampling.
//!
//! ## Rotation Direction
//!
//! A positive angle rotates the visible content **counter-clockwise** on
//! screen (rows grow downward), negative angles rotate clockwise. For
//! example `rotate(img, 90.0)` moves the right edge of the image to the top.
//!
//! ## Mapping
//!
//! Every destination pixel is inverse-mapped into the source: its offset
//! from the destination center `(dst_w / 2, dst_h / 2)` is multiplied by
//!
//! ```text
//! | cos θ  -sin θ |
//! | sin θ   cos θ |
//! ```
//!
//! and added to the source center `(w / 2, h / 2)`. The result is truncated
//! toward zero. Destinations that land outside the source keep the zero
//! background pixel.

use log::debug;
use ndarray::parallel::prelude::*;
use ndarray::{Array3, Axis};

use crate::buffer::{PixelBuffer, CHANNELS};

/// `(sin θ, cos θ)` for an angle in degrees, exact for multiples of 90 so
/// quarter and half turns map pixel centers without truncation drift.
pub(crate) fn sin_cos_degrees(angle_degrees: f64) -> (f64, f64) {
    let turn = angle_degrees.rem_euclid(360.0);
    if turn == 0.0 {
        (0.0, 1.0)
    } else if turn == 90.0 {
        (1.0, 0.0)
    } else if turn == 180.0 {
        (0.0, -1.0)
    } else if turn == 270.0 {
        (-1.0, 0.0)
    } else {
        angle_degrees.to_radians().sin_cos()
    }
}

/// Canvas size that fully contains a `width x height` image rotated by
/// `angle_degrees`: `ceil(|w·cos θ| + |h·sin θ|)` by `ceil(|w·sin θ| + |h·cos θ|)`.
pub fn rotated_dimensions(width: usize, height: usize, angle_degrees: f64) -> (usize, usize) {
    let (sin, cos) = sin_cos_degrees(angle_degrees);
    let (w, h) = (width as f64, height as f64);

    let new_w = (w * cos).abs() + (h * sin).abs();
    let new_h = (w * sin).abs() + (h * cos).abs();

    (
        new_w.ceil() as usize,
        new_h.ceil() as usize,
    )
}

/// Rotate onto an expanded canvas that holds the whole rotated image.
///
/// # Arguments
/// * `buffer` - Source image
/// * `angle_degrees` - Counter-clockwise rotation in degrees
///
/// # Returns
/// New buffer sized by [`rotated_dimensions`], zero outside the image
pub fn rotate(buffer: &PixelBuffer, angle_degrees: f64) -> PixelBuffer {
    let (new_w, new_h) = rotated_dimensions(buffer.width(), buffer.height(), angle_degrees);
    debug!(
        "rotating {}x{} buffer by {} degrees onto {}x{} canvas",
        buffer.width(),
        buffer.height(),
        angle_degrees,
        new_w,
        new_h
    );
    rotate_onto(buffer, angle_degrees, new_w, new_h)
}

/// Rotate within the original canvas; corners that leave the frame are cut.
pub fn rotate_cropped(buffer: &PixelBuffer, angle_degrees: f64) -> PixelBuffer {
    debug!(
        "rotating {}x{} buffer by {} degrees (cropped)",
        buffer.width(),
        buffer.height(),
        angle_degrees
    );
    rotate_onto(buffer, angle_degrees, buffer.width(), buffer.height())
}

fn rotate_onto(buffer: &PixelBuffer, angle_degrees: f64, dst_w: usize, dst_h: usize) -> PixelBuffer {
    let input = buffer.view();
    let (src_h, src_w, _) = input.dim();

    let (sin, cos) = sin_cos_degrees(angle_degrees);
    let (src_cx, src_cy) = ((src_w / 2) as f64, (src_h / 2) as f64);
    let (dst_cx, dst_cy) = ((dst_w / 2) as f64, (dst_h / 2) as f64);

    let mut output = Array3::<u8>::zeros((dst_h, dst_w, CHANNELS));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            let ry = y as f64 - dst_cy;
            for x in 0..dst_w {
                let rx = x as f64 - dst_cx;

                // `as i64` truncates toward zero
                let sx = (cos * rx - sin * ry + src_cx) as i64;
                let sy = (sin * rx + cos * ry + src_cy) as i64;

                if sx >= 0 && sy >= 0 && (sx as usize) < src_w && (sy as usize) < src_h {
                    let (sx, sy) = (sx as usize, sy as usize);
                    for c in 0..CHANNELS {
                        row[[x, c]] = input[[sy, sx, c]];
                    }
                }
            }
        });

    PixelBuffer::from_array_unchecked(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> PixelBuffer {
        let data = Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
            ((1 + y * width + x + c * 100) % 256) as u8
        });
        PixelBuffer::from_array(data).unwrap()
    }

    #[test]
    fn test_rotated_dimensions() {
        assert_eq!(rotated_dimensions(20, 10, 0.0), (20, 10));
        assert_eq!(rotated_dimensions(20, 10, 90.0), (10, 20));
        assert_eq!(rotated_dimensions(20, 10, 180.0), (20, 10));
        assert_eq!(rotated_dimensions(20, 10, -90.0), (10, 20));
        // 45 degrees: (20 + 10) * sqrt(2) / 2 = 21.21
        assert_eq!(rotated_dimensions(20, 10, 45.0), (22, 22));
        // 30 degrees: 20 cos + 10 sin = 22.32, 20 sin + 10 cos = 18.66
        assert_eq!(rotated_dimensions(20, 10, 30.0), (23, 19));
    }

    #[test]
    fn test_source_coordinates_truncate_toward_zero() {
        // 9x9 at 30 degrees, both centers at (4, 4).
        let buffer = numbered(9, 9);
        let result = rotate_cropped(&buffer, 30.0);

        // (6, 2) maps to (6.73, 3.27): truncation picks (6, 3), rounding would pick (7, 3).
        assert_eq!(result.pixel(6, 2), buffer.pixel(6, 3));
        // (7, 2) maps to (7.60, 3.77): rounding would pick (8, 4).
        assert_eq!(result.pixel(7, 2), buffer.pixel(7, 3));
        // (2, 0) maps to (4.27, -0.46): the row truncates to 0 and stays in bounds.
        assert_eq!(result.pixel(2, 0), buffer.pixel(4, 0));
        // (0, 6) maps to (-0.46, 3.73): the column truncates to 0.
        assert_eq!(result.pixel(0, 6), buffer.pixel(0, 3));
        // (0, 0) maps to (2.54, -1.46): outside, stays black.
        assert_eq!(result.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_sin_cos_exact_on_quarter_turns() {
        assert_eq!(sin_cos_degrees(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_degrees(-90.0), (-1.0, 0.0));
        assert_eq!(sin_cos_degrees(540.0), (0.0, -1.0));
        assert_eq!(sin_cos_degrees(360.0), (0.0, 1.0));
        let (s, c) = sin_cos_degrees(30.0);
        assert!((s - 0.5).abs() < 1e-12);
        assert!((c - 3f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        for (w, h) in [(1, 1), (4, 3), (5, 7), (8, 8)] {
            let buffer = numbered(w, h);
            assert_eq!(rotate(&buffer, 0.0), buffer);
            assert_eq!(rotate_cropped(&buffer, 0.0), buffer);
        }
    }

    #[test]
    fn test_positive_quarter_turn_is_counter_clockwise() {
        // A single row [1, 2, 3] becomes a column with the right end on top.
        let buffer = numbered(3, 1);
        let result = rotate(&buffer, 90.0);

        assert_eq!(result.width(), 1);
        assert_eq!(result.height(), 3);
        assert_eq!(result.pixel(0, 0).map(|p| p[0]), Some(3));
        assert_eq!(result.pixel(0, 1).map(|p| p[0]), Some(2));
        assert_eq!(result.pixel(0, 2).map(|p| p[0]), Some(1));
    }

    #[test]
    fn test_negative_quarter_turn_is_clockwise() {
        let buffer = numbered(3, 1);
        let result = rotate(&buffer, -90.0);

        assert_eq!(result.height(), 3);
        assert_eq!(result.pixel(0, 0).map(|p| p[0]), Some(1));
        assert_eq!(result.pixel(0, 2).map(|p| p[0]), Some(3));
    }

    #[test]
    fn test_half_turn_of_odd_square() {
        let buffer = numbered(3, 3);
        let result = rotate(&buffer, 180.0);

        assert_eq!((result.width(), result.height()), (3, 3));
        // Center stays, corners swap.
        assert_eq!(result.pixel(1, 1), buffer.pixel(1, 1));
        assert_eq!(result.pixel(0, 0), buffer.pixel(2, 2));
        assert_eq!(result.pixel(2, 0), buffer.pixel(0, 2));
    }

    #[test]
    fn test_expanded_canvas_has_black_corners() {
        let buffer = PixelBuffer::filled(10, 10, [255, 255, 255]);
        let result = rotate(&buffer, 45.0);

        assert!(result.width() > 10);
        assert_eq!(result.pixel(0, 0), Some([0, 0, 0]));
        let (cx, cy) = (result.width() / 2, result.height() / 2);
        assert_eq!(result.pixel(cx, cy), Some([255, 255, 255]));
    }

    #[test]
    fn test_cropped_keeps_dimensions() {
        let buffer = PixelBuffer::filled(12, 6, [1, 2, 3]);
        let result = rotate_cropped(&buffer, 30.0);
        assert_eq!((result.width(), result.height()), (12, 6));
        assert_eq!(result.pixel(6, 3), Some([1, 2, 3]));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let buffer = numbered(4, 4);
        let copy = buffer.clone();
        let _ = rotate(&buffer, 33.0);
        assert_eq!(buffer, copy);
    }
}
