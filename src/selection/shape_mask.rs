//! Procedural shape masks: circle and heart.
//!
//! A mask is a `(height, width)` boolean grid computed fresh from a
//! closed-form predicate on every call. Applying it keeps selected pixels
//! unchanged and sets every other pixel to black (there is no alpha channel).
//!
//! Both shapes are centered on `(width / 2, height / 2)` using integer
//! division.

use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Divisor from the half-extent to the heart's unit scale.
const HEART_SCALE_DIVISOR: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    Circular,
    Heart,
}

impl MaskKind {
    pub const ALL: [MaskKind; 2] = [MaskKind::Circular, MaskKind::Heart];

    pub fn name(self) -> &'static str {
        match self {
            MaskKind::Circular => "circular",
            MaskKind::Heart => "heart",
        }
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaskKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "circular" | "circle" => Ok(MaskKind::Circular),
            "heart" => Ok(MaskKind::Heart),
            _ => Err(Error::unsupported("mask", s)),
        }
    }
}

/// Circle of radius `min(cx, cy)` around the center; the boundary is kept.
pub fn circular_mask(width: usize, height: usize) -> Array2<bool> {
    let (cx, cy) = (width / 2, height / 2);
    let radius = cx.min(cy) as f64;

    Array2::from_shape_fn((height, width), |(y, x)| {
        let dx = x as f64 - cx as f64;
        let dy = y as f64 - cy as f64;
        (dx * dx + dy * dy).sqrt() <= radius
    })
}

/// Heart curve `(x² + y² - 1)³ - x²·y³ <= 0`.
///
/// Pixel offsets from the center are divided by `min(cx, cy) / 1.5`, and the
/// row offset is negated so `y` points up and the heart is upright. Images
/// less than 2 pixels wide or tall have a zero scale and select nothing.
pub fn heart_mask(width: usize, height: usize) -> Array2<bool> {
    let (cx, cy) = (width / 2, height / 2);
    let scale = cx.min(cy) as f64 / HEART_SCALE_DIVISOR;

    if scale <= 0.0 {
        return Array2::from_elem((height, width), false);
    }

    Array2::from_shape_fn((height, width), |(row, col)| {
        let x = (col as f64 - cx as f64) / scale;
        let y = -(row as f64 - cy as f64) / scale;
        let x2 = x * x;
        let r = x2 + y * y - 1.0;
        r * r * r - x2 * y * y * y <= 0.0
    })
}

pub fn shape_mask(kind: MaskKind, width: usize, height: usize) -> Array2<bool> {
    match kind {
        MaskKind::Circular => circular_mask(width, height),
        MaskKind::Heart => heart_mask(width, height),
    }
}

/// Zero every pixel outside `mask`. The mask must be `(height, width)`.
fn apply_selection(buffer: &PixelBuffer, mask: &Array2<bool>) -> PixelBuffer {
    let width = buffer.width();
    let mut output = buffer.view().to_owned();
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                if !mask[[y, x]] {
                    row.row_mut(x).fill(0);
                }
            }
        });
    PixelBuffer::from_array_unchecked(output)
}

/// Keep the pixels inside the requested shape, black out the rest.
pub fn apply_mask(buffer: &PixelBuffer, kind: MaskKind) -> PixelBuffer {
    debug!("applying {} mask to {}x{} buffer", kind, buffer.width(), buffer.height());
    let mask = shape_mask(kind, buffer.width(), buffer.height());
    apply_selection(buffer, &mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(mask: &Array2<bool>) -> Vec<String> {
        mask.rows()
            .into_iter()
            .map(|row| row.iter().map(|&k| if k { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_circular_five_by_five() {
        let buffer = PixelBuffer::filled(5, 5, [255, 255, 255]);
        let result = apply_mask(&buffer, MaskKind::Circular);

        // Center: distance 0 <= radius 2
        assert_eq!(result.pixel(2, 2), Some([255, 255, 255]));
        // Corner: distance sqrt(8) = 2.83 > 2
        assert_eq!(result.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(result.pixel(4, 4), Some([0, 0, 0]));
        // Edge midpoint sits exactly on the boundary and is kept.
        assert_eq!(result.pixel(0, 2), Some([255, 255, 255]));
        assert_eq!(result.pixel(2, 4), Some([255, 255, 255]));
    }

    #[test]
    fn test_circular_mask_shape() {
        let mask = circular_mask(5, 5);
        assert_eq!(
            render(&mask),
            vec!["..#..", ".###.", "#####", ".###.", "..#.."]
        );
    }

    #[test]
    fn test_circular_uses_smaller_half_extent() {
        let mask = circular_mask(9, 3);
        // Center (4, 1), radius 1
        assert!(mask[[1, 4]]);
        assert!(mask[[1, 5]]);
        assert!(!mask[[1, 6]]);
        assert!(!mask[[0, 3]]);
    }

    #[test]
    fn test_heart_is_upright() {
        let mask = heart_mask(31, 31);
        let (cx, cy) = (15, 15);
        let scale = 15.0 / 1.5;

        assert!(mask[[cy, cx]]);
        // Bottom tip and top notch both sit at |y| = 1 on the center column.
        assert!(mask[[cy + scale as usize - 1, cx]]);
        assert!(!mask[[cy + scale as usize + 1, cx]]);
        // Lobes rise past y = 1 beside the notch: (0.6, 1.1) is inside,
        // its mirror below the center (0.6, -1.1) is not.
        assert!(mask[[cy - 11, cx + 6]]);
        assert!(mask[[cy - 11, cx - 6]]);
        assert!(!mask[[cy + 11, cx + 6]]);
        assert!(mask[[cy - 5, cx - 6]]);
    }

    #[test]
    fn test_heart_is_left_right_symmetric() {
        let mask = heart_mask(41, 41);
        for y in 0..41 {
            for d in 0..=20 {
                assert_eq!(mask[[y, 20 - d]], mask[[y, 20 + d]], "row {} offset {}", y, d);
            }
        }
    }

    #[test]
    fn test_heart_degenerate_size_selects_nothing() {
        let buffer = PixelBuffer::filled(1, 5, [9, 9, 9]);
        let result = apply_mask(&buffer, MaskKind::Heart);
        assert!(result.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_mask_preserves_dimensions_and_input() {
        let buffer = PixelBuffer::filled(7, 4, [3, 4, 5]);
        let copy = buffer.clone();
        for kind in MaskKind::ALL {
            let result = apply_mask(&buffer, kind);
            assert_eq!((result.width(), result.height()), (7, 4));
        }
        assert_eq!(buffer, copy);
    }

    #[test]
    fn test_mask_kind_from_str() {
        assert_eq!("Heart".parse::<MaskKind>().unwrap(), MaskKind::Heart);
        assert_eq!("circle".parse::<MaskKind>().unwrap(), MaskKind::Circular);
        assert!(matches!(
            "star".parse::<MaskKind>(),
            Err(Error::UnsupportedKind { category: "mask", .. })
        ));
    }
}
