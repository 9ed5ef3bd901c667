//! Direct 2D convolution with reflect boundary handling.
//!
//! Each channel is processed independently: the plane is padded by
//! `kernel.radius()` on every side by mirroring interior samples across the
//! edge (the edge sample itself is not repeated, so `[a, b, c]` padded by 2
//! reads `[c, b, a, b, c, b, a]`), then every output sample is the weighted
//! sum of the window under the kernel, accumulated in `f64`, rounded, and
//! clamped to 0-255.
//!
//! The window is not flipped, i.e. the kernel is applied as a correlation.
//! All kernels produced by [`super::kernel`] are either symmetric or used
//! only through gradient magnitudes, where the difference is invisible.
//!
//! Cost is O(W·H·K²) per channel. Rows are computed in parallel with Rayon;
//! every output sample is a pure function of the input, so the result is
//! identical to a sequential pass.

use log::debug;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, Array3, ArrayView2, Axis};

use super::kernel::Kernel;
use crate::buffer::{PixelBuffer, CHANNELS};

/// Map an out-of-range index onto `0..len` by mirror reflection
/// (edge sample excluded).
#[inline]
pub(crate) fn reflect_index(i: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = i.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - m) as usize
    }
}

/// Pad a single-channel plane by `radius` on every side using reflection.
pub(crate) fn pad_reflect(plane: ArrayView2<f64>, radius: usize) -> Array2<f64> {
    let (height, width) = plane.dim();
    let r = radius as isize;
    Array2::from_shape_fn((height + 2 * radius, width + 2 * radius), |(py, px)| {
        let sy = reflect_index(py as isize - r, height);
        let sx = reflect_index(px as isize - r, width);
        plane[[sy, sx]]
    })
}

/// Weighted sum of the `size x size` window whose top-left corner is at
/// `(top, left)` in a padded plane.
#[inline]
pub(crate) fn window_sum(padded: &Array2<f64>, weights: &Array2<f64>, top: usize, left: usize) -> f64 {
    let size = weights.nrows();
    let mut sum = 0.0f64;
    for ky in 0..size {
        for kx in 0..size {
            sum += padded[[top + ky, left + kx]] * weights[[ky, kx]];
        }
    }
    sum
}

/// Convolve every channel of `buffer` with `kernel`.
///
/// # Arguments
/// * `buffer` - Source image, left untouched
/// * `kernel` - Any odd-sized square kernel
///
/// # Returns
/// New buffer with identical width, height and channel count
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let input = buffer.view();
    let (height, width, _) = input.dim();
    let radius = kernel.radius();
    let weights = kernel.weights();

    debug!(
        "convolving {}x{} buffer with {}x{} kernel",
        width,
        height,
        kernel.size(),
        kernel.size()
    );

    if height == 0 || width == 0 {
        return buffer.clone();
    }

    let padded: Vec<Array2<f64>> = (0..CHANNELS)
        .map(|c| {
            let plane = input.index_axis(Axis(2), c).mapv(f64::from);
            pad_reflect(plane.view(), radius)
        })
        .collect();

    let mut output = Array3::<u8>::zeros((height, width, CHANNELS));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for (c, plane) in padded.iter().enumerate() {
                    let sum = window_sum(plane, weights, y, x);
                    row[[x, c]] = sum.round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    PixelBuffer::from_array_unchecked(output)
}
