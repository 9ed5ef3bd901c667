//! Convolution kernel generation.
//!
//! Kernels are square `Array2<f64>` weight matrices with an odd side length.
//! Gaussian and box kernels are normalized (weights sum to 1); the vertical
//! kernel sums to 1 as well; the Sobel kernels are fixed constants summing
//! to 0.
//!
//! | Kind | Size | Normalized |
//! |------|------|------------|
//! | gaussian | any positive odd | yes |
//! | box | any positive odd | yes |
//! | vertical | any positive odd | yes |
//! | sobel_x | always 3 | no (sum 0) |
//! | sobel_y | always 3 | no (sum 0) |

use std::fmt;
use std::str::FromStr;

use log::trace;
use ndarray::{arr2, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Horizontal-gradient Sobel weights.
pub const SOBEL_X: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

/// Vertical-gradient Sobel weights.
pub const SOBEL_Y: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    Gaussian,
    Box,
    Vertical,
    SobelX,
    SobelY,
}

impl KernelKind {
    pub const ALL: [KernelKind; 5] = [
        KernelKind::Gaussian,
        KernelKind::Box,
        KernelKind::Vertical,
        KernelKind::SobelX,
        KernelKind::SobelY,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KernelKind::Gaussian => "gaussian",
            KernelKind::Box => "box",
            KernelKind::Vertical => "vertical",
            KernelKind::SobelX => "sobel_x",
            KernelKind::SobelY => "sobel_y",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KernelKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::unsupported("kernel", s))
    }
}

/// Square weight matrix with an odd side length.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    /// Wrap caller-supplied weights. The matrix must be square with an odd
    /// side length.
    pub fn from_weights(weights: Array2<f64>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows != cols {
            return Err(Error::InvalidKernelSize(rows.max(cols)));
        }
        validate_size(rows)?;
        Ok(Self { weights })
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    /// Padding needed on each side of a plane (`size / 2`).
    #[inline]
    pub fn radius(&self) -> usize {
        self.size() / 2
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }

    pub fn into_weights(self) -> Array2<f64> {
        self.weights
    }
}

fn validate_size(size: usize) -> Result<()> {
    if size == 0 || size % 2 == 0 {
        return Err(Error::InvalidKernelSize(size));
    }
    Ok(())
}

/// Build a kernel of the given kind.
///
/// `sigma` is only read for [`KernelKind::Gaussian`]. `size` must be a
/// positive odd integer for every kind, though the Sobel kernels are always
/// 3x3.
pub fn generate_kernel(kind: KernelKind, size: usize, sigma: f64) -> Result<Kernel> {
    trace!("generating {kind} kernel (size={size}, sigma={sigma})");
    validate_size(size)?;
    match kind {
        KernelKind::Gaussian => gaussian(size, sigma),
        KernelKind::Box => box_kernel(size),
        KernelKind::Vertical => vertical(size),
        KernelKind::SobelX => Ok(sobel_x()),
        KernelKind::SobelY => Ok(sobel_y()),
    }
}

/// Generate a normalized 2D Gaussian kernel.
///
/// Each weight is `exp(-(dx² + dy²) / 2σ²)` with offsets measured from the
/// center cell, after which the matrix is divided by its own sum. The
/// `1 / 2πσ²` factor cancels in the normalization and is omitted. The
/// center weight is always 1, so the sum never vanishes.
///
/// # Errors
/// * `InvalidKernelSize` - size is 0 or even
/// * `InvalidSigma` - sigma is not strictly positive (NaN included)
pub fn gaussian(size: usize, sigma: f64) -> Result<Kernel> {
    validate_size(size)?;
    if !(sigma > 0.0) {
        return Err(Error::InvalidSigma(sigma));
    }

    let center = (size - 1) as f64 / 2.0;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut weights = Array2::from_shape_fn((size, size), |(y, x)| {
        let dy = y as f64 - center;
        let dx = x as f64 - center;
        let dist_sq = dx * dx + dy * dy;
        // σ² may underflow to 0; the center cell must stay 1, not 0/0.
        if dist_sq == 0.0 {
            1.0
        } else {
            (-dist_sq / two_sigma_sq).exp()
        }
    });

    // Normalize
    let sum = weights.sum();
    weights.mapv_inplace(|w| w / sum);

    Ok(Kernel { weights })
}

/// Generate a box (mean) kernel: every weight is `1 / size²`.
pub fn box_kernel(size: usize) -> Result<Kernel> {
    validate_size(size)?;
    let w = 1.0 / (size * size) as f64;
    Ok(Kernel {
        weights: Array2::from_elem((size, size), w),
    })
}

/// Generate a vertical blur kernel.
///
/// Only the center column is populated, with weight `1 / size` per cell.
/// Convolving with it averages each output pixel with its `size / 2`
/// neighbors above and below in the same column: a blur along the vertical
/// axis. Horizontal neighbors do not contribute.
pub fn vertical(size: usize) -> Result<Kernel> {
    validate_size(size)?;
    let mid = size / 2;
    let w = 1.0 / size as f64;
    Ok(Kernel {
        weights: Array2::from_shape_fn((size, size), |(_, x)| if x == mid { w } else { 0.0 }),
    })
}

pub fn sobel_x() -> Kernel {
    Kernel {
        weights: arr2(&SOBEL_X),
    }
}

pub fn sobel_y() -> Kernel {
    Kernel {
        weights: arr2(&SOBEL_Y),
    }
}
