//! Blur filters: Gaussian, Box, Vertical.
//!
//! Each blur builds a normalized kernel and runs it through the
//! reflect-padded convolution in [`super::convolve`].

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::convolve::convolve;
use super::kernel::{generate_kernel, Kernel, KernelKind};
use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

pub const DEFAULT_KERNEL_SIZE: usize = 5;
pub const DEFAULT_SIGMA: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurKind {
    #[default]
    Gaussian,
    Box,
    Vertical,
}

impl BlurKind {
    pub const ALL: [BlurKind; 3] = [BlurKind::Gaussian, BlurKind::Box, BlurKind::Vertical];

    pub fn name(self) -> &'static str {
        match self {
            BlurKind::Gaussian => "gaussian",
            BlurKind::Box => "box",
            BlurKind::Vertical => "vertical",
        }
    }

    pub fn kernel_kind(self) -> KernelKind {
        match self {
            BlurKind::Gaussian => KernelKind::Gaussian,
            BlurKind::Box => KernelKind::Box,
            BlurKind::Vertical => KernelKind::Vertical,
        }
    }
}

impl fmt::Display for BlurKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlurKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BlurKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::unsupported("blur", s))
    }
}

/// Blur settings. Missing fields fall back to a 5x5 Gaussian with sigma 5.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    pub kind: BlurKind,
    pub size: usize,
    /// Only read by the Gaussian blur.
    pub sigma: f64,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            kind: BlurKind::Gaussian,
            size: DEFAULT_KERNEL_SIZE,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl BlurParams {
    pub fn kernel(&self) -> Result<Kernel> {
        generate_kernel(self.kind.kernel_kind(), self.size, self.sigma)
    }
}

/// Blur `buffer` with the requested kernel.
///
/// # Errors
/// * `InvalidKernelSize` - size is 0 or even
/// * `InvalidSigma` - Gaussian with sigma <= 0
pub fn blur(buffer: &PixelBuffer, kind: BlurKind, size: usize, sigma: f64) -> Result<PixelBuffer> {
    blur_with(buffer, &BlurParams { kind, size, sigma })
}

pub fn blur_with(buffer: &PixelBuffer, params: &BlurParams) -> Result<PixelBuffer> {
    debug!("{} blur (size={}, sigma={})", params.kind, params.size, params.sigma);
    let kernel = params.kernel()?;
    Ok(convolve(buffer, &kernel))
}
