//! Color presets: per-channel affine tone adjustments, Invert, Outline.
//!
//! ## Preset Table
//!
//! Scale and offset triples are in the buffer's B, G, R channel order.
//!
//! | Preset | Scale | Offset |
//! |--------|-------|--------|
//! | cool | (1.25, 1.05, 0.8) | (0, 0, 0) |
//! | warm | (0.85, 1.05, 1.3) | (0, 0, 0) |
//! | vintage | (0.5, 0.7, 1.2) | (0, 30, 15) |
//! | high_contrast | (1.5, 1.5, 1.5) | (-50, -50, -50) |
//! | invert | 255 - v | |
//! | outline | Sobel edges, see [`super::edge`] | |
//!
//! Affine results are computed in `f64`, clamped to 0-255 and truncated.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::edge::outline;
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPreset {
    Cool,
    Warm,
    Vintage,
    HighContrast,
    Invert,
    Outline,
}

/// How a preset transforms samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PresetParams {
    /// `out = clamp(in * scale + offset, 0, 255)` per channel.
    Affine { scale: [f64; 3], offset: [f64; 3] },
    Invert,
    Outline,
}

impl ColorPreset {
    pub const ALL: [ColorPreset; 6] = [
        ColorPreset::Cool,
        ColorPreset::Warm,
        ColorPreset::Vintage,
        ColorPreset::HighContrast,
        ColorPreset::Invert,
        ColorPreset::Outline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorPreset::Cool => "cool",
            ColorPreset::Warm => "warm",
            ColorPreset::Vintage => "vintage",
            ColorPreset::HighContrast => "high_contrast",
            ColorPreset::Invert => "invert",
            ColorPreset::Outline => "outline",
        }
    }

    pub fn params(self) -> PresetParams {
        match self {
            ColorPreset::Cool => PresetParams::Affine {
                scale: [1.25, 1.05, 0.8],
                offset: [0.0, 0.0, 0.0],
            },
            ColorPreset::Warm => PresetParams::Affine {
                scale: [0.85, 1.05, 1.3],
                offset: [0.0, 0.0, 0.0],
            },
            ColorPreset::Vintage => PresetParams::Affine {
                scale: [0.5, 0.7, 1.2],
                offset: [0.0, 30.0, 15.0],
            },
            ColorPreset::HighContrast => PresetParams::Affine {
                scale: [1.5, 1.5, 1.5],
                offset: [-50.0, -50.0, -50.0],
            },
            ColorPreset::Invert => PresetParams::Invert,
            ColorPreset::Outline => PresetParams::Outline,
        }
    }
}

impl fmt::Display for ColorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorPreset {
    type Err = Error;

    /// Accepts snake_case names, with spaces or dashes in place of
    /// underscores ("high contrast", "high-contrast").
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        ColorPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == key)
            .ok_or_else(|| Error::unsupported("color preset", s))
    }
}

/// Apply a named color preset.
pub fn apply_color_preset(buffer: &PixelBuffer, preset: ColorPreset) -> PixelBuffer {
    debug!("applying {} preset to {}x{} buffer", preset, buffer.width(), buffer.height());
    match preset.params() {
        PresetParams::Affine { scale, offset } => adjust_channels(buffer, scale, offset),
        PresetParams::Invert => invert(buffer),
        PresetParams::Outline => outline(buffer),
    }
}

/// Per-channel `clamp(v * scale + offset, 0, 255)`, truncated.
pub fn adjust_channels(buffer: &PixelBuffer, scale: [f64; 3], offset: [f64; 3]) -> PixelBuffer {
    let mut output = buffer.view().to_owned();
    // Buffers are always in standard layout, so the slice is contiguous.
    if let Some(samples) = output.as_slice_mut() {
        samples.par_chunks_mut(CHANNELS).for_each(|pixel| {
            for (c, v) in pixel.iter_mut().enumerate() {
                *v = (*v as f64 * scale[c] + offset[c]).clamp(0.0, 255.0) as u8;
            }
        });
    }
    PixelBuffer::from_array_unchecked(output)
}

/// Invert every sample: `255 - v`. Applying it twice restores the input.
pub fn invert(buffer: &PixelBuffer) -> PixelBuffer {
    PixelBuffer::from_array_unchecked(buffer.view().mapv(|v| 255 - v))
}
