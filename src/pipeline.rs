//! Sequential composition of transforms.
//!
//! A [`Pipeline`] is an ordered list of [`Operation`]s; the output of each
//! step is the input of the next. Pipelines deserialize from JSON:
//!
//! ```json
//! {
//!   "steps": [
//!     { "op": "blur", "kind": "gaussian", "size": 5, "sigma": 1.5 },
//!     { "op": "color_preset", "preset": "vintage" },
//!     { "op": "rotate", "angle": 30.0 },
//!     { "op": "mask", "shape": "heart" }
//!   ]
//! }
//! ```
//!
//! Kernel parameters of every step are checked before the first step runs,
//! so an invalid pipeline fails without doing any pixel work.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::filters::blur::{blur_with, BlurParams, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA};
use crate::filters::color_adjust::{apply_color_preset, ColorPreset};
use crate::filters::convolve::convolve;
use crate::filters::grayscale::grayscale;
use crate::filters::kernel::{generate_kernel, KernelKind};
use crate::filters::rotate::{rotate, rotate_cropped};
use crate::selection::{apply_mask, MaskKind};

fn default_size() -> usize {
    DEFAULT_KERNEL_SIZE
}

fn default_sigma() -> f64 {
    DEFAULT_SIGMA
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Blur(BlurParams),
    /// Convolve with any generated kernel, including the Sobel kernels.
    Convolve {
        kernel: KernelKind,
        #[serde(default = "default_size")]
        size: usize,
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
    ColorPreset {
        preset: ColorPreset,
    },
    Grayscale,
    Rotate {
        angle: f64,
    },
    RotateCropped {
        angle: f64,
    },
    Mask {
        shape: MaskKind,
    },
}

impl Operation {
    /// Check parameters without touching pixels.
    pub fn validate(&self) -> Result<()> {
        match self {
            Operation::Blur(params) => params.kernel().map(|_| ()),
            Operation::Convolve { kernel, size, sigma } => {
                generate_kernel(*kernel, *size, *sigma).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    pub fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        match self {
            Operation::Blur(params) => blur_with(buffer, params),
            Operation::Convolve { kernel, size, sigma } => {
                let kernel = generate_kernel(*kernel, *size, *sigma)?;
                Ok(convolve(buffer, &kernel))
            }
            Operation::ColorPreset { preset } => Ok(apply_color_preset(buffer, *preset)),
            Operation::Grayscale => Ok(grayscale(buffer)),
            Operation::Rotate { angle } => Ok(rotate(buffer, *angle)),
            Operation::RotateCropped { angle } => Ok(rotate_cropped(buffer, *angle)),
            Operation::Mask { shape } => Ok(apply_mask(buffer, *shape)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub steps: Vec<Operation>,
}

impl Pipeline {
    pub fn new(steps: Vec<Operation>) -> Self {
        Self { steps }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn then(mut self, op: Operation) -> Self {
        self.steps.push(op);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.steps.iter().try_for_each(Operation::validate)
    }

    /// Run every step in order. An empty pipeline returns a copy of the input.
    pub fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        self.validate()?;

        let mut current = buffer.clone();
        for (i, op) in self.steps.iter().enumerate() {
            debug!("pipeline step {}/{}: {:?}", i + 1, self.steps.len(), op);
            current = op.apply(&current)?;
        }
        Ok(current)
    }
}
