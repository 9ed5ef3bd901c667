//! Error type shared by every transform.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Kernel side length must be a positive odd integer.
    #[error("invalid kernel size {0}: must be a positive odd integer")]
    InvalidKernelSize(usize),

    #[error("invalid sigma {0}: must be greater than zero")]
    InvalidSigma(f64),

    /// Unknown preset, mask or kernel identifier at a string boundary.
    #[error("unsupported {category} kind: {name:?}")]
    UnsupportedKind {
        category: &'static str,
        name: String,
    },

    #[error("sample count {len} does not match {width}x{height}x{channels}")]
    InvalidDimensions {
        len: usize,
        width: usize,
        height: usize,
        channels: usize,
    },

    #[error("unsupported channel count {0}: only 3-channel buffers are supported")]
    UnsupportedChannelCount(usize),

    #[error("invalid pipeline description: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unsupported(category: &'static str, name: &str) -> Self {
        Error::UnsupportedKind {
            category,
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
