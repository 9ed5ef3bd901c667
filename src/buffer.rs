//! Dense 3-channel 8-bit pixel buffer.
//!
//! ## Layout
//!
//! | Axis | Meaning |
//! |------|---------|
//! | 0 | row (y), `0..height`, increasing downward |
//! | 1 | column (x), `0..width` |
//! | 2 | channel, `0..3` |
//!
//! Samples are stored row-major and channel-interleaved, so the flat sample
//! index of `(y, x, c)` is `(y * width + x) * 3 + c`.
//!
//! ## Channel Order
//!
//! Channels are **B, G, R**: index 0 is blue, 1 is green, 2 is red. This is
//! the order the image decoder hands over, and every per-channel table in
//! the crate (tone presets, luma weights) is indexed the same way.

use ndarray::{Array3, ArrayView3};

use crate::error::{Error, Result};

/// Number of channels in every buffer.
pub const CHANNELS: usize = 3;

pub const BLUE: usize = 0;
pub const GREEN: usize = 1;
pub const RED: usize = 2;

/// Immutable 3-channel image. Transforms never mutate their input; each
/// returns a freshly allocated buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Build a buffer from decoded samples plus explicit metadata.
    ///
    /// # Arguments
    /// * `data` - Flat samples, row-major, channel-interleaved (B, G, R)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Channel count reported by the decoder, must be 3
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize, channels: usize) -> Result<Self> {
        if channels != CHANNELS {
            return Err(Error::UnsupportedChannelCount(channels));
        }
        let len = data.len();
        let invalid = || Error::InvalidDimensions {
            len,
            width,
            height,
            channels,
        };
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(invalid)?;
        if expected != len {
            return Err(invalid());
        }
        let data = Array3::from_shape_vec((height, width, channels), data).map_err(|_| invalid())?;
        Ok(Self { data })
    }

    /// Wrap an owned `(height, width, 3)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (_, _, channels) = data.dim();
        if channels != CHANNELS {
            return Err(Error::UnsupportedChannelCount(channels));
        }
        // Normalize to standard layout so as_slice() always succeeds.
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self { data })
    }

    /// All-zero (black) buffer.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: Array3::zeros((height, width, CHANNELS)),
        }
    }

    /// Buffer with every pixel set to `pixel` (B, G, R).
    pub fn filled(width: usize, height: usize, pixel: [u8; 3]) -> Self {
        Self {
            data: Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| pixel[c]),
        }
    }

    /// Crate-internal constructor for arrays produced by the transforms,
    /// which are always `(h, w, 3)` in standard layout.
    pub(crate) fn from_array_unchecked(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, CHANNELS);
        Self { data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    #[inline]
    pub fn channels(&self) -> usize {
        CHANNELS
    }

    /// Total number of samples (`width * height * 3`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some([
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ])
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Flat samples in row-major, channel-interleaved order.
    pub fn as_slice(&self) -> &[u8] {
        // Standard layout is an invariant of every constructor.
        self.data.as_slice().unwrap_or(&[])
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }
}
