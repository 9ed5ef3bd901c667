//! Filter modules for image processing effects.
//!
//! ## Supported Format
//!
//! Every filter takes and returns a [`crate::PixelBuffer`]:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | BGR8 | (H, W, 3) | u8 | Blue, green, red, 0-255 |
//!
//! Intermediate math is `f64`; results are clamped back to 0-255.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - The input buffer is never modified, a new buffer is returned
//! - **Whole image** - Every operation covers the full frame
//! - **Thread-safe** - Rows are processed in parallel with rayon where it pays off
//!
//! ## Filter Categories
//!
//! - **Kernels**: gaussian, box, vertical, sobel_x, sobel_y
//! - **Neighborhood**: convolve, blur
//! - **Pixel-wise**: color presets (cool, warm, vintage, high_contrast, invert), grayscale
//! - **Edge detection**: outline
//! - **Geometric**: rotate, rotate_cropped

pub mod kernel;
pub mod convolve;
pub mod blur;
pub mod grayscale;
pub mod color_adjust;
pub mod edge;
pub mod rotate;
