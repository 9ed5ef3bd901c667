//! WebAssembly exports for pixel transforms.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Data Layout
//!
//! Images cross the boundary as flat byte arrays of `width * height * 3`
//! samples in B, G, R order. A length that does not match the given
//! dimensions, or an unknown kind name, raises a JavaScript `Error`.

use wasm_bindgen::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::Error;
use crate::filters::blur::BlurKind;
use crate::filters::color_adjust::{apply_color_preset, ColorPreset};
use crate::filters::convolve::convolve;
use crate::filters::kernel::{generate_kernel, KernelKind};
use crate::filters::rotate::{rotate, rotate_cropped};
use crate::selection::{apply_mask, MaskKind};
use crate::similarity::cosine_similarity_samples;

fn to_buffer(data: &[u8], width: usize, height: usize) -> Result<PixelBuffer, JsError> {
    PixelBuffer::from_raw(data.to_vec(), width, height, CHANNELS).map_err(to_js)
}

fn to_js(err: Error) -> JsError {
    JsError::new(&err.to_string())
}

// ============================================================================
// Kernels & Convolution
// ============================================================================

/// Generate a kernel as a flat row-major array of `size * size` weights.
#[wasm_bindgen]
pub fn generate_kernel_wasm(kind: &str, size: usize, sigma: f64) -> Result<Vec<f64>, JsError> {
    let kind: KernelKind = kind.parse().map_err(to_js)?;
    let kernel = generate_kernel(kind, size, sigma).map_err(to_js)?;
    Ok(kernel.into_weights().into_raw_vec_and_offset().0)
}

/// Convolve an image with a generated kernel.
///
/// # Arguments
/// * `data` - Flat array of BGR bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `kind` - Kernel name
/// * `size` - Odd kernel size
/// * `sigma` - Gaussian standard deviation
///
/// # Returns
/// Flat array of BGR bytes, same dimensions
#[wasm_bindgen]
pub fn convolve_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    kind: &str,
    size: usize,
    sigma: f64,
) -> Result<Vec<u8>, JsError> {
    let kind: KernelKind = kind.parse().map_err(to_js)?;
    let kernel = generate_kernel(kind, size, sigma).map_err(to_js)?;
    let buffer = to_buffer(data, width, height)?;
    Ok(convolve(&buffer, &kernel).into_raw())
}

#[wasm_bindgen]
pub fn blur_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    kind: &str,
    size: usize,
    sigma: f64,
) -> Result<Vec<u8>, JsError> {
    let kind: BlurKind = kind.parse().map_err(to_js)?;
    let buffer = to_buffer(data, width, height)?;
    let result = crate::filters::blur::blur(&buffer, kind, size, sigma).map_err(to_js)?;
    Ok(result.into_raw())
}

// ============================================================================
// Color
// ============================================================================

#[wasm_bindgen]
pub fn apply_color_preset_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    preset: &str,
) -> Result<Vec<u8>, JsError> {
    let preset: ColorPreset = preset.parse().map_err(to_js)?;
    let buffer = to_buffer(data, width, height)?;
    Ok(apply_color_preset(&buffer, preset).into_raw())
}

#[wasm_bindgen]
pub fn grayscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let buffer = to_buffer(data, width, height)?;
    Ok(crate::filters::grayscale::grayscale(&buffer).into_raw())
}

// ============================================================================
// Geometry & Masks
// ============================================================================

/// Rotated image on an expanded canvas.
///
/// The new dimensions are not returned; query them with
/// [`rotated_dimensions_wasm`] before allocating on the JavaScript side.
#[wasm_bindgen]
pub fn rotate_wasm(data: &[u8], width: usize, height: usize, angle: f64) -> Result<Vec<u8>, JsError> {
    let buffer = to_buffer(data, width, height)?;
    Ok(rotate(&buffer, angle).into_raw())
}

/// `[new_width, new_height]` of [`rotate_wasm`]'s output.
#[wasm_bindgen]
pub fn rotated_dimensions_wasm(width: usize, height: usize, angle: f64) -> Vec<u32> {
    let (w, h) = crate::filters::rotate::rotated_dimensions(width, height, angle);
    vec![w as u32, h as u32]
}

#[wasm_bindgen]
pub fn rotate_cropped_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    angle: f64,
) -> Result<Vec<u8>, JsError> {
    let buffer = to_buffer(data, width, height)?;
    Ok(rotate_cropped(&buffer, angle).into_raw())
}

#[wasm_bindgen]
pub fn apply_mask_wasm(data: &[u8], width: usize, height: usize, shape: &str) -> Result<Vec<u8>, JsError> {
    let shape: MaskKind = shape.parse().map_err(to_js)?;
    let buffer = to_buffer(data, width, height)?;
    Ok(apply_mask(&buffer, shape).into_raw())
}

// ============================================================================
// Comparison
// ============================================================================

/// Cosine similarity of two flat sample arrays of any length.
#[wasm_bindgen]
pub fn cosine_similarity_wasm(a: &[u8], b: &[u8]) -> f64 {
    cosine_similarity_samples(a, b)
}
