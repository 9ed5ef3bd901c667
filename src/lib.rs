//! Pixel Transform
//!
//! Image transformation and comparison functions on 8-bit three-channel
//! buffers, with optional Python bindings via PyO3 and WASM bindings for
//! JavaScript.
//!
//! ## Image Format
//! Every function works on a [`PixelBuffer`]: shape (height, width, 3),
//! `u8` samples in **B, G, R** order (channel 0 is blue, channel 2 is red).
//! There is no alpha channel; masked-out pixels become black.
//!
//! ## Operations
//!
//! | Operation | Function | Output size |
//! |-----------|----------|-------------|
//! | Kernel generation | [`generate_kernel`] | size x size |
//! | Convolution | [`convolve`], [`blur`] | same as input |
//! | Color presets | [`apply_color_preset`] | same as input |
//! | Grayscale | [`grayscale`] | same as input |
//! | Rotation | [`rotate`] (expanded), [`rotate_cropped`] | varies / same |
//! | Shape masks | [`apply_mask`] | same as input |
//! | Similarity | [`cosine_similarity`] | scalar |
//!
//! All operations are pure: the input buffer is never modified.
//!
//! ## Rotation Direction
//! A positive angle rotates the picture counter-clockwise as displayed.

pub mod buffer;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod selection;
pub mod similarity;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use filters::blur::{blur, BlurKind, BlurParams};
pub use filters::color_adjust::{apply_color_preset, ColorPreset};
pub use filters::convolve::convolve;
pub use filters::grayscale::grayscale;
pub use filters::kernel::{generate_kernel, Kernel, KernelKind};
pub use filters::rotate::{rotate, rotate_cropped};
pub use pipeline::{Operation, Pipeline};
pub use selection::{apply_mask, MaskKind};
pub use similarity::cosine_similarity;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::buffer::PixelBuffer;
    use crate::error::Error;
    use crate::filters::blur::{self as blur_mod, BlurKind, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA};
    use crate::filters::color_adjust::{self, ColorPreset};
    use crate::filters::convolve::convolve as convolve_impl;
    use crate::filters::grayscale::grayscale as grayscale_impl;
    use crate::filters::kernel::{self, KernelKind};
    use crate::filters::rotate as rotate_mod;
    use crate::pipeline::Pipeline;
    use crate::selection::{self, MaskKind};
    use crate::similarity;

    impl From<Error> for PyErr {
        fn from(err: Error) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn to_buffer(image: &PyReadonlyArray3<'_, u8>) -> Result<PixelBuffer, Error> {
        PixelBuffer::from_array(image.as_array().to_owned())
    }

    // ========================================================================
    // Kernels & Convolution
    // ========================================================================

    /// Generate a convolution kernel.
    ///
    /// # Arguments
    /// * `kind` - "gaussian", "box", "vertical", "sobel_x" or "sobel_y"
    /// * `size` - Odd kernel size (ignored for Sobel kernels)
    /// * `sigma` - Gaussian standard deviation
    ///
    /// # Returns
    /// (size, size) float64 array
    #[pyfunction]
    #[pyo3(signature = (kind, size=DEFAULT_KERNEL_SIZE, sigma=DEFAULT_SIGMA))]
    pub fn generate_kernel<'py>(
        py: Python<'py>,
        kind: &str,
        size: usize,
        sigma: f64,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let kind: KernelKind = kind.parse()?;
        let kernel = kernel::generate_kernel(kind, size, sigma)?;
        Ok(kernel.into_weights().into_pyarray(py))
    }

    /// Convolve a (H, W, 3) uint8 image with a generated kernel.
    #[pyfunction]
    #[pyo3(signature = (image, kind, size=DEFAULT_KERNEL_SIZE, sigma=DEFAULT_SIGMA))]
    pub fn convolve<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kind: &str,
        size: usize,
        sigma: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let kind: KernelKind = kind.parse()?;
        let kernel = kernel::generate_kernel(kind, size, sigma)?;
        let buffer = to_buffer(&image)?;
        Ok(convolve_impl(&buffer, &kernel).into_array().into_pyarray(py))
    }

    /// Blur with a gaussian, box or vertical kernel.
    #[pyfunction]
    #[pyo3(signature = (image, kind="gaussian", size=DEFAULT_KERNEL_SIZE, sigma=DEFAULT_SIGMA))]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kind: &str,
        size: usize,
        sigma: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let kind: BlurKind = kind.parse()?;
        let buffer = to_buffer(&image)?;
        let result = blur_mod::blur(&buffer, kind, size, sigma)?;
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Color
    // ========================================================================

    /// Apply a named preset: cool, warm, vintage, high_contrast, invert, outline.
    #[pyfunction]
    pub fn apply_color_preset<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        preset: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let preset: ColorPreset = preset.parse()?;
        let buffer = to_buffer(&image)?;
        let result = color_adjust::apply_color_preset(&buffer, preset);
        Ok(result.into_array().into_pyarray(py))
    }

    /// Convert to BT.601 luma, replicated into all three channels.
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = to_buffer(&image)?;
        Ok(grayscale_impl(&buffer).into_array().into_pyarray(py))
    }

    // ========================================================================
    // Geometry & Masks
    // ========================================================================

    /// Rotate counter-clockwise onto an expanded canvas.
    #[pyfunction]
    pub fn rotate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        angle: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = to_buffer(&image)?;
        Ok(rotate_mod::rotate(&buffer, angle).into_array().into_pyarray(py))
    }

    /// Rotate counter-clockwise, keeping the input dimensions.
    #[pyfunction]
    pub fn rotate_cropped<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        angle: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = to_buffer(&image)?;
        Ok(rotate_mod::rotate_cropped(&buffer, angle).into_array().into_pyarray(py))
    }

    /// Black out everything outside a "circular" or "heart" selection.
    #[pyfunction]
    pub fn apply_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        shape: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let shape: MaskKind = shape.parse()?;
        let buffer = to_buffer(&image)?;
        Ok(selection::apply_mask(&buffer, shape).into_array().into_pyarray(py))
    }

    // ========================================================================
    // Comparison & Pipelines
    // ========================================================================

    /// Cosine similarity of two images of any size.
    #[pyfunction]
    pub fn cosine_similarity(a: PyReadonlyArray3<'_, u8>, b: PyReadonlyArray3<'_, u8>) -> PyResult<f64> {
        let a = to_buffer(&a)?;
        let b = to_buffer(&b)?;
        Ok(similarity::cosine_similarity(&a, &b))
    }

    /// Run a JSON pipeline description over an image.
    #[pyfunction]
    pub fn run_pipeline<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        pipeline: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let pipeline = Pipeline::from_json(pipeline)?;
        let buffer = to_buffer(&image)?;
        Ok(pipeline.apply(&buffer)?.into_array().into_pyarray(py))
    }

    /// Python module definition
    #[pymodule]
    pub fn pixel_transform(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Kernels & convolution
        m.add_function(wrap_pyfunction!(generate_kernel, m)?)?;
        m.add_function(wrap_pyfunction!(convolve, m)?)?;
        m.add_function(wrap_pyfunction!(blur, m)?)?;

        // Color
        m.add_function(wrap_pyfunction!(apply_color_preset, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;

        // Geometry & masks
        m.add_function(wrap_pyfunction!(rotate, m)?)?;
        m.add_function(wrap_pyfunction!(rotate_cropped, m)?)?;
        m.add_function(wrap_pyfunction!(apply_mask, m)?)?;

        // Comparison & pipelines
        m.add_function(wrap_pyfunction!(cosine_similarity, m)?)?;
        m.add_function(wrap_pyfunction!(run_pipeline, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixel_transform;
