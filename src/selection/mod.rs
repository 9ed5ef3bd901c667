//! Selection masks for image editing.
//!
//! - **Shape masks**: closed-form circle and heart selections centered on the image
//!
//! Pixels outside the selection are set to black.

pub mod shape_mask;

pub use shape_mask::{apply_mask, circular_mask, heart_mask, shape_mask, MaskKind};
