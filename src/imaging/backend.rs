//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the operations every backend must
//! support: identify, decode, fit, crop, and save_jpeg.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::params::{CropRegion, FitParams, ImageSource, Quality};
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The source could not be opened or decoded.
    #[error("Failed to decode {0}")]
    Decode(String),
    #[error("Failed to encode JPEG: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Every backend must implement all five operations so the rest of the
/// codebase is backend-agnostic.
pub trait ImageBackend: Sync {
    /// Read the image dimensions without keeping the pixels.
    fn identify(&self, source: &ImageSource) -> Result<Dimensions, BackendError>;

    /// Decode the full image at its stored size.
    fn decode(&self, source: &ImageSource) -> Result<DynamicImage, BackendError>;

    /// Decode `params.source` reduced by `params.sample_size`, write it as
    /// JPEG to `params.output` and return the decoded image.
    ///
    /// Nothing is written when decoding fails.
    fn fit(&self, params: &FitParams) -> Result<DynamicImage, BackendError>;

    /// Extract an already-clamped region into a new image.
    fn crop(&self, image: &DynamicImage, region: CropRegion) -> DynamicImage;

    /// Encode an in-memory image as JPEG, overwriting `output`.
    fn save_jpeg(
        &self,
        image: &DynamicImage,
        output: &Path,
        quality: Quality,
    ) -> Result<(), BackendError>;
}
