//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Fit → JPEG** | sample-size resample + `JpegEncoder` (quality 80) |
//! | **Face crop** | clamp box, then `DynamicImage::crop_imm` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for sample sizes and crop clamping (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_sample_size, calculate_sampled_dimensions, clamp_face_region};
pub use operations::{FaceCrop, FitConfig, ImagingError, crop_face, decode_image, fit_image, save_image};
pub use params::{CropRegion, DisplayTarget, FitParams, ImageSource, Quality, Rect};
pub use rust_backend::RustBackend;
