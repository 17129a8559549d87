//! Shared test utilities for the facefit test suite.
//!
//! Synthetic photos are generated on the fly instead of being checked in, so
//! every test gets exactly the dimensions it asserts against.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_png(&tmp.path().join("selfie.png"), 400, 300);
//! write_sidecar(&tmp.path().join("selfie.faces.json"), &[face]);
//! ```

use crate::detect::FaceRecord;
use image::{DynamicImage, ImageEncoder, RgbImage};
use std::path::Path;

// =========================================================================
// Synthetic photos
// =========================================================================

/// An RGB gradient, so crops and resizes are not trivially uniform.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// Write a small valid JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient_image(width, height).to_rgb8();
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a small valid PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient_image(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

// =========================================================================
// Detector fixtures
// =========================================================================

/// Write face records as a JSON sidecar readable by `SidecarDetector`.
pub fn write_sidecar(path: &Path, faces: &[FaceRecord]) {
    let json = serde_json::to_string_pretty(faces).unwrap();
    std::fs::write(path, json).unwrap();
}
