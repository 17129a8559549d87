//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides sample sizes and crop regions) and the
//! [`backend`](super::backend) (which does the actual pixel work). This
//! separation allows swapping backends (e.g. for testing with a mock) without
//! changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 80). Clamped on construction.
//! - [`DisplayTarget`]: Size of the viewport the fitted image will be shown in.
//! - [`Rect`]: Detector bounding box, signed, may extend past the image.
//! - [`CropRegion`]: Clamped region guaranteed to lie inside the image.
//! - [`ImageSource`]: Where to read the photo from: a path or an in-memory buffer.
//! - [`FitParams`]: Full specification for a fit: source, output path, sample size, quality.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Width and height of the area the fitted image is displayed in.
///
/// A zero dimension means the view has not been laid out yet; the fitter
/// then skips downsampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTarget {
    pub width: u32,
    pub height: u32,
}

impl DisplayTarget {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned face bounding box as reported by a detector.
///
/// Coordinates are signed: detectors routinely report boxes that start left
/// of or above the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Region within an image, already clamped to its bounds.
///
/// Both extents are non-zero and `x + width`, `y + height` never exceed the
/// image dimensions it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A readable photo: a file on disk or bytes already in memory.
///
/// Streams (stdin, network bodies) are drained into [`ImageSource::Bytes`]
/// once, so the backend can probe dimensions and decode without reopening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Drain a reader into an in-memory source.
    pub fn read_from(mut reader: impl Read) -> std::io::Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Self::Bytes(buf))
    }

    /// Human-readable label for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Parameters for a fit: decode at `sample_size`, persist as JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct FitParams {
    pub source: ImageSource,
    pub output: PathBuf,
    /// Integer downscale factor, always >= 1.
    pub sample_size: u32,
    pub quality: Quality,
}
