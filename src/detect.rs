//! Face detection boundary.
//!
//! Detection itself is an external capability: given an image, a detector
//! returns zero or more [`FaceRecord`]s in its own order, or fails. The rest
//! of the crate only ever talks to the [`FaceDetector`] trait, so any backend
//! (on-device model, cloud API, fixture file) can be plugged in.
//!
//! [`SidecarDetector`] is the built-in backend. It reads face records from a
//! JSON file, which makes every pipeline run deterministic:
//!
//! ```json
//! [
//!   {
//!     "bounding_box": { "left": 120, "top": 80, "width": 200, "height": 240 },
//!     "smiling_probability": 0.8,
//!     "left_eye_open_probability": 0.3,
//!     "right_eye_open_probability": 0.9,
//!     "head_euler_angle_y": 15.0
//!   }
//! ]
//! ```
//!
//! Bounding boxes are in the pixel coordinates of the image handed to
//! [`FaceDetector::detect`]. The pipeline detects on the fitted image, so a
//! sidecar describes the downsampled photo, not the original file.

use crate::imaging::Rect;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Detector unavailable: {0}")]
    Unavailable(String),
    #[error("Detector returned malformed results: {0}")]
    Malformed(String),
}

/// One detected face.
///
/// Probabilities are in `[0, 1]` and absent when the detector did not
/// classify that attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub bounding_box: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smiling_probability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_eye_open_probability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_eye_open_probability: Option<f32>,
    /// Head rotation around the vertical axis, in degrees.
    #[serde(default)]
    pub head_euler_angle_y: f32,
}

impl FaceRecord {
    /// A record with only a bounding box: no classifications, yaw 0.
    pub fn new(bounding_box: Rect) -> Self {
        Self {
            bounding_box,
            smiling_probability: None,
            left_eye_open_probability: None,
            right_eye_open_probability: None,
            head_euler_angle_y: 0.0,
        }
    }
}

/// Pluggable face detection backend.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a decoded image. An empty vector means "no faces",
    /// which is not an error.
    fn detect(&self, image: &DynamicImage) -> Result<Vec<FaceRecord>, DetectionError>;
}

/// Detector that reports the faces listed in a JSON file.
///
/// The file is read on every call, so a missing or malformed file surfaces as
/// a detection failure for that run only.
///
/// The image is not inspected. Boxes are taken as-is, in the coordinates of
/// the image passed to `detect` (the fitted photo when run by the pipeline).
#[derive(Debug, Clone)]
pub struct SidecarDetector {
    path: PathBuf,
}

impl SidecarDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The sidecar conventionally stored next to a photo:
    /// `shots/selfie.jpg` → `shots/selfie.faces.json` for suffix `.faces.json`.
    pub fn beside(photo: &Path, suffix: &str) -> Self {
        let stem = photo
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(photo.with_file_name(format!("{stem}{suffix}")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FaceDetector for SidecarDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<FaceRecord>, DetectionError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            DetectionError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| DetectionError::Malformed(format!("{}: {}", self.path.display(), e)))
    }
}

/// Detector with a fixed answer, for tests and embedding callers that already
/// ran detection elsewhere.
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    faces: Vec<FaceRecord>,
}

impl StaticDetector {
    pub fn new(faces: Vec<FaceRecord>) -> Self {
        Self { faces }
    }
}

impl FaceDetector for StaticDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<FaceRecord>, DetectionError> {
        Ok(self.faces.clone())
    }
}
