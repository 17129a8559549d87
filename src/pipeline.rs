//! Single-photo pipeline: fit → detect → summarize → crop.
//!
//! ```text
//! ImageSource ──fit_image──▶ fitted image (+ JPEG at destination)
//!                               │
//!                          FaceDetector
//!                               │
//!              ┌────────────────┼──────────────────┐
//!           NoFaces        Faces { .. }      DetectionFailed
//!                      summary + crop of
//!                       the first face
//! ```
//!
//! Every intermediate value is passed explicitly; nothing here holds a
//! "current photo" between runs. [`DisplayState`] is the presentation side:
//! it decides what a viewer keeps on screen when a stage fails.

use crate::detect::{DetectionError, FaceDetector, FaceRecord};
use crate::imaging::{FitConfig, ImageBackend, ImageSource, ImagingError, crop_face, fit_image};
use crate::summary::summarize;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Message shown in place of a summary when detection fails.
pub const DEFAULT_DETECTION_ERROR_MESSAGE: &str = "Face detection failed";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Source unreadable: {0}")]
    SourceUnreadable(String),
    #[error("Face region empty: {0}")]
    EmptyRegion(String),
    #[error("Face detection failed: {0}")]
    DetectionFailed(String),
    #[error("Persist failed: {0}")]
    PersistFailed(String),
}

impl From<ImagingError> for PipelineError {
    fn from(err: ImagingError) -> Self {
        match err {
            ImagingError::SourceUnreadable(reason) => Self::SourceUnreadable(reason),
            e @ ImagingError::EmptyRegion { .. } => Self::EmptyRegion(e.to_string()),
            e @ ImagingError::PersistFailed { .. } => Self::PersistFailed(e.to_string()),
        }
    }
}

impl From<DetectionError> for PipelineError {
    fn from(err: DetectionError) -> Self {
        Self::DetectionFailed(err.to_string())
    }
}

/// What detection produced for a fitted photo.
#[derive(Debug)]
pub enum Outcome {
    /// The detector ran and found nothing. No crop is attempted.
    NoFaces,
    /// At least one face. `face` is the crop of the first record only.
    Faces {
        faces: Vec<FaceRecord>,
        summary: String,
        face: Result<DynamicImage, ImagingError>,
    },
    /// The detector failed. No crop is attempted.
    DetectionFailed(DetectionError),
}

/// Result of a pipeline run whose fit stage succeeded.
#[derive(Debug)]
pub struct PipelineRun {
    pub fitted: DynamicImage,
    pub outcome: Outcome,
}

impl PipelineRun {
    /// Summary text for display; empty when there are no faces or detection failed.
    pub fn summary(&self) -> &str {
        match &self.outcome {
            Outcome::Faces { summary, .. } => summary,
            _ => "",
        }
    }

    /// The cropped first face, if one was produced.
    pub fn face(&self) -> Option<&DynamicImage> {
        match &self.outcome {
            Outcome::Faces { face: Ok(face), .. } => Some(face),
            _ => None,
        }
    }

    pub fn faces(&self) -> &[FaceRecord] {
        match &self.outcome {
            Outcome::Faces { faces, .. } => faces,
            _ => &[],
        }
    }

    /// The non-fatal stage failure of this run, if any.
    pub fn error(&self) -> Option<PipelineError> {
        match &self.outcome {
            Outcome::DetectionFailed(e) => Some(PipelineError::DetectionFailed(e.to_string())),
            Outcome::Faces { face: Err(e), .. } => Some(PipelineError::EmptyRegion(e.to_string())),
            _ => None,
        }
    }
}

/// A configured pipeline. Cheap to build per photo.
pub struct Pipeline<'a, B: ImageBackend, D: FaceDetector + ?Sized> {
    pub backend: &'a B,
    pub detector: &'a D,
    pub fit: FitConfig,
}

impl<'a, B: ImageBackend, D: FaceDetector + ?Sized> Pipeline<'a, B, D> {
    pub fn new(backend: &'a B, detector: &'a D, fit: FitConfig) -> Self {
        Self {
            backend,
            detector,
            fit,
        }
    }

    /// Run the pipeline for one photo.
    ///
    /// Only the fit stage can fail the whole run (`SourceUnreadable`,
    /// `PersistFailed`). Detection and crop failures are carried in the
    /// returned [`Outcome`] because the fitted image already exists.
    pub fn run(
        &self,
        source: &ImageSource,
        destination: &Path,
    ) -> Result<PipelineRun, PipelineError> {
        let fitted = fit_image(self.backend, source, destination, &self.fit)?;
        let outcome = self.analyze(&fitted);
        Ok(PipelineRun { fitted, outcome })
    }

    /// Detect, summarize and crop on an already-fitted image.
    pub fn analyze(&self, fitted: &DynamicImage) -> Outcome {
        let faces = match self.detector.detect(fitted) {
            Ok(faces) => faces,
            Err(e) => {
                warn!(error = %e, "face detection failed");
                return Outcome::DetectionFailed(e);
            }
        };

        let Some(first) = faces.first() else {
            debug!("no faces detected");
            return Outcome::NoFaces;
        };

        let face = crop_face(self.backend, fitted, first.bounding_box).map(|crop| crop.image);
        if let Err(e) = &face {
            warn!(error = %e, "first face has no area inside the image");
        }
        debug!(count = faces.len(), "faces detected");

        Outcome::Faces {
            summary: summarize(&faces),
            face,
            faces,
        }
    }
}

/// What a viewer currently shows: the fitted photo, the face thumbnail and
/// the summary text.
#[derive(Debug, Clone)]
pub struct DisplayState {
    pub fitted: Option<DynamicImage>,
    pub face: Option<DynamicImage>,
    pub summary: String,
    detection_error_message: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(DEFAULT_DETECTION_ERROR_MESSAGE)
    }
}

impl DisplayState {
    pub fn new(detection_error_message: impl Into<String>) -> Self {
        Self {
            fitted: None,
            face: None,
            summary: String::new(),
            detection_error_message: detection_error_message.into(),
        }
    }

    /// Update what is shown from a pipeline result.
    ///
    /// - fit failed: nothing changes
    /// - fit succeeded: the photo is replaced and the summary cleared, then
    ///   - detection failed: summary becomes the error message
    ///   - faces found: summary text is shown; the face thumbnail is replaced
    ///     only if the crop succeeded
    ///
    /// The previous face thumbnail is kept whenever no new crop was produced.
    pub fn apply(&mut self, result: Result<PipelineRun, PipelineError>) {
        let run = match result {
            Ok(run) => run,
            Err(e) => {
                debug!(error = %e, "keeping previous display");
                return;
            }
        };

        self.fitted = Some(run.fitted);
        self.summary.clear();

        match run.outcome {
            Outcome::NoFaces => {}
            Outcome::DetectionFailed(_) => {
                self.summary = self.detection_error_message.clone();
            }
            Outcome::Faces { summary, face, .. } => {
                self.summary = summary;
                if let Ok(face) = face {
                    self.face = Some(face);
                }
            }
        }
    }
}
