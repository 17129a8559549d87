//! # facefit
//!
//! Fits photos to a display area, crops the first detected face and turns
//! face attributes into a short human-readable summary.
//!
//! # Architecture: One Photo, Four Steps
//!
//! ```text
//! 1. Fit        photo     →  fitted JPEG       (integer downsample, quality 80)
//! 2. Detect     fitted    →  face records      (pluggable FaceDetector)
//! 3. Summarize  records   →  text              (smile, eyes, head direction)
//! 4. Crop       fitted    →  face JPEG         (first record, clamped to bounds)
//! ```
//!
//! Every step takes its inputs as arguments and returns its outputs. There is
//! no shared "current photo", so photos can be processed in parallel by
//! [`batch`] without any locking.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Sample-size fitting, face-box clamping, JPEG persistence |
//! | [`detect`] | [`FaceDetector`](detect::FaceDetector) trait, face records, JSON sidecar detector |
//! | [`summary`] | Face attributes → fixed-format summary text |
//! | [`pipeline`] | Fit → detect → summarize → crop for one photo, plus the display policy |
//! | [`batch`] | Directory walk and parallel processing with progress events |
//! | [`config`] | `facefit.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Detection Is a Boundary
//!
//! Face detection is someone else's model. The crate only defines what a
//! detector returns and ships a sidecar-file detector, so runs are
//! reproducible and the rest of the pipeline is testable without a model.
//!
//! ## Integer Downsampling
//!
//! Photos are reduced by a whole-number factor chosen so the result never
//! drops below the display area on either axis. Scaling to fill the screen
//! exactly is left to whatever displays the image.

pub mod batch;
pub mod config;
pub mod detect;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_helpers;
