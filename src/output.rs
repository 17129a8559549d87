//! CLI output formatting for every command.
//!
//! # Photo-First Display
//!
//! Each photo is shown by its positional index and file name, with paths and
//! results as indented context lines. The same layout is used by `run` and by
//! `batch` progress, so one photo reads the same either way.
//!
//! ## Run / Batch
//!
//! ```text
//! Photos (3)
//! 001 selfie.jpg
//!     Source: shots/selfie.jpg
//!     Fitted: out/selfie.jpg (1080x1440)
//!     Face: out/selfie-face.jpg
//!     Faces: 1
//! 002 group.jpg
//!     Source: shots/group.jpg
//!     Fitted: out/group.jpg (1080x810)
//!     Error: Face detection failed: Detector unavailable: ...
//!
//! Processed 3 photos, 3 fitted, 1 faces cropped, 1 errors
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::batch::{BatchEvent, BatchReport, PhotoReport};
use crate::imaging::CropRegion;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// fit / crop
// ============================================================================

/// ```text
/// selfie.jpg → out/selfie.jpg (1080x1440)
/// ```
pub fn format_fit_output(source: &str, output: &Path, dimensions: (u32, u32)) -> Vec<String> {
    vec![format!(
        "{} \u{2192} {} ({}x{})",
        source,
        output.display(),
        dimensions.0,
        dimensions.1
    )]
}

pub fn print_fit_output(source: &str, output: &Path, dimensions: (u32, u32)) {
    for line in format_fit_output(source, output, dimensions) {
        println!("{}", line);
    }
}

/// ```text
/// face at 120,80 200x240 → out/selfie-face.jpg
/// ```
pub fn format_crop_output(region: CropRegion, output: &Path) -> Vec<String> {
    vec![format!(
        "face at {},{} {}x{} \u{2192} {}",
        region.x,
        region.y,
        region.width,
        region.height,
        output.display()
    )]
}

pub fn print_crop_output(region: CropRegion, output: &Path) {
    for line in format_crop_output(region, output) {
        println!("{}", line);
    }
}

// ============================================================================
// run / batch
// ============================================================================

/// Format one photo's result: header plus indented context lines.
pub fn format_photo_report(index: usize, report: &PhotoReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        format_index(index),
        file_name(&report.source)
    )];
    lines.push(format!("    Source: {}", report.source.display()));

    if let Some(fitted) = &report.fitted {
        match report.dimensions {
            Some((w, h)) => lines.push(format!("    Fitted: {} ({}x{})", fitted.display(), w, h)),
            None => lines.push(format!("    Fitted: {}", fitted.display())),
        }
    }
    if let Some(face) = &report.face {
        lines.push(format!("    Face: {}", face.display()));
    }
    if !report.faces.is_empty() {
        lines.push(format!("    Faces: {}", report.faces.len()));
    }
    if let Some(error) = &report.error {
        lines.push(format!("    Error: {}", error));
    }
    lines
}

/// Format a single batch progress event as display lines.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Started { photo_count } => vec![format!("Photos ({})", photo_count)],
        BatchEvent::PhotoDone { index, report } => format_photo_report(*index, report),
    }
}

/// Closing line of a batch run.
pub fn format_batch_summary(report: &BatchReport) -> Vec<String> {
    vec![String::new(), format!("Processed {}", report)]
}

pub fn print_batch_summary(report: &BatchReport) {
    for line in format_batch_summary(report) {
        println!("{}", line);
    }
}

/// Format a `run` result: the photo block followed by the summary text
/// exactly as a viewer would show it.
pub fn format_run_output(report: &PhotoReport) -> Vec<String> {
    let mut lines = format_photo_report(1, report);
    if !report.summary.is_empty() {
        lines.push(String::new());
        lines.extend(report.summary.trim_end_matches('\n').lines().map(str::to_string));
    }
    lines
}

pub fn print_run_output(report: &PhotoReport) {
    for line in format_run_output(report) {
        println!("{}", line);
    }
}
