//! Directory-level processing.
//!
//! Walks a directory for photos and runs the [`pipeline`](crate::pipeline)
//! on each one. Face records for `shots/selfie.jpg` come from the sidecar
//! `shots/selfie.faces.json` (suffix configurable). Sidecar boxes are in the
//! pixel coordinates of the *fitted* image, since detection runs after the fit.
//!
//! ## Output Structure
//!
//! The output directory mirrors the input tree:
//!
//! ```text
//! shots/                       out/
//! ├── selfie.jpg               ├── selfie.jpg        # fitted photo (JPEG, quality 80)
//! ├── selfie.faces.json        ├── selfie-face.jpg   # crop of the first detected face
//! └── trip/                    └── trip/
//!     └── group.png                └── group.jpg     # no faces or detection failed → no crop
//! ```
//!
//! Output paths are planned for the whole batch before any photo is read. A
//! photo whose fitted or face JPEG would land on an input photo, or on the
//! output of another photo (`selfie.jpg` and `selfie.png` side by side), is
//! reported as a persist failure and nothing is written for it.
//!
//! ## Parallel Processing
//!
//! Photos are independent, so they are processed in parallel using
//! [rayon](https://docs.rs/rayon). The pool size comes from
//! `processing.max_processes`. A failing photo never stops the batch.

use crate::config::{FaceFitConfig, OutputConfig};
use crate::detect::{FaceDetector, SidecarDetector};
use crate::imaging::rust_backend::is_supported_photo;
use crate::imaging::{ImageBackend, ImageSource, Quality, save_image};
use crate::pipeline::{Outcome, Pipeline, PipelineError};
use crate::summary::FaceAttributes;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk {0}")]
    Walk(#[from] walkdir::Error),
}

/// Progress events emitted while a batch runs.
///
/// Events arrive in completion order, not input order.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started { photo_count: usize },
    PhotoDone { index: usize, report: PhotoReport },
}

/// What happened to a single photo.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoReport {
    pub source: PathBuf,
    /// The fitted JPEG, present when the fit stage succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitted: Option<PathBuf>,
    /// Fitted dimensions (width, height).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    /// The face crop JPEG, present when the first face was cropped and saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<PathBuf>,
    /// Judgments per detected face, in detector order.
    pub faces: Vec<FaceAttributes>,
    /// Summary text as a viewer would show it.
    pub summary: String,
    /// The stage failure, if any. A report can carry both outputs and an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhotoReport {
    fn failed(source: &Path, error: &PipelineError) -> Self {
        Self {
            source: source.to_path_buf(),
            fitted: None,
            dimensions: None,
            face: None,
            faces: Vec::new(),
            summary: String::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Aggregate of a batch run, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub photos: Vec<PhotoReport>,
}

impl BatchReport {
    pub fn fitted_count(&self) -> usize {
        self.photos.iter().filter(|p| p.fitted.is_some()).count()
    }

    pub fn face_count(&self) -> usize {
        self.photos.iter().filter(|p| p.face.is_some()).count()
    }

    pub fn error_count(&self) -> usize {
        self.photos.iter().filter(|p| p.error.is_some()).count()
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} photos, {} fitted, {} faces cropped, {} errors",
            self.photos.len(),
            self.fitted_count(),
            self.face_count(),
            self.error_count()
        )
    }
}

/// Where one photo's JPEGs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub fitted: PathBuf,
    pub face: PathBuf,
}

impl OutputPaths {
    /// Outputs written directly into `output_dir`, named from the photo's stem.
    pub fn flat(photo: &Path, output_dir: &Path, output: &OutputConfig) -> Self {
        let stem = file_stem(photo);
        Self {
            fitted: output_dir.join(output.fitted_name(&stem)),
            face: output_dir.join(output.face_name(&stem)),
        }
    }

    /// Outputs that mirror the photo's folder under `input_dir`:
    /// `in/trip/group.png` → `out/trip/group.jpg`.
    pub fn mirrored(
        input_dir: &Path,
        photo: &Path,
        output_dir: &Path,
        output: &OutputConfig,
    ) -> Self {
        let relative = photo
            .parent()
            .and_then(|parent| parent.strip_prefix(input_dir).ok())
            .unwrap_or(Path::new(""));
        Self::flat(photo, &output_dir.join(relative), output)
    }
}

/// Absolute form of a path that may not exist yet.
///
/// The longest existing ancestor is canonicalized and the rest re-appended,
/// so `out/a/x.jpg` and `./out/a/x.jpg` compare equal before `out/a` exists.
fn resolve_path(path: &Path) -> PathBuf {
    for ancestor in path.ancestors() {
        if let Ok(base) = std::fs::canonicalize(ancestor) {
            return match path.strip_prefix(ancestor) {
                Ok(rest) if !rest.as_os_str().is_empty() => base.join(rest),
                _ => base,
            };
        }
    }
    path.to_path_buf()
}

/// Find every decodable photo under `dir`, sorted by path.
///
/// `output_dir` is skipped when it lies inside `dir`, so earlier results are
/// never picked up as new inputs.
pub fn scan_photos(dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let skip = resolve_path(output_dir);
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || resolve_path(entry.path()) != skip
        });

    let mut photos = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_photo(entry.path()) {
            photos.push(entry.into_path());
        }
    }
    photos.sort();
    Ok(photos)
}

/// Plan the outputs of a whole batch.
///
/// Each photo gets its mirrored [`OutputPaths`], or a `PersistFailed` when one
/// of them is an input photo or is claimed by another photo too.
pub fn plan_outputs(
    input_dir: &Path,
    photos: &[PathBuf],
    output_dir: &Path,
    output: &OutputConfig,
) -> Vec<Result<OutputPaths, PipelineError>> {
    let planned: Vec<OutputPaths> = photos
        .iter()
        .map(|photo| OutputPaths::mirrored(input_dir, photo, output_dir, output))
        .collect();

    let inputs: HashSet<PathBuf> = photos.iter().map(|p| resolve_path(p)).collect();
    let mut claims: HashMap<PathBuf, usize> = HashMap::new();
    for paths in &planned {
        for target in [&paths.fitted, &paths.face] {
            *claims.entry(resolve_path(target)).or_default() += 1;
        }
    }

    planned
        .into_iter()
        .map(|paths| {
            for target in [&paths.fitted, &paths.face] {
                let key = resolve_path(target);
                if inputs.contains(&key) {
                    return Err(PipelineError::PersistFailed(format!(
                        "{} would overwrite an input photo",
                        target.display()
                    )));
                }
                if claims.get(&key).is_some_and(|&n| n > 1) {
                    return Err(PipelineError::PersistFailed(format!(
                        "{} is also the output of another photo",
                        target.display()
                    )));
                }
            }
            Ok(paths)
        })
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string())
}

/// Run the pipeline for one photo and persist its outputs under `output_dir`.
///
/// Refuses to write a fitted JPEG over the photo itself.
pub fn process_photo(
    backend: &impl ImageBackend,
    detector: &(impl FaceDetector + ?Sized),
    photo: &Path,
    output_dir: &Path,
    config: &FaceFitConfig,
) -> PhotoReport {
    let paths = OutputPaths::flat(photo, output_dir, &config.output);
    let source = resolve_path(photo);
    for target in [&paths.fitted, &paths.face] {
        if resolve_path(target) == source {
            let reason = format!("{} would overwrite its source", target.display());
            return PhotoReport::failed(photo, &PipelineError::PersistFailed(reason));
        }
    }
    process_photo_to(backend, detector, photo, &paths, config)
}

/// Run the pipeline for one photo with already-checked output paths.
fn process_photo_to(
    backend: &impl ImageBackend,
    detector: &(impl FaceDetector + ?Sized),
    photo: &Path,
    paths: &OutputPaths,
    config: &FaceFitConfig,
) -> PhotoReport {
    if let Some(parent) = paths.fitted.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            let reason = format!("{}: {}", parent.display(), e);
            return PhotoReport::failed(photo, &PipelineError::PersistFailed(reason));
        }
    }

    let pipeline = Pipeline::new(backend, detector, config.fit_config());
    let run = match pipeline.run(&ImageSource::from(photo), &paths.fitted) {
        Ok(run) => run,
        Err(e) => return PhotoReport::failed(photo, &e),
    };

    let mut error = run.error().map(|e| e.to_string());
    let face = run.face().and_then(|face| {
        let quality = Quality::new(config.output.quality);
        match save_image(backend, face, &paths.face, quality) {
            Ok(()) => Some(paths.face.clone()),
            Err(e) => {
                error = Some(PipelineError::from(e).to_string());
                None
            }
        }
    });

    let summary = match &run.outcome {
        Outcome::DetectionFailed(_) => config.detection.error_message.clone(),
        _ => run.summary().to_string(),
    };

    PhotoReport {
        source: photo.to_path_buf(),
        fitted: Some(paths.fitted.clone()),
        dimensions: Some((run.fitted.width(), run.fitted.height())),
        face,
        faces: run.faces().iter().map(FaceAttributes::from_record).collect(),
        summary,
        error,
    }
}

/// Process every photo found under `input_dir` in parallel, each with its own
/// sidecar detector.
///
/// Creates `output_dir` if needed. Reports are returned in input order.
pub fn process_batch(
    backend: &impl ImageBackend,
    input_dir: &Path,
    photos: &[PathBuf],
    output_dir: &Path,
    config: &FaceFitConfig,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchReport, BatchError> {
    std::fs::create_dir_all(output_dir)?;
    let plan = plan_outputs(input_dir, photos, output_dir, &config.output);

    if let Some(tx) = &events {
        tx.send(BatchEvent::Started {
            photo_count: photos.len(),
        })
        .ok();
    }

    let reports: Vec<PhotoReport> = photos
        .par_iter()
        .zip(plan.into_par_iter())
        .enumerate()
        .map_with(events, |events, (index, (photo, planned))| {
            let report = match planned {
                Ok(paths) => {
                    let detector =
                        SidecarDetector::beside(photo, &config.detection.sidecar_suffix);
                    process_photo_to(backend, &detector, photo, &paths, config)
                }
                Err(e) => PhotoReport::failed(photo, &e),
            };
            if let Some(tx) = events {
                tx.send(BatchEvent::PhotoDone {
                    index: index + 1,
                    report: report.clone(),
                })
                .ok();
            }
            report
        })
        .collect();

    Ok(BatchReport { photos: reports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{DetectionError, FaceRecord, StaticDetector};
    use crate::imaging::RustBackend;
    use crate::imaging::Rect;
    use crate::test_helpers::{create_test_jpeg, create_test_png, write_sidecar};
    use image::DynamicImage;

    fn small_display() -> FaceFitConfig {
        let mut config = FaceFitConfig::default();
        config.display.width = 100;
        config.display.height = 100;
        config
    }

    struct BrokenDetector;

    impl FaceDetector for BrokenDetector {
        fn detect(&self, _image: &DynamicImage) -> Result<Vec<FaceRecord>, DetectionError> {
            Err(DetectionError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn scan_photos_finds_supported_files_sorted() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("nested")).unwrap();
        create_test_jpeg(&tmp.path().join("b.jpg"), 8, 8);
        create_test_png(&tmp.path().join("nested/a.png"), 8, 8);
        std::fs::write(tmp.path().join("b.faces.json"), "[]").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "hi").unwrap();

        let photos = scan_photos(tmp.path(), &tmp.path().join("out")).unwrap();
        let names: Vec<_> = photos
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("b.jpg"), PathBuf::from("nested/a.png")]);
    }

    #[test]
    fn scan_photos_missing_dir_errors() {
        let missing = Path::new("/nonexistent/photos");
        assert!(scan_photos(missing, &missing.join("out")).is_err());
    }

    #[test]
    fn process_photo_writes_fitted_and_face() {
        let tmp = tempfile::TempDir::new().unwrap();
        let photo = tmp.path().join("selfie.png");
        create_test_png(&photo, 400, 300);
        let out = tmp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        let detector = StaticDetector::new(vec![FaceRecord {
            smiling_probability: Some(0.9),
            ..FaceRecord::new(Rect::new(20, 20, 60, 60))
        }]);

        let report = process_photo(&RustBackend::new(), &detector, &photo, &out, &small_display());

        // min(400/100, 300/100) = 3 → 133x100
        assert_eq!(report.dimensions, Some((133, 100)));
        assert_eq!(report.fitted.as_deref(), Some(out.join("selfie.jpg").as_path()));
        assert_eq!(report.face.as_deref(), Some(out.join("selfie-face.jpg").as_path()));
        assert_eq!(image::image_dimensions(out.join("selfie-face.jpg")).unwrap(), (60, 60));
        assert_eq!(report.faces.len(), 1);
        assert!(report.faces[0].smiling);
        assert!(report.error.is_none());
    }

    #[test]
    fn process_photo_detection_failure_shows_message() {
        let tmp = tempfile::TempDir::new().unwrap();
        let photo = tmp.path().join("selfie.png");
        create_test_png(&photo, 50, 50);

        let report =
            process_photo(&RustBackend::new(), &BrokenDetector, &photo, tmp.path(), &small_display());

        assert!(report.fitted.is_some());
        assert!(report.face.is_none());
        assert_eq!(report.summary, "Face detection failed");
        assert!(report.error.unwrap().contains("offline"));
    }

    #[test]
    fn process_photo_refuses_to_overwrite_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let photo = tmp.path().join("selfie.jpg");
        create_test_jpeg(&photo, 40, 40);
        let before = std::fs::read(&photo).unwrap();

        let report = process_photo(
            &RustBackend::new(),
            &StaticDetector::default(),
            &photo,
            tmp.path(),
            &small_display(),
        );

        assert!(report.fitted.is_none());
        assert!(report.error.unwrap().starts_with("Persist failed"));
        assert_eq!(std::fs::read(&photo).unwrap(), before);
    }

    #[test]
    fn process_photo_unreadable_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let photo = tmp.path().join("broken.jpg");
        std::fs::write(&photo, b"garbage").unwrap();
        let out = tmp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();

        let report = process_photo(
            &RustBackend::new(),
            &StaticDetector::default(),
            &photo,
            &out,
            &small_display(),
        );

        assert!(report.fitted.is_none());
        assert!(report.error.unwrap().starts_with("Source unreadable"));
        assert!(!out.join("broken.jpg").exists());
    }

    #[test]
    fn process_batch_uses_sidecars_and_keeps_input_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        create_test_png(&input.join("a.png"), 200, 200);
        create_test_png(&input.join("b.png"), 200, 200);
        create_test_png(&input.join("c.png"), 200, 200);
        write_sidecar(
            &input.join("a.faces.json"),
            &[FaceRecord::new(Rect::new(10, 10, 30, 30))],
        );
        write_sidecar(&input.join("b.faces.json"), &[]);
        // c has no sidecar → detection failure

        let out = tmp.path().join("out");
        let photos = scan_photos(&input, &out).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        let report = process_batch(
            &RustBackend::new(),
            &input,
            &photos,
            &out,
            &small_display(),
            Some(tx),
        )
        .unwrap();

        let sources: Vec<_> = report
            .photos
            .iter()
            .map(|p| p.source.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(sources, vec!["a.png", "b.png", "c.png"]);
        assert_eq!(report.fitted_count(), 3);
        assert_eq!(report.face_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert!(out.join("a-face.jpg").exists());
        assert!(!out.join("b-face.jpg").exists());
        assert_eq!(report.photos[2].summary, "Face detection failed");

        let events: Vec<_> = rx.iter().collect();
        assert!(matches!(events[0], BatchEvent::Started { photo_count: 3 }));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn scan_photos_skips_output_dir_inside_input() {
        let tmp = tempfile::TempDir::new().unwrap();
        create_test_png(&tmp.path().join("selfie.png"), 8, 8);
        let out = tmp.path().join("facefit-out");
        std::fs::create_dir_all(&out).unwrap();
        create_test_jpeg(&out.join("selfie.jpg"), 8, 8);
        create_test_jpeg(&out.join("selfie-face.jpg"), 4, 4);

        let photos = scan_photos(tmp.path(), &out).unwrap();

        assert_eq!(photos, vec![tmp.path().join("selfie.png")]);
    }

    #[test]
    fn mirrored_outputs_follow_input_tree() {
        let output = OutputConfig::default();
        let paths = OutputPaths::mirrored(
            Path::new("in"),
            Path::new("in/trip/group.png"),
            Path::new("out"),
            &output,
        );
        assert_eq!(paths.fitted, PathBuf::from("out/trip/group.jpg"));
        assert_eq!(paths.face, PathBuf::from("out/trip/group-face.jpg"));

        // Outside the input tree: named into the output root
        let stray = OutputPaths::mirrored(
            Path::new("in"),
            Path::new("elsewhere/group.png"),
            Path::new("out"),
            &output,
        );
        assert_eq!(stray.fitted, PathBuf::from("out/group.jpg"));
    }

    #[test]
    fn plan_outputs_rejects_outputs_landing_on_inputs() {
        let tmp = tempfile::TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("selfie.jpg"), 8, 8);
        create_test_png(&tmp.path().join("selfie.png"), 8, 8);
        create_test_png(&tmp.path().join("solo.png"), 8, 8);
        let photos = scan_photos(tmp.path(), tmp.path()).unwrap();

        let plan = plan_outputs(tmp.path(), &photos, tmp.path(), &OutputConfig::default());

        // selfie.jpg would overwrite itself, selfie.png would overwrite selfie.jpg
        for refused in &plan[..2] {
            assert!(
                matches!(refused, Err(PipelineError::PersistFailed(m)) if m.contains("input photo"))
            );
        }
        assert_eq!(plan[2].as_ref().unwrap().fitted, tmp.path().join("solo.jpg"));
    }

    #[test]
    fn process_batch_into_input_dir_leaves_inputs_untouched() {
        let tmp = tempfile::TempDir::new().unwrap();
        let jpeg = tmp.path().join("selfie.jpg");
        create_test_jpeg(&jpeg, 300, 300);
        create_test_png(&tmp.path().join("selfie.png"), 200, 200);
        let before = std::fs::read(&jpeg).unwrap();

        let photos = scan_photos(tmp.path(), tmp.path()).unwrap();
        let report = process_batch(
            &RustBackend::new(),
            tmp.path(),
            &photos,
            tmp.path(),
            &small_display(),
            None,
        )
        .unwrap();

        assert_eq!(report.fitted_count(), 0);
        assert_eq!(report.error_count(), 2);
        for photo in &report.photos {
            assert!(photo.error.as_deref().unwrap().starts_with("Persist failed"));
        }
        assert_eq!(std::fs::read(&jpeg).unwrap(), before);
    }

    #[test]
    fn process_batch_refuses_shared_outputs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        create_test_jpeg(&input.join("selfie.jpg"), 300, 300);
        create_test_png(&input.join("selfie.png"), 200, 200);
        create_test_png(&input.join("solo.png"), 200, 200);
        let out = tmp.path().join("out");

        let photos = scan_photos(&input, &out).unwrap();
        let (backend, config) = (RustBackend::new(), small_display());
        let report = process_batch(&backend, &input, &photos, &out, &config, None).unwrap();

        // Both selfies claim out/selfie.jpg
        for selfie in &report.photos[..2] {
            assert!(selfie.fitted.is_none());
            assert!(selfie.error.as_deref().unwrap().contains("another photo"));
        }
        assert!(!out.join("selfie.jpg").exists());
        assert_eq!(report.fitted_count(), 1);
        assert_eq!(report.photos[2].dimensions, Some((100, 100)));
    }

    #[test]
    fn process_batch_mirrors_same_stem_photos_in_subfolders() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("in");
        std::fs::create_dir_all(input.join("a")).unwrap();
        std::fs::create_dir_all(input.join("b")).unwrap();
        create_test_png(&input.join("a/selfie.png"), 300, 200);
        create_test_png(&input.join("b/selfie.png"), 200, 400);
        let out = tmp.path().join("out");

        let photos = scan_photos(&input, &out).unwrap();
        let (backend, config) = (RustBackend::new(), small_display());
        let report = process_batch(&backend, &input, &photos, &out, &config, None).unwrap();

        assert_eq!(report.fitted_count(), 2);
        assert_eq!(report.error_count(), 0);
        // 300x200 / 2 and 200x400 / 2
        assert_eq!(image::image_dimensions(out.join("a/selfie.jpg")).unwrap(), (150, 100));
        assert_eq!(image::image_dimensions(out.join("b/selfie.jpg")).unwrap(), (100, 200));
        assert_eq!(report.photos[0].dimensions, Some((150, 100)));
        assert_eq!(report.photos[1].dimensions, Some((100, 200)));
    }

    #[test]
    fn sidecar_boxes_are_in_fitted_pixels() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        create_test_png(&input.join("selfie.png"), 400, 400);
        // Fits to 100x100. In original pixels this box would be a 60x60 crop.
        write_sidecar(
            &input.join("selfie.faces.json"),
            &[FaceRecord::new(Rect::new(80, 80, 60, 60))],
        );
        let out = tmp.path().join("out");

        let photos = scan_photos(&input, &out).unwrap();
        let (backend, config) = (RustBackend::new(), small_display());
        let report = process_batch(&backend, &input, &photos, &out, &config, None).unwrap();

        assert_eq!(report.photos[0].dimensions, Some((100, 100)));
        assert_eq!(image::image_dimensions(out.join("selfie-face.jpg")).unwrap(), (20, 20));
    }

    #[test]
    fn batch_report_display() {
        let report = BatchReport::default();
        assert_eq!(
            report.to_string(),
            "0 photos, 0 fitted, 0 faces cropped, 0 errors"
        );
    }
}
