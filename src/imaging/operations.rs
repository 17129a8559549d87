//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take a source and a target, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{calculate_sample_size, clamp_face_region};
use super::params::{CropRegion, DisplayTarget, FitParams, ImageSource, Quality, Rect};
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ImagingError {
    /// Missing file, unreadable stream, or corrupt data. Nothing was written.
    #[error("Source unreadable: {0}")]
    SourceUnreadable(String),
    /// The clamped face box has no area inside the image.
    #[error("Face region {bbox:?} has no area inside a {width}x{height} image")]
    EmptyRegion { bbox: Rect, width: u32, height: u32 },
    #[error("Failed to write {path}: {reason}")]
    PersistFailed { path: String, reason: String },
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Configuration for fitting a photo to a display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitConfig {
    pub target: DisplayTarget,
    pub quality: Quality,
}

/// Fit a photo to a display area and persist it as JPEG.
///
/// Decodes `source` reduced by the sample size for `config.target`, writes the
/// result to `destination` (overwriting it) and returns the in-memory image.
/// Any failure to open or decode the source is [`ImagingError::SourceUnreadable`]
/// and leaves `destination` untouched.
pub fn fit_image(
    backend: &impl ImageBackend,
    source: &ImageSource,
    destination: &Path,
    config: &FitConfig,
) -> Result<DynamicImage> {
    let dims = backend
        .identify(source)
        .map_err(|e| ImagingError::SourceUnreadable(e.to_string()))?;

    let sample_size = calculate_sample_size(
        (dims.width, dims.height),
        (config.target.width, config.target.height),
    );
    debug!(
        source = %source.describe(),
        width = dims.width,
        height = dims.height,
        sample_size,
        "fitting image"
    );

    backend
        .fit(&FitParams {
            source: source.clone(),
            output: destination.to_path_buf(),
            sample_size,
            quality: config.quality,
        })
        .map_err(|e| match e {
            BackendError::Decode(reason) => ImagingError::SourceUnreadable(reason),
            other => ImagingError::PersistFailed {
                path: destination.display().to_string(),
                reason: other.to_string(),
            },
        })
}

/// Decode a photo at full size, for cropping without fitting first.
pub fn decode_image(backend: &impl ImageBackend, source: &ImageSource) -> Result<DynamicImage> {
    backend
        .decode(source)
        .map_err(|e| ImagingError::SourceUnreadable(e.to_string()))
}

/// A cropped face together with the clamped region it was cut from.
#[derive(Debug, Clone)]
pub struct FaceCrop {
    pub region: CropRegion,
    pub image: DynamicImage,
}

/// Crop the region delimited by a face bounding box.
///
/// The box is clamped to the image first; a box with no area inside the
/// image yields [`ImagingError::EmptyRegion`].
pub fn crop_face(backend: &impl ImageBackend, image: &DynamicImage, bbox: Rect) -> Result<FaceCrop> {
    let (width, height) = (image.width(), image.height());
    let region = clamp_face_region((width, height), bbox).ok_or(ImagingError::EmptyRegion {
        bbox,
        width,
        height,
    })?;
    debug!(?bbox, ?region, width, height, "cropping face");

    Ok(FaceCrop {
        region,
        image: backend.crop(image, region),
    })
}

/// Encode an in-memory image as JPEG at `destination`.
pub fn save_image(
    backend: &impl ImageBackend,
    image: &DynamicImage,
    destination: &Path,
    quality: Quality,
) -> Result<()> {
    backend
        .save_jpeg(image, destination, quality)
        .map_err(|e| ImagingError::PersistFailed {
            path: destination.display().to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::backend::Dimensions;
    use crate::imaging::rust_backend::RustBackend;
    use crate::test_helpers::{create_test_png, gradient_image};

    fn config(width: u32, height: u32) -> FitConfig {
        FitConfig {
            target: DisplayTarget::new(width, height),
            quality: Quality::default(),
        }
    }

    #[test]
    fn fit_passes_computed_sample_size_to_backend() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 4000,
            height: 3000,
        }]);

        let image = fit_image(
            &backend,
            &ImageSource::from(Path::new("/photos/selfie.jpg")),
            Path::new("/out/original.jpg"),
            &config(1000, 1000),
        )
        .unwrap();

        assert_eq!((image.width(), image.height()), (1333, 1000));
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(
            ops[1],
            RecordedOp::Fit {
                source: "/photos/selfie.jpg".to_string(),
                output: "/out/original.jpg".to_string(),
                sample_size: 3,
                quality: 80,
            }
        );
    }

    #[test]
    fn fit_zero_sized_target_does_not_downsample() {
        for target in [(0, 800), (600, 0), (0, 0)] {
            let backend = MockBackend::with_dimensions(vec![Dimensions {
                width: 4000,
                height: 3000,
            }]);
            fit_image(
                &backend,
                &ImageSource::from(Path::new("/a.jpg")),
                Path::new("/b.jpg"),
                &config(target.0, target.1),
            )
            .unwrap();

            assert!(
                matches!(
                    backend.get_operations()[1],
                    RecordedOp::Fit { sample_size: 1, .. }
                ),
                "target {target:?}"
            );
        }
    }

    #[test]
    fn fit_unidentifiable_source_is_unreadable() {
        let backend = MockBackend::new();
        let result = fit_image(
            &backend,
            &ImageSource::from(vec![0u8; 4]),
            Path::new("/out.jpg"),
            &config(100, 100),
        );

        assert!(matches!(result, Err(ImagingError::SourceUnreadable(_))));
        // Never reached the fit stage
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn fit_missing_file_is_unreadable_and_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let destination = tmp.path().join("original.jpg");

        let result = fit_image(
            &RustBackend::new(),
            &ImageSource::from(tmp.path().join("missing.jpg")),
            &destination,
            &config(100, 100),
        );

        assert!(matches!(result, Err(ImagingError::SourceUnreadable(_))));
        assert!(!destination.exists());
    }

    #[test]
    fn fit_unwritable_destination_is_persist_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_png(&source, 40, 40);

        let result = fit_image(
            &RustBackend::new(),
            &ImageSource::from(source.as_path()),
            &tmp.path().join("no/such/dir/original.jpg"),
            &config(10, 10),
        );

        assert!(matches!(result, Err(ImagingError::PersistFailed { .. })));
    }

    #[test]
    fn fit_real_image_end_to_end() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_png(&source, 900, 600);
        let destination = tmp.path().join("original.jpg");

        let fitted = fit_image(
            &RustBackend::new(),
            &ImageSource::from(source.as_path()),
            &destination,
            &config(300, 300),
        )
        .unwrap();

        // min(900/300, 600/300) = 2
        assert_eq!((fitted.width(), fitted.height()), (450, 300));
        assert_eq!(image::image_dimensions(&destination).unwrap(), (450, 300));
    }

    #[test]
    fn decode_missing_file_is_unreadable() {
        let result = decode_image(
            &RustBackend::new(),
            &ImageSource::from(Path::new("/nonexistent/photo.png")),
        );
        assert!(matches!(result, Err(ImagingError::SourceUnreadable(_))));
    }

    #[test]
    fn decode_keeps_full_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("big.png");
        create_test_png(&source, 90, 60);

        let image = decode_image(&RustBackend::new(), &ImageSource::from(source.as_path())).unwrap();
        assert_eq!((image.width(), image.height()), (90, 60));
    }

    #[test]
    fn crop_overhanging_box_is_clamped() {
        let backend = MockBackend::new();
        let image = DynamicImage::new_rgb8(1000, 800);

        let crop = crop_face(&backend, &image, Rect::new(900, 0, 200, 100)).unwrap();
        let face = &crop.image;

        assert_eq!((face.width(), face.height()), (100, 100));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Crop(CropRegion {
                x: 900,
                y: 0,
                width: 100,
                height: 100
            })]
        );
    }

    #[test]
    fn crop_box_left_of_frame() {
        let backend = MockBackend::new();
        let image = DynamicImage::new_rgb8(500, 500);

        let crop = crop_face(&backend, &image, Rect::new(-50, 10, 80, 60)).unwrap();
        let face = &crop.image;
        assert_eq!((face.width(), face.height()), (80, 60));
        let expected = CropRegion {
            x: 0,
            y: 10,
            width: 80,
            height: 60,
        };
        // The returned region is the one the backend cropped
        assert_eq!(crop.region, expected);
        assert_eq!(backend.get_operations(), vec![RecordedOp::Crop(expected)]);
    }

    #[test]
    fn crop_box_outside_frame_is_empty_region() {
        let backend = MockBackend::new();
        let image = DynamicImage::new_rgb8(500, 500);

        let result = crop_face(&backend, &image, Rect::new(600, 0, 50, 50));
        assert!(matches!(
            result,
            Err(ImagingError::EmptyRegion {
                width: 500,
                height: 500,
                ..
            })
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn crop_inside_box_matches_direct_extraction() {
        let image = gradient_image(64, 48);
        let crop = crop_face(&RustBackend::new(), &image, Rect::new(10, 5, 20, 30)).unwrap();
        let direct = image.crop_imm(10, 5, 20, 30);
        assert_eq!(crop.image.to_rgb8().as_raw(), direct.to_rgb8().as_raw());
        assert_eq!(
            crop.region,
            CropRegion {
                x: 10,
                y: 5,
                width: 20,
                height: 30
            }
        );
    }

    #[test]
    fn save_image_reports_destination_on_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let destination = tmp.path().join("missing/face.jpg");
        let result = save_image(
            &RustBackend::new(),
            &DynamicImage::new_rgb8(4, 4),
            &destination,
            Quality::default(),
        );
        match result {
            Err(ImagingError::PersistFailed { path, .. }) => {
                assert!(path.ends_with("face.jpg"));
            }
            other => panic!("expected PersistFailed, got {other:?}"),
        }
    }
}
