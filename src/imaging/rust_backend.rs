//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Sample-size reduction | `DynamicImage::resize_exact` with `Triangle` filter |
//! | Crop | `DynamicImage::crop_imm` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_sampled_dimensions;
use super::params::{CropRegion, FitParams, ImageSource, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether `path` has an extension listed in [`supported_input_extensions`].
pub fn is_supported_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f` against a format-sniffing reader over the source.
///
/// The format is guessed from content, not extension: camera temp files and
/// piped bytes carry no reliable name.
fn with_reader<'a, T>(
    source: &'a ImageSource,
    f: impl FnOnce(ImageReaderKind<'a>) -> image::ImageResult<T>,
) -> Result<T, BackendError> {
    let label = source.describe();
    let decode_err = |e: &dyn std::fmt::Display| BackendError::Decode(format!("{label}: {e}"));

    let reader = match source {
        ImageSource::Path(path) => ImageReaderKind::File(
            ImageReader::open(path)
                .and_then(ImageReader::with_guessed_format)
                .map_err(|e| decode_err(&e))?,
        ),
        ImageSource::Bytes(bytes) => ImageReaderKind::Memory(
            ImageReader::new(Cursor::new(bytes.as_slice()))
                .with_guessed_format()
                .map_err(|e| decode_err(&e))?,
        ),
    };

    f(reader).map_err(|e| decode_err(&e))
}

/// The two concrete reader types behind an [`ImageSource`].
enum ImageReaderKind<'a> {
    File(ImageReader<std::io::BufReader<std::fs::File>>),
    Memory(ImageReader<Cursor<&'a [u8]>>),
}

impl ImageReaderKind<'_> {
    fn into_dimensions(self) -> image::ImageResult<(u32, u32)> {
        match self {
            Self::File(r) => r.into_dimensions(),
            Self::Memory(r) => r.into_dimensions(),
        }
    }

    fn decode(self) -> image::ImageResult<DynamicImage> {
        match self {
            Self::File(r) => r.decode(),
            Self::Memory(r) => r.decode(),
        }
    }
}

/// Load and decode an image from its source.
fn load_image(source: &ImageSource) -> Result<DynamicImage, BackendError> {
    with_reader(source, ImageReaderKind::decode)
}

/// Encode as baseline JPEG into memory.
///
/// JPEG has no alpha channel, so the image is flattened to RGB8 first.
fn encode_jpeg(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.value() as u8);
    rgb.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode(e.to_string()))?;
    Ok(buffer)
}

impl ImageBackend for RustBackend {
    fn identify(&self, source: &ImageSource) -> Result<Dimensions, BackendError> {
        let (width, height) = with_reader(source, ImageReaderKind::into_dimensions)?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, source: &ImageSource) -> Result<DynamicImage, BackendError> {
        load_image(source)
    }

    fn fit(&self, params: &FitParams) -> Result<DynamicImage, BackendError> {
        let img = load_image(&params.source)?;

        let fitted = if params.sample_size > 1 {
            let (w, h) =
                calculate_sampled_dimensions((img.width(), img.height()), params.sample_size);
            img.resize_exact(w, h, FilterType::Triangle)
        } else {
            img
        };

        // Encode fully before touching the destination so a failed encode
        // leaves any previous file intact.
        let bytes = encode_jpeg(&fitted, params.quality)?;
        std::fs::write(&params.output, bytes)?;
        Ok(fitted)
    }

    fn crop(&self, image: &DynamicImage, region: CropRegion) -> DynamicImage {
        image.crop_imm(region.x, region.y, region.width, region.height)
    }

    fn save_jpeg(
        &self,
        image: &DynamicImage,
        output: &Path,
        quality: Quality,
    ) -> Result<(), BackendError> {
        let bytes = encode_jpeg(image, quality)?;
        std::fs::write(output, bytes)?;
        Ok(())
    }
}
