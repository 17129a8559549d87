//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{CropRegion, Rect};

/// Calculate the integer downscale factor for decoding a source into a display area.
///
/// `floor(min(src_w / tgt_w, src_h / tgt_h))`, never below 1. A zero target
/// dimension (view not laid out yet) yields 1 instead of dividing by zero.
///
/// # Examples
/// ```
/// # use facefit::imaging::calculate_sample_size;
/// // 4000x3000 photo into a 1000x1000 view → 3 (limited by height)
/// assert_eq!(calculate_sample_size((4000, 3000), (1000, 1000)), 3);
///
/// // Source smaller than the view is never upsampled
/// assert_eq!(calculate_sample_size((640, 480), (1080, 1920)), 1);
/// ```
pub fn calculate_sample_size(source: (u32, u32), target: (u32, u32)) -> u32 {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    if tgt_w == 0 || tgt_h == 0 {
        return 1;
    }

    (src_w / tgt_w).min(src_h / tgt_h).max(1)
}

/// Dimensions of a source decoded at `sample_size`.
///
/// Each edge is divided (rounding down) and kept at least one pixel wide.
pub fn calculate_sampled_dimensions(source: (u32, u32), sample_size: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let sample = sample_size.max(1);
    ((src_w / sample).max(1), (src_h / sample).max(1))
}

/// Clamp a detector bounding box to an image of the given dimensions.
///
/// The origin is clamped to zero. Each extent is shortened to end at the
/// image edge when it would run past it, and is otherwise kept as reported
/// (a box starting left of the frame keeps its full width). Returns `None`
/// when either clamped extent is not positive.
pub fn clamp_face_region(image: (u32, u32), bbox: Rect) -> Option<CropRegion> {
    let (img_w, img_h) = (i64::from(image.0), i64::from(image.1));

    let x = i64::from(bbox.left).max(0);
    let y = i64::from(bbox.top).max(0);
    let (box_w, box_h) = (i64::from(bbox.width), i64::from(bbox.height));

    let width = if x + box_w > img_w { img_w - x } else { box_w };
    let height = if y + box_h > img_h { img_h - y } else { box_h };

    if width <= 0 || height <= 0 {
        return None;
    }

    // x < img_w and y < img_h here, so every value fits in u32
    Some(CropRegion {
        x: x as u32,
        y: y as u32,
        width: width as u32,
        height: height as u32,
    })
}
