//! Text summary of detected face attributes.
//!
//! Each face record becomes one paragraph of fixed-format judgments:
//!
//! ```text
//! Smile: Yes
//! Left eye: Close
//! Right eye: Open
//!  Person's movement:Looking right
//!
//! ```
//!
//! Probabilities are judged against [`PROBABILITY_THRESHOLD`]; head yaw
//! against ±[`YAW_THRESHOLD_DEGREES`]. A probability the detector did not
//! report counts as 0 for that face only.

use crate::detect::FaceRecord;
use serde::Serialize;
use std::fmt;

/// A probability strictly above this counts as "yes" / "open".
pub const PROBABILITY_THRESHOLD: f32 = 0.5;

/// Yaw beyond this many degrees either way counts as looking sideways.
pub const YAW_THRESHOLD_DEGREES: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeState {
    Open,
    Closed,
}

impl EyeState {
    fn from_probability(probability: Option<f32>) -> Self {
        if probability.unwrap_or(0.0) > PROBABILITY_THRESHOLD {
            Self::Open
        } else {
            Self::Closed
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Close",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadDirection {
    Left,
    Straight,
    Right,
}

impl HeadDirection {
    /// NaN and exactly ±12° both land on `Straight`.
    pub fn from_yaw(degrees: f32) -> Self {
        if degrees > YAW_THRESHOLD_DEGREES {
            Self::Right
        } else if degrees < -YAW_THRESHOLD_DEGREES {
            Self::Left
        } else {
            Self::Straight
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Left => "Looking left",
            Self::Straight => "Looking straight",
            Self::Right => "Looking right",
        }
    }
}

/// Judgments derived from a single face record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaceAttributes {
    pub smiling: bool,
    pub left_eye: EyeState,
    pub right_eye: EyeState,
    pub head: HeadDirection,
}

impl FaceAttributes {
    pub fn from_record(record: &FaceRecord) -> Self {
        Self {
            smiling: record.smiling_probability.unwrap_or(0.0) > PROBABILITY_THRESHOLD,
            left_eye: EyeState::from_probability(record.left_eye_open_probability),
            right_eye: EyeState::from_probability(record.right_eye_open_probability),
            head: HeadDirection::from_yaw(record.head_euler_angle_y),
        }
    }
}

impl fmt::Display for FaceAttributes {
    /// Renders one paragraph, including its trailing blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Smile: {}\nLeft eye: {}\nRight eye: {}\n Person's movement:{}\n\n",
            if self.smiling { "Yes" } else { "No" },
            self.left_eye.label(),
            self.right_eye.label(),
            self.head.label(),
        )
    }
}

/// Summarize face records as text, one paragraph per record in input order.
///
/// No records gives an empty string.
pub fn summarize(faces: &[FaceRecord]) -> String {
    faces
        .iter()
        .map(|face| FaceAttributes::from_record(face).to_string())
        .collect()
}
