//! Configuration module.
//!
//! Handles loading, validating, and merging `facefit.toml`. Stock defaults
//! are overridden by whatever the user file sets; CLI flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [display]
//! width = 1080              # Viewport the fitted photo is shown in
//! height = 1920
//!
//! [output]
//! quality = 80              # JPEG quality (1-100)
//! fitted_suffix = ""        # selfie.jpg → selfie.jpg in the output dir
//! face_suffix = "-face"     # selfie.jpg → selfie-face.jpg
//!
//! [detection]
//! sidecar_suffix = ".faces.json"
//! error_message = "Face detection failed"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers for batch (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [display]
//! width = 720
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{DisplayTarget, FitConfig, Quality};
use crate::pipeline::DEFAULT_DETECTION_ERROR_MESSAGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "facefit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `facefit.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceFitConfig {
    /// Viewport the fitted photo is displayed in.
    pub display: DisplayConfig,
    /// Where and how fitted photos and face crops are written.
    pub output: OutputConfig,
    /// Detector sidecar lookup and failure text.
    pub detection: DetectionConfig,
    /// Parallel batch settings.
    pub processing: ProcessingConfig,
}

impl FaceFitConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality == 0 || self.output.quality > 100 {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.output.fitted_suffix == self.output.face_suffix {
            return Err(ConfigError::Validation(
                "output.fitted_suffix and output.face_suffix must differ".into(),
            ));
        }
        if self.detection.sidecar_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "detection.sidecar_suffix must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The fit settings for the pipeline.
    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            target: DisplayTarget::new(self.display.width, self.display.height),
            quality: Quality::new(self.output.quality),
        }
    }
}

/// Display area settings.
///
/// A zero dimension is allowed and disables downsampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality for fitted photos and face crops (1 = worst, 100 = best).
    pub quality: u32,
    /// Appended to the photo's stem for the fitted JPEG.
    pub fitted_suffix: String,
    /// Appended to the photo's stem for the face crop JPEG.
    pub face_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: 80,
            fitted_suffix: String::new(),
            face_suffix: "-face".to_string(),
        }
    }
}

impl OutputConfig {
    /// File name of the fitted JPEG for a photo stem.
    pub fn fitted_name(&self, stem: &str) -> String {
        format!("{stem}{}.jpg", self.fitted_suffix)
    }

    /// File name of the face crop JPEG for a photo stem.
    pub fn face_name(&self, stem: &str) -> String {
        format!("{stem}{}.jpg", self.face_suffix)
    }
}

/// Detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Appended to a photo's stem to find its face-record sidecar.
    pub sidecar_suffix: String,
    /// Shown instead of a summary when detection fails.
    pub error_message: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sidecar_suffix: ".faces.json".to_string(),
            error_message: DEFAULT_DETECTION_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel batch workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(FaceFitConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<FaceFitConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FaceFitConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load an explicit config file. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<FaceFitConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Load `facefit.toml` from the given directory.
///
/// Falls back to stock defaults when the file does not exist.
pub fn load_config(dir: &Path) -> Result<FaceFitConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return resolve_config(None);
    }
    load_config_file(&config_path)
}

/// Returns a fully-commented stock `facefit.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# facefit Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Display area
# ---------------------------------------------------------------------------
[display]
# Viewport the fitted photo is shown in. Photos are decoded at an integer
# fraction of their size so they stay at least this large.
# A zero dimension disables downsampling.
width = 1080
height = 1920

# ---------------------------------------------------------------------------
# Output files
# ---------------------------------------------------------------------------
[output]
# JPEG quality for fitted photos and face crops (1 = worst, 100 = best).
quality = 80

# Appended to the photo's file stem: selfie.jpg -> selfie<suffix>.jpg
fitted_suffix = ""
face_suffix = "-face"

# ---------------------------------------------------------------------------
# Face detection
# ---------------------------------------------------------------------------
[detection]
# Face records for selfie.jpg are read from selfie<sidecar_suffix>.
sidecar_suffix = ".faces.json"

# Shown instead of the face summary when detection fails.
error_message = "Face detection failed"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for the batch command.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
