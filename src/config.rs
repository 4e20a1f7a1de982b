//! Configuration management for the crouch-start analysis tool

use crate::constants::{
    COM_LOWER_WEIGHT, COM_UPPER_WEIGHT, DEFAULT_COM_BRAKE_LIMIT_PX, DEFAULT_HEIGHT_CM, DEFAULT_KNEE_GAP_MAX_PERCENT,
    DEFAULT_LANDMARK_INPUT_SIZE, DEFAULT_MIN_DETECTION_CONFIDENCE, DEFAULT_PARALLAX_FACTOR, DEFAULT_SHIN_ANGLE_MAX,
    DEFAULT_SHIN_ANGLE_MIN, DEFAULT_SHIN_TRUNK_MAX_DIFF,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pose detector configuration
    pub detector: DetectorConfig,

    /// Metric computation and grading configuration
    pub analysis: AnalysisConfig,

    /// Skeleton overlay configuration
    pub overlay: OverlayConfig,

    /// Report output configuration
    pub output: OutputConfig,
}

/// Pose detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Detector backend name ("file" or "onnx")
    pub backend: String,

    /// Path to the BlazePose landmark ONNX model
    pub model_path: PathBuf,

    /// Minimum pose presence score (0.0-1.0)
    pub min_detection_confidence: f32,

    /// Square model input resolution in pixels
    pub input_size: u32,
}

/// Metric computation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Athlete height used when none is given on the command line
    pub default_height_cm: f64,

    /// Weight of the shoulder midpoint in the centre of mass estimate
    pub com_upper_weight: f64,

    /// Weight of the hip midpoint in the centre of mass estimate
    pub com_lower_weight: f64,

    /// Knee gap multiplier applied when the camera is off-axis
    pub parallax_factor: f64,

    /// Landing phase grading thresholds
    pub landing: LandingThresholds,
}

/// Landing phase grading thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingThresholds {
    /// COM offset (pixels) at or below which braking counts as heavy
    pub com_brake_limit_px: f64,

    /// Lower bound of the good shin angle window (degrees)
    pub shin_angle_min: f64,

    /// Upper bound of the good shin angle window (degrees)
    pub shin_angle_max: f64,

    /// Largest acceptable knee gap as percent of height
    pub knee_gap_max_percent: f64,

    /// Largest acceptable shin/trunk angle difference (degrees)
    pub shin_trunk_max_diff: f64,
}

/// Skeleton overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Line and marker colour as RGB
    pub color: [u8; 3],

    /// Line thickness in pixels
    pub thickness: u32,

    /// Joint marker radius in pixels
    pub marker_radius: u32,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format ("text" or "yaml")
    pub format: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            model_path: PathBuf::from("assets/pose_landmark_full.onnx"),
            min_detection_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
            input_size: DEFAULT_LANDMARK_INPUT_SIZE,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_height_cm: DEFAULT_HEIGHT_CM,
            com_upper_weight: COM_UPPER_WEIGHT,
            com_lower_weight: COM_LOWER_WEIGHT,
            parallax_factor: DEFAULT_PARALLAX_FACTOR,
            landing: LandingThresholds::default(),
        }
    }
}

impl Default for LandingThresholds {
    fn default() -> Self {
        Self {
            com_brake_limit_px: DEFAULT_COM_BRAKE_LIMIT_PX,
            shin_angle_min: DEFAULT_SHIN_ANGLE_MIN,
            shin_angle_max: DEFAULT_SHIN_ANGLE_MAX,
            knee_gap_max_percent: DEFAULT_KNEE_GAP_MAX_PERCENT,
            shin_trunk_max_diff: DEFAULT_SHIN_TRUNK_MAX_DIFF,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            thickness: 2,
            marker_radius: 2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid YAML for this schema
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        // Detector
        if !(0.0..=1.0).contains(&self.detector.min_detection_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.detector.input_size == 0 {
            return Err(Error::ConfigError("Model input size must be greater than 0".to_string()));
        }
        if self.detector.backend == "onnx" && !self.detector.model_path.exists() {
            return Err(Error::ConfigError(format!(
                "Pose landmark model not found: {}",
                self.detector.model_path.display()
            )));
        }

        // Analysis
        let analysis = &self.analysis;
        if analysis.default_height_cm <= 0.0 || !analysis.default_height_cm.is_finite() {
            return Err(Error::ConfigError("Default height must be a positive number".to_string()));
        }
        if !(analysis.parallax_factor > 0.0 && analysis.parallax_factor <= 1.0) {
            return Err(Error::ConfigError(
                "Parallax factor must be in the range (0.0, 1.0]".to_string(),
            ));
        }
        if (analysis.com_upper_weight + analysis.com_lower_weight - 1.0).abs() > 1e-6 {
            return Err(Error::ConfigError("Centre of mass weights must sum to 1.0".to_string()));
        }
        if analysis.landing.shin_angle_min > analysis.landing.shin_angle_max {
            return Err(Error::ConfigError(
                "Shin angle minimum must not exceed the maximum".to_string(),
            ));
        }

        // Overlay
        if self.overlay.thickness == 0 {
            return Err(Error::ConfigError("Overlay thickness must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Crouch-Start Analysis Configuration

# Pose detector
detector:
  backend: "file"
  model_path: "assets/pose_landmark_full.onnx"
  min_detection_confidence: 0.7
  input_size: 256

# Metric computation
analysis:
  default_height_cm: 170.0
  com_upper_weight: 0.4
  com_lower_weight: 0.6
  parallax_factor: 0.7
  landing:
    com_brake_limit_px: -5.0
    shin_angle_min: 35.0
    shin_angle_max: 45.0
    knee_gap_max_percent: 10.0
    shin_trunk_max_diff: 5.0

# Skeleton overlay
overlay:
  color: [0, 255, 0]
  thickness: 2
  marker_radius: 2

# Report output
output:
  format: "text"
"#;
