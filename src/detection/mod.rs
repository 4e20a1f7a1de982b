//! Pose detection backends.
//!
//! The analysis never runs a network itself; it asks a [`PoseDetector`] for
//! the landmarks of the person in a frame. Landmarks exported by an external
//! estimator can be read back with [`LandmarkFileDetector`]; with the `onnx`
//! feature a BlazePose landmark model can be run directly.

/// Landmarks read from an exported file
pub mod file;

/// BlazePose landmark inference with ONNX Runtime
#[cfg(feature = "onnx")]
pub mod onnx;

pub use file::LandmarkFileDetector;
#[cfg(feature = "onnx")]
pub use onnx::OnnxPoseDetector;

use crate::config::DetectorConfig;
use crate::landmarks::PoseLandmarks;
use crate::{Error, Result};
use image::DynamicImage;
use std::path::Path;

/// Source of body landmarks for a single still image
pub trait PoseDetector {
    /// Detect the pose of the athlete in `image`
    ///
    /// Returns `Ok(None)` when no person is found.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend itself fails
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<PoseLandmarks>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Create a detector for `image_path`
///
/// An explicit `landmarks` file always wins over the configured backend.
///
/// # Errors
///
/// Returns an error if the backend is unknown, was not compiled in, or fails
/// to initialize
pub fn create_detector(
    config: &DetectorConfig,
    image_path: &Path,
    landmarks: Option<&Path>,
) -> Result<Box<dyn PoseDetector>> {
    if let Some(path) = landmarks {
        return Ok(Box::new(LandmarkFileDetector::new(path)));
    }

    match config.backend.to_lowercase().as_str() {
        "file" | "landmarks" => Ok(Box::new(LandmarkFileDetector::for_image(image_path)?)),
        #[cfg(feature = "onnx")]
        "onnx" => Ok(Box::new(OnnxPoseDetector::new(config)?)),
        #[cfg(not(feature = "onnx"))]
        "onnx" => Err(Error::DetectorError(
            "ONNX backend requested but the crate was built without the `onnx` feature".to_string(),
        )),
        name => Err(Error::DetectorError(format!("Unknown detector backend: {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_backend() {
        let config = DetectorConfig {
            backend: "openpose".to_string(),
            ..DetectorConfig::default()
        };
        let result = create_detector(&config, Path::new("frame.jpg"), None);
        assert!(matches!(result, Err(Error::DetectorError(_))));
    }

    #[test]
    fn test_explicit_landmarks_override_backend() {
        let config = DetectorConfig {
            backend: "openpose".to_string(),
            ..DetectorConfig::default()
        };
        let detector = create_detector(&config, Path::new("frame.jpg"), Some(Path::new("frame.yaml"))).unwrap();
        assert_eq!(detector.name(), "landmark-file");
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_backend_requires_feature() {
        let config = DetectorConfig {
            backend: "onnx".to_string(),
            ..DetectorConfig::default()
        };
        let result = create_detector(&config, Path::new("frame.jpg"), None);
        match result {
            Err(Error::DetectorError(msg)) => assert!(msg.contains("onnx")),
            _ => panic!("Expected DetectorError"),
        }
    }
}
