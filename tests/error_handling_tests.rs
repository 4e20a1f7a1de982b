//! Error handling tests for all modules

use crouch_start_analysis::{
    analysis::{Direction, Phase},
    config::DetectorConfig,
    detection::create_detector,
    landmarks::{Landmark, PoseLandmark, PoseLandmarks, Side},
    report::OutputFormat,
    utils::{
        image_conversion::Letterbox,
        safe_cast::{f64_to_i32_clamp, f64_to_u32_clamp, u32_to_i32},
    },
    Error,
};
use std::path::Path;

#[test]
fn test_parse_errors_are_invalid_input() {
    let results: Vec<Error> = vec![
        "jump".parse::<Phase>().unwrap_err(),
        "middle".parse::<Side>().unwrap_err(),
        "down".parse::<Direction>().unwrap_err(),
        "csv".parse::<OutputFormat>().unwrap_err(),
        "TAIL".parse::<PoseLandmark>().unwrap_err(),
    ];

    for err in results {
        assert!(matches!(err, Error::InvalidInput(_)), "Unexpected error: {err}");
    }
}

#[test]
fn test_error_display() {
    let err = "jump".parse::<Phase>().unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Invalid input:"));
    assert!(message.contains("jump"));

    let err = Error::DetectorError("backend missing".to_string());
    assert_eq!(err.to_string(), "Detector error: backend missing");
}

#[test]
fn test_landmark_count_errors() {
    for count in [0, 1, 32, 34, 39] {
        let result = PoseLandmarks::new(vec![Landmark::default(); count]);
        match result {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains(&count.to_string())),
            _ => panic!("Expected InvalidInput for {count} landmarks"),
        }
    }
}

#[test]
fn test_detector_creation_errors() {
    let config = DetectorConfig {
        backend: "mediapipe".to_string(),
        ..DetectorConfig::default()
    };
    let result = create_detector(&config, Path::new("frame.png"), None);
    assert!(matches!(result, Err(Error::DetectorError(_))));

    // File backend without any sidecar next to the image
    let result = create_detector(&DetectorConfig::default(), Path::new("missing/frame.png"), None);
    match result {
        Err(Error::DetectorError(msg)) => assert!(msg.contains("frame.landmarks.yaml")),
        _ => panic!("Expected DetectorError"),
    }
}

#[test]
fn test_letterbox_rejects_empty_sizes() {
    assert!(Letterbox::new(0, 100, 256).is_err());
    assert!(Letterbox::new(100, 0, 256).is_err());
    assert!(Letterbox::new(100, 100, 0).is_err());
    assert!(Letterbox::new(100, 100, 256).is_ok());
}

#[test]
fn test_safe_cast_errors() {
    assert!(u32_to_i32(u32::MAX).is_err());
    assert_eq!(f64_to_u32_clamp(-1.0, 1, 256), 1);
    assert_eq!(f64_to_i32_clamp(f64::NAN, -10, 10), -10);
    assert_eq!(f64_to_i32_clamp(1e12, -10, 10), 10);
}
