//! Landmark export files and the file-based detector


use crouch_start_analysis::{
    config::DetectorConfig,
    detection::{create_detector, LandmarkFileDetector, PoseDetector},
    landmarks::{LandmarkFile, PoseLandmark},
    Error,
};
use image::DynamicImage;
use test_helpers::{air_skeleton, scratch_dir, write_sidecar, FRAME_SIZE};

#[test]
fn test_landmark_file_round_trip() {
    let dir = scratch_dir("landmark_round_trip");
    let path = dir.join("pose.yaml");

    let pose = air_skeleton().hidden(PoseLandmark::LeftWrist).pose();
    let file = LandmarkFile {
        image_width: Some(FRAME_SIZE),
        image_height: Some(FRAME_SIZE),
        ..LandmarkFile::from(&pose)
    };
    file.to_file(&path).unwrap();

    let loaded = LandmarkFile::from_file(&path).unwrap();
    assert_eq!(loaded.image_width, Some(FRAME_SIZE));
    let restored = loaded.into_pose().unwrap().unwrap();
    assert_eq!(restored, pose);
    assert_eq!(restored.get(PoseLandmark::LeftWrist).visibility, 0.0);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_json_sidecar_is_found() {
    let dir = scratch_dir("json_sidecar");
    let image_path = dir.join("drive.jpg");
    let sidecar = dir.join("drive.landmarks.json");

    let entries = vec!["{\"x\": 0.5, \"y\": 0.5, \"visibility\": 0.9}"; 33].join(", ");
    std::fs::write(&sidecar, format!("{{\"image_width\": 4, \"landmarks\": [{entries}]}}")).unwrap();

    let mut detector = LandmarkFileDetector::for_image(&image_path).unwrap();
    assert_eq!(detector.path(), sidecar.as_path());

    let pose = detector.detect(&DynamicImage::new_rgb8(4, 4)).unwrap().unwrap();
    assert!((pose.get(PoseLandmark::Nose).visibility - 0.9).abs() < 1e-6);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_yaml_sidecar_preferred() {
    let dir = scratch_dir("yaml_sidecar");
    let image_path = dir.join("set.png");
    std::fs::write(dir.join("set.landmarks.json"), "{\"landmarks\": null}").unwrap();
    let yaml = write_sidecar(&image_path, Some(&air_skeleton().pose())).unwrap();

    let detector = LandmarkFileDetector::for_image(&image_path).unwrap();
    assert_eq!(detector.path(), yaml.as_path());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_empty_sidecar_means_no_pose() {
    let dir = scratch_dir("empty_sidecar");
    let image_path = dir.join("landing.png");
    write_sidecar(&image_path, None).unwrap();

    let mut detector = create_detector(&DetectorConfig::default(), &image_path, None).unwrap();
    assert!(detector.detect(&DynamicImage::new_rgb8(8, 8)).unwrap().is_none());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_malformed_landmark_file() {
    let dir = scratch_dir("malformed_landmarks");
    let path = dir.join("broken.yaml");
    std::fs::write(&path, "landmarks: [[[").unwrap();

    match LandmarkFile::from_file(&path) {
        Err(Error::LandmarkFile(msg)) => assert!(msg.contains("Failed to parse landmarks")),
        other => panic!("Expected LandmarkFile error, got {other:?}"),
    }

    std::fs::write(&path, "landmarks: [{x: 0.1, y: 0.2}, {x: 0.3, y: 0.4}]").unwrap();
    let mut detector = LandmarkFileDetector::new(&path);
    let result = detector.detect(&DynamicImage::new_rgb8(8, 8));
    assert!(matches!(result, Err(Error::LandmarkFile(_))));

    std::fs::remove_dir_all(dir).ok();
}
