//! Body landmark topology and landmark containers.
//!
//! Landmarks follow the 33-point BlazePose layout. Detectors produce them in
//! normalized image coordinates; [`PixelLandmarks`] binds a set to an image
//! size so that analyzers can work in pixel space, where angles are not
//! distorted by the image aspect ratio.

use crate::{constants::NUM_POSE_LANDMARKS, Error, Result};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Named body landmark, discriminant is the index in the detector output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// All landmarks in index order
    pub const ALL: [PoseLandmark; NUM_POSE_LANDMARKS] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Index of this landmark in the detector output
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a landmark by output index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Upper-case name as used by the MediaPipe landmark enum
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "NOSE",
            Self::LeftEyeInner => "LEFT_EYE_INNER",
            Self::LeftEye => "LEFT_EYE",
            Self::LeftEyeOuter => "LEFT_EYE_OUTER",
            Self::RightEyeInner => "RIGHT_EYE_INNER",
            Self::RightEye => "RIGHT_EYE",
            Self::RightEyeOuter => "RIGHT_EYE_OUTER",
            Self::LeftEar => "LEFT_EAR",
            Self::RightEar => "RIGHT_EAR",
            Self::MouthLeft => "MOUTH_LEFT",
            Self::MouthRight => "MOUTH_RIGHT",
            Self::LeftShoulder => "LEFT_SHOULDER",
            Self::RightShoulder => "RIGHT_SHOULDER",
            Self::LeftElbow => "LEFT_ELBOW",
            Self::RightElbow => "RIGHT_ELBOW",
            Self::LeftWrist => "LEFT_WRIST",
            Self::RightWrist => "RIGHT_WRIST",
            Self::LeftPinky => "LEFT_PINKY",
            Self::RightPinky => "RIGHT_PINKY",
            Self::LeftIndex => "LEFT_INDEX",
            Self::RightIndex => "RIGHT_INDEX",
            Self::LeftThumb => "LEFT_THUMB",
            Self::RightThumb => "RIGHT_THUMB",
            Self::LeftHip => "LEFT_HIP",
            Self::RightHip => "RIGHT_HIP",
            Self::LeftKnee => "LEFT_KNEE",
            Self::RightKnee => "RIGHT_KNEE",
            Self::LeftAnkle => "LEFT_ANKLE",
            Self::RightAnkle => "RIGHT_ANKLE",
            Self::LeftHeel => "LEFT_HEEL",
            Self::RightHeel => "RIGHT_HEEL",
            Self::LeftFootIndex => "LEFT_FOOT_INDEX",
            Self::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }
}

impl fmt::Display for PoseLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoseLandmark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lm| lm.name() == upper)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown landmark: {s}")))
    }
}

/// Body side, used for the lead, landing or measured leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// The other side
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Pick the landmark of this side from a left/right pair
    #[must_use]
    pub fn pick(self, left: PoseLandmark, right: PoseLandmark) -> PoseLandmark {
        match self {
            Self::Left => left,
            Self::Right => right,
        }
    }

    #[must_use]
    pub fn shoulder(self) -> PoseLandmark {
        self.pick(PoseLandmark::LeftShoulder, PoseLandmark::RightShoulder)
    }

    #[must_use]
    pub fn hip(self) -> PoseLandmark {
        self.pick(PoseLandmark::LeftHip, PoseLandmark::RightHip)
    }

    #[must_use]
    pub fn knee(self) -> PoseLandmark {
        self.pick(PoseLandmark::LeftKnee, PoseLandmark::RightKnee)
    }

    #[must_use]
    pub fn ankle(self) -> PoseLandmark {
        self.pick(PoseLandmark::LeftAnkle, PoseLandmark::RightAnkle)
    }

    #[must_use]
    pub fn heel(self) -> PoseLandmark {
        self.pick(PoseLandmark::LeftHeel, PoseLandmark::RightHeel)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(Error::InvalidInput(format!("Unknown side: {s} (expected left or right)"))),
        }
    }
}

/// Skeleton edges drawn by the overlay, same topology as MediaPipe's `POSE_CONNECTIONS`
pub const SKELETON_CONNECTIONS: [(PoseLandmark, PoseLandmark); 35] = {
    use PoseLandmark::*;
    [
        (Nose, LeftEyeInner),
        (LeftEyeInner, LeftEye),
        (LeftEye, LeftEyeOuter),
        (LeftEyeOuter, LeftEar),
        (Nose, RightEyeInner),
        (RightEyeInner, RightEye),
        (RightEye, RightEyeOuter),
        (RightEyeOuter, RightEar),
        (MouthLeft, MouthRight),
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftWrist, LeftIndex),
        (LeftWrist, LeftThumb),
        (LeftPinky, LeftIndex),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightWrist, RightIndex),
        (RightWrist, RightThumb),
        (RightPinky, RightIndex),
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        (LeftHip, LeftKnee),
        (RightHip, RightKnee),
        (LeftKnee, LeftAnkle),
        (RightKnee, RightAnkle),
        (LeftAnkle, LeftHeel),
        (RightAnkle, RightHeel),
        (LeftHeel, LeftFootIndex),
        (RightHeel, RightFootIndex),
        (LeftAnkle, LeftFootIndex),
        (RightAnkle, RightFootIndex),
    ]
};

fn default_visibility() -> f32 {
    1.0
}

/// A single landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0 = left edge, 1 = right edge
    pub x: f64,
    /// Vertical position, 0 = top edge, 1 = bottom edge
    pub y: f64,
    /// Relative depth, unused by the 2-D analysis
    #[serde(default)]
    pub z: f64,
    /// Detector confidence that the point is visible
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

impl Landmark {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }
}

/// A complete set of body landmarks for one person
#[derive(Debug, Clone, PartialEq)]
pub struct PoseLandmarks {
    points: [Landmark; NUM_POSE_LANDMARKS],
}

impl PoseLandmarks {
    /// Build a landmark set from detector output
    ///
    /// # Errors
    ///
    /// Returns an error if the number of landmarks is not exactly 33
    pub fn new(points: Vec<Landmark>) -> Result<Self> {
        let count = points.len();
        let points: [Landmark; NUM_POSE_LANDMARKS] = points.try_into().map_err(|_| {
            Error::InvalidInput(format!("Expected {NUM_POSE_LANDMARKS} landmarks, got {count}"))
        })?;
        Ok(Self { points })
    }

    #[must_use]
    pub fn get(&self, landmark: PoseLandmark) -> &Landmark {
        &self.points[landmark.index()]
    }

    pub fn set(&mut self, landmark: PoseLandmark, value: Landmark) {
        self.points[landmark.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (PoseLandmark, &Landmark)> {
        PoseLandmark::ALL.into_iter().zip(self.points.iter())
    }

    /// Bind the landmarks to an image size
    #[must_use]
    pub fn to_pixels(&self, width: u32, height: u32) -> PixelLandmarks {
        PixelLandmarks::new(self.clone(), width, height)
    }
}

/// Landmarks bound to the size of the image they were detected in
#[derive(Debug, Clone)]
pub struct PixelLandmarks {
    landmarks: PoseLandmarks,
    width: f64,
    height: f64,
}

impl PixelLandmarks {
    #[must_use]
    pub fn new(landmarks: PoseLandmarks, width: u32, height: u32) -> Self {
        Self {
            landmarks,
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Pixel coordinates of a landmark, y grows downwards
    #[must_use]
    pub fn point(&self, landmark: PoseLandmark) -> Point2<f64> {
        let lm = self.landmarks.get(landmark);
        Point2::new(lm.x * self.width, lm.y * self.height)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn landmarks(&self) -> &PoseLandmarks {
        &self.landmarks
    }
}

/// On-disk landmark export written by an external pose estimator
///
/// Both YAML and JSON are accepted. A missing or empty `landmarks` entry means
/// the estimator found no person in the frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandmarkFile {
    /// Width of the image the landmarks were detected in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,

    /// Height of the image the landmarks were detected in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,

    /// Normalized landmarks in BlazePose order
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl LandmarkFile {
    /// Load a landmark export from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::debug!("Reading landmarks from {}", path.as_ref().display());
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Write the export as YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Convert into a landmark set, `None` when no pose was recorded
    ///
    /// # Errors
    ///
    /// Returns an error if landmarks are present but not exactly 33
    pub fn into_pose(self) -> Result<Option<PoseLandmarks>> {
        match self.landmarks {
            None => Ok(None),
            Some(points) if points.is_empty() => Ok(None),
            Some(points) => PoseLandmarks::new(points)
                .map(Some)
                .map_err(|e| Error::LandmarkFile(e.to_string())),
        }
    }
}

impl From<&PoseLandmarks> for LandmarkFile {
    fn from(pose: &PoseLandmarks) -> Self {
        Self {
            image_width: None,
            image_height: None,
            landmarks: Some(pose.points.to_vec()),
        }
    }
}

impl FromStr for LandmarkFile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|e| Error::LandmarkFile(format!("Failed to parse landmarks: {e}")))
    }
}
