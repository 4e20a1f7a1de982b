use super::{Direction, MetricValue, Phase, PhaseReport};
use crate::geometry::{horizontal_angle, inner_angle};
use crate::landmarks::{PixelLandmarks, PoseLandmark, Side};
use serde::Serialize;

/// Left/right landmark pairs that vote on the travel direction
const DIRECTION_VOTERS: [(PoseLandmark, PoseLandmark); 3] = [
    (PoseLandmark::RightHip, PoseLandmark::LeftHip),
    (PoseLandmark::RightShoulder, PoseLandmark::LeftShoulder),
    (PoseLandmark::RightAnkle, PoseLandmark::LeftAnkle),
];

/// Body line angles during the flight phase, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirMetrics {
    /// Trunk (shoulder→hip) angle to the horizontal
    pub upper: f64,
    /// Trailing leg (hip→rear ankle) angle to the horizontal
    pub lower: f64,
    /// Shoulder-hip-rear ankle inner angle, the "く" fold of the body
    pub hip_angle: f64,
    /// Whether the athlete was taken to run towards the right edge
    pub rightward: bool,
    /// Whether `rightward` was inferred rather than given
    pub inferred: bool,
}

/// Infer the travel direction from the landmark layout
///
/// In a side view the body half nearer the running direction tends to sit
/// further forward. Hips, shoulders and ankles each cast one vote.
#[must_use]
pub fn infer_rightward(landmarks: &PixelLandmarks) -> bool {
    let votes: i32 = DIRECTION_VOTERS
        .iter()
        .map(|&(right, left)| {
            if landmarks.point(right).x > landmarks.point(left).x {
                1
            } else {
                -1
            }
        })
        .sum();
    votes > 0
}

/// Pick the trailing ankle: the one furthest behind in the travel direction
///
/// The right ankle is chosen only when it is strictly further back.
#[must_use]
pub fn rear_ankle(landmarks: &PixelLandmarks, rightward: bool) -> PoseLandmark {
    let right_x = landmarks.point(PoseLandmark::RightAnkle).x;
    let left_x = landmarks.point(PoseLandmark::LeftAnkle).x;
    let right_is_behind = if rightward { right_x < left_x } else { right_x > left_x };
    if right_is_behind {
        PoseLandmark::RightAnkle
    } else {
        PoseLandmark::LeftAnkle
    }
}

/// Analyze an air-phase frame
#[must_use]
pub fn analyze_air(landmarks: &PixelLandmarks, direction: Direction) -> AirMetrics {
    let (rightward, inferred) = match direction {
        Direction::Auto => (infer_rightward(landmarks), true),
        Direction::Right => (true, false),
        Direction::Left => (false, false),
    };

    let near_side = if rightward { Side::Right } else { Side::Left };
    let shoulder = landmarks.point(near_side.shoulder());
    let hip = landmarks.point(near_side.hip());
    let ankle = landmarks.point(rear_ankle(landmarks, rightward));

    AirMetrics {
        upper: horizontal_angle(&shoulder, &hip),
        lower: horizontal_angle(&hip, &ankle),
        hip_angle: inner_angle(&shoulder, &hip, &ankle),
        rightward,
        inferred,
    }
}

impl AirMetrics {
    #[must_use]
    pub fn report(&self) -> PhaseReport {
        let heading = if self.rightward { "rightward" } else { "leftward" };
        let source = if self.inferred { "inferred" } else { "given" };
        PhaseReport::new(Phase::Air)
            .with("upper", "Trunk lean", MetricValue::Degrees(self.upper))
            .with("lower", "Rear leg angle", MetricValue::Degrees(self.lower))
            .with("hip_angle", "Hip fold angle", MetricValue::Degrees(self.hip_angle))
            .with_note(format!("travel direction: {heading} ({source})"))
    }
}
