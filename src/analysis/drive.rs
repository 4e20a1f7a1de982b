use super::{MetricValue, Phase, PhaseReport};
use crate::geometry::horizontal_angle;
use crate::landmarks::{PixelLandmarks, Side};
use serde::Serialize;

/// Shin inclination during the drive out of the blocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriveMetrics {
    /// Acute angle of the knee→ankle segment to the horizontal, 0-90°
    pub tibia_angle: f64,
}

/// Analyze a drive-phase frame, measuring the shin of `front_leg`
///
/// The angle ignores the sign of dx and dy, so it does not depend on which
/// side the camera films from.
#[must_use]
pub fn analyze_drive(landmarks: &PixelLandmarks, front_leg: Side) -> DriveMetrics {
    DriveMetrics {
        tibia_angle: horizontal_angle(
            &landmarks.point(front_leg.knee()),
            &landmarks.point(front_leg.ankle()),
        ),
    }
}

impl DriveMetrics {
    #[must_use]
    pub fn report(&self) -> PhaseReport {
        PhaseReport::new(Phase::Drive).with("tibia_angle", "Tibia angle", MetricValue::Degrees(self.tibia_angle))
    }
}
