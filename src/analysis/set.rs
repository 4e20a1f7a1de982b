use super::{MetricValue, Phase, PhaseReport};
use crate::geometry::inner_angle;
use crate::landmarks::{PixelLandmarks, Side};
use serde::Serialize;

/// Angles of the set position, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SetMetrics {
    /// Rear (trail) leg knee flexion, hip-knee-heel
    pub rear_knee: f64,
    /// Front (lead) leg knee flexion, hip-knee-heel
    pub front_knee: f64,
    /// Trunk lean, shoulder-hip-knee on the lead side
    pub torso_forward: f64,
}

/// Analyze a set-position frame
///
/// `front_leg` is the athlete's lead leg, the one on the front block.
#[must_use]
pub fn analyze_set(landmarks: &PixelLandmarks, front_leg: Side) -> SetMetrics {
    let rear_leg = front_leg.opposite();
    let leg_angle = |side: Side| {
        inner_angle(
            &landmarks.point(side.hip()),
            &landmarks.point(side.knee()),
            &landmarks.point(side.heel()),
        )
    };

    SetMetrics {
        rear_knee: leg_angle(rear_leg),
        front_knee: leg_angle(front_leg),
        torso_forward: inner_angle(
            &landmarks.point(front_leg.shoulder()),
            &landmarks.point(front_leg.hip()),
            &landmarks.point(front_leg.knee()),
        ),
    }
}

impl SetMetrics {
    #[must_use]
    pub fn report(&self) -> PhaseReport {
        PhaseReport::new(Phase::Set)
            .with("rear_knee", "Rear knee angle", MetricValue::Degrees(self.rear_knee))
            .with("front_knee", "Front knee angle", MetricValue::Degrees(self.front_knee))
            .with("torso_forward", "Trunk lean angle", MetricValue::Degrees(self.torso_forward))
    }
}
