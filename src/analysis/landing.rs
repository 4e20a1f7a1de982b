use super::{MetricValue, Phase, PhaseReport};
use crate::config::AnalysisConfig;
use crate::constants::MIN_BODY_SPAN_PX;
use crate::geometry::{distance, horizontal_angle, midpoint, weighted_point};
use crate::grading::{assess_max, assess_range, grade_com_offset, Assessment, ComGrade};
use crate::landmarks::{PixelLandmarks, PoseLandmark, Side};
use nalgebra::Point2;
use serde::Serialize;

/// Touchdown metrics of the first step out of the blocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LandingMetrics {
    /// Horizontal offset of the centre of mass from the landing ankle, pixels.
    /// Positive means the COM is ahead of the foot (towards +x).
    pub com_dx_px: f64,
    pub com_grade: ComGrade,
    /// Landing shin angle to the horizontal, degrees
    pub shin_angle: f64,
    /// Trunk angle to the horizontal, degrees
    pub trunk_angle: f64,
    /// Absolute difference between shin and trunk angles, degrees
    pub shin_trunk: f64,
    /// Distance between the knees, centimetres
    pub knee_gap_cm: f64,
    /// Distance between the knees as percent of body height
    pub knee_gap_percent: f64,
    pub shin_comment: Assessment,
    pub knee_comment: Assessment,
    pub diff_comment: Assessment,
}

/// Estimate the centre of mass as a blend of shoulder and hip midpoints
#[must_use]
pub fn centre_of_mass(landmarks: &PixelLandmarks, config: &AnalysisConfig) -> Point2<f64> {
    let shoulders = midpoint(
        &landmarks.point(PoseLandmark::LeftShoulder),
        &landmarks.point(PoseLandmark::RightShoulder),
    );
    let hips = midpoint(
        &landmarks.point(PoseLandmark::LeftHip),
        &landmarks.point(PoseLandmark::RightHip),
    );
    weighted_point(&shoulders, config.com_upper_weight, &hips, config.com_lower_weight)
}

/// Centimetres per pixel, from the vertical ear-to-heel span and the athlete height
#[must_use]
pub fn pixel_scale(landmarks: &PixelLandmarks, height_cm: f64) -> f64 {
    let span = (landmarks.point(PoseLandmark::RightHeel).y - landmarks.point(PoseLandmark::RightEar).y).abs();
    height_cm / span.max(MIN_BODY_SPAN_PX)
}

/// Analyze a landing-phase frame
///
/// With `parallax` set the knee gap is shrunk by the configured factor to
/// compensate for a camera that is not perpendicular to the running line.
#[must_use]
pub fn analyze_landing(
    landmarks: &PixelLandmarks,
    landing_leg: Side,
    height_cm: f64,
    parallax: bool,
    config: &AnalysisConfig,
) -> LandingMetrics {
    let thresholds = &config.landing;
    let cm_per_px = pixel_scale(landmarks, height_cm);

    let ankle = landmarks.point(landing_leg.ankle());
    let knee = landmarks.point(landing_leg.knee());
    let opposite_knee = landmarks.point(landing_leg.opposite().knee());
    let shoulder = landmarks.point(landing_leg.shoulder());
    let hip = landmarks.point(landing_leg.hip());

    let com_dx_px = centre_of_mass(landmarks, config).x - ankle.x;

    let shin_angle = horizontal_angle(&knee, &ankle);
    let trunk_angle = horizontal_angle(&shoulder, &hip);
    let shin_trunk = (shin_angle - trunk_angle).abs();

    let mut knee_gap_cm = distance(&knee, &opposite_knee) * cm_per_px;
    let mut knee_gap_percent = knee_gap_cm / height_cm * 100.0;
    if parallax {
        knee_gap_cm *= config.parallax_factor;
        knee_gap_percent *= config.parallax_factor;
    }

    LandingMetrics {
        com_dx_px,
        com_grade: grade_com_offset(com_dx_px, thresholds),
        shin_angle,
        trunk_angle,
        shin_trunk,
        knee_gap_cm,
        knee_gap_percent,
        shin_comment: assess_range(shin_angle, thresholds.shin_angle_min, thresholds.shin_angle_max),
        knee_comment: assess_max(knee_gap_percent, thresholds.knee_gap_max_percent),
        diff_comment: assess_max(shin_trunk, thresholds.shin_trunk_max_diff),
    }
}

impl LandingMetrics {
    #[must_use]
    pub fn report(&self) -> PhaseReport {
        PhaseReport::new(Phase::Landing)
            .with("com_grade", "COM position", MetricValue::Grade(self.com_grade))
            .with("shin_angle", "Shin angle", MetricValue::Degrees(self.shin_angle))
            .with("knee_gap_perc", "Knee gap", MetricValue::Percent(self.knee_gap_percent))
            .with("shin_trunk", "Shin/trunk difference", MetricValue::Degrees(self.shin_trunk))
            .with("shin_comment", "Shin angle check", MetricValue::Assessment(self.shin_comment))
            .with("knee_comment", "Knee gap check", MetricValue::Assessment(self.knee_comment))
            .with("diff_comment", "Shin/trunk check", MetricValue::Assessment(self.diff_comment))
    }
}
