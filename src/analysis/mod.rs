//! Per-phase crouch-start analyzers.
//!
//! Every analyzer picks a fixed handful of landmarks according to the phase
//! parameters, runs them through [`crate::geometry`] and returns a typed
//! metric struct. [`PhaseReport`] flattens any of them into an ordered list of
//! labeled metrics for presentation.

/// Set position: knee and trunk angles in the blocks
pub mod set;

/// Drive phase: shin inclination when pushing off
pub mod drive;

/// Air phase: trunk and trailing leg line
pub mod air;

/// Landing phase: first ground contact after the blocks
pub mod landing;

pub use air::{analyze_air, AirMetrics};
pub use drive::{analyze_drive, DriveMetrics};
pub use landing::{analyze_landing, LandingMetrics};
pub use set::{analyze_set, SetMetrics};

use crate::config::AnalysisConfig;
use crate::grading::{Assessment, ComGrade};
use crate::landmarks::{PixelLandmarks, Side};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crouch-start phase shown in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Set,
    Drive,
    Air,
    Landing,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Self::Set, Self::Drive, Self::Air, Self::Landing];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Set => "set",
            Self::Drive => "drive",
            Self::Air => "air",
            Self::Landing => "landing",
        };
        f.write_str(name)
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "set" => Ok(Self::Set),
            "drive" => Ok(Self::Drive),
            "air" => Ok(Self::Air),
            "landing" | "land" => Ok(Self::Landing),
            _ => Err(Error::InvalidInput(format!(
                "Unknown phase: {s} (expected set, drive, air or landing)"
            ))),
        }
    }
}

/// Direction the athlete travels through the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Infer from the relative position of left and right landmarks
    #[default]
    Auto,
    /// Towards the right image edge
    Right,
    /// Towards the left image edge
    Left,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "right" | "r" => Ok(Self::Right),
            "left" | "l" => Ok(Self::Left),
            _ => Err(Error::InvalidInput(format!(
                "Unknown direction: {s} (expected auto, right or left)"
            ))),
        }
    }
}

/// Phase selection together with the parameters that phase needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseParams {
    Set { front_leg: Side },
    Drive { front_leg: Side },
    Air { direction: Direction },
    Landing { landing_leg: Side, height_cm: f64, parallax: bool },
}

impl PhaseParams {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Set { .. } => Phase::Set,
            Self::Drive { .. } => Phase::Drive,
            Self::Air { .. } => Phase::Air,
            Self::Landing { .. } => Phase::Landing,
        }
    }
}

/// Value of a single reported metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum MetricValue {
    Degrees(f64),
    Percent(f64),
    Grade(ComGrade),
    Assessment(Assessment),
}

impl MetricValue {
    /// Numeric value, if the metric is a measurement
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Degrees(v) | Self::Percent(v) => Some(*v),
            Self::Grade(_) | Self::Assessment(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees(v) => write!(f, "{v:.1}°"),
            Self::Percent(v) => write!(f, "{v:.1}%"),
            Self::Grade(g) => write!(f, "{g}"),
            Self::Assessment(a) => write!(f, "{a}"),
        }
    }
}

/// A labeled metric in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// Stable machine-readable key
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    pub value: MetricValue,
}

impl Metric {
    #[must_use]
    pub fn new(key: &'static str, label: &'static str, value: MetricValue) -> Self {
        Self { key, label, value }
    }
}

/// Flat, ordered result of analysing one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub metrics: Vec<Metric>,
    /// Free-form context, e.g. which travel direction was inferred
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl PhaseReport {
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            metrics: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Append a metric, builder style
    #[must_use]
    pub fn with(mut self, key: &'static str, label: &'static str, value: MetricValue) -> Self {
        self.metrics.push(Metric::new(key, label, value));
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Look up a metric value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.iter().find(|m| m.key == key).map(|m| &m.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }
}

/// Run the analyzer selected by `params`
#[must_use]
pub fn analyze(params: &PhaseParams, landmarks: &PixelLandmarks, config: &AnalysisConfig) -> PhaseReport {
    let report = match *params {
        PhaseParams::Set { front_leg } => analyze_set(landmarks, front_leg).report(),
        PhaseParams::Drive { front_leg } => analyze_drive(landmarks, front_leg).report(),
        PhaseParams::Air { direction } => analyze_air(landmarks, direction).report(),
        PhaseParams::Landing {
            landing_leg,
            height_cm,
            parallax,
        } => analyze_landing(landmarks, landing_leg, height_cm, parallax, config).report(),
    };

    for metric in report.iter() {
        log::debug!("{} {}: {}", report.phase, metric.key, metric.value);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parsing() {
        for phase in Phase::ALL {
            assert_eq!(phase.to_string().parse::<Phase>().unwrap(), phase);
        }
        assert_eq!("Landing".parse::<Phase>().unwrap(), Phase::Landing);
        assert!("sprint".parse::<Phase>().is_err());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("auto".parse::<Direction>().unwrap(), Direction::Auto);
        assert_eq!("RIGHT".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!("l".parse::<Direction>().unwrap(), Direction::Left);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_params_phase() {
        let params = PhaseParams::Landing {
            landing_leg: Side::Right,
            height_cm: 180.0,
            parallax: false,
        };
        assert_eq!(params.phase(), Phase::Landing);
        assert_eq!(PhaseParams::Air { direction: Direction::Auto }.phase(), Phase::Air);
    }

    #[test]
    fn test_metric_formatting() {
        assert_eq!(MetricValue::Degrees(42.04).to_string(), "42.0°");
        assert_eq!(MetricValue::Percent(7.26).to_string(), "7.3%");
        assert_eq!(MetricValue::Degrees(1.0).as_f64(), Some(1.0));
        assert_eq!(MetricValue::Assessment(Assessment::Good).as_f64(), None);
    }

    #[test]
    fn test_report_lookup() {
        let report = PhaseReport::new(Phase::Drive).with("tibia_angle", "Tibia angle", MetricValue::Degrees(30.0));
        assert_eq!(report.get("tibia_angle"), Some(&MetricValue::Degrees(30.0)));
        assert!(report.get("missing").is_none());
        assert_eq!(report.iter().count(), 1);
    }
}
