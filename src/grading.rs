//! Qualitative grades for coaching feedback.

use crate::config::LandingThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level grade used for the landing centre of mass position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Good => "○",
            Self::Fair => "△",
            Self::Poor => "×",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.label())
    }
}

/// Two-level verdict attached to a single metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Good,
    NeedsWork,
}

impl Assessment {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Good => "✅",
            Self::NeedsWork => "⚠",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsWork => "needs work",
        }
    }

    #[must_use]
    pub fn is_good(self) -> bool {
        self == Self::Good
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.label())
    }
}

/// Grade of the horizontal offset between centre of mass and landing ankle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComGrade(pub Grade);

impl ComGrade {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            Grade::Good => "riding over the foot",
            Grade::Fair => "slight braking",
            Grade::Poor => "heavy braking",
        }
    }
}

impl fmt::Display for ComGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.symbol(), self.label())
    }
}

/// Grade the COM offset in pixels, positive means COM ahead of the ankle
///
/// Only the sign and a small tolerance band are used, which keeps the grade
/// insensitive to pixel scale errors.
#[must_use]
pub fn grade_com_offset(com_dx_px: f64, thresholds: &LandingThresholds) -> ComGrade {
    if com_dx_px > 0.0 {
        ComGrade(Grade::Good)
    } else if com_dx_px > thresholds.com_brake_limit_px {
        ComGrade(Grade::Fair)
    } else {
        ComGrade(Grade::Poor)
    }
}

/// Good when `value` lies inside the closed range
#[must_use]
pub fn assess_range(value: f64, min: f64, max: f64) -> Assessment {
    if (min..=max).contains(&value) {
        Assessment::Good
    } else {
        Assessment::NeedsWork
    }
}

/// Good when `value` does not exceed `max`
#[must_use]
pub fn assess_max(value: f64, max: f64) -> Assessment {
    if value <= max {
        Assessment::Good
    } else {
        Assessment::NeedsWork
    }
}
