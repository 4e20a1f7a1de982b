//! Rendering of phase reports for the terminal or for other tools.

use crate::analysis::PhaseReport;
use crate::{Error, Result};
use std::str::FromStr;

/// Message shown when the detector finds no person in the frame
pub const NO_POSE_MESSAGE: &str = "Pose detection failed: no athlete found in the image";

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned `label: value` lines
    #[default]
    Text,
    /// Machine-readable YAML document
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::InvalidInput(format!("Unknown output format: {s} (expected text or yaml)"))),
        }
    }
}

/// Render a report in the requested format
///
/// # Errors
///
/// Returns an error if YAML serialization fails
pub fn render(report: &PhaseReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Yaml => render_yaml(report),
    }
}

/// Render one metric per line, labels padded to a common width
#[must_use]
pub fn render_text(report: &PhaseReport) -> String {
    let width = report.iter().map(|m| m.label.chars().count()).max().unwrap_or(0);

    let header = format!("Phase: {}", report.phase);
    let metrics = report.iter().map(|metric| {
        let padding = width - metric.label.chars().count();
        format!("  {}:{} {}", metric.label, " ".repeat(padding), metric.value)
    });
    let notes = report.notes.iter().map(|note| format!("  ({note})"));

    std::iter::once(header)
        .chain(metrics)
        .chain(notes)
        .map(|line| line + "\n")
        .collect()
}

/// Render the report as YAML
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn render_yaml(report: &PhaseReport) -> Result<String> {
    Ok(serde_yaml::to_string(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MetricValue, Phase};
    use crate::grading::{Assessment, ComGrade, Grade};

    fn sample_report() -> PhaseReport {
        PhaseReport::new(Phase::Landing)
            .with("com_grade", "COM position", MetricValue::Grade(ComGrade(Grade::Good)))
            .with("shin_angle", "Shin angle", MetricValue::Degrees(40.04))
            .with("knee_gap_perc", "Knee gap", MetricValue::Percent(8.66))
            .with("knee_comment", "Knee gap check", MetricValue::Assessment(Assessment::Good))
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_report());
        assert!(text.starts_with("Phase: landing\n"));
        assert!(text.contains("  Shin angle:     40.0°\n"));
        assert!(text.contains("Knee gap:       8.7%"));
        assert!(text.contains("COM position:   ○ riding over the foot"));
        assert!(text.contains("✅ good"));
    }

    #[test]
    fn test_render_text_with_notes() {
        let report = PhaseReport::new(Phase::Air)
            .with("upper", "Trunk lean", MetricValue::Degrees(12.0))
            .with_note("travel direction: rightward (inferred)");
        assert!(render_text(&report).ends_with("  (travel direction: rightward (inferred))\n"));
    }

    #[test]
    fn test_render_text_line_per_metric() {
        let text = render_text(&sample_report());
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text.lines().last(), Some("  Knee gap check: ✅ good"));
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&sample_report(), OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["phase"].as_str(), Some("landing"));
        assert_eq!(value["metrics"][1]["key"].as_str(), Some("shin_angle"));
        assert_eq!(value["metrics"][1]["value"]["unit"].as_str(), Some("degrees"));
        assert!((value["metrics"][1]["value"]["value"].as_f64().unwrap() - 40.04).abs() < 1e-9);
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
