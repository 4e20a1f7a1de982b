//! Crouch-start analysis library for sprint start still frames.
//!
//! This library measures joint and body segment angles of a sprinter in a
//! single photograph, for each of the four crouch-start phases:
//! - Set: knee angles of both legs and trunk lean in the blocks
//! - Drive: front shin inclination when pushing off
//! - Air: trunk lean, trailing leg line and hip fold during the first stride
//! - Landing: centre of mass over the foot, shin angle, knee gap
//!
//! The analysis pipeline consists of:
//! 1. Pose detection to obtain the 33 BlazePose body landmarks
//! 2. Landmark selection based on the leading leg or travel direction
//! 3. Angle and distance computation in pixel space
//! 4. Threshold-based grading of the landing metrics
//!
//! # Examples
//!
//! ## Analyzing exported landmarks
//!
//! ```no_run
//! use crouch_start_analysis::{
//!     analysis::{analyze, PhaseParams},
//!     config::AnalysisConfig,
//!     landmarks::{LandmarkFile, Side},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = LandmarkFile::from_file("frames/set.landmarks.yaml")?;
//! if let Some(pose) = file.into_pose()? {
//!     let landmarks = pose.to_pixels(1920, 1080);
//!     let params = PhaseParams::Set { front_leg: Side::Left };
//!     let report = analyze(&params, &landmarks, &AnalysisConfig::default());
//!
//!     for metric in report.iter() {
//!         println!("{}: {}", metric.label, metric.value);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the full pipeline
//!
//! ```no_run
//! use crouch_start_analysis::{
//!     analysis::{Direction, PhaseParams},
//!     app::{AppConfig, CrouchStartApp},
//!     config::Config,
//!     report::OutputFormat,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = CrouchStartApp::new(AppConfig {
//!     image_path: "frames/air.jpg".into(),
//!     params: PhaseParams::Air { direction: Direction::Auto },
//!     landmarks_path: None,
//!     overlay_path: Some("frames/air.overlay.png".into()),
//!     landmarks_export: None,
//!     format: OutputFormat::Text,
//!     config: Config::default(),
//! })?;
//!
//! match app.run()? {
//!     Some(report) => print!("{report}"),
//!     None => eprintln!("No athlete found"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Geometry helpers
//!
//! ```
//! use crouch_start_analysis::geometry::{horizontal_angle, inner_angle};
//! use nalgebra::Point2;
//!
//! let hip = Point2::new(0.0, 0.0);
//! let knee = Point2::new(0.0, 10.0);
//! let ankle = Point2::new(10.0, 10.0);
//!
//! assert!((inner_angle(&hip, &knee, &ankle) - 90.0).abs() < 1e-9);
//! assert!((horizontal_angle(&knee, &ankle)).abs() < 1e-9);
//! ```

/// Per-phase metric computation
pub mod analysis;

/// Single-frame analysis pipeline
pub mod app;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Pose detection backends
pub mod detection;

/// Error types and result handling
pub mod error;

/// Angle and distance helpers in pixel space
pub mod geometry;

/// Qualitative grades for coaching feedback
pub mod grading;

/// BlazePose landmark topology and landmark files
pub mod landmarks;

/// Skeleton overlay drawing
pub mod overlay;

/// Report rendering
pub mod report;

/// Utility functions for image preparation and numeric conversions
pub mod utils;

pub use error::{Error, Result};
