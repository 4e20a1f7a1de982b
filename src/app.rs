//! Single-frame analysis pipeline: load, detect, analyze, draw, render.

use crate::{
    analysis::{analyze, Direction, Phase, PhaseParams, PhaseReport},
    config::{AnalysisConfig, Config},
    detection::{create_detector, PoseDetector},
    error::{Error, Result},
    landmarks::{LandmarkFile, PoseLandmarks, Side},
    overlay::draw_skeleton,
    report::{render, OutputFormat},
};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Frame to analyze
    pub image_path: PathBuf,
    /// Phase shown in the frame and its parameters
    pub params: PhaseParams,
    /// Explicit landmark file, overrides the configured detector
    pub landmarks_path: Option<PathBuf>,
    /// Where to save the frame with the skeleton drawn on it
    pub overlay_path: Option<PathBuf>,
    /// Where to save the detected landmarks for later reuse
    pub landmarks_export: Option<PathBuf>,
    /// Report output format
    pub format: OutputFormat,
    /// Loaded or default configuration file contents
    pub config: Config,
}

/// User-facing phase options before they are resolved against the config
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseOptions {
    /// Front leg for Set/Drive, landing leg for Landing
    pub leg: Side,
    pub direction: Direction,
    /// Athlete height, the configured default when absent
    pub height_cm: Option<f64>,
    pub parallax: bool,
}

/// Athlete heights must be positive and finite
fn check_height(height_cm: f64) -> Result<f64> {
    if height_cm.is_finite() && height_cm > 0.0 {
        Ok(height_cm)
    } else {
        Err(Error::InvalidInput(format!(
            "Athlete height must be a positive number of centimetres, got {height_cm}"
        )))
    }
}

/// Combine a phase with the options that apply to it
///
/// # Errors
///
/// Returns an error if the landing phase gets a non-positive or non-finite height
pub fn phase_params(phase: Phase, options: PhaseOptions, analysis: &AnalysisConfig) -> Result<PhaseParams> {
    let params = match phase {
        Phase::Set => PhaseParams::Set { front_leg: options.leg },
        Phase::Drive => PhaseParams::Drive { front_leg: options.leg },
        Phase::Air => PhaseParams::Air {
            direction: options.direction,
        },
        Phase::Landing => PhaseParams::Landing {
            landing_leg: options.leg,
            height_cm: check_height(options.height_cm.unwrap_or(analysis.default_height_cm))?,
            parallax: options.parallax,
        },
    };
    Ok(params)
}

/// Main application struct
pub struct CrouchStartApp {
    config: AppConfig,
    detector: Box<dyn PoseDetector>,
}

impl CrouchStartApp {
    /// Create the application and its pose detector
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the landing height is invalid,
    /// or the detector cannot be created
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing crouch-start analysis of {}", config.image_path.display());
        config.config.validate()?;
        if let PhaseParams::Landing { height_cm, .. } = config.params {
            check_height(height_cm)?;
        }

        let detector = create_detector(
            &config.config.detector,
            &config.image_path,
            config.landmarks_path.as_deref(),
        )?;
        info!("Using pose detector: {}", detector.name());

        Ok(Self { config, detector })
    }

    /// Analyze the frame, `Ok(None)` when no pose was detected
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded, detection fails, or an
    /// output file cannot be written
    pub fn analyze(&mut self) -> Result<Option<PhaseReport>> {
        let image = image::open(&self.config.image_path)?;
        info!(
            "Loaded {} ({}x{})",
            self.config.image_path.display(),
            image.width(),
            image.height()
        );

        let Some(pose) = self.detector.detect(&image)? else {
            warn!("No pose detected in {}", self.config.image_path.display());
            return Ok(None);
        };

        if let Some(path) = &self.config.landmarks_export {
            export_landmarks(&pose, image.width(), image.height(), path)?;
        }

        let landmarks = pose.to_pixels(image.width(), image.height());
        let report = analyze(&self.config.params, &landmarks, &self.config.config.analysis);

        if let Some(path) = &self.config.overlay_path {
            let mut canvas = image.to_rgb8();
            draw_skeleton(&mut canvas, &landmarks, &self.config.config.overlay)?;
            canvas.save(path)?;
            info!("Overlay saved to {}", path.display());
        }

        Ok(Some(report))
    }

    /// Analyze the frame and render the report, `Ok(None)` when no pose was detected
    ///
    /// # Errors
    ///
    /// Returns an error if the analysis or rendering fails
    pub fn run(&mut self) -> Result<Option<String>> {
        match self.analyze()? {
            Some(report) => render(&report, self.config.format).map(Some),
            None => Ok(None),
        }
    }
}

fn export_landmarks(pose: &PoseLandmarks, width: u32, height: u32, path: &Path) -> Result<()> {
    let file = LandmarkFile {
        image_width: Some(width),
        image_height: Some(height),
        ..LandmarkFile::from(pose)
    };
    file.to_file(path)?;
    info!("Landmarks exported to {}", path.display());
    Ok(())
}
