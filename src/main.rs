//! Crouch-start still frame analysis from the command line.

use anyhow::Result;
use clap::Parser;
use crouch_start_analysis::{
    analysis::{Direction, Phase},
    app::{phase_params, AppConfig, CrouchStartApp, PhaseOptions},
    config::Config,
    landmarks::Side,
    report::{OutputFormat, NO_POSE_MESSAGE},
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Still frame to analyze (JPEG or PNG)
    image: PathBuf,

    /// Phase shown in the frame (set, drive, air, landing)
    #[arg(short, long, default_value = "set")]
    phase: String,

    /// Front leg for set/drive, landing leg for landing (left, right)
    #[arg(short, long, default_value = "left")]
    leg: String,

    /// Travel direction for the air phase (auto, right, left)
    #[arg(long, default_value = "auto")]
    direction: String,

    /// Athlete height in centimetres, used to scale the landing knee gap
    #[arg(long)]
    height_cm: Option<f64>,

    /// Camera is off-axis, shrink the knee gap estimate
    #[arg(long)]
    parallax: bool,

    /// Landmark file to use instead of running the detector
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Save the frame with the detected skeleton drawn on it
    #[arg(short, long)]
    overlay: Option<PathBuf>,

    /// Save the detected landmarks as a YAML landmark file
    #[arg(long)]
    export_landmarks: Option<PathBuf>,

    /// Report format (text, yaml)
    #[arg(short, long)]
    format: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!(
        "Crouch-start analysis (target {}, built on {})",
        env!("BUILD_TARGET"),
        env!("BUILD_HOST")
    );

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let phase: Phase = args.phase.parse()?;
    let options = PhaseOptions {
        leg: args.leg.parse::<Side>()?,
        direction: args.direction.parse::<Direction>()?,
        height_cm: args.height_cm,
        parallax: args.parallax,
    };
    let format: OutputFormat = args.format.as_deref().unwrap_or(&config.output.format).parse()?;

    // Build application configuration
    let app_config = AppConfig {
        image_path: args.image,
        params: phase_params(phase, options, &config.analysis)?,
        landmarks_path: args.landmarks,
        overlay_path: args.overlay,
        landmarks_export: args.export_landmarks,
        format,
        config,
    };

    // Create and run application
    let mut app = CrouchStartApp::new(app_config)?;
    match app.run()? {
        Some(report) => {
            print!("{report}");
            Ok(())
        }
        None => anyhow::bail!(NO_POSE_MESSAGE),
    }
}
