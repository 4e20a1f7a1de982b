//! Build script for checking optional model assets and recording build metadata.
//!
//! With the `onnx` feature enabled the default detector configuration points at
//! a BlazePose landmark model under `assets/`; warn early if it is missing.

use std::env;
use std::path::Path;

const DEFAULT_MODEL_PATH: &str = "assets/pose_landmark_full.onnx";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_ONNX").is_some() {
        check_landmark_model();
    }

    // Print detected environment
    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
    println!("cargo:rustc-env=BUILD_HOST={}", env::var("HOST").unwrap_or_default());
}

fn check_landmark_model() {
    println!("cargo:rerun-if-changed={DEFAULT_MODEL_PATH}");
    println!("cargo:rerun-if-env-changed=ORT_DYLIB_PATH");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let model = Path::new(&manifest_dir).join(DEFAULT_MODEL_PATH);
    if model.is_file() {
        println!("cargo:warning=Found pose landmark model: {}", model.display());
    } else {
        println!("cargo:warning=Pose landmark model not found at {DEFAULT_MODEL_PATH}.");
        println!("cargo:warning=Download the BlazePose full-body landmark model and convert it to ONNX,");
        println!("cargo:warning=or point `detector.model_path` in the config file at an existing model.");
    }
}
