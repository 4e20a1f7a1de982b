use super::PoseDetector;
use crate::config::DetectorConfig;
use crate::constants::{LANDMARK_MODEL_STRIDE, NUM_POSE_LANDMARKS};
use crate::landmarks::{Landmark, PoseLandmarks};
use crate::utils::image_conversion::{letterbox, rgb_to_nhwc, Letterbox};
use crate::utils::sigmoid;
use crate::{Error, Result};
use image::DynamicImage;
use ndarray::{Array4, CowArray};
use ort::{Environment, Session, Value};
use std::sync::Arc;

/// Raw model output of one inference
struct RawPose {
    landmarks: Vec<f32>,
    presence: Option<f32>,
}

/// BlazePose full-body landmark model run through `ONNX` Runtime
///
/// The model expects a square NHWC RGB input in [0, 1] and produces 33 (or 39
/// with auxiliary points) rows of `x, y, z, visibility, presence` in input
/// pixel units, plus a pose presence score as second output.
pub struct OnnxPoseDetector {
    session: Session,
    input_size: u32,
    min_detection_confidence: f32,
}

impl OnnxPoseDetector {
    /// Load the landmark model named in the detector configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The model has no inputs or outputs
    /// - The ONNX runtime environment cannot be created
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        log::info!(
            "Initializing OnnxPoseDetector with model: {}",
            config.model_path.display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("pose_landmarker")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(&config.model_path)?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| Error::ModelError("Model has no inputs".to_string()))?;
        if session.outputs.is_empty() {
            return Err(Error::ModelError("Model has no outputs".to_string()));
        }

        // NHWC input: [batch, height, width, channels]
        let input_size = input
            .dimensions
            .get(1)
            .copied()
            .flatten()
            .unwrap_or(config.input_size);
        log::debug!("Landmark model input size: {input_size}");

        Ok(Self {
            session,
            input_size,
            min_detection_confidence: config.min_detection_confidence,
        })
    }

    /// Run the forward pass on a prepared input tensor
    fn forward(&self, input: Array4<f32>) -> Result<RawPose> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;

        let landmark_output = outputs
            .first()
            .ok_or_else(|| Error::ModelOutputError("No output from model".to_string()))?;
        let landmark_tensor = landmark_output.try_extract::<f32>()?;
        let landmark_view = landmark_tensor.view();
        let landmarks = landmark_view
            .as_slice()
            .ok_or_else(|| Error::ModelOutputError("Failed to get landmark data".to_string()))?
            .to_vec();

        let presence = match outputs.get(1) {
            Some(output) => {
                let tensor = output.try_extract::<f32>()?;
                let view = tensor.view();
                let score = view.iter().next().copied().map(sigmoid);
                score
            }
            None => None,
        };

        Ok(RawPose { landmarks, presence })
    }

    /// Convert raw model rows to normalized source image landmarks
    fn postprocess(raw: &[f32], letterbox: &Letterbox) -> Result<PoseLandmarks> {
        if raw.len() < NUM_POSE_LANDMARKS * LANDMARK_MODEL_STRIDE {
            return Err(Error::ModelOutputError(format!(
                "Expected at least {} landmark values, got {}",
                NUM_POSE_LANDMARKS * LANDMARK_MODEL_STRIDE,
                raw.len()
            )));
        }

        let points = raw
            .chunks_exact(LANDMARK_MODEL_STRIDE)
            .take(NUM_POSE_LANDMARKS)
            .map(|row| {
                let (x, y) = letterbox.to_normalized(f64::from(row[0]), f64::from(row[1]));
                Landmark {
                    x,
                    y,
                    z: f64::from(row[2]) / f64::from(letterbox.size),
                    visibility: sigmoid(row[3]),
                }
            })
            .collect();

        PoseLandmarks::new(points)
    }
}

/// Whether a pose presence probability clears the detection threshold
///
/// Models without a presence output always pass.
fn passes_presence(presence: Option<f32>, min_detection_confidence: f32) -> bool {
    presence.map_or(true, |p| p >= min_detection_confidence)
}

impl PoseDetector for OnnxPoseDetector {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<PoseLandmarks>> {
        let (input_image, letterbox) = letterbox(image, self.input_size)?;
        let raw = self.forward(rgb_to_nhwc(&input_image)?)?;

        if let Some(presence) = raw.presence {
            log::debug!("Pose presence score: {presence:.3}");
        }
        if !passes_presence(raw.presence, self.min_detection_confidence) {
            return Ok(None);
        }

        Self::postprocess(&raw.landmarks, &letterbox).map(Some)
    }

    fn name(&self) -> &str {
        "onnx"
    }
}
