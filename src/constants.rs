//! Constants used throughout the application

/// Number of body landmarks in the BlazePose topology
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Values per landmark in the BlazePose model output (x, y, z, visibility, presence)
pub const LANDMARK_MODEL_STRIDE: usize = 5;

/// Default input resolution of the BlazePose full-body landmark model
pub const DEFAULT_LANDMARK_INPUT_SIZE: u32 = 256;

/// Minimum pose presence score for a detection to count
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f32 = 0.7;

/// Default athlete height used for the landing pixel scale
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;

/// Lower bound for the ear-to-heel pixel span, avoids division by zero
pub const MIN_BODY_SPAN_PX: f64 = 1.0;

/// Centre of mass weights (shoulder midpoint, hip midpoint)
pub const COM_UPPER_WEIGHT: f64 = 0.4;
pub const COM_LOWER_WEIGHT: f64 = 0.6;

/// COM offset (pixels) at or below which landing counts as heavy braking
pub const DEFAULT_COM_BRAKE_LIMIT_PX: f64 = -5.0;

/// Good shin angle window at touchdown (degrees to horizontal)
pub const DEFAULT_SHIN_ANGLE_MIN: f64 = 35.0;
pub const DEFAULT_SHIN_ANGLE_MAX: f64 = 45.0;

/// Maximum knee separation as percent of body height
pub const DEFAULT_KNEE_GAP_MAX_PERCENT: f64 = 10.0;

/// Maximum shin/trunk angle difference for parallel segments
pub const DEFAULT_SHIN_TRUNK_MAX_DIFF: f64 = 5.0;

/// Knee gap correction applied when the camera is off-axis
pub const DEFAULT_PARALLAX_FACTOR: f64 = 0.7;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
