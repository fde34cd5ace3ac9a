// Data models for body-pose estimation

use serde::{Deserialize, Serialize};

// ==============================================================================
// Keypoint
// ==============================================================================

/// A 2D body keypoint in normalized image coordinates with a confidence score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32, // Normalized [0, 1]
    pub y: f32, // Normalized [0, 1]
    pub confidence: f32, // Detection confidence [0, 1]
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    pub fn is_visible(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }

    /// True when both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// MediaPipe Pose landmark indices (33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// Number of body landmarks produced per frame
pub const BODY_LANDMARK_COUNT: usize = 33;

impl BodyLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

// ==============================================================================
// Pose Frame
// ==============================================================================

/// Pose estimation result for a single video frame
///
/// `keypoints` is `None` when the estimator produced nothing for the frame
/// (no person in view, model still warming up). Individual keypoints below
/// the visibility threshold count as absent for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseFrame {
    pub timestamp: i64,
    pub keypoints: Option<Vec<Keypoint>>,
    pub processing_time_ms: u64,
}

impl PoseFrame {
    /// Frame with no detection
    pub fn empty(timestamp: i64) -> Self {
        Self {
            timestamp,
            keypoints: None,
            processing_time_ms: 0,
        }
    }

    /// Look up a landmark, treating out-of-range indices and low-confidence
    /// detections as absent
    pub fn landmark(&self, which: BodyLandmark, min_confidence: f32) -> Option<Keypoint> {
        let keypoints = self.keypoints.as_ref()?;
        let kp = keypoints.get(which.index()).copied()?;
        if kp.is_visible(min_confidence) {
            Some(kp)
        } else {
            None
        }
    }
}

// ==============================================================================
// Configuration
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseConfig {
    pub target_fps: u32,               // Frames per second to process (default: 15)
    pub min_detection_confidence: f32, // Minimum confidence for detection (default: 0.5)
    pub min_tracking_confidence: f32,  // Minimum confidence for tracking (default: 0.5)
    pub model_complexity: ModelComplexity, // Model complexity (0=lite, 1=full, 2=heavy)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelComplexity {
    Lite = 0,  // Fastest, less accurate
    Full = 1,  // Balanced
    Heavy = 2, // Slowest, most accurate
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            target_fps: 15,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            model_complexity: ModelComplexity::Full,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Pose tracking already running")]
    AlreadyRunning,

    #[error("Estimator failed: {0}")]
    EstimatorFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PoseResult<T> = Result<T, PoseError>;
