// Pose estimator abstraction layer
//
// The actual landmark estimator (MediaPipe or similar) lives outside this
// crate; it is injected behind this trait. A replay backend feeds recorded
// frames for tests and offline runs.

use crate::models::pose::{Keypoint, PoseError, PoseFrame, PoseResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;

/// Source of per-frame body landmarks
#[async_trait]
pub trait PoseEstimator: Send + Sync {
    /// Produce the next pose frame, or `None` when the source is exhausted
    /// (camera stopped, recording finished)
    async fn next_frame(&mut self) -> PoseResult<Option<PoseFrame>>;

    /// Human-readable backend description
    fn describe(&self) -> String;
}

// ==============================================================================
// Replay Backend
// ==============================================================================

/// One recorded frame: a timestamp plus optional landmark list
///
/// Serialized as a single JSON object per line; `keypoints: null` records a
/// frame where the estimator detected nothing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecordedFrame {
    pub timestamp: i64,
    pub keypoints: Option<Vec<Keypoint>>,
}

/// Estimator that replays a pre-recorded landmark sequence
pub struct ReplayEstimator {
    frames: VecDeque<RecordedFrame>,
    source: String,
}

impl ReplayEstimator {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self {
            frames: frames.into(),
            source: "in-memory".to_string(),
        }
    }

    /// Load a JSON-lines recording (one `RecordedFrame` per line)
    pub fn from_file(path: &Path) -> PoseResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PoseError::EstimatorFailed(format!("Failed to read recording: {}", e)))?;

        let mut frames = VecDeque::new();
        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let frame: RecordedFrame = serde_json::from_str(line).map_err(|e| {
                PoseError::EstimatorFailed(format!(
                    "Invalid recording at line {}: {}",
                    line_no + 1,
                    e
                ))
            })?;
            frames.push_back(frame);
        }

        Ok(Self {
            frames,
            source: path.display().to_string(),
        })
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl PoseEstimator for ReplayEstimator {
    async fn next_frame(&mut self) -> PoseResult<Option<PoseFrame>> {
        let Some(recorded) = self.frames.pop_front() else {
            return Ok(None);
        };

        Ok(Some(PoseFrame {
            timestamp: recorded.timestamp,
            keypoints: recorded.keypoints,
            processing_time_ms: 0,
        }))
    }

    fn describe(&self) -> String {
        format!("Replay estimator ({})", self.source)
    }
}
