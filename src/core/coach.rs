// CPR placement coach - drives frames from an estimator through the
// placement classifier and fans feedback out to a consumer
//
// The classifier itself is a plain synchronous call at the boundary between
// the frame loop and the feedback channel; this module only owns scheduling
// and lifecycle.

use crate::core::estimator::PoseEstimator;
use crate::core::placement;
use crate::models::pose::{PoseConfig, PoseError, PoseResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Per-frame feedback sent to the consumer (UI indicator, logger, ...)
///
/// `verdict` is `None` when the frame had no usable landmarks; the consumer
/// should clear its indicator rather than hold the last value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementUpdate {
    pub session_id: String,
    /// Frame timestamp from the estimator
    pub timestamp: i64,
    /// Wall-clock time the frame was evaluated (millis since epoch)
    pub evaluated_at: i64,
    pub verdict: Option<bool>,
}

/// Coach status for callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachStatus {
    pub is_running: bool,
    pub session_id: Option<String>,
}

/// Runs the per-frame evaluation loop for one guidance session at a time
pub struct PlacementCoach {
    config: Arc<RwLock<PoseConfig>>,
    placement_threshold: f32,
    current_session_id: Arc<RwLock<Option<String>>>,
    is_running: Arc<RwLock<bool>>,
}

impl PlacementCoach {
    pub fn new(config: PoseConfig, placement_threshold: f32) -> PoseResult<Self> {
        if !(placement_threshold > 0.0 && placement_threshold <= 1.0) {
            return Err(PoseError::InvalidConfig(format!(
                "placement threshold {} out of range (0, 1]",
                placement_threshold
            )));
        }
        if !(0.0..=1.0).contains(&config.min_tracking_confidence) {
            return Err(PoseError::InvalidConfig(format!(
                "tracking confidence {} out of range [0, 1]",
                config.min_tracking_confidence
            )));
        }

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            placement_threshold,
            current_session_id: Arc::new(RwLock::new(None)),
            is_running: Arc::new(RwLock::new(false)),
        })
    }

    /// Start evaluating frames from `estimator`, sending feedback on the
    /// returned channel. Returns the session id and the feedback receiver.
    pub async fn start(
        &self,
        mut estimator: Box<dyn PoseEstimator>,
    ) -> PoseResult<(String, mpsc::Receiver<PlacementUpdate>)> {
        let mut is_running = self.is_running.write().await;
        if *is_running {
            return Err(PoseError::AlreadyRunning);
        }

        let session_id = Uuid::new_v4().to_string();
        *self.current_session_id.write().await = Some(session_id.clone());
        *is_running = true;

        let (tx, rx) = mpsc::channel::<PlacementUpdate>(100);

        let config = self.config.clone();
        let threshold = self.placement_threshold;
        let is_running_flag = self.is_running.clone();
        let current_session = self.current_session_id.clone();
        let task_session_id = session_id.clone();

        println!("Started placement coaching: {}", estimator.describe());

        tokio::spawn(async move {
            loop {
                // The session id is the liveness token: stop() clears it and a
                // restart installs a fresh one, so a stale task sees a mismatch
                if current_session.read().await.as_deref() != Some(task_session_id.as_str()) {
                    break;
                }

                let frame = match estimator.next_frame().await {
                    Ok(Some(frame)) => frame,
                    Ok(None) => break, // source exhausted
                    Err(e) => {
                        eprintln!("Estimator error, ending session: {}", e);
                        break;
                    }
                };

                let min_confidence = config.read().await.min_tracking_confidence;
                let verdict = placement::evaluate_with_threshold(&frame, min_confidence, threshold);

                let update = PlacementUpdate {
                    session_id: task_session_id.clone(),
                    timestamp: frame.timestamp,
                    evaluated_at: chrono::Utc::now().timestamp_millis(),
                    verdict,
                };

                if tx.send(update).await.is_err() {
                    break; // consumer gone
                }
            }

            // Only clear the flags if this task's session is still the live
            // one; after a stop/restart they belong to the successor. Lock
            // order matches start() and stop().
            let mut is_running = is_running_flag.write().await;
            let mut current = current_session.write().await;
            if current.as_deref() == Some(task_session_id.as_str()) {
                *is_running = false;
                *current = None;
            }
            println!("Placement coaching ended for session {}", task_session_id);
        });

        Ok((session_id, rx))
    }

    /// Stop the running session; idempotent
    pub async fn stop(&self) -> PoseResult<()> {
        let mut is_running = self.is_running.write().await;
        if !*is_running {
            return Ok(());
        }

        *is_running = false;
        *self.current_session_id.write().await = None;
        Ok(())
    }

    pub async fn status(&self) -> CoachStatus {
        CoachStatus {
            is_running: *self.is_running.read().await,
            session_id: self.current_session_id.read().await.clone(),
        }
    }

    pub async fn update_config(&self, config: PoseConfig) {
        *self.config.write().await = config;
    }
}
