// Guide playback - step sequencing for an emergency instruction sequence

use crate::models::guide::{EmergencyType, Guide, GuideStep};
use serde::{Deserialize, Serialize};

/// Progress snapshot for consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideProgress {
    pub emergency_type: EmergencyType,
    pub current_step: usize,
    pub total_steps: usize,
    /// Whether hand-placement feedback applies at the current step
    pub placement_feedback_active: bool,
    /// Whether chest compressions (and the metronome) apply at the current step
    pub compressions_active: bool,
}

/// Walks through a guide's steps; bounds are clamped, never an error
pub struct GuidePlayer {
    guide: Guide,
    current_step: usize,
}

impl GuidePlayer {
    pub fn new(emergency_type: EmergencyType) -> Self {
        Self {
            guide: Guide::for_emergency(emergency_type),
            current_step: 0,
        }
    }

    pub fn current(&self) -> &GuideStep {
        &self.guide.steps[self.current_step]
    }

    pub fn next(&mut self) -> &GuideStep {
        if self.current_step + 1 < self.guide.step_count() {
            self.current_step += 1;
        }
        self.current()
    }

    pub fn previous(&mut self) -> &GuideStep {
        self.current_step = self.current_step.saturating_sub(1);
        self.current()
    }

    pub fn restart(&mut self) -> &GuideStep {
        self.current_step = 0;
        self.current()
    }

    pub fn jump_to(&mut self, step: usize) -> &GuideStep {
        self.current_step = step.min(self.guide.step_count() - 1);
        self.current()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == self.guide.step_count()
    }

    pub fn progress(&self) -> GuideProgress {
        GuideProgress {
            emergency_type: self.guide.emergency_type,
            current_step: self.current_step,
            total_steps: self.guide.step_count(),
            placement_feedback_active: self
                .guide
                .placement_feedback_from
                .map_or(false, |from| self.current_step >= from),
            compressions_active: self
                .guide
                .compressions_from
                .map_or(false, |from| self.current_step >= from),
        }
    }
}
