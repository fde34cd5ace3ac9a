// Compression metronome - paces chest compressions at a fixed BPM
//
// Each beat has a short compress pulse followed by release for the rest of
// the period, matching the visual pulse the guidance overlay shows.

use crate::models::pose::{PoseError, PoseResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default compression rate (beats per minute)
pub const DEFAULT_BPM: u32 = 110;

/// Compression rate band the guidance was written for
pub const MIN_BPM: u32 = 100;
pub const MAX_BPM: u32 = 120;

/// Duration of the compress pulse within each beat
pub const COMPRESS_PULSE_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionPhase {
    Compress,
    Release,
}

/// Fixed-rate compression pacer
#[derive(Debug, Clone, Copy)]
pub struct Metronome {
    bpm: u32,
}

impl Metronome {
    pub fn new(bpm: u32) -> PoseResult<Self> {
        if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
            return Err(PoseError::InvalidConfig(format!(
                "compression BPM {} out of range {}-{}",
                bpm, MIN_BPM, MAX_BPM
            )));
        }
        Ok(Self { bpm })
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Milliseconds between beats
    pub fn beat_period_ms(&self) -> u64 {
        60_000 / self.bpm as u64
    }

    /// Phase at `elapsed_ms` since the metronome started
    pub fn phase_at(&self, elapsed_ms: u64) -> CompressionPhase {
        let within_beat = elapsed_ms % self.beat_period_ms();
        if within_beat < COMPRESS_PULSE_MS {
            CompressionPhase::Compress
        } else {
            CompressionPhase::Release
        }
    }

    /// Beat index at `elapsed_ms` since the metronome started
    pub fn beat_at(&self, elapsed_ms: u64) -> u64 {
        elapsed_ms / self.beat_period_ms()
    }

    /// Spawn a ticker that sends the phase on every transition. Dropping the
    /// receiver ends the task.
    pub fn start_ticker(&self) -> (mpsc::Receiver<CompressionPhase>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(16);
        let period = Duration::from_millis(self.beat_period_ms());
        let pulse = Duration::from_millis(COMPRESS_PULSE_MS);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if tx.send(CompressionPhase::Compress).await.is_err() {
                    break;
                }
                tokio::time::sleep(pulse).await;
                if tx.send(CompressionPhase::Release).await.is_err() {
                    break;
                }
            }
        });

        (rx, handle)
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self { bpm: DEFAULT_BPM }
    }
}
