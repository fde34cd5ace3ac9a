// Replay runner - feeds a recorded landmark session through the placement
// coach and prints the per-frame feedback
//
// Usage: aidline <recording.jsonl>
// Each line of the recording is a JSON object: {"timestamp": ..., "keypoints": [...] | null}

use aidline::core::coach::PlacementCoach;
use aidline::core::config::Config;
use aidline::core::estimator::ReplayEstimator;
use aidline::core::metronome::Metronome;
use aidline::models::pose::PoseConfig;
use std::path::Path;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let Some(recording_path) = args.get(1) else {
        eprintln!("Usage: {} <recording.jsonl>", args[0]);
        std::process::exit(1);
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: failed to load configuration, using defaults: {}", e);
            Config::default()
        }
    };

    let estimator = match ReplayEstimator::from_file(Path::new(recording_path)) {
        Ok(estimator) => estimator,
        Err(e) => {
            eprintln!("Failed to load recording: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== CPR Placement Replay ===\n");
    println!("Recording: {} ({} frames)", recording_path, estimator.remaining());

    let metronome = match Metronome::new(config.compression_bpm) {
        Ok(metronome) => metronome,
        Err(e) => {
            eprintln!("Invalid compression rate: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Compression pacing: {} BPM ({} ms per beat)\n",
        metronome.bpm(),
        metronome.beat_period_ms()
    );

    let pose_config = PoseConfig {
        target_fps: config.target_fps,
        min_detection_confidence: config.min_detection_confidence,
        min_tracking_confidence: config.min_tracking_confidence,
        ..PoseConfig::default()
    };

    let coach = match PlacementCoach::new(pose_config, config.placement_threshold) {
        Ok(coach) => coach,
        Err(e) => {
            eprintln!("Failed to create coach: {}", e);
            std::process::exit(1);
        }
    };
    let (session_id, mut rx) = match coach.start(Box::new(estimator)).await {
        Ok(started) => started,
        Err(e) => {
            eprintln!("Failed to start coaching session: {}", e);
            std::process::exit(1);
        }
    };
    println!("Session: {}\n", session_id);

    let mut good = 0u64;
    let mut bad = 0u64;
    let mut indeterminate = 0u64;

    while let Some(update) = rx.recv().await {
        match update.verdict {
            Some(true) => {
                good += 1;
                println!("[{}] ✓ good position", update.timestamp);
            }
            Some(false) => {
                bad += 1;
                println!("[{}] ✗ move hands to chest center", update.timestamp);
            }
            None => {
                indeterminate += 1;
                println!("[{}] - tracking lost", update.timestamp);
            }
        }
    }

    println!("\n=== Summary ===");
    println!("Good frames:          {}", good);
    println!("Adjustment frames:    {}", bad);
    println!("Indeterminate frames: {}", indeterminate);
}
