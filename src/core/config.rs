use crate::core::metronome::{DEFAULT_BPM, MAX_BPM, MIN_BPM};
use crate::core::placement::PLACEMENT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Wrist-to-chest-center distance below which placement counts as good
    /// (normalized coordinate units)
    pub placement_threshold: f32,
    /// Compression rate in beats per minute
    pub compression_bpm: u32,
    /// Frames per second the estimator is asked to process
    pub target_fps: u32,
    /// Minimum estimator detection confidence (0.0-1.0)
    pub min_detection_confidence: f32,
    /// Minimum landmark tracking confidence (0.0-1.0)
    pub min_tracking_confidence: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placement_threshold: PLACEMENT_THRESHOLD,
            compression_bpm: DEFAULT_BPM,
            target_fps: 15,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

impl Config {
    /// Load configuration from file, creating with defaults if it doesn't exist
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            // Create default config and save it
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.validate()?;

        let config_path = Self::get_config_path()?;

        // Create parent directories if they don't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !(self.placement_threshold > 0.0 && self.placement_threshold <= 1.0) {
            return Err(format!(
                "Invalid placement threshold: {}. Must be greater than 0.0 and at most 1.0",
                self.placement_threshold
            )
            .into());
        }

        if self.compression_bpm < MIN_BPM || self.compression_bpm > MAX_BPM {
            return Err(format!(
                "Invalid compression BPM: {}. Must be between {} and {}",
                self.compression_bpm, MIN_BPM, MAX_BPM
            )
            .into());
        }

        if self.target_fps == 0 || self.target_fps > 60 {
            return Err(format!(
                "Invalid FPS: {}. Must be between 1 and 60",
                self.target_fps
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(format!(
                "Invalid detection confidence: {}. Must be between 0.0 and 1.0",
                self.min_detection_confidence
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.min_tracking_confidence) {
            return Err(format!(
                "Invalid tracking confidence: {}. Must be between 0.0 and 1.0",
                self.min_tracking_confidence
            )
            .into());
        }

        Ok(())
    }

    /// Reset to default configuration
    pub fn reset() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    fn get_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| "Could not determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".aidline");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.placement_threshold, 0.15);
        assert_eq!(config.compression_bpm, 110);
        assert_eq!(config.target_fps, 15);
        assert_eq!(config.min_detection_confidence, 0.5);
        assert_eq!(config.min_tracking_confidence, 0.5);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid placement threshold
        config.placement_threshold = 0.0;
        assert!(config.validate().is_err());
        config.placement_threshold = 1.5;
        assert!(config.validate().is_err());
        config.placement_threshold = 0.15;

        // Invalid BPM
        config.compression_bpm = 90;
        assert!(config.validate().is_err());
        config.compression_bpm = 130;
        assert!(config.validate().is_err());
        config.compression_bpm = 110;

        // Invalid FPS
        config.target_fps = 0;
        assert!(config.validate().is_err());
        config.target_fps = 100;
        assert!(config.validate().is_err());
        config.target_fps = 15;

        // Invalid confidences
        config.min_detection_confidence = 1.5;
        assert!(config.validate().is_err());
        config.min_detection_confidence = 0.5;
        config.min_tracking_confidence = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
