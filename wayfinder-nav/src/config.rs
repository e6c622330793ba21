//! Configuration for the navigation engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Navigation engine configuration
///
/// The timing values mirror the source system's behavior and are defaults,
/// not hard requirements; any of them can be overridden before spawning the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Minimum detector confidence for an observation to be counted
    pub confidence_floor: f32,
    /// Consecutive supporting frames required before a detection is trusted
    pub stability_threshold: u32,
    /// Minimum gap between any two announcements
    pub object_cooldown_ms: u64,
    /// Additional minimum gap between two navigation instructions
    pub navigation_cooldown_ms: u64,
    /// Delay before the welcome message after the engine starts
    pub startup_delay_ms: u64,
    /// Pause between the turn announcement and the corridor transition;
    /// must clear the navigation cooldown or the corridor-entry phrase
    /// would always be gated away
    pub ready_to_turn_delay_ms: u64,
    /// Length of the window during which detections are ignored while
    /// advancing between corridors
    pub transition_duration_ms: u64,
    /// Capacity of the engine mailbox; observations beyond it are dropped
    pub mailbox_capacity: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 0.6,
            stability_threshold: 3,
            object_cooldown_ms: 1_500,
            navigation_cooldown_ms: 3_000,
            startup_delay_ms: 1_000,
            ready_to_turn_delay_ms: 3_000,
            transition_duration_ms: 3_000,
            mailbox_capacity: 256,
        }
    }
}

impl NavConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.confidence_floor.is_finite()
            || self.confidence_floor <= 0.0
            || self.confidence_floor > 1.0
        {
            return Err("Confidence floor must be in (0, 1]".to_string());
        }

        if self.stability_threshold == 0 {
            return Err("Stability threshold must be at least 1".to_string());
        }

        if self.object_cooldown_ms == 0 || self.navigation_cooldown_ms == 0 {
            return Err("Cooldowns must be non-zero".to_string());
        }

        if self.navigation_cooldown_ms < self.object_cooldown_ms {
            return Err("Navigation cooldown must not be shorter than the object cooldown".to_string());
        }

        if self.transition_duration_ms == 0 {
            return Err("Transition duration must be non-zero".to_string());
        }

        if self.mailbox_capacity == 0 {
            return Err("Mailbox capacity must be non-zero".to_string());
        }

        Ok(())
    }

    pub fn object_cooldown(&self) -> Duration {
        Duration::from_millis(self.object_cooldown_ms)
    }

    pub fn navigation_cooldown(&self) -> Duration {
        Duration::from_millis(self.navigation_cooldown_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn ready_to_turn_delay(&self) -> Duration {
        Duration::from_millis(self.ready_to_turn_delay_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = NavConfig::default();
        assert!((config.confidence_floor - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.stability_threshold, 3);
        assert_eq!(config.object_cooldown_ms, 1_500);
        assert_eq!(config.navigation_cooldown_ms, 3_000);
        assert_eq!(config.transition_duration_ms, 3_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_confidence_floor() {
        let mut config = NavConfig::default();
        config.confidence_floor = 0.0;
        assert!(config.validate().is_err());

        config.confidence_floor = 1.1;
        assert!(config.validate().is_err());

        config.confidence_floor = f32::NAN;
        assert!(config.validate().is_err());

        config.confidence_floor = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_threshold_zero() {
        let mut config = NavConfig::default();
        config.stability_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_cooldowns() {
        let mut config = NavConfig::default();
        config.object_cooldown_ms = 0;
        assert!(config.validate().is_err());

        config.object_cooldown_ms = 1_500;
        config.navigation_cooldown_ms = 1_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_mailbox() {
        let mut config = NavConfig::default();
        config.mailbox_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_duration_accessors() {
        let config = NavConfig::default();
        assert_eq!(config.object_cooldown(), Duration::from_millis(1_500));
        assert_eq!(config.navigation_cooldown(), Duration::from_secs(3));
        assert_eq!(config.transition_duration(), Duration::from_secs(3));
    }
}
