//! Configuration loading for DhruvaRecovery

use crate::error::{RecoveryError, Result};
use serde::Deserialize;
use std::path::Path;

/// Recovery behavior configuration.
///
/// Immutable after initialization: the controller reads it but never
/// writes it back.
#[derive(Clone, Debug, Deserialize)]
pub struct RecoveryConfig {
    /// Half-side of the square cleared around the robot (meters, default 0.5)
    #[serde(default = "default_clearing_distance")]
    pub clearing_distance: f32,

    /// Translational speed cap while limited (m/s, default 0.25)
    #[serde(default = "default_limited_trans_speed")]
    pub limited_trans_speed: f32,

    /// Rotational speed cap while limited (rad/s, default 0.45)
    #[serde(default = "default_limited_rot_speed")]
    pub limited_rot_speed: f32,

    /// Distance the robot must travel before the limit is lifted (meters, default 0.3)
    #[serde(default = "default_limited_distance")]
    pub limited_distance: f32,

    /// Namespace of the planner whose speed caps are modified
    #[serde(default = "default_planner_namespace")]
    pub planner_namespace: String,
}

// Default value functions
fn default_clearing_distance() -> f32 {
    0.5
}
fn default_limited_trans_speed() -> f32 {
    0.25
}
fn default_limited_rot_speed() -> f32 {
    0.45
}
fn default_limited_distance() -> f32 {
    0.3
}
fn default_planner_namespace() -> String {
    "dwa_planner".to_string()
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            clearing_distance: default_clearing_distance(),
            limited_trans_speed: default_limited_trans_speed(),
            limited_rot_speed: default_limited_rot_speed(),
            limited_distance: default_limited_distance(),
            planner_namespace: default_planner_namespace(),
        }
    }
}

impl RecoveryConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RecoveryError::Config(format!("Failed to read config file: {}", e)))?;
        let config: RecoveryConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecoveryConfig::default();
        assert_eq!(config.clearing_distance, 0.5);
        assert_eq!(config.limited_trans_speed, 0.25);
        assert_eq!(config.limited_rot_speed, 0.45);
        assert_eq!(config.limited_distance, 0.3);
        assert_eq!(config.planner_namespace, "dwa_planner");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: RecoveryConfig =
            toml::from_str("limited_distance = 0.6\nplanner_namespace = \"teb_planner\"")
                .expect("valid config");
        assert_eq!(config.limited_distance, 0.6);
        assert_eq!(config.planner_namespace, "teb_planner");
        assert_eq!(config.clearing_distance, 0.5);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: RecoveryConfig = toml::from_str("").expect("valid config");
        assert_eq!(config.limited_trans_speed, 0.25);
    }
}
