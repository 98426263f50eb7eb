//! Inspector configuration, loaded from JSON.
//!
//! Every field is optional; missing sections fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trellis::DebuggingConfig;

use crate::gesture::GestureConfig;
use crate::projection::ProjectionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub projection: ProjectionConfig,
    pub gesture: GestureConfig,
    pub debugging: DebuggingConfig,
}

impl InspectorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let projection = &self.projection;
        for (field, value) in [
            ("projection.layer_spacing", projection.layer_spacing),
            ("projection.rotation_damping", projection.rotation_damping),
            ("projection.eye_distance", projection.eye_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use trellis::ElementFrameMode;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(InspectorConfig::from_json("{}").unwrap(), InspectorConfig::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = InspectorConfig::from_json(
            r#"{
                "projection": { "layer_spacing": 40 },
                "gesture": { "rotation_timeout": 50 },
                "debugging": { "element_frames": "all", "long_press_for_debugger": true }
            }"#,
        )
        .unwrap();
        assert_eq!(config.projection.layer_spacing, 40.0);
        assert_eq!(config.projection.eye_distance, ProjectionConfig::default().eye_distance);
        assert_eq!(config.gesture.rotation_timeout, Duration::from_millis(50));
        assert_eq!(config.debugging.element_frames, ElementFrameMode::All);
        assert!(config.debugging.long_press_for_debugger);
    }

    #[test]
    fn rejects_non_positive_values() {
        let err = InspectorConfig::from_json(r#"{"projection":{"rotation_damping":0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "projection.rotation_damping",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(InspectorConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn serialized_config_loads_back() {
        let config = InspectorConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(InspectorConfig::from_json(&json).unwrap(), config);
    }
}
