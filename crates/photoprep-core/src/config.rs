//! Editor configuration.
//!
//! Hosts can ship a JSON document to override defaults; missing fields fall
//! back to the values below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crop::AspectRatio;
use crate::error::ValidationError;

/// JPEG quality for committed edits (canvas quality 0.9).
pub const DEFAULT_COMMIT_QUALITY: u8 = 90;

/// JPEG quality for crop extraction (canvas quality 0.95).
pub const DEFAULT_CROP_QUALITY: u8 = 95;

/// Errors loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`EditorConfig`]
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is out of range
    #[error("Invalid config value: {0}")]
    Invalid(#[from] ValidationError),
}

/// Tunables for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// JPEG quality used by commit and apply-to-all
    pub commit_quality: u8,
    /// JPEG quality used when extracting a crop result
    pub crop_quality: u8,
    /// Aspect ratio preset selected when a crop starts
    pub default_aspect_ratio: AspectRatio,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            commit_quality: DEFAULT_COMMIT_QUALITY,
            crop_quality: DEFAULT_CROP_QUALITY,
            default_aspect_ratio: AspectRatio::Free,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for quality in [self.commit_quality, self.crop_quality] {
            if !(1..=100).contains(&quality) {
                return Err(ValidationError::QualityOutOfRange(quality));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.commit_quality, 90);
        assert_eq!(config.crop_quality, 95);
        assert_eq!(config.default_aspect_ratio, AspectRatio::Free);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"commitQuality": 80}"#).unwrap();
        assert_eq!(config.commit_quality, 80);
        assert_eq!(config.crop_quality, 95);
    }

    #[test]
    fn test_aspect_ratio_from_json() {
        let config = EditorConfig::from_json(r#"{"defaultAspectRatio": "4:5"}"#).unwrap();
        assert_eq!(config.default_aspect_ratio, AspectRatio::FourFive);
    }

    #[test]
    fn test_zero_quality_rejected() {
        let result = EditorConfig::from_json(r#"{"cropQuality": 0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ValidationError::QualityOutOfRange(0)))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            EditorConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
