//! Configuration schema types for `forge.toml`
//!
//! Every section is optional; a missing file or section yields the defaults
//! below.

use crate::pipeline::{DEFAULT_GUIDANCE_SCALE, DEFAULT_INFERENCE_STEPS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where generated images are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory for PNG files
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("outputs/images")
}

/// Request defaults used when the command line leaves them out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_inference_steps")]
    pub inference_steps: u32,
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            inference_steps: default_inference_steps(),
            guidance_scale: default_guidance_scale(),
        }
    }
}

fn default_inference_steps() -> u32 {
    DEFAULT_INFERENCE_STEPS
}

fn default_guidance_scale() -> f64 {
    DEFAULT_GUIDANCE_SCALE
}

/// Title overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Draw the title (and character subtitle)
    #[serde(default = "default_titles")]
    pub titles: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { titles: default_titles() }
    }
}

fn default_titles() -> bool {
    true
}

/// Root `forge.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    /// Top-level keys this version doesn't understand
    #[serde(flatten, skip_serializing)]
    pub unknown: toml::Table,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "generation.inference_steps")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "forge.toml: '{}' {}", self.field, self.message)
    }
}

impl ForgeConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.output.dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "output.dir".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.generation.inference_steps == 0 {
            errors.push(ConfigValidationError {
                field: "generation.inference_steps".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if !self.generation.guidance_scale.is_finite() {
            errors.push(ConfigValidationError {
                field: "generation.guidance_scale".to_string(),
                message: "must be a finite number".to_string(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.output.dir, PathBuf::from("outputs/images"));
        assert_eq!(config.generation.inference_steps, 20);
        assert_eq!(config.generation.guidance_scale, 7.5);
        assert!(config.overlay.titles);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: ForgeConfig = toml::from_str("").unwrap();
        assert_eq!(config, ForgeConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: ForgeConfig = toml::from_str(
            r#"
[generation]
guidance_scale = 9.0

[overlay]
titles = false
"#,
        )
        .unwrap();
        assert_eq!(config.generation.inference_steps, 20);
        assert_eq!(config.generation.guidance_scale, 9.0);
        assert!(!config.overlay.titles);
        assert_eq!(config.output.dir, PathBuf::from("outputs/images"));
    }

    #[test]
    fn test_unknown_keys_collected() {
        let config: ForgeConfig = toml::from_str("palette_mode = \"neon\"\n[output]\ndir = \"x\"").unwrap();
        assert!(config.unknown.contains_key("palette_mode"));
        assert_eq!(config.output.dir, PathBuf::from("x"));
    }

    #[test]
    fn test_validate_reports_each_field() {
        let mut config = ForgeConfig::default();
        config.output.dir = PathBuf::new();
        config.generation.inference_steps = 0;
        config.generation.guidance_scale = f64::INFINITY;

        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["output.dir", "generation.inference_steps", "generation.guidance_scale"]
        );
        assert_eq!(
            errors[1].to_string(),
            "forge.toml: 'generation.inference_steps' must be a positive integer"
        );
    }
}
