//! Configuration loading and discovery for `forge.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::ForgeConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "forge.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse forge.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override inference steps
    pub steps: Option<u32>,
    /// Override guidance scale
    pub guidance: Option<f64>,
}

/// Find forge.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for forge.toml
/// 2. Check XDG_CONFIG_HOME/conceptforge/forge.toml (or ~/.config/conceptforge/forge.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find forge.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("conceptforge").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find forge.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a forge.toml file.
///
/// With an explicit path the file must exist. Otherwise `find_config()`
/// locates one, and when nothing is found the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<ForgeConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("no forge.toml found, using defaults");
            Ok(ForgeConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<ForgeConfig, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let config: ForgeConfig = toml::from_str(&contents)?;

    for key in config.unknown.keys() {
        warn!(path = %path.display(), key = %key, "ignoring unknown config key");
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut ForgeConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.output.dir = out.clone();
    }
    if let Some(steps) = overrides.steps {
        config.generation.inference_steps = steps;
    }
    if let Some(guidance) = overrides.guidance {
        config.generation.guidance_scale = guidance;
    }
}
