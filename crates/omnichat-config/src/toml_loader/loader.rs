//! Core TOML config loading: read from path or platform default.

use std::path::Path;

use omnichat_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::OmniChatConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. Sections that fail validation are
/// logged and replaced by their defaults.
pub fn load_from_path(path: &Path) -> Result<OmniChatConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let mut config: OmniChatConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    let problems = validation::sanitize(&mut config);
    if !problems.is_empty() {
        warn!(
            problems = %problems.join("; "),
            "invalid config values replaced with defaults"
        );
    }

    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/omnichat/config.toml`
/// On Linux: `~/.config/omnichat/config.toml`
///
/// If the file does not exist, creates a default config file and returns
/// defaults.
pub fn load_default() -> Result<OmniChatConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config found, creating default");
            create_default_config(&path)?;
            Ok(OmniChatConfig::default())
        }
        Err(e) => Err(e),
    }
}
