//! OmniChat configuration system.
//!
//! TOML-based configuration with validation and atomic saving. Every
//! section uses serde defaults, so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use omnichat_config::{config_to_json, load_config};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;

pub use schema::{
    EmbeddingConfig, GeminiConfig, LayoutConfig, LoggingConfig, ModelsConfig, OmniChatConfig,
    WindowConfig, CONFIG_SCHEMA_VERSION,
};
pub use toml_loader::{default_config_path, load_from_path};
pub use toml_writer::{save_config, save_config_to_path};

use omnichat_common::ConfigError;

/// Load config from the platform default path, creating a commented
/// default file when none exists. Invalid sections fall back to defaults.
pub fn load_config() -> Result<OmniChatConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to pretty-printed JSON. The Gemini API key is
/// masked.
pub fn config_to_json(config: &OmniChatConfig) -> String {
    let mut shown = config.clone();
    if !shown.gemini.api_key.is_empty() {
        shown.gemini.api_key = schema::REDACTED.to_string();
    }
    serde_json::to_string_pretty(&shown)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&OmniChatConfig::default());
        for section in ["embedding", "models", "gemini", "window", "layout", "logging"] {
            assert!(json.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }

    #[test]
    fn config_to_json_masks_api_key() {
        let mut config = OmniChatConfig::default();
        config.gemini.api_key = "AIza-secret".into();
        let json = config_to_json(&config);
        assert!(!json.contains("AIza-secret"));
        assert!(json.contains(schema::REDACTED));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = serde_json::to_string(&OmniChatConfig::default()).unwrap();
        let parsed: OmniChatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.embedding.fallback_timeout_ms, 2000);
        assert_eq!(parsed.window.title, "OmniChat");
    }
}
