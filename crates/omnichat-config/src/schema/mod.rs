//! Configuration schema types for OmniChat.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod embedding;
mod gemini;
mod layout;
mod models;
mod system;
mod window;

pub use embedding::*;
pub use gemini::*;
pub use layout::*;
pub use models::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OmniChatConfig {
    pub embedding: EmbeddingConfig,
    pub models: ModelsConfig,
    pub gemini: GeminiConfig,
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: OmniChatConfig = toml::from_str("").unwrap();
        assert_eq!(config.embedding.poll_interval_ms, 100);
        assert_eq!(config.models.claude_url, "https://claude.ai");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.layout.header_height, 48);
        assert_eq!(config.logging.level, "omnichat=info");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: OmniChatConfig = toml::from_str(
            r#"
[embedding]
fallback_timeout_ms = 5000

[window]
width = 1600
"#,
        )
        .unwrap();
        assert_eq!(config.embedding.fallback_timeout_ms, 5000);
        assert_eq!(config.embedding.settle_delay_ms, 50);
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.window.height, 800);
    }
}
