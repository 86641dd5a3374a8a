//! Embedded surface lifecycle timings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Wait for a creation outcome before assuming success (valid range: 250-30000).
    pub fallback_timeout_ms: u32,
    /// Backstop geometry polling interval (valid range: 16-5000).
    pub poll_interval_ms: u32,
    /// Delay before the first geometry push (valid range: 0-2000).
    pub settle_delay_ms: u32,
    /// Delay between slot activation and surface creation (valid range: 0-2000).
    pub activation_delay_ms: u32,
    /// Prefix shared by every surface label. Must not be empty.
    pub label_prefix: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            fallback_timeout_ms: 2000,
            poll_interval_ms: 100,
            settle_delay_ms: 50,
            activation_delay_ms: 100,
            label_prefix: "emb-".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_defaults() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.fallback_timeout_ms, 2000);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.settle_delay_ms, 50);
        assert_eq!(config.activation_delay_ms, 100);
        assert_eq!(config.label_prefix, "emb-");
    }
}
