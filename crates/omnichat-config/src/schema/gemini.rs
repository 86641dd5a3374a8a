//! Direct Gemini API settings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown instead of secrets.
pub const REDACTED: &str = "<redacted>";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key. Empty means the API tab is unavailable.
    pub api_key: String,
    pub model: String,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Nucleus sampling (valid range: 0.0-1.0).
    pub top_p: f64,
    /// Top-k sampling (valid range: 1-100).
    pub top_k: u32,
    /// Maximum output tokens (valid range: 1-65536).
    pub max_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash".into(),
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_tokens: 4096,
        }
    }
}

impl GeminiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { REDACTED };
        f.debug_struct("GeminiConfig")
            .field("api_key", &key)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("top_k", &self.top_k)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
