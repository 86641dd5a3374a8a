//! Settings for one Gemini client.

use std::fmt;

use serde::Serialize;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// The `generationConfig` block sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampling {
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            max_output_tokens: 4096,
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
        }
    }
}

/// Credentials, model and sampling for a [`GeminiClient`](super::GeminiClient).
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub sampling: Sampling,
}

impl GeminiConfig {
    /// Default model and sampling with the given key. Surrounding whitespace
    /// is dropped since keys are usually pasted.
    pub fn new(api_key: impl AsRef<str>) -> Self {
        Self {
            api_key: api_key.as_ref().trim().to_string(),
            model: DEFAULT_MODEL.to_string(),
            sampling: Sampling::default(),
        }
    }

    /// Use `model`, or keep the default when it is blank.
    pub fn with_model(mut self, model: &str) -> Self {
        let model = model.trim();
        if !model.is_empty() {
            self.model = model.to_string();
        }
        self
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.has_api_key() { "<redacted>" } else { "<unset>" };
        f.debug_struct("GeminiConfig")
            .field("api_key", &key)
            .field("model", &self.model)
            .field("sampling", &self.sampling)
            .finish()
    }
}
