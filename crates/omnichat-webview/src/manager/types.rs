use std::time::Duration;

use omnichat_common::ModelIdentity;

use crate::label::DEFAULT_LABEL_PREFIX;

/// Where each embedded model's surface points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelUrls {
    pub chatgpt: String,
    pub claude: String,
    pub gemini: String,
}

impl Default for ModelUrls {
    fn default() -> Self {
        Self {
            chatgpt: "https://chatgpt.com".to_string(),
            claude: "https://claude.ai".to_string(),
            gemini: "https://gemini.google.com".to_string(),
        }
    }
}

impl ModelUrls {
    /// The URL for `model`, or `about:blank` if none is configured.
    pub fn url_for(&self, model: ModelIdentity) -> &str {
        let url = match model {
            ModelIdentity::ChatGpt => &self.chatgpt,
            ModelIdentity::Claude => &self.claude,
            ModelIdentity::GeminiWeb => &self.gemini,
        };
        if url.trim().is_empty() {
            "about:blank"
        } else {
            url
        }
    }
}

/// Timing and naming knobs for the embedding lifecycle.
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    /// How long to wait for a creation outcome before assuming success.
    pub fallback_timeout: Duration,
    /// Backstop polling interval for the position synchronizer.
    pub poll_interval: Duration,
    /// Delay before the first geometry push after a surface becomes ready.
    pub settle_delay: Duration,
    /// Delay between slot activation and the first creation attempt.
    pub activation_delay: Duration,
    /// Prefix shared by every surface label this process creates.
    pub label_prefix: String,
    pub urls: ModelUrls,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            fallback_timeout: Duration::from_millis(2000),
            poll_interval: Duration::from_millis(100),
            settle_delay: Duration::from_millis(50),
            activation_delay: Duration::from_millis(100),
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            urls: ModelUrls::default(),
        }
    }
}
