use serde::{Deserialize, Serialize};
use std::fmt;

/// Which externally hosted chat provider an embedded surface displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelIdentity {
    #[serde(rename = "chatgpt")]
    ChatGpt,
    Claude,
    #[serde(rename = "gemini")]
    GeminiWeb,
}

impl ModelIdentity {
    pub const ALL: [ModelIdentity; 3] = [Self::ChatGpt, Self::Claude, Self::GeminiWeb];

    /// Stable lowercase slug, used in surface labels and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::GeminiWeb => "gemini",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == slug)
    }
}

impl fmt::Display for ModelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
