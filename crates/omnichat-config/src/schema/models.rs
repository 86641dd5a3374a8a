use serde::{Deserialize, Serialize};

/// Start URL for each embedded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub chatgpt_url: String,
    pub claude_url: String,
    pub gemini_url: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chatgpt_url: "https://chatgpt.com".into(),
            claude_url: "https://claude.ai".into(),
            gemini_url: "https://gemini.google.com".into(),
        }
    }
}
