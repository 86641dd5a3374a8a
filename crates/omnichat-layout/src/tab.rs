//! The model catalogue shown in the tab bar.

use std::fmt;

use omnichat_common::ModelIdentity;
use serde::{Deserialize, Serialize};

/// One entry in the tab bar. Three tabs embed a hosted chat site; the
/// Gemini API tab talks to the API directly and has no surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTab {
    ChatGpt,
    Claude,
    GeminiWeb,
    GeminiApi,
}

impl ModelTab {
    /// Catalogue order, as shown in the tab bar.
    pub const ALL: [ModelTab; 4] = [
        ModelTab::ChatGpt,
        ModelTab::Claude,
        ModelTab::GeminiWeb,
        ModelTab::GeminiApi,
    ];

    /// The embedded model behind this tab, if it has one.
    pub fn embedded(self) -> Option<ModelIdentity> {
        match self {
            ModelTab::ChatGpt => Some(ModelIdentity::ChatGpt),
            ModelTab::Claude => Some(ModelIdentity::Claude),
            ModelTab::GeminiWeb => Some(ModelIdentity::GeminiWeb),
            ModelTab::GeminiApi => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ModelTab::ChatGpt => "ChatGPT",
            ModelTab::Claude => "Claude",
            ModelTab::GeminiWeb | ModelTab::GeminiApi => "Gemini",
        }
    }

    pub fn subtitle(self) -> Option<&'static str> {
        match self {
            ModelTab::GeminiWeb => Some("Web"),
            ModelTab::GeminiApi => Some("API"),
            ModelTab::ChatGpt | ModelTab::Claude => None,
        }
    }

    /// Stable identifier used in slot keys.
    pub fn slug(self) -> &'static str {
        match self {
            ModelTab::ChatGpt => "chatgpt",
            ModelTab::Claude => "claude",
            ModelTab::GeminiWeb => "gemini",
            ModelTab::GeminiApi => "gemini-api",
        }
    }

    /// Tab for a 1-based keyboard shortcut.
    pub fn from_shortcut(digit: u8) -> Option<ModelTab> {
        Self::ALL.get(usize::from(digit).checked_sub(1)?).copied()
    }
}

impl fmt::Display for ModelTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subtitle() {
            Some(sub) => write!(f, "{} ({sub})", self.title()),
            None => f.write_str(self.title()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_api_tab_lacks_a_surface() {
        let embedded: Vec<_> = ModelTab::ALL.iter().filter_map(|t| t.embedded()).collect();
        assert_eq!(embedded, ModelIdentity::ALL.to_vec());
        assert_eq!(ModelTab::GeminiApi.embedded(), None);
    }

    #[test]
    fn titles_and_subtitles() {
        assert_eq!(ModelTab::ChatGpt.to_string(), "ChatGPT");
        assert_eq!(ModelTab::GeminiWeb.to_string(), "Gemini (Web)");
        assert_eq!(ModelTab::GeminiApi.to_string(), "Gemini (API)");
        assert_eq!(ModelTab::Claude.subtitle(), None);
    }

    #[test]
    fn shortcuts_follow_catalogue_order() {
        assert_eq!(ModelTab::from_shortcut(1), Some(ModelTab::ChatGpt));
        assert_eq!(ModelTab::from_shortcut(4), Some(ModelTab::GeminiApi));
        assert_eq!(ModelTab::from_shortcut(0), None);
        assert_eq!(ModelTab::from_shortcut(5), None);
    }

    #[test]
    fn tab_serialization() {
        let json = serde_json::to_string(&ModelTab::GeminiWeb).unwrap();
        assert_eq!(json, "\"gemini_web\"");
    }
}
