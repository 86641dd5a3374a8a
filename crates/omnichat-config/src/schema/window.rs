use serde::{Deserialize, Serialize};

/// Main window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial logical width (valid range: 400-7680).
    pub width: u32,
    /// Initial logical height (valid range: 300-4320).
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OmniChat".into(),
            width: 1280,
            height: 800,
        }
    }
}
