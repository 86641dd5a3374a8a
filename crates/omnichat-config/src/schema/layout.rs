//! Slot layout dimensions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of the tab header (valid range: 0-200).
    pub header_height: u32,
    /// Space above each slot's surface for its title strip (valid range: 0-200).
    pub content_inset_top: u32,
    /// Gap between compare columns (valid range: 0-100).
    pub gap: u32,
    /// Below this window width compare slots stack vertically (valid range: 0-4000).
    pub compare_breakpoint: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: 48,
            content_inset_top: 32,
            gap: 12,
            compare_breakpoint: 768,
        }
    }
}
