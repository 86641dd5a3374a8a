//! Layout engine types and configuration.

use omnichat_common::Geometry;

use crate::selection::SlotKey;

/// Configuration for the layout engine that computes slot positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    /// Height of the tab header above all slots.
    pub header_height: f64,
    /// Strip at the top of each slot reserved for its title; the surface
    /// sits below it.
    pub content_inset_top: f64,
    /// Gap in pixels between compare slots.
    pub gap: f64,
    /// Below this content width compare slots stack vertically.
    pub compare_breakpoint: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            header_height: 48.0,
            content_inset_top: 32.0,
            gap: 12.0,
            compare_breakpoint: 768.0,
        }
    }
}

/// Where one slot sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub key: SlotKey,
    /// The whole slot, title strip included.
    pub frame: Geometry,
    /// The placeholder the slot's surface tracks.
    pub surface: Geometry,
}
