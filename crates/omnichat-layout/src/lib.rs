//! Presentation-side state for OmniChat: which model tabs exist, which are
//! on screen, where each slot sits, and how slot sets change.

pub mod layout;
pub mod plan;
pub mod selection;
pub mod tab;

pub use layout::{LayoutEngine, SlotLayout};
pub use plan::{diff_slots, SlotDiff};
pub use selection::{LayoutMode, Selection, SlotKey};
pub use tab::ModelTab;
