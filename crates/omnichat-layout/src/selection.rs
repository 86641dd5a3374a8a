//! Single/compare selection state.

use std::collections::HashSet;
use std::fmt;

use omnichat_common::ModelIdentity;
use serde::{Deserialize, Serialize};

use crate::tab::ModelTab;

/// How many tabs compare mode shows at once.
pub const MAX_COMPARE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Single,
    Compare,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Single => "single",
            LayoutMode::Compare => "compare",
        }
    }
}

/// Identity of an on-screen slot. Switching tab or mode yields a different
/// key, so the slot is rebuilt instead of reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub mode: LayoutMode,
    pub tab: ModelTab,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mode.as_str(), self.tab.slug())
    }
}

/// Which tabs are on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    mode: LayoutMode,
    active: ModelTab,
    /// Compare-mode picks, oldest first.
    compare: Vec<ModelTab>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Single,
            active: ModelTab::ChatGpt,
            compare: vec![ModelTab::ChatGpt, ModelTab::Claude],
        }
    }
}

impl Selection {
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn active(&self) -> ModelTab {
        self.active
    }

    pub fn compare_selection(&self) -> &[ModelTab] {
        &self.compare
    }

    /// Handle a tab click. Returns `true` if the visible tabs changed.
    ///
    /// In single mode the tab becomes active. In compare mode membership
    /// toggles: the last selected tab cannot be removed, and adding a
    /// third evicts the oldest.
    pub fn select(&mut self, tab: ModelTab) -> bool {
        let before = self.visible_tabs();
        match self.mode {
            LayoutMode::Single => self.active = tab,
            LayoutMode::Compare => {
                if let Some(pos) = self.compare.iter().position(|t| *t == tab) {
                    if self.compare.len() > 1 {
                        self.compare.remove(pos);
                    }
                } else {
                    self.push_compare(tab);
                }
            }
        }
        self.visible_tabs() != before
    }

    /// Enter or leave compare mode. Entering makes sure the active tab is
    /// part of the comparison.
    pub fn toggle_compare(&mut self) {
        match self.mode {
            LayoutMode::Single => {
                if !self.compare.contains(&self.active) {
                    self.push_compare(self.active);
                }
                self.mode = LayoutMode::Compare;
            }
            LayoutMode::Compare => self.mode = LayoutMode::Single,
        }
    }

    fn push_compare(&mut self, tab: ModelTab) {
        self.compare.push(tab);
        if self.compare.len() > MAX_COMPARE {
            self.compare.remove(0);
        }
    }

    /// Tabs on screen, in catalogue order.
    pub fn visible_tabs(&self) -> Vec<ModelTab> {
        match self.mode {
            LayoutMode::Single => vec![self.active],
            LayoutMode::Compare => ModelTab::ALL
                .into_iter()
                .filter(|t| self.compare.contains(t))
                .collect(),
        }
    }

    pub fn slot_keys(&self) -> Vec<SlotKey> {
        self.visible_tabs()
            .into_iter()
            .map(|tab| SlotKey {
                mode: self.mode,
                tab,
            })
            .collect()
    }

    /// Embedded models currently on screen. Empty when only the API tab is
    /// visible.
    pub fn active_models(&self) -> HashSet<ModelIdentity> {
        self.visible_tabs()
            .into_iter()
            .filter_map(ModelTab::embedded)
            .collect()
    }
}
