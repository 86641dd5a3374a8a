//! Slot set transitions.

use std::collections::BTreeSet;

use crate::selection::SlotKey;

/// How the on-screen slot set changes between two layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotDiff {
    /// Slots that disappear; their controllers are deactivated.
    pub removed: Vec<SlotKey>,
    /// New slots; controllers are created and activated.
    pub added: Vec<SlotKey>,
    /// Slots present in both; only their placeholders move.
    pub kept: Vec<SlotKey>,
}

impl SlotDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

pub fn diff_slots(old: &[SlotKey], new: &[SlotKey]) -> SlotDiff {
    let old_set: BTreeSet<SlotKey> = old.iter().copied().collect();
    let new_set: BTreeSet<SlotKey> = new.iter().copied().collect();
    SlotDiff {
        removed: old_set.difference(&new_set).copied().collect(),
        added: new_set.difference(&old_set).copied().collect(),
        kept: old_set.intersection(&new_set).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{LayoutMode, Selection};
    use crate::tab::ModelTab;

    #[test]
    fn switching_tab_replaces_slot() {
        let mut sel = Selection::default();
        let before = sel.slot_keys();
        sel.select(ModelTab::Claude);
        let diff = diff_slots(&before, &sel.slot_keys());

        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.removed[0].tab, ModelTab::ChatGpt);
        assert_eq!(diff.added[0].tab, ModelTab::Claude);
        assert!(diff.kept.is_empty());
    }

    #[test]
    fn toggling_mode_rebuilds_every_slot() {
        let mut sel = Selection::default();
        let before = sel.slot_keys();
        sel.toggle_compare();
        let diff = diff_slots(&before, &sel.slot_keys());

        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.added.len(), 2);
        assert!(diff.added.iter().all(|k| k.mode == LayoutMode::Compare));
    }

    #[test]
    fn compare_swap_keeps_shared_slot() {
        let mut sel = Selection::default();
        sel.toggle_compare();
        let before = sel.slot_keys();
        sel.select(ModelTab::GeminiWeb);
        let diff = diff_slots(&before, &sel.slot_keys());

        assert_eq!(diff.kept.len(), 1);
        assert_eq!(diff.kept[0].tab, ModelTab::Claude);
        assert_eq!(diff.removed[0].tab, ModelTab::ChatGpt);
        assert_eq!(diff.added[0].tab, ModelTab::GeminiWeb);
    }

    #[test]
    fn identical_sets_are_empty_diff() {
        let sel = Selection::default();
        assert!(diff_slots(&sel.slot_keys(), &sel.slot_keys()).is_empty());
    }
}
