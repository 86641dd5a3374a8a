mod calculation;
mod types;

pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{LayoutMode, SlotKey};
    use crate::tab::ModelTab;
    use omnichat_common::Geometry;

    fn key(mode: LayoutMode, tab: ModelTab) -> SlotKey {
        SlotKey { mode, tab }
    }

    #[test]
    fn single_slot_fills_content_area() {
        let engine = LayoutEngine::default();
        let keys = [key(LayoutMode::Single, ModelTab::Claude)];
        let result = engine.compute(&keys, Geometry::new(0.0, 0.0, 1280.0, 800.0));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].frame, Geometry::new(0.0, 48.0, 1280.0, 752.0));
        assert_eq!(result[0].surface, Geometry::new(0.0, 80.0, 1280.0, 720.0));
    }

    #[test]
    fn wide_compare_splits_columns_with_gap() {
        let engine = LayoutEngine::default();
        let keys = [
            key(LayoutMode::Compare, ModelTab::ChatGpt),
            key(LayoutMode::Compare, ModelTab::Claude),
        ];
        let result = engine.compute(&keys, Geometry::new(0.0, 0.0, 1212.0, 800.0));

        assert_eq!(result[0].frame, Geometry::new(0.0, 48.0, 600.0, 752.0));
        assert_eq!(result[1].frame, Geometry::new(612.0, 48.0, 600.0, 752.0));
        assert_eq!(result[1].key.tab, ModelTab::Claude);
    }

    #[test]
    fn narrow_compare_stacks_rows() {
        let engine = LayoutEngine::default();
        let keys = [
            key(LayoutMode::Compare, ModelTab::ChatGpt),
            key(LayoutMode::Compare, ModelTab::GeminiWeb),
        ];
        let result = engine.compute(&keys, Geometry::new(0.0, 0.0, 600.0, 860.0));

        assert_eq!(result[0].frame, Geometry::new(0.0, 48.0, 600.0, 400.0));
        assert_eq!(result[1].frame, Geometry::new(0.0, 460.0, 600.0, 400.0));
    }

    #[test]
    fn tiny_window_yields_zero_area_surface() {
        let engine = LayoutEngine::default();
        let keys = [key(LayoutMode::Single, ModelTab::ChatGpt)];
        let result = engine.compute(&keys, Geometry::new(0.0, 0.0, 300.0, 60.0));
        assert!(result[0].surface.is_zero_area());
    }

    #[test]
    fn no_keys_no_slots() {
        let engine = LayoutEngine::default();
        assert!(engine
            .compute(&[], Geometry::new(0.0, 0.0, 800.0, 600.0))
            .is_empty());
    }
}
