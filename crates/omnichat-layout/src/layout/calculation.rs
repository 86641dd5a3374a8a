//! Layout calculation: split the content area between visible slots.

use omnichat_common::Geometry;

use super::{LayoutEngine, SlotLayout};
use crate::selection::SlotKey;

impl LayoutEngine {
    /// Lay out `keys` inside a window of `viewport` size. Slots share the
    /// area below the header equally, side by side when there is room and
    /// stacked otherwise.
    pub fn compute(&self, keys: &[SlotKey], viewport: Geometry) -> Vec<SlotLayout> {
        let content = viewport.inset_top(self.header_height);
        let frames = self.split(content, keys.len());
        keys.iter()
            .zip(frames)
            .map(|(key, frame)| SlotLayout {
                key: *key,
                frame,
                surface: frame.inset_top(self.content_inset_top),
            })
            .collect()
    }

    fn split(&self, area: Geometry, count: usize) -> Vec<Geometry> {
        if count <= 1 {
            return vec![area; count];
        }

        let n = count as f64;
        let gaps = self.gap * (n - 1.0);
        if area.width >= self.compare_breakpoint {
            let width = ((area.width - gaps) / n).max(0.0);
            (0..count)
                .map(|i| {
                    let x = area.x + i as f64 * (width + self.gap);
                    Geometry::new(x, area.y, width, area.height)
                })
                .collect()
        } else {
            let height = ((area.height - gaps) / n).max(0.0);
            (0..count)
                .map(|i| {
                    let y = area.y + i as f64 * (height + self.gap);
                    Geometry::new(area.x, y, area.width, height)
                })
                .collect()
        }
    }
}
