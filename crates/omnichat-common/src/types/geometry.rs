use serde::{Deserialize, Serialize};

/// A rectangle in the logical coordinate space of the host window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when either dimension is zero (or negative). Such rects are
    /// transient layout states and must never reach a surface.
    pub fn is_zero_area(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Snap every component to whole logical pixels.
    pub fn rounded(&self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
            width: self.width.round(),
            height: self.height.round(),
        }
    }

    /// Shrink from the top edge, clamping the height at zero.
    pub fn inset_top(&self, amount: f64) -> Self {
        let amount = amount.min(self.height).max(0.0);
        Self {
            x: self.x,
            y: self.y + amount,
            width: self.width,
            height: self.height - amount,
        }
    }
}
