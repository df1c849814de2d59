#![forbid(unsafe_code)]

//! Floating-point rectangles for sheet frames.
//!
//! Deliberately tiny: the presenter needs bottom-anchored slices, offsets,
//! and frame interpolation, nothing more. Coordinates follow screen
//! convention with the origin at the top-left and `y` growing downward.

use serde::{Deserialize, Serialize};
use slidesheet_core::easing::lerp;

/// A width/height pair in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The full-width slice of the given height hugging the bottom edge.
    ///
    /// The slice height is clamped into `[0, self.height]`, so the result
    /// never pokes above this rectangle.
    pub fn bottom_slice(&self, height: f64) -> Rect {
        let height = height.max(0.0).min(self.height.max(0.0));
        Rect::new(self.x, self.y + self.height - height, self.width, height)
    }

    /// This rectangle translated by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Field-wise interpolation toward `other`.
    pub fn lerp(&self, other: &Rect, t: f64) -> Rect {
        Rect::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.width, other.width, t),
            lerp(self.height, other.height, t),
        )
    }
}
