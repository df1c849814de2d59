#![forbid(unsafe_code)]

//! Header content that rearranges itself during the transition.
//!
//! While the sheet is collapsed, its title label sits docked near the
//! leading edge of the header bar and the detail label is hidden. As the
//! presentation fraction grows the title glides to the center of the bar
//! and the detail label fades in, fully legible exactly when the sheet is
//! fully presented.

use crate::geom::Size;
use serde::{Deserialize, Serialize};
use slidesheet_core::easing::lerp;

/// Position of a label inside the header bar, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelOffset {
    /// Distance from the leading edge.
    pub leading: f64,
    /// Distance from the top edge.
    pub top: f64,
}

impl LabelOffset {
    pub const fn new(leading: f64, top: f64) -> Self {
        Self { leading, top }
    }
}

/// The header bar's movable content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderContent {
    header: Size,
    title: Size,
    docked: LabelOffset,
    title_offset: LabelOffset,
    detail_opacity: f64,
}

impl HeaderContent {
    /// Build header content with the title at its docked offset and the
    /// detail label fully visible, as a resting presented sheet shows it.
    pub fn new(header: Size, title: Size, docked: LabelOffset) -> Self {
        Self {
            header,
            title,
            docked,
            title_offset: docked,
            detail_opacity: 1.0,
        }
    }

    /// Reset for an incoming presentation: title docked, detail hidden.
    pub fn prepare(&mut self) {
        self.title_offset = self.docked;
        self.detail_opacity = 0.0;
    }

    /// Lay the content out for a presentation fraction.
    pub fn adjust(&mut self, fraction: f64) {
        let fraction = fraction.max(0.0).min(1.0);
        let centered = self.centered();
        self.title_offset = LabelOffset::new(
            lerp(self.docked.leading, centered.leading, fraction),
            lerp(self.docked.top, centered.top, fraction),
        );
        self.detail_opacity = fraction;
    }

    /// Offset that centers the title in the header bar.
    fn centered(&self) -> LabelOffset {
        LabelOffset::new(
            (self.header.width - self.title.width) / 2.0,
            (self.header.height - self.title.height) / 2.0,
        )
    }

    /// The header bar's own size.
    pub const fn bar(&self) -> Size {
        self.header
    }

    pub const fn title_offset(&self) -> LabelOffset {
        self.title_offset
    }

    pub const fn detail_opacity(&self) -> f64 {
        self.detail_opacity
    }

    pub const fn docked(&self) -> LabelOffset {
        self.docked
    }
}

impl Default for HeaderContent {
    /// A standard phone-width header bar with a docked title label.
    fn default() -> Self {
        Self::new(
            Size::new(375.0, 60.0),
            Size::new(120.0, 24.0),
            LabelOffset::new(16.0, 8.0),
        )
    }
}
