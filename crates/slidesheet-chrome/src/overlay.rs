#![forbid(unsafe_code)]

//! The dimming layer behind the sheet.
//!
//! Attached when a presentation starts, the overlay darkens in lockstep
//! with the presentation fraction up to its peak opacity. Detachment is
//! asymmetric, mirroring the presentation lifecycle: a presentation that
//! fails detaches, a dismissal that completes detaches, everything else
//! leaves the overlay in place for the sheet still on screen.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fully-presented dim level.
pub const DEFAULT_PEAK_OPACITY: f64 = 0.4;

/// Dim state behind the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimmingOverlay {
    peak_opacity: f64,
    opacity: f64,
    attached: bool,
}

impl DimmingOverlay {
    /// Build an overlay peaking at `peak_opacity`, clamped into `[0, 1]`.
    pub fn new(peak_opacity: f64) -> Self {
        Self {
            peak_opacity: peak_opacity.max(0.0).min(1.0),
            opacity: 0.0,
            attached: false,
        }
    }

    /// A presentation is starting: attach, fully transparent.
    pub fn presentation_began(&mut self) {
        self.attached = true;
        self.opacity = 0.0;
        debug!("dimming overlay attached");
    }

    /// Track the presentation fraction. Detached overlays ignore this.
    pub fn sync(&mut self, fraction: f64) {
        if self.attached {
            self.opacity = self.peak_opacity * fraction.max(0.0).min(1.0);
        }
    }

    /// The presentation resolved; a failed one takes the overlay with it.
    pub fn presentation_ended(&mut self, completed: bool) {
        if !completed {
            self.detach();
        }
    }

    /// The dismissal resolved; a completed one takes the overlay with it.
    pub fn dismissal_ended(&mut self, completed: bool) {
        if completed {
            self.detach();
        }
    }

    fn detach(&mut self) {
        self.attached = false;
        self.opacity = 0.0;
        debug!("dimming overlay detached");
    }

    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    pub const fn opacity(&self) -> f64 {
        self.opacity
    }

    pub const fn peak_opacity(&self) -> f64 {
        self.peak_opacity
    }
}

impl Default for DimmingOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_PEAK_OPACITY)
    }
}
