#![forbid(unsafe_code)]

//! Panel sizing from measured row extents.
//!
//! The sheet's preferred extent is derived, not configured: twice the
//! header extent (header bar plus matching footer chrome) plus the sum of
//! the row extents. Rows start at an estimate and are corrected as the
//! host actually lays them out; [`record_row_extent`] reports whether the
//! correction changed anything so callers know when to re-measure.
//!
//! [`record_row_extent`]: PanelMetrics::record_row_extent

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Row estimate before the host has measured anything, in points.
pub const DEFAULT_ROW_EXTENT: f64 = 80.0;

/// Standard header bar extent, in points.
pub const DEFAULT_HEADER_EXTENT: f64 = 60.0;

/// Measured panel composition: one header plus a run of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelMetrics {
    header_extent: f64,
    row_extents: Vec<f64>,
}

impl PanelMetrics {
    /// Build metrics for `row_count` rows at the default estimate.
    ///
    /// Negative header extents are treated as zero.
    pub fn new(header_extent: f64, row_count: usize) -> Self {
        Self {
            header_extent: header_extent.max(0.0),
            row_extents: vec![DEFAULT_ROW_EXTENT; row_count],
        }
    }

    /// Record the measured extent of one row. Returns `true` when the
    /// recorded value actually changed, meaning the preferred extent
    /// moved too. Unknown rows are ignored.
    pub fn record_row_extent(&mut self, row: usize, extent: f64) -> bool {
        let Some(slot) = self.row_extents.get_mut(row) else {
            return false;
        };
        let extent = extent.max(0.0);
        if (*slot - extent).abs() < f64::EPSILON {
            return false;
        }
        *slot = extent;
        debug!(row, extent, "row extent recorded");
        true
    }

    /// The last recorded extent for `row`, if it exists.
    pub fn row_extent(&self, row: usize) -> Option<f64> {
        self.row_extents.get(row).copied()
    }

    /// Header chrome above and below plus every row.
    pub fn preferred_extent(&self) -> f64 {
        self.header_extent * 2.0 + self.row_extents.iter().sum::<f64>()
    }

    pub fn row_count(&self) -> usize {
        self.row_extents.len()
    }

    pub const fn header_extent(&self) -> f64 {
        self.header_extent
    }
}

impl Default for PanelMetrics {
    /// Three rows at the default estimate under a standard header.
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_EXTENT, 3)
    }
}
