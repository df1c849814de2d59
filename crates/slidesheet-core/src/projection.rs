#![forbid(unsafe_code)]

//! Velocity projection for gesture releases.
//!
//! When a drag ends, the sheet should land where the finger was heading,
//! not where it happened to lift off. [`project`] answers that question
//! with an exponential decay model: velocity decays by a fixed rate per
//! millisecond, and the projected displacement is the sum of the whole
//! decay series folded into a closed form.
//!
//! Per-millisecond travel forms a geometric series with ratio `rate`, so
//! total extra travel is `velocity_per_ms * rate / (1 - rate)`.
//!
//! # Invariants
//!
//! 1. `project(d, 0.0, rate) == d` for every displacement and rate.
//! 2. Projection is monotonic in velocity for a fixed displacement.
//! 3. `DecelerationRate` always holds a value in `(0, 1)` exclusive, so
//!    the series factor is finite and positive.

use serde::{Deserialize, Serialize};

/// Velocities arrive in points per second; the decay model steps per
/// millisecond.
const MILLIS_PER_SECOND: f64 = 1000.0;

/// Bounds keeping the series factor finite. A rate of exactly 1.0 would
/// never decay; a rate of 0.0 would project nothing.
const MIN_RATE: f64 = 0.001;
const MAX_RATE: f64 = 0.9999;

// ---------------------------------------------------------------------------
// DecelerationRate
// ---------------------------------------------------------------------------

/// Per-millisecond velocity retention factor, in `(0, 1)`.
///
/// Higher rates coast further. [`DecelerationRate::NORMAL`] matches the
/// familiar scroll-view feel and is the default everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecelerationRate(f64);

impl DecelerationRate {
    /// Standard deceleration: long, comfortable coasting.
    pub const NORMAL: Self = Self(0.998);

    /// Aggressive deceleration: the projection stays close to the finger.
    pub const FAST: Self = Self(0.99);

    /// Build a rate, clamping into the supported `(0, 1)` band.
    pub fn new(rate: f64) -> Self {
        Self(rate.max(MIN_RATE).min(MAX_RATE))
    }

    /// The raw retention factor.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Closed form of the geometric decay series: `rate / (1 - rate)`.
    pub fn series_factor(self) -> f64 {
        self.0 / (1.0 - self.0)
    }
}

impl Default for DecelerationRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project a gesture's resting displacement from its current displacement
/// and release velocity.
///
/// `displacement` is in points, `velocity` in points per second. The
/// result is the total displacement after the velocity has fully decayed,
/// including the travel already made.
pub fn project(displacement: f64, velocity: f64, rate: DecelerationRate) -> f64 {
    displacement + velocity / MILLIS_PER_SECOND * rate.series_factor()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- series factor ----

    #[test]
    fn normal_rate_series_factor() {
        // 0.998 / 0.002 = 499.
        assert!((DecelerationRate::NORMAL.series_factor() - 499.0).abs() < 1e-9);
    }

    #[test]
    fn fast_rate_series_factor() {
        // 0.99 / 0.01 = 99.
        assert!((DecelerationRate::FAST.series_factor() - 99.0).abs() < 1e-9);
    }

    #[test]
    fn new_clamps_into_open_unit_band() {
        assert_eq!(DecelerationRate::new(0.0).value(), 0.001);
        assert_eq!(DecelerationRate::new(1.0).value(), 0.9999);
        assert_eq!(DecelerationRate::new(-5.0).value(), 0.001);
        assert_eq!(DecelerationRate::new(0.5).value(), 0.5);
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(DecelerationRate::default(), DecelerationRate::NORMAL);
    }

    // ---- projection ----

    #[test]
    fn zero_velocity_projects_in_place() {
        assert_eq!(project(-60.0, 0.0, DecelerationRate::NORMAL), -60.0);
        assert_eq!(project(123.45, 0.0, DecelerationRate::FAST), 123.45);
    }

    #[test]
    fn upward_flick_projects_upward() {
        // -60 + (-2000 / 1000) * 499 = -60 - 998 = -1058.
        let projected = project(-60.0, -2000.0, DecelerationRate::NORMAL);
        assert!((projected - -1058.0).abs() < 1e-9);
    }

    #[test]
    fn downward_flick_projects_downward() {
        // 40 + (2000 / 1000) * 499 = 40 + 998 = 1038.
        let projected = project(40.0, 2000.0, DecelerationRate::NORMAL);
        assert!((projected - 1038.0).abs() < 1e-9);
    }

    #[test]
    fn projection_is_monotonic_in_velocity() {
        let mut prev = f64::NEG_INFINITY;
        for v in [-3000.0, -500.0, 0.0, 250.0, 4000.0] {
            let p = project(10.0, v, DecelerationRate::NORMAL);
            assert!(p > prev);
            prev = p;
        }
    }

    #[test]
    fn faster_decay_projects_shorter() {
        let normal = project(0.0, 1000.0, DecelerationRate::NORMAL);
        let fast = project(0.0, 1000.0, DecelerationRate::FAST);
        assert!(fast < normal);
    }

    // ---- serde ----

    #[test]
    fn rate_serializes_transparently() {
        let json = serde_json::to_string(&DecelerationRate::NORMAL).unwrap();
        assert_eq!(json, "0.998");
        let back: DecelerationRate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DecelerationRate::NORMAL);
    }
}
