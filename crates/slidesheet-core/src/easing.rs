#![forbid(unsafe_code)]

//! Easing curves and interpolation helpers for transition clocks.
//!
//! Curves map normalized time `t in [0, 1]` to normalized progress in
//! `[0, 1]`. Inputs outside the unit interval are clamped before the curve
//! is applied, so a curve never extrapolates past its endpoints.
//!
//! | Function      | Shape                            |
//! |---------------|----------------------------------|
//! | `linear`      | identity                         |
//! | `ease_in`     | quadratic, slow start            |
//! | `ease_out`    | quadratic, slow finish           |
//! | `ease_in_out` | quadratic on both ends           |
//!
//! # Invariants
//!
//! 1. `curve(0.0) == 0.0` and `curve(1.0) == 1.0` for every curve.
//! 2. Every curve is monotonically non-decreasing on `[0, 1]`.
//! 3. Outputs stay in `[0, 1]` for any finite input.

/// An easing curve: normalized time in, normalized progress out.
pub type EasingFn = fn(f64) -> f64;

// ---------------------------------------------------------------------------
// Curves
// ---------------------------------------------------------------------------

/// Identity curve.
pub fn linear(t: f64) -> f64 {
    clamp_unit(t)
}

/// Quadratic ease-in: slow start, full speed at the end.
pub fn ease_in(t: f64) -> f64 {
    let t = clamp_unit(t);
    t * t
}

/// Quadratic ease-out: full speed at the start, slow finish.
pub fn ease_out(t: f64) -> f64 {
    let t = clamp_unit(t);
    t * (2.0 - t)
}

/// Quadratic ease on both ends.
pub fn ease_in_out(t: f64) -> f64 {
    let t = clamp_unit(t);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 2.0 * t - 1.0;
        0.5 + u * (1.0 - 0.5 * u)
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Linear interpolation from `a` to `b` at parameter `t`.
///
/// Unclamped: callers that need `t` bounded clamp it first.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// min/max sanitize NaN to 0.0; f64::clamp would propagate it.
fn clamp_unit(t: f64) -> f64 {
    t.max(0.0).min(1.0)
}
