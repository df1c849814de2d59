#![forbid(unsafe_code)]

//! The interruptible animation handle.
//!
//! An [`AnimationHandle`] drives one transition between two content
//! fractions. It has no thread, no timer: the host calls [`tick`] with a
//! frame delta and the handle advances its clock, applies the eased value
//! through its apply callback, and reports completion.
//!
//! The handle is interruptible at any moment. A running handle can be
//! paused, scrubbed to an arbitrary progress with [`update`], and then
//! released toward either endpoint with [`finish`] or [`cancel`]. A
//! release re-clocks the remaining distance: the time left is the full
//! duration scaled by how far the handle still has to travel, so a sheet
//! caught near its target snaps home quickly instead of replaying the
//! whole duration.
//!
//! # Invariants
//!
//! 1. `progress` stays in `[0, 1]` through every operation.
//! 2. The completion callback fires exactly once, always from the tick
//!    that resolves the handle, never from `update`/`finish`/`cancel`.
//! 3. A cancelled handle lands exactly on its origin endpoint and applies
//!    it before completing.
//! 4. A completed handle ignores every further operation.
//! 5. A zero-distance release resolves on the next tick, even `tick(0)`.
//!
//! [`tick`]: AnimationHandle::tick
//! [`update`]: AnimationHandle::update
//! [`finish`]: AnimationHandle::finish
//! [`cancel`]: AnimationHandle::cancel

use crate::easing::{EasingFn, lerp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

/// Applies a content fraction to whatever is being animated.
pub type ApplyFn = Box<dyn FnMut(f64)>;

/// Observes the handle resolving; `true` means the transition was
/// cancelled back to its origin.
pub type CompletionFn = Box<dyn FnOnce(bool)>;

// ---------------------------------------------------------------------------
// Clock state
// ---------------------------------------------------------------------------

/// Endpoint a released handle drives toward, in progress space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivePosition {
    /// Progress `1.0`: the transition's target endpoint.
    End,
    /// Progress `0.0`: back where the transition started.
    Start,
}

impl DrivePosition {
    pub const fn progress(self) -> f64 {
        match self {
            Self::End => 1.0,
            Self::Start => 0.0,
        }
    }

    /// Driving back to the start is what "cancelled" means here.
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Start)
    }
}

/// Where the handle's clock currently is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HandleState {
    /// Held still; progress moves only through `update`.
    Paused,
    /// Ticking from `origin` toward `toward` over `span`.
    Running {
        origin: f64,
        toward: DrivePosition,
        elapsed: Duration,
        span: Duration,
    },
    /// Resolved; the completion callback has fired.
    Complete { cancelled: bool },
}

/// How a handle resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion {
    /// Reached the target endpoint.
    Finished,
    /// Ran back to the origin endpoint.
    Cancelled,
}

impl Completion {
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// One transition between two content fractions, driven by host ticks.
///
/// `progress` is the normalized position along `from -> to`; the value
/// handed to the apply callback is `lerp(from, to, progress)`. Easing
/// shapes clocked motion only; scrubbing is linear.
pub struct AnimationHandle {
    from: f64,
    to: f64,
    duration: Duration,
    curve: EasingFn,
    progress: f64,
    state: HandleState,
    apply: ApplyFn,
    on_complete: Option<CompletionFn>,
}

impl AnimationHandle {
    /// Start a transition and immediately release it toward its target.
    ///
    /// The origin endpoint is applied synchronously before the clock
    /// starts, so the first frame is well defined.
    pub fn begin(
        from: f64,
        to: f64,
        duration: Duration,
        curve: EasingFn,
        apply: ApplyFn,
        on_complete: CompletionFn,
    ) -> Self {
        let mut handle = Self::begin_paused(from, to, duration, curve, apply, on_complete);
        handle.release(DrivePosition::End);
        handle
    }

    /// Start a transition held at its origin, waiting to be scrubbed.
    pub fn begin_paused(
        from: f64,
        to: f64,
        duration: Duration,
        curve: EasingFn,
        apply: ApplyFn,
        on_complete: CompletionFn,
    ) -> Self {
        let mut handle = Self {
            from,
            to,
            duration,
            curve,
            progress: 0.0,
            state: HandleState::Paused,
            apply,
            on_complete: Some(on_complete),
        };
        handle.emit();
        handle
    }

    /// Scrub to `fraction` of the way from origin to target and hold.
    ///
    /// The fraction is clamped into `[0, 1]`; NaN reads as `0.0`.
    pub fn update(&mut self, fraction: f64) {
        if self.is_complete() {
            return;
        }
        self.progress = fraction.max(0.0).min(1.0);
        self.state = HandleState::Paused;
        self.emit();
        trace!(progress = self.progress, "transition scrubbed");
    }

    /// Freeze a running clock at its current progress.
    pub fn pause(&mut self) {
        if matches!(self.state, HandleState::Running { .. }) {
            self.state = HandleState::Paused;
            debug!(progress = self.progress, "transition paused");
        }
    }

    /// Release toward the target endpoint.
    pub fn finish(&mut self) {
        self.release(DrivePosition::End);
    }

    /// Release back toward the origin endpoint.
    pub fn cancel(&mut self) {
        self.release(DrivePosition::Start);
    }

    fn release(&mut self, toward: DrivePosition) {
        if self.is_complete() {
            return;
        }
        let origin = self.progress;
        // Remaining time scales with remaining distance.
        let span = self.duration.mul_f64((toward.progress() - origin).abs());
        self.state = HandleState::Running {
            origin,
            toward,
            elapsed: Duration::ZERO,
            span,
        };
        debug!(origin, ?toward, "transition released to clock");
    }

    /// Advance the clock by `dt`. Returns the resolution when this tick
    /// finishes the transition.
    ///
    /// The resolving tick applies the exact endpoint value and then fires
    /// the completion callback.
    pub fn tick(&mut self, dt: Duration) -> Option<Completion> {
        let HandleState::Running {
            origin,
            toward,
            elapsed,
            span,
        } = self.state
        else {
            return None;
        };
        let elapsed = elapsed.saturating_add(dt);
        if elapsed >= span {
            // Endpoint reached; skip the curve so the landing is exact.
            let cancelled = toward.is_cancelled();
            self.progress = toward.progress();
            self.state = HandleState::Complete { cancelled };
            self.emit();
            if let Some(on_complete) = self.on_complete.take() {
                on_complete(cancelled);
            }
            return Some(if cancelled {
                Completion::Cancelled
            } else {
                Completion::Finished
            });
        }
        let t = elapsed.as_secs_f64() / span.as_secs_f64();
        self.progress = lerp(origin, toward.progress(), (self.curve)(t));
        self.state = HandleState::Running {
            origin,
            toward,
            elapsed,
            span,
        };
        self.emit();
        None
    }

    fn emit(&mut self) {
        let value = lerp(self.from, self.to, self.progress);
        (self.apply)(value);
    }

    /// Normalized position along origin -> target.
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Content fraction currently applied.
    pub fn value(&self) -> f64 {
        lerp(self.from, self.to, self.progress)
    }

    pub const fn state(&self) -> HandleState {
        self.state
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self.state, HandleState::Complete { .. })
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("progress", &self.progress)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::{ease_in, linear};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);
    const MS_400: Duration = Duration::from_millis(400);

    /// Records every applied value and each completion call.
    struct Probe {
        applied: Rc<RefCell<Vec<f64>>>,
        outcome: Rc<Cell<Option<bool>>>,
        completions: Rc<Cell<u32>>,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                applied: Rc::new(RefCell::new(Vec::new())),
                outcome: Rc::new(Cell::new(None)),
                completions: Rc::new(Cell::new(0)),
            }
        }

        fn apply_fn(&self) -> ApplyFn {
            let applied = Rc::clone(&self.applied);
            Box::new(move |value| applied.borrow_mut().push(value))
        }

        fn complete_fn(&self) -> CompletionFn {
            let outcome = Rc::clone(&self.outcome);
            let completions = Rc::clone(&self.completions);
            Box::new(move |cancelled| {
                outcome.set(Some(cancelled));
                completions.set(completions.get() + 1);
            })
        }

        fn last_applied(&self) -> f64 {
            *self
                .applied
                .borrow()
                .last()
                .expect("no value applied yet")
        }
    }

    fn opening(probe: &Probe, curve: EasingFn) -> AnimationHandle {
        AnimationHandle::begin(0.0, 1.0, MS_400, curve, probe.apply_fn(), probe.complete_fn())
    }

    // ---- discrete runs ----

    #[test]
    fn begin_applies_origin_before_first_tick() {
        let probe = Probe::new();
        let _handle = opening(&probe, ease_in);
        assert_eq!(probe.last_applied(), 0.0);
    }

    #[test]
    fn ease_in_checkpoint_at_half_time() {
        let probe = Probe::new();
        let mut handle = opening(&probe, ease_in);
        assert_eq!(handle.tick(MS_200), None);
        // ease_in(0.5) = 0.25.
        assert!((handle.progress() - 0.25).abs() < 1e-12);
        assert!((probe.last_applied() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn run_resolves_finished_at_duration() {
        let probe = Probe::new();
        let mut handle = opening(&probe, ease_in);
        assert_eq!(handle.tick(MS_200), None);
        assert_eq!(handle.tick(MS_200), Some(Completion::Finished));
        assert_eq!(probe.last_applied(), 1.0);
        assert_eq!(probe.outcome.get(), Some(false));
        assert!(handle.is_complete());
    }

    #[test]
    fn overshooting_tick_still_lands_exactly() {
        let probe = Probe::new();
        let mut handle = opening(&probe, ease_in);
        assert_eq!(handle.tick(Duration::from_secs(5)), Some(Completion::Finished));
        assert_eq!(probe.last_applied(), 1.0);
    }

    #[test]
    fn closing_run_lands_on_zero() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin(
            1.0,
            0.0,
            MS_400,
            ease_in,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        assert_eq!(probe.applied.borrow()[0], 1.0);
        assert_eq!(handle.tick(MS_400), Some(Completion::Finished));
        assert_eq!(probe.last_applied(), 0.0);
        assert_eq!(probe.outcome.get(), Some(false));
    }

    // ---- completion discipline ----

    #[test]
    fn completion_fires_exactly_once() {
        let probe = Probe::new();
        let mut handle = opening(&probe, ease_in);
        handle.tick(Duration::from_secs(1));
        assert_eq!(probe.completions.get(), 1);
        assert_eq!(handle.tick(MS_100), None);
        handle.finish();
        handle.cancel();
        handle.update(0.3);
        assert_eq!(handle.tick(MS_100), None);
        assert_eq!(probe.completions.get(), 1);
        assert_eq!(handle.progress(), 1.0);
    }

    #[test]
    fn completion_never_fires_from_release_calls() {
        let probe = Probe::new();
        let mut handle = opening(&probe, ease_in);
        handle.update(1.0);
        handle.finish();
        assert_eq!(probe.completions.get(), 0, "resolution waits for a tick");
        assert_eq!(handle.tick(Duration::ZERO), Some(Completion::Finished));
        assert_eq!(probe.completions.get(), 1);
    }

    // ---- cancellation ----

    #[test]
    fn cancel_runs_back_to_origin() {
        let probe = Probe::new();
        let mut handle = opening(&probe, ease_in);
        handle.tick(MS_200);
        handle.cancel();
        let resolution = handle.tick(Duration::from_secs(2));
        assert_eq!(resolution, Some(Completion::Cancelled));
        assert_eq!(probe.last_applied(), 0.0);
        assert_eq!(probe.outcome.get(), Some(true));
    }

    #[test]
    fn cancelled_closing_restores_presented_value() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin(
            1.0,
            0.0,
            MS_400,
            ease_in,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        handle.tick(MS_200);
        handle.cancel();
        handle.tick(Duration::from_secs(2));
        // Origin endpoint is content 1.0 for a closing transition.
        assert_eq!(probe.last_applied(), 1.0);
        assert_eq!(probe.outcome.get(), Some(true));
    }

    #[test]
    fn zero_distance_cancel_resolves_on_zero_tick() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin_paused(
            0.0,
            1.0,
            MS_400,
            ease_in,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        handle.cancel();
        assert_eq!(handle.tick(Duration::ZERO), Some(Completion::Cancelled));
        assert_eq!(probe.last_applied(), 0.0);
    }

    // ---- scrubbing ----

    #[test]
    fn update_is_linear_and_clamped() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin_paused(
            0.0,
            1.0,
            MS_400,
            ease_in,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        handle.update(0.3);
        assert_eq!(probe.last_applied(), 0.3);
        handle.update(7.0);
        assert_eq!(probe.last_applied(), 1.0);
        handle.update(-2.0);
        assert_eq!(probe.last_applied(), 0.0);
        handle.update(f64::NAN);
        assert_eq!(probe.last_applied(), 0.0);
        assert_eq!(probe.completions.get(), 0);
    }

    #[test]
    fn release_rescales_remaining_time() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin_paused(
            0.0,
            1.0,
            MS_400,
            ease_in,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        handle.update(0.5);
        handle.finish();
        // Half the distance remains: span is 200ms. At 100ms the clock is
        // halfway, ease_in(0.5) = 0.25, progress = 0.5 + 0.5 * 0.25.
        assert_eq!(handle.tick(MS_100), None);
        assert!((handle.progress() - 0.625).abs() < 1e-12);
        assert_eq!(handle.tick(MS_100), Some(Completion::Finished));
    }

    #[test]
    fn scrub_ignores_the_curve() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin_paused(
            0.0,
            1.0,
            MS_400,
            ease_in,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        handle.update(0.5);
        // A scrub to 0.5 applies 0.5, not ease_in(0.5).
        assert_eq!(probe.last_applied(), 0.5);
    }

    // ---- pausing ----

    #[test]
    fn pause_freezes_the_clock() {
        let probe = Probe::new();
        let mut handle = opening(&probe, linear);
        handle.tick(MS_100);
        let frozen = handle.progress();
        handle.pause();
        assert_eq!(handle.tick(Duration::from_secs(3)), None);
        assert_eq!(handle.progress(), frozen);
        assert_eq!(handle.state(), HandleState::Paused);
    }

    #[test]
    fn paused_handle_resumes_from_current_position() {
        let probe = Probe::new();
        let mut handle = opening(&probe, linear);
        handle.tick(MS_100);
        handle.pause();
        handle.finish();
        // 0.75 of the distance remains: span 300ms under a linear curve.
        handle.tick(Duration::from_millis(150));
        assert!((handle.progress() - 0.625).abs() < 1e-12);
    }

    // ---- state reporting ----

    #[test]
    fn state_walks_paused_running_complete() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin_paused(
            0.0,
            1.0,
            MS_400,
            linear,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        assert_eq!(handle.state(), HandleState::Paused);
        handle.finish();
        assert!(matches!(handle.state(), HandleState::Running { .. }));
        handle.tick(MS_400);
        assert_eq!(handle.state(), HandleState::Complete { cancelled: false });
    }

    #[test]
    fn value_tracks_content_space() {
        let probe = Probe::new();
        let mut handle = AnimationHandle::begin_paused(
            1.0,
            0.0,
            MS_400,
            linear,
            probe.apply_fn(),
            probe.complete_fn(),
        );
        handle.update(0.25);
        assert_eq!(handle.progress(), 0.25);
        assert_eq!(handle.value(), 0.75);
    }

    #[test]
    fn handle_state_serializes_tagged() {
        let json = serde_json::to_string(&HandleState::Paused).unwrap();
        assert_eq!(json, r#"{"state":"paused"}"#);
        let complete = serde_json::to_string(&HandleState::Complete { cancelled: true }).unwrap();
        assert_eq!(complete, r#"{"state":"complete","cancelled":true}"#);
    }

    #[test]
    fn debug_omits_callbacks() {
        let probe = Probe::new();
        let handle = opening(&probe, ease_in);
        let rendered = format!("{handle:?}");
        assert!(rendered.contains("AnimationHandle"));
        assert!(rendered.contains(".."));
    }
}
