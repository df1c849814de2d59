#![forbid(unsafe_code)]

//! The interactive transition controller.
//!
//! [`InteractiveTransitionController`] owns the lifecycle of one sheet:
//! at most one transition runs at a time, discrete (clock-driven from the
//! start) or interactive (finger-driven until released). Gesture samples
//! go through [`report_gesture`]; frame deltas go through [`tick`]; the
//! animation handle does the rest.
//!
//! A fresh `Began` sample starts an interactive transition by asking the
//! [`TransitionRequester`] for a [`TransitionContext`]. A `Began` that
//! arrives while a transition is already running seizes it instead: the
//! clock pauses where it is and the finger takes over. That is the whole
//! interruption story.
//!
//! # Invariants
//!
//! 1. At most one transition is active; starting another fails with
//!    [`TransitionError::AlreadyActive`].
//! 2. The requester is consulted only when a gesture starts a fresh
//!    transition, never when one is seized.
//! 3. Samples with no transition to act on are reported as ignored, not
//!    errors.
//! 4. Completion is observable exactly once, from the resolving [`tick`].
//!
//! # Failure Modes
//!
//! 1. [`TransitionError::InvalidGeometry`]: the context's extent cannot
//!    normalize translations; nothing is mutated.
//! 2. [`TransitionError::AlreadyActive`]: rejected begin; the running
//!    transition is untouched.
//!
//! [`report_gesture`]: InteractiveTransitionController::report_gesture
//! [`tick`]: InteractiveTransitionController::tick

use crate::animator::{AnimationHandle, ApplyFn, CompletionFn};
use crate::easing::{EasingFn, ease_in};
use crate::gesture::{
    Direction, GesturePhase, GestureSample, GestureTracker, GestureVerdict, TransitionDecision,
    TransitionError,
};
use crate::projection::DecelerationRate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables shared by every transition the controller runs.
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    /// Full-distance clock time.
    pub duration: Duration,
    /// Curve shaping clocked motion.
    pub curve: EasingFn,
    /// Decay model for release projection.
    pub deceleration: DecelerationRate,
    /// Projected fraction a release must strictly exceed to finish.
    pub commit_threshold: f64,
}

impl TransitionConfig {
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_curve(mut self, curve: EasingFn) -> Self {
        self.curve = curve;
        self
    }

    #[must_use]
    pub fn with_deceleration(mut self, deceleration: DecelerationRate) -> Self {
        self.deceleration = deceleration;
        self
    }

    /// Threshold is clamped into `[0, 1]`.
    #[must_use]
    pub fn with_commit_threshold(mut self, threshold: f64) -> Self {
        self.commit_threshold = threshold.max(0.0).min(1.0);
        self
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(400),
            curve: ease_in,
            deceleration: DecelerationRate::NORMAL,
            commit_threshold: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Observable state
// ---------------------------------------------------------------------------

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerPhase {
    /// No transition; the sheet rests at an endpoint.
    Idle,
    /// A transition is running on the clock.
    RunningDiscrete,
    /// A transition is pinned to a finger.
    RunningInteractive,
}

/// Snapshot of the active transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    pub direction: Direction,
    /// Normalized position along origin -> target.
    pub progress: f64,
    pub interactive: bool,
}

/// Why a gesture sample had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Nothing is running and the sample was not a `Began`.
    NoActiveTransition,
    /// A transition is running but no finger owns it.
    NotInteractive,
}

/// What one reported sample did to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GestureEffect {
    /// A fresh interactive transition began.
    Started { direction: Direction },
    /// A running transition was seized; it paused at `progress`.
    Attached { progress: f64 },
    /// The transition moved to `fraction`.
    Scrubbed { fraction: f64 },
    /// The finger let go; the clock now drives per `decision`.
    Released {
        decision: TransitionDecision,
        fraction: f64,
    },
    /// The sample did nothing.
    Ignored { reason: IgnoreReason },
}

/// A transition that ran to resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedTransition {
    pub direction: Direction,
    /// `true` when it ran back to its origin endpoint.
    pub cancelled: bool,
}

// ---------------------------------------------------------------------------
// Requester seam
// ---------------------------------------------------------------------------

/// Everything the controller needs to run one transition.
pub struct TransitionContext {
    /// Reference extent normalizing gesture translations, in points.
    pub extent: f64,
    /// Receives each content fraction as it is applied.
    pub apply: ApplyFn,
    /// Observes resolution; `true` means cancelled.
    pub on_complete: CompletionFn,
}

impl fmt::Debug for TransitionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionContext")
            .field("extent", &self.extent)
            .finish_non_exhaustive()
    }
}

/// Supplies transition contexts when a gesture starts a transition on its
/// own. The presentation layer implements this; it is the hook where the
/// sheet is actually put on screen before the first frame runs.
pub trait TransitionRequester {
    fn prepare(&mut self, direction: Direction) -> TransitionContext;
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

struct ActiveTransition {
    direction: Direction,
    extent: f64,
    interactive: bool,
    handle: AnimationHandle,
}

impl fmt::Debug for ActiveTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveTransition")
            .field("direction", &self.direction)
            .field("extent", &self.extent)
            .field("interactive", &self.interactive)
            .field("handle", &self.handle)
            .finish()
    }
}

/// Single-transition orchestrator: gesture samples in, applied fractions
/// and completions out.
pub struct InteractiveTransitionController {
    config: TransitionConfig,
    tracker: GestureTracker,
    requester: Box<dyn TransitionRequester>,
    active: Option<ActiveTransition>,
}

impl InteractiveTransitionController {
    pub fn new(config: TransitionConfig, requester: Box<dyn TransitionRequester>) -> Self {
        Self {
            tracker: GestureTracker::new(config.deceleration, config.commit_threshold),
            config,
            requester,
            active: None,
        }
    }

    /// Start a clock-driven transition.
    pub fn begin_discrete(
        &mut self,
        direction: Direction,
        context: TransitionContext,
    ) -> Result<(), TransitionError> {
        self.begin_transition(direction, context, false)
    }

    /// Start a finger-driven transition, held at its origin until scrubbed.
    pub fn begin_interactive(
        &mut self,
        direction: Direction,
        context: TransitionContext,
    ) -> Result<(), TransitionError> {
        self.begin_transition(direction, context, true)
    }

    fn begin_transition(
        &mut self,
        direction: Direction,
        context: TransitionContext,
        interactive: bool,
    ) -> Result<(), TransitionError> {
        if let Some(active) = &self.active {
            return Err(TransitionError::AlreadyActive {
                direction: active.direction,
            });
        }
        let TransitionContext {
            extent,
            apply,
            on_complete,
        } = context;
        if !extent.is_finite() || extent <= 0.0 {
            return Err(TransitionError::InvalidGeometry { extent });
        }
        let from = direction.origin_fraction();
        let to = direction.target_fraction();
        let handle = if interactive {
            AnimationHandle::begin_paused(
                from,
                to,
                self.config.duration,
                self.config.curve,
                apply,
                on_complete,
            )
        } else {
            AnimationHandle::begin(
                from,
                to,
                self.config.duration,
                self.config.curve,
                apply,
                on_complete,
            )
        };
        self.active = Some(ActiveTransition {
            direction,
            extent,
            interactive,
            handle,
        });
        debug!(
            direction = direction.as_str(),
            extent, interactive, "transition began"
        );
        Ok(())
    }

    /// Feed one gesture sample through the tracker and into the active
    /// transition.
    ///
    /// A `Began` with nothing active asks the requester to prepare a
    /// fresh transition in the direction the sample's source implies. A
    /// `Began` with a transition active seizes it instead, pausing the
    /// clock in place.
    pub fn report_gesture(
        &mut self,
        sample: &GestureSample,
    ) -> Result<GestureEffect, TransitionError> {
        let Some(active) = self.active.as_mut() else {
            if sample.phase == GesturePhase::Began {
                let direction = sample.source.direction();
                let context = self.requester.prepare(direction);
                self.begin_interactive(direction, context)?;
                return Ok(GestureEffect::Started { direction });
            }
            trace!(phase = ?sample.phase, "gesture ignored; nothing active");
            return Ok(GestureEffect::Ignored {
                reason: IgnoreReason::NoActiveTransition,
            });
        };
        let effect = match self.tracker.track(sample, active.direction, active.extent)? {
            GestureVerdict::Begin => {
                active.handle.pause();
                active.interactive = true;
                let progress = active.handle.progress();
                debug!(progress, "transition seized by gesture");
                GestureEffect::Attached { progress }
            }
            GestureVerdict::Scrub { fraction } => {
                if active.interactive {
                    active.handle.update(fraction);
                    GestureEffect::Scrubbed { fraction }
                } else {
                    trace!(fraction, "scrub ignored; no finger owns the transition");
                    GestureEffect::Ignored {
                        reason: IgnoreReason::NotInteractive,
                    }
                }
            }
            GestureVerdict::Release { decision, fraction } => {
                if active.interactive {
                    if !sample.phase.is_terminal() {
                        warn!(phase = ?sample.phase, "release from a non-driving phase");
                    }
                    match decision {
                        TransitionDecision::Finish => active.handle.finish(),
                        TransitionDecision::Cancel => active.handle.cancel(),
                    }
                    active.interactive = false;
                    debug!(?decision, fraction, "gesture released");
                    GestureEffect::Released { decision, fraction }
                } else {
                    GestureEffect::Ignored {
                        reason: IgnoreReason::NotInteractive,
                    }
                }
            }
        };
        Ok(effect)
    }

    /// Advance the active transition's clock. Returns the completed
    /// transition on the tick that resolves it; the controller is idle
    /// again afterwards.
    pub fn tick(&mut self, dt: Duration) -> Option<CompletedTransition> {
        let active = self.active.as_mut()?;
        let completion = active.handle.tick(dt)?;
        let completed = CompletedTransition {
            direction: active.direction,
            cancelled: completion.is_cancelled(),
        };
        self.active = None;
        debug!(
            direction = completed.direction.as_str(),
            cancelled = completed.cancelled,
            "transition completed"
        );
        Some(completed)
    }

    /// Abandon the finger and run the active transition back to its
    /// origin. Returns whether anything was running.
    pub fn force_cancel(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.handle.cancel();
                active.interactive = false;
                warn!(
                    direction = active.direction.as_str(),
                    "transition force-cancelled"
                );
                true
            }
            None => false,
        }
    }

    pub fn phase(&self) -> ControllerPhase {
        match &self.active {
            None => ControllerPhase::Idle,
            Some(active) if active.interactive => ControllerPhase::RunningInteractive,
            Some(_) => ControllerPhase::RunningDiscrete,
        }
    }

    /// Snapshot of the running transition, if any.
    pub fn current_state(&self) -> Option<TransitionState> {
        self.active.as_ref().map(|active| TransitionState {
            direction: active.direction,
            progress: active.handle.progress(),
            interactive: active.interactive,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub const fn config(&self) -> TransitionConfig {
        self.config
    }
}

impl fmt::Debug for InteractiveTransitionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveTransitionController")
            .field("config", &self.config)
            .field("tracker", &self.tracker)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
