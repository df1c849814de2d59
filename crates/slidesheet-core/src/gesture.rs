#![forbid(unsafe_code)]

//! Gesture vocabulary and the release tracker.
//!
//! A host feeds [`GestureSample`]s — source, phase, vertical translation,
//! vertical velocity — into [`GestureTracker::track`], which turns each
//! sample into a [`GestureVerdict`]: begin a transition, scrub it to a
//! fraction, or release it with a finish/cancel decision.
//!
//! All fractions are presentation fractions: `0.0` fully hidden, `1.0`
//! fully presented, whichever direction is running. Translations follow
//! screen convention: negative is upward, positive is downward.
//!
//! # Invariants
//!
//! 1. Tracked fractions are always in `[0, 1]`, for any sample values
//!    including NaN and infinities.
//! 2. Movement against the transition's direction reads as fraction `0.0`,
//!    never negative.
//! 3. A release finishes only when its projected fraction is strictly
//!    above the commit threshold; landing exactly on it cancels.
//! 4. A sample in a phase the tracker does not recognize as driving
//!    releases with a cancel, so the sheet never wedges mid-flight.
//!
//! # Failure Modes
//!
//! 1. [`TransitionError::InvalidGeometry`]: the reference extent is not a
//!    positive finite number, so fractions cannot be formed.
//! 2. [`TransitionError::AlreadyActive`]: a new transition was requested
//!    while one is still running (reported by the controller layer).

use crate::projection::{DecelerationRate, project};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Direction and phases
// ---------------------------------------------------------------------------

/// Which way a transition moves the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Sheet slides up into view.
    Opening,
    /// Sheet slides down out of view.
    Closing,
}

impl Direction {
    /// Presentation fraction the transition drives toward.
    pub const fn target_fraction(self) -> f64 {
        match self {
            Self::Opening => 1.0,
            Self::Closing => 0.0,
        }
    }

    /// Presentation fraction the transition starts from.
    pub const fn origin_fraction(self) -> f64 {
        match self {
            Self::Opening => 0.0,
            Self::Closing => 1.0,
        }
    }

    /// Lowercase name for log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Closing => "closing",
        }
    }
}

/// Recognizer phase attached to each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Recognizer is still deciding; not a driving phase.
    Possible,
    /// Touch recognized, gesture starts.
    Began,
    /// Touch moved.
    Changed,
    /// Touch lifted normally.
    Ended,
    /// Recognition was cut short by the system.
    Cancelled,
    /// Recognizer gave up on the touch.
    Failed,
}

impl GesturePhase {
    /// Whether this phase ends the gesture.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// Which surface the touch landed on. The source fixes the transition
/// direction a fresh gesture may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureSource {
    /// Collapsed grabber bar at the container's bottom edge; drags open.
    Grabber,
    /// The presented sheet itself; drags closed.
    Sheet,
}

impl GestureSource {
    /// Direction a gesture starting on this surface runs.
    pub const fn direction(self) -> Direction {
        match self {
            Self::Grabber => Direction::Opening,
            Self::Sheet => Direction::Closing,
        }
    }
}

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// One pan recognizer update.
///
/// `translation` is cumulative vertical travel since the gesture began, in
/// points; `velocity` is instantaneous vertical speed in points per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub source: GestureSource,
    pub phase: GesturePhase,
    pub translation: f64,
    pub velocity: f64,
}

impl GestureSample {
    /// A fresh touch on `source`, with no travel yet.
    pub const fn began(source: GestureSource) -> Self {
        Self {
            source,
            phase: GesturePhase::Began,
            translation: 0.0,
            velocity: 0.0,
        }
    }

    /// A movement update.
    pub const fn changed(source: GestureSource, translation: f64, velocity: f64) -> Self {
        Self {
            source,
            phase: GesturePhase::Changed,
            translation,
            velocity,
        }
    }

    /// A normal lift-off.
    pub const fn ended(source: GestureSource, translation: f64, velocity: f64) -> Self {
        Self {
            source,
            phase: GesturePhase::Ended,
            translation,
            velocity,
        }
    }

    /// A system interruption mid-gesture.
    pub const fn cancelled(source: GestureSource, translation: f64, velocity: f64) -> Self {
        Self {
            source,
            phase: GesturePhase::Cancelled,
            translation,
            velocity,
        }
    }
}

// ---------------------------------------------------------------------------
// Verdicts and errors
// ---------------------------------------------------------------------------

/// What a released transition should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDecision {
    /// Run on to the target endpoint.
    Finish,
    /// Run back to the origin endpoint.
    Cancel,
}

/// What one sample means for the running transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GestureVerdict {
    /// Start (or seize) an interactive transition.
    Begin,
    /// Hold the transition at `fraction`.
    Scrub { fraction: f64 },
    /// Let go: hand the transition to the clock with a decision.
    Release {
        decision: TransitionDecision,
        fraction: f64,
    },
}

/// Errors surfaced when starting or driving a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionError {
    /// The reference extent used to normalize translations is unusable.
    InvalidGeometry { extent: f64 },
    /// A transition is already running; finish or cancel it first.
    AlreadyActive { direction: Direction },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { extent } => {
                write!(f, "invalid reference extent {extent} (must be finite and > 0)")
            }
            Self::AlreadyActive { direction } => {
                write!(f, "transition already active ({})", direction.as_str())
            }
        }
    }
}

impl std::error::Error for TransitionError {}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Pure sample-to-verdict translator.
///
/// Holds no gesture state: each verdict is a function of one sample, the
/// running direction, and the reference extent. The controller owns the
/// lifecycle; the tracker owns the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTracker {
    deceleration: DecelerationRate,
    commit_threshold: f64,
}

impl GestureTracker {
    /// Build a tracker. The threshold is clamped into `[0, 1]`.
    pub fn new(deceleration: DecelerationRate, commit_threshold: f64) -> Self {
        Self {
            deceleration,
            commit_threshold: commit_threshold.max(0.0).min(1.0),
        }
    }

    pub const fn deceleration(self) -> DecelerationRate {
        self.deceleration
    }

    pub const fn commit_threshold(self) -> f64 {
        self.commit_threshold
    }

    /// Translate one sample into a verdict for a transition running in
    /// `direction`, normalizing travel against `extent`.
    ///
    /// Release fractions are computed from the projected resting
    /// displacement, so a flick can commit a transition the finger only
    /// started.
    pub fn track(
        &self,
        sample: &GestureSample,
        direction: Direction,
        extent: f64,
    ) -> Result<GestureVerdict, TransitionError> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(TransitionError::InvalidGeometry { extent });
        }
        let verdict = match sample.phase {
            GesturePhase::Began => GestureVerdict::Begin,
            GesturePhase::Changed => GestureVerdict::Scrub {
                fraction: fraction_for(direction, sample.translation / extent),
            },
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                let projected = project(sample.translation, sample.velocity, self.deceleration);
                let fraction = fraction_for(direction, projected / extent);
                let decision = if fraction > self.commit_threshold {
                    TransitionDecision::Finish
                } else {
                    TransitionDecision::Cancel
                };
                GestureVerdict::Release { decision, fraction }
            }
            // Not a driving phase: release defensively rather than wedge.
            GesturePhase::Possible => GestureVerdict::Release {
                decision: TransitionDecision::Cancel,
                fraction: 0.0,
            },
        };
        Ok(verdict)
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DecelerationRate::NORMAL, 0.5)
    }
}

/// Map normalized movement to a presentation fraction.
///
/// Opening reads upward (negative) movement; closing reads downward
/// (positive) movement. Movement the wrong way clamps to zero. min/max
/// are used instead of `clamp` so NaN movement also reads as zero.
fn fraction_for(direction: Direction, movement: f64) -> f64 {
    match direction {
        Direction::Opening => movement.min(0.0).abs().min(1.0),
        Direction::Closing => movement.max(0.0).min(1.0),
    }
}
