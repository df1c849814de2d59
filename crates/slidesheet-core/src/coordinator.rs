#![forbid(unsafe_code)]

//! Transition vending and interaction exposure.
//!
//! [`TransitionCoordinator`] sits between the presentation layer and the
//! [`InteractiveTransitionController`]. It answers two questions the host
//! asks at transition time: which mode does this transition run in, and
//! is there an interaction to drive right now?
//!
//! Interactivity is fixed by the trigger at the moment the transition is
//! requested: a [`TransitionTrigger::Gesture`] request vends an
//! interactive transition, a [`TransitionTrigger::Discrete`] request a
//! clock-driven one. [`interaction_handle`] exposes the controller only
//! while a finger owns the transition; outside of that window there is
//! nothing to drive and it returns `None`.
//!
//! [`interaction_handle`]: TransitionCoordinator::interaction_handle

use crate::controller::{
    CompletedTransition, GestureEffect, InteractiveTransitionController, TransitionConfig,
    TransitionContext, TransitionRequester,
};
use crate::gesture::{Direction, GestureSample, TransitionError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// What set the transition off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTrigger {
    /// A programmatic call, like a button press.
    Discrete,
    /// A recognized pan gesture.
    Gesture,
}

/// A direction plus how it was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub direction: Direction,
    pub trigger: TransitionTrigger,
}

impl TransitionRequest {
    pub const fn discrete(direction: Direction) -> Self {
        Self {
            direction,
            trigger: TransitionTrigger::Discrete,
        }
    }

    pub const fn gesture(direction: Direction) -> Self {
        Self {
            direction,
            trigger: TransitionTrigger::Gesture,
        }
    }
}

/// How a vended transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Clock-driven from the first frame.
    Discrete,
    /// Finger-driven until released.
    Interactive,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Vends transitions on a shared controller and scopes access to the
/// interactive surface.
#[derive(Debug)]
pub struct TransitionCoordinator {
    controller: InteractiveTransitionController,
}

impl TransitionCoordinator {
    pub fn new(config: TransitionConfig, requester: Box<dyn TransitionRequester>) -> Self {
        Self {
            controller: InteractiveTransitionController::new(config, requester),
        }
    }

    /// Begin a transition in the mode the request's trigger implies.
    pub fn request(
        &mut self,
        request: TransitionRequest,
        context: TransitionContext,
    ) -> Result<TransitionMode, TransitionError> {
        let mode = match request.trigger {
            TransitionTrigger::Gesture => {
                self.controller.begin_interactive(request.direction, context)?;
                TransitionMode::Interactive
            }
            TransitionTrigger::Discrete => {
                self.controller.begin_discrete(request.direction, context)?;
                TransitionMode::Discrete
            }
        };
        debug!(
            direction = request.direction.as_str(),
            ?mode,
            "transition requested"
        );
        Ok(mode)
    }

    /// Forward a gesture sample to the controller.
    pub fn report_gesture(
        &mut self,
        sample: &GestureSample,
    ) -> Result<GestureEffect, TransitionError> {
        self.controller.report_gesture(sample)
    }

    /// Advance the active transition's clock.
    pub fn tick(&mut self, dt: Duration) -> Option<CompletedTransition> {
        self.controller.tick(dt)
    }

    /// Abandon any interaction and run the transition back to its origin.
    pub fn force_cancel(&mut self) -> bool {
        self.controller.force_cancel()
    }

    /// The controller, exposed for driving only while a finger owns the
    /// running transition.
    pub fn interaction_handle(&mut self) -> Option<&mut InteractiveTransitionController> {
        if self
            .controller
            .current_state()
            .is_some_and(|state| state.interactive)
        {
            Some(&mut self.controller)
        } else {
            None
        }
    }

    pub fn controller(&self) -> &InteractiveTransitionController {
        &self.controller
    }
}
