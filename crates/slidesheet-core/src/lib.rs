#![forbid(unsafe_code)]

//! Core: gesture tracking, velocity projection, and interruptible sheet
//! transitions.
//!
//! # Role in slidesheet
//! `slidesheet-core` is the state-machine layer. It owns the arithmetic
//! and lifecycle of a gesture-driven sheet transition; it knows nothing
//! about frames, views, or rendering.
//!
//! # Primary responsibilities
//! - **GestureTracker**: samples in, begin/scrub/release verdicts out.
//! - **Velocity projection**: where a flick would coast to, in closed form.
//! - **AnimationHandle**: a tick-driven, interruptible transition clock.
//! - **InteractiveTransitionController**: single-transition orchestration.
//! - **TransitionCoordinator**: mode vending and interaction exposure.
//!
//! # How it fits in the system
//! The presentation layer (`slidesheet-chrome`) implements
//! `TransitionRequester`, feeds gesture samples and frame deltas in, and
//! receives content fractions through its apply callbacks. Any other host
//! can do the same; the core has no UI dependencies.

pub mod animator;
pub mod controller;
pub mod coordinator;
pub mod easing;
pub mod gesture;
pub mod projection;
