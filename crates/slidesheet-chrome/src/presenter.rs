#![forbid(unsafe_code)]

//! The sheet presenter: chrome wired to the transition core.
//!
//! [`SheetChrome`] is the pure presentation state — frames, overlay,
//! header content — updated from content fractions. [`SheetPresenter`]
//! owns a chrome behind `Rc<RefCell<..>>`, shares it with the transition
//! callbacks, and exposes the whole lifecycle as four calls: [`show`],
//! [`close`], [`pan`], and [`tick`].
//!
//! The sheet never leaves the screen entirely. At fraction `0.0` it rests
//! as a collapsed grabber bar hugging the container's bottom edge; at
//! `1.0` it fills the bottom slice its measured metrics ask for. Every
//! frame in between is a straight interpolation of the two.
//!
//! # Invariants
//!
//! 1. The sheet frame's bottom edge stays pinned to the container's
//!    bottom edge at every fraction.
//! 2. Chrome is only prepared for a transition that actually starts;
//!    rejected requests leave it untouched.
//! 3. The overlay outlives a cancelled dismissal and dies with a
//!    cancelled presentation.
//!
//! [`show`]: SheetPresenter::show
//! [`close`]: SheetPresenter::close
//! [`pan`]: SheetPresenter::pan
//! [`tick`]: SheetPresenter::tick

use crate::content::HeaderContent;
use crate::geom::Rect;
use crate::metrics::PanelMetrics;
use crate::overlay::DimmingOverlay;
use serde::{Deserialize, Serialize};
use slidesheet_core::controller::{
    CompletedTransition, GestureEffect, TransitionConfig, TransitionContext, TransitionRequester,
};
use slidesheet_core::coordinator::{TransitionCoordinator, TransitionRequest};
use slidesheet_core::gesture::{Direction, GestureSample, TransitionError};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

/// Everything on screen that moves with the presentation fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetChrome {
    container: Rect,
    overlay: DimmingOverlay,
    header: HeaderContent,
    frame: Rect,
    fraction: f64,
    collapsed: Rect,
    resting: Rect,
    last_outcome: Option<CompletedTransition>,
}

impl SheetChrome {
    /// Chrome at rest in `container`: a collapsed bar, no dim.
    pub fn new(container: Rect) -> Self {
        let header = HeaderContent::default();
        let collapsed = container.bottom_slice(header.bar().height);
        Self {
            container,
            overlay: DimmingOverlay::default(),
            header,
            frame: collapsed,
            fraction: 0.0,
            collapsed,
            resting: collapsed,
            last_outcome: None,
        }
    }

    /// Fix both endpoint frames for an incoming transition and stage the
    /// direction-specific chrome.
    pub fn begin(&mut self, direction: Direction, extent: f64) {
        self.resting = self.container.bottom_slice(extent);
        self.collapsed = self
            .container
            .bottom_slice(self.header.bar().height.min(extent));
        if direction == Direction::Opening {
            self.overlay.presentation_began();
            self.header.prepare();
        }
        debug!(direction = direction.as_str(), extent, "sheet chrome staged");
    }

    /// Lay the chrome out for a content fraction.
    pub fn apply_fraction(&mut self, fraction: f64) {
        self.frame = self.collapsed.lerp(&self.resting, fraction);
        self.overlay.sync(fraction);
        self.header.adjust(fraction);
        self.fraction = fraction;
    }

    /// A transition resolved; settle the overlay and record the outcome.
    pub fn complete(&mut self, direction: Direction, cancelled: bool) {
        match direction {
            Direction::Opening => self.overlay.presentation_ended(!cancelled),
            Direction::Closing => self.overlay.dismissal_ended(!cancelled),
        }
        self.last_outcome = Some(CompletedTransition {
            direction,
            cancelled,
        });
    }

    pub const fn frame(&self) -> Rect {
        self.frame
    }

    pub const fn fraction(&self) -> f64 {
        self.fraction
    }

    pub const fn overlay(&self) -> DimmingOverlay {
        self.overlay
    }

    pub const fn header(&self) -> HeaderContent {
        self.header
    }

    pub const fn container(&self) -> Rect {
        self.container
    }

    pub const fn collapsed_frame(&self) -> Rect {
        self.collapsed
    }

    pub const fn resting_frame(&self) -> Rect {
        self.resting
    }

    pub const fn last_outcome(&self) -> Option<CompletedTransition> {
        self.last_outcome
    }
}

// ---------------------------------------------------------------------------
// Requester wiring
// ---------------------------------------------------------------------------

struct ChromeRequester {
    chrome: Rc<RefCell<SheetChrome>>,
    metrics: Rc<RefCell<PanelMetrics>>,
}

impl TransitionRequester for ChromeRequester {
    fn prepare(&mut self, direction: Direction) -> TransitionContext {
        build_context(&self.chrome, &self.metrics, direction)
    }
}

/// Stage the chrome and package it into a transition context.
///
/// An unusable extent skips the staging; the controller will reject the
/// context and the chrome must not be left half-prepared.
fn build_context(
    chrome: &Rc<RefCell<SheetChrome>>,
    metrics: &Rc<RefCell<PanelMetrics>>,
    direction: Direction,
) -> TransitionContext {
    let extent = metrics.borrow().preferred_extent();
    if extent.is_finite() && extent > 0.0 {
        chrome.borrow_mut().begin(direction, extent);
    }
    let apply_chrome = Rc::clone(chrome);
    let complete_chrome = Rc::clone(chrome);
    TransitionContext {
        extent,
        apply: Box::new(move |fraction| apply_chrome.borrow_mut().apply_fraction(fraction)),
        on_complete: Box::new(move |cancelled| {
            complete_chrome.borrow_mut().complete(direction, cancelled);
        }),
    }
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Owns the chrome and the transition stack for one sheet.
#[derive(Debug)]
pub struct SheetPresenter {
    coordinator: TransitionCoordinator,
    chrome: Rc<RefCell<SheetChrome>>,
    metrics: Rc<RefCell<PanelMetrics>>,
}

impl SheetPresenter {
    /// A presenter over `container` with default panel metrics.
    pub fn new(container: Rect, config: TransitionConfig) -> Self {
        Self::with_metrics(container, config, PanelMetrics::default())
    }

    pub fn with_metrics(container: Rect, config: TransitionConfig, metrics: PanelMetrics) -> Self {
        let chrome = Rc::new(RefCell::new(SheetChrome::new(container)));
        let metrics = Rc::new(RefCell::new(metrics));
        let requester = ChromeRequester {
            chrome: Rc::clone(&chrome),
            metrics: Rc::clone(&metrics),
        };
        Self {
            coordinator: TransitionCoordinator::new(config, Box::new(requester)),
            chrome,
            metrics,
        }
    }

    /// Present the sheet from a programmatic trigger.
    pub fn show(&mut self) -> Result<(), TransitionError> {
        self.request(Direction::Opening)
    }

    /// Dismiss the sheet from a programmatic trigger.
    pub fn close(&mut self) -> Result<(), TransitionError> {
        self.request(Direction::Closing)
    }

    fn request(&mut self, direction: Direction) -> Result<(), TransitionError> {
        // Bail before staging any chrome; a rejected request must leave
        // the screen exactly as it was.
        if let Some(state) = self.coordinator.controller().current_state() {
            return Err(TransitionError::AlreadyActive {
                direction: state.direction,
            });
        }
        let context = build_context(&self.chrome, &self.metrics, direction);
        self.coordinator
            .request(TransitionRequest::discrete(direction), context)?;
        Ok(())
    }

    /// Feed one pan recognizer sample through the stack.
    pub fn pan(&mut self, sample: &GestureSample) -> Result<GestureEffect, TransitionError> {
        self.coordinator.report_gesture(sample)
    }

    /// Advance the running transition by one frame delta.
    pub fn tick(&mut self, dt: Duration) -> Option<CompletedTransition> {
        self.coordinator.tick(dt)
    }

    /// Record a measured row extent; the next presentation sizes to it.
    pub fn record_row_extent(&mut self, row: usize, extent: f64) -> bool {
        self.metrics.borrow_mut().record_row_extent(row, extent)
    }

    /// Snapshot of the current chrome.
    pub fn chrome(&self) -> SheetChrome {
        self.chrome.borrow().clone()
    }

    pub fn preferred_extent(&self) -> f64 {
        self.metrics.borrow().preferred_extent()
    }

    pub fn is_active(&self) -> bool {
        self.coordinator.controller().is_active()
    }
}
