#![forbid(unsafe_code)]

//! # slidesheet-chrome: the sheet's on-screen dressing
//!
//! Everything visual that rides on a presentation fraction: the sheet
//! frame between its collapsed bar and its measured resting slice, the
//! dimming overlay behind it, and the header content that migrates as
//! the sheet opens. [`presenter::SheetPresenter`] ties the pieces to the
//! transition machinery in `slidesheet-core`.
//!
//! # Role in slidesheet
//!
//! - **Pure state**: every type here is plain data driven by `f64`
//!   fractions; no timers, no platform views.
//! - **Deterministic layout**: the same fraction always yields the same
//!   frames, offsets, and opacities.
//! - **One wiring point**: only [`presenter`] touches the core crate's
//!   controller; the rest is reusable geometry and chrome math.

pub mod content;
pub mod geom;
pub mod metrics;
pub mod overlay;
pub mod presenter;

pub use presenter::{SheetChrome, SheetPresenter};
