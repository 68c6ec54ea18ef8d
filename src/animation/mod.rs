//! Step-to-step animation support.
//!
//! The presentation layer animates between the geometry of consecutive
//! algorithm steps. This module models the timed visual phases as an
//! explicit state machine advanced by the caller, so nothing here depends on
//! a particular timer or event loop.

pub mod session;
pub mod transition;

pub use session::{Frame, LayoutSession, NodeFrame};
pub use transition::{Phase, Transition, TransitionTimings};
