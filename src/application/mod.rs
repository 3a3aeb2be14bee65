//! Application layer managing state and timing.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the state machines and the timer queue that drives them.

pub mod state;

pub use state::*;
