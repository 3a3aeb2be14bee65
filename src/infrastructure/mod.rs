//! Infrastructure layer providing host services.
//!
//! This module contains the config file repository and the timer service
//! that the event loop uses to drive the state machines.

pub mod persistence;
pub mod timers;

pub use persistence::*;
pub use timers::*;
