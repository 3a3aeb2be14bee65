//! showreel - High Vision Showcase Library
//!
//! The stateful pieces of the High Vision marketing site as a terminal
//! application: an autoplay carousel with pause/resume accounting, a toast
//! notification service, a scripted reveal sequence and a story stepper.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
