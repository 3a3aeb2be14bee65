//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! maps keyboard and mouse input onto application operations, and renders
//! the showcase.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
