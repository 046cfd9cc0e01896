//! Presentation layer handling terminal UI and user input.
//!
//! This module renders both forms, the error panel and the two artifact
//! panels with ratatui, and maps crossterm key events onto `App` actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
