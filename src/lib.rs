//! Math2Visual - Terminal Client
//!
//! Submits math word problems (or edited visual-language descriptions) to a
//! generation service and shows the formal and intuitive SVG renderings it
//! returns.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
