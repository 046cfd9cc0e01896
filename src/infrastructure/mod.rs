//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client for the generation service, the
//! file-backed download sink, clipboard access, configuration and logging.

pub mod clipboard;
pub mod config;
pub mod downloads;
pub mod http;
pub mod logging;

pub use clipboard::*;
pub use config::*;
pub use downloads::*;
pub use http::*;
pub use logging::*;
