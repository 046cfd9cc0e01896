//! Application layer managing state and request workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it sequences requests to the generation service, propagates results into
//! the resubmission form, and exports rendered artifacts.

pub mod dispatch;
pub mod export;
pub mod orchestrator;
pub mod propagation;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::*;
pub use export::*;
pub use orchestrator::*;
pub use propagation::*;
pub use state::*;
