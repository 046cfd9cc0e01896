//! Domain layer: form inputs, requests, results and their rules.

pub mod models;
pub mod services;
pub mod errors;
pub mod text;
pub mod validation;
pub mod wire;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use text::*;
pub use validation::*;
pub use wire::*;
