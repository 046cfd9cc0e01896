use std::io;

use thiserror::Error;

use super::models::{Field, RequestId};

/// Field-scoped input rejection. Never reaches the request state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

/// Failures of a single call to the generation service.
///
/// The `Display` text is what the user sees in the error panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Invalid response from generation service: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("request {in_flight} is still in flight")]
    Busy { in_flight: RequestId },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not stage download: {0}")]
    Stage(#[source] io::Error),
    #[error("could not write {filename}: {source}")]
    Write {
        filename: String,
        #[source]
        source: io::Error,
    },
    #[error("download reference {0} is not staged")]
    UnknownReference(String),
    #[error("{0} visualization is not available")]
    Unavailable(&'static str),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
