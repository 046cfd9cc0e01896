//! JSON shapes exchanged with the generation service.

use serde::{Deserialize, Serialize};

use super::models::GenerationRequest;

/// Request body. The service tells the variants apart by which keys are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestBody<'a> {
    Initial {
        mwp: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        formula: Option<&'a str>,
    },
    Resubmit {
        dsl: &'a str,
    },
}

impl<'a> From<&'a GenerationRequest> for RequestBody<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        match request {
            GenerationRequest::Initial { problem, formula } => RequestBody::Initial {
                mwp: problem,
                formula: formula.as_deref(),
            },
            GenerationRequest::Resubmit { description } => RequestBody::Resubmit { dsl: description },
        }
    }
}

/// Response body, read identically for every status code.
///
/// Every key is optional on the wire; the service sends `null` SVGs together
/// with a per-artifact error when one renderer fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResponseBody {
    pub visual_language: Option<String>,
    pub svg_formal: Option<String>,
    pub svg_intuitive: Option<String>,
    pub formal_error: Option<String>,
    pub intuitive_error: Option<String>,
    pub error: Option<String>,
}
