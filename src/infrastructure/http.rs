//! HTTP client for the generation endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::domain::{
    interpret_response, GenerationRequest, GenerationResult, GenerationService, RequestBody,
    ServiceError, ServiceResult,
};

/// Posts requests as JSON to a single endpoint.
///
/// No timeout is configured and nothing is retried; a failed call is
/// reported once and the user decides whether to resubmit.
pub struct HttpGenerationService {
    client: Client,
    endpoint: String,
}

impl HttpGenerationService {
    pub fn new(endpoint: impl Into<String>) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl GenerationService for HttpGenerationService {
    fn generate(&self, request: &GenerationRequest) -> ServiceResult<GenerationResult> {
        let body = RequestBody::from(request);
        debug!(endpoint = %self.endpoint, kind = request.kind(), "POST generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        debug!(status, bytes = text.len(), "generation response received");

        interpret_response(status, &text)
    }
}
