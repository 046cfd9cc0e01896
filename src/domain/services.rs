//! The generation service seam and response interpretation.
//!
//! The service itself is an external collaborator. This module fixes what
//! the client expects from it and how a raw HTTP status plus body is turned
//! into either a [`GenerationResult`] or a [`ServiceError`].

use super::errors::{ServiceError, ServiceResult};
use super::models::{ArtifactKind, GenerationRequest, GenerationResult, Rendering};
use super::wire::ResponseBody;

/// Message used when a failed response carries no usable `error` field.
pub const GENERIC_FAILURE: &str = "Unknown error";

/// Anything that can turn a request into a generation result.
///
/// Implementations block until the call finishes; callers that need a
/// responsive UI run them off the event-loop thread.
pub trait GenerationService: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> ServiceResult<GenerationResult>;
}

/// Interprets a response from the generation endpoint.
///
/// Non-2xx statuses fail with the body's `error` field verbatim, or
/// [`GENERIC_FAILURE`] when the body is not JSON or has no message. A 2xx
/// body must be JSON carrying `visual_language`; missing SVGs degrade to
/// [`Rendering::Unavailable`] instead of failing the whole call.
///
/// # Examples
///
/// ```
/// use math2visual::domain::interpret_response;
///
/// let err = interpret_response(500, r#"{"error": "bad formula"}"#).unwrap_err();
/// assert_eq!(err.to_string(), "bad formula");
///
/// let ok = interpret_response(
///     200,
///     r#"{"visual_language": "V", "svg_formal": "F", "svg_intuitive": "I"}"#,
/// )
/// .unwrap();
/// assert_eq!(ok.description, "V");
/// ```
pub fn interpret_response(status: u16, body: &str) -> ServiceResult<GenerationResult> {
    let parsed = serde_json::from_str::<ResponseBody>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(ServiceError::Rejected { status, message });
    }

    let body = parsed.map_err(|e| ServiceError::Decode(e.to_string()))?;
    into_result(body)
}

fn into_result(body: ResponseBody) -> ServiceResult<GenerationResult> {
    let description = body
        .visual_language
        .ok_or_else(|| ServiceError::Decode("missing `visual_language`".to_string()))?;

    Ok(GenerationResult {
        description,
        formal: rendering(ArtifactKind::Formal, body.svg_formal, body.formal_error),
        intuitive: rendering(
            ArtifactKind::Intuitive,
            body.svg_intuitive,
            body.intuitive_error,
        ),
    })
}

fn rendering(kind: ArtifactKind, svg: Option<String>, error: Option<String>) -> Rendering {
    match svg {
        Some(markup) if !markup.trim().is_empty() => Rendering::Svg(markup),
        _ => Rendering::Unavailable(error.unwrap_or_else(|| kind.fallback_error().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_populates_all_fields() {
        let result = interpret_response(
            200,
            r#"{"visual_language": "V", "svg_formal": "F", "svg_intuitive": "I"}"#,
        )
        .unwrap();
        assert_eq!(result, GenerationResult::new("V", "F", "I"));
    }

    #[test]
    fn test_server_error_surfaces_message_verbatim() {
        let err = interpret_response(500, r#"{"error": "bad formula"}"#).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Rejected {
                status: 500,
                message: "bad formula".to_string()
            }
        );
        assert_eq!(err.to_string(), "bad formula");
    }

    #[test]
    fn test_error_status_without_message_is_generic() {
        let err = interpret_response(400, r#"{"visual_language": "V"}"#).unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);

        let err = interpret_response(400, r#"{"error": ""}"#).unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn test_error_status_with_html_body_is_generic() {
        let err = interpret_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn test_success_with_non_json_body_is_decode_error() {
        let err = interpret_response(200, "not json").unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(err.to_string().starts_with("Invalid response"));
    }

    #[test]
    fn test_success_without_description_is_decode_error() {
        let err = interpret_response(200, r#"{"svg_formal": "F"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(ref m) if m.contains("visual_language")));
    }

    #[test]
    fn test_partial_render_keeps_per_artifact_error() {
        let result = interpret_response(
            200,
            r#"{
                "visual_language": "V",
                "svg_formal": "F",
                "svg_intuitive": null,
                "formal_error": null,
                "intuitive_error": "Could not generate intuitive visualization."
            }"#,
        )
        .unwrap();
        assert_eq!(result.formal.svg(), Some("F"));
        assert_eq!(
            result.intuitive,
            Rendering::Unavailable("Could not generate intuitive visualization.".to_string())
        );
    }

    #[test]
    fn test_missing_svg_without_reason_uses_fallback() {
        let result = interpret_response(201, r#"{"visual_language": "V", "svg_intuitive": "I"}"#)
            .unwrap();
        assert_eq!(
            result.formal,
            Rendering::Unavailable(ArtifactKind::Formal.fallback_error().to_string())
        );
        assert_eq!(result.intuitive.svg(), Some("I"));
    }
}
