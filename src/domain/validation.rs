//! Input checks that gate every submission.
//!
//! A passing form is turned straight into the [`GenerationRequest`] it
//! submits, so the orchestrator never sees unvalidated input.

use super::errors::ValidationError;
use super::models::{DescriptionInput, Field, GenerationRequest, ProblemInput};

pub const PROBLEM_REQUIRED: &str = "Please enter a math word problem";
pub const DESCRIPTION_REQUIRED: &str = "Visual language cannot be empty";

/// Validates the initial form.
///
/// `problem` must contain a non-whitespace character. `formula` is never
/// rejected; a blank formula is simply left out of the request.
///
/// # Examples
///
/// ```
/// use math2visual::domain::{validate_problem, GenerationRequest, ProblemInput};
///
/// let request = validate_problem(&ProblemInput::new("9 + 7 = 16 apples", "")).unwrap();
/// assert_eq!(
///     request,
///     GenerationRequest::Initial { problem: "9 + 7 = 16 apples".into(), formula: None }
/// );
/// assert!(validate_problem(&ProblemInput::new("   ", "9+7")).is_err());
/// ```
pub fn validate_problem(input: &ProblemInput) -> Result<GenerationRequest, ValidationError> {
    if input.problem.is_blank() {
        return Err(ValidationError {
            field: Field::Problem,
            message: PROBLEM_REQUIRED,
        });
    }

    let formula = Some(input.formula.value())
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string);

    Ok(GenerationRequest::Initial {
        problem: input.problem.value().to_string(),
        formula,
    })
}

/// Validates the resubmission form.
pub fn validate_description(
    input: &DescriptionInput,
) -> Result<GenerationRequest, ValidationError> {
    if input.description.is_blank() {
        return Err(ValidationError {
            field: Field::Description,
            message: DESCRIPTION_REQUIRED,
        });
    }

    Ok(GenerationRequest::Resubmit {
        description: input.description.value().to_string(),
    })
}
