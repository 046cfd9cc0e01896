use std::fmt;

use super::text::TextInput;

/// Form field identifiers used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Problem,
    Formula,
    Description,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Problem => "problem",
            Field::Formula => "formula",
            Field::Description => "description",
        }
    }
}

/// The initial form: a math word problem plus an optional formula.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemInput {
    pub problem: TextInput,
    pub formula: TextInput,
}

impl ProblemInput {
    pub fn new(problem: &str, formula: &str) -> Self {
        Self {
            problem: TextInput::new(problem),
            formula: TextInput::new(formula),
        }
    }

    pub fn field_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::Problem => Some(&mut self.problem),
            Field::Formula => Some(&mut self.formula),
            Field::Description => None,
        }
    }
}

/// The resubmission form holding an editable visual-language description.
///
/// Only two writers exist: the user's keystrokes and [`DescriptionInput::seed`],
/// which is driven by successful generation results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionInput {
    pub description: TextInput,
    seeded: bool,
}

impl DescriptionInput {
    pub fn new(description: &str) -> Self {
        Self {
            description: TextInput::new(description),
            seeded: true,
        }
    }

    /// Whether a generation result has ever populated this input.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Overwrites the description with `value` unless it is already displayed.
    ///
    /// Returns `true` when the buffer changed.
    pub fn seed(&mut self, value: &str) -> bool {
        self.seeded = true;
        if self.description.value() == value {
            return false;
        }
        self.description.set(value);
        true
    }
}

/// One submission to the generation service. Exactly one shape per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Initial {
        problem: String,
        formula: Option<String>,
    },
    Resubmit {
        description: String,
    },
}

impl GenerationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::Initial { .. } => "initial",
            GenerationRequest::Resubmit { .. } => "resubmit",
        }
    }
}

/// The two artifacts the service renders from a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Formal,
    Intuitive,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Formal, ArtifactKind::Intuitive];

    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Formal => "formal",
            ArtifactKind::Intuitive => "intuitive",
        }
    }

    /// Fixed download filename for this artifact.
    pub fn filename(self) -> &'static str {
        match self {
            ArtifactKind::Formal => "formal-visualization.svg",
            ArtifactKind::Intuitive => "intuitive-visualization.svg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Formal => "Formal Representation",
            ArtifactKind::Intuitive => "Intuitive Representation",
        }
    }

    pub(crate) fn fallback_error(self) -> &'static str {
        match self {
            ArtifactKind::Formal => "Could not generate formal visualization.",
            ArtifactKind::Intuitive => "Could not generate intuitive visualization.",
        }
    }
}

/// Outcome of rendering a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    Svg(String),
    /// The service produced no markup; carries its reason.
    Unavailable(String),
}

impl Rendering {
    pub fn svg(&self) -> Option<&str> {
        match self {
            Rendering::Svg(markup) => Some(markup),
            Rendering::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub description: String,
    pub formal: Rendering,
    pub intuitive: Rendering,
}

impl GenerationResult {
    pub fn new(description: &str, formal_svg: &str, intuitive_svg: &str) -> Self {
        Self {
            description: description.to_string(),
            formal: Rendering::Svg(formal_svg.to_string()),
            intuitive: Rendering::Svg(intuitive_svg.to_string()),
        }
    }

    pub fn artifact(&self, kind: ArtifactKind) -> &Rendering {
        match kind {
            ArtifactKind::Formal => &self.formal,
            ArtifactKind::Intuitive => &self.intuitive,
        }
    }

    /// True when both artifacts carry markup; only then is the result shown.
    pub fn is_complete(&self) -> bool {
        ArtifactKind::ALL
            .into_iter()
            .all(|kind| self.artifact(kind).svg().is_some())
    }

    /// Reasons for every artifact the service could not render.
    pub fn unavailable(&self) -> Vec<(ArtifactKind, &str)> {
        ArtifactKind::ALL
            .into_iter()
            .filter_map(|kind| match self.artifact(kind) {
                Rendering::Unavailable(reason) => Some((kind, reason.as_str())),
                Rendering::Svg(_) => None,
            })
            .collect()
    }
}

/// Identifier handed out for each issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the single request slot.
///
/// A pending request carries no result, so stale artifacts cannot be shown
/// while a new call is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending {
        id: RequestId,
    },
    Succeeded(GenerationResult),
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Pending { .. } => "pending",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }
}
