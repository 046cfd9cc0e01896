//! Application state for the terminal client.
//!
//! `App` composes both forms, the request orchestrator and the background
//! dispatcher, and exposes the operations the key handler triggers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{
    validate_description, validate_problem, ArtifactKind, DescriptionInput, ExportError, Field,
    GenerationRequest, GenerationService, ProblemInput, Rendering, RequestState, TextInput,
    ValidationError,
};

use super::dispatch::Dispatcher;
use super::export::{export_svg, DownloadSink};
use super::orchestrator::Orchestrator;

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Forms are active and keystrokes edit the focused field
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use math2visual::application::App;
/// use math2visual::domain::{GenerationRequest, GenerationResult, GenerationService, ServiceResult};
/// use math2visual::infrastructure::FileDownloads;
///
/// struct Offline;
///
/// impl GenerationService for Offline {
///     fn generate(&self, _: &GenerationRequest) -> ServiceResult<GenerationResult> {
///         Ok(GenerationResult::new("V", "<svg/>", "<svg/>"))
///     }
/// }
///
/// let app = App::new(Arc::new(Offline), Box::new(FileDownloads::new(".")));
/// assert!(!app.is_pending());
/// ```
pub struct App {
    /// Initial form (word problem and optional formula)
    pub problem_input: ProblemInput,
    /// Resubmission form, seeded from each new result
    pub description_input: DescriptionInput,
    /// Field receiving keystrokes
    pub focus: Field,
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Inline validation messages, keyed by field
    pub field_errors: HashMap<Field, ValidationError>,
    /// Temporary status message to display
    pub status_message: Option<String>,
    pub should_quit: bool,
    orchestrator: Orchestrator,
    dispatcher: Dispatcher,
    downloads: Box<dyn DownloadSink>,
}

impl App {
    pub fn new(service: Arc<dyn GenerationService>, downloads: Box<dyn DownloadSink>) -> Self {
        Self {
            problem_input: ProblemInput::default(),
            description_input: DescriptionInput::default(),
            focus: Field::Problem,
            mode: AppMode::Normal,
            help_scroll: 0,
            field_errors: HashMap::new(),
            status_message: None,
            should_quit: false,
            orchestrator: Orchestrator::default(),
            dispatcher: Dispatcher::new(service),
            downloads,
        }
    }

    pub fn request_state(&self) -> &RequestState {
        self.orchestrator.state()
    }

    /// True while a request is in flight; both submit actions are disabled.
    pub fn is_pending(&self) -> bool {
        self.orchestrator.is_pending()
    }

    /// Validates the initial form and, if it passes, issues the request.
    ///
    /// Returns `true` when a request was issued.
    pub fn submit_problem(&mut self) -> bool {
        if self.is_pending() {
            debug!("initial submission ignored while pending");
            return false;
        }
        let validated = validate_problem(&self.problem_input);
        self.issue_validated(Field::Problem, validated)
    }

    /// Validates the resubmission form and, if it passes, issues the request.
    pub fn submit_description(&mut self) -> bool {
        if self.is_pending() {
            debug!("resubmission ignored while pending");
            return false;
        }
        if !self.description_input.is_seeded() {
            self.status_message = Some("No visual language to resubmit yet".to_string());
            return false;
        }
        let validated = validate_description(&self.description_input);
        self.issue_validated(Field::Description, validated)
    }

    fn issue_validated(
        &mut self,
        field: Field,
        validated: Result<GenerationRequest, ValidationError>,
    ) -> bool {
        let request = match validated {
            Ok(request) => request,
            Err(err) => {
                debug!(field = err.field.name(), "submission blocked by validation");
                self.field_errors.insert(err.field, err);
                return false;
            }
        };
        self.field_errors.remove(&field);

        match self.orchestrator.begin(request, &mut self.description_input) {
            Ok(ticket) => {
                self.status_message = None;
                self.dispatcher.dispatch(ticket);
                true
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
                false
            }
        }
    }

    /// Applies every completion that has arrived. Returns how many applied.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.dispatcher.try_next() {
            if self.orchestrator.complete(
                completion.id,
                completion.outcome,
                &mut self.description_input,
            ) {
                applied += 1;
            }
        }
        applied
    }

    /// Blocks up to `timeout` for the in-flight request and applies it.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.dispatcher.wait_next(timeout) {
            Some(completion) => self.orchestrator.complete(
                completion.id,
                completion.outcome,
                &mut self.description_input,
            ),
            None => false,
        }
    }

    /// Downloads the current artifact of `kind` under its fixed filename.
    ///
    /// Refused unless the current result carries both artifacts.
    pub fn export_artifact(&mut self, kind: ArtifactKind) -> Result<PathBuf, ExportError> {
        let complete = self.request_state().result().filter(|r| r.is_complete());
        let markup = match complete.map(|r| r.artifact(kind)) {
            Some(Rendering::Svg(markup)) => markup.clone(),
            _ => {
                let err = ExportError::Unavailable(kind.name());
                self.status_message = Some(format!("Export failed: {}", err));
                return Err(err);
            }
        };

        let result = export_svg(self.downloads.as_mut(), &markup, kind.filename());
        self.status_message = Some(match &result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => format!("Export failed: {}", err),
        });
        result
    }

    /// Records the outcome of copying the description to the clipboard.
    pub fn set_clipboard_result(&mut self, result: Result<(), String>) {
        self.status_message = Some(match result {
            Ok(()) => "Copied visual language to clipboard".to_string(),
            Err(error) => format!("Copy failed: {}", error),
        });
    }

    /// Fields that can take focus right now, in tab order.
    pub fn focus_order(&self) -> Vec<Field> {
        let mut order = vec![Field::Problem, Field::Formula];
        if self.description_input.is_seeded() {
            order.push(Field::Description);
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(at + 1) % order.len()];
    }

    pub fn focus_previous(&mut self) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(at + order.len() - 1) % order.len()];
    }

    pub fn focused_input(&self) -> &TextInput {
        match self.focus {
            Field::Problem => &self.problem_input.problem,
            Field::Formula => &self.problem_input.formula,
            Field::Description => &self.description_input.description,
        }
    }

    /// Applies `edit` to the focused field and clears that field's error.
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut TextInput)) {
        self.field_errors.remove(&self.focus);
        self.navigate_focused(edit);
    }

    /// Moves the cursor of the focused field; its error stays visible.
    pub fn navigate_focused(&mut self, apply: impl FnOnce(&mut TextInput)) {
        match self.focus {
            Field::Description => apply(&mut self.description_input.description),
            other => {
                if let Some(input) = self.problem_input.field_mut(other) {
                    apply(input);
                }
            }
        }
    }

    /// Submits whichever form holds the focus.
    pub fn submit_focused(&mut self) -> bool {
        match self.focus {
            Field::Description => self.submit_description(),
            Field::Problem | Field::Formula => self.submit_problem(),
        }
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }
}
