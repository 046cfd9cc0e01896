//! Request orchestration for the single generation slot.
//!
//! The orchestrator owns [`RequestState`]. A submission is split into
//! [`Orchestrator::begin`], which runs synchronously on the UI thread, and
//! [`Orchestrator::complete`], which applies whatever the service returned.
//! Every state change is reported to a [`TransitionObserver`].

use tracing::{debug, info, warn};

use crate::domain::{
    GenerationRequest, GenerationResult, GenerationService, RequestId, RequestState,
    ServiceError, SubmitError,
};

use super::propagation::TransitionObserver;

/// A request that has been admitted and is waiting to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: RequestId,
    pub request: GenerationRequest,
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    state: RequestState,
    issued: u64,
}

impl Orchestrator {
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Admits `request` and moves to `Pending`.
    ///
    /// Any previous result or error is dropped before this returns, so
    /// nothing stale stays visible while the call is in flight. Fails with
    /// [`SubmitError::Busy`] if another request has not completed yet.
    pub fn begin(
        &mut self,
        request: GenerationRequest,
        observer: &mut dyn TransitionObserver,
    ) -> Result<Ticket, SubmitError> {
        if let RequestState::Pending { id } = self.state {
            warn!(in_flight = %id, "submission refused while a request is pending");
            return Err(SubmitError::Busy { in_flight: id });
        }

        self.issued += 1;
        let id = RequestId(self.issued);
        info!(request_id = %id, kind = request.kind(), "submitting generation request");
        self.transition(RequestState::Pending { id }, observer);

        Ok(Ticket { id, request })
    }

    /// Applies the outcome of request `id`.
    ///
    /// Only the in-flight request may complete; anything else is dropped and
    /// `false` is returned.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<GenerationResult, ServiceError>,
        observer: &mut dyn TransitionObserver,
    ) -> bool {
        match self.state {
            RequestState::Pending { id: in_flight } if in_flight == id => {}
            _ => {
                debug!(request_id = %id, state = self.state.name(), "dropping stale completion");
                return false;
            }
        }

        let next = match outcome {
            Ok(result) => {
                info!(request_id = %id, "generation succeeded");
                RequestState::Succeeded(result)
            }
            Err(err) => {
                warn!(request_id = %id, error = %err, "generation failed");
                RequestState::Failed(err.to_string())
            }
        };
        self.transition(next, observer);
        true
    }

    /// Runs a whole submission on the calling thread.
    pub fn submit(
        &mut self,
        request: GenerationRequest,
        service: &dyn GenerationService,
        observer: &mut dyn TransitionObserver,
    ) -> Result<RequestId, SubmitError> {
        let ticket = self.begin(request, observer)?;
        let outcome = service.generate(&ticket.request);
        self.complete(ticket.id, outcome, observer);
        Ok(ticket.id)
    }

    fn transition(&mut self, next: RequestState, observer: &mut dyn TransitionObserver) {
        let previous = std::mem::replace(&mut self.state, next);
        observer.on_transition(&previous, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeService, TransitionLog};
    use crate::domain::{DescriptionInput, GenerationResult};

    fn initial() -> GenerationRequest {
        GenerationRequest::Initial {
            problem: "9 + 7 = 16 apples".to_string(),
            formula: Some("9+7=16".to_string()),
        }
    }

    #[test]
    fn test_begin_moves_to_pending_and_clears_result() {
        let mut orchestrator = Orchestrator::default();
        let mut log = TransitionLog::default();
        let ticket = orchestrator.begin(initial(), &mut log).unwrap();
        orchestrator.complete(ticket.id, Ok(GenerationResult::new("V", "F", "I")), &mut log);
        assert!(orchestrator.state().result().is_some());

        let second = orchestrator
            .begin(GenerationRequest::Resubmit { description: "V".to_string() }, &mut log)
            .unwrap();

        assert_eq!(orchestrator.state(), &RequestState::Pending { id: second.id });
        assert!(orchestrator.state().result().is_none());
        assert_eq!(log.names(), ["idle->pending", "pending->succeeded", "succeeded->pending"]);
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut orchestrator = Orchestrator::default();
        let mut log = TransitionLog::default();
        let ticket = orchestrator.begin(initial(), &mut log).unwrap();
        orchestrator.complete(ticket.id, Err(ServiceError::Transport("offline".into())), &mut log);
        assert_eq!(orchestrator.state().error(), Some("offline"));

        orchestrator.begin(initial(), &mut log).unwrap();
        assert_eq!(orchestrator.state().error(), None);
    }

    #[test]
    fn test_begin_while_pending_is_refused() {
        let mut orchestrator = Orchestrator::default();
        let mut log = TransitionLog::default();
        let ticket = orchestrator.begin(initial(), &mut log).unwrap();

        let err = orchestrator.begin(initial(), &mut log).unwrap_err();
        assert_eq!(err, SubmitError::Busy { in_flight: ticket.id });
        assert_eq!(orchestrator.state(), &RequestState::Pending { id: ticket.id });
        assert_eq!(log.names().len(), 1);
    }

    #[test]
    fn test_request_ids_increase() {
        let mut orchestrator = Orchestrator::default();
        let mut log = TransitionLog::default();
        let first = orchestrator.begin(initial(), &mut log).unwrap();
        orchestrator.complete(first.id, Err(ServiceError::Transport("x".into())), &mut log);
        let second = orchestrator.begin(initial(), &mut log).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut orchestrator = Orchestrator::default();
        let mut log = TransitionLog::default();
        let first = orchestrator.begin(initial(), &mut log).unwrap();
        assert!(orchestrator.complete(first.id, Err(ServiceError::Transport("x".into())), &mut log));

        let second = orchestrator.begin(initial(), &mut log).unwrap();
        let applied = orchestrator.complete(
            first.id,
            Ok(GenerationResult::new("old", "F", "I")),
            &mut log,
        );

        assert!(!applied);
        assert_eq!(orchestrator.state(), &RequestState::Pending { id: second.id });
    }

    #[test]
    fn test_completion_in_idle_is_dropped() {
        let mut orchestrator = Orchestrator::default();
        let mut log = TransitionLog::default();
        assert!(!orchestrator.complete(RequestId(1), Ok(GenerationResult::new("V", "F", "I")), &mut log));
        assert_eq!(orchestrator.state(), &RequestState::Idle);
        assert!(log.names().is_empty());
    }

    #[test]
    fn test_submit_service_error_becomes_failed() {
        let service = FakeService::default();
        service.push_err(ServiceError::Rejected {
            status: 500,
            message: "bad formula".to_string(),
        });
        let mut orchestrator = Orchestrator::default();
        let mut description = DescriptionInput::default();

        orchestrator.submit(initial(), &service, &mut description).unwrap();

        assert_eq!(orchestrator.state(), &RequestState::Failed("bad formula".to_string()));
        assert!(orchestrator.state().result().is_none());
        assert!(!description.is_seeded());
    }

    #[test]
    fn test_submit_success_seeds_description() {
        let service = FakeService::default();
        service.push_ok(GenerationResult::new("V", "F", "I"));
        let mut orchestrator = Orchestrator::default();
        let mut description = DescriptionInput::default();

        orchestrator.submit(initial(), &service, &mut description).unwrap();

        let result = orchestrator.state().result().unwrap();
        assert_eq!(result.formal.svg(), Some("F"));
        assert_eq!(result.intuitive.svg(), Some("I"));
        assert_eq!(description.description.value(), "V");
        assert_eq!(service.requests(), vec![initial()]);
    }
}
