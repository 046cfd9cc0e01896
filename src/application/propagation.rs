//! Copies each new description back into the resubmission form.

use tracing::debug;

use crate::domain::{DescriptionInput, RequestState};

/// Receives every [`RequestState`] transition, in order.
pub trait TransitionObserver {
    fn on_transition(&mut self, previous: &RequestState, current: &RequestState);
}

/// Applies a transition to the description input.
///
/// Only a move into `Succeeded` writes, and only when the returned
/// description differs from what is displayed. Returns `true` when the
/// input was rewritten.
pub fn propagate(current: &RequestState, input: &mut DescriptionInput) -> bool {
    let RequestState::Succeeded(result) = current else {
        return false;
    };

    let changed = input.seed(&result.description);
    debug!(changed, "propagated description to resubmission input");
    changed
}

impl TransitionObserver for DescriptionInput {
    fn on_transition(&mut self, previous: &RequestState, current: &RequestState) {
        if previous != current {
            propagate(current, self);
        }
    }
}
