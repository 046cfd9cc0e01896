//! Runs admitted requests off the UI thread.
//!
//! Each [`Ticket`] is executed on its own worker thread and the outcome is
//! sent back, tagged with its request id, over a channel that the event loop
//! drains between frames.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use tracing::{debug, error};

use crate::domain::{GenerationResult, GenerationService, RequestId, ServiceError};

use super::orchestrator::Ticket;

#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub outcome: Result<GenerationResult, ServiceError>,
}

pub struct Dispatcher {
    service: Arc<dyn GenerationService>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service,
            sender,
            receiver,
        }
    }

    /// Starts executing `ticket`. The outcome arrives via [`Dispatcher::try_next`].
    pub fn dispatch(&self, ticket: Ticket) {
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        let id = ticket.id;

        let spawned = thread::Builder::new()
            .name(format!("generate-{}", id.0))
            .spawn(move || {
                let outcome = service.generate(&ticket.request);
                if sender.send(Completion { id, outcome }).is_err() {
                    debug!(request_id = %id, "receiver gone, discarding completion");
                }
            });

        if let Err(err) = spawned {
            error!(request_id = %id, error = %err, "could not start request worker");
            let _ = self.sender.send(Completion {
                id,
                outcome: Err(ServiceError::Transport(format!(
                    "could not start request: {err}"
                ))),
            });
        }
    }

    pub fn try_next(&self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }

    /// Blocks for up to `timeout` waiting for the next completion.
    pub fn wait_next(&self, timeout: Duration) -> Option<Completion> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
