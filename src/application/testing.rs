//! Test doubles shared by the application tests.

use std::collections::{HashSet, VecDeque};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::{
    ExportError, GenerationRequest, GenerationResult, GenerationService, RequestState,
    ServiceError, ServiceResult,
};

use super::export::{Blob, DownloadSink, ObjectUrl};
use super::propagation::TransitionObserver;

/// Replays queued outcomes and records every request it receives.
#[derive(Default)]
pub struct FakeService {
    outcomes: Mutex<VecDeque<ServiceResult<GenerationResult>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeService {
    pub fn push_ok(&self, result: GenerationResult) {
        self.outcomes.lock().unwrap().push_back(Ok(result));
    }

    pub fn push_err(&self, error: ServiceError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl GenerationService for FakeService {
    fn generate(&self, request: &GenerationRequest) -> ServiceResult<GenerationResult> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Transport("no response queued".to_string())))
    }
}

#[derive(Default)]
pub struct TransitionLog {
    entries: Vec<(RequestState, RequestState)>,
}

impl TransitionLog {
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(from, to)| format!("{}->{}", from.name(), to.name()))
            .collect()
    }
}

impl TransitionObserver for TransitionLog {
    fn on_transition(&mut self, previous: &RequestState, current: &RequestState) {
        self.entries.push((previous.clone(), current.clone()));
    }
}

/// Download sink that keeps everything in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub created: Vec<Blob>,
    pub triggered: Vec<(ObjectUrl, String)>,
    pub revoked: Vec<ObjectUrl>,
    pub live: HashSet<ObjectUrl>,
    pub fail_trigger: bool,
}

impl DownloadSink for RecordingSink {
    fn create_object_url(&mut self, blob: Blob) -> Result<ObjectUrl, ExportError> {
        let url = ObjectUrl(format!("blob:test/{}", self.created.len()));
        self.created.push(blob);
        self.live.insert(url.clone());
        Ok(url)
    }

    fn trigger(&mut self, url: &ObjectUrl, filename: &str) -> Result<PathBuf, ExportError> {
        self.triggered.push((url.clone(), filename.to_string()));
        if self.fail_trigger {
            return Err(ExportError::Write {
                filename: filename.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "dismissed"),
            });
        }
        Ok(PathBuf::from(filename))
    }

    fn revoke(&mut self, url: ObjectUrl) {
        self.live.remove(&url);
        self.revoked.push(url);
    }
}

/// Cloneable handle so a test can inspect a sink owned by `App`.
#[derive(Debug, Clone, Default)]
pub struct SharedSink(pub std::sync::Arc<Mutex<RecordingSink>>);

impl SharedSink {
    pub fn snapshot<T>(&self, read: impl FnOnce(&RecordingSink) -> T) -> T {
        read(&self.0.lock().unwrap())
    }
}

impl DownloadSink for SharedSink {
    fn create_object_url(&mut self, blob: Blob) -> Result<ObjectUrl, ExportError> {
        self.0.lock().unwrap().create_object_url(blob)
    }

    fn trigger(&mut self, url: &ObjectUrl, filename: &str) -> Result<PathBuf, ExportError> {
        self.0.lock().unwrap().trigger(url, filename)
    }

    fn revoke(&mut self, url: ObjectUrl) {
        self.0.lock().unwrap().revoke(url);
    }
}
