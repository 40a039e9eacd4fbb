use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chocogate::errors::{GatewayError, Result};
use chocogate::exec::CommandBackend;
use chocogate::types::{ExecutionRequest, ExecutionResult};

use crate::builders;

/// Scripted reply for one call.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Result(ExecutionResult),
    SpawnFailure,
}

/// A fake backend that:
/// - records every request it was asked to run
/// - answers with scripted replies in order, then a clean empty success.
#[derive(Debug, Default)]
pub struct FakeBackend {
    requests: Arc<Mutex<Vec<ExecutionRequest>>>,
    replies: Mutex<VecDeque<FakeReply>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, result: ExecutionResult) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(FakeReply::Result(result));
        self
    }

    pub fn fail_spawn(self) -> Self {
        self.replies.lock().unwrap().push_back(FakeReply::SpawnFailure);
        self
    }

    /// Handle to the recorded requests that survives moving the backend.
    pub fn recorder(&self) -> Arc<Mutex<Vec<ExecutionRequest>>> {
        Arc::clone(&self.requests)
    }

    /// Argument vectors seen so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.args().to_vec())
            .collect()
    }
}

impl CommandBackend for FakeBackend {
    fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();

        Box::pin(async move {
            match reply {
                Some(FakeReply::Result(res)) => Ok(res),
                Some(FakeReply::SpawnFailure) => Err(GatewayError::SpawnError {
                    program: "choco".to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
                }),
                None => Ok(builders::ok("")),
            }
        })
    }
}
