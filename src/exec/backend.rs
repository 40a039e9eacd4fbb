// src/exec/backend.rs

//! Pluggable command backend abstraction.
//!
//! The tool layer talks to a `CommandBackend` instead of a concrete
//! [`Gateway`]. Production code passes the gateway; tests can provide a fake
//! that records argument vectors and returns scripted results without
//! spawning anything.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::Result;
use crate::exec::gateway::Gateway;
use crate::types::{ExecutionRequest, ExecutionResult};

/// Trait abstracting how a command line is executed.
pub trait CommandBackend: Send + Sync {
    fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>>;
}

impl CommandBackend for Gateway {
    fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>> {
        Box::pin(async move { self.run(&request).await })
    }
}

impl<B: CommandBackend + ?Sized> CommandBackend for Arc<B> {
    fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>> {
        (**self).execute(request)
    }
}
