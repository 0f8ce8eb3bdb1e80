//! Scripted transport for protocol tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use couchrest_client::{Error, ErrorKind, RequestSpec, Result, Transport, TransportResponse};

/// Answers requests from a fixed script and records everything it was sent.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and JSON body.
    pub(crate) fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.push(Ok(TransportResponse::new(status, body.to_string())))
    }

    /// Queue a response with an empty body.
    pub(crate) fn respond_empty(self, status: u16) -> Self {
        self.push(Ok(TransportResponse::new(status, "")))
    }

    /// Queue a transport-level failure.
    pub(crate) fn fail(self, message: &str) -> Self {
        self.push(Err(Error::new(ErrorKind::Connection(message.to_string()))))
    }

    fn push(self, outcome: Result<TransportResponse>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub(crate) fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: RequestSpec) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::new(ErrorKind::Other("script exhausted".to_string()))))
    }
}
