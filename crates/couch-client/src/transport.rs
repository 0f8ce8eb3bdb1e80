//! The injectable HTTP transport capability.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::request::RequestSpec;

/// Performs exactly one HTTP exchange.
///
/// An `Err` means no response was received at all (connect failure, timeout,
/// broken body). Any response, whatever its status, comes back as `Ok`.
/// Cookie storage, timeouts and connection reuse are the transport's business.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: RequestSpec) -> Result<TransportResponse>;
}

/// Status, headers and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl TransportResponse {
    /// Create a response with no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }
}
