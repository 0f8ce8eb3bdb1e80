//! Result and error envelopes around CouchDB responses.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};
use crate::transport::TransportResponse;

/// A received response with a lazily decoded JSON body.
///
/// The body is only parsed on the first call to [`Envelope::data`], so
/// bodiless responses (HEAD, 304) never fail at construction. A successful
/// decode is cached; a failed one is returned to the caller and retried on
/// the next access.
pub struct Envelope {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
    data: OnceLock<serde_json::Value>,
}

impl Envelope {
    /// Wrap a transport response.
    pub fn new(response: TransportResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: response.body,
            data: OnceLock::new(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Get the ETag header value (the quoted document revision for documents).
    pub fn etag(&self) -> Option<&str> {
        self.header("etag")
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The body decoded as JSON, parsed on first access and cached.
    pub fn data(&self) -> Result<&serde_json::Value> {
        if let Some(data) = self.data.get() {
            return Ok(data);
        }

        let decoded: serde_json::Value = serde_json::from_str(&self.body)?;
        Ok(self.data.get_or_init(|| decoded))
    }

    /// Deserialize the body into a concrete type. Not cached.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Short human-readable description: status plus CouchDB's error/reason.
    pub fn summary(&self) -> String {
        match self.couch_reason() {
            Some((error, Some(reason))) => format!("HTTP {} {}: {}", self.status, error, reason),
            Some((error, None)) => format!("HTTP {} {}", self.status, error),
            None => format!("HTTP {}", self.status),
        }
    }

    /// CouchDB's `{"error", "reason"}` pair, when the body carries one.
    fn couch_reason(&self) -> Option<(String, Option<String>)> {
        #[derive(Deserialize)]
        struct CouchErrorBody {
            error: String,
            #[serde(default)]
            reason: Option<String>,
        }

        let parsed: CouchErrorBody = serde_json::from_str(&self.body).ok()?;
        Some((parsed.error, parsed.reason))
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header values can carry session cookies.
        let mut header_names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        header_names.sort_unstable();

        f.debug_struct("Envelope")
            .field("status", &self.status)
            .field("headers", &header_names)
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}

/// A successful response (status < 400).
#[derive(Debug)]
pub struct CouchResult {
    envelope: Envelope,
}

impl CouchResult {
    /// Wrap a response as a success envelope.
    pub fn new(response: TransportResponse) -> Self {
        Self {
            envelope: Envelope::new(response),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.envelope.status()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.envelope.header(name)
    }

    /// Get the ETag header value.
    pub fn etag(&self) -> Option<&str> {
        self.envelope.etag()
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        self.envelope.body()
    }

    /// The body decoded as JSON, parsed on first access and cached.
    pub fn data(&self) -> Result<&serde_json::Value> {
        self.envelope.data()
    }

    /// Deserialize the body into a concrete type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        self.envelope.json()
    }

    /// Borrow the underlying envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

/// A failed response (status >= 400).
///
/// `Auth` is the 401 case, which the cookie-auth connection answers with a
/// relogin; everything else is `Generic`.
#[derive(Debug, thiserror::Error)]
pub enum CouchError {
    #[error("Authentication failed: {}", .0.summary())]
    Auth(Envelope),

    #[error("Request failed: {}", .0.summary())]
    Generic(Envelope),
}

impl CouchError {
    /// Classify a failed response by status code.
    pub fn from_response(response: TransportResponse) -> Self {
        let envelope = Envelope::new(response);
        if envelope.status() == 401 {
            CouchError::Auth(envelope)
        } else {
            CouchError::Generic(envelope)
        }
    }

    /// Get the HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.envelope().status()
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        self.envelope().body()
    }

    /// The body decoded as JSON, parsed on first access and cached.
    pub fn data(&self) -> Result<&serde_json::Value> {
        self.envelope().data()
    }

    /// Returns true for the 401 variant.
    pub fn is_auth(&self) -> bool {
        matches!(self, CouchError::Auth(_))
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }

    /// Borrow the underlying envelope.
    pub fn envelope(&self) -> &Envelope {
        match self {
            CouchError::Auth(envelope) | CouchError::Generic(envelope) => envelope,
        }
    }
}

/// Extension trait for classifying raw transport responses.
pub trait ResponseExt {
    /// Convert to a success envelope, or to a [`CouchError`] for status >= 400.
    fn check_couch_error(self) -> Result<CouchResult>;
}

impl ResponseExt for TransportResponse {
    fn check_couch_error(self) -> Result<CouchResult> {
        if self.status < 400 {
            Ok(CouchResult::new(self))
        } else {
            Err(Error::new(ErrorKind::Couch(CouchError::from_response(self))))
        }
    }
}
