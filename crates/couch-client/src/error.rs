//! Error types for couch-client.

use crate::response::CouchError;

/// Result type alias for couch-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for couch-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The failure envelope, if the server answered with a status >= 400.
    pub fn couch_error(&self) -> Option<&CouchError> {
        match &self.kind {
            ErrorKind::Couch(err) => Some(err),
            _ => None,
        }
    }

    /// Consume the error, returning the failure envelope if there is one.
    pub fn into_couch_error(self) -> Option<CouchError> {
        match self.kind {
            ErrorKind::Couch(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status code of the failed response, if any response was received.
    pub fn status_code(&self) -> Option<u16> {
        self.couch_error().map(CouchError::status_code)
    }

    /// Returns true if the server rejected the request with 401.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::Couch(CouchError::Auth(_)))
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns true if no HTTP exchange completed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Timeout | ErrorKind::Connection(_) | ErrorKind::Transport(_)
        )
    }
}

impl From<CouchError> for Error {
    fn from(err: CouchError) -> Self {
        Error::new(ErrorKind::Couch(err))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The server answered with a failure status (>= 400).
    #[error("{0}")]
    Couch(CouchError),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failure to complete the HTTP exchange.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Request body encoding error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Envelope;
    use crate::transport::TransportResponse;

    fn failure(status: u16) -> CouchError {
        let envelope = Envelope::new(TransportResponse::new(
            status,
            r#"{"error":"not_found","reason":"missing"}"#,
        ));
        if status == 401 {
            CouchError::Auth(envelope)
        } else {
            CouchError::Generic(envelope)
        }
    }

    #[test]
    fn test_error_status_code() {
        let err: Error = failure(404).into();
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_auth_failure());
        assert!(!err.is_transport());

        let err = Error::new(ErrorKind::Timeout);
        assert_eq!(err.status_code(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_is_auth_failure() {
        let err: Error = failure(401).into();
        assert!(err.is_auth_failure());

        let err: Error = failure(403).into();
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_error_is_transport() {
        assert!(Error::new(ErrorKind::Timeout).is_transport());
        assert!(Error::new(ErrorKind::Connection("refused".into())).is_transport());
        assert!(Error::new(ErrorKind::Transport("reset".into())).is_transport());
        assert!(!Error::new(ErrorKind::Json("eof".into())).is_transport());
    }

    #[test]
    fn test_into_couch_error() {
        let err: Error = failure(409).into();
        let couch = err.into_couch_error().unwrap();
        assert_eq!(couch.status_code(), 409);

        assert!(Error::new(ErrorKind::Timeout).into_couch_error().is_none());
    }

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (ErrorKind::Couch(failure(404)), "HTTP 404"),
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::Connection("refused".into()),
                "Connection error: refused",
            ),
            (
                ErrorKind::Transport("connection reset".into()),
                "Transport error: connection reset",
            ),
            (
                ErrorKind::Json("unexpected EOF".into()),
                "JSON error: unexpected EOF",
            ),
            (
                ErrorKind::Serialization("key must be a string".into()),
                "Serialization error: key must be a string",
            ),
            (
                ErrorKind::InvalidUrl("no scheme".into()),
                "Invalid URL: no scheme",
            ),
            (
                ErrorKind::Config("missing field".into()),
                "Configuration error: missing field",
            ),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }
}
