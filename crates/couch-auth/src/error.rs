//! Error types for couch-auth.
//!
//! Error messages are designed to avoid exposing credential data.

/// Result type alias for couch-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for couch-auth operations.
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
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    Url(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Url(err.to_string()), err)
    }
}

impl From<Error> for couchrest_client::Error {
    fn from(err: Error) -> Self {
        let kind = match &err.kind {
            ErrorKind::Url(message) => couchrest_client::ErrorKind::InvalidUrl(message.clone()),
            other => couchrest_client::ErrorKind::Config(other.to_string()),
        };
        couchrest_client::Error::with_source(kind, err)
    }
}
