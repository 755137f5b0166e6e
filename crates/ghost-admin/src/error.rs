//! Error types for ghost-admin

use std::path::PathBuf;

/// Result type for ghost-admin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the Ghost Admin API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Admin API key is not in `{id}:{hex secret}` form
    #[error("Invalid Admin API key: {reason}")]
    InvalidKey { reason: String },

    /// Site URL could not be used as an API base
    #[error("Invalid Ghost URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Signing the request token failed
    #[error("Failed to sign Admin API token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ghost answered with a non-success status
    ///
    /// `message` is Ghost's own error message, unmodified. Ghost's optional
    /// `context` detail is kept alongside and is not part of the display.
    #[error("Ghost API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        context: Option<String>,
    },

    /// Ghost answered 2xx with a body that lacks the expected envelope
    #[error("Unexpected response from Ghost: {message}")]
    UnexpectedResponse { message: String },

    /// A read was requested without an id or slug
    #[error("Must include either id or slug to read a post")]
    MissingIdentifier,

    /// Configuration could not be loaded or is incomplete
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status reported by Ghost, if this is an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether Ghost rejected an edit because `updated_at` was stale.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
