//! Turbopuffer store error types.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Turbopuffer store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured explicitly or through the environment.
    #[error("missing credential: TurboPuffer api key is not provided")]
    MissingCredential,

    /// Caller input failed a batch-shape check; nothing was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Transport failure or non-success response from the service.
    #[error("remote service error: {message}")]
    RemoteService {
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Failure description or truncated response body.
        message: String,
    },

    /// Request body could not be encoded as JSON; nothing was sent.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Response body did not have the expected shape.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The embedding provider failed.
    #[error(transparent)]
    Embedding(#[from] tpuf_core::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Creates a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a remote service error.
    pub fn remote_service(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::RemoteService {
            status,
            message: msg.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a deserialization error.
    pub fn deserialization(msg: impl Into<String>) -> Self {
        Self::Deserialization(msg.into())
    }

    /// Creates an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns the HTTP status of a remote service error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteService { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if the request never left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential
                | Self::Validation(_)
                | Self::Serialization(_)
                | Self::InvalidConfig(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::deserialization(err.to_string());
        }

        Self::remote_service(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::deserialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_config(format!("invalid url: {err}"))
    }
}
