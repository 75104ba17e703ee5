use thiserror::Error;
use trakt_api::{StatusCode, TraktApiError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Trakt API error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Invalid data: {0}")]
    Deserialization(String),

    #[error("An authorization is already in progress; enter code {user_code} at {verification_url}")]
    FlowAlreadyActive {
        user_code: String,
        verification_url: String,
    },

    #[error("No device authorization is in progress")]
    NoActiveFlow,

    #[error("Not authenticated with Trakt")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Transport failures are worth retrying; everything else is final.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::Network(_))
    }

    /// A field that fails validation after coming back from Trakt or off disk
    /// means the payload is bad, not the caller's input.
    pub(crate) fn into_malformed_response(self) -> Self {
        match self {
            AuthError::Validation(msg) => AuthError::Deserialization(msg),
            other => other,
        }
    }
}

impl From<TraktApiError> for AuthError {
    fn from(err: TraktApiError) -> Self {
        match err {
            TraktApiError::Network(_) => AuthError::Network(err.to_string()),
            TraktApiError::Upstream(status, _) => AuthError::Upstream {
                status,
                message: err.to_string(),
            },
            TraktApiError::Deserialization(e) => AuthError::Deserialization(e.to_string()),
            TraktApiError::Unauthenticated => AuthError::NotAuthenticated,
            TraktApiError::Configuration(msg) => AuthError::Configuration(msg),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Deserialization(err.to_string())
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
