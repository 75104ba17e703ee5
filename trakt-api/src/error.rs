use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum TraktApiError {
    /// Transport failure: connection refused, DNS, TLS, timeout, truncated body.
    Network(reqwest::Error),
    /// Trakt answered with a non-2xx status.
    Upstream(StatusCode, Option<ErrorDetail>),
    /// The response body did not match the expected shape.
    Deserialization(serde_json::Error),
    /// An authenticated endpoint was called on a client without a bearer token.
    Unauthenticated,
    Configuration(String),
}

impl TraktApiError {
    pub(crate) fn upstream(status: StatusCode, body: &str) -> Self {
        TraktApiError::Upstream(status, serde_json::from_str(body).ok())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TraktApiError::Upstream(status, _) => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, TraktApiError::Network(_))
    }
}

impl From<reqwest::Error> for TraktApiError {
    fn from(value: reqwest::Error) -> Self {
        TraktApiError::Network(value.without_url())
    }
}

impl std::fmt::Display for TraktApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraktApiError::Network(e) => write!(f, "Network error: {}", e),
            TraktApiError::Upstream(status, Some(detail)) => match &detail.error_description {
                Some(description) => write!(f, "({}) {}: {}", status, detail.error, description),
                None => write!(f, "({}) {}", status, detail.error),
            },
            TraktApiError::Upstream(status, None) => write!(f, "Trakt returned {}", status),
            TraktApiError::Deserialization(e) => write!(f, "Unexpected response from Trakt: {}", e),
            TraktApiError::Unauthenticated => f.write_str("This endpoint requires authentication"),
            TraktApiError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for TraktApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraktApiError::Network(e) => Some(e),
            TraktApiError::Deserialization(e) => Some(e),
            _ => None,
        }
    }
}

/// Error body Trakt sends on OAuth failures and some validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error: String,
    pub error_description: Option<String>,
}
