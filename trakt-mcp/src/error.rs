use thiserror::Error;
use trakt_api::{StatusCode, TraktApiError};
use trakt_auth::AuthError;

/// Failure of a single tool or resource call.
///
/// `InvalidParams` becomes a JSON-RPC error; everything else is reported to
/// the model as a tool result with `isError` set.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    InvalidParams(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("You are not authenticated with Trakt. Use the `start_device_auth` tool to authenticate.")]
    NotAuthenticated,

    #[error("Not found on Trakt: {0}")]
    NotFound(String),

    #[error("Trakt request failed: {0}")]
    Api(String),

    #[error("{0}")]
    Auth(String),
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidParams(message.into())
    }

    pub fn is_invalid_params(&self) -> bool {
        matches!(
            self,
            ToolError::InvalidParams(_) | ToolError::UnknownTool(_) | ToolError::UnknownResource(_)
        )
    }
}

// Messages are built from the error kind and Trakt's error body only; request
// headers and tokens never reach them.
impl From<TraktApiError> for ToolError {
    fn from(err: TraktApiError) -> Self {
        match err.status() {
            Some(StatusCode::UNAUTHORIZED) => ToolError::NotAuthenticated,
            Some(StatusCode::NOT_FOUND) => ToolError::NotFound(err.to_string()),
            _ if matches!(err, TraktApiError::Unauthenticated) => ToolError::NotAuthenticated,
            _ => ToolError::Api(err.to_string()),
        }
    }
}

impl From<AuthError> for ToolError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => ToolError::NotAuthenticated,
            AuthError::Deserialization(message) => ToolError::Api(message),
            AuthError::Upstream { status, message } if status == StatusCode::NOT_FOUND => {
                ToolError::NotFound(message)
            }
            other => ToolError::Auth(other.to_string()),
        }
    }
}
