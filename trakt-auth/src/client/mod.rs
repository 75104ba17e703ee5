mod config;
mod oauth_client;
mod token_storage;

pub use config::Settings;
pub use oauth_client::TraktOAuthClient;
pub use token_storage::TokenStore;

use crate::error::AuthError;
use crate::models::{AuthToken, DeviceCode};
use async_trait::async_trait;
use secrecy::SecretString;

/// Result of a single device-token poll.
#[derive(Debug, Clone)]
pub enum PollResult {
    Granted(AuthToken),
    Pending,
    /// Polling too fast; the caller must widen its interval.
    SlowDown,
    Denied,
    Expired,
}

/// The OAuth half of the Trakt API, as seen by the flow controller and the
/// session.
#[async_trait]
pub trait OAuthApi: Send + Sync {
    async fn request_device_code(&self) -> Result<DeviceCode, AuthError>;

    async fn poll_for_token(&self, code: &DeviceCode) -> Result<PollResult, AuthError>;

    /// Fails with [`AuthError::Upstream`] when Trakt rejects the refresh token.
    async fn refresh_token(&self, refresh_token: &SecretString) -> Result<AuthToken, AuthError>;

    async fn revoke_token(&self, access_token: &SecretString) -> Result<(), AuthError>;
}
