use super::{OAuthApi, PollResult};
use crate::error::AuthError;
use crate::models::{AuthToken, DeviceCode};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use trakt_api::endpoints::oauth::DeviceTokenOutcome;
use trakt_api::{Client, Request};

/// [`OAuthApi`] over the real Trakt endpoints.
pub struct TraktOAuthClient {
    api: Client,
    client_secret: SecretString,
}

impl TraktOAuthClient {
    pub fn new(api: Client, client_secret: SecretString) -> Self {
        Self { api, client_secret }
    }
}

#[async_trait]
impl OAuthApi for TraktOAuthClient {
    async fn request_device_code(&self) -> Result<DeviceCode, AuthError> {
        let response = self
            .api
            .send(Request::oauth().device_code(self.api.client_id()))
            .await?;

        DeviceCode::from_response(response, Utc::now())
    }

    async fn poll_for_token(&self, code: &DeviceCode) -> Result<PollResult, AuthError> {
        let request = Request::oauth().device_token(
            code.device_code().clone(),
            self.api.client_id(),
            self.client_secret.clone(),
        );

        let result = match self.api.poll_device_token(request).await? {
            DeviceTokenOutcome::Granted(response) => PollResult::Granted(AuthToken::from_response(response)?),
            DeviceTokenOutcome::Pending => PollResult::Pending,
            DeviceTokenOutcome::SlowDown => PollResult::SlowDown,
            DeviceTokenOutcome::Denied => PollResult::Denied,
            DeviceTokenOutcome::Expired => PollResult::Expired,
        };
        Ok(result)
    }

    async fn refresh_token(&self, refresh_token: &SecretString) -> Result<AuthToken, AuthError> {
        let response = self
            .api
            .send(Request::oauth().refresh(
                refresh_token.clone(),
                self.api.client_id(),
                self.client_secret.clone(),
            ))
            .await?;

        AuthToken::from_response(response)
    }

    async fn revoke_token(&self, access_token: &SecretString) -> Result<(), AuthError> {
        self.api
            .send(Request::oauth().revoke(
                access_token.clone(),
                self.api.client_id(),
                self.client_secret.clone(),
            ))
            .await?;
        Ok(())
    }
}
