use crate::error::ToolError;
use std::sync::Arc;
use trakt_api::Client;
use trakt_auth::{
    AuthError, AuthSession, DeviceFlow, FlowConfig, OAuthApi, Settings, TokenStore, TraktOAuthClient,
};

/// Everything a tool or resource handler needs, shared across requests.
pub struct AppContext {
    api: Client,
    session: Arc<AuthSession>,
    flow: DeviceFlow,
}

impl AppContext {
    pub fn new(settings: &Settings) -> Result<Self, AuthError> {
        let api = Client::builder(settings.client_id.clone())
            .base_url(settings.api_url.clone())
            .timeout(settings.request_timeout())
            .build()?;
        let oauth: Arc<dyn OAuthApi> = Arc::new(TraktOAuthClient::new(
            api.clone(),
            settings.client_secret.clone(),
        ));
        let store = TokenStore::new(settings.token_path()?);
        let session = Arc::new(AuthSession::open(store, oauth.clone())?);
        let flow = DeviceFlow::new(
            oauth,
            session.clone(),
            FlowConfig {
                poll_interval_floor: settings.poll_interval_floor(),
                max_network_retries: settings.max_network_retries,
                ..FlowConfig::default()
            },
        );

        Ok(Self::from_parts(api, session, flow))
    }

    pub fn from_parts(api: Client, session: Arc<AuthSession>, flow: DeviceFlow) -> Self {
        Self { api, session, flow }
    }

    /// Client for public endpoints; no token attached.
    pub fn api(&self) -> &Client {
        &self.api
    }

    /// Client for endpoints that require a signed-in user.
    pub async fn authenticated_api(&self) -> Result<Client, ToolError> {
        match self.session.bearer().await? {
            Some(token) => Ok(self.api.with_bearer(token)),
            None => Err(ToolError::NotAuthenticated),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn flow(&self) -> &DeviceFlow {
        &self.flow
    }
}
