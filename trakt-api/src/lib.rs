pub mod endpoints;
mod error;
mod macros;
pub mod pagination;
pub mod repositories;
mod request;
mod secret;

pub use crate::error::{ErrorDetail, TraktApiError};
pub use crate::pagination::{Page, Pagination};
pub use crate::request::{EmptyResponse, Method, Request as ApiRequest, RequestData};
pub use reqwest::StatusCode;

use endpoints::oauth::{DeviceTokenOutcome, PollDeviceToken};
use repositories::*;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const BASE_URL: &str = "https://api.trakt.tv";
pub const API_VERSION: &str = "2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Thin wrapper over a pooled `reqwest::Client` that knows how to talk to Trakt.
///
/// Every call carries the `trakt-api-version` and `trakt-api-key` headers. A bearer
/// token is attached whenever one is present; requests that declare
/// [`ApiRequest::AUTHENTICATED`] fail fast without one.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    bearer: Option<SecretString>,
}

pub struct ClientBuilder {
    base_url: String,
    client_id: String,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client, TraktApiError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| TraktApiError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Client {
            http,
            base_url: self.base_url,
            client_id: self.client_id,
            bearer: None,
        })
    }
}

impl Client {
    pub fn builder(client_id: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            base_url: BASE_URL.to_string(),
            client_id: client_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn new(client_id: impl Into<String>) -> Result<Self, TraktApiError> {
        Self::builder(client_id).build()
    }

    /// Returns a copy of this client that authenticates with `access_token`.
    /// The underlying connection pool is shared.
    pub fn with_bearer(&self, access_token: SecretString) -> Self {
        Self {
            bearer: Some(access_token),
            ..self.clone()
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer.is_some()
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, TraktApiError>
    where
        R: ApiRequest,
    {
        let response = self.execute(&request).await?;
        let response = error_for_status(response).await?;
        parse_body(response).await
    }

    /// Like [`Client::send`] for list endpoints, but also reads the
    /// `X-Pagination-*` response headers.
    pub async fn send_paginated<R, T>(&self, request: R) -> Result<Page<T>, TraktApiError>
    where
        R: ApiRequest<Response = Vec<T>>,
        T: DeserializeOwned,
    {
        let response = self.execute(&request).await?;
        let response = error_for_status(response).await?;
        let pagination = Pagination::from_headers(response.headers());
        let items: Vec<T> = parse_body(response).await?;
        Ok(Page::new(items, pagination))
    }

    /// Polls the device token endpoint once and maps Trakt's status codes onto
    /// the closed set of device-flow outcomes.
    pub async fn poll_device_token(
        &self,
        request: PollDeviceToken,
    ) -> Result<DeviceTokenOutcome, TraktApiError> {
        let response = self.execute(&request).await?;
        let status = response.status();

        let outcome = match status.as_u16() {
            _ if status.is_success() => DeviceTokenOutcome::Granted(parse_body(response).await?),
            400 => DeviceTokenOutcome::Pending,
            429 => DeviceTokenOutcome::SlowDown,
            // 409: code already approved/used, 418: user explicitly denied
            409 | 418 => DeviceTokenOutcome::Denied,
            // 404: code unknown to Trakt, 410: code expired
            404 | 410 => DeviceTokenOutcome::Expired,
            _ => {
                let body = response.text().await.unwrap_or_default();
                return Err(TraktApiError::upstream(status, &body));
            }
        };

        tracing::debug!(status = %status, outcome = outcome.name(), "Polled device token");
        Ok(outcome)
    }

    async fn execute<R>(&self, request: &R) -> Result<reqwest::Response, TraktApiError>
    where
        R: ApiRequest,
    {
        let endpoint = request.endpoint();
        let url = format!("{}{}", self.base_url, endpoint);

        let mut builder = self
            .http
            .request(R::METHOD, &url)
            .headers(self.default_headers()?);

        match &self.bearer {
            Some(token) => builder = builder.bearer_auth(token.expose_secret()),
            None if R::AUTHENTICATED => return Err(TraktApiError::Unauthenticated),
            None => {}
        }

        builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Query(query) => builder.query(query),
            RequestData::Json(body) => builder.json(body),
        };

        tracing::debug!(method = %R::METHOD, endpoint = %endpoint, "Sending Trakt request");
        Ok(builder.send().await?)
    }

    fn default_headers(&self) -> Result<HeaderMap, TraktApiError> {
        let client_id = HeaderValue::from_str(&self.client_id).map_err(|_| {
            TraktApiError::Configuration("Client id is not a valid header value".to_string())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("trakt-api-version", HeaderValue::from_static(API_VERSION));
        headers.insert("trakt-api-key", client_id);
        Ok(headers)
    }
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, TraktApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = %status, "Trakt returned an error status");
    Err(TraktApiError::upstream(status, &body))
}

async fn parse_body<T>(response: reqwest::Response) -> Result<T, TraktApiError>
where
    T: DeserializeOwned,
{
    let bytes = response.bytes().await?;
    // 204 and other empty bodies are decoded as JSON null
    let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
    serde_json::from_slice(body).map_err(TraktApiError::Deserialization)
}

pub struct Request;

impl Request {
    pub fn oauth() -> OAuthRepository {
        OAuthRepository::new()
    }

    pub fn shows() -> ShowRepository {
        ShowRepository::new()
    }

    pub fn movies() -> MovieRepository {
        MovieRepository::new()
    }

    pub fn search() -> SearchRepository {
        SearchRepository::new()
    }

    pub fn sync() -> SyncRepository {
        SyncRepository::new()
    }

    pub fn checkin() -> CheckinRepository {
        CheckinRepository::new()
    }

    pub fn comments() -> CommentRepository {
        CommentRepository::new()
    }

    pub fn recommendations() -> RecommendationRepository {
        RecommendationRepository::new()
    }
}
