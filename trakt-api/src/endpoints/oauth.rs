use crate::request::{EmptyResponse, Method, Request, RequestData};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Redirect URI Trakt expects for out-of-band (device) clients.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

// Common

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCodeResponse {
    #[serde(deserialize_with = "crate::secret::conceal")]
    pub device_code: SecretString,
    pub user_code: String,
    pub verification_url: String,
    pub expires_in: i64,
    pub interval: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(deserialize_with = "crate::secret::conceal")]
    pub access_token: SecretString,
    pub token_type: Option<String>,
    pub expires_in: i64,
    #[serde(deserialize_with = "crate::secret::conceal")]
    pub refresh_token: SecretString,
    pub scope: Option<String>,
    pub created_at: i64,
}

/// Everything `POST /oauth/device/token` can tell us about a pending device code.
#[derive(Debug, Clone)]
pub enum DeviceTokenOutcome {
    Granted(TokenResponse),
    /// The user has not acted on the code yet.
    Pending,
    /// We polled faster than the advertised interval.
    SlowDown,
    /// The user declined, or the code was already used.
    Denied,
    /// The code is unknown to Trakt or past its lifetime.
    Expired,
}

impl DeviceTokenOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            DeviceTokenOutcome::Granted(_) => "granted",
            DeviceTokenOutcome::Pending => "pending",
            DeviceTokenOutcome::SlowDown => "slow_down",
            DeviceTokenOutcome::Denied => "denied",
            DeviceTokenOutcome::Expired => "expired",
        }
    }
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct RequestDeviceCode {
    client_id: String,
}

impl RequestDeviceCode {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

impl Request for RequestDeviceCode {
    type Data = Self;
    type Response = DeviceCodeResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/oauth/device/code".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// One poll of the device token endpoint. Send it with
/// [`Client::poll_device_token`](crate::Client::poll_device_token) so the
/// pending/denied/expired statuses are decoded instead of treated as errors.
#[derive(Debug, Clone, Serialize)]
pub struct PollDeviceToken {
    #[serde(serialize_with = "crate::secret::expose")]
    code: SecretString,
    client_id: String,
    #[serde(serialize_with = "crate::secret::expose")]
    client_secret: SecretString,
}

impl PollDeviceToken {
    pub fn new(code: SecretString, client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            code,
            client_id: client_id.into(),
            client_secret,
        }
    }
}

impl Request for PollDeviceToken {
    type Data = Self;
    type Response = TokenResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/oauth/device/token".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExchangeRefreshToken {
    #[serde(serialize_with = "crate::secret::expose")]
    refresh_token: SecretString,
    client_id: String,
    #[serde(serialize_with = "crate::secret::expose")]
    client_secret: SecretString,
    redirect_uri: &'static str,
    grant_type: &'static str,
}

impl ExchangeRefreshToken {
    pub fn new(
        refresh_token: SecretString,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Self {
        Self {
            refresh_token,
            client_id: client_id.into(),
            client_secret,
            redirect_uri: OOB_REDIRECT_URI,
            grant_type: "refresh_token",
        }
    }
}

impl Request for ExchangeRefreshToken {
    type Data = Self;
    type Response = TokenResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/oauth/token".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RevokeToken {
    #[serde(serialize_with = "crate::secret::expose")]
    token: SecretString,
    client_id: String,
    #[serde(serialize_with = "crate::secret::expose")]
    client_secret: SecretString,
}

impl RevokeToken {
    pub fn new(token: SecretString, client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            token,
            client_id: client_id.into(),
            client_secret,
        }
    }
}

impl Request for RevokeToken {
    type Data = Self;
    type Response = EmptyResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/oauth/revoke".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}
