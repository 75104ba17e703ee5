use crate::error::AuthError;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use trakt_api::endpoints::oauth::DeviceCodeResponse;

pub const DEFAULT_VERIFICATION_URL: &str = "https://trakt.tv/activate";

/// A pending device-authorization grant.
#[derive(Debug, Clone)]
pub struct DeviceCode {
    device_code: SecretString,
    user_code: String,
    verification_url: String,
    interval: u64,
    expires_in: u64,
    issued_at: DateTime<Utc>,
}

impl DeviceCode {
    pub fn new(
        device_code: SecretString,
        user_code: impl Into<String>,
        verification_url: impl Into<String>,
        interval: i64,
        expires_in: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        let user_code = user_code.into();
        if device_code.expose_secret().is_empty() {
            return Err(AuthError::Validation("device code is empty".to_string()));
        }
        if user_code.is_empty() {
            return Err(AuthError::Validation("user code is empty".to_string()));
        }
        let interval = u64::try_from(interval)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| AuthError::Validation(format!("poll interval must be positive, got {}", interval)))?;
        let expires_in = u64::try_from(expires_in)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| AuthError::Validation(format!("expiry must be positive, got {}", expires_in)))?;

        let verification_url = verification_url.into();
        let verification_url = if verification_url.is_empty() {
            DEFAULT_VERIFICATION_URL.to_string()
        } else {
            verification_url
        };

        Ok(Self {
            device_code,
            user_code,
            verification_url,
            interval,
            expires_in,
            issued_at,
        })
    }

    pub fn from_response(response: DeviceCodeResponse, issued_at: DateTime<Utc>) -> Result<Self, AuthError> {
        Self::new(
            response.device_code,
            response.user_code,
            response.verification_url,
            response.interval,
            response.expires_in,
            issued_at,
        )
        .map_err(AuthError::into_malformed_response)
    }

    pub fn device_code(&self) -> &SecretString {
        &self.device_code
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn verification_url(&self) -> &str {
        &self.verification_url
    }

    /// Minimum spacing between token polls.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn expires_in(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + chrono::Duration::seconds(self.expires_in as i64)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn code(interval: i64, expires_in: i64) -> Result<DeviceCode, AuthError> {
        DeviceCode::new(
            SecretString::from("device".to_string()),
            "ABCD1234",
            "https://trakt.tv/activate",
            interval,
            expires_in,
            issued(),
        )
    }

    #[test]
    fn rejects_non_positive_interval_and_expiry() {
        for (interval, expires_in) in [(0, 600), (-5, 600), (5, 0), (5, -1)] {
            assert!(
                matches!(code(interval, expires_in), Err(AuthError::Validation(_))),
                "interval={} expires_in={}",
                interval,
                expires_in
            );
        }
    }

    #[test]
    fn rejects_empty_codes() {
        let empty_device = DeviceCode::new(
            SecretString::from(String::new()),
            "ABCD",
            "",
            5,
            600,
            issued(),
        );
        assert!(matches!(empty_device, Err(AuthError::Validation(_))));

        let empty_user = DeviceCode::new(
            SecretString::from("device".to_string()),
            "",
            "",
            5,
            600,
            issued(),
        );
        assert!(matches!(empty_user, Err(AuthError::Validation(_))));
    }

    #[test]
    fn expires_exactly_at_issue_plus_lifetime() {
        let code = code(5, 600).unwrap();
        let boundary = issued() + chrono::Duration::seconds(600);

        assert!(!code.is_expired(issued()));
        assert!(!code.is_expired(boundary - chrono::Duration::seconds(1)));
        assert!(code.is_expired(boundary));
        assert_eq!(code.interval(), Duration::from_secs(5));
    }

    #[test]
    fn bad_values_from_trakt_are_malformed_responses() {
        let response: DeviceCodeResponse = serde_json::from_value(serde_json::json!({
            "device_code": "device",
            "user_code": "ABCD1234",
            "verification_url": "https://trakt.tv/activate",
            "expires_in": 600,
            "interval": 0
        }))
        .unwrap();

        let err = DeviceCode::from_response(response, issued()).unwrap_err();
        assert!(matches!(err, AuthError::Deserialization(_)), "{:?}", err);
    }

    #[test]
    fn blank_verification_url_falls_back_to_trakt() {
        let code = DeviceCode::new(
            SecretString::from("device".to_string()),
            "ABCD",
            "",
            5,
            600,
            issued(),
        )
        .unwrap();
        assert_eq!(code.verification_url(), DEFAULT_VERIFICATION_URL);
    }
}
