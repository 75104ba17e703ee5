use crate::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use trakt_api::endpoints::oauth::TokenResponse;

/// The only token kind Trakt issues.
pub const TOKEN_KIND: &str = "bearer";

/// How long before expiry a token is proactively refreshed.
pub const REFRESH_MARGIN: Duration = Duration::minutes(5);

/// A Trakt OAuth bearer token.
///
/// Tokens are immutable: a refresh produces a new `AuthToken` that replaces
/// the old one wholesale.
#[derive(Debug, Clone)]
pub struct AuthToken {
    access_token: SecretString,
    refresh_token: SecretString,
    scope: String,
    created_at: i64,
    expires_in: i64,
    expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(
        access_token: SecretString,
        refresh_token: SecretString,
        scope: impl Into<String>,
        created_at: i64,
        expires_in: i64,
    ) -> Result<Self, AuthError> {
        if access_token.expose_secret().is_empty() {
            return Err(AuthError::Validation("access token is empty".to_string()));
        }
        if refresh_token.expose_secret().is_empty() {
            return Err(AuthError::Validation("refresh token is empty".to_string()));
        }
        if expires_in <= 0 {
            return Err(AuthError::Validation(format!(
                "token lifetime must be positive, got {}s",
                expires_in
            )));
        }

        let expires_at = created_at
            .checked_add(expires_in)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .ok_or_else(|| AuthError::Validation("token expiry is out of range".to_string()))?;

        Ok(Self {
            access_token,
            refresh_token,
            scope: scope.into(),
            created_at,
            expires_in,
            expires_at,
        })
    }

    pub fn from_response(response: TokenResponse) -> Result<Self, AuthError> {
        if let Some(kind) = response.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case(TOKEN_KIND) {
                return Err(AuthError::Deserialization(format!(
                    "unsupported token type '{}'",
                    kind
                )));
            }
        }

        Self::new(
            response.access_token,
            response.refresh_token,
            response.scope.unwrap_or_default(),
            response.created_at,
            response.expires_in,
        )
        .map_err(AuthError::into_malformed_response)
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &SecretString {
        &self.refresh_token
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// `now >= created_at + expires_in`, with no margin.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True once the token is within [`REFRESH_MARGIN`] of expiring.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + REFRESH_MARGIN >= self.expires_at
    }

    pub fn to_persisted(&self) -> Result<Vec<u8>, AuthError> {
        let persisted = PersistedTokenRef {
            access_token: self.access_token.expose_secret(),
            refresh_token: self.refresh_token.expose_secret(),
            token_type: TOKEN_KIND,
            scope: &self.scope,
            created_at: self.created_at,
            expires_in: self.expires_in,
        };
        Ok(serde_json::to_vec_pretty(&persisted)?)
    }

    pub fn from_persisted(bytes: &[u8]) -> Result<Self, AuthError> {
        let persisted: PersistedToken = serde_json::from_slice(bytes)?;

        if persisted.token_type != TOKEN_KIND {
            return Err(AuthError::Deserialization(format!(
                "unsupported token type '{}'",
                persisted.token_type
            )));
        }

        Self::new(
            SecretString::from(persisted.access_token),
            SecretString::from(persisted.refresh_token),
            persisted.scope,
            persisted.created_at,
            persisted.expires_in,
        )
        .map_err(AuthError::into_malformed_response)
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.access_token.expose_secret() == other.access_token.expose_secret()
            && self.refresh_token.expose_secret() == other.refresh_token.expose_secret()
            && self.scope == other.scope
            && self.created_at == other.created_at
            && self.expires_in == other.expires_in
    }
}

impl Eq for AuthToken {}

#[derive(Serialize)]
struct PersistedTokenRef<'a> {
    access_token: &'a str,
    refresh_token: &'a str,
    token_type: &'a str,
    scope: &'a str,
    created_at: i64,
    expires_in: i64,
}

#[derive(Deserialize)]
struct PersistedToken {
    access_token: String,
    refresh_token: String,
    token_type: String,
    scope: String,
    created_at: i64,
    expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATED: i64 = 1_700_000_000;
    const TTL: i64 = 7_776_000;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn token(scope: &str) -> AuthToken {
        AuthToken::new(secret("access"), secret("refresh"), scope, CREATED, TTL).unwrap()
    }

    fn at(ts: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(ts, 0).unwrap()
    }

    #[test]
    fn expiry_flips_exactly_at_the_boundary() {
        let token = token("public");
        let boundary = CREATED + TTL;

        assert!(!token.is_expired(at(CREATED)));
        assert!(!token.is_expired(at(boundary - 1)));
        assert!(!token.is_expired(at(boundary) - Duration::milliseconds(1)));
        assert!(token.is_expired(at(boundary)));
        assert!(token.is_expired(at(boundary + 1)));
        assert!(token.is_expired(at(boundary + TTL)));
    }

    #[test]
    fn expiry_is_monotonic_across_a_sweep() {
        let token = AuthToken::new(secret("a"), secret("r"), "", CREATED, 60).unwrap();
        let mut seen_expired = false;
        for offset in -5..=120 {
            let expired = token.is_expired(at(CREATED + offset));
            assert!(!(seen_expired && !expired), "flipped back at offset {}", offset);
            assert_eq!(expired, offset >= 60);
            seen_expired |= expired;
        }
    }

    #[test]
    fn refresh_is_due_inside_the_margin() {
        let token = token("public");
        let expires_at = token.expires_at();

        assert!(!token.needs_refresh(expires_at - REFRESH_MARGIN - Duration::seconds(1)));
        assert!(token.needs_refresh(expires_at - REFRESH_MARGIN));
        assert!(!token.is_expired(expires_at - REFRESH_MARGIN));
    }

    #[test]
    fn persisted_round_trip_preserves_every_field() {
        for scope in ["public", ""] {
            let token = token(scope);
            let bytes = token.to_persisted().unwrap();
            assert_eq!(AuthToken::from_persisted(&bytes).unwrap(), token);
        }
    }

    #[test]
    fn construction_rejects_empty_secrets_and_bad_ttl() {
        assert!(matches!(
            AuthToken::new(secret(""), secret("r"), "", CREATED, TTL),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            AuthToken::new(secret("a"), secret(""), "", CREATED, TTL),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            AuthToken::new(secret("a"), secret("r"), "", CREATED, 0),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn persisted_form_never_defaults_secrets() {
        let missing_refresh = br#"{
            "access_token": "a", "token_type": "bearer", "scope": "public",
            "created_at": 1700000000, "expires_in": 60
        }"#;
        assert!(matches!(
            AuthToken::from_persisted(missing_refresh),
            Err(AuthError::Deserialization(_))
        ));

        let empty_access = br#"{
            "access_token": "", "refresh_token": "r", "token_type": "bearer",
            "scope": "public", "created_at": 1700000000, "expires_in": 60
        }"#;
        assert!(matches!(
            AuthToken::from_persisted(empty_access),
            Err(AuthError::Deserialization(_))
        ));
    }

    #[test]
    fn persisted_form_rejects_wrong_shapes() {
        let wrong_type = br#"{
            "access_token": "a", "refresh_token": "r", "token_type": "bearer",
            "scope": "public", "created_at": "yesterday", "expires_in": 60
        }"#;
        assert!(AuthToken::from_persisted(wrong_type).is_err());

        let wrong_kind = br#"{
            "access_token": "a", "refresh_token": "r", "token_type": "mac",
            "scope": "public", "created_at": 1700000000, "expires_in": 60
        }"#;
        assert!(matches!(
            AuthToken::from_persisted(wrong_kind),
            Err(AuthError::Deserialization(_))
        ));

        assert!(AuthToken::from_persisted(b"{\"access_tok").is_err());
    }

    #[test]
    fn bad_values_from_trakt_are_malformed_responses() {
        let response = |token_type: &str, expires_in: i64| -> TokenResponse {
            serde_json::from_value(serde_json::json!({
                "access_token": "access",
                "token_type": token_type,
                "expires_in": expires_in,
                "refresh_token": "refresh",
                "scope": "public",
                "created_at": CREATED
            }))
            .unwrap()
        };

        assert!(AuthToken::from_response(response("bearer", TTL)).is_ok());
        assert!(matches!(
            AuthToken::from_response(response("mac", TTL)),
            Err(AuthError::Deserialization(_))
        ));
        assert!(matches!(
            AuthToken::from_response(response("bearer", 0)),
            Err(AuthError::Deserialization(_))
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let token = AuthToken::new(secret("sekrit-access"), secret("sekrit-refresh"), "", CREATED, TTL)
            .unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("sekrit"));
    }
}
