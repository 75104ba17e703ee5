use crate::client::{OAuthApi, TokenStore};
use crate::error::AuthError;
use crate::models::AuthToken;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use std::sync::Arc;
use tokio::sync::Mutex;
use trakt_api::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
}

/// Owns the one current token of the process and keeps the persisted copy
/// in step with it.
pub struct AuthSession {
    store: TokenStore,
    oauth: Arc<dyn OAuthApi>,
    current: Mutex<Option<AuthToken>>,
}

impl AuthSession {
    /// Loads the persisted token, if any. A corrupt token file is discarded.
    pub fn open(store: TokenStore, oauth: Arc<dyn OAuthApi>) -> Result<Self, AuthError> {
        let current = match store.load() {
            Ok(token) => token,
            Err(AuthError::Deserialization(reason)) => {
                tracing::warn!(%reason, "Discarding unreadable token file");
                store.clear()?;
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(token) = &current {
            tracing::info!(expires_at = %token.expires_at(), "Loaded saved Trakt token");
        }

        Ok(Self {
            store,
            oauth,
            current: Mutex::new(current),
        })
    }

    pub async fn status(&self, now: DateTime<Utc>) -> AuthStatus {
        let current = self.current.lock().await;
        match current.as_ref() {
            Some(token) => AuthStatus {
                authenticated: !token.is_expired(now),
                expires_at: Some(token.expires_at()),
                scope: Some(token.scope().to_string()),
            },
            None => AuthStatus {
                authenticated: false,
                expires_at: None,
                scope: None,
            },
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.status(Utc::now()).await.authenticated
    }

    /// The access token to send, refreshing it first when it is close to expiry.
    ///
    /// Returns `None` when there is no usable token. If Trakt rejects the
    /// refresh token the saved token is dropped and a new device authorization
    /// is required.
    pub async fn bearer(&self) -> Result<Option<SecretString>, AuthError> {
        let now = Utc::now();
        let mut current = self.current.lock().await;

        let Some(token) = current.as_ref() else {
            return Ok(None);
        };
        if !token.needs_refresh(now) {
            return Ok(Some(token.access_token().clone()));
        }

        tracing::info!(expires_at = %token.expires_at(), "Refreshing Trakt token");
        let fallback = (!token.is_expired(now)).then(|| token.access_token().clone());
        let refreshed = self.oauth.refresh_token(token.refresh_token()).await;

        match refreshed {
            Ok(refreshed) => {
                self.store.save(&refreshed)?;
                let access = refreshed.access_token().clone();
                *current = Some(refreshed);
                Ok(Some(access))
            }
            Err(e @ AuthError::Upstream { status, .. }) if refresh_rejected(status) => {
                tracing::warn!(error = %e, "Refresh token rejected, clearing saved token");
                self.store.clear()?;
                *current = None;
                Ok(None)
            }
            Err(e) => match fallback {
                Some(access) => {
                    tracing::warn!(error = %e, "Token refresh failed, using current token");
                    Ok(Some(access))
                }
                None => Err(e),
            },
        }
    }

    /// Persists `token`, then makes it current.
    pub async fn install(&self, token: AuthToken) -> Result<(), AuthError> {
        let mut current = self.current.lock().await;
        self.store.save(&token)?;
        tracing::info!(expires_at = %token.expires_at(), "Stored new Trakt token");
        *current = Some(token);
        Ok(())
    }

    /// Revokes the token (best effort) and forgets it. Returns whether a token existed.
    pub async fn logout(&self) -> Result<bool, AuthError> {
        let mut current = self.current.lock().await;
        let token = current.take();

        if let Some(token) = &token {
            if let Err(e) = self.oauth.revoke_token(token.access_token()).await {
                tracing::warn!(error = %e, "Failed to revoke token");
            }
        }

        self.store.clear()?;
        Ok(token.is_some())
    }
}

/// Trakt answers a revoked or unknown refresh token with 400 (`invalid_grant`)
/// or 401. Anything else, such as a 5xx during an outage, leaves the token alone.
fn refresh_rejected(status: StatusCode) -> bool {
    matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PollResult;
    use crate::models::DeviceCode;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    enum RefreshBehaviour {
        Succeed,
        Reject,
        Unavailable,
        NetworkDown,
    }

    struct FakeOAuth {
        refresh: RefreshBehaviour,
        refreshes: AtomicUsize,
        revokes: AtomicUsize,
    }

    impl FakeOAuth {
        fn new(refresh: RefreshBehaviour) -> Arc<Self> {
            Arc::new(Self {
                refresh,
                refreshes: AtomicUsize::new(0),
                revokes: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl OAuthApi for FakeOAuth {
        async fn request_device_code(&self) -> Result<DeviceCode, AuthError> {
            unreachable!("not used by the session")
        }

        async fn poll_for_token(&self, _code: &DeviceCode) -> Result<PollResult, AuthError> {
            unreachable!("not used by the session")
        }

        async fn refresh_token(&self, _refresh_token: &SecretString) -> Result<AuthToken, AuthError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            match self.refresh {
                RefreshBehaviour::Succeed => Ok(token("refreshed", Utc::now().timestamp(), 3600)),
                RefreshBehaviour::Reject => Err(AuthError::Upstream {
                    status: StatusCode::UNAUTHORIZED,
                    message: "invalid_grant".to_string(),
                }),
                RefreshBehaviour::Unavailable => Err(AuthError::Upstream {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    message: "service unavailable".to_string(),
                }),
                RefreshBehaviour::NetworkDown => Err(AuthError::Network("connection refused".to_string())),
            }
        }

        async fn revoke_token(&self, _access_token: &SecretString) -> Result<(), AuthError> {
            self.revokes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn token(access: &str, created_at: i64, expires_in: i64) -> AuthToken {
        AuthToken::new(
            SecretString::from(access.to_string()),
            SecretString::from(format!("{}-refresh", access)),
            "public",
            created_at,
            expires_in,
        )
        .unwrap()
    }

    fn fresh(access: &str) -> AuthToken {
        token(access, Utc::now().timestamp(), 7_776_000)
    }

    /// Inside the refresh margin but not yet expired.
    fn nearly_expired(access: &str) -> AuthToken {
        token(access, Utc::now().timestamp() - 3500, 3600)
    }

    fn session_with(dir: &TempDir, saved: Option<AuthToken>, oauth: Arc<FakeOAuth>) -> AuthSession {
        let store = TokenStore::new(dir.path().join("auth_token.json"));
        if let Some(token) = saved {
            store.save(&token).unwrap();
        }
        AuthSession::open(store, oauth).unwrap()
    }

    fn reopen(dir: &TempDir) -> Option<AuthToken> {
        TokenStore::new(dir.path().join("auth_token.json")).load().unwrap()
    }

    #[tokio::test]
    async fn open_without_token_is_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let session = session_with(&dir, None, FakeOAuth::new(RefreshBehaviour::Succeed));

        let status = session.status(Utc::now()).await;
        assert!(!status.authenticated);
        assert!(session.bearer().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn open_discards_corrupt_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("auth_token.json"), b"not json").unwrap();

        let session = session_with(&dir, None, FakeOAuth::new(RefreshBehaviour::Succeed));
        assert!(!session.is_authenticated().await);
        assert!(!dir.path().join("auth_token.json").exists());
    }

    #[tokio::test]
    async fn valid_token_is_used_without_refresh() {
        let dir = TempDir::new().unwrap();
        let oauth = FakeOAuth::new(RefreshBehaviour::Succeed);
        let session = session_with(&dir, Some(fresh("current")), oauth.clone());

        let bearer = session.bearer().await.unwrap().unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&bearer), "current");
        assert_eq!(oauth.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn token_near_expiry_is_replaced_and_persisted() {
        let dir = TempDir::new().unwrap();
        let oauth = FakeOAuth::new(RefreshBehaviour::Succeed);
        let session = session_with(&dir, Some(nearly_expired("old")), oauth.clone());

        let bearer = session.bearer().await.unwrap().unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&bearer), "refreshed");
        assert_eq!(oauth.refreshes.load(Ordering::SeqCst), 1);

        let saved = reopen(&dir).unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(saved.access_token()), "refreshed");
    }

    #[tokio::test]
    async fn rejected_refresh_forgets_the_token() {
        let dir = TempDir::new().unwrap();
        let session = session_with(&dir, Some(nearly_expired("old")), FakeOAuth::new(RefreshBehaviour::Reject));

        assert!(session.bearer().await.unwrap().is_none());
        assert!(!session.is_authenticated().await);
        assert!(reopen(&dir).is_none());
    }

    #[tokio::test]
    async fn server_error_keeps_unexpired_token() {
        let dir = TempDir::new().unwrap();
        let session =
            session_with(&dir, Some(nearly_expired("old")), FakeOAuth::new(RefreshBehaviour::Unavailable));

        let bearer = session.bearer().await.unwrap().unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&bearer), "old");
        assert!(session.is_authenticated().await);
        assert!(reopen(&dir).is_some());
    }

    #[tokio::test]
    async fn server_error_on_expired_token_surfaces_and_keeps_it() {
        let dir = TempDir::new().unwrap();
        let expired = token("old", Utc::now().timestamp() - 7200, 3600);
        let session = session_with(&dir, Some(expired), FakeOAuth::new(RefreshBehaviour::Unavailable));

        assert!(matches!(session.bearer().await, Err(AuthError::Upstream { .. })));
        assert!(reopen(&dir).is_some());
    }

    #[tokio::test]
    async fn network_failure_keeps_unexpired_token() {
        let dir = TempDir::new().unwrap();
        let session =
            session_with(&dir, Some(nearly_expired("old")), FakeOAuth::new(RefreshBehaviour::NetworkDown));

        let bearer = session.bearer().await.unwrap().unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&bearer), "old");
        assert!(reopen(&dir).is_some());
    }

    #[tokio::test]
    async fn network_failure_on_expired_token_surfaces() {
        let dir = TempDir::new().unwrap();
        let expired = token("old", Utc::now().timestamp() - 7200, 3600);
        let session = session_with(&dir, Some(expired), FakeOAuth::new(RefreshBehaviour::NetworkDown));

        assert!(matches!(session.bearer().await, Err(AuthError::Network(_))));
    }

    #[tokio::test]
    async fn install_persists_before_use() {
        let dir = TempDir::new().unwrap();
        let session = session_with(&dir, None, FakeOAuth::new(RefreshBehaviour::Succeed));

        let token = fresh("new");
        session.install(token.clone()).await.unwrap();

        assert_eq!(reopen(&dir), Some(token));
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn logout_revokes_and_clears() {
        let dir = TempDir::new().unwrap();
        let oauth = FakeOAuth::new(RefreshBehaviour::Succeed);
        let session = session_with(&dir, Some(fresh("current")), oauth.clone());

        assert!(session.logout().await.unwrap());
        assert_eq!(oauth.revokes.load(Ordering::SeqCst), 1);
        assert!(reopen(&dir).is_none());
        assert!(!session.logout().await.unwrap());
    }
}
