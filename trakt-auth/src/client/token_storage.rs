use crate::error::AuthError;
use crate::models::AuthToken;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

const TOKEN_FILE: &str = "auth_token.json";
const APP_DIR: &str = "trakt-mcp";

/// Persists the current token as a single JSON file.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader sees either the previous token or the new one, never a partial file.
pub struct TokenStore {
    token_path: PathBuf,
    write_lock: Mutex<()>,
}

impl TokenStore {
    pub fn new(token_path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: token_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `<cache dir>/trakt-mcp/auth_token.json`
    pub fn default_path() -> Result<PathBuf, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?;
        Ok(cache_dir.join(APP_DIR).join(TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    pub fn load(&self) -> Result<Option<AuthToken>, AuthError> {
        let bytes = match fs::read(&self.token_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AuthError::TokenStorage(format!("Failed to read token: {}", e))),
        };

        AuthToken::from_persisted(&bytes).map(Some)
    }

    pub fn save(&self, token: &AuthToken) -> Result<(), AuthError> {
        let bytes = token.to_persisted()?;
        let _guard = self.lock()?;

        if let Some(dir) = self.token_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create token directory: {}", e))
                })?;
            }
        }

        let temp_path = self.temp_path();
        let result = write_private(&temp_path, &bytes).and_then(|()| {
            fs::rename(&temp_path, &self.token_path)
                .map_err(|e| AuthError::TokenStorage(format!("Failed to replace token file: {}", e)))
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result?;

        tracing::debug!(path = %self.token_path.display(), "Saved token");
        Ok(())
    }

    /// Removes the token file. Succeeds when there is nothing to remove.
    pub fn clear(&self) -> Result<(), AuthError> {
        let _guard = self.lock()?;
        match fs::remove_file(&self.token_path) {
            Ok(()) => {
                tracing::debug!(path = %self.token_path.display(), "Removed token");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStorage(format!("Failed to delete token: {}", e))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, AuthError> {
        self.write_lock
            .lock()
            .map_err(|_| AuthError::TokenStorage("Token store lock poisoned".to_string()))
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .token_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| TOKEN_FILE.to_string());
        self.token_path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
    }
}

fn write_private(path: &Path, bytes: &[u8]) -> Result<(), AuthError> {
    let mut file = open_private(path)
        .map_err(|e| AuthError::TokenStorage(format!("Failed to create token file: {}", e)))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(|e| AuthError::TokenStorage(format!("Failed to write token: {}", e)))
}

fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use tempfile::TempDir;

    fn token(access: &str) -> AuthToken {
        AuthToken::new(
            SecretString::from(access.to_string()),
            SecretString::from("refresh".to_string()),
            "public",
            1_700_000_000,
            7_776_000,
        )
        .unwrap()
    }

    fn store(dir: &TempDir) -> TokenStore {
        TokenStore::new(dir.path().join("nested").join(TOKEN_FILE))
    }

    fn leftover_temp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "tmp"))
            .collect()
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&token("first")).unwrap();
        store.save(&token("second")).unwrap();

        assert_eq!(store.load().unwrap(), Some(token("second")));
        assert!(leftover_temp_files(store.path().parent().unwrap()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&token("first")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_a_deserialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TOKEN_FILE);
        fs::write(&path, b"{\"access_token\": \"abc\", \"refr").unwrap();

        let err = TokenStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AuthError::Deserialization(_)));
    }

    #[test]
    fn interrupted_write_leaves_previous_token_readable() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&token("first")).unwrap();

        // A crash after the temp file was partly written but before the rename
        let partial = token("second").to_persisted().unwrap();
        fs::write(store.temp_path(), &partial[..partial.len() / 2]).unwrap();

        assert_eq!(store.load().unwrap(), Some(token("first")));
    }

    #[test]
    fn interrupted_first_write_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        let partial = token("first").to_persisted().unwrap();
        fs::write(store.temp_path(), &partial[..10]).unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn failed_rename_cleans_up_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join(TOKEN_FILE);
        // A non-empty directory at the target path makes the rename fail
        fs::create_dir_all(target.join("occupied")).unwrap();

        let store = TokenStore::new(&target);
        assert!(store.save(&token("first")).is_err());
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&token("first")).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn concurrent_saves_never_interleave() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(store(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.save(&token(&format!("token-{}", i))).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let loaded = store.load().unwrap().unwrap();
        assert!((0..8).any(|i| loaded == token(&format!("token-{}", i))));
    }
}
