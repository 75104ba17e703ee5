use crate::client::TokenStore;
use crate::error::AuthError;
use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime configuration, read from an optional `config.toml` and then from
/// `TRAKT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub client_id: String,
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub client_secret: SecretString,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_poll_interval_floor")]
    pub poll_interval_floor_seconds: u64,
    #[serde(default = "default_max_network_retries")]
    pub max_network_retries: u32,
    pub token_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

/// `TRAKT_CLIENT_ID`, `TRAKT_TOKEN_PATH`, ... Every setting is top-level, so
/// no nesting separator is configured.
fn environment() -> Environment {
    Environment::with_prefix("TRAKT")
        .prefix_separator("_")
        .try_parsing(true)
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn default_api_url() -> String {
    trakt_api::BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_poll_interval_floor() -> u64 {
    5
}

fn default_max_network_retries() -> u32 {
    3
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("TRAKT_MCP_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::from_file(config_path)
    }

    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(config_path, environment())
    }

    fn load(config_path: impl AsRef<Path>, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(config_path.as_ref()).required(false))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.trim().is_empty() {
            return Err("client_id is required (set TRAKT_CLIENT_ID)".to_string());
        }
        if self.client_secret.expose_secret().trim().is_empty() {
            return Err("client_secret is required (set TRAKT_CLIENT_SECRET)".to_string());
        }
        if !(1..=300).contains(&self.request_timeout_seconds) {
            return Err("request_timeout_seconds must be between 1 and 300".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err("api_url must be a valid HTTP(S) URL".to_string());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn poll_interval_floor(&self) -> Duration {
        Duration::from_secs(self.poll_interval_floor_seconds)
    }

    pub fn token_path(&self) -> Result<PathBuf, AuthError> {
        match &self.token_path {
            Some(path) => Ok(path.clone()),
            None => TokenStore::default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load(contents: &str) -> Settings {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        Settings::from_file(file.path()).unwrap()
    }

    #[test]
    fn file_values_and_defaults() {
        let settings = load(
            r#"
            client_id = "abc"
            client_secret = "shh"
            token_path = "/tmp/trakt/token.json"
            "#,
        );

        assert_eq!(settings.client_id, "abc");
        assert_eq!(settings.client_secret.expose_secret(), "shh");
        assert_eq!(settings.api_url, trakt_api::BASE_URL);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.poll_interval_floor(), Duration::from_secs(5));
        assert_eq!(settings.max_network_retries, 3);
        assert_eq!(
            settings.token_path().unwrap(),
            PathBuf::from("/tmp/trakt/token.json")
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_credentials_fail_validation() {
        let settings = load("client_id = \"abc\"\n");
        let err = settings.validate().unwrap_err();
        assert!(err.contains("client_secret"));
    }

    #[test]
    fn timeout_must_be_bounded() {
        let settings = load(
            r#"
            client_id = "abc"
            client_secret = "shh"
            request_timeout_seconds = 0
            "#,
        );
        assert!(settings.validate().is_err());
    }

    #[test]
    fn api_url_must_be_http() {
        let settings = load(
            r#"
            client_id = "abc"
            client_secret = "shh"
            api_url = "ftp://api.trakt.tv"
            "#,
        );
        assert!(settings.validate().is_err());
    }

    fn load_env(vars: &[(&str, &str)]) -> Settings {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::load("/nonexistent/config.toml", environment().source(Some(vars))).unwrap()
    }

    #[test]
    fn environment_uses_single_underscore_names() {
        let settings = load_env(&[
            ("TRAKT_CLIENT_ID", "from-env"),
            ("TRAKT_CLIENT_SECRET", "env-secret"),
            ("TRAKT_TOKEN_PATH", "/tmp/env/token.json"),
            ("TRAKT_REQUEST_TIMEOUT_SECONDS", "12"),
            ("TRAKT_MAX_NETWORK_RETRIES", "5"),
        ]);

        assert_eq!(settings.client_id, "from-env");
        assert_eq!(settings.client_secret.expose_secret(), "env-secret");
        assert_eq!(settings.token_path().unwrap(), PathBuf::from("/tmp/env/token.json"));
        assert_eq!(settings.request_timeout(), Duration::from_secs(12));
        assert_eq!(settings.max_network_retries, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn environment_ignores_double_underscore_names() {
        let settings = load_env(&[("TRAKT__CLIENT_ID", "nested")]);
        assert_eq!(settings.client_id, "");
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"client_id = \"from-file\"\nclient_secret = \"shh\"\n").unwrap();
        let vars = [("TRAKT_CLIENT_ID".to_string(), "from-env".to_string())]
            .into_iter()
            .collect();

        let settings = Settings::load(file.path(), environment().source(Some(vars))).unwrap();
        assert_eq!(settings.client_id, "from-env");
        assert_eq!(settings.client_secret.expose_secret(), "shh");
    }

    #[test]
    fn debug_does_not_leak_the_secret() {
        let settings = load("client_id = \"abc\"\nclient_secret = \"hunter2\"\n");
        assert!(!format!("{:?}", settings).contains("hunter2"));
    }
}
