//! Client configuration read from the environment with sensible defaults.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const ENV_API_BASE_URL: &str = "MIRA_API_BASE_URL";
pub const ENV_SESSION_DIR: &str = "MIRA_SESSION_DIR";
pub const ENV_LOGIN_PAGE: &str = "MIRA_LOGIN_PAGE";
pub const ENV_HOME_PAGE: &str = "MIRA_HOME_PAGE";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_SESSION_DIR: &str = ".mira";
pub const DEFAULT_LOGIN_PAGE: &str = "login.html";
pub const DEFAULT_HOME_PAGE: &str = "home.html";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// HTTP origin plus `/api` prefix; endpoints are appended verbatim.
    pub base_url: String,
    /// Directory holding the durable session document.
    pub session_dir: PathBuf,
    pub login_page: String,
    pub home_page: String,
}

impl ClientConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, ConfigError> {
        let cfg = Self { base_url: normalize_base(base_url.into()), ..Default::default() };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = Self {
            base_url: normalize_base(
                env::var(ENV_API_BASE_URL).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            ),
            session_dir: env::var(ENV_SESSION_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_DIR)),
            login_page: env::var(ENV_LOGIN_PAGE).unwrap_or_else(|_| DEFAULT_LOGIN_PAGE.to_string()),
            home_page: env::var(ENV_HOME_PAGE).unwrap_or_else(|_| DEFAULT_HOME_PAGE.to_string()),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            home_page: DEFAULT_HOME_PAGE.to_string(),
        }
    }
}

// Endpoints start with '/', so a trailing slash on the base would double up.
fn normalize_base(mut s: String) -> String {
    while s.ends_with('/') { s.pop(); }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:5001/api");
        assert_eq!(cfg.login_page, "login.html");
        assert_eq!(cfg.home_page, "home.html");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = ClientConfig::new("http://127.0.0.1:9000/api/").unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:9000/api");
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(ClientConfig::new("not a url").is_err());
        let err = ClientConfig::new("ftp://example.com/api").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }
}
