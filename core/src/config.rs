//! Client configuration supplied once by the embedding application.

use crate::error::ConfigError;

/// Public API host used when no override is given.
pub const DEFAULT_BASE_URL: &str = "https://api.pagecraft.co/public";

const ENV_API_TOKEN: &str = "PAGECRAFT_API_TOKEN";
const ENV_PROJECT_ID: &str = "PAGECRAFT_PROJECT_ID";
const ENV_BASE_URL: &str = "PAGECRAFT_BASE_URL";

/// Credentials and project selection for a `PagecraftClient`.
///
/// Immutable once built. `PagecraftClient::new` calls `validate` before any
/// request can be issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_token: String,
    pub project_id: String,
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(api_token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            project_id: project_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Read `PAGECRAFT_API_TOKEN`, `PAGECRAFT_PROJECT_ID` and the optional
    /// `PAGECRAFT_BASE_URL`.
    ///
    /// Missing variables become empty strings, so the failure is reported by
    /// `validate` with the same messages as an explicit empty value.
    pub fn from_env() -> Self {
        let config = Self::new(
            std::env::var(ENV_API_TOKEN).unwrap_or_default(),
            std::env::var(ENV_PROJECT_ID).unwrap_or_default(),
        );
        match std::env::var(ENV_BASE_URL) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(&url),
            _ => config,
        }
    }

    /// Token first, then project id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::MissingApiToken);
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::MissingProjectId);
        }
        Ok(())
    }
}
