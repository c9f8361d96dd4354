//! Panel configuration
//!
//! Read from a TOML file, then overridden by `ZENDESK_*` environment
//! variables.

use crate::{
    domain::ReloadPolicy,
    error::{Result, TriageError},
};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use tokio::fs;

/// Viewport size requested from the host at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: String,
    pub height: String,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: "100%".to_string(),
            height: "450px".to_string(),
        }
    }
}

/// HTTP client settings for the ticket request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            connect_timeout_secs: 30,
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Account subdomain, as in `{subdomain}.zendesk.com`
    pub subdomain: String,

    /// Agent email for API token auth
    pub email: Option<String>,

    #[serde(skip_serializing)]
    pub api_token: Option<String>,

    /// Overrides `https://{subdomain}.zendesk.com` for API calls
    pub api_base_url: Option<String>,

    pub reload_policy: ReloadPolicy,

    pub viewport: Viewport,

    pub http: HttpConfig,
}

impl fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelConfig")
            .field("subdomain", &self.subdomain)
            .field("email", &self.email)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("reload_policy", &self.reload_policy)
            .field("viewport", &self.viewport)
            .field("http", &self.http)
            .finish()
    }
}

impl PanelConfig {
    pub const ENV_SUBDOMAIN: &'static str = "ZENDESK_SUBDOMAIN";
    pub const ENV_EMAIL: &'static str = "ZENDESK_EMAIL";
    pub const ENV_API_TOKEN: &'static str = "ZENDESK_API_TOKEN";

    /// Config for an account with no credentials
    pub fn for_subdomain(subdomain: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            ..Self::default()
        }
    }

    /// Loads config from a TOML file; a missing file yields defaults
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| TriageError::ConfigError(format!("Invalid config: {}", e)))
    }

    /// Applies `ZENDESK_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(subdomain) = non_empty(Self::ENV_SUBDOMAIN) {
            self.subdomain = subdomain;
        }
        if let Some(email) = non_empty(Self::ENV_EMAIL) {
            self.email = Some(email);
        }
        if let Some(token) = non_empty(Self::ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        self
    }

    /// Checks the fields the Zendesk client cannot do without
    pub fn validate(&self) -> Result<()> {
        let subdomain = self.subdomain.trim();
        if subdomain.is_empty() {
            return Err(TriageError::ConfigError(format!(
                "subdomain is not set. Set {} or add `subdomain` to the config file",
                Self::ENV_SUBDOMAIN
            )));
        }
        if !subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(TriageError::ConfigError(format!(
                "subdomain {:?} contains invalid characters",
                subdomain
            )));
        }
        if self.api_token.is_some() && self.email.is_none() {
            return Err(TriageError::ConfigError(
                "api_token requires email to be set".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL for REST calls
    pub fn api_base_url(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.zendesk.com", self.subdomain.trim()),
        }
    }
}
