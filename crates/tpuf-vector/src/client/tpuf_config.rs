//! Turbopuffer client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use super::ApiKey;
use crate::error::{Error, Result};

/// Default API endpoint.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.turbopuffer.com/v1/";

/// Namespace used when none is configured.
pub(crate) const DEFAULT_NAMESPACE: &str = "default";

/// Configuration for the turbopuffer store.
///
/// Every field is optional. Unset fields fall back to the public endpoint,
/// the `default` namespace and the `TURBOPUFFER_API_KEY` environment
/// variable.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct TurbopufferConfig {
    /// API key sent as a bearer token
    #[cfg_attr(
        feature = "config",
        arg(
            long = "turbopuffer-api-key",
            env = "TURBOPUFFER_API_KEY",
            hide_env_values = true
        )
    )]
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Namespace all records are written to and queried from
    #[cfg_attr(
        feature = "config",
        arg(long = "turbopuffer-namespace", env = "TURBOPUFFER_NAMESPACE")
    )]
    #[serde(default)]
    pub namespace: Option<String>,

    /// API base URL (e.g., "https://api.turbopuffer.com/v1/")
    #[cfg_attr(
        feature = "config",
        arg(long = "turbopuffer-base-url", env = "TURBOPUFFER_BASE_URL")
    )]
    #[serde(default)]
    pub base_url: Option<Url>,

    /// Request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "turbopuffer-timeout", env = "TURBOPUFFER_TIMEOUT")
    )]
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with every request
    #[cfg_attr(
        feature = "config",
        arg(long = "turbopuffer-user-agent", env = "TURBOPUFFER_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl TurbopufferConfig {
    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the configured user agent or `tpuf-vector/<version>`.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("tpuf-vector/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Returns the configured namespace or `default`.
    pub fn namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Returns the configured base URL or the public endpoint.
    pub fn base_url(&self) -> Result<Url> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Ok(Url::parse(DEFAULT_BASE_URL)?),
        }
    }

    /// Returns the request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolves the API key from the config or the environment.
    pub fn resolve_api_key(&self) -> Result<ApiKey> {
        self.resolve_api_key_with(ApiKey::from_env)
    }

    /// Resolves the API key from the config or the given fallback.
    pub fn resolve_api_key_with<F>(&self, fallback: F) -> Result<ApiKey>
    where
        F: FnOnce() -> Option<ApiKey>,
    {
        ApiKey::resolve(self.api_key.as_deref(), fallback)
    }

    /// Checks values that would only fail later at request time.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(Error::invalid_config("timeout must be greater than 0"));
        }

        if let Some(url) = &self.base_url
            && url.cannot_be_a_base()
        {
            return Err(Error::invalid_config(format!(
                "base url '{url}' cannot be a base"
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for TurbopufferConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurbopufferConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("namespace", &self.namespace)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
