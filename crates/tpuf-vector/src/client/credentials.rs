//! Authentication credentials for turbopuffer.

use std::fmt;

use crate::error::{Error, Result};

/// API key used as the bearer token for every request.
///
/// The key is never printed: `Debug` shows a redacted placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variable consulted when no key is configured.
    pub const ENV_VAR: &'static str = "TURBOPUFFER_API_KEY";

    /// Creates an API key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads the key from [`Self::ENV_VAR`], ignoring empty values.
    pub fn from_env() -> Option<Self> {
        std::env::var(Self::ENV_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self)
    }

    /// Picks the explicit key when present and non-empty, otherwise the
    /// fallback's key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when neither yields a key.
    pub fn resolve<F>(explicit: Option<&str>, fallback: F) -> Result<Self>
    where
        F: FnOnce() -> Option<Self>,
    {
        explicit
            .filter(|key| !key.is_empty())
            .map(Self::new)
            .or_else(|| fallback().filter(|key| !key.0.is_empty()))
            .ok_or(Error::MissingCredential)
    }

    /// Returns the raw key for the authorization header.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let key = ApiKey::resolve(Some("explicit"), || Some(ApiKey::new("env"))).unwrap();
        assert_eq!(key.expose(), "explicit");
    }

    #[test]
    fn test_falls_back_when_absent() {
        let key = ApiKey::resolve(None, || Some(ApiKey::new("env"))).unwrap();
        assert_eq!(key.expose(), "env");

        let key = ApiKey::resolve(Some(""), || Some(ApiKey::new("env"))).unwrap();
        assert_eq!(key.expose(), "env");
    }

    #[test]
    fn test_missing_credential() {
        let err = ApiKey::resolve(None, || None).unwrap_err();
        assert!(matches!(err, Error::MissingCredential));

        let err = ApiKey::resolve(None, || Some(ApiKey::new(""))).unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
    }

    #[test]
    fn test_debug_redacts() {
        let rendered = format!("{:?}", ApiKey::new("tpuf_secret_123"));
        assert!(!rendered.contains("tpuf_secret_123"));
        assert_eq!(rendered, "ApiKey(<redacted>)");
    }
}
