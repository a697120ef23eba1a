//! API credentials read from the process environment.

use scriptsmith_error::{ConfigError, ScriptsmithResult};
use tracing::{debug, instrument, warn};

/// Chat completions key; required.
pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
/// Web search key; optional.
pub const SERPER_API_KEY: &str = "SERPER_API_KEY";
/// Originality service key; optional.
pub const COPYSCAPE_API_KEY: &str = "COPYSCAPE_API_KEY";
/// Originality service account name; optional.
pub const COPYSCAPE_USERNAME: &str = "COPYSCAPE_USERNAME";

/// Account name and key for the originality service.
#[derive(Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct CopyscapeCredentials {
    /// Account name.
    username: String,
    /// API key.
    api_key: String,
}

impl CopyscapeCredentials {
    /// Create originality credentials.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for CopyscapeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyscapeCredentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Every credential a run may use.
///
/// # Examples
///
/// ```
/// use scriptsmith_models::Credentials;
///
/// let credentials = Credentials::new("sk-or-test");
/// assert!(credentials.serper_api_key().is_none());
/// assert!(credentials.copyscape().is_none());
/// ```
#[derive(Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Credentials {
    /// Chat completions key.
    openrouter_api_key: String,
    /// Web search key.
    serper_api_key: Option<String>,
    /// Originality service credentials.
    copyscape: Option<CopyscapeCredentials>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openrouter_api_key", &"<redacted>")
            .field("serper_api_key", &self.serper_api_key.as_ref().map(|_| "<redacted>"))
            .field("copyscape", &self.copyscape)
            .finish()
    }
}

impl Credentials {
    /// Credentials with only the required chat completions key.
    pub fn new(openrouter_api_key: impl Into<String>) -> Self {
        Self {
            openrouter_api_key: openrouter_api_key.into(),
            serper_api_key: None,
            copyscape: None,
        }
    }

    /// Add a web search key.
    pub fn with_serper(mut self, api_key: impl Into<String>) -> Self {
        self.serper_api_key = Some(api_key.into());
        self
    }

    /// Add originality service credentials.
    pub fn with_copyscape(mut self, credentials: CopyscapeCredentials) -> Self {
        self.copyscape = Some(credentials);
        self
    }

    /// Read credentials from the environment.
    ///
    /// Blank variables count as unset. The originality service is only
    /// enabled when both its key and account name are present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `OPENROUTER_API_KEY` is unset.
    #[instrument]
    pub fn from_env() -> ScriptsmithResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `OPENROUTER_API_KEY` is unset.
    pub fn from_lookup<F>(lookup: F) -> ScriptsmithResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let openrouter_api_key =
            read(OPENROUTER_API_KEY).ok_or_else(|| ConfigError::missing_credential(OPENROUTER_API_KEY))?;

        let serper_api_key = read(SERPER_API_KEY);
        if serper_api_key.is_none() {
            debug!("{} not set, research disabled", SERPER_API_KEY);
        }

        let copyscape = match (read(COPYSCAPE_USERNAME), read(COPYSCAPE_API_KEY)) {
            (Some(username), Some(api_key)) => Some(CopyscapeCredentials::new(username, api_key)),
            (None, Some(_)) => {
                warn!(
                    "{} set without {}, originality checks disabled",
                    COPYSCAPE_API_KEY, COPYSCAPE_USERNAME
                );
                None
            }
            _ => None,
        };

        Ok(Self {
            openrouter_api_key,
            serper_api_key,
            copyscape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_openrouter_key_is_config_error() {
        let err = Credentials::from_lookup(lookup(&[(SERPER_API_KEY, "s")])).unwrap_err();
        assert!(err.to_string().contains(OPENROUTER_API_KEY));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        assert!(Credentials::from_lookup(lookup(&[(OPENROUTER_API_KEY, "  ")])).is_err());
    }

    #[test]
    fn test_copyscape_needs_both_parts() {
        let partial = Credentials::from_lookup(lookup(&[
            (OPENROUTER_API_KEY, "k"),
            (COPYSCAPE_API_KEY, "c"),
        ]))
        .unwrap();
        assert!(partial.copyscape().is_none());

        let full = Credentials::from_lookup(lookup(&[
            (OPENROUTER_API_KEY, "k"),
            (COPYSCAPE_API_KEY, "c"),
            (COPYSCAPE_USERNAME, "u"),
        ]))
        .unwrap();
        assert_eq!(full.copyscape().as_ref().map(|c| c.username().as_str()), Some("u"));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let credentials = Credentials::new("sk-secret").with_serper("serper-secret");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("serper-secret"));
    }
}
