// Configuration: everything the client needs to reach the database is read
// once from the environment at startup and handed around as a `Config`.

use std::fmt;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

pub const TOKEN_VAR: &str = "NOTION_TOKEN";
pub const DATABASE_ID_VAR: &str = "DATABASE_ID";
pub const BASE_URL_VAR: &str = "NOTION_API_URL";
pub const NOTION_VERSION_VAR: &str = "NOTION_VERSION";

/// Credentials and endpoint settings for one process run.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub database_id: String,
    pub base_url: String,
    pub notion_version: String,
}

impl Config {
    /// Build a config against the public API with the default version header.
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Config {
            token: token.into(),
            database_id: database_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
        }
    }

    /// Point the config at another API root (a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read the config from the process environment. Missing credentials
    /// are not an error here: the service rejects the request instead.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR).unwrap_or_default();
        if token.is_empty() {
            warn!("{} is not set, requests will be unauthorized", TOKEN_VAR);
        }
        let database_id = lookup(DATABASE_ID_VAR).unwrap_or_default();
        if database_id.is_empty() {
            warn!("{} is not set", DATABASE_ID_VAR);
        }

        let mut config = Config::new(token, database_id);
        if let Some(url) = lookup(BASE_URL_VAR).filter(|u| !u.is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(version) = lookup(NOTION_VERSION_VAR).filter(|v| !v.is_empty()) {
            config.notion_version = version;
        }
        config
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("notion_version", &self.notion_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_only_credentials_are_set() {
        let config = Config::from_lookup(lookup_from(&[
            (TOKEN_VAR, "secret_abc"),
            (DATABASE_ID_VAR, "db-1"),
        ]));
        assert_eq!(config.token, "secret_abc");
        assert_eq!(config.database_id, "db-1");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.notion_version, DEFAULT_NOTION_VERSION);
    }

    #[test]
    fn missing_credentials_become_empty_strings() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.token, "");
        assert_eq!(config.database_id, "");
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            (BASE_URL_VAR, "http://127.0.0.1:9000/"),
            (NOTION_VERSION_VAR, "2025-09-03"),
        ]));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.notion_version, "2025-09-03");
    }

    #[test]
    fn debug_output_hides_token() {
        let config = Config::new("secret_abc", "db-1");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret_abc"));
        assert!(rendered.contains("db-1"));
    }
}
