//! Process configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use questline_domain::DEFAULT_LOCALE;

use crate::infrastructure::pool::DEFAULT_POOL_CAPACITY;
use crate::use_cases::quest_authoring::DEFAULT_SESSION_TTL;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:questline.db?mode=rwc";
pub const DEFAULT_DATABASE_NAME: &str = "questline";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Store credentials. Recorded for drivers that authenticate; SQLite ignores them.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub credentials: Option<Credentials>,
    pub database_name: String,
    pub pool_capacity: usize,
    pub session_ttl: Duration,
    pub default_locale: String,
    pub locale_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            credentials: None,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            session_ttl: DEFAULT_SESSION_TTL,
            default_locale: DEFAULT_LOCALE.to_string(),
            locale_dir: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let credentials = match (get("QUESTLINE_DB_USER"), get("QUESTLINE_DB_PASSWORD")) {
            (Some(user), password) => Some(Credentials {
                user,
                password: password.unwrap_or_default(),
            }),
            (None, _) => None,
        };

        let pool_capacity = match get("QUESTLINE_POOL_CAPACITY") {
            Some(value) => match value.parse::<usize>() {
                Ok(capacity) if capacity >= 1 => capacity,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "QUESTLINE_POOL_CAPACITY",
                        expected: "a whole number of at least 1",
                        value,
                    })
                }
            },
            None => defaults.pool_capacity,
        };

        let session_ttl = match get("QUESTLINE_SESSION_TTL_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs >= 1 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "QUESTLINE_SESSION_TTL_SECS",
                        expected: "a whole number of seconds, at least 1",
                        value,
                    })
                }
            },
            None => defaults.session_ttl,
        };

        Ok(Self {
            database_url: get("QUESTLINE_DATABASE_URL").unwrap_or(defaults.database_url),
            credentials,
            database_name: get("QUESTLINE_DB_NAME").unwrap_or(defaults.database_name),
            pool_capacity,
            session_ttl,
            default_locale: get("QUESTLINE_DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
            locale_dir: get("QUESTLINE_LOCALE_DIR").map(PathBuf::from),
        })
    }
}
