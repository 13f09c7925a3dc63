//! Environment settings loaded once at startup.
//!
//! Values come from the process environment, after `.env` has been applied by
//! `dotenvy`. Only `FINANCE_USER_EMAIL` is required; everything else has a
//! fallback.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Backend URL, e.g. `postgres://...` or `sqlite://...`
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Anonymous API key handed out by the hosted backend
pub const API_KEY_VAR: &str = "FINANCE_API_KEY";
/// Legacy household id; unset means every row is shared
pub const HOUSEHOLD_ID_VAR: &str = "FINANCE_HOUSEHOLD_ID";
/// Email of the account to log in as
pub const USER_EMAIL_VAR: &str = "FINANCE_USER_EMAIL";
/// Display name used if the account has to be created
pub const USER_NAME_VAR: &str = "FINANCE_USER_NAME";
/// Path of the defaults file
pub const CONFIG_PATH_VAR: &str = "FINANCE_CONFIG";

/// Startup settings read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend connection URL
    pub database_url: String,
    /// Anonymous API key, if the backend needs one
    pub api_key: Option<String>,
    /// Legacy household scoping id
    pub household_id: Option<String>,
    /// Login email
    pub user_email: String,
    /// Display name for first login
    pub user_name: String,
    /// Location of `config.toml`
    pub config_path: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns `None` for unset names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let user_email = non_empty(USER_EMAIL_VAR).ok_or_else(|| Error::Config {
            message: format!("{USER_EMAIL_VAR} must be set"),
        })?;
        let user_name = non_empty(USER_NAME_VAR).unwrap_or_else(|| {
            user_email
                .split('@')
                .next()
                .unwrap_or(user_email.as_str())
                .to_string()
        });

        Ok(Self {
            database_url: non_empty(DATABASE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            api_key: non_empty(API_KEY_VAR),
            household_id: non_empty(HOUSEHOLD_ID_VAR),
            user_email,
            user_name,
            config_path: non_empty(CONFIG_PATH_VAR)
                .map_or_else(|| PathBuf::from("config.toml"), PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_only_email_set() {
        let settings = Settings::from_lookup(lookup_from(&[(USER_EMAIL_VAR, "sam@example.com")]))
            .unwrap();

        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.user_name, "sam");
        assert!(settings.household_id.is_none());
        assert!(settings.api_key.is_none());
        assert_eq!(settings.config_path, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_missing_email_is_config_error() {
        let result = Settings::from_lookup(lookup_from(&[(DATABASE_URL_VAR, "sqlite::memory:")]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_blank_household_is_treated_as_unset() {
        let settings = Settings::from_lookup(lookup_from(&[
            (USER_EMAIL_VAR, "alex@example.com"),
            (USER_NAME_VAR, "Alex"),
            (HOUSEHOLD_ID_VAR, "  "),
            (API_KEY_VAR, "anon-key"),
        ]))
        .unwrap();

        assert!(settings.household_id.is_none());
        assert_eq!(settings.user_name, "Alex");
        assert_eq!(settings.api_key.as_deref(), Some("anon-key"));
    }
}
