//! Admin defaults loaded from config.toml
//!
//! The file lists the categories and fixed expenses that every fresh scope
//! starts with, the labels for the two income contributors, and cache tuning.
//! Every section is optional.

use crate::errors::{Error, Result};
use crate::query::CacheOptions;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Category names to seed
    #[serde(default)]
    pub categories: Vec<String>,
    /// Fixed expense templates to seed
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpenseConfig>,
    /// Income field labels
    #[serde(default)]
    pub income: IncomeConfig,
    /// Query cache tuning
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Configuration for a single default fixed expense
#[derive(Debug, Deserialize, Clone)]
pub struct FixedExpenseConfig {
    /// Bill description
    pub description: String,
    /// Expected monthly amount
    pub amount: f64,
    /// Category name; must also appear in `categories`
    pub category: String,
    /// Day of month the bill is due
    #[serde(default = "default_due_day")]
    pub due_day: i32,
}

const fn default_due_day() -> i32 {
    1
}

/// Labels for the per-contributor income fields
#[derive(Debug, Deserialize, Clone)]
pub struct IncomeConfig {
    /// Label for `contributor_one`
    pub contributor_one: String,
    /// Label for `contributor_two`
    pub contributor_two: String,
}

impl Default for IncomeConfig {
    fn default() -> Self {
        Self {
            contributor_one: "Contributor 1".to_string(),
            contributor_two: "Contributor 2".to_string(),
        }
    }
}

/// Cache tuning, in minutes
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// How long a fetched result counts as fresh
    #[serde(default = "default_stale_minutes")]
    pub stale_minutes: u64,
    /// How long an untouched entry is kept before collection
    #[serde(default = "default_gc_minutes")]
    pub gc_minutes: u64,
    /// Automatic retries per failed fetch
    #[serde(default = "default_retry")]
    pub retry: u32,
}

const fn default_stale_minutes() -> u64 {
    5
}

const fn default_gc_minutes() -> u64 {
    30
}

const fn default_retry() -> u32 {
    1
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_minutes: default_stale_minutes(),
            gc_minutes: default_gc_minutes(),
            retry: default_retry(),
        }
    }
}

impl CacheConfig {
    /// Converts the minute-based settings into [`CacheOptions`].
    #[must_use]
    pub fn to_options(&self) -> CacheOptions {
        CacheOptions {
            stale_time: Duration::from_secs(self.stale_minutes * 60),
            gc_time: Duration::from_secs(self.gc_minutes * 60),
            retry: self.retry,
            ..CacheOptions::default()
        }
    }
}

/// Loads the defaults from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A fixed expense names a category missing from `categories`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Parses and validates config.toml contents
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if let Some(orphan) = config
        .fixed_expenses
        .iter()
        .find(|f| !config.categories.iter().any(|c| c == &f.category))
    {
        return Err(Error::Config {
            message: format!(
                "Fixed expense '{}' uses unknown category '{}'",
                orphan.description, orphan.category
            ),
        });
    }

    Ok(config)
}

/// Loads the defaults, or returns empty defaults if the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        tracing::warn!(
            "No config file at {}, starting without defaults",
            path.as_ref().display()
        );
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            categories = ["Housing", "Groceries"]

            [[fixed_expenses]]
            description = "Rent"
            amount = 1200.0
            category = "Housing"
            due_day = 3

            [[fixed_expenses]]
            description = "Internet"
            amount = 40.0
            category = "Housing"

            [income]
            contributor_one = "Alex"
            contributor_two = "Sam"

            [cache]
            stale_minutes = 1
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.categories, vec!["Housing", "Groceries"]);
        assert_eq!(config.fixed_expenses.len(), 2);
        assert_eq!(config.fixed_expenses[0].due_day, 3);
        assert_eq!(config.fixed_expenses[1].due_day, 1);
        assert_eq!(config.fixed_expenses[0].amount, 1200.0);
        assert_eq!(config.income.contributor_two, "Sam");
        assert_eq!(config.cache.stale_minutes, 1);
        assert_eq!(config.cache.gc_minutes, 30);
        assert_eq!(config.cache.retry, 1);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.categories.is_empty());
        assert_eq!(config.income.contributor_one, "Contributor 1");

        let options = config.cache.to_options();
        assert_eq!(options.stale_time, Duration::from_secs(300));
        assert_eq!(options.gc_time, Duration::from_secs(1800));
    }

    #[test]
    fn test_fixed_expense_with_unknown_category_is_rejected() {
        let toml_str = r#"
            categories = ["Housing"]

            [[fixed_expenses]]
            description = "Gym"
            amount = 30.0
            category = "Health"
        "#;

        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = load_config_or_default("definitely/not/here.toml").unwrap();
        assert!(config.fixed_expenses.is_empty());
    }
}
