//! Seeding of admin defaults from config.toml.
//!
//! Categories are ensured by name, so a hidden category with a default name
//! comes back instead of getting a twin. Fixed expense templates are matched
//! by description and never duplicated.

use crate::{
    config::defaults::Config,
    core::{
        category::{self, Ensured},
        fixed_expense::{self, NewFixedExpense},
        scope::Scope,
    },
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashMap;
use tracing::{info, instrument};

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Categories inserted
    pub categories_created: usize,
    /// Hidden categories brought back
    pub categories_reenabled: usize,
    /// Fixed expense templates inserted
    pub fixed_expenses_created: usize,
}

impl SeedReport {
    /// Whether the run wrote anything.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.categories_created + self.categories_reenabled + self.fixed_expenses_created > 0
    }
}

/// Seeds the configured categories and fixed expenses into `scope`.
///
/// Runs in a single transaction; running it again changes nothing.
#[instrument(skip(db, config))]
pub async fn seed_defaults(
    db: &DatabaseConnection,
    scope: &Scope,
    config: &Config,
) -> Result<SeedReport> {
    let txn = db.begin().await?;
    let mut report = SeedReport::default();
    let mut category_ids: HashMap<&str, i64> = HashMap::new();

    for name in &config.categories {
        let (category, outcome) = category::ensure_category(&txn, scope, name).await?;
        match outcome {
            Ensured::Created => report.categories_created += 1,
            Ensured::Reenabled => report.categories_reenabled += 1,
            Ensured::Existing => {}
        }
        category_ids.insert(name.as_str(), category.id);
    }

    let existing = fixed_expense::list_fixed_expenses(&txn, scope, true).await?;
    for template in &config.fixed_expenses {
        if existing
            .iter()
            .any(|f| f.description.eq_ignore_ascii_case(template.description.trim()))
        {
            continue;
        }
        let category_id = *category_ids
            .get(template.category.as_str())
            .ok_or_else(|| Error::Config {
                message: format!(
                    "fixed expense '{}' uses unknown category '{}'",
                    template.description, template.category
                ),
            })?;
        fixed_expense::create_fixed_expense(
            &txn,
            scope,
            NewFixedExpense {
                description: template.description.clone(),
                amount: template.amount,
                category_id,
                due_day: template.due_day,
            },
        )
        .await?;
        report.fixed_expenses_created += 1;
    }

    txn.commit().await?;
    info!(?report, "Finished seeding defaults");
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::defaults::parse_config;
    use crate::core::category::{delete_category, list_categories};
    use crate::test_utils::*;

    const CONFIG: &str = r#"
categories = ["Housing", "Groceries"]

[[fixed_expenses]]
description = "Rent"
amount = 1200.0
category = "Housing"
due_day = 5
"#;

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let scope = Scope::Unscoped;
        let config = parse_config(CONFIG)?;

        let first = seed_defaults(&db, &scope, &config).await?;
        assert_eq!(
            first,
            SeedReport {
                categories_created: 2,
                categories_reenabled: 0,
                fixed_expenses_created: 1,
            }
        );

        let second = seed_defaults(&db, &scope, &config).await?;
        assert!(!second.changed());
        assert_eq!(list_categories(&db, &scope).await?.len(), 2);
        assert_eq!(
            fixed_expense::list_fixed_expenses(&db, &scope, true).await?.len(),
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_reenables_hidden_category() -> Result<()> {
        let db = setup_test_db().await?;
        let scope = Scope::Unscoped;
        let config = parse_config(CONFIG)?;
        seed_defaults(&db, &scope, &config).await?;

        let groceries = list_categories(&db, &scope)
            .await?
            .into_iter()
            .find(|c| c.name == "Groceries")
            .unwrap();
        delete_category(&db, &scope, groceries.id).await?;

        let report = seed_defaults(&db, &scope, &config).await?;
        assert_eq!(report.categories_reenabled, 1);
        assert_eq!(report.categories_created, 0);
        assert!(
            list_categories(&db, &scope)
                .await?
                .iter()
                .any(|c| c.id == groceries.id)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_per_household() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(CONFIG)?;

        seed_defaults(&db, &Scope::scoped("h1"), &config).await?;
        let report = seed_defaults(&db, &Scope::scoped("h2"), &config).await?;

        assert_eq!(report.categories_created, 2);
        assert_eq!(list_categories(&db, &Scope::scoped("h2")).await?.len(), 2);
        assert_eq!(list_categories(&db, &Scope::Unscoped).await?.len(), 4);
        Ok(())
    }
}
