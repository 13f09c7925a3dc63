//! Investment business logic.
//!
//! Value changes are the only audited write in the system: every call to
//! [`update_investment_value`] inserts exactly one history row carrying the
//! previous and the submitted value, and updates the investment, inside one
//! database transaction.

use crate::{
    core::{scope::Scope, validate},
    entities::{Investment, InvestmentHistory, investment, investment_history},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Fields a user fills in for an investment.
#[derive(Debug, Clone)]
pub struct NewInvestment {
    /// Display name
    pub name: String,
    /// Free-form category label
    pub category: String,
    /// Value at the time it is added
    pub current_value: f64,
    /// Optional goal
    pub target_value: Option<f64>,
}

/// Editable fields other than the value.
#[derive(Debug, Clone)]
pub struct InvestmentDetails {
    /// Display name
    pub name: String,
    /// Free-form category label
    pub category: String,
    /// Optional goal
    pub target_value: Option<f64>,
}

/// Outcome of a value update.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentValueChange {
    /// The investment after the update
    pub investment: investment::Model,
    /// The audit row written for it
    pub history: investment_history::Model,
}

fn validate_target(target: Option<f64>) -> Result<Option<f64>> {
    target.map(validate::non_negative_amount).transpose()
}

/// Investments in `scope`, ordered by name.
pub async fn list_investments(
    db: &DatabaseConnection,
    scope: &Scope,
) -> Result<Vec<investment::Model>> {
    scope
        .filter(Investment::find(), investment::Column::HouseholdId)
        .order_by_asc(investment::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// An investment in `scope` by id.
pub async fn get_investment<C>(
    db: &C,
    scope: &Scope,
    id: i64,
) -> Result<Option<investment::Model>>
where
    C: ConnectionTrait,
{
    scope
        .filter(Investment::find_by_id(id), investment::Column::HouseholdId)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_investment<C>(db: &C, scope: &Scope, id: i64) -> Result<investment::Model>
where
    C: ConnectionTrait,
{
    get_investment(db, scope, id)
        .await?
        .ok_or_else(|| Error::not_found("investment", id))
}

/// Adds an investment.
#[instrument(skip(db, input))]
pub async fn create_investment(
    db: &DatabaseConnection,
    scope: &Scope,
    input: NewInvestment,
) -> Result<investment::Model> {
    let model = investment::ActiveModel {
        name: Set(validate::required_text("name", &input.name)?),
        category: Set(validate::required_text("category", &input.category)?),
        current_value: Set(validate::non_negative_amount(input.current_value)?),
        target_value: Set(validate_target(input.target_value)?),
        last_updated: Set(Utc::now()),
        household_id: Set(scope.tag()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Changes name, category or target without touching the value.
#[instrument(skip(db, details))]
pub async fn update_investment_details(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    details: InvestmentDetails,
) -> Result<investment::Model> {
    let name = validate::required_text("name", &details.name)?;
    let category = validate::required_text("category", &details.category)?;
    let target_value = validate_target(details.target_value)?;
    let existing = require_investment(db, scope, id).await?;

    let mut active: investment::ActiveModel = existing.into();
    active.name = Set(name);
    active.category = Set(category);
    active.target_value = Set(target_value);
    Ok(active.update(db).await?)
}

/// Records a new value, writing one history row in the same transaction.
///
/// # Errors
/// Returns an error if the value is negative or not finite, or the
/// investment is not visible in `scope`. Nothing is written in that case.
#[instrument(skip(db))]
pub async fn update_investment_value(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    new_value: f64,
    changed_by: i64,
) -> Result<InvestmentValueChange> {
    let new_value = validate::non_negative_amount(new_value)?;
    let txn = db.begin().await?;
    let existing = require_investment(&txn, scope, id).await?;
    let old_value = existing.current_value;
    let now = Utc::now();

    let history = investment_history::ActiveModel {
        investment_id: Set(id),
        old_value: Set(old_value),
        new_value: Set(new_value),
        changed_by: Set(changed_by),
        changed_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut active: investment::ActiveModel = existing.into();
    active.current_value = Set(new_value);
    active.last_updated = Set(now);
    let investment = active.update(&txn).await?;

    txn.commit().await?;
    info!(investment_id = id, old_value, new_value, "Investment value updated");
    Ok(InvestmentValueChange {
        investment,
        history,
    })
}

/// Value history of an investment, newest first.
pub async fn list_investment_history(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
) -> Result<Vec<investment_history::Model>> {
    require_investment(db, scope, id).await?;
    InvestmentHistory::find()
        .filter(investment_history::Column::InvestmentId.eq(id))
        .order_by_desc(investment_history::Column::ChangedAt)
        .order_by_desc(investment_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes an investment and its history.
#[instrument(skip(db))]
pub async fn delete_investment(db: &DatabaseConnection, scope: &Scope, id: i64) -> Result<()> {
    let txn = db.begin().await?;
    let existing = require_investment(&txn, scope, id).await?;

    InvestmentHistory::delete_many()
        .filter(investment_history::Column::InvestmentId.eq(id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn new_investment(name: &str, value: f64) -> NewInvestment {
        NewInvestment {
            name: name.to_string(),
            category: "Index funds".to_string(),
            current_value: value,
            target_value: None,
        }
    }

    #[tokio::test]
    async fn test_create_investment_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let scope = Scope::Unscoped;

        assert!(matches!(
            create_investment(&db, &scope, new_investment("ETF", -5.0)).await,
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            create_investment(&db, &scope, new_investment("", 5.0)).await,
            Err(Error::InvalidInput { .. })
        ));

        let etf = create_investment(&db, &scope, new_investment("ETF", 0.0)).await?;
        assert_eq!(etf.current_value, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_value_update_writes_exactly_one_history_row() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "u@example.com").await?;
        let scope = Scope::Unscoped;
        let etf = create_investment(&db, &scope, new_investment("ETF", 2000.0)).await?;

        let change = update_investment_value(&db, &scope, etf.id, 2250.5, user.id).await?;
        assert_eq!(change.investment.current_value, 2250.5);
        assert_eq!(change.history.old_value, 2000.0);
        assert_eq!(change.history.new_value, 2250.5);
        assert_eq!(change.history.changed_by, user.id);

        let history = list_investment_history(&db, &scope, etf.id).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], change.history);
        Ok(())
    }

    #[tokio::test]
    async fn test_history_is_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "u@example.com").await?;
        let scope = Scope::Unscoped;
        let etf = create_investment(&db, &scope, new_investment("ETF", 100.0)).await?;

        update_investment_value(&db, &scope, etf.id, 110.0, user.id).await?;
        update_investment_value(&db, &scope, etf.id, 120.0, user.id).await?;

        let history = list_investment_history(&db, &scope, etf.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].old_value, 110.0);
        assert_eq!(history[0].new_value, 120.0);
        assert_eq!(history[1].old_value, 100.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_value_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let scope = Scope::Unscoped;
        let etf = create_investment(&db, &scope, new_investment("ETF", 100.0)).await?;

        let result = update_investment_value(&db, &scope, etf.id, f64::NAN, 1).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let missing = update_investment_value(&db, &Scope::scoped("h9"), etf.id, 1.0, 1).await;
        assert!(matches!(missing, Err(Error::NotFound { .. })));

        assert_eq!(InvestmentHistory::find().count(&db).await?, 0);
        assert_eq!(get_investment(&db, &scope, etf.id).await?.unwrap().current_value, 100.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_details_and_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "u@example.com").await?;
        let scope = Scope::Unscoped;
        let etf = create_investment(&db, &scope, new_investment("ETF", 100.0)).await?;
        update_investment_value(&db, &scope, etf.id, 150.0, user.id).await?;

        let updated = update_investment_details(
            &db,
            &scope,
            etf.id,
            InvestmentDetails {
                name: "World ETF".to_string(),
                category: "Equity".to_string(),
                target_value: Some(10_000.0),
            },
        )
        .await?;
        assert_eq!(updated.name, "World ETF");
        assert_eq!(updated.current_value, 150.0);
        assert_eq!(updated.target_value, Some(10_000.0));

        delete_investment(&db, &scope, etf.id).await?;
        assert!(list_investments(&db, &scope).await?.is_empty());
        assert_eq!(InvestmentHistory::find().count(&db).await?, 0);
        Ok(())
    }
}
