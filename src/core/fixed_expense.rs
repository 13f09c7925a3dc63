//! Fixed expenses and the monthly checklist.
//!
//! A fixed expense is a template for a bill that recurs every month. The
//! checklist for a month pairs every active template with its check row for
//! that month; a template without a row counts as unpaid.

use crate::{
    core::{category, scope::Scope, validate},
    entities::{FixedExpense, FixedExpenseCheck, fixed_expense, fixed_expense_check},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Fields a user fills in for a fixed expense.
#[derive(Debug, Clone)]
pub struct NewFixedExpense {
    /// Bill description
    pub description: String,
    /// Expected monthly amount
    pub amount: f64,
    /// Category to book it under
    pub category_id: i64,
    /// Day of month it is due
    pub due_day: i32,
}

/// One line of a monthly checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistItem {
    /// The bill
    pub fixed_expense: fixed_expense::Model,
    /// Whether it was ticked off this month
    pub is_paid: bool,
    /// When it was ticked off
    pub paid_at: Option<DateTime<Utc>>,
}

fn validate_due_day(due_day: i32) -> Result<i32> {
    if (1..=31).contains(&due_day) {
        Ok(due_day)
    } else {
        Err(Error::invalid(format!("due day {due_day} must be between 1 and 31")))
    }
}

/// Fixed expenses in `scope`, ordered by due day.
pub async fn list_fixed_expenses<C>(
    db: &C,
    scope: &Scope,
    include_inactive: bool,
) -> Result<Vec<fixed_expense::Model>>
where
    C: ConnectionTrait,
{
    let mut query = scope.filter(FixedExpense::find(), fixed_expense::Column::HouseholdId);
    if !include_inactive {
        query = query.filter(fixed_expense::Column::IsActive.eq(true));
    }
    query
        .order_by_asc(fixed_expense::Column::DueDay)
        .order_by_asc(fixed_expense::Column::Description)
        .all(db)
        .await
        .map_err(Into::into)
}

/// A fixed expense in `scope` by id, active or not.
pub async fn get_fixed_expense<C>(
    db: &C,
    scope: &Scope,
    id: i64,
) -> Result<Option<fixed_expense::Model>>
where
    C: ConnectionTrait,
{
    scope
        .filter(FixedExpense::find_by_id(id), fixed_expense::Column::HouseholdId)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_fixed_expense<C>(db: &C, scope: &Scope, id: i64) -> Result<fixed_expense::Model>
where
    C: ConnectionTrait,
{
    get_fixed_expense(db, scope, id)
        .await?
        .ok_or_else(|| Error::not_found("fixed expense", id))
}

/// Adds a fixed expense template.
#[instrument(skip(db, input))]
pub async fn create_fixed_expense<C>(
    db: &C,
    scope: &Scope,
    input: NewFixedExpense,
) -> Result<fixed_expense::Model>
where
    C: ConnectionTrait,
{
    let description = validate::required_text("description", &input.description)?;
    let amount = validate::positive_amount(input.amount)?;
    let due_day = validate_due_day(input.due_day)?;
    category::require_active_category(db, scope, input.category_id).await?;

    let model = fixed_expense::ActiveModel {
        description: Set(description),
        amount: Set(amount),
        category_id: Set(input.category_id),
        due_day: Set(due_day),
        is_active: Set(true),
        household_id: Set(scope.tag()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Replaces the user-editable fields of a fixed expense.
#[instrument(skip(db, input))]
pub async fn update_fixed_expense(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    input: NewFixedExpense,
) -> Result<fixed_expense::Model> {
    let description = validate::required_text("description", &input.description)?;
    let amount = validate::positive_amount(input.amount)?;
    let due_day = validate_due_day(input.due_day)?;
    let existing = require_fixed_expense(db, scope, id).await?;
    if existing.category_id != input.category_id {
        category::require_active_category(db, scope, input.category_id).await?;
    }

    let mut active: fixed_expense::ActiveModel = existing.into();
    active.description = Set(description);
    active.amount = Set(amount);
    active.category_id = Set(input.category_id);
    active.due_day = Set(due_day);
    Ok(active.update(db).await?)
}

/// Takes a template off (or back onto) future checklists.
#[instrument(skip(db))]
pub async fn set_fixed_expense_active(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    is_active: bool,
) -> Result<fixed_expense::Model> {
    let existing = require_fixed_expense(db, scope, id).await?;
    let mut active: fixed_expense::ActiveModel = existing.into();
    active.is_active = Set(is_active);
    Ok(active.update(db).await?)
}

/// Removes a template together with all of its check rows.
#[instrument(skip(db))]
pub async fn delete_fixed_expense(db: &DatabaseConnection, scope: &Scope, id: i64) -> Result<()> {
    let txn = db.begin().await?;
    let existing = require_fixed_expense(&txn, scope, id).await?;

    FixedExpenseCheck::delete_many()
        .filter(fixed_expense_check::Column::FixedExpenseId.eq(existing.id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// The checklist for one month: every active template with its paid state.
#[instrument(skip(db))]
pub async fn checklist(
    db: &DatabaseConnection,
    scope: &Scope,
    year: i32,
    month: u32,
) -> Result<Vec<ChecklistItem>> {
    let month = validate::month_number(month)?;
    let templates = list_fixed_expenses(db, scope, false).await?;

    let checks: HashMap<i64, fixed_expense_check::Model> = scope
        .filter(FixedExpenseCheck::find(), fixed_expense_check::Column::HouseholdId)
        .filter(fixed_expense_check::Column::Year.eq(year))
        .filter(fixed_expense_check::Column::Month.eq(month))
        .all(db)
        .await?
        .into_iter()
        .map(|check| (check.fixed_expense_id, check))
        .collect();

    let items: Vec<ChecklistItem> = templates
        .into_iter()
        .map(|fixed_expense| {
            let check = checks.get(&fixed_expense.id);
            ChecklistItem {
                is_paid: check.is_some_and(|c| c.is_paid),
                paid_at: check.and_then(|c| c.paid_at),
                fixed_expense,
            }
        })
        .collect();
    debug!("Checklist has {} items", items.len());
    Ok(items)
}

/// Ticks or unticks a bill for one month.
#[instrument(skip(db))]
pub async fn set_paid(
    db: &DatabaseConnection,
    scope: &Scope,
    fixed_expense_id: i64,
    year: i32,
    month: u32,
    is_paid: bool,
) -> Result<fixed_expense_check::Model> {
    let month = validate::month_number(month)?;
    let txn = db.begin().await?;
    require_fixed_expense(&txn, scope, fixed_expense_id).await?;

    let existing = FixedExpenseCheck::find()
        .filter(fixed_expense_check::Column::FixedExpenseId.eq(fixed_expense_id))
        .filter(fixed_expense_check::Column::Year.eq(year))
        .filter(fixed_expense_check::Column::Month.eq(month))
        .one(&txn)
        .await?;
    let paid_at = is_paid.then(Utc::now);

    let saved = if let Some(check) = existing {
        let mut active: fixed_expense_check::ActiveModel = check.into();
        active.is_paid = Set(is_paid);
        active.paid_at = Set(paid_at);
        active.update(&txn).await?
    } else {
        fixed_expense_check::ActiveModel {
            fixed_expense_id: Set(fixed_expense_id),
            year: Set(year),
            month: Set(month),
            is_paid: Set(is_paid),
            paid_at: Set(paid_at),
            household_id: Set(scope.tag()),
            ..Default::default()
        }
        .insert(&txn)
        .await?
    };

    txn.commit().await?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn bill(description: &str, amount: f64, category_id: i64, due_day: i32) -> NewFixedExpense {
        NewFixedExpense {
            description: description.to_string(),
            amount,
            category_id,
            due_day,
        }
    }

    #[tokio::test]
    async fn test_create_fixed_expense_validation() -> Result<()> {
        let (db, _user, category) = setup_with_category().await?;
        let scope = Scope::Unscoped;

        assert!(matches!(
            create_fixed_expense(&db, &scope, bill("Rent", 900.0, category.id, 0)).await,
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            create_fixed_expense(&db, &scope, bill("Rent", -1.0, category.id, 1)).await,
            Err(Error::InvalidAmount { .. })
        ));

        let rent = create_fixed_expense(&db, &scope, bill("Rent", 900.0, category.id, 1)).await?;
        assert!(rent.is_active);
        assert_eq!(rent.amount, 900.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_checklist_defaults_to_unpaid() -> Result<()> {
        let (db, _user, category) = setup_with_category().await?;
        let scope = Scope::Unscoped;
        create_fixed_expense(&db, &scope, bill("Internet", 40.0, category.id, 15)).await?;
        create_fixed_expense(&db, &scope, bill("Rent", 900.0, category.id, 1)).await?;

        let items = checklist(&db, &scope, 2024, 3).await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].fixed_expense.description, "Rent");
        assert!(items.iter().all(|item| !item.is_paid && item.paid_at.is_none()));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_paid_is_per_month_and_toggles() -> Result<()> {
        let (db, _user, category) = setup_with_category().await?;
        let scope = Scope::Unscoped;
        let rent = create_fixed_expense(&db, &scope, bill("Rent", 900.0, category.id, 1)).await?;

        let check = set_paid(&db, &scope, rent.id, 2024, 3, true).await?;
        assert!(check.is_paid);
        assert!(check.paid_at.is_some());

        assert!(checklist(&db, &scope, 2024, 3).await?[0].is_paid);
        assert!(!checklist(&db, &scope, 2024, 4).await?[0].is_paid);

        let unchecked = set_paid(&db, &scope, rent.id, 2024, 3, false).await?;
        assert_eq!(unchecked.id, check.id);
        assert!(unchecked.paid_at.is_none());
        assert!(!checklist(&db, &scope, 2024, 3).await?[0].is_paid);
        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_templates_leave_checklist() -> Result<()> {
        let (db, _user, category) = setup_with_category().await?;
        let scope = Scope::Unscoped;
        let gym = create_fixed_expense(&db, &scope, bill("Gym", 30.0, category.id, 5)).await?;

        set_fixed_expense_active(&db, &scope, gym.id, false).await?;
        assert!(checklist(&db, &scope, 2024, 3).await?.is_empty());
        assert_eq!(list_fixed_expenses(&db, &scope, true).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_fixed_expense() -> Result<()> {
        let (db, _user, category) = setup_with_category().await?;
        let scope = Scope::Unscoped;
        let rent = create_fixed_expense(&db, &scope, bill("Rent", 900.0, category.id, 1)).await?;
        set_paid(&db, &scope, rent.id, 2024, 3, true).await?;

        let updated =
            update_fixed_expense(&db, &scope, rent.id, bill("Rent", 950.0, category.id, 2)).await?;
        assert_eq!(updated.amount, 950.0);
        assert_eq!(updated.due_day, 2);

        delete_fixed_expense(&db, &scope, rent.id).await?;
        assert!(get_fixed_expense(&db, &scope, rent.id).await?.is_none());
        assert_eq!(FixedExpenseCheck::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_paid_rejects_bad_month_and_unknown_bill() -> Result<()> {
        let (db, _user, _category) = setup_with_category().await?;
        let scope = Scope::Unscoped;

        assert!(matches!(
            set_paid(&db, &scope, 1, 2024, 0, true).await,
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            set_paid(&db, &scope, 42, 2024, 3, true).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
