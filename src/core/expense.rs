//! Expense business logic - monthly variable spending.
//!
//! Expenses are listed per calendar month. Every write checks that the
//! category is active and visible in the caller's scope.

use crate::{
    core::{category, scope::Scope, validate},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Fields a user fills in for an expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// What the money was spent on
    pub description: String,
    /// Amount spent
    pub amount: f64,
    /// Category to book it under
    pub category_id: i64,
    /// Day it happened
    pub date: NaiveDate,
}

/// Expenses of one month, newest first.
#[instrument(skip(db))]
pub async fn list_expenses_for_month(
    db: &DatabaseConnection,
    scope: &Scope,
    year: i32,
    month: u32,
) -> Result<Vec<expense::Model>> {
    let (start, end) = validate::month_bounds(year, month)?;
    let expenses = scope
        .filter(Expense::find(), expense::Column::HouseholdId)
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} expenses", expenses.len());
    Ok(expenses)
}

/// An expense in `scope` by id.
pub async fn get_expense(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
) -> Result<Option<expense::Model>> {
    scope
        .filter(Expense::find_by_id(id), expense::Column::HouseholdId)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_expense(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
) -> Result<expense::Model> {
    get_expense(db, scope, id)
        .await?
        .ok_or_else(|| Error::not_found("expense", id))
}

/// Records an expense on behalf of `created_by`.
///
/// # Errors
/// Returns an error if the description is empty, the amount is not a
/// positive finite number, or the category is missing or hidden.
#[instrument(skip(db, input))]
pub async fn create_expense(
    db: &DatabaseConnection,
    scope: &Scope,
    created_by: i64,
    input: NewExpense,
) -> Result<expense::Model> {
    let description = validate::required_text("description", &input.description)?;
    let amount = validate::positive_amount(input.amount)?;
    category::require_active_category(db, scope, input.category_id).await?;

    let model = expense::ActiveModel {
        description: Set(description),
        amount: Set(amount),
        category_id: Set(input.category_id),
        date: Set(input.date),
        created_by: Set(created_by),
        household_id: Set(scope.tag()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Replaces the user-editable fields of an expense.
#[instrument(skip(db, input))]
pub async fn update_expense(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    input: NewExpense,
) -> Result<expense::Model> {
    let description = validate::required_text("description", &input.description)?;
    let amount = validate::positive_amount(input.amount)?;
    let existing = require_expense(db, scope, id).await?;
    if existing.category_id != input.category_id {
        category::require_active_category(db, scope, input.category_id).await?;
    }

    let mut active: expense::ActiveModel = existing.into();
    active.description = Set(description);
    active.amount = Set(amount);
    active.category_id = Set(input.category_id);
    active.date = Set(input.date);
    Ok(active.update(db).await?)
}

/// Removes an expense.
#[instrument(skip(db))]
pub async fn delete_expense(db: &DatabaseConnection, scope: &Scope, id: i64) -> Result<()> {
    let existing = require_expense(db, scope, id).await?;
    existing.delete(db).await?;
    Ok(())
}
