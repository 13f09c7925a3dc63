//! Monthly income.
//!
//! There is at most one row per (year, month) in a scope. Saving a month
//! that already has a row overwrites it.

use crate::{
    core::{scope::Scope, validate},
    entities::{MonthlyIncome, monthly_income},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::instrument;

/// Income fields for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IncomeInput {
    /// First contributor's net income
    pub contributor_one: f64,
    /// Second contributor's net income
    pub contributor_two: f64,
    /// Everything else
    pub other: f64,
}

async fn find_month<C>(
    db: &C,
    scope: &Scope,
    year: i32,
    month: i32,
) -> Result<Option<monthly_income::Model>>
where
    C: ConnectionTrait,
{
    scope
        .filter(MonthlyIncome::find(), monthly_income::Column::HouseholdId)
        .filter(monthly_income::Column::Year.eq(year))
        .filter(monthly_income::Column::Month.eq(month))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Income saved for one month, if any.
pub async fn get_monthly_income(
    db: &DatabaseConnection,
    scope: &Scope,
    year: i32,
    month: u32,
) -> Result<Option<monthly_income::Model>> {
    let month = validate::month_number(month)?;
    find_month(db, scope, year, month).await
}

/// Creates or overwrites the income row for one month.
#[instrument(skip(db))]
pub async fn save_monthly_income(
    db: &DatabaseConnection,
    scope: &Scope,
    year: i32,
    month: u32,
    input: IncomeInput,
) -> Result<monthly_income::Model> {
    let month = validate::month_number(month)?;
    let contributor_one = validate::non_negative_amount(input.contributor_one)?;
    let contributor_two = validate::non_negative_amount(input.contributor_two)?;
    let other = validate::non_negative_amount(input.other)?;

    let txn = db.begin().await?;
    let saved = if let Some(existing) = find_month(&txn, scope, year, month).await? {
        let mut active: monthly_income::ActiveModel = existing.into();
        active.contributor_one = Set(contributor_one);
        active.contributor_two = Set(contributor_two);
        active.other = Set(other);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?
    } else {
        monthly_income::ActiveModel {
            year: Set(year),
            month: Set(month),
            contributor_one: Set(contributor_one),
            contributor_two: Set(contributor_two),
            other: Set(other),
            updated_at: Set(Utc::now()),
            household_id: Set(scope.tag()),
            ..Default::default()
        }
        .insert(&txn)
        .await?
    };
    txn.commit().await?;
    Ok(saved)
}

/// All saved months of a year, January first.
pub async fn list_income_for_year(
    db: &DatabaseConnection,
    scope: &Scope,
    year: i32,
) -> Result<Vec<monthly_income::Model>> {
    scope
        .filter(MonthlyIncome::find(), monthly_income::Column::HouseholdId)
        .filter(monthly_income::Column::Year.eq(year))
        .order_by_asc(monthly_income::Column::Month)
        .all(db)
        .await
        .map_err(Into::into)
}
