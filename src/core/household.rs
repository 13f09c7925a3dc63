//! Legacy household records and the scope resolution built on them.

use crate::{
    core::{scope::Scope, validate},
    entities::{
        Category, Expense, FixedExpense, FixedExpenseCheck, Household, Investment,
        MonthlyIncome, Reserve, User, category, expense, fixed_expense, fixed_expense_check,
        household, investment, monthly_income, reserve, user,
    },
    errors::{Error, Result},
};
use sea_orm::{EntityTrait, Set, TransactionTrait, prelude::*, sea_query::Expr};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Creates a household with a caller-chosen id.
pub async fn create_household(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
) -> Result<household::Model> {
    let id = validate::required_text("household id", id)?;
    let name = validate::required_text("household name", name)?;

    if get_household(db, &id).await?.is_some() {
        return Err(Error::invalid(format!("household '{id}' already exists")));
    }

    let model = household::ActiveModel {
        id: Set(id),
        name: Set(name),
        created_at: Set(chrono::Utc::now()),
    };
    Ok(model.insert(db).await?)
}

/// Looks up a household by id.
pub async fn get_household(db: &DatabaseConnection, id: &str) -> Result<Option<household::Model>> {
    Household::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Turns the configured household id into a [`Scope`].
///
/// No id means the shared scope. An id that does not exist is an error
/// rather than a silent fallback, so a typo cannot leak every row.
#[instrument(skip(db))]
pub async fn resolve_scope(db: &DatabaseConnection, household_id: Option<&str>) -> Result<Scope> {
    let Some(id) = household_id else {
        info!("No household configured, using the shared scope");
        return Ok(Scope::Unscoped);
    };

    match get_household(db, id).await? {
        Some(household) => {
            warn!(
                household = %household.id,
                "Legacy household scoping is active; rows outside it are hidden"
            );
            Ok(Scope::scoped(household.id))
        }
        None => Err(Error::HouseholdNotFound { id: id.to_string() }),
    }
}

/// Rows that would share a logical key once every tag is cleared: income
/// months saved by more than one scope and active categories with the same
/// name.
pub async fn merge_conflicts<C>(db: &C) -> Result<Vec<String>>
where
    C: ConnectionTrait,
{
    let mut months: HashMap<(i32, i32), usize> = HashMap::new();
    for row in MonthlyIncome::find().all(db).await? {
        *months.entry((row.year, row.month)).or_default() += 1;
    }
    let mut names: HashMap<String, usize> = HashMap::new();
    for row in Category::find()
        .filter(category::Column::IsDeleted.eq(false))
        .all(db)
        .await?
    {
        *names.entry(row.name).or_default() += 1;
    }

    let mut conflicts: Vec<String> = months
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((year, month), count)| format!("income {year}-{month:02} saved {count} times"))
        .chain(
            names
                .into_iter()
                .filter(|(_, count)| *count > 1)
                .map(|(name, count)| format!("category '{name}' active {count} times")),
        )
        .collect();
    conflicts.sort();
    Ok(conflicts)
}

/// Clears the household tag on every row so all data becomes shared.
///
/// Runs in one transaction and returns the number of rows touched. Refuses
/// to run, changing nothing, while [`merge_conflicts`] reports anything.
#[instrument(skip(db))]
pub async fn unscope_all_rows(db: &DatabaseConnection) -> Result<u64> {
    let txn = db.begin().await?;
    let conflicts = merge_conflicts(&txn).await?;
    if !conflicts.is_empty() {
        warn!(?conflicts, "Refusing to clear household tags");
        return Err(Error::MergeConflict { conflicts });
    }
    let cleared = || Expr::value(Option::<String>::None);
    let mut touched = 0;

    touched += User::update_many()
        .col_expr(user::Column::HouseholdId, cleared())
        .filter(user::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;
    touched += Category::update_many()
        .col_expr(category::Column::HouseholdId, cleared())
        .filter(category::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;
    touched += Expense::update_many()
        .col_expr(expense::Column::HouseholdId, cleared())
        .filter(expense::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;
    touched += FixedExpense::update_many()
        .col_expr(fixed_expense::Column::HouseholdId, cleared())
        .filter(fixed_expense::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;
    touched += FixedExpenseCheck::update_many()
        .col_expr(fixed_expense_check::Column::HouseholdId, cleared())
        .filter(fixed_expense_check::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;
    touched += Investment::update_many()
        .col_expr(investment::Column::HouseholdId, cleared())
        .filter(investment::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;
    touched += Reserve::update_many()
        .col_expr(reserve::Column::HouseholdId, cleared())
        .filter(reserve::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;
    touched += MonthlyIncome::update_many()
        .col_expr(monthly_income::Column::HouseholdId, cleared())
        .filter(monthly_income::Column::HouseholdId.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;

    txn.commit().await?;
    info!(touched, "Cleared household tags");
    Ok(touched)
}
