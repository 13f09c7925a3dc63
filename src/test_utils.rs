//! Shared test utilities for `FinanceBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{category, expense::NewExpense, reserve, scope::Scope, user},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an unscoped test user. The display name is the part of the email
/// before the `@`.
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<entities::user::Model> {
    create_test_user_in(db, email, &Scope::Unscoped).await
}

/// Creates a test user tagged with `scope`.
pub async fn create_test_user_in(
    db: &DatabaseConnection,
    email: &str,
    scope: &Scope,
) -> Result<entities::user::Model> {
    let name = email.split('@').next().unwrap_or(email);
    user::create_user(db, scope, email, name).await
}

/// Database with one unscoped user and one active "Groceries" category.
pub async fn setup_with_category() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::category::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "u@example.com").await?;
    let category = category::create_category(&db, &Scope::Unscoped, "Groceries").await?;
    Ok((db, user, category))
}

/// Expense input with the given fields.
pub fn new_expense(description: &str, amount: f64, category_id: i64, date: NaiveDate) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount,
        category_id,
        date,
    }
}

/// Shorthand for a calendar date.
///
/// # Panics
/// Panics on an invalid date.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a reserve without a target.
pub async fn create_test_reserve(
    db: &DatabaseConnection,
    scope: &Scope,
    name: &str,
    current_value: f64,
) -> Result<entities::reserve::Model> {
    reserve::create_reserve(
        db,
        scope,
        reserve::NewReserve {
            name: name.to_string(),
            category: "emergency".to_string(),
            current_value,
            target_value: None,
        },
    )
    .await
}
