//! Database configuration module.
//!
//! Handles the backend connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{
    Category, Expense, FixedExpense, FixedExpenseCheck, Household, Investment, InvestmentHistory,
    MonthlyIncome, Reserve, ReserveHistory, User,
};
use crate::errors::Result;
use crate::entities::monthly_income;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};
use std::path::Path;
use tracing::{debug, info};

/// Default backend used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/finance_buddy.sqlite?mode=rwc";

/// Establishes a connection to the backend at `database_url`.
///
/// Any URL `SeaORM` understands works: a local `SQLite` file for development
/// or a hosted Postgres instance.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    ensure_sqlite_dir(database_url)?;
    debug!("Connecting to backend");
    let db = Database::connect(database_url).await?;
    info!(backend = ?db.get_database_backend(), "Backend connection established");
    Ok(db)
}

/// Creates the parent directory of a file-backed `SQLite` URL.
fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or(rest);
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Referenced tables are created before the tables that point at them so the
/// foreign keys resolve on backends that check them eagerly.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Household).await?;
    create_table(db, &schema, User).await?;
    create_table(db, &schema, Category).await?;
    create_table(db, &schema, Expense).await?;
    create_table(db, &schema, FixedExpense).await?;
    create_table(db, &schema, FixedExpenseCheck).await?;
    create_table(db, &schema, Investment).await?;
    create_table(db, &schema, InvestmentHistory).await?;
    create_table(db, &schema, Reserve).await?;
    create_table(db, &schema, ReserveHistory).await?;
    create_table(db, &schema, MonthlyIncome).await?;

    // One income row per month and household
    let income_month = Index::create()
        .if_not_exists()
        .name("idx_monthly_income_month")
        .table(MonthlyIncome)
        .col(monthly_income::Column::Year)
        .col(monthly_income::Column::Month)
        .col(monthly_income::Column::HouseholdId)
        .unique()
        .to_owned();
    db.execute(db.get_database_backend().build(&income_month))
        .await?;

    debug!("All tables ensured");
    Ok(())
}
