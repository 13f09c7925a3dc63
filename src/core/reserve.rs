//! Reserve business logic - emergency funds and savings pots.
//!
//! Mirrors `investment`: [`update_reserve_value`] writes one history row and
//! the new value in a single transaction.

use crate::{
    core::{scope::Scope, validate},
    entities::{Reserve, ReserveHistory, reserve, reserve_history},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Fields a user fills in for a reserve.
#[derive(Debug, Clone)]
pub struct NewReserve {
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
pub struct ReserveDetails {
    /// Display name
    pub name: String,
    /// Free-form category label
    pub category: String,
    /// Optional goal
    pub target_value: Option<f64>,
}

/// Outcome of a value update.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveValueChange {
    /// The reserve after the update
    pub reserve: reserve::Model,
    /// The audit row written for it
    pub history: reserve_history::Model,
}

fn validate_target(target: Option<f64>) -> Result<Option<f64>> {
    target.map(validate::non_negative_amount).transpose()
}

/// Reserves in `scope`, ordered by name.
pub async fn list_reserves(
    db: &DatabaseConnection,
    scope: &Scope,
) -> Result<Vec<reserve::Model>> {
    scope
        .filter(Reserve::find(), reserve::Column::HouseholdId)
        .order_by_asc(reserve::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// A reserve in `scope` by id.
pub async fn get_reserve<C>(
    db: &C,
    scope: &Scope,
    id: i64,
) -> Result<Option<reserve::Model>>
where
    C: ConnectionTrait,
{
    scope
        .filter(Reserve::find_by_id(id), reserve::Column::HouseholdId)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_reserve<C>(db: &C, scope: &Scope, id: i64) -> Result<reserve::Model>
where
    C: ConnectionTrait,
{
    get_reserve(db, scope, id)
        .await?
        .ok_or_else(|| Error::not_found("reserve", id))
}

/// Adds a reserve.
#[instrument(skip(db, input))]
pub async fn create_reserve(
    db: &DatabaseConnection,
    scope: &Scope,
    input: NewReserve,
) -> Result<reserve::Model> {
    let model = reserve::ActiveModel {
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
pub async fn update_reserve_details(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    details: ReserveDetails,
) -> Result<reserve::Model> {
    let name = validate::required_text("name", &details.name)?;
    let category = validate::required_text("category", &details.category)?;
    let target_value = validate_target(details.target_value)?;
    let existing = require_reserve(db, scope, id).await?;

    let mut active: reserve::ActiveModel = existing.into();
    active.name = Set(name);
    active.category = Set(category);
    active.target_value = Set(target_value);
    Ok(active.update(db).await?)
}

/// Records a new value, writing one history row in the same transaction.
///
/// # Errors
/// Returns an error if the value is negative or not finite, or the
/// reserve is not visible in `scope`. Nothing is written in that case.
#[instrument(skip(db))]
pub async fn update_reserve_value(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    new_value: f64,
    changed_by: i64,
) -> Result<ReserveValueChange> {
    let new_value = validate::non_negative_amount(new_value)?;
    let txn = db.begin().await?;
    let existing = require_reserve(&txn, scope, id).await?;
    let old_value = existing.current_value;
    let now = Utc::now();

    let history = reserve_history::ActiveModel {
        reserve_id: Set(id),
        old_value: Set(old_value),
        new_value: Set(new_value),
        changed_by: Set(changed_by),
        changed_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut active: reserve::ActiveModel = existing.into();
    active.current_value = Set(new_value);
    active.last_updated = Set(now);
    let reserve = active.update(&txn).await?;

    txn.commit().await?;
    info!(reserve_id = id, old_value, new_value, "Reserve value updated");
    Ok(ReserveValueChange {
        reserve,
        history,
    })
}

/// Value history of a reserve, newest first.
pub async fn list_reserve_history(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
) -> Result<Vec<reserve_history::Model>> {
    require_reserve(db, scope, id).await?;
    ReserveHistory::find()
        .filter(reserve_history::Column::ReserveId.eq(id))
        .order_by_desc(reserve_history::Column::ChangedAt)
        .order_by_desc(reserve_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes a reserve and its history.
#[instrument(skip(db))]
pub async fn delete_reserve(db: &DatabaseConnection, scope: &Scope, id: i64) -> Result<()> {
    let txn = db.begin().await?;
    let existing = require_reserve(&txn, scope, id).await?;

    ReserveHistory::delete_many()
        .filter(reserve_history::Column::ReserveId.eq(id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
