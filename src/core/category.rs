//! Category administration.
//!
//! Deleting a category only hides it; expenses that point at it keep
//! resolving. Creating a category with the name of a hidden one brings the
//! hidden one back instead of inserting a duplicate.

use crate::{
    core::{scope::Scope, validate},
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Active categories in `scope`, ordered by name.
pub async fn list_categories(db: &DatabaseConnection, scope: &Scope) -> Result<Vec<category::Model>> {
    scope
        .filter(Category::find(), category::Column::HouseholdId)
        .filter(category::Column::IsDeleted.eq(false))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every category in `scope`, hidden ones included.
pub async fn list_all_categories<C>(db: &C, scope: &Scope) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    scope
        .filter(Category::find(), category::Column::HouseholdId)
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// A category in `scope` by id, hidden or not.
pub async fn get_category<C>(db: &C, scope: &Scope, id: i64) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    scope
        .filter(Category::find_by_id(id), category::Column::HouseholdId)
        .one(db)
        .await
        .map_err(Into::into)
}

/// A category that can take new expenses: in scope and not hidden.
pub(crate) async fn require_active_category<C>(
    db: &C,
    scope: &Scope,
    id: i64,
) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    match get_category(db, scope, id).await? {
        Some(category) if !category.is_deleted => Ok(category),
        _ => Err(Error::not_found("category", id)),
    }
}

async fn find_by_name<C>(db: &C, scope: &Scope, name: &str) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    scope
        .filter(Category::find(), category::Column::HouseholdId)
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// What [`ensure_category`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// An active category already existed
    Existing,
    /// A hidden category was brought back
    Reenabled,
    /// A new row was inserted
    Created,
}

/// Makes sure an active category called `name` exists in `scope`.
pub async fn ensure_category<C>(
    db: &C,
    scope: &Scope,
    name: &str,
) -> Result<(category::Model, Ensured)>
where
    C: ConnectionTrait,
{
    let name = validate::required_text("category name", name)?;

    match find_by_name(db, scope, &name).await? {
        Some(existing) if !existing.is_deleted => Ok((existing, Ensured::Existing)),
        Some(hidden) => {
            debug!(category_id = hidden.id, "Re-enabling hidden category");
            let mut active: category::ActiveModel = hidden.into();
            active.is_deleted = Set(false);
            Ok((active.update(db).await?, Ensured::Reenabled))
        }
        None => {
            let model = category::ActiveModel {
                name: Set(name),
                is_deleted: Set(false),
                household_id: Set(scope.tag()),
                ..Default::default()
            };
            Ok((model.insert(db).await?, Ensured::Created))
        }
    }
}

/// Adds a category.
///
/// # Errors
/// Returns an error if the name is empty or an active category already uses it.
#[instrument(skip(db))]
pub async fn create_category(
    db: &DatabaseConnection,
    scope: &Scope,
    name: &str,
) -> Result<category::Model> {
    let (category, outcome) = ensure_category(db, scope, name).await?;
    if outcome == Ensured::Existing {
        return Err(Error::invalid(format!(
            "category '{}' already exists",
            category.name
        )));
    }
    info!(category_id = category.id, ?outcome, "Category saved");
    Ok(category)
}

/// Renames a category.
#[instrument(skip(db))]
pub async fn rename_category(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
    name: &str,
) -> Result<category::Model> {
    let name = validate::required_text("category name", name)?;
    let category = require_active_category(db, scope, id).await?;

    if find_by_name(db, scope, &name)
        .await?
        .is_some_and(|clash| clash.id != id)
    {
        return Err(Error::invalid(format!("category '{name}' already exists")));
    }

    let mut active: category::ActiveModel = category.into();
    active.name = Set(name);
    Ok(active.update(db).await?)
}

/// Hides a category from lists and new expenses.
#[instrument(skip(db))]
pub async fn delete_category(
    db: &DatabaseConnection,
    scope: &Scope,
    id: i64,
) -> Result<category::Model> {
    let category = require_active_category(db, scope, id).await?;
    let mut active: category::ActiveModel = category.into();
    active.is_deleted = Set(true);
    Ok(active.update(db).await?)
}
