//! User accounts and login.
//!
//! Users are identities, not data: they are never filtered by scope on
//! lookup, only when listing who belongs to the current household.

use crate::{
    core::{scope::Scope, validate},
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(Error::invalid(format!("'{email}' is not a valid email"))),
    }
}

/// Registers a new user.
///
/// # Errors
/// Returns an error if the email is malformed or already registered, or the
/// display name is empty.
#[instrument(skip(db))]
pub async fn create_user(
    db: &DatabaseConnection,
    scope: &Scope,
    email: &str,
    display_name: &str,
) -> Result<user::Model> {
    let email = normalize_email(email)?;
    let display_name = validate::required_text("display name", display_name)?;

    if get_user_by_email(db, &email).await?.is_some() {
        return Err(Error::invalid(format!("'{email}' is already registered")));
    }

    let model = user::ActiveModel {
        email: Set(email),
        display_name: Set(display_name),
        household_id: Set(scope.tag()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let user = model.insert(db).await?;
    info!(user_id = user.id, "Registered user");
    Ok(user)
}

/// Looks up a user by primary key.
pub async fn get_user_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Looks up a user by email, ignoring case and surrounding whitespace.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Users visible in `scope`, ordered by display name.
pub async fn list_users(db: &DatabaseConnection, scope: &Scope) -> Result<Vec<user::Model>> {
    scope
        .filter(User::find(), user::Column::HouseholdId)
        .order_by_asc(user::Column::DisplayName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Logs in as the user registered under `email`.
#[instrument(skip(db))]
pub async fn login(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    get_user_by_email(db, email)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            email: email.trim().to_string(),
        })
}

/// Logs in, registering the user first if this is their first visit.
pub async fn find_or_create(
    db: &DatabaseConnection,
    scope: &Scope,
    email: &str,
    display_name: &str,
) -> Result<user::Model> {
    match login(db, email).await {
        Err(Error::UserNotFound { .. }) => create_user(db, scope, email, display_name).await,
        other => other,
    }
}
