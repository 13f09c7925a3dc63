//! Household entity - legacy tenant record.
//!
//! Rows elsewhere carry an optional `household_id` tag pointing here. The tag
//! is being phased out in favour of a single shared scope.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Household database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "households")]
pub struct Model {
    /// Household identifier, chosen by whoever created it
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name
    pub name: String,
    /// When the household was created
    pub created_at: DateTimeUtc,
}

/// Households are referenced only through the untyped `household_id` tag
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
