//! Category entity - admin-managed labels referenced by expenses.
//!
//! Categories are soft-deleted so old expenses keep a valid reference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "Groceries", "Transport")
    pub name: String,
    /// Soft delete flag - if true, category is hidden but still referenced
    pub is_deleted: bool,
    /// Legacy household tag
    pub household_id: Option<String>,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One category has many fixed expenses
    #[sea_orm(has_many = "super::fixed_expense::Entity")]
    FixedExpenses,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::fixed_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
