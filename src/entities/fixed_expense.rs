//! Fixed expense entity - recurring monthly bills shown as a checklist.
//!
//! The template lives here; whether it was paid in a given month is tracked
//! by [`super::fixed_expense_check`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_expenses")]
pub struct Model {
    /// Unique identifier for the fixed expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Bill description (e.g. "Rent", "Internet")
    pub description: String,
    /// Expected monthly amount
    pub amount: f64,
    /// Category this bill is booked under
    pub category_id: i64,
    /// Day of month the bill is due (1-31)
    pub due_day: i32,
    /// Inactive bills are kept for history but left off new checklists
    pub is_active: bool,
    /// Legacy household tag
    pub household_id: Option<String>,
}

/// Defines relationships between `FixedExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each fixed expense belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One fixed expense has one check row per month
    #[sea_orm(has_many = "super::fixed_expense_check::Entity")]
    Checks,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::fixed_expense_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
