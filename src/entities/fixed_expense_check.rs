//! Fixed expense check entity - paid/unpaid state of a bill for one month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed expense check database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_expense_checks")]
pub struct Model {
    /// Unique identifier for the check row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Bill this row belongs to
    pub fixed_expense_id: i64,
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: i32,
    /// Whether the bill was paid that month
    pub is_paid: bool,
    /// When it was ticked off, cleared when unticked
    pub paid_at: Option<DateTimeUtc>,
    /// Legacy household tag
    pub household_id: Option<String>,
}

/// Defines relationships between `FixedExpenseCheck` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each check belongs to one fixed expense
    #[sea_orm(
        belongs_to = "super::fixed_expense::Entity",
        from = "Column::FixedExpenseId",
        to = "super::fixed_expense::Column::Id"
    )]
    FixedExpense,
}

impl Related<super::fixed_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedExpense.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
