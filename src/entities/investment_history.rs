//! Investment history entity - audit trail of value changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Investment history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "investment_history")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Investment whose value changed
    pub investment_id: i64,
    /// Value before the change
    pub old_value: f64,
    /// Value after the change
    pub new_value: f64,
    /// User who made the change
    pub changed_by: i64,
    /// When the change was recorded
    pub changed_at: DateTimeUtc,
}

/// Defines relationships between InvestmentHistory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each history row belongs to one investment
    #[sea_orm(
        belongs_to = "super::investment::Entity",
        from = "Column::InvestmentId",
        to = "super::investment::Column::Id"
    )]
    Investment,
}

impl Related<super::investment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
