//! Reserve history entity - audit trail of value changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reserve history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reserve_history")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Reserve whose value changed
    pub reserve_id: i64,
    /// Value before the change
    pub old_value: f64,
    /// Value after the change
    pub new_value: f64,
    /// User who made the change
    pub changed_by: i64,
    /// When the change was recorded
    pub changed_at: DateTimeUtc,
}

/// Defines relationships between ReserveHistory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each history row belongs to one reserve
    #[sea_orm(
        belongs_to = "super::reserve::Entity",
        from = "Column::ReserveId",
        to = "super::reserve::Column::Id"
    )]
    Reserve,
}

impl Related<super::reserve::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reserve.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
