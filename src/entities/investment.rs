//! Investment entity - a tracked position (fund, stock account, pension).
//!
//! Every value change writes one row to [`super::investment_history`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Investment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form category label
    pub category: String,
    /// Latest known value
    pub current_value: f64,
    /// Value the household is saving towards, if any
    pub target_value: Option<f64>,
    /// When `current_value` last changed
    pub last_updated: DateTimeUtc,
    /// Legacy household tag
    pub household_id: Option<String>,
}

/// Defines relationships between Investment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One investment has many history rows
    #[sea_orm(has_many = "super::investment_history::Entity")]
    History,
}

impl Related<super::investment_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
