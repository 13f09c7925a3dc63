//! Monthly income entity - one row per (year, month) within a scope.
//!
//! The (year, month, household) combination is kept unique by the upsert in
//! `core::income`, not by the primary key, so the shared scope and legacy
//! households can coexist in one table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_income")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: i32,
    /// Net income of the first contributor
    pub contributor_one: f64,
    /// Net income of the second contributor
    pub contributor_two: f64,
    /// Anything else (refunds, side income, gifts)
    pub other: f64,
    /// When the row was last saved
    pub updated_at: DateTimeUtc,
    /// Legacy household tag
    pub household_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// Sum of all income fields.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.contributor_one + self.contributor_two + self.other
    }
}

impl ActiveModelBehavior for ActiveModel {}
