//! Household scoping.
//!
//! A [`Scope`] is resolved once when a session starts and passed to every
//! accessor. `Scoped` filters reads on the legacy `household_id` tag and
//! stamps it on inserts; `Unscoped` does neither, so every row is shared.

use sea_orm::{ColumnTrait, QueryFilter};
use std::fmt;

/// Which rows a session can see and write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Only rows tagged with this household
    Scoped {
        /// Legacy household identifier
        household_id: String,
    },
    /// All rows, shared by every user
    #[default]
    Unscoped,
}

impl Scope {
    /// Shorthand for [`Scope::Scoped`].
    pub fn scoped(household_id: impl Into<String>) -> Self {
        Self::Scoped {
            household_id: household_id.into(),
        }
    }

    /// The household id, if scoped.
    #[must_use]
    pub fn household_id(&self) -> Option<&str> {
        match self {
            Self::Scoped { household_id } => Some(household_id),
            Self::Unscoped => None,
        }
    }

    /// Value to store in the `household_id` column of new rows.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        self.household_id().map(str::to_string)
    }

    /// Second part of every cache key.
    #[must_use]
    pub fn key_part(&self) -> String {
        match self {
            Self::Scoped { household_id } => format!("household:{household_id}"),
            Self::Unscoped => "shared".to_string(),
        }
    }

    /// Restricts `query` to rows visible in this scope.
    #[must_use]
    pub fn filter<Q, C>(&self, query: Q, household_column: C) -> Q
    where
        Q: QueryFilter,
        C: ColumnTrait,
    {
        match self {
            Self::Scoped { household_id } => {
                query.filter(household_column.eq(household_id.as_str()))
            }
            Self::Unscoped => query,
        }
    }

    /// Whether a row carrying `tag` is visible in this scope.
    #[must_use]
    pub fn allows(&self, tag: Option<&str>) -> bool {
        match self {
            Self::Scoped { household_id } => tag == Some(household_id.as_str()),
            Self::Unscoped => true,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_part())
    }
}
