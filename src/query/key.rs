//! Cache keys.
//!
//! A key is an ordered list of parts. The first part is always the resource
//! name, the second the scope, and anything after that narrows the query
//! (a month, an id). Invalidation matches on prefixes, so invalidating
//! `reserves/shared` drops every reserves query in the shared scope.

use crate::core::scope::Scope;
use std::fmt;

/// Remote resource collections that can be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    /// User accounts
    Users,
    /// Expense categories
    Categories,
    /// Variable expenses
    Expenses,
    /// Fixed expense templates
    FixedExpenses,
    /// Per-month fixed expense checklists
    FixedExpenseChecklist,
    /// Investment positions
    Investments,
    /// Investment value history
    InvestmentHistory,
    /// Reserve funds
    Reserves,
    /// Reserve value history
    ReserveHistory,
    /// Monthly income rows
    MonthlyIncome,
    /// Derived monthly summaries
    Summary,
}

impl Resource {
    /// Name used as the first key part.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Categories => "categories",
            Self::Expenses => "expenses",
            Self::FixedExpenses => "fixed_expenses",
            Self::FixedExpenseChecklist => "fixed_expense_checklist",
            Self::Investments => "investments",
            Self::InvestmentHistory => "investment_history",
            Self::Reserves => "reserves",
            Self::ReserveHistory => "reserve_history",
            Self::MonthlyIncome => "monthly_income",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of one cached query, or a prefix of several.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    parts: Vec<String>,
}

impl QueryKey {
    /// Key for every query of `resource`, regardless of scope.
    #[must_use]
    pub fn resource(resource: Resource) -> Self {
        Self {
            parts: vec![resource.as_str().to_string()],
        }
    }

    /// Key for every query of `resource` within `scope`.
    #[must_use]
    pub fn scoped(resource: Resource, scope: &Scope) -> Self {
        Self::resource(resource).with(scope.key_part())
    }

    /// Appends a narrowing part.
    #[must_use]
    pub fn with(mut self, part: impl fmt::Display) -> Self {
        self.parts.push(part.to_string());
        self
    }

    /// Appends a `year-month` part.
    #[must_use]
    pub fn with_month(self, year: i32, month: u32) -> Self {
        self.with(format!("{year:04}-{month:02}"))
    }

    /// All parts in order.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// True when `other` equals this key or extends it.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.parts.starts_with(&self.parts)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_key_parts() {
        let shared = QueryKey::scoped(Resource::Expenses, &Scope::Unscoped).with_month(2024, 3);
        assert_eq!(shared.to_string(), "expenses/shared/2024-03");

        let household = QueryKey::scoped(Resource::Reserves, &Scope::scoped("h1"));
        assert_eq!(household.to_string(), "reserves/household:h1");
    }

    #[test]
    fn test_prefix_matching() {
        let all_expenses = QueryKey::resource(Resource::Expenses);
        let shared = QueryKey::scoped(Resource::Expenses, &Scope::Unscoped);
        let march = shared.clone().with_month(2024, 3);
        let other_household = QueryKey::scoped(Resource::Expenses, &Scope::scoped("h2"));

        assert!(all_expenses.is_prefix_of(&march));
        assert!(shared.is_prefix_of(&march));
        assert!(march.is_prefix_of(&march));
        assert!(!march.is_prefix_of(&shared));
        assert!(!shared.is_prefix_of(&other_household));
        assert!(!all_expenses.is_prefix_of(&QueryKey::resource(Resource::ReserveHistory)));
    }

    #[test]
    fn test_reserve_history_is_not_under_reserves() {
        let reserves = QueryKey::resource(Resource::Reserves);
        let history = QueryKey::resource(Resource::ReserveHistory).with(1);
        assert!(!reserves.is_prefix_of(&history));
    }
}
