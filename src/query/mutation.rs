//! Mutation layer.
//!
//! Every write goes through [`run_mutation`], which runs the write accessor and,
//! only if it succeeded, invalidates the resources that [`MutationKind`]
//! declares as dependent. The dependency graph lives in one match instead of
//! being repeated at each call site.

use crate::core::scope::Scope;
use crate::errors::Result;
use crate::query::{QueryClient, QueryKey, Resource};
use std::future::Future;
use tracing::{debug, warn};

/// Every write the session can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Register a user
    CreateUser,
    /// Add a category
    CreateCategory,
    /// Rename a category
    RenameCategory,
    /// Soft-delete a category
    DeleteCategory,
    /// Record an expense
    CreateExpense,
    /// Edit an expense
    UpdateExpense,
    /// Remove an expense
    DeleteExpense,
    /// Add a fixed expense template
    CreateFixedExpense,
    /// Edit a fixed expense template
    UpdateFixedExpense,
    /// Deactivate or remove a fixed expense template
    DeleteFixedExpense,
    /// Tick or untick a bill on the monthly checklist
    SetFixedExpensePaid,
    /// Add an investment
    CreateInvestment,
    /// Edit an investment's name, category or target
    UpdateInvestment,
    /// Record a new investment value
    UpdateInvestmentValue,
    /// Remove an investment and its history
    DeleteInvestment,
    /// Add a reserve
    CreateReserve,
    /// Edit a reserve's name, category or target
    UpdateReserve,
    /// Record a new reserve value
    UpdateReserveValue,
    /// Remove a reserve and its history
    DeleteReserve,
    /// Save a month's income
    SaveMonthlyIncome,
    /// Seed admin defaults
    SeedDefaults,
}

impl MutationKind {
    /// Resources whose cached reads become stale when this write succeeds.
    #[must_use]
    pub const fn invalidates(self) -> &'static [Resource] {
        use Resource::{
            Categories, Expenses, FixedExpenseChecklist, FixedExpenses, InvestmentHistory,
            Investments, MonthlyIncome, ReserveHistory, Reserves, Summary, Users,
        };

        match self {
            Self::CreateUser => &[Users],
            Self::CreateCategory | Self::RenameCategory | Self::DeleteCategory => {
                &[Categories, Expenses, FixedExpenses, FixedExpenseChecklist, Summary]
            }
            Self::CreateExpense | Self::UpdateExpense | Self::DeleteExpense => &[Expenses, Summary],
            Self::CreateFixedExpense | Self::UpdateFixedExpense | Self::DeleteFixedExpense => {
                &[FixedExpenses, FixedExpenseChecklist, Summary]
            }
            Self::SetFixedExpensePaid => &[FixedExpenseChecklist, Summary],
            Self::CreateInvestment | Self::UpdateInvestment => &[Investments],
            Self::UpdateInvestmentValue | Self::DeleteInvestment => {
                &[Investments, InvestmentHistory]
            }
            Self::CreateReserve | Self::UpdateReserve => &[Reserves],
            Self::UpdateReserveValue | Self::DeleteReserve => &[Reserves, ReserveHistory],
            Self::SaveMonthlyIncome => &[MonthlyIncome, Summary],
            Self::SeedDefaults => &[Categories, FixedExpenses, FixedExpenseChecklist, Summary],
        }
    }
}

/// Runs `write` and invalidates the dependent resources within `scope` if it
/// succeeded. Each dependent resource is invalidated exactly once.
pub async fn run_mutation<T, Fut>(
    client: &QueryClient,
    scope: &Scope,
    kind: MutationKind,
    write: Fut,
) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    match write.await {
        Ok(value) => {
            for resource in kind.invalidates() {
                client
                    .invalidate(&QueryKey::scoped(*resource, scope))
                    .await;
            }
            debug!(?kind, resources = kind.invalidates().len(), "mutation applied");
            Ok(value)
        }
        Err(error) => {
            warn!(?kind, %error, "mutation failed");
            Err(error)
        }
    }
}
