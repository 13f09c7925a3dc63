//! A logged-in session.
//!
//! [`Session`] is what the screens talk to. It owns the backend handle, a
//! [`QueryClient`], the [`Scope`] resolved at startup and the logged-in
//! user. Reads go through the cache under `resource / scope / params` keys;
//! writes go through [`run_mutation`] so every dependent read is invalidated
//! when they succeed.

use crate::{
    config::defaults::Config,
    core::{
        category, defaults, expense, fixed_expense, income, investment,
        report::{self, MonthlySummary},
        reserve,
        scope::Scope,
        user,
    },
    entities::{
        category as category_entity, expense as expense_entity, fixed_expense as fixed_entity,
        fixed_expense_check, investment as investment_entity, investment_history, monthly_income,
        reserve as reserve_entity, reserve_history, user as user_entity,
    },
    errors::Result,
    query::{MutationKind, QueryClient, QueryKey, QueryState, Resource, run_mutation},
};
use chrono::{Datelike, Utc};
use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Backend handle, cache, scope and user for one logged-in person.
#[derive(Debug, Clone)]
pub struct Session {
    /// Backend connection
    pub database: DatabaseConnection,
    /// Query cache shared with every clone of this session
    pub client: QueryClient,
    /// Scope resolved at startup
    pub scope: Scope,
    /// Logged-in user; the actor for audited writes
    pub user: user_entity::Model,
}

impl Session {
    /// Logs `email` in and builds a session around it.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::UserNotFound`] if nobody is registered
    /// under that email.
    #[instrument(skip(database, client))]
    pub async fn login(
        database: DatabaseConnection,
        client: QueryClient,
        scope: Scope,
        email: &str,
    ) -> Result<Self> {
        let user = user::login(&database, email).await?;
        info!(user_id = user.id, %scope, "Session started");
        Ok(Self {
            database,
            client,
            scope,
            user,
        })
    }

    fn key(&self, resource: Resource) -> QueryKey {
        QueryKey::scoped(resource, &self.scope)
    }

    // Reads

    /// Users visible in this scope.
    pub async fn users(&self) -> QueryState<Vec<user_entity::Model>> {
        self.client
            .fetch_query(&self.key(Resource::Users), || {
                user::list_users(&self.database, &self.scope)
            })
            .await
    }

    /// Active categories.
    pub async fn categories(&self) -> QueryState<Vec<category_entity::Model>> {
        self.client
            .fetch_query(&self.key(Resource::Categories), || {
                category::list_categories(&self.database, &self.scope)
            })
            .await
    }

    /// Expenses of one month.
    pub async fn expenses(&self, year: i32, month: u32) -> QueryState<Vec<expense_entity::Model>> {
        let key = self.key(Resource::Expenses).with_month(year, month);
        self.client
            .fetch_query(&key, || {
                expense::list_expenses_for_month(&self.database, &self.scope, year, month)
            })
            .await
    }

    /// Fixed expense templates, optionally including deactivated ones.
    pub async fn fixed_expenses(
        &self,
        include_inactive: bool,
    ) -> QueryState<Vec<fixed_entity::Model>> {
        let key = self
            .key(Resource::FixedExpenses)
            .with(if include_inactive { "all" } else { "active" });
        self.client
            .fetch_query(&key, || {
                fixed_expense::list_fixed_expenses(&self.database, &self.scope, include_inactive)
            })
            .await
    }

    /// The fixed expense checklist of one month.
    pub async fn checklist(
        &self,
        year: i32,
        month: u32,
    ) -> QueryState<Vec<fixed_expense::ChecklistItem>> {
        let key = self.key(Resource::FixedExpenseChecklist).with_month(year, month);
        self.client
            .fetch_query(&key, || {
                fixed_expense::checklist(&self.database, &self.scope, year, month)
            })
            .await
    }

    /// Investments.
    pub async fn investments(&self) -> QueryState<Vec<investment_entity::Model>> {
        self.client
            .fetch_query(&self.key(Resource::Investments), || {
                investment::list_investments(&self.database, &self.scope)
            })
            .await
    }

    /// Value history of one investment, newest first.
    pub async fn investment_history(&self, id: i64) -> QueryState<Vec<investment_history::Model>> {
        let key = self.key(Resource::InvestmentHistory).with(id);
        self.client
            .fetch_query(&key, || {
                investment::list_investment_history(&self.database, &self.scope, id)
            })
            .await
    }

    /// Reserves.
    pub async fn reserves(&self) -> QueryState<Vec<reserve_entity::Model>> {
        self.client
            .fetch_query(&self.key(Resource::Reserves), || {
                reserve::list_reserves(&self.database, &self.scope)
            })
            .await
    }

    /// Value history of one reserve, newest first.
    pub async fn reserve_history(&self, id: i64) -> QueryState<Vec<reserve_history::Model>> {
        let key = self.key(Resource::ReserveHistory).with(id);
        self.client
            .fetch_query(&key, || {
                reserve::list_reserve_history(&self.database, &self.scope, id)
            })
            .await
    }

    /// Income of one month, `None` if nothing was saved.
    pub async fn monthly_income(
        &self,
        year: i32,
        month: u32,
    ) -> QueryState<Option<monthly_income::Model>> {
        let key = self.key(Resource::MonthlyIncome).with_month(year, month);
        self.client
            .fetch_query(&key, || {
                income::get_monthly_income(&self.database, &self.scope, year, month)
            })
            .await
    }

    /// Every saved month of a year.
    pub async fn income_for_year(&self, year: i32) -> QueryState<Vec<monthly_income::Model>> {
        let key = self.key(Resource::MonthlyIncome).with(year);
        self.client
            .fetch_query(&key, || {
                income::list_income_for_year(&self.database, &self.scope, year)
            })
            .await
    }

    /// Income against spending for one month.
    pub async fn summary(&self, year: i32, month: u32) -> QueryState<MonthlySummary> {
        let key = self.key(Resource::Summary).with_month(year, month);
        self.client
            .fetch_query(&key, || {
                report::monthly_summary(&self.database, &self.scope, year, month)
            })
            .await
    }

    // Writes

    /// Registers another user in this scope.
    pub async fn create_user(&self, email: &str, display_name: &str) -> Result<user_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::CreateUser,
            user::create_user(&self.database, &self.scope, email, display_name),
        )
        .await
    }

    /// Adds a category.
    pub async fn create_category(&self, name: &str) -> Result<category_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::CreateCategory,
            category::create_category(&self.database, &self.scope, name),
        )
        .await
    }

    /// Renames a category.
    pub async fn rename_category(&self, id: i64, name: &str) -> Result<category_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::RenameCategory,
            category::rename_category(&self.database, &self.scope, id, name),
        )
        .await
    }

    /// Hides a category.
    pub async fn delete_category(&self, id: i64) -> Result<category_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::DeleteCategory,
            category::delete_category(&self.database, &self.scope, id),
        )
        .await
    }

    /// Records an expense made by the logged-in user.
    pub async fn create_expense(&self, input: expense::NewExpense) -> Result<expense_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::CreateExpense,
            expense::create_expense(&self.database, &self.scope, self.user.id, input),
        )
        .await
    }

    /// Edits an expense.
    pub async fn update_expense(
        &self,
        id: i64,
        input: expense::NewExpense,
    ) -> Result<expense_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::UpdateExpense,
            expense::update_expense(&self.database, &self.scope, id, input),
        )
        .await
    }

    /// Removes an expense.
    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::DeleteExpense,
            expense::delete_expense(&self.database, &self.scope, id),
        )
        .await
    }

    /// Adds a fixed expense template.
    pub async fn create_fixed_expense(
        &self,
        input: fixed_expense::NewFixedExpense,
    ) -> Result<fixed_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::CreateFixedExpense,
            fixed_expense::create_fixed_expense(&self.database, &self.scope, input),
        )
        .await
    }

    /// Edits a fixed expense template.
    pub async fn update_fixed_expense(
        &self,
        id: i64,
        input: fixed_expense::NewFixedExpense,
    ) -> Result<fixed_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::UpdateFixedExpense,
            fixed_expense::update_fixed_expense(&self.database, &self.scope, id, input),
        )
        .await
    }

    /// Activates or deactivates a fixed expense template.
    pub async fn set_fixed_expense_active(
        &self,
        id: i64,
        is_active: bool,
    ) -> Result<fixed_entity::Model> {
        let kind = if is_active {
            MutationKind::UpdateFixedExpense
        } else {
            MutationKind::DeleteFixedExpense
        };
        run_mutation(
            &self.client,
            &self.scope,
            kind,
            fixed_expense::set_fixed_expense_active(&self.database, &self.scope, id, is_active),
        )
        .await
    }

    /// Removes a fixed expense template with its checks.
    pub async fn delete_fixed_expense(&self, id: i64) -> Result<()> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::DeleteFixedExpense,
            fixed_expense::delete_fixed_expense(&self.database, &self.scope, id),
        )
        .await
    }

    /// Ticks or unticks a bill, showing the new state in the cached
    /// checklist before the write finishes.
    ///
    /// If the write fails the checklist is invalidated so the next read
    /// shows what the backend holds.
    #[instrument(skip(self))]
    pub async fn set_fixed_expense_paid(
        &self,
        id: i64,
        year: i32,
        month: u32,
        is_paid: bool,
    ) -> Result<fixed_expense_check::Model> {
        let key = self.key(Resource::FixedExpenseChecklist).with_month(year, month);

        if self
            .client
            .get_query_data::<Vec<fixed_expense::ChecklistItem>>(&key)
            .await
            .is_some()
        {
            self.client
                .update_query_data(&key, |items: Option<Vec<fixed_expense::ChecklistItem>>| {
                    let mut items = items.unwrap_or_default();
                    for item in items.iter_mut().filter(|i| i.fixed_expense.id == id) {
                        item.is_paid = is_paid;
                        item.paid_at = is_paid.then(Utc::now);
                    }
                    items
                })
                .await;
            debug!(%key, "Applied optimistic checklist update");
        }

        let result = run_mutation(
            &self.client,
            &self.scope,
            MutationKind::SetFixedExpensePaid,
            fixed_expense::set_paid(&self.database, &self.scope, id, year, month, is_paid),
        )
        .await;
        if result.is_err() {
            self.client.invalidate(&key).await;
        }
        result
    }

    /// Adds an investment.
    pub async fn create_investment(
        &self,
        input: investment::NewInvestment,
    ) -> Result<investment_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::CreateInvestment,
            investment::create_investment(&self.database, &self.scope, input),
        )
        .await
    }

    /// Edits an investment without touching its value.
    pub async fn update_investment_details(
        &self,
        id: i64,
        details: investment::InvestmentDetails,
    ) -> Result<investment_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::UpdateInvestment,
            investment::update_investment_details(&self.database, &self.scope, id, details),
        )
        .await
    }

    /// Records a new investment value on behalf of the logged-in user.
    pub async fn update_investment_value(
        &self,
        id: i64,
        new_value: f64,
    ) -> Result<investment::InvestmentValueChange> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::UpdateInvestmentValue,
            investment::update_investment_value(
                &self.database,
                &self.scope,
                id,
                new_value,
                self.user.id,
            ),
        )
        .await
    }

    /// Removes an investment and its history.
    pub async fn delete_investment(&self, id: i64) -> Result<()> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::DeleteInvestment,
            investment::delete_investment(&self.database, &self.scope, id),
        )
        .await
    }

    /// Adds a reserve.
    pub async fn create_reserve(&self, input: reserve::NewReserve) -> Result<reserve_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::CreateReserve,
            reserve::create_reserve(&self.database, &self.scope, input),
        )
        .await
    }

    /// Edits a reserve without touching its value.
    pub async fn update_reserve_details(
        &self,
        id: i64,
        details: reserve::ReserveDetails,
    ) -> Result<reserve_entity::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::UpdateReserve,
            reserve::update_reserve_details(&self.database, &self.scope, id, details),
        )
        .await
    }

    /// Records a new reserve value on behalf of the logged-in user.
    pub async fn update_reserve_value(
        &self,
        id: i64,
        new_value: f64,
    ) -> Result<reserve::ReserveValueChange> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::UpdateReserveValue,
            reserve::update_reserve_value(&self.database, &self.scope, id, new_value, self.user.id),
        )
        .await
    }

    /// Removes a reserve and its history.
    pub async fn delete_reserve(&self, id: i64) -> Result<()> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::DeleteReserve,
            reserve::delete_reserve(&self.database, &self.scope, id),
        )
        .await
    }

    /// Saves the income of one month.
    pub async fn save_monthly_income(
        &self,
        year: i32,
        month: u32,
        input: income::IncomeInput,
    ) -> Result<monthly_income::Model> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::SaveMonthlyIncome,
            income::save_monthly_income(&self.database, &self.scope, year, month, input),
        )
        .await
    }

    /// Seeds the admin defaults into this scope.
    pub async fn seed_defaults(&self, config: &Config) -> Result<defaults::SeedReport> {
        run_mutation(
            &self.client,
            &self.scope,
            MutationKind::SeedDefaults,
            defaults::seed_defaults(&self.database, &self.scope, config),
        )
        .await
    }

    // Cache control

    /// Marks every cached read of `resource` in this scope stale. This is
    /// what a manual "retry" does.
    pub async fn refresh(&self, resource: Resource) -> usize {
        self.client.invalidate(&self.key(resource)).await
    }

    /// Starts background revalidation of the dashboard reads for the
    /// current month. Returns the spawned refreshes.
    pub async fn warm_up(&self) -> Vec<JoinHandle<()>> {
        let today = Utc::now().date_naive();
        let (year, month) = (today.year(), today.month());
        let mut tasks = Vec::new();

        let (db, scope) = (self.database.clone(), self.scope.clone());
        tasks.extend(
            self.client
                .revalidate_in_background(self.key(Resource::Categories), move || {
                    let (db, scope) = (db.clone(), scope.clone());
                    async move { category::list_categories(&db, &scope).await }
                })
                .await
                .task,
        );

        let (db, scope) = (self.database.clone(), self.scope.clone());
        tasks.extend(
            self.client
                .revalidate_in_background(self.key(Resource::Reserves), move || {
                    let (db, scope) = (db.clone(), scope.clone());
                    async move { reserve::list_reserves(&db, &scope).await }
                })
                .await
                .task,
        );

        let (db, scope) = (self.database.clone(), self.scope.clone());
        tasks.extend(
            self.client
                .revalidate_in_background(self.key(Resource::Investments), move || {
                    let (db, scope) = (db.clone(), scope.clone());
                    async move { investment::list_investments(&db, &scope).await }
                })
                .await
                .task,
        );

        let (db, scope) = (self.database.clone(), self.scope.clone());
        tasks.extend(
            self.client
                .revalidate_in_background(
                    self.key(Resource::Summary).with_month(year, month),
                    move || {
                        let (db, scope) = (db.clone(), scope.clone());
                        async move { report::monthly_summary(&db, &scope, year, month).await }
                    },
                )
                .await
                .task,
        );

        debug!(spawned = tasks.len(), "Warm-up started");
        tasks
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::ReserveHistory;
    use crate::errors::Error;
    use crate::test_utils::*;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use std::time::Duration;

    async fn session_with_user(scope: Scope) -> Result<Session> {
        let db = setup_test_db().await?;
        create_test_user_in(&db, "u@example.com", &scope).await?;
        Session::login(db, QueryClient::default(), scope, "u@example.com").await
    }

    #[tokio::test]
    async fn test_login_unknown_user() -> Result<()> {
        let db = setup_test_db().await?;
        let result = Session::login(db, QueryClient::default(), Scope::Unscoped, "x@y.z").await;
        assert!(matches!(result, Err(Error::UserNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_reserve_value_update_from_1000_to_1500() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        let reserve = create_test_reserve(&session.database, &session.scope, "Emergency", 1000.0).await?;
        let reserves_key = QueryKey::scoped(Resource::Reserves, &session.scope);

        let before = session.reserves().await.into_result()?;
        assert_eq!(before[0].current_value, 1000.0);
        assert!(session.client.is_fresh(&reserves_key).await);

        let change = session.update_reserve_value(reserve.id, 1500.0).await?;
        assert_eq!(change.history.old_value, 1000.0);
        assert_eq!(change.history.new_value, 1500.0);
        assert_eq!(change.history.changed_by, session.user.id);
        assert_eq!(change.reserve.current_value, 1500.0);
        assert_eq!(ReserveHistory::find().count(&session.database).await?, 1);

        assert!(!session.client.is_fresh(&reserves_key).await);
        let fetches_before = session.client.stats().fetches;
        let after = session.reserves().await.into_result()?;
        assert_eq!(after[0].current_value, 1500.0);
        assert_eq!(session.client.stats().fetches, fetches_before + 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_value_update_during_in_flight_read_is_not_lost() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        let reserve = create_test_reserve(&session.database, &session.scope, "Emergency", 1000.0).await?;
        let reserves_key = QueryKey::scoped(Resource::Reserves, &session.scope);

        let (db, scope) = (session.database.clone(), session.scope.clone());
        let slow_read = move || {
            let (db, scope) = (db.clone(), scope.clone());
            async move {
                let reserves = reserve::list_reserves(&db, &scope).await?;
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, Error>(reserves)
            }
        };

        let (in_flight, change) = tokio::join!(session.client.fetch_query(&reserves_key, slow_read), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.update_reserve_value(reserve.id, 1500.0).await
        });
        assert!(in_flight.data.is_some());
        assert_eq!(change?.reserve.current_value, 1500.0);

        let after = session.reserves().await.into_result()?;
        assert_eq!(after[0].current_value, 1500.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_within_ttl_hit_cache() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        session.categories().await.into_result()?;
        session.categories().await.into_result()?;

        let stats = session.client.stats();
        assert_eq!(stats.fetches, 1);
        assert_eq!(stats.hits, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_mutation_invalidates_dependents() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        let category = session.create_category("Food").await?;
        session.expenses(2024, 3).await.into_result()?;
        session.summary(2024, 3).await.into_result()?;
        session.reserves().await.into_result()?;

        session
            .create_expense(new_expense("Lunch", 12.5, category.id, date(2024, 3, 4)))
            .await?;

        let expenses_key = QueryKey::scoped(Resource::Expenses, &session.scope).with_month(2024, 3);
        let summary_key = QueryKey::scoped(Resource::Summary, &session.scope).with_month(2024, 3);
        let reserves_key = QueryKey::scoped(Resource::Reserves, &session.scope);
        assert!(!session.client.is_fresh(&expenses_key).await);
        assert!(!session.client.is_fresh(&summary_key).await);
        assert!(session.client.is_fresh(&reserves_key).await);

        let summary = session.summary(2024, 3).await.into_result()?;
        assert_eq!(summary.expense_total, 12.5);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        session.categories().await.into_result()?;
        let invalidations = session.client.stats().invalidations;

        let result = session.rename_category(999, "Nope").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert_eq!(session.client.stats().invalidations, invalidations);
        assert!(
            session
                .client
                .is_fresh(&QueryKey::scoped(Resource::Categories, &session.scope))
                .await
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_read_reports_error() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        let state = session.expenses(2024, 13).await;
        assert!(state.data.is_none());
        assert!(matches!(state.error, Some(Error::InvalidInput { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_optimistic_checklist_toggle() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        let category = session.create_category("Housing").await?;
        let rent = session
            .create_fixed_expense(fixed_expense::NewFixedExpense {
                description: "Rent".to_string(),
                amount: 900.0,
                category_id: category.id,
                due_day: 1,
            })
            .await?;

        let items = session.checklist(2024, 3).await.into_result()?;
        assert!(!items[0].is_paid);

        session.set_fixed_expense_paid(rent.id, 2024, 3, true).await?;
        let key = QueryKey::scoped(Resource::FixedExpenseChecklist, &session.scope).with_month(2024, 3);
        let cached: Vec<fixed_expense::ChecklistItem> =
            session.client.get_query_data(&key).await.unwrap();
        assert!(cached[0].is_paid);
        assert!(!session.client.is_fresh(&key).await);

        let refetched = session.checklist(2024, 3).await.into_result()?;
        assert!(refetched[0].is_paid);

        let failed = session.set_fixed_expense_paid(999, 2024, 3, true).await;
        assert!(failed.is_err());
        assert!(!session.client.is_fresh(&key).await);
        Ok(())
    }

    #[tokio::test]
    async fn test_scoped_sessions_do_not_share_rows_or_keys() -> Result<()> {
        let db = setup_test_db().await?;
        let client = QueryClient::default();
        create_test_user_in(&db, "a@example.com", &Scope::scoped("h1")).await?;
        create_test_user_in(&db, "b@example.com", &Scope::scoped("h2")).await?;
        let a = Session::login(db.clone(), client.clone(), Scope::scoped("h1"), "a@example.com").await?;
        let b = Session::login(db, client, Scope::scoped("h2"), "b@example.com").await?;

        a.create_category("Only A").await?;
        assert_eq!(a.categories().await.into_result()?.len(), 1);
        assert!(b.categories().await.into_result()?.is_empty());
        assert_eq!(a.users().await.into_result()?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_and_warm_up() -> Result<()> {
        let session = session_with_user(Scope::Unscoped).await?;
        session.reserves().await.into_result()?;
        assert_eq!(session.refresh(Resource::Reserves).await, 1);

        for task in session.warm_up().await {
            task.await.unwrap();
        }
        let reserves_key = QueryKey::scoped(Resource::Reserves, &session.scope);
        assert!(session.client.is_fresh(&reserves_key).await);
        assert!(
            session
                .client
                .is_fresh(&QueryKey::scoped(Resource::Categories, &session.scope))
                .await
        );
        Ok(())
    }
}
