//! Report generation business logic.
//!
//! Summaries are computed from the accessors in this module's siblings and
//! returned as plain data. Formatting into text happens in
//! [`format_monthly_summary`].

use crate::{
    config::defaults::IncomeConfig,
    core::{category, expense, fixed_expense, income, scope::Scope},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashMap;
use tracing::instrument;

/// Money spent in one category during a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category id
    pub category_id: i64,
    /// Category name at report time
    pub name: String,
    /// Sum of the month's expenses
    pub total: f64,
}

/// Income against spending for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// Calendar year
    pub year: i32,
    /// Month, 1..=12
    pub month: u32,
    /// Income breakdown, if saved
    pub income: Option<income::IncomeInput>,
    /// Sum of all income fields
    pub income_total: f64,
    /// Sum of variable expenses
    pub expense_total: f64,
    /// Variable expenses per category, largest first
    pub by_category: Vec<CategoryTotal>,
    /// Sum of all active fixed expenses
    pub fixed_total: f64,
    /// Fixed expenses ticked off this month
    pub fixed_paid: f64,
    /// Fixed expenses still open this month
    pub fixed_pending: f64,
    /// Income minus expenses minus fixed expenses
    pub remaining: f64,
}

/// Totals over a set of investments or reserves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HoldingsSummary {
    /// Number of holdings
    pub count: usize,
    /// Sum of current values
    pub total_value: f64,
    /// Sum of targets, for holdings that have one
    pub total_target: f64,
    /// Value of targeted holdings as a share of their targets
    pub progress_percent: f64,
}

/// Builds the summary for one month.
#[instrument(skip(db))]
pub async fn monthly_summary(
    db: &DatabaseConnection,
    scope: &Scope,
    year: i32,
    month: u32,
) -> Result<MonthlySummary> {
    let expenses = expense::list_expenses_for_month(db, scope, year, month).await?;
    let checklist = fixed_expense::checklist(db, scope, year, month).await?;
    let saved_income = income::get_monthly_income(db, scope, year, month).await?;

    // Hidden categories still own old expenses
    let names: HashMap<i64, String> = category::list_all_categories(db, scope)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut per_category: HashMap<i64, f64> = HashMap::new();
    for expense in &expenses {
        *per_category.entry(expense.category_id).or_default() += expense.amount;
    }
    let mut by_category: Vec<CategoryTotal> = per_category
        .into_iter()
        .map(|(category_id, total)| CategoryTotal {
            category_id,
            name: names
                .get(&category_id)
                .cloned()
                .unwrap_or_else(|| format!("#{category_id}")),
            total,
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.name.cmp(&b.name))
    });

    let expense_total: f64 = expenses.iter().map(|e| e.amount).sum();
    let fixed_total: f64 = checklist.iter().map(|i| i.fixed_expense.amount).sum();
    let fixed_paid: f64 = checklist
        .iter()
        .filter(|i| i.is_paid)
        .map(|i| i.fixed_expense.amount)
        .sum();
    let income_total = saved_income.as_ref().map_or(0.0, |m| m.total());
    let income = saved_income.map(|m| income::IncomeInput {
        contributor_one: m.contributor_one,
        contributor_two: m.contributor_two,
        other: m.other,
    });

    Ok(MonthlySummary {
        year,
        month,
        income,
        income_total,
        expense_total,
        by_category,
        fixed_total,
        fixed_paid,
        fixed_pending: fixed_total - fixed_paid,
        remaining: income_total - expense_total - fixed_total,
    })
}

/// Sums `(current_value, target_value)` pairs.
///
/// Progress only counts holdings that have a target, so an untargeted
/// holding does not inflate it.
#[must_use]
pub fn holdings_summary<I>(holdings: I) -> HoldingsSummary
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    let mut summary = HoldingsSummary::default();
    let mut targeted_value = 0.0;
    for (value, target) in holdings {
        summary.count += 1;
        summary.total_value += value;
        if let Some(target) = target {
            summary.total_target += target;
            targeted_value += value;
        }
    }
    summary.progress_percent = calculate_progress(targeted_value, summary.total_target);
    summary
}

/// Calculates `current` as a percentage of `target`.
///
/// Returns 0 when the target is zero. Values above 100 mean the target was
/// exceeded.
#[must_use]
pub fn calculate_progress(current: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }

    (current / target) * 100.0
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress is in [0, 100] and length is small
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {progress_percent:.1}%",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

/// Renders a monthly summary as plain text, using the configured contributor
/// labels for the income lines.
#[must_use]
pub fn format_monthly_summary(summary: &MonthlySummary, labels: &IncomeConfig) -> String {
    let mut lines = vec![format!("Summary for {}-{:02}", summary.year, summary.month)];

    match &summary.income {
        Some(income) => {
            lines.push(format!("  {}: ${:.2}", labels.contributor_one, income.contributor_one));
            lines.push(format!("  {}: ${:.2}", labels.contributor_two, income.contributor_two));
            lines.push(format!("  Other: ${:.2}", income.other));
        }
        None => lines.push("  No income recorded".to_string()),
    }
    lines.push(format!("Income: ${:.2}", summary.income_total));
    lines.push(format!("Expenses: ${:.2}", summary.expense_total));
    lines.extend(
        summary
            .by_category
            .iter()
            .map(|category| format!("  {}: ${:.2}", category.name, category.total)),
    );
    lines.push(format!(
        "Fixed: ${:.2} (paid ${:.2}, pending ${:.2})",
        summary.fixed_total, summary.fixed_paid, summary.fixed_pending
    ));
    lines.push(format!("Remaining: ${:.2}", summary.remaining));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{category::create_category, expense::create_expense, fixed_expense};
    use crate::test_utils::*;

    #[test]
    fn test_calculate_progress() {
        assert_eq!(calculate_progress(50.0, 100.0), 50.0);
        assert_eq!(calculate_progress(150.0, 100.0), 150.0);
        assert_eq!(calculate_progress(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(50.0, Some(4)), "[██░░] 50.0%");
        assert_eq!(format_progress_bar(120.0, Some(2)), "[██] 120.0%");
        assert_eq!(format_progress_bar(-5.0, Some(2)), "[░░] -5.0%");
    }

    #[test]
    fn test_format_monthly_summary_layout() {
        let summary = MonthlySummary {
            year: 2024,
            month: 7,
            income: Some(income::IncomeInput {
                contributor_one: 100.0,
                contributor_two: 50.0,
                other: 0.0,
            }),
            income_total: 150.0,
            expense_total: 20.0,
            by_category: vec![CategoryTotal {
                category_id: 1,
                name: "Food".to_string(),
                total: 20.0,
            }],
            fixed_total: 30.0,
            fixed_paid: 30.0,
            fixed_pending: 0.0,
            remaining: 100.0,
        };

        let text = format_monthly_summary(&summary, &IncomeConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Summary for 2024-07",
                "  Contributor 1: $100.00",
                "  Contributor 2: $50.00",
                "  Other: $0.00",
                "Income: $150.00",
                "Expenses: $20.00",
                "  Food: $20.00",
                "Fixed: $30.00 (paid $30.00, pending $0.00)",
                "Remaining: $100.00",
            ]
        );
    }

    #[test]
    fn test_holdings_summary_ignores_untargeted_for_progress() {
        let summary = holdings_summary([(500.0, Some(1000.0)), (200.0, None)]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_value, 700.0);
        assert_eq!(summary.total_target, 1000.0);
        assert_eq!(summary.progress_percent, 50.0);

        assert_eq!(holdings_summary(std::iter::empty()), HoldingsSummary::default());
    }

    #[tokio::test]
    async fn test_monthly_summary() -> Result<()> {
        let (db, user, groceries) = setup_with_category().await?;
        let scope = Scope::Unscoped;
        let travel = create_category(&db, &scope, "Travel").await?;

        create_expense(&db, &scope, user.id, new_expense("Market", 40.0, groceries.id, date(2024, 3, 2))).await?;
        create_expense(&db, &scope, user.id, new_expense("Bakery", 10.0, groceries.id, date(2024, 3, 9))).await?;
        create_expense(&db, &scope, user.id, new_expense("Train", 80.0, travel.id, date(2024, 3, 15))).await?;
        create_expense(&db, &scope, user.id, new_expense("April", 99.0, travel.id, date(2024, 4, 1))).await?;

        let rent = fixed_expense::create_fixed_expense(
            &db,
            &scope,
            fixed_expense::NewFixedExpense {
                description: "Rent".to_string(),
                amount: 1000.0,
                category_id: groceries.id,
                due_day: 5,
            },
        )
        .await?;
        fixed_expense::create_fixed_expense(
            &db,
            &scope,
            fixed_expense::NewFixedExpense {
                description: "Internet".to_string(),
                amount: 50.0,
                category_id: groceries.id,
                due_day: 10,
            },
        )
        .await?;
        fixed_expense::set_paid(&db, &scope, rent.id, 2024, 3, true).await?;

        income::save_monthly_income(
            &db,
            &scope,
            2024,
            3,
            income::IncomeInput {
                contributor_one: 2000.0,
                contributor_two: 1000.0,
                other: 0.0,
            },
        )
        .await?;

        let summary = monthly_summary(&db, &scope, 2024, 3).await?;
        assert_eq!(summary.income_total, 3000.0);
        assert_eq!(summary.expense_total, 130.0);
        assert_eq!(summary.by_category[0].name, "Travel");
        assert_eq!(summary.by_category[1].total, 50.0);
        assert_eq!(summary.fixed_total, 1050.0);
        assert_eq!(summary.fixed_paid, 1000.0);
        assert_eq!(summary.fixed_pending, 50.0);
        assert_eq!(summary.remaining, 1820.0);

        let text = format_monthly_summary(
            &summary,
            &IncomeConfig {
                contributor_one: "Alex".to_string(),
                contributor_two: "Sam".to_string(),
            },
        );
        assert!(text.starts_with("Summary for 2024-03"));
        assert!(text.contains("Alex: $2000.00"));
        assert!(text.contains("Travel: $80.00"));
        assert!(text.ends_with("Remaining: $1820.00"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_month() -> Result<()> {
        let db = setup_test_db().await?;
        let summary = monthly_summary(&db, &Scope::Unscoped, 2024, 1).await?;

        assert!(summary.income.is_none());
        assert!(summary.by_category.is_empty());
        assert_eq!(summary.remaining, 0.0);
        assert!(format_monthly_summary(&summary, &IncomeConfig::default())
            .contains("No income recorded"));
        Ok(())
    }
}
