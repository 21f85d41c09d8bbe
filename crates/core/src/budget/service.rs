//! Budget aggregation service.

use std::collections::HashMap;

use chrono::Datelike;
use rust_decimal::Decimal;

use super::detail::DetailIndex;
use super::types::{BudgetItem, BudgetOverview, BudgetTotals, CategorySummary, ExpenseRecord};
use crate::dates::parse_date;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Aggregates budget items into per-category summaries for `year`.
    ///
    /// - Only items with `year == year` participate.
    /// - Items without a category name count toward the year totals but are
    ///   left out of the breakdown.
    /// - Items sharing a category are folded together by summing their
    ///   precomputed `budget`, `total_expenses` and `remaining_balance`.
    /// - Categories keep the order of their first appearance.
    ///
    /// `expenses` feed only the date-derived `year_obligations` total.
    /// Sums saturate at the `Decimal` bounds instead of overflowing.
    #[must_use]
    pub fn aggregate(
        budget_items: &[BudgetItem],
        expenses: &[ExpenseRecord],
        year: i32,
    ) -> BudgetOverview {
        let mut categories: Vec<CategorySummary> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut total_budget = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;

        for item in budget_items.iter().filter(|item| item.year == Some(year)) {
            total_budget = total_budget.saturating_add(item.budget);
            total_expenses = total_expenses.saturating_add(item.total_expenses);

            let Some(name) = item.category_name.as_deref() else {
                continue;
            };

            if let Some(&index) = positions.get(name) {
                let summary = &mut categories[index];
                summary.budget = summary.budget.saturating_add(item.budget);
                summary.expenses = summary.expenses.saturating_add(item.total_expenses);
                summary.remaining = summary.remaining.saturating_add(item.remaining_balance);
            } else {
                positions.insert(name, categories.len());
                categories.push(CategorySummary {
                    category: name.to_string(),
                    budget: item.budget,
                    expenses: item.total_expenses,
                    remaining: item.remaining_balance,
                    usage_percent: Decimal::ZERO,
                });
            }
        }

        for summary in &mut categories {
            summary.usage_percent = Self::usage_percent(summary.expenses, summary.budget);
        }

        BudgetOverview {
            year,
            categories,
            totals: BudgetTotals {
                total_budget,
                total_expenses,
                total_savings: total_budget.saturating_sub(total_expenses),
                year_obligations: Self::year_obligations(expenses, year),
                usage_percent: Self::usage_percent(total_expenses, total_budget),
            },
        }
    }

    /// Usage percentage: `expenses / budget * 100` when both are positive, else zero.
    #[must_use]
    pub fn usage_percent(expenses: Decimal, budget: Decimal) -> Decimal {
        if expenses <= Decimal::ZERO || budget <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        expenses
            .checked_div(budget)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// Sums obligations whose own date falls in `year`.
    ///
    /// Independent of the budget items: this is the figure the item-derived
    /// total is cross-checked against. Undated or unreadable dates are skipped.
    #[must_use]
    pub fn year_obligations(expenses: &[ExpenseRecord], year: i32) -> Decimal {
        expenses
            .iter()
            .filter(|expense| parse_date(&expense.date).is_some_and(|date| date.year() == year))
            .fold(Decimal::ZERO, |total, expense| total.saturating_add(expense.amount))
    }

    /// Case-insensitive substring search over category names.
    ///
    /// An empty query keeps every category. The input is left untouched.
    #[must_use]
    pub fn filter_categories(categories: &[CategorySummary], query: &str) -> Vec<CategorySummary> {
        let needle = query.to_lowercase();
        categories
            .iter()
            .filter(|summary| summary.category.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Obligations charged to `category` through their budget item.
    ///
    /// Obligations referencing a budget item that does not exist are skipped.
    #[must_use]
    pub fn detail_for<'e>(
        category: &str,
        budget_items: &[BudgetItem],
        expenses: &'e [ExpenseRecord],
    ) -> Vec<&'e ExpenseRecord> {
        DetailIndex::new(budget_items).detail_for(category, expenses)
    }
}

impl BudgetOverview {
    /// Categories matching a search query.
    #[must_use]
    pub fn filtered(&self, query: &str) -> Vec<CategorySummary> {
        BudgetService::filter_categories(&self.categories, query)
    }
}
