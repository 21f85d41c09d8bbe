//! Budget data types.

use rao_shared::types::lenient;
use rao_shared::types::{BudgetItemId, ExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budget line item: one per category and fiscal year within a funding type.
///
/// `total_expenses` and `remaining_balance` are precomputed upstream and
/// treated as authoritative; `remaining_balance == budget - total_expenses`
/// is assumed, never checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Budget item ID.
    #[serde(default, deserialize_with = "lenient::optional_key")]
    pub id: Option<BudgetItemId>,
    /// Category name, unique per year within a funding type.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub category_name: Option<String>,
    /// Fiscal year.
    #[serde(default, deserialize_with = "lenient::optional_year")]
    pub year: Option<i32>,
    /// Allotted amount.
    #[serde(default, deserialize_with = "lenient::amount_or_zero")]
    pub budget: Decimal,
    /// Total obligated against this item.
    #[serde(default, deserialize_with = "lenient::amount_or_zero")]
    pub total_expenses: Decimal,
    /// Remaining balance.
    #[serde(default, deserialize_with = "lenient::amount_or_zero")]
    pub remaining_balance: Decimal,
}

impl BudgetItem {
    /// Creates a budget item whose remaining balance is `budget - total_expenses`.
    #[must_use]
    pub fn new(
        id: i64,
        category_name: impl Into<String>,
        year: i32,
        budget: Decimal,
        total_expenses: Decimal,
    ) -> Self {
        Self {
            id: Some(BudgetItemId(id)),
            category_name: Some(category_name.into()),
            year: Some(year),
            budget,
            total_expenses,
            remaining_balance: budget.saturating_sub(total_expenses),
        }
    }
}

/// An obligation transaction charged against one budget item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense ID.
    #[serde(
        default,
        alias = "expenses_id",
        deserialize_with = "lenient::optional_key"
    )]
    pub id: Option<ExpenseId>,
    /// Referenced budget item.
    #[serde(default, deserialize_with = "lenient::optional_key")]
    pub budget_id: Option<BudgetItemId>,
    /// Obligation date as delivered upstream (encoding varies).
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub date: String,
    /// Obligated amount.
    #[serde(default, deserialize_with = "lenient::amount_or_zero")]
    pub amount: Decimal,
    /// Particulars.
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub particulars: String,
    /// Remarks.
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub remarks: String,
}

impl ExpenseRecord {
    /// Creates an expense record with empty remarks.
    #[must_use]
    pub fn new(
        id: i64,
        budget_id: i64,
        date: impl Into<String>,
        amount: Decimal,
        particulars: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(ExpenseId(id)),
            budget_id: Some(BudgetItemId(budget_id)),
            date: date.into(),
            amount,
            particulars: particulars.into(),
            remarks: String::new(),
        }
    }

    /// Sets the remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }
}

/// Per-category summary for one year. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category name.
    pub category: String,
    /// Allotted amount.
    pub budget: Decimal,
    /// Obligated amount.
    pub expenses: Decimal,
    /// Remaining balance.
    pub remaining: Decimal,
    /// Usage percentage (`expenses / budget * 100`, zero when undefined).
    pub usage_percent: Decimal,
}

/// Year totals for the active funding type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTotals {
    /// Sum of budgets for the year.
    pub total_budget: Decimal,
    /// Sum of precomputed item expense totals for the year.
    pub total_expenses: Decimal,
    /// `total_budget - total_expenses`.
    pub total_savings: Decimal,
    /// Sum of obligations whose own date falls in the year.
    pub year_obligations: Decimal,
    /// Overall usage percentage from the item-derived totals.
    pub usage_percent: Decimal,
}

impl BudgetTotals {
    /// Difference between the date-derived and item-derived expense totals.
    ///
    /// Zero when the upstream data is consistent. Informational only.
    #[must_use]
    pub fn obligation_discrepancy(&self) -> Decimal {
        self.year_obligations.saturating_sub(self.total_expenses)
    }
}

/// Aggregated view of one funding type for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOverview {
    /// Year the overview was built for.
    pub year: i32,
    /// Categories in order of first appearance.
    pub categories: Vec<CategorySummary>,
    /// Year totals.
    pub totals: BudgetTotals,
}

impl BudgetOverview {
    /// Looks up a category by exact name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == name)
    }

    /// Headline figures shown above the category breakdown.
    #[must_use]
    pub fn cards(&self) -> Vec<SummaryCard> {
        let year = self.year;
        vec![
            SummaryCard::new(
                format!("Total Budget {year}"),
                Some(self.totals.total_budget),
            ),
            SummaryCard::new(
                format!("Total Obligated amount {year}"),
                Some(self.totals.year_obligations),
            ),
            SummaryCard::new(format!("Total Implemented Amount {year}"), None),
            SummaryCard::new(format!("Total Disbursed Amount {year}"), None),
            SummaryCard::new(format!("Savings {year}"), Some(self.totals.total_savings)),
        ]
    }
}

/// A headline card; `amount` is `None` while the figure is not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    /// Card title.
    pub title: String,
    /// Card amount.
    pub amount: Option<Decimal>,
}

impl SummaryCard {
    /// Creates a card.
    #[must_use]
    pub fn new(title: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            title: title.into(),
            amount,
        }
    }
}
