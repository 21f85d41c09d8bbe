//! Dashboard routes: breakdown overview and per-category obligations.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use rao_core::budget::{BudgetOverview, CategorySummary, ExpenseRecord, SummaryCard};
use rao_core::dates::format_display_date;
use rao_core::funding::FundingType;
use rao_shared::types::ExpenseId;
use rao_shared::types::Money;
use rao_shared::types::money::fixed;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use super::{ViewQuery, parse_funding};
use crate::{AppState, error::ApiError};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/funding/{funding}/overview", get(get_overview))
        .route(
            "/funding/{funding}/categories/{category}/expenses",
            get(get_category_expenses),
        )
}

// ============================================================================
// Response Types
// ============================================================================

/// An amount with its peso rendering.
#[derive(Debug, Serialize)]
pub struct AmountResponse {
    /// Exact amount.
    pub amount: Decimal,
    /// `en-PH` rendering, e.g. `₱1,234.50`.
    pub display: String,
}

impl From<Decimal> for AmountResponse {
    fn from(amount: Decimal) -> Self {
        Self {
            amount,
            display: Money::new(amount).to_string(),
        }
    }
}

/// Response for the breakdown overview.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    /// Selected funding type.
    pub funding: FundingType,
    /// Funding selector label.
    pub label: &'static str,
    /// Breakdown title.
    pub title: &'static str,
    /// Fiscal year.
    pub year: i32,
    /// Search text applied to the categories.
    pub query: String,
    /// Year totals, unaffected by the search.
    pub totals: TotalsResponse,
    /// Headline cards.
    pub cards: Vec<CardResponse>,
    /// Matching categories in first-appearance order.
    pub categories: Vec<CategoryResponse>,
}

/// Year totals.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// Sum of budgets.
    pub total_budget: AmountResponse,
    /// Sum of item-derived expenses.
    pub total_expenses: AmountResponse,
    /// Budget minus expenses.
    pub total_savings: AmountResponse,
    /// Obligations dated in the year.
    pub year_obligations: AmountResponse,
    /// Date-derived minus item-derived obligations.
    pub obligation_discrepancy: AmountResponse,
    /// Overall usage, one decimal place.
    pub usage_percent: String,
}

/// Headline card.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    /// Card title.
    pub title: String,
    /// Amount, absent while not tracked.
    pub amount: Option<AmountResponse>,
}

impl From<SummaryCard> for CardResponse {
    fn from(card: SummaryCard) -> Self {
        Self {
            title: card.title,
            amount: card.amount.map(AmountResponse::from),
        }
    }
}

/// One breakdown row.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category name.
    pub category: String,
    /// Allotted amount.
    pub budget: AmountResponse,
    /// Obligated amount.
    pub expenses: AmountResponse,
    /// Remaining balance.
    pub remaining: AmountResponse,
    /// Usage, one decimal place.
    pub usage_percent: String,
}

impl From<CategorySummary> for CategoryResponse {
    fn from(summary: CategorySummary) -> Self {
        Self {
            usage_percent: fixed(summary.usage_percent, 1),
            category: summary.category,
            budget: summary.budget.into(),
            expenses: summary.expenses.into(),
            remaining: summary.remaining.into(),
        }
    }
}

impl OverviewResponse {
    fn new(funding: FundingType, query: &str, overview: BudgetOverview) -> Self {
        let totals = &overview.totals;
        let totals_response = TotalsResponse {
            total_budget: totals.total_budget.into(),
            total_expenses: totals.total_expenses.into(),
            total_savings: totals.total_savings.into(),
            year_obligations: totals.year_obligations.into(),
            obligation_discrepancy: totals.obligation_discrepancy().into(),
            usage_percent: fixed(totals.usage_percent, 1),
        };
        let cards = overview.cards().into_iter().map(CardResponse::from).collect();
        let categories = overview
            .filtered(query)
            .into_iter()
            .map(CategoryResponse::from)
            .collect();

        Self {
            funding,
            label: funding.label(),
            title: funding.title(),
            year: overview.year,
            query: query.to_string(),
            totals: totals_response,
            cards,
            categories,
        }
    }
}

/// Obligations of one category.
#[derive(Debug, Serialize)]
pub struct CategoryExpensesResponse {
    /// Selected funding type.
    pub funding: FundingType,
    /// Category name.
    pub category: String,
    /// Obligations in input order.
    pub expenses: Vec<ExpenseResponse>,
    /// Sum of the listed obligations.
    pub total: AmountResponse,
}

/// One obligation row.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Option<ExpenseId>,
    /// Long date, `No date` when missing.
    pub date: String,
    /// Particulars.
    pub particulars: String,
    /// Obligated amount.
    pub amount: AmountResponse,
    /// Remarks.
    pub remarks: String,
}

impl From<&ExpenseRecord> for ExpenseResponse {
    fn from(expense: &ExpenseRecord) -> Self {
        Self {
            id: expense.id,
            date: format_display_date(&expense.date),
            particulars: expense.particulars.clone(),
            amount: expense.amount.into(),
            remarks: expense.remarks.clone(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /funding/{funding}/overview
async fn get_overview(
    State(state): State<AppState>,
    Path(funding): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let funding = parse_funding(&funding)?;
    let year = query.year()?;

    let records = state.source.fetch(funding).await?;
    if records.is_loading() {
        debug!(%funding, "Records still loading; serving empty overview");
    }

    let response = OverviewResponse::new(funding, query.search(), records.overview(year));
    info!(
        %funding,
        year,
        categories = response.categories.len(),
        "Built overview"
    );

    Ok(Json(response))
}

/// GET /funding/{funding}/categories/{category}/expenses
async fn get_category_expenses(
    State(state): State<AppState>,
    Path((funding, category)): Path<(String, String)>,
) -> Result<Json<CategoryExpensesResponse>, ApiError> {
    let funding = parse_funding(&funding)?;

    let records = state.source.fetch(funding).await?;
    let detail = records.detail_for(&category);
    let total = detail
        .iter()
        .fold(Decimal::ZERO, |total, expense| total.saturating_add(expense.amount));
    debug!(%funding, %category, expenses = detail.len(), "Resolved category detail");

    Ok(Json(CategoryExpensesResponse {
        funding,
        expenses: detail.into_iter().map(ExpenseResponse::from).collect(),
        category,
        total: total.into(),
    }))
}
