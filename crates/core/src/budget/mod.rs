//! Budget aggregation and obligation detail.

pub mod detail;
pub mod service;
pub mod types;


pub use detail::DetailIndex;
pub use service::BudgetService;
pub use types::{
    BudgetItem, BudgetOverview, BudgetTotals, CategorySummary, ExpenseRecord, SummaryCard,
};
