//! Joining obligations to the category of the budget item they reference.

use std::collections::HashMap;

use rao_shared::types::BudgetItemId;

use super::types::{BudgetItem, ExpenseRecord};

/// Resolves `budget_id` references to budget items.
///
/// When two items share an id the first one wins. Obligations whose
/// `budget_id` is missing or dangling belong to no category.
#[derive(Debug, Clone)]
pub struct DetailIndex<'a> {
    by_id: HashMap<BudgetItemId, &'a BudgetItem>,
}

impl<'a> DetailIndex<'a> {
    /// Indexes the given budget items by id.
    #[must_use]
    pub fn new(budget_items: &'a [BudgetItem]) -> Self {
        let mut by_id = HashMap::with_capacity(budget_items.len());
        for item in budget_items {
            if let Some(id) = item.id {
                by_id.entry(id).or_insert(item);
            }
        }
        Self { by_id }
    }

    /// Returns the budget item an obligation references, if it exists.
    #[must_use]
    pub fn budget_item(&self, expense: &ExpenseRecord) -> Option<&'a BudgetItem> {
        expense.budget_id.and_then(|id| self.by_id.get(&id).copied())
    }

    /// Returns the category an obligation is charged to, if resolvable.
    #[must_use]
    pub fn category_of(&self, expense: &ExpenseRecord) -> Option<&'a str> {
        self.budget_item(expense)
            .and_then(|item| item.category_name.as_deref())
    }

    /// Obligations charged to `category`, in input order.
    #[must_use]
    pub fn detail_for<'e>(
        &self,
        category: &str,
        expenses: &'e [ExpenseRecord],
    ) -> Vec<&'e ExpenseRecord> {
        expenses
            .iter()
            .filter(|expense| self.category_of(expense) == Some(category))
            .collect()
    }
}
