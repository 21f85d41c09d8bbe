//! Funding type and record set types.

use serde::{Deserialize, Serialize};

use crate::budget::{BudgetItem, BudgetOverview, BudgetService, DetailIndex, ExpenseRecord};
use crate::export::{CsvArtifact, CsvExporter};

/// Government funding category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FundingType {
    /// Personnel Services.
    Ps,
    /// Maintenance and Other Operating Expenses.
    #[default]
    Mooe,
    /// Capital Outlay.
    Co,
}

impl FundingType {
    /// All funding types in selector order.
    pub const ALL: [Self; 3] = [Self::Ps, Self::Mooe, Self::Co];

    /// Short code (`PS`, `MOOE`, `CO`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ps => "PS",
            Self::Mooe => "MOOE",
            Self::Co => "CO",
        }
    }

    /// Full label shown in the funding selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ps => "Personnel Services (PS)",
            Self::Mooe => "Maintenance and Other Operating Expenses (MOOE)",
            Self::Co => "Capital Outlay (CO)",
        }
    }

    /// Breakdown title, also the export filename stem.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Ps => "PS Breakdown",
            Self::Mooe => "MOOE Breakdown",
            Self::Co => "CO Breakdown",
        }
    }
}

impl std::fmt::Display for FundingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for FundingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PS" => Ok(Self::Ps),
            "MOOE" => Ok(Self::Mooe),
            "CO" => Ok(Self::Co),
            _ => Err(format!("Unknown funding type: {s}")),
        }
    }
}

/// Records delivered by a fetch collaborator.
///
/// A set that is still loading, or whose array never arrived, reads as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet<T> {
    /// Delivered records, if any.
    pub items: Option<Vec<T>>,
    /// Whether a fetch is still in flight.
    pub loading: bool,
}

impl<T> RecordSet<T> {
    /// A fully delivered set.
    #[must_use]
    pub const fn loaded(items: Vec<T>) -> Self {
        Self {
            items: Some(items),
            loading: false,
        }
    }

    /// A set whose fetch has not completed.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            items: None,
            loading: true,
        }
    }

    /// A set with no array at all.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            items: None,
            loading: false,
        }
    }

    /// The usable records: empty while loading or when missing.
    #[must_use]
    pub fn records(&self) -> &[T] {
        if self.loading {
            return &[];
        }
        self.items.as_deref().unwrap_or_default()
    }
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        Self::missing()
    }
}

impl<T> From<Vec<T>> for RecordSet<T> {
    fn from(items: Vec<T>) -> Self {
        Self::loaded(items)
    }
}

/// Budget items and obligations of one funding type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundingRecords {
    /// Budget line items.
    pub budget_items: RecordSet<BudgetItem>,
    /// Obligations.
    pub expenses: RecordSet<ExpenseRecord>,
}

impl FundingRecords {
    /// Creates a fully loaded pair.
    #[must_use]
    pub fn new(budget_items: Vec<BudgetItem>, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            budget_items: RecordSet::loaded(budget_items),
            expenses: RecordSet::loaded(expenses),
        }
    }

    /// Whether either side is still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.budget_items.loading || self.expenses.loading
    }

    /// Aggregates this pair for `year`.
    #[must_use]
    pub fn overview(&self, year: i32) -> BudgetOverview {
        BudgetService::aggregate(self.budget_items.records(), self.expenses.records(), year)
    }

    /// Obligations charged to `category`.
    #[must_use]
    pub fn detail_for(&self, category: &str) -> Vec<&ExpenseRecord> {
        BudgetService::detail_for(category, self.budget_items.records(), self.expenses.records())
    }

    /// Builds the CSV download for `year`, restricted to categories matching `query`.
    #[must_use]
    pub fn export(&self, funding: FundingType, year: i32, query: &str) -> CsvArtifact {
        let summaries = self.overview(year).filtered(query);
        let index = DetailIndex::new(self.budget_items.records());
        let expenses = self.expenses.records();
        CsvExporter::artifact(funding.title(), year, &summaries, |category| {
            index.detail_for(category, expenses)
        })
    }
}

/// Record sets for all three funding types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundingSources {
    /// Personnel Services records.
    pub ps: FundingRecords,
    /// MOOE records.
    pub mooe: FundingRecords,
    /// Capital Outlay records.
    pub co: FundingRecords,
}

impl FundingSources {
    /// Returns the records of the selected funding type.
    #[must_use]
    pub const fn select(&self, funding: FundingType) -> &FundingRecords {
        match funding {
            FundingType::Ps => &self.ps,
            FundingType::Mooe => &self.mooe,
            FundingType::Co => &self.co,
        }
    }

    /// Replaces the records of one funding type.
    pub fn set(&mut self, funding: FundingType, records: FundingRecords) {
        match funding {
            FundingType::Ps => self.ps = records,
            FundingType::Mooe => self.mooe = records,
            FundingType::Co => self.co = records,
        }
    }
}
