//! JSON dataset on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rao_core::funding::{FundingRecords, FundingType};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::decode::record_set;
use crate::error::SourceError;
use crate::source::RecordSource;

/// One funding section of the dataset.
#[derive(Debug, Default, Deserialize)]
struct DatasetSection {
    #[serde(default)]
    budget_items: Option<Value>,
    #[serde(default)]
    expenses: Option<Value>,
}

impl DatasetSection {
    fn into_records(self, funding: FundingType) -> FundingRecords {
        FundingRecords {
            budget_items: record_set(self.budget_items, &format!("{funding}.budget_items")),
            expenses: record_set(self.expenses, &format!("{funding}.expenses")),
        }
    }
}

/// Dataset layout: `{ "ps": {...}, "mooe": {...}, "co": {...} }`.
#[derive(Debug, Default, Deserialize)]
struct Dataset {
    #[serde(default)]
    ps: DatasetSection,
    #[serde(default)]
    mooe: DatasetSection,
    #[serde(default)]
    co: DatasetSection,
}

impl Dataset {
    fn take(self, funding: FundingType) -> DatasetSection {
        match funding {
            FundingType::Ps => self.ps,
            FundingType::Mooe => self.mooe,
            FundingType::Co => self.co,
        }
    }
}

/// Reads records from a JSON file.
///
/// The file is read on every fetch so edits show up without a restart.
/// Missing sections and arrays read as empty; elements that do not decode
/// are skipped.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    /// Creates a source over `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<Dataset, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn fetch(&self, funding: FundingType) -> Result<FundingRecords, SourceError> {
        let records = self.load().await?.take(funding).into_records(funding);
        debug!(
            path = %self.path.display(),
            %funding,
            budget_items = records.budget_items.records().len(),
            expenses = records.expenses.records().len(),
            "Loaded records from file"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rao_core::funding::RecordSet;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dataset(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_fetch_reads_selected_section() {
        let file = dataset(
            r#"{
                "mooe": {
                    "budget_items": [
                        {"id": 7, "category_name": "Travel", "year": "2024",
                         "budget": "1000", "total_expenses": 400, "remaining_balance": "600"}
                    ],
                    "expenses": [
                        {"expenses_id": 1, "budget_id": "7", "date": "2024-01-10",
                         "amount": "400.00", "particulars": "Flight", "remarks": null}
                    ]
                },
                "co": {"budget_items": [], "expenses": []}
            }"#,
        );
        let source = FileRecordSource::new(file.path());

        let mooe = source.fetch(FundingType::Mooe).await.unwrap();
        let overview = mooe.overview(2024);

        assert_eq!(overview.categories[0].category, "Travel");
        assert_eq!(overview.categories[0].usage_percent, dec!(40));
        assert_eq!(mooe.detail_for("Travel")[0].particulars, "Flight");
        assert_eq!(mooe.detail_for("Travel")[0].remarks, "");
    }

    #[tokio::test]
    async fn test_missing_section_reads_as_empty() {
        let file = dataset(r#"{"mooe": {"budget_items": []}}"#);
        let source = FileRecordSource::new(file.path());

        let ps = source.fetch(FundingType::Ps).await.unwrap();
        let mooe = source.fetch(FundingType::Mooe).await.unwrap();

        assert_eq!(ps.budget_items, RecordSet::missing());
        assert!(ps.overview(2024).categories.is_empty());
        assert_eq!(mooe.budget_items, RecordSet::loaded(Vec::new()));
        assert_eq!(mooe.expenses, RecordSet::missing());
    }

    #[tokio::test]
    async fn test_fetch_all_collects_every_section() {
        let file = dataset(
            r#"{
                "ps": {"budget_items": [{"id": 1, "category_name": "Salaries", "year": 2024,
                                         "budget": 10, "total_expenses": 0, "remaining_balance": 10}]},
                "co": {"budget_items": [{"id": 1, "category_name": "Vehicles", "year": 2024,
                                         "budget": 20, "total_expenses": 0, "remaining_balance": 20}]}
            }"#,
        );
        let source = FileRecordSource::new(file.path());

        let sources = source.fetch_all().await.unwrap();

        assert_eq!(sources.ps.overview(2024).categories[0].category, "Salaries");
        assert_eq!(sources.co.overview(2024).categories[0].category, "Vehicles");
        assert!(sources.mooe.overview(2024).categories.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_elements_are_skipped() {
        let file = dataset(
            r#"{
                "co": {
                    "budget_items": [
                        null,
                        {"id": 1, "category_name": "Vehicles", "year": 2024,
                         "budget": 5000, "total_expenses": 1000, "remaining_balance": 4000},
                        "Vehicles"
                    ],
                    "expenses": {"unexpected": "object"}
                }
            }"#,
        );
        let source = FileRecordSource::new(file.path());

        let co = source.fetch(FundingType::Co).await.unwrap();

        assert_eq!(co.budget_items.records().len(), 1);
        assert_eq!(co.overview(2024).totals.total_budget, dec!(5000));
        assert_eq!(co.expenses, RecordSet::missing());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileRecordSource::new(dir.path().join("absent.json"));

        let err = source.fetch(FundingType::Mooe).await.unwrap_err();

        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let file = dataset("{ not json");
        let source = FileRecordSource::new(file.path());

        let err = source.fetch(FundingType::Mooe).await.unwrap_err();

        assert!(matches!(err, SourceError::Parse(_)));
    }
}
