//! Fixed in-memory records.

use async_trait::async_trait;
use rao_core::funding::{FundingRecords, FundingSources, FundingType};

use crate::error::SourceError;
use crate::source::RecordSource;

/// Serves a fixed dataset; used by tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    sources: FundingSources,
}

impl InMemoryRecordSource {
    /// Creates a source over `sources`.
    #[must_use]
    pub const fn new(sources: FundingSources) -> Self {
        Self { sources }
    }

    /// Replaces the records of one funding type.
    #[must_use]
    pub fn with(mut self, funding: FundingType, records: FundingRecords) -> Self {
        self.sources.set(funding, records);
        self
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn fetch(&self, funding: FundingType) -> Result<FundingRecords, SourceError> {
        Ok(self.sources.select(funding).clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
