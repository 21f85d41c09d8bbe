//! Record source trait.

use async_trait::async_trait;
use rao_core::funding::{FundingRecords, FundingSources, FundingType};

use crate::error::SourceError;

/// Delivers the budget items and obligations of a funding type.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches the record pair of one funding type.
    async fn fetch(&self, funding: FundingType) -> Result<FundingRecords, SourceError>;

    /// Fetches the record pairs of every funding type.
    async fn fetch_all(&self) -> Result<FundingSources, SourceError> {
        let mut sources = FundingSources::default();
        for funding in FundingType::ALL {
            sources.set(funding, self.fetch(funding).await?);
        }
        Ok(sources)
    }

    /// Short description for logs, e.g. `file:data/records.json`.
    fn describe(&self) -> String;
}
