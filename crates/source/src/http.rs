//! Upstream REST record service.

use std::time::Duration;

use async_trait::async_trait;
use rao_core::funding::{FundingRecords, FundingType, RecordSet};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::decode::decode_records;
use crate::error::SourceError;
use crate::source::RecordSource;

/// Collection served per funding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// `budget_items[_ps|_co]`.
    BudgetItems,
    /// `expenses_item[_ps|_co]`.
    Expenses,
}

impl Collection {
    const fn stem(self) -> &'static str {
        match self {
            Self::BudgetItems => "budget_items",
            Self::Expenses => "expenses_item",
        }
    }
}

/// Endpoint suffix of a funding type; MOOE is served unsuffixed.
const fn suffix(funding: FundingType) -> &'static str {
    match funding {
        FundingType::Ps => "_ps",
        FundingType::Mooe => "",
        FundingType::Co => "_co",
    }
}

/// Fetches records from the upstream service.
///
/// Responses may be a bare JSON array or an object wrapping it under
/// `data`; anything else reads as a missing set. Malformed elements are
/// skipped rather than failing the fetch.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
}

impl HttpRecordSource {
    /// Creates a source rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of a collection, e.g. `{base}/expenses_item_co`.
    #[must_use]
    pub fn endpoint(&self, funding: FundingType, collection: Collection) -> String {
        format!("{}/{}{}", self.base_url, collection.stem(), suffix(funding))
    }

    async fn get_json(&self, url: String) -> Result<Value, SourceError> {
        debug!(%url, "Fetching records");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Record service returned an error status");
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| SourceError::Request { url, source })
    }

    async fn fetch_set<T: DeserializeOwned>(
        &self,
        funding: FundingType,
        collection: Collection,
    ) -> Result<RecordSet<T>, SourceError> {
        let url = self.endpoint(funding, collection);
        let payload = self.get_json(url.clone()).await?;

        match parse_payload(payload, &url) {
            Some(items) => Ok(RecordSet::loaded(items)),
            None => {
                warn!(%url, "Record service returned no array; treating as empty");
                Ok(RecordSet::missing())
            }
        }
    }
}

/// Extracts the records from a response body.
///
/// Returns `None` when the body holds no array at all. Elements that do not
/// decode are skipped.
pub fn parse_payload<T: DeserializeOwned>(payload: Value, origin: &str) -> Option<Vec<T>> {
    let values = match payload {
        Value::Array(values) => values,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(values)) => values,
            _ => return None,
        },
        _ => return None,
    };
    Some(decode_records(values, origin))
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, funding: FundingType) -> Result<FundingRecords, SourceError> {
        let (budget_items, expenses) = tokio::try_join!(
            self.fetch_set(funding, Collection::BudgetItems),
            self.fetch_set(funding, Collection::Expenses),
        )?;

        Ok(FundingRecords {
            budget_items,
            expenses,
        })
    }

    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }
}
