//! Funding types and active record set selection.
//!
//! Every funding type carries the same pair of record sets; one generic
//! aggregation runs against whichever pair is selected.

pub mod types;

pub use types::{FundingRecords, FundingSources, FundingType, RecordSet};
