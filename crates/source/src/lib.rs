//! # RAO Source
//!
//! Where budget items and obligations come from.
//!
//! Each funding type has its own pair of record sets. A [`RecordSource`]
//! delivers that pair; the dashboard never cares whether it came from a JSON
//! file, the upstream REST service or a fixture held in memory.

pub mod decode;
pub mod error;
pub mod file;
pub mod http;
pub mod memory;
pub mod source;

use std::sync::Arc;
use std::time::Duration;

use rao_shared::{SourceConfig, SourceKind};

pub use error::SourceError;
pub use file::FileRecordSource;
pub use http::HttpRecordSource;
pub use memory::InMemoryRecordSource;
pub use source::RecordSource;

/// Builds the record source selected by configuration.
///
/// # Errors
///
/// Returns [`SourceError::Config`] if the HTTP source has no base URL or its
/// client cannot be built.
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn RecordSource>, SourceError> {
    match config.kind {
        SourceKind::File => Ok(Arc::new(FileRecordSource::new(&config.path))),
        SourceKind::Http => {
            let base_url = config.base_url.as_deref().ok_or_else(|| {
                SourceError::Config("source.base_url is required for the http source".to_string())
            })?;
            let source = HttpRecordSource::new(base_url, Duration::from_secs(config.timeout_secs))?;
            Ok(Arc::new(source))
        }
    }
}
