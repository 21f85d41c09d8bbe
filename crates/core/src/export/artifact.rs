//! Downloadable export artifact.

/// MIME type of the CSV download.
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// A named CSV download; saving it is up to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    /// Suggested filename.
    pub filename: String,
    /// MIME type.
    pub content_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl CsvArtifact {
    /// `Content-Disposition` value prompting a download under `filename`.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        let safe: String = self
            .filename
            .chars()
            .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
            .collect();
        format!("attachment; filename=\"{safe}\"")
    }

    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the artifact has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
