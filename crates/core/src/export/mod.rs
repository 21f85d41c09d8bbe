//! CSV export of the category breakdown.
//!
//! The output is a pure function of its inputs: no timestamps, no
//! randomness, byte-identical for identical inputs.

pub mod artifact;
pub mod writer;

#[cfg(test)]
mod tests;

pub use artifact::{CSV_CONTENT_TYPE, CsvArtifact};
pub use writer::{CATEGORY_HEADER, CsvExporter, DETAIL_HEADER, UTF8_BOM, escape_field};
