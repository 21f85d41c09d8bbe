//! Date normalization for display and export.
//!
//! Obligation dates arrive in whatever encoding the upstream service used.
//! Both renderings fall back to the raw text instead of failing; they differ
//! only in the success format.

pub mod format;

pub use format::{format_csv_date, format_display_date, parse_date};
