//! CSV writer for category summaries and their obligations.

use rao_shared::types::money::fixed;

use super::artifact::{CSV_CONTENT_TYPE, CsvArtifact};
use crate::budget::{CategorySummary, ExpenseRecord};
use crate::dates::format_csv_date;

/// Byte-order mark so spreadsheet tools pick up UTF-8.
pub const UTF8_BOM: &str = "\u{feff}";

/// Column headers of a category row.
pub const CATEGORY_HEADER: [&str; 5] = ["Category", "Budget", "Expenses", "Remaining", "Usage %"];

/// Column headers of an obligation row.
pub const DETAIL_HEADER: [&str; 4] = ["Date", "Particulars", "Amount", "Remarks"];

const FIELD_SEPARATOR: &str = ",";
const RECORD_SEPARATOR: &str = "\n";

/// Serializes the category breakdown with per-category obligation detail.
pub struct CsvExporter;

impl CsvExporter {
    /// Renders the export as UTF-8 bytes, BOM first.
    ///
    /// Layout per summary, in the order given: the category row, a blank
    /// line, the detail header, one row per obligation from `lookup`, then
    /// two blank lines.
    #[must_use]
    pub fn export<'a, F>(summaries: &[CategorySummary], lookup: F) -> Vec<u8>
    where
        F: Fn(&str) -> Vec<&'a ExpenseRecord>,
    {
        let mut lines: Vec<String> = Vec::with_capacity(1 + summaries.len() * 5);
        lines.push(CATEGORY_HEADER.join(FIELD_SEPARATOR));

        for summary in summaries {
            lines.push(Self::category_row(summary));
            lines.push(String::new());
            lines.push(DETAIL_HEADER.join(FIELD_SEPARATOR));
            lines.extend(
                lookup(&summary.category)
                    .into_iter()
                    .map(Self::detail_row),
            );
            lines.push(String::new());
            lines.push(String::new());
        }

        let body = lines.join(RECORD_SEPARATOR);
        let mut out = String::with_capacity(UTF8_BOM.len() + body.len());
        out.push_str(UTF8_BOM);
        out.push_str(&body);
        out.into_bytes()
    }

    /// Renders the export as a named download.
    #[must_use]
    pub fn artifact<'a, F>(
        title: &str,
        year: i32,
        summaries: &[CategorySummary],
        lookup: F,
    ) -> CsvArtifact
    where
        F: Fn(&str) -> Vec<&'a ExpenseRecord>,
    {
        CsvArtifact {
            filename: Self::filename(title, year),
            content_type: CSV_CONTENT_TYPE,
            bytes: Self::export(summaries, lookup),
        }
    }

    /// `{title}_{year}_with_details.csv`.
    #[must_use]
    pub fn filename(title: &str, year: i32) -> String {
        format!("{title}_{year}_with_details.csv")
    }

    fn category_row(summary: &CategorySummary) -> String {
        [
            escape_field(&summary.category),
            fixed(summary.budget, 2),
            fixed(summary.expenses, 2),
            fixed(summary.remaining, 2),
            format!("{}%", fixed(summary.usage_percent, 1)),
        ]
        .join(FIELD_SEPARATOR)
    }

    fn detail_row(expense: &ExpenseRecord) -> String {
        [
            format_csv_date(&expense.date),
            escape_field(&expense.particulars),
            fixed(expense.amount, 2),
            escape_field(&expense.remarks),
        ]
        .join(FIELD_SEPARATOR)
    }
}

/// Quotes a text field, doubling embedded quotes.
#[must_use]
pub fn escape_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Flight"), "\"Flight\"");
        assert_eq!(escape_field(""), "\"\"");
        assert_eq!(escape_field("a, b"), "\"a, b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            CsvExporter::filename("MOOE Breakdown", 2024),
            "MOOE Breakdown_2024_with_details.csv"
        );
    }

    #[test]
    fn test_empty_export_is_bom_and_header() {
        let bytes = CsvExporter::export(&[], |_| Vec::new());

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\u{feff}Category,Budget,Expenses,Remaining,Usage %"
        );
    }

    #[test]
    fn test_category_without_detail() {
        let summary = CategorySummary {
            category: "Supplies".to_string(),
            budget: dec!(500),
            expenses: dec!(0),
            remaining: dec!(500),
            usage_percent: dec!(0),
        };

        let bytes = CsvExporter::export(&[summary], |_| Vec::new());

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\u{feff}Category,Budget,Expenses,Remaining,Usage %\n\
             \"Supplies\",500.00,0.00,500.00,0.0%\n\
             \n\
             Date,Particulars,Amount,Remarks\n\
             \n"
        );
    }
}
