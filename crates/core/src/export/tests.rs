//! End-to-end and property-based tests for the CSV export.

use std::collections::HashMap;

use proptest::prelude::*;
use rao_shared::types::money::round_half_up;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::writer::{CATEGORY_HEADER, CsvExporter, DETAIL_HEADER, UTF8_BOM};
use crate::budget::{BudgetItem, BudgetService, CategorySummary, ExpenseRecord};

/// One category block read back from an export.
#[derive(Debug)]
struct ParsedCategory {
    name: String,
    budget: Decimal,
    expenses: Decimal,
    remaining: Decimal,
    usage: Decimal,
    details: Vec<Vec<String>>,
}

fn parse_export(bytes: &[u8]) -> Vec<ParsedCategory> {
    let text = std::str::from_utf8(bytes).unwrap();
    let text = text.strip_prefix(UTF8_BOM).expect("export starts with a BOM");

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let records: Vec<Vec<String>> = reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect::<Vec<_>>())
        .filter(|fields| !(fields.len() == 1 && fields[0].is_empty()))
        .collect();

    assert_eq!(records[0], CATEGORY_HEADER);

    let mut parsed: Vec<ParsedCategory> = Vec::new();
    let mut expect_detail_header = false;
    for fields in &records[1..] {
        if fields.len() == CATEGORY_HEADER.len() {
            parsed.push(ParsedCategory {
                name: fields[0].clone(),
                budget: fields[1].parse().unwrap(),
                expenses: fields[2].parse().unwrap(),
                remaining: fields[3].parse().unwrap(),
                usage: fields[4].trim_end_matches('%').parse().unwrap(),
                details: Vec::new(),
            });
            expect_detail_header = true;
        } else if expect_detail_header {
            assert_eq!(fields, &DETAIL_HEADER);
            expect_detail_header = false;
        } else {
            parsed.last_mut().unwrap().details.push(fields.clone());
        }
    }
    parsed
}

fn travel_records() -> (Vec<BudgetItem>, Vec<ExpenseRecord>) {
    let items: Vec<BudgetItem> = serde_json::from_str(
        r#"[{"id": 7, "category_name": "Travel", "year": 2024,
             "budget": "1000", "total_expenses": "400", "remaining_balance": "600"}]"#,
    )
    .unwrap();
    let expenses: Vec<ExpenseRecord> = serde_json::from_str(
        r#"[{"expenses_id": 1, "budget_id": 7, "date": "2024-01-10",
             "amount": "400", "particulars": "Flight", "remarks": ""}]"#,
    )
    .unwrap();
    (items, expenses)
}

#[test]
fn test_end_to_end_travel_scenario() {
    let (items, expenses) = travel_records();

    let overview = BudgetService::aggregate(&items, &expenses, 2024);
    assert_eq!(
        overview.categories,
        vec![CategorySummary {
            category: "Travel".to_string(),
            budget: dec!(1000),
            expenses: dec!(400),
            remaining: dec!(600),
            usage_percent: dec!(40),
        }]
    );

    let bytes = CsvExporter::export(&overview.categories, |category| {
        BudgetService::detail_for(category, &items, &expenses)
    });

    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "\u{feff}Category,Budget,Expenses,Remaining,Usage %\n\
         \"Travel\",1000.00,400.00,600.00,40.0%\n\
         \n\
         Date,Particulars,Amount,Remarks\n\
         2024-01-10,\"Flight\",400.00,\"\"\n\
         \n"
    );
}

#[test]
fn test_blocks_follow_aggregation_order() {
    let items = vec![
        BudgetItem::new(1, "Utilities", 2024, dec!(300), dec!(100)),
        BudgetItem::new(2, "Airfare", 2024, dec!(900), dec!(0)),
    ];
    let expenses = vec![
        ExpenseRecord::new(1, 2, "2024-02-01", dec!(10), "late"),
        ExpenseRecord::new(2, 1, "2024-01-01T00:00:00Z", dec!(100), "Power, \"Q1\"")
            .with_remarks("paid"),
    ];
    let overview = BudgetService::aggregate(&items, &expenses, 2024);

    let bytes = CsvExporter::export(&overview.categories, |category| {
        BudgetService::detail_for(category, &items, &expenses)
    });
    let parsed = parse_export(&bytes);

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].name, "Utilities");
    assert_eq!(parsed[0].details, vec![vec![
        "2024-01-01".to_string(),
        "Power, \"Q1\"".to_string(),
        "100.00".to_string(),
        "paid".to_string(),
    ]]);
    assert_eq!(parsed[1].name, "Airfare");
    assert_eq!(parsed[1].details[0][1], "late");
}

#[test]
fn test_unparsable_detail_date_is_written_raw() {
    let items = vec![BudgetItem::new(1, "Repairs", 2024, dec!(100), dec!(50))];
    let expenses = vec![ExpenseRecord::new(1, 1, "sometime in May", dec!(50), "Roof")];

    let bytes = CsvExporter::export(&BudgetService::aggregate(&items, &[], 2024).categories, |c| {
        BudgetService::detail_for(c, &items, &expenses)
    });

    assert_eq!(parse_export(&bytes)[0].details[0][0], "sometime in May");
}

/// Strategy for a category block: summary plus its obligations.
fn category_block() -> impl Strategy<Value = (CategorySummary, Vec<ExpenseRecord>)> {
    (
        "[A-Za-z0-9 ,\"']{1,16}",
        0i64..10_000_000_000,
        0i64..10_000_000_000,
        -10_000_000_000i64..10_000_000_000,
        0i64..5_000_000,
        prop::collection::vec(
            ("[A-Za-z ,\"\n]{0,12}", "[A-Za-z ,\"]{0,8}", 0i64..1_000_000_000),
            0..4,
        ),
    )
        .prop_map(|(name, budget, expenses, remaining, usage, details)| {
            let summary = CategorySummary {
                category: name,
                budget: Decimal::new(budget, 2),
                expenses: Decimal::new(expenses, 2),
                remaining: Decimal::new(remaining, 2),
                usage_percent: Decimal::new(usage, 4),
            };
            let records = details
                .into_iter()
                .enumerate()
                .map(|(i, (particulars, remarks, amount))| {
                    ExpenseRecord::new(
                        i64::try_from(i).unwrap(),
                        1,
                        "2024-05-17",
                        Decimal::new(amount, 2),
                        particulars,
                    )
                    .with_remarks(remarks)
                })
                .collect();
            (summary, records)
        })
}

fn unique_blocks(
    blocks: Vec<(CategorySummary, Vec<ExpenseRecord>)>,
) -> (Vec<CategorySummary>, HashMap<String, Vec<ExpenseRecord>>) {
    let mut summaries = Vec::new();
    let mut details = HashMap::new();
    for (i, (mut summary, records)) in blocks.into_iter().enumerate() {
        summary.category = format!("{i}-{}", summary.category);
        details.insert(summary.category.clone(), records);
        summaries.push(summary);
    }
    (summaries, details)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Exporting the same input twice yields the same bytes.
    #[test]
    fn prop_export_is_deterministic(blocks in prop::collection::vec(category_block(), 0..6)) {
        let (summaries, details) = unique_blocks(blocks);
        let lookup = |category: &str| details[category].iter().collect::<Vec<_>>();

        let first = CsvExporter::export(&summaries, lookup);
        let second = CsvExporter::export(&summaries, lookup);

        prop_assert_eq!(first, second);
    }

    /// Reading the export back recovers names, money to 2dp and usage to 1dp.
    #[test]
    fn prop_export_round_trips(blocks in prop::collection::vec(category_block(), 0..6)) {
        let (summaries, details) = unique_blocks(blocks);

        let bytes = CsvExporter::export(&summaries, |category| details[category].iter().collect());
        let parsed = parse_export(&bytes);

        prop_assert_eq!(parsed.len(), summaries.len());
        for (read, source) in parsed.iter().zip(&summaries) {
            prop_assert_eq!(&read.name, &source.category);
            prop_assert_eq!(read.budget, source.budget);
            prop_assert_eq!(read.expenses, source.expenses);
            prop_assert_eq!(read.remaining, source.remaining);
            prop_assert_eq!(read.usage, round_half_up(source.usage_percent, 1));

            let expected = &details[&source.category];
            prop_assert_eq!(read.details.len(), expected.len());
            for (row, expense) in read.details.iter().zip(expected) {
                prop_assert_eq!(&row[0], "2024-05-17");
                prop_assert_eq!(&row[1], &expense.particulars);
                prop_assert_eq!(row[2].parse::<Decimal>().unwrap(), expense.amount);
                prop_assert_eq!(&row[3], &expense.remarks);
            }
        }
    }
}
