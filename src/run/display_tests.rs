#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{EntryType, Month};

fn entry(id: i64, name: &str, value: Decimal) -> Entry {
    Entry {
        id,
        month: Month::new(2024, 11).unwrap(),
        entry_type: EntryType::Expense,
        name: name.to_string(),
        value,
        created_at: NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    }
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Rent", 10), "Rent");
    assert_eq!(truncate("Rent", 4), "Rent");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Groceries and more", 6), "Groce…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Rent", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("Café crème brûlée", 5), "Café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1200.50)), "$1,200.50");
    assert_eq!(format_amount(dec!(5000)), "$5,000.00");
    assert_eq!(format_amount(dec!(4.5)), "$4.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(100000)), "$100,000.00");
}

#[test]
fn test_format_amount_group_boundaries() {
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
    assert_eq!(format_amount(dec!(1000)), "$1,000.00");
    assert_eq!(format_amount(dec!(12345.678)), "$12,345.68");
    assert_eq!(format_amount(dec!(-1234.5)), "-$1,234.50");
}

#[test]
fn test_format_amount_zero_and_negative() {
    assert_eq!(format_amount(Decimal::ZERO), "$0.00");
    assert_eq!(format_amount(dec!(-250)), "-$250.00");
}

// ── tables ────────────────────────────────────────────────────

#[test]
fn test_entry_table_columns() {
    let table = entry_table(&[entry(7, "Rent", dec!(1200.50))]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    for column in ["ID", "Month", "Type", "Name", "Amount"] {
        assert!(lines[0].contains(column));
    }
    assert!(lines[2].starts_with("7 "));
    assert!(lines[2].contains("2024-11"));
    assert!(lines[2].contains("Expense"));
    assert!(lines[2].contains("Rent"));
    assert!(lines[2].ends_with("$1,200.50"));
}

#[test]
fn test_entry_table_truncates_long_names() {
    let long = "x".repeat(80);
    let table = entry_table(&[entry(1, &long, dec!(1))]);
    assert!(table.contains('…'));
    assert!(!table.contains(&long));
}

#[test]
fn test_entry_table_keeps_order() {
    let table = entry_table(&[entry(3, "Third", dec!(3)), entry(1, "First", dec!(1))]);
    let third = table.find("Third").unwrap();
    let first = table.find("First").unwrap();
    assert!(third < first);
}

#[test]
fn test_summary_positive_balance() {
    let summary = MonthSummary {
        month: Month::new(2024, 11).unwrap(),
        income: dec!(5000.00),
        expenses: dec!(1200.50),
    };
    let text = summary_lines(&summary);
    assert!(text.contains("Summary for 2024-11"));
    assert!(text.contains("Total Income:   $5,000.00"));
    assert!(text.contains("Total Expenses: $1,200.50"));
    assert!(text.contains("Balance:        $3,799.50 ✓"));
}

#[test]
fn test_summary_negative_balance() {
    let summary = MonthSummary {
        month: Month::new(2024, 12).unwrap(),
        income: Decimal::ZERO,
        expenses: dec!(99.99),
    };
    assert!(summary_lines(&summary).ends_with("-$99.99 ✗"));
}
