#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::entry::ParseEntryTypeError;
use super::*;

// ── EntryType ─────────────────────────────────────────────────

#[test]
fn test_entry_type_parse() {
    assert_eq!("expense".parse::<EntryType>().unwrap(), EntryType::Expense);
    assert_eq!("INCOME".parse::<EntryType>().unwrap(), EntryType::Income);
    assert_eq!(
        "account_state".parse::<EntryType>().unwrap(),
        EntryType::AccountState
    );
    assert_eq!(
        " account-state ".parse::<EntryType>().unwrap(),
        EntryType::AccountState
    );
}

#[test]
fn test_entry_type_parse_rejects_unknown() {
    let err = "invalid_type".parse::<EntryType>().unwrap_err();
    assert_eq!(err, ParseEntryTypeError("invalid_type".into()));
    assert!(err.to_string().contains("invalid_type"));
    assert!("".parse::<EntryType>().is_err());
}

#[test]
fn test_entry_type_as_str_matches_schema_values() {
    assert_eq!(EntryType::Expense.as_str(), "expense");
    assert_eq!(EntryType::Income.as_str(), "income");
    assert_eq!(EntryType::AccountState.as_str(), "account_state");
    assert_eq!(format!("{}", EntryType::AccountState), "account_state");
}

#[test]
fn test_entry_type_roundtrip() {
    for t in EntryType::all() {
        let back: EntryType = t.as_str().parse().unwrap();
        assert_eq!(*t, back, "Roundtrip failed for {t}");
    }
}

#[test]
fn test_entry_type_labels() {
    assert_eq!(EntryType::Expense.label(), "Expense");
    assert_eq!(EntryType::AccountState.label(), "Account State");
}

// ── Month ─────────────────────────────────────────────────────

#[test]
fn test_month_parse_year_month() {
    let m: Month = "2024-11".parse().unwrap();
    assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
    assert_eq!(m.to_string(), "2024-11");
}

#[test]
fn test_month_parse_full_date_normalizes() {
    let m: Month = "2024-11-17".parse().unwrap();
    assert_eq!(m, Month::new(2024, 11).unwrap());
}

#[test]
fn test_month_parse_invalid() {
    assert!("2024-13".parse::<Month>().is_err());
    assert!("November".parse::<Month>().is_err());
    assert!("".parse::<Month>().is_err());
}

#[test]
fn test_month_new_rejects_out_of_range() {
    assert!(Month::new(2024, 0).is_none());
    assert!(Month::new(2024, 13).is_none());
}

#[test]
fn test_month_containing() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert_eq!(Month::containing(date), Month::new(2024, 2).unwrap());
}

#[test]
fn test_month_ordering() {
    assert!(Month::new(2024, 1).unwrap() < Month::new(2024, 2).unwrap());
    assert!(Month::new(2023, 12).unwrap() < Month::new(2024, 1).unwrap());
}

// ── Currency rounding ─────────────────────────────────────────

#[test]
fn test_to_currency_pads_scale() {
    assert_eq!(to_currency(dec!(5000)).to_string(), "5000.00");
    assert_eq!(to_currency(dec!(1200.5)).to_string(), "1200.50");
}

#[test]
fn test_to_currency_rounds_half_away_from_zero() {
    assert_eq!(to_currency(dec!(0.005)), dec!(0.01));
    assert_eq!(to_currency(dec!(2.344)), dec!(2.34));
    assert_eq!(to_currency(dec!(2.345)), dec!(2.35));
}

// ── EntryUpdate ───────────────────────────────────────────────

#[test]
fn test_entry_update_empty() {
    let update = EntryUpdate::new();
    assert!(update.is_empty());
    assert_eq!(update.len(), 0);
}

#[test]
fn test_entry_update_builder() {
    let update = EntryUpdate::new()
        .with_type(EntryType::Income)
        .with_value(dec!(10.00));
    assert!(!update.is_empty());
    assert_eq!(update.len(), 2);
    assert_eq!(update.entry_type, Some(EntryType::Income));
    assert!(update.name.is_none());
    assert_eq!(update.value, Some(dec!(10.00)));
}

// ── MonthSummary ──────────────────────────────────────────────

#[test]
fn test_summary_balance() {
    let summary = MonthSummary {
        month: Month::new(2024, 11).unwrap(),
        income: dec!(5000.00),
        expenses: dec!(1200.50),
    };
    assert_eq!(summary.balance(), dec!(3799.50));
    assert!(summary.is_positive());
}

#[test]
fn test_summary_negative_balance() {
    let summary = MonthSummary {
        month: Month::new(2024, 11).unwrap(),
        income: Decimal::ZERO,
        expenses: dec!(0.01),
    };
    assert_eq!(summary.balance(), dec!(-0.01));
    assert!(!summary.is_positive());
}

#[test]
fn test_summary_zero_balance_is_positive() {
    let summary = MonthSummary {
        month: Month::new(2024, 11).unwrap(),
        income: Decimal::ZERO,
        expenses: Decimal::ZERO,
    };
    assert!(summary.is_positive());
}
