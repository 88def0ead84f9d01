#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::io::Cursor;

use super::*;

fn november() -> Month {
    Month::new(2024, 11).unwrap()
}

fn run_session(store: &mut EntryStore, input: &str) -> String {
    let mut out = Vec::new();
    Menu::new(store, Cursor::new(input.to_string()), &mut out)
        .run()
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_add_income_and_expense_then_summary() {
    let mut store = EntryStore::open_in_memory().unwrap();
    let output = run_session(
        &mut store,
        "2024-11\n2\nSalary\n5000\n1\nRent\n1200.50\n5\n8\n",
    );

    assert!(output.contains("✓ Income added successfully!"));
    assert!(output.contains("✓ Expense added successfully!"));
    assert!(output.contains("Balance:        $3,799.50 ✓"));
    assert!(output.ends_with("Goodbye!\n"));
    assert_eq!(store.get_entries_by_month(november()).unwrap().len(), 2);
}

#[test]
fn test_add_account_state() {
    let mut store = EntryStore::open_in_memory().unwrap();
    run_session(&mut store, "2024-11\n3\nChecking\n$8,400.00\n8\n");

    let entries = store.get_entries_by_month(november()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_type, EntryType::AccountState);
    assert_eq!(entries[0].value, dec!(8400.00));
}

#[test]
fn test_invalid_month_is_asked_again() {
    let mut store = EntryStore::open_in_memory().unwrap();
    let output = run_session(&mut store, "2024-13\nnope\n2024-11\n8\n");
    assert_eq!(output.matches("Invalid format").count(), 2);
    assert!(output.contains("=== Finance Tracker (2024-11) ==="));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let mut store = EntryStore::open_in_memory().unwrap();
    run_session(&mut store, "");
    run_session(&mut store, "2024-11\n");
    run_session(&mut store, "2024-11\n1\nCoffee\n");
    assert!(store.get_entries_by_month(november()).unwrap().is_empty());
}

#[test]
fn test_non_positive_amount_rejected() {
    let mut store = EntryStore::open_in_memory().unwrap();
    let output = run_session(&mut store, "2024-11\n1\nCoffee\n-4\n1\nTea\n0\n8\n");
    assert_eq!(output.matches("Amount must be positive!").count(), 2);
    assert!(store.get_entries_by_month(november()).unwrap().is_empty());
}

#[test]
fn test_empty_name_rejected() {
    let mut store = EntryStore::open_in_memory().unwrap();
    let output = run_session(&mut store, "2024-11\n1\n   \n8\n");
    assert!(output.contains("Name can not be empty!"));
    assert!(store.get_entries_by_month(november()).unwrap().is_empty());
}

#[test]
fn test_invalid_choice() {
    let mut store = EntryStore::open_in_memory().unwrap();
    let output = run_session(&mut store, "2024-11\n9\nabc\n8\n");
    assert_eq!(output.matches("Invalid choice!").count(), 2);
}

#[test]
fn test_view_entries() {
    let mut store = EntryStore::open_in_memory().unwrap();
    let output = run_session(&mut store, "2024-11\n6\n8\n");
    assert!(output.contains("No entries found for this month."));

    store
        .add_entry(november(), EntryType::Expense, "Rent", dec!(1200.50))
        .unwrap();
    let output = run_session(&mut store, "2024-11\n6\n8\n");
    assert!(output.contains("=== Entries for 2024-11 ==="));
    assert!(output.contains("Rent"));
    assert!(output.contains("$1,200.50"));
}

#[test]
fn test_change_month() {
    let mut store = EntryStore::open_in_memory().unwrap();
    run_session(&mut store, "2024-11\n7\n2024-12\n2\nBonus\n100\n8\n");

    assert!(store.get_entries_by_month(november()).unwrap().is_empty());
    let december = store
        .get_entries_by_month(Month::new(2024, 12).unwrap())
        .unwrap();
    assert_eq!(december.len(), 1);
    assert_eq!(december[0].name, "Bonus");
}

// ── Edit submenu ──────────────────────────────────────────────

fn store_with_rent() -> (EntryStore, i64) {
    let mut store = EntryStore::open_in_memory().unwrap();
    let id = store
        .add_entry(november(), EntryType::Expense, "Rent", dec!(1200.50))
        .unwrap();
    (store, id)
}

#[test]
fn test_edit_type() {
    let (mut store, id) = store_with_rent();
    let output = run_session(&mut store, &format!("2024-11\n4\n{id}\n2\n8\n"));
    assert!(output.contains("=== Editing Entry ==="));
    assert!(output.contains(&format!("✓ Entry {id} updated.")));
    assert_eq!(
        store.entry_info(id).unwrap()[0].entry_type,
        EntryType::Income
    );
}

#[test]
fn test_edit_name() {
    let (mut store, id) = store_with_rent();
    run_session(&mut store, &format!("2024-11\n4\n{id}\n4\nMortgage\n8\n"));
    let entry = &store.entry_info(id).unwrap()[0];
    assert_eq!(entry.name, "Mortgage");
    assert_eq!(entry.value, dec!(1200.50));
}

#[test]
fn test_edit_value() {
    let (mut store, id) = store_with_rent();
    run_session(&mut store, &format!("2024-11\n4\n{id}\n5\n1300\n8\n"));
    assert_eq!(store.entry_info(id).unwrap()[0].value, dec!(1300.00));
}

#[test]
fn test_edit_invalid_value_keeps_entry() {
    let (mut store, id) = store_with_rent();
    let output = run_session(&mut store, &format!("2024-11\n4\n{id}\n5\nlots\n8\n"));
    assert!(output.contains("Invalid value!"));
    assert_eq!(store.entry_info(id).unwrap()[0].value, dec!(1200.50));
}

#[test]
fn test_edit_delete() {
    let (mut store, id) = store_with_rent();
    let output = run_session(&mut store, &format!("2024-11\n4\n{id}\n6\n8\n"));
    assert!(output.contains(&format!("Entry {id} was successfully deleted.")));
    assert!(!store.entry_exists(id).unwrap());
}

#[test]
fn test_edit_cancel() {
    let (mut store, id) = store_with_rent();
    let output = run_session(&mut store, &format!("2024-11\n4\n{id}\n7\n8\n"));
    assert!(output.contains("Edit cancelled."));
    assert_eq!(store.entry_info(id).unwrap()[0].name, "Rent");
}

#[test]
fn test_edit_refuses_entry_from_other_month() {
    let (mut store, id) = store_with_rent();
    let output = run_session(&mut store, &format!("2024-12\n4\n{id}\n8\n"));
    assert!(output.contains(&format!("No entry found with ID {id}")));
    assert!(!output.contains("=== Editing Entry ==="));
    assert!(store.entry_exists(id).unwrap());
}

#[test]
fn test_edit_bad_id() {
    let (mut store, _) = store_with_rent();
    let output = run_session(&mut store, "2024-11\n4\nabc\n4\n999\n8\n");
    assert!(output.contains("Invalid entry ID 'abc'"));
    assert!(output.contains("No entry found with ID 999"));
}

#[test]
fn test_store_failure_is_reported_and_session_continues() {
    // Connected but never initialized: every query fails.
    let mut store = EntryStore::connect(&crate::config::ConnectionTarget::SqliteMemory).unwrap();
    let output = run_session(&mut store, "2024-11\n1\nRent\n10\n5\n6\n4\n1\n8\n");

    assert!(output.contains("✗ Failed to add Expense:"));
    assert!(output.contains("✗ Failed to load summary:"));
    assert!(output.contains("✗ Failed to load entries:"));
    assert!(output.contains("✗ Failed to look up entry 1:"));
    assert!(output.contains("no such table: entries"));
    assert!(output.ends_with("Goodbye!\n"));
}
