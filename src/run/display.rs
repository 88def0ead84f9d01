use rust_decimal::Decimal;

use crate::models::{Entry, MonthSummary};

const NAME_WIDTH: usize = 30;

/// Dollars with comma-grouped thousands and two decimals,
/// e.g. `-1234.5` → `"-$1,234.50"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let cents = format!("{:.2}", val.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Truncate to at most `max` characters, ending with "…" when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

fn entry_header() -> String {
    format!(
        "{:<8} {:<9} {:<15} {:<width$} {:>16}",
        "ID",
        "Month",
        "Type",
        "Name",
        "Amount",
        width = NAME_WIDTH
    )
}

fn entry_row(entry: &Entry) -> String {
    format!(
        "{:<8} {:<9} {:<15} {:<width$} {:>16}",
        entry.id,
        entry.month.to_string(),
        entry.entry_type.label(),
        truncate(&entry.name, NAME_WIDTH),
        format_amount(entry.value),
        width = NAME_WIDTH
    )
}

/// Table of entries, one per line, under a header and a rule.
pub(crate) fn entry_table(entries: &[Entry]) -> String {
    let header = entry_header();
    let mut lines = vec![header.clone(), "─".repeat(header.chars().count())];
    lines.extend(entries.iter().map(entry_row));
    lines.join("\n")
}

pub(crate) fn summary_lines(summary: &MonthSummary) -> String {
    let mark = if summary.is_positive() { "✓" } else { "✗" };
    [
        format!("=== Summary for {} ===", summary.month),
        format!("Total Income:   {}", format_amount(summary.income)),
        format!("Total Expenses: {}", format_amount(summary.expenses)),
        format!("Balance:        {} {mark}", format_amount(summary.balance())),
    ]
    .join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
