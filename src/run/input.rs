use anyhow::{Context, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{EntryType, Month};

const MONTH_PATTERN: &str = r"^[0-9]{4}-(0[1-9]|1[0-2])$";
const MAX_NAME_CHARS: usize = 255;

/// Parse a `YYYY-MM` month.
pub(crate) fn parse_month(s: &str) -> Result<Month> {
    let s = s.trim();
    let pattern = Regex::new(MONTH_PATTERN).context("Invalid month pattern")?;
    if !pattern.is_match(s) {
        anyhow::bail!("Invalid format '{s}'. Please use YYYY-MM (e.g., 2024-11)");
    }
    Month::from_str(s).with_context(|| format!("Invalid month '{s}'"))
}

/// Parse a positive money amount. Accepts `$` and thousands separators,
/// at most two decimal places and anything `DECIMAL(10, 2)` can hold.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        anyhow::bail!("Amount is empty");
    }
    let value = Decimal::from_str(cleaned)
        .with_context(|| format!("Failed to parse '{}' as an amount", s.trim()))?;
    if value <= Decimal::ZERO {
        anyhow::bail!("Amount must be positive!");
    }
    if value.normalize().scale() > 2 {
        anyhow::bail!("Amount '{}' has more than two decimal places", s.trim());
    }
    if value >= Decimal::from(100_000_000) {
        anyhow::bail!("Amount '{}' is too large", s.trim());
    }
    Ok(value)
}

pub(crate) fn parse_name(s: &str) -> Result<String> {
    let name = s.trim();
    if name.is_empty() {
        anyhow::bail!("Name can not be empty!");
    }
    if name.chars().count() > MAX_NAME_CHARS {
        anyhow::bail!("Name is longer than {MAX_NAME_CHARS} characters");
    }
    Ok(name.to_string())
}

pub(crate) fn parse_id(s: &str) -> Result<i64> {
    let s = s.trim();
    let id: i64 = s
        .parse()
        .with_context(|| format!("Invalid entry ID '{s}'"))?;
    if id <= 0 {
        anyhow::bail!("Entry ID must be a positive number");
    }
    Ok(id)
}

pub(crate) fn parse_entry_type(s: &str) -> Result<EntryType> {
    Ok(EntryType::from_str(s)?)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
