use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Expense,
    Income,
    AccountState,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entry type '{0}' (expected expense, income or account_state)")]
pub struct ParseEntryTypeError(pub String);

impl EntryType {
    /// Value stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::AccountState => "account_state",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::AccountState => "Account State",
        }
    }

    #[cfg(test)]
    pub fn all() -> &'static [EntryType] {
        &[Self::Expense, Self::Income, Self::AccountState]
    }
}

impl FromStr for EntryType {
    type Err = ParseEntryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "account_state" | "account-state" => Ok(Self::AccountState),
            _ => Err(ParseEntryTypeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar month, held as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month '{0}' (expected YYYY-MM)")]
pub struct ParseMonthError(pub String);

impl Month {
    #[cfg(test)]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for Month {
    type Err = ParseMonthError;

    /// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let date = if trimmed.len() == 7 {
            NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        } else {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        };
        date.map(Self::containing)
            .map_err(|_| ParseMonthError(s.to_string()))
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub month: Month,
    pub entry_type: EntryType,
    pub name: String,
    pub value: Decimal,
    pub created_at: NaiveDateTime,
}

/// Round to the 2 fractional digits of a `DECIMAL(10,2)` column, keeping
/// the scale at exactly 2 so `5000` is stored and shown as `5000.00`.
pub fn to_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
