mod postgres_backend;
mod schema;
mod sqlite_backend;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ConnectionTarget;
use crate::models::*;

use postgres_backend::PostgresBackend;
use sqlite_backend::SqliteBackend;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("could not connect to {target}: {reason}")]
    Connect { target: String, reason: String },
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] postgres::Error),
    #[error("invalid entry row: {0}")]
    Decode(String),
}

/// Row selection for entry listings.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EntryFilter {
    Id(i64),
    Month(NaiveDate),
}

/// One column assignment of an `UPDATE entries`. The type travels as the
/// raw column string so the schema's CHECK constraint is what accepts or
/// rejects it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldChange<'a> {
    Type(&'a str),
    Name(&'a str),
    Value(Decimal),
}

impl FieldChange<'_> {
    pub(crate) fn column(&self) -> &'static str {
        match self {
            Self::Type(_) => "type",
            Self::Name(_) => "name",
            Self::Value(_) => "value",
        }
    }
}

/// A connection to one relational database holding the `entries` table.
///
/// Every method is one autocommitted statement, except `initialize` and
/// `update_entry`, which run in a single transaction each.
pub(crate) trait Backend {
    fn initialize(&mut self) -> Result<(), StoreError>;
    fn insert_entry(
        &mut self,
        month: NaiveDate,
        entry_type: &str,
        name: &str,
        value: Decimal,
    ) -> Result<i64, StoreError>;
    fn delete_entry(&mut self, id: i64) -> Result<u64, StoreError>;
    fn count_entries(&mut self, id: i64, month: Option<NaiveDate>) -> Result<i64, StoreError>;
    /// Most recent first.
    fn select_entries(&mut self, filter: EntryFilter) -> Result<Vec<Entry>, StoreError>;
    /// Returns the number of rows matched by `id`.
    fn update_entry(&mut self, id: i64, changes: &[FieldChange<'_>]) -> Result<u64, StoreError>;
    fn sum_values(&mut self, month: NaiveDate, entry_type: &str) -> Result<Decimal, StoreError>;
    fn close(self: Box<Self>) -> Result<(), StoreError>;
}

/// Logs a failed operation before handing the error to the caller.
fn logged<T>(operation: &'static str, result: Result<T, StoreError>) -> Result<T, StoreError> {
    result.inspect_err(|e| warn!(operation, error = %e, "database operation failed"))
}

/// Sole owner of the `entries` table.
pub(crate) struct EntryStore {
    backend: Box<dyn Backend>,
}

impl EntryStore {
    pub(crate) fn connect(target: &ConnectionTarget) -> Result<Self, StoreError> {
        let backend: Box<dyn Backend> = match target {
            ConnectionTarget::Postgres(conn) => Box::new(PostgresBackend::connect(conn)?),
            ConnectionTarget::Sqlite(path) => Box::new(SqliteBackend::open(path)?),
            ConnectionTarget::SqliteMemory => Box::new(SqliteBackend::open_in_memory()?),
        };
        info!(database = %target, "connected to database");
        Ok(Self { backend })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        let mut store = Self {
            backend: Box::new(SqliteBackend::open_in_memory()?),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates the table and its indexes if missing. Safe on every start.
    pub(crate) fn initialize(&mut self) -> Result<(), StoreError> {
        self.backend
            .initialize()
            .inspect_err(|e| warn!(error = %e, "database initialization failed"))?;
        info!("database initialized");
        Ok(())
    }

    /// Inserts one entry and returns its id. `value` is rounded to cents;
    /// positivity and a non-empty name are the caller's to check.
    pub(crate) fn add_entry(
        &mut self,
        month: Month,
        entry_type: EntryType,
        name: &str,
        value: Decimal,
    ) -> Result<i64, StoreError> {
        let id = logged(
            "add_entry",
            self.backend.insert_entry(
                month.first_day(),
                entry_type.as_str(),
                name,
                to_currency(value),
            ),
        )?;
        debug!(id, %month, %entry_type, "added entry");
        Ok(id)
    }

    /// Returns the number of rows removed; 0 means no such id.
    pub(crate) fn delete_entry(&mut self, id: i64) -> Result<u64, StoreError> {
        let deleted = logged("delete_entry", self.backend.delete_entry(id))?;
        debug!(id, deleted, "delete entry");
        Ok(deleted)
    }

    pub(crate) fn entry_exists(&mut self, id: i64) -> Result<bool, StoreError> {
        let count = logged("entry_exists", self.backend.count_entries(id, None))?;
        Ok(count > 0)
    }

    /// Like `entry_exists`, but only matches an entry filed under `month`.
    pub(crate) fn entry_exists_in_month(&mut self, id: i64, month: Month) -> Result<bool, StoreError> {
        let count = logged(
            "entry_exists_in_month",
            self.backend.count_entries(id, Some(month.first_day())),
        )?;
        Ok(count > 0)
    }

    pub(crate) fn entry_info(&mut self, id: i64) -> Result<Vec<Entry>, StoreError> {
        logged("entry_info", self.backend.select_entries(EntryFilter::Id(id)))
    }

    pub(crate) fn update_type(&mut self, id: i64, entry_type: EntryType) -> Result<bool, StoreError> {
        self.update_fields("update_type", id, &[FieldChange::Type(entry_type.as_str())])
    }

    pub(crate) fn update_name(&mut self, id: i64, name: &str) -> Result<bool, StoreError> {
        self.update_fields("update_name", id, &[FieldChange::Name(name)])
    }

    pub(crate) fn update_value(&mut self, id: i64, value: Decimal) -> Result<bool, StoreError> {
        self.update_fields("update_value", id, &[FieldChange::Value(to_currency(value))])
    }

    /// Applies every field present in `update` in one transaction: either all
    /// of them change or none do. An empty update touches nothing.
    pub(crate) fn apply_update(&mut self, id: i64, update: &EntryUpdate) -> Result<bool, StoreError> {
        if update.is_empty() {
            debug!(id, "empty update, nothing to apply");
            return Ok(false);
        }

        let mut changes = Vec::with_capacity(update.len());
        if let Some(entry_type) = update.entry_type {
            changes.push(FieldChange::Type(entry_type.as_str()));
        }
        if let Some(name) = update.name.as_deref() {
            changes.push(FieldChange::Name(name));
        }
        if let Some(value) = update.value {
            changes.push(FieldChange::Value(to_currency(value)));
        }
        self.update_fields("apply_update", id, &changes)
    }

    fn update_fields(
        &mut self,
        operation: &'static str,
        id: i64,
        changes: &[FieldChange<'_>],
    ) -> Result<bool, StoreError> {
        let matched = logged(operation, self.backend.update_entry(id, changes))?;
        debug!(id, fields = changes.len(), matched, "{operation}");
        Ok(matched > 0)
    }

    pub(crate) fn get_entries_by_month(&mut self, month: Month) -> Result<Vec<Entry>, StoreError> {
        logged(
            "get_entries_by_month",
            self.backend.select_entries(EntryFilter::Month(month.first_day())),
        )
    }

    pub(crate) fn get_total_income(&mut self, month: Month) -> Result<Decimal, StoreError> {
        self.total("get_total_income", month, EntryType::Income)
    }

    pub(crate) fn get_total_expenses(&mut self, month: Month) -> Result<Decimal, StoreError> {
        self.total("get_total_expenses", month, EntryType::Expense)
    }

    fn total(
        &mut self,
        operation: &'static str,
        month: Month,
        entry_type: EntryType,
    ) -> Result<Decimal, StoreError> {
        let sum = logged(
            operation,
            self.backend.sum_values(month.first_day(), entry_type.as_str()),
        )?;
        Ok(to_currency(sum))
    }

    pub(crate) fn month_summary(&mut self, month: Month) -> Result<MonthSummary, StoreError> {
        Ok(MonthSummary {
            month,
            income: self.get_total_income(month)?,
            expenses: self.get_total_expenses(month)?,
        })
    }

    /// Releases the connection. Dropping the store releases it too, but
    /// without a chance to report a failed shutdown.
    pub(crate) fn close(self) -> Result<(), StoreError> {
        logged("close", self.backend.close())?;
        debug!("database connection closed");
        Ok(())
    }
}
