use chrono::NaiveDate;
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::schema;
use super::{Backend, EntryFilter, FieldChange, StoreError};
use crate::models::{Entry, EntryType, Month};

pub(crate) struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub(crate) fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Connect {
            target: format!("SQLite database {}", path.display()),
            reason: e.to_string(),
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Connect {
            target: "in-memory SQLite database".into(),
            reason: e.to_string(),
        })?;
        Ok(Self { conn })
    }
}

/// Values are kept as text with exactly two decimals.
fn value_to_sql(value: Decimal) -> String {
    format!("{value:.2}")
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let month: NaiveDate = row.get(1)?;
    let type_str: String = row.get(2)?;
    let entry_type = EntryType::from_str(&type_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    let value_str: String = row.get(4)?;
    let value = Decimal::from_str(&value_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(Entry {
        id: row.get(0)?,
        month: Month::containing(month),
        entry_type,
        name: row.get(3)?,
        value,
        created_at: row.get(5)?,
    })
}

impl Backend for SqliteBackend {
    fn initialize(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(schema::SQLITE_SCHEMA)?;
        tx.commit()?;
        Ok(())
    }

    fn insert_entry(
        &mut self,
        month: NaiveDate,
        entry_type: &str,
        name: &str,
        value: Decimal,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO entries (month, type, name, value) VALUES (?1, ?2, ?3, ?4)",
            params![month, entry_type, name, value_to_sql(value)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_entry(&mut self, id: i64) -> Result<u64, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        Ok(deleted as u64)
    }

    fn count_entries(&mut self, id: i64, month: Option<NaiveDate>) -> Result<i64, StoreError> {
        let count: i64 = match month {
            Some(month) => self.conn.query_row(
                "SELECT COUNT(*) FROM entries WHERE id = ?1 AND month = ?2",
                params![id, month],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                "SELECT COUNT(*) FROM entries WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )?,
        };
        Ok(count)
    }

    fn select_entries(&mut self, filter: EntryFilter) -> Result<Vec<Entry>, StoreError> {
        let (clause, param) = match &filter {
            EntryFilter::Id(id) => ("id = ?1", id as &dyn ToSql),
            EntryFilter::Month(month) => ("month = ?1", month as &dyn ToSql),
        };
        let sql = format!(
            "SELECT {} FROM entries WHERE {clause} ORDER BY created_at DESC, id DESC",
            schema::ENTRY_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([param], entry_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn update_entry(&mut self, id: i64, changes: &[FieldChange<'_>]) -> Result<u64, StoreError> {
        // Dropping `tx` on an early return rolls back the earlier changes.
        let tx = self.conn.transaction()?;
        let mut matched = 0;
        for change in changes {
            let sql = format!("UPDATE entries SET {} = ?1 WHERE id = ?2", change.column());
            let rows = match change {
                FieldChange::Type(entry_type) => tx.execute(&sql, params![entry_type, id])?,
                FieldChange::Name(name) => tx.execute(&sql, params![name, id])?,
                FieldChange::Value(value) => tx.execute(&sql, params![value_to_sql(*value), id])?,
            };
            matched = matched.max(rows);
        }
        tx.commit()?;
        Ok(matched as u64)
    }

    fn sum_values(&mut self, month: NaiveDate, entry_type: &str) -> Result<Decimal, StoreError> {
        // Summed here rather than with SUM(): SQLite would go through REAL.
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM entries WHERE month = ?1 AND type = ?2")?;
        let values = stmt.query_map(params![month, entry_type], |row| row.get::<_, String>(0))?;

        let mut total = Decimal::ZERO;
        for value in values {
            let value = value?;
            total += Decimal::from_str(&value)
                .map_err(|e| StoreError::Decode(format!("value '{value}': {e}")))?;
        }
        Ok(total)
    }

    fn close(self: Box<Self>) -> Result<(), StoreError> {
        let Self { conn } = *self;
        conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }
}
