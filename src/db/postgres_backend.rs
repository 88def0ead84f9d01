use chrono::{NaiveDate, NaiveDateTime};
use postgres::{Client, NoTls, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::schema;
use super::{Backend, EntryFilter, FieldChange, StoreError};
use crate::models::{Entry, EntryType, Month};

pub(crate) struct PostgresBackend {
    client: Client,
}

impl PostgresBackend {
    pub(crate) fn connect(connection_string: &str) -> Result<Self, StoreError> {
        let client = Client::connect(connection_string, NoTls).map_err(|e| StoreError::Connect {
            target: "PostgreSQL server".into(),
            reason: e.to_string(),
        })?;
        Ok(Self { client })
    }
}

/// `SERIAL` ids are 32-bit; a wider id cannot name any row.
fn row_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

fn entry_from_row(row: &Row) -> Result<Entry, StoreError> {
    let id: i32 = row.try_get("id")?;
    let month: NaiveDate = row.try_get("month")?;
    let type_str: String = row.try_get("type")?;
    let entry_type =
        EntryType::from_str(&type_str).map_err(|e| StoreError::Decode(e.to_string()))?;
    let created_at: Option<NaiveDateTime> = row.try_get("created_at")?;
    let created_at = created_at
        .ok_or_else(|| StoreError::Decode(format!("entry {id} has no created_at")))?;
    Ok(Entry {
        id: i64::from(id),
        month: Month::containing(month),
        entry_type,
        name: row.try_get("name")?,
        value: row.try_get("value")?,
        created_at,
    })
}

impl Backend for PostgresBackend {
    fn initialize(&mut self) -> Result<(), StoreError> {
        let mut tx = self.client.transaction()?;
        tx.batch_execute(schema::POSTGRES_SCHEMA)?;
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
        let row = self.client.query_one(
            "INSERT INTO entries (month, type, name, value) VALUES ($1, $2, $3, $4) RETURNING id",
            &[&month, &entry_type, &name, &value],
        )?;
        let id: i32 = row.try_get(0)?;
        Ok(i64::from(id))
    }

    fn delete_entry(&mut self, id: i64) -> Result<u64, StoreError> {
        let Some(id) = row_id(id) else {
            return Ok(0);
        };
        Ok(self
            .client
            .execute("DELETE FROM entries WHERE id = $1", &[&id])?)
    }

    fn count_entries(&mut self, id: i64, month: Option<NaiveDate>) -> Result<i64, StoreError> {
        let Some(id) = row_id(id) else {
            return Ok(0);
        };
        let row = match month {
            Some(month) => self.client.query_one(
                "SELECT COUNT(*) FROM entries WHERE id = $1 AND month = $2",
                &[&id, &month],
            )?,
            None => self
                .client
                .query_one("SELECT COUNT(*) FROM entries WHERE id = $1", &[&id])?,
        };
        Ok(row.try_get(0)?)
    }

    fn select_entries(&mut self, filter: EntryFilter) -> Result<Vec<Entry>, StoreError> {
        let order = "ORDER BY created_at DESC, id DESC";
        let rows = match filter {
            EntryFilter::Id(id) => {
                let Some(id) = row_id(id) else {
                    return Ok(Vec::new());
                };
                let sql = format!(
                    "SELECT {} FROM entries WHERE id = $1 {order}",
                    schema::ENTRY_COLUMNS
                );
                self.client.query(&sql, &[&id])?
            }
            EntryFilter::Month(month) => {
                let sql = format!(
                    "SELECT {} FROM entries WHERE month = $1 {order}",
                    schema::ENTRY_COLUMNS
                );
                self.client.query(&sql, &[&month])?
            }
        };
        rows.iter().map(entry_from_row).collect()
    }

    fn update_entry(&mut self, id: i64, changes: &[FieldChange<'_>]) -> Result<u64, StoreError> {
        let Some(id) = row_id(id) else {
            return Ok(0);
        };
        // An error drops `tx` uncommitted, which rolls it back.
        let mut tx = self.client.transaction()?;
        let mut matched = 0;
        for change in changes {
            let sql = format!("UPDATE entries SET {} = $1 WHERE id = $2", change.column());
            let rows = match change {
                FieldChange::Type(entry_type) => tx.execute(&sql, &[entry_type, &id])?,
                FieldChange::Name(name) => tx.execute(&sql, &[name, &id])?,
                FieldChange::Value(value) => tx.execute(&sql, &[value, &id])?,
            };
            matched = matched.max(rows);
        }
        tx.commit()?;
        Ok(matched)
    }

    fn sum_values(&mut self, month: NaiveDate, entry_type: &str) -> Result<Decimal, StoreError> {
        let row = self.client.query_one(
            "SELECT COALESCE(SUM(value), 0) AS total FROM entries WHERE month = $1 AND type = $2",
            &[&month, &entry_type],
        )?;
        Ok(row.try_get("total")?)
    }

    fn close(self: Box<Self>) -> Result<(), StoreError> {
        let Self { client } = *self;
        client.close()?;
        Ok(())
    }
}
