//! DDL for the `entries` table.
//!
//! Both backends keep the same columns, constraint and index names. SQLite
//! has no DATE/NUMERIC/TIMESTAMP storage classes, so there `month` and
//! `created_at` are ISO-8601 text and `value` is a 2-decimal text string.

pub(crate) const POSTGRES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id          SERIAL PRIMARY KEY,
    month       DATE NOT NULL,
    type        VARCHAR(10) NOT NULL CHECK (type IN ('expense', 'income', 'account_state')),
    name        VARCHAR(255) NOT NULL,
    value       DECIMAL(10, 2) NOT NULL,
    created_at  TIMESTAMP DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_entries_month ON entries(month);
CREATE INDEX IF NOT EXISTS idx_entries_type ON entries(type);
"#;

pub(crate) const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    month       TEXT NOT NULL,
    type        VARCHAR(10) NOT NULL CHECK (type IN ('expense', 'income', 'account_state')),
    name        VARCHAR(255) NOT NULL CHECK (length(name) <= 255),
    value       TEXT NOT NULL CHECK (abs(CAST(value AS REAL)) < 100000000),
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_entries_month ON entries(month);
CREATE INDEX IF NOT EXISTS idx_entries_type ON entries(type);
"#;

pub(crate) const ENTRY_COLUMNS: &str = "id, month, type, name, value, created_at";
