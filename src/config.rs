use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const CONNECTION_ENV: &str = "DB_CONNECTION_STRING";
pub(crate) const LOG_ENV: &str = "RUST_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

/// Which backend a connection string points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConnectionTarget {
    Postgres(String),
    Sqlite(PathBuf),
    SqliteMemory,
}

impl ConnectionTarget {
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        let s = raw.trim();
        if s.is_empty() {
            anyhow::bail!("{CONNECTION_ENV} is empty");
        }

        if s == ":memory:" || s == "sqlite::memory:" {
            return Ok(Self::SqliteMemory);
        }
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            return Ok(Self::Postgres(s.to_string()));
        }
        if let Some(path) = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
        {
            if path.is_empty() {
                anyhow::bail!("SQLite connection string has no path: {s}");
            }
            return Ok(Self::Sqlite(PathBuf::from(path)));
        }
        // libpq key/value form: "host=localhost dbname=finances user=postgres"
        if s.contains('=') {
            return Ok(Self::Postgres(s.to_string()));
        }
        if [".db", ".sqlite", ".sqlite3"]
            .iter()
            .any(|ext| s.ends_with(ext))
        {
            return Ok(Self::Sqlite(PathBuf::from(s)));
        }

        anyhow::bail!(
            "Unrecognized {CONNECTION_ENV}. Use a PostgreSQL connection string \
             (e.g. 'host=localhost dbname=finances user=postgres password=...') \
             or a SQLite path (e.g. 'sqlite:finances.db')"
        )
    }
}

impl std::fmt::Display for ConnectionTarget {
    // Never print the raw PostgreSQL string: it may carry a password.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres(_) => write!(f, "PostgreSQL server"),
            Self::Sqlite(path) => write!(f, "SQLite database {}", path.display()),
            Self::SqliteMemory => write!(f, "in-memory SQLite database"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) target: ConnectionTarget,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(CONNECTION_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
        )
    }

    pub(crate) fn from_vars(connection: Option<String>, log_filter: Option<String>) -> Result<Self> {
        let connection = connection.with_context(|| {
            format!(
                "{CONNECTION_ENV} environment variable not set\n\
                 Example: export {CONNECTION_ENV}='host=localhost dbname=finances user=postgres password=yourpass'"
            )
        })?;
        let target = ConnectionTarget::parse(&connection)?;
        let log_filter = log_filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self { target, log_filter })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
