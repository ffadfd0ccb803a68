//! Environment-driven database configuration.
//!
//! Two ways to point the store at PostgreSQL, checked in order:
//! 1. `DATABASE_URL` - full connection string, wins when set
//! 2. `DB_USER` / `DB_PASS` / `DB_NAME` / `DB_HOST` / `DB_PORT` - the
//!    deployment's historical variable set
//!
//! The `DB_*` path builds [`PgConnectOptions`] field by field instead of
//! composing a URL, so credentials may contain characters that URL
//! syntax reserves (`/`, `#`, `?`, `@`).
//!
//! `.env` files are honored via [`load_dotenv`]; already-set variables
//! are never overwritten.

use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

use crate::error::{StoreError, StoreResult};

/// Connection parameters read from the `DB_*` variable set.
#[derive(Debug, Clone)]
pub struct DbParts {
    pub user: String,
    pub pass: String,
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl DbParts {
    /// Read the five `DB_*` variables. All are required; `DB_PORT` must
    /// parse as a port number.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let var = |key: &str| {
            lookup(key).ok_or_else(|| StoreError::Config(format!("{key} not set")))
        };
        let port = var("DB_PORT")?;
        let port = port
            .parse::<u16>()
            .map_err(|_| StoreError::Config(format!("DB_PORT is not a valid port: '{port}'")))?;

        Ok(Self {
            user: var("DB_USER")?,
            pass: var("DB_PASS")?,
            name: var("DB_NAME")?,
            host: var("DB_HOST")?,
            port,
        })
    }

    /// Build connect options field by field. Nothing here round-trips
    /// through URL syntax.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .username(&self.user)
            .password(&self.pass)
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
    }
}

/// Load `.env` from the current directory, if present.
///
/// Variables already set in the environment take precedence.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("loaded .env from {}", path.display()),
        Err(_) => tracing::debug!("no .env file found"),
    }
}

/// Resolve connect options from the environment: `DATABASE_URL` when
/// set, otherwise built from the `DB_*` variables.
pub fn connect_options() -> StoreResult<PgConnectOptions> {
    connect_options_from(|key| std::env::var(key).ok())
}

fn connect_options_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> StoreResult<PgConnectOptions> {
    if let Some(url) = lookup("DATABASE_URL") {
        return Ok(PgConnectOptions::from_str(&url)?);
    }
    Ok(DbParts::from_lookup(lookup)?.connect_options())
}
