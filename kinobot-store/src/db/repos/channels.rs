//! Channel-membership requirements.
//!
//! Two kinds of channel: `mandatory` (subscription gate before lookups)
//! and `main` (where content posts live). Rows are addressed by the
//! link+kind pair; the serial id only exists to allow duplicates of the
//! same link under different kinds.

use serde::Serialize;
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Channel role, stored as TEXT and CHECK-constrained in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Mandatory,
    Main,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Mandatory => "mandatory",
            ChannelKind::Main => "main",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChannelKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mandatory" => Ok(ChannelKind::Mandatory),
            "main" => Ok(ChannelKind::Main),
            other => Err(StoreError::UnknownChannelKind(other.to_string())),
        }
    }
}

pub struct ChannelRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ChannelRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a channel link under the given kind.
    pub async fn add(&self, link: &str, kind: ChannelKind) -> StoreResult<()> {
        sqlx::query("INSERT INTO channels (link, type) VALUES ($1, $2)")
            .bind(link)
            .bind(kind.as_str())
            .execute(self.pool)
            .await?;
        tracing::debug!(link, kind = %kind, "channel added");
        Ok(())
    }

    /// Remove all rows matching the link+kind pair.
    pub async fn remove(&self, link: &str, kind: ChannelKind) -> StoreResult<()> {
        sqlx::query("DELETE FROM channels WHERE link = $1 AND type = $2")
            .bind(link)
            .bind(kind.as_str())
            .execute(self.pool)
            .await?;
        tracing::debug!(link, kind = %kind, "channel removed");
        Ok(())
    }

    /// All links of one kind.
    pub async fn links(&self, kind: ChannelKind) -> StoreResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT link FROM channels WHERE type = $1")
            .bind(kind.as_str())
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(|(link,)| link).collect())
    }
}
