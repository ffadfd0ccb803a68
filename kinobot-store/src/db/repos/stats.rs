//! Per-code usage counters.
//!
//! Counters only move for codes that already have a stat row; the row
//! itself is created by the code upsert (or [`StatRepo::ensure`]).

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::StoreResult;

/// Which counter to bump. Maps onto a fixed column name, so no SQL is
/// ever built from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Searched,
    Viewed,
}

impl StatField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatField::Searched => "searched",
            StatField::Viewed => "viewed",
        }
    }
}

impl std::fmt::Display for StatField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counters for one code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct CodeStat {
    pub searched: i32,
    pub viewed: i32,
}

pub struct StatRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StatRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Bump one counter by 1.
    ///
    /// UPDATE only: a missing code is a no-op, no row is created.
    pub async fn increment(&self, code: &str, field: StatField) -> StoreResult<()> {
        let query = match field {
            StatField::Searched => "UPDATE stats SET searched = searched + 1 WHERE code = $1",
            StatField::Viewed => "UPDATE stats SET viewed = viewed + 1 WHERE code = $1",
        };
        sqlx::query(query).bind(code).execute(self.pool).await?;
        tracing::debug!(code, field = %field, "stat incremented");
        Ok(())
    }

    /// Create a zero-count row for a code (idempotent).
    pub async fn ensure(&self, code: &str) -> StoreResult<()> {
        sqlx::query("INSERT INTO stats (code, searched, viewed) VALUES ($1, 0, 0) ON CONFLICT DO NOTHING")
            .bind(code)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Fetch counters for a code.
    pub async fn get(&self, code: &str) -> StoreResult<Option<CodeStat>> {
        let stat = sqlx::query_as("SELECT searched, viewed FROM stats WHERE code = $1")
            .bind(code)
            .fetch_optional(self.pool)
            .await?;
        Ok(stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;
    use crate::db::schema;

    #[test]
    fn field_names_match_columns() {
        assert_eq!(StatField::Searched.as_str(), "searched");
        assert_eq!(StatField::Viewed.as_str(), "viewed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn increment_on_missing_code_creates_nothing() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::init(&pool).await.expect("init failed");

        let repo = StatRepo::new(&pool);
        let code = "test-no-such-code";

        repo.increment(code, StatField::Searched)
            .await
            .expect("increment failed");
        assert!(repo.get(code).await.expect("get failed").is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_then_increment_counts_up() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::init(&pool).await.expect("init failed");

        let repo = StatRepo::new(&pool);
        let code = "test-counting";

        // Reset leftovers from earlier runs
        sqlx::query("DELETE FROM stats WHERE code = $1")
            .bind(code)
            .execute(&pool)
            .await
            .expect("reset failed");

        repo.ensure(code).await.expect("ensure failed");
        repo.ensure(code).await.expect("second ensure failed");

        repo.increment(code, StatField::Searched).await.expect("increment failed");
        repo.increment(code, StatField::Searched).await.expect("increment failed");
        repo.increment(code, StatField::Viewed).await.expect("increment failed");

        let stat = repo.get(code).await.expect("get failed").expect("row missing");
        assert_eq!(stat.searched, 2);
        assert_eq!(stat.viewed, 1);

        sqlx::query("DELETE FROM stats WHERE code = $1")
            .bind(code)
            .execute(&pool)
            .await
            .expect("cleanup failed");
    }
}
