//! Admin repository.
//!
//! Admins are a flat set of Telegram user ids. Add is idempotent and
//! removing an absent id is a no-op, so handlers never need to check
//! membership first.

use std::collections::HashSet;

use sqlx::PgPool;

use crate::error::StoreResult;

pub struct AdminRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Grant admin rights (idempotent).
    pub async fn add(&self, user_id: i64) -> StoreResult<()> {
        sqlx::query("INSERT INTO admins (user_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(user_id)
            .execute(self.pool)
            .await?;
        tracing::debug!(user_id, "admin added");
        Ok(())
    }

    /// Revoke admin rights. No-op when the id is not an admin.
    pub async fn remove(&self, user_id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM admins WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;
        tracing::debug!(user_id, "admin removed");
        Ok(())
    }

    /// The full admin set, for O(1) membership checks in handlers.
    pub async fn all(&self) -> StoreResult<HashSet<i64>> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT user_id FROM admins")
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
