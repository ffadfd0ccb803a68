//! Content-record repository for the `kino_codes` table.
//!
//! Codes follow proper patterns:
//! - upsert: INSERT with ON CONFLICT (code) DO UPDATE, plus the stat
//!   zero-row so every code has at most one stat row
//! - delete: removes the stat row alongside the content row

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::StoreResult;

/// Content record keyed by its short code.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct KinoCode {
    pub code: String,
    pub channel: Option<String>,
    pub message_id: Option<i32>,
    pub post_count: Option<i32>,
    pub title: Option<String>,
}

pub struct CodeRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CodeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert or update a content record by code.
    ///
    /// Also ensures the companion stat row exists so counters can be
    /// incremented from the first lookup onward.
    pub async fn upsert(&self, record: &KinoCode) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kino_codes (code, channel, message_id, post_count, title)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (code) DO UPDATE SET
                channel = EXCLUDED.channel,
                message_id = EXCLUDED.message_id,
                post_count = EXCLUDED.post_count,
                title = EXCLUDED.title
            "#,
        )
        .bind(&record.code)
        .bind(&record.channel)
        .bind(record.message_id)
        .bind(record.post_count)
        .bind(&record.title)
        .execute(self.pool)
        .await?;

        sqlx::query("INSERT INTO stats (code) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(&record.code)
            .execute(self.pool)
            .await?;

        tracing::debug!(code = %record.code, "upserted content record");
        Ok(())
    }

    /// Fetch one record by code.
    pub async fn get(&self, code: &str) -> StoreResult<Option<KinoCode>> {
        let record = sqlx::query_as(
            r#"
            SELECT code, channel, message_id, post_count, title
            FROM kino_codes
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;
        Ok(record)
    }

    /// All records, in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<KinoCode>> {
        let records = sqlx::query_as(
            r#"
            SELECT code, channel, message_id, post_count, title
            FROM kino_codes
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(records)
    }

    /// Delete a record and its stat row.
    ///
    /// Returns true iff a content row was actually deleted.
    pub async fn delete(&self, code: &str) -> StoreResult<bool> {
        sqlx::query("DELETE FROM stats WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        let result = sqlx::query("DELETE FROM kino_codes WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        tracing::debug!(code, deleted = result.rows_affected() > 0, "deleted content record");
        Ok(result.rows_affected() > 0)
    }

    /// Change a record's code and title in place.
    ///
    /// No-op when `old_code` does not exist. The stat row keeps the old
    /// code; counters restart under the new one on the next upsert.
    pub async fn rename(&self, old_code: &str, new_code: &str, new_title: &str) -> StoreResult<()> {
        sqlx::query("UPDATE kino_codes SET code = $1, title = $2 WHERE code = $3")
            .bind(new_code)
            .bind(new_title)
            .bind(old_code)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;
    use crate::db::repos::StatRepo;
    use crate::db::schema;

    fn sample(code: &str) -> KinoCode {
        KinoCode {
            code: code.to_string(),
            channel: Some("@kino_channel".to_string()),
            message_id: Some(100),
            post_count: Some(4),
            title: Some("Sample Title".to_string()),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upsert_updates_without_duplicate() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::init(&pool).await.expect("init failed");

        let repo = CodeRepo::new(&pool);
        let code = "test-upsert";
        repo.upsert(&sample(code)).await.expect("first upsert failed");

        let mut updated = sample(code);
        updated.title = Some("Renamed Title".to_string());
        updated.post_count = Some(9);
        repo.upsert(&updated).await.expect("second upsert failed");

        let all: Vec<_> = repo
            .list()
            .await
            .expect("list failed")
            .into_iter()
            .filter(|r| r.code == code)
            .collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title.as_deref(), Some("Renamed Title"));
        assert_eq!(all[0].post_count, Some(9));

        repo.delete(code).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_removes_record_and_stat() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::init(&pool).await.expect("init failed");

        let repo = CodeRepo::new(&pool);
        let stats = StatRepo::new(&pool);
        let code = "test-delete";

        repo.upsert(&sample(code)).await.expect("upsert failed");
        assert!(stats.get(code).await.expect("stat fetch failed").is_some());

        assert!(repo.delete(code).await.expect("delete failed"));
        assert!(repo.get(code).await.expect("get failed").is_none());
        assert!(stats.get(code).await.expect("stat fetch failed").is_none());

        // Second delete reports nothing removed
        assert!(!repo.delete(code).await.expect("second delete failed"));
    }
}
