//! User repository.
//!
//! Users are append-only: one row per Telegram user id, created on
//! first interaction, never mutated or deleted.

use sqlx::PgPool;

use crate::error::StoreResult;

pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a user if not already present (idempotent).
    pub async fn add(&self, user_id: i64) -> StoreResult<()> {
        sqlx::query("INSERT INTO users (user_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Total number of known users.
    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// All user ids, for broadcast fan-out.
    pub async fn all_ids(&self) -> StoreResult<Vec<i64>> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT user_id FROM users")
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;
    use crate::db::schema;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn add_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::init(&pool).await.expect("init failed");

        let repo = UserRepo::new(&pool);
        let before = repo.count().await.expect("count failed");

        repo.add(424242).await.expect("add failed");
        repo.add(424242).await.expect("second add failed");

        let after = repo.count().await.expect("count failed");
        assert!(after <= before + 1);
        assert!(repo.all_ids().await.expect("list failed").contains(&424242));
    }
}
