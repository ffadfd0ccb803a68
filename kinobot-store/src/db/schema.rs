//! Schema creation and default-admin seeding.
//!
//! All statements are `IF NOT EXISTS` / `ON CONFLICT DO NOTHING`, so
//! [`init`] is safe to run on every startup.

use sqlx::PgPool;

use crate::error::StoreResult;

/// Admin ids present from the first boot. Seeding is idempotent;
/// removing one of these later sticks until the next init.
pub const DEFAULT_ADMINS: [i64; 4] = [7483732504, 5959511392, 6406837659, 1087968824];

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id BIGINT PRIMARY KEY
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS kino_codes (
        code TEXT PRIMARY KEY,
        channel TEXT,
        message_id INTEGER,
        post_count INTEGER,
        title TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stats (
        code TEXT PRIMARY KEY,
        searched INTEGER DEFAULT 0,
        viewed INTEGER DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        user_id BIGINT PRIMARY KEY
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS channels (
        id SERIAL PRIMARY KEY,
        link TEXT NOT NULL,
        type TEXT NOT NULL CHECK (type IN ('mandatory', 'main'))
    )
    "#,
];

/// Create all tables if absent, then seed the default admins.
pub async fn init(pool: &PgPool) -> StoreResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    for admin_id in DEFAULT_ADMINS {
        sqlx::query("INSERT INTO admins (user_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(admin_id)
            .execute(pool)
            .await?;
    }

    tracing::info!("schema initialized, {} default admins seeded", DEFAULT_ADMINS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn init_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        init(&pool).await.expect("first init failed");
        init(&pool).await.expect("second init failed");

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM admins WHERE user_id = ANY($1)")
                .bind(&DEFAULT_ADMINS[..])
                .fetch_one(&pool)
                .await
                .expect("query failed");
        assert_eq!(count, DEFAULT_ADMINS.len() as i64);
    }
}
