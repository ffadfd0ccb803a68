//! kinobot-store: PostgreSQL persistence for the kinobot lookup bot
//!
//! Flat CRUD over five tables: users, content codes, per-code counters,
//! admins, and channel-membership requirements. One repository per
//! table, all borrowing an explicitly passed [`sqlx::PgPool`].

pub mod config;
pub mod db;
pub mod error;

pub use sqlx::PgPool;

pub use db::{
    create_pool, create_pool_from, init, AdminRepo, ChannelKind, ChannelRepo, CodeRepo, CodeStat,
    KinoCode, StatField, StatRepo, UserRepo,
};
pub use error::{StoreError, StoreResult};
