//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and groups the statements
//! for one table:
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - One or two statements per operation, errors propagate as-is

pub mod admins;
pub mod channels;
pub mod codes;
pub mod stats;
pub mod users;

pub use admins::AdminRepo;
pub use channels::{ChannelKind, ChannelRepo};
pub use codes::{CodeRepo, KinoCode};
pub use stats::{CodeStat, StatField, StatRepo};
pub use users::UserRepo;
