//! Database layer - connection pool, schema init, and repositories
//!
//! # Design Principles
//!
//! - Explicit pool handle - no global state, repos borrow `&PgPool`
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Every operation is one pooled acquisition, one or two statements

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_from};
pub use repos::*;
pub use schema::init;
