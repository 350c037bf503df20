//! PostgreSQL adapters.
//!
//! The schema lives in `migrations/` and is embedded at compile time.

mod user_repository;

use sqlx::migrate::Migrator;

pub use user_repository::PostgresUserRepository;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
