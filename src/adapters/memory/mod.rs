//! In-memory adapters for tests and local development.

mod user_repository;

pub use user_repository::InMemoryUserRepository;
