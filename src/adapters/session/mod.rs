//! Session store adapters.
//!
//! - `RedisSessionStore` - production store, sessions expire via Redis TTL
//! - `InMemorySessionStore` - tests and local development

mod in_memory;
mod redis;

pub use in_memory::InMemorySessionStore;
pub use redis::RedisSessionStore;
