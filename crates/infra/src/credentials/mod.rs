//! Credential store implementations.
//!
//! - `in_memory`: tests/dev
//! - `postgres`: deployments (`users` table, unique username)

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCredentialStore;
pub use postgres::PostgresCredentialStore;
