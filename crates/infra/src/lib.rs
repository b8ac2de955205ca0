//! Infrastructure layer: store implementations (in-memory and Postgres).
//!
//! Every store trait has an in-memory implementation for tests/dev and a
//! Postgres implementation for deployments.

pub mod catalog;
pub mod credentials;
pub mod db;
pub mod inventory;
