//! SQLite bootstrap for the local key-value document storage.
//!
//! # Responsibility
//! - Open and configure SQLite connections for portal storage.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Storage reads and writes happen only after migrations succeed.
//! - Failures surface as [`crate::repo::RepoError`]; the repository layer is
//!   the only consumer of these connections.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
