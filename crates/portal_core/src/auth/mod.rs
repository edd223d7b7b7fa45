//! Credential resolution and edit authorization.
//!
//! # Responsibility
//! - Resolve a submitted credential into a session (master, delegate, member).
//! - Answer whether a session may mutate a given capability.
//!
//! # Invariants
//! - Credential precedence is master secret, then access keys, then student ids.
//! - Members and anonymous sessions never hold edit capabilities.
//! - A failed authentication never replaces the caller's session.

pub mod authorizer;
pub mod session;
