//! Portal domain model.
//!
//! # Responsibility
//! - Define the document aggregate and every entity it contains.
//! - Define the closed capability set used by the authorizer.
//! - Provide the fixed seed document used when nothing is persisted.
//!
//! # Invariants
//! - Entities live only inside the document; there is no independent lifecycle.
//! - Removal is a hard delete from the owning collection.

pub mod capability;
pub mod document;
pub mod seed;
