//! Core domain logic for the department batch portal.
//! This crate is the single source of truth for authorization and document
//! mutation invariants.

pub mod advisory;
pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod portal;
pub mod repo;
pub mod service;

pub use advisory::extractive::ExtractiveAdvisor;
pub use advisory::{
    summarize_notice, word_of_the_week, Advisor, AdvisoryError, ADVICE_FALLBACK,
    SUMMARY_FALLBACK,
};
pub use auth::authorizer::{can_mutate, AuthError, Authorizer, MASTER_SECRET};
pub use auth::session::{Role, Session};
pub use config::{ConfigError, PortalConfig, StorageLocation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::capability::{parse_capability, Capability, CapabilityError};
pub use model::document::{
    AccessKey, AttendanceRecord, Document, DocumentValidationError, EntityId, Faculty, Notice,
    Poll, PollOption, Resource, RoutineItem, RoutineMode, Student, Subject,
};
pub use model::seed::seed_document;
pub use portal::{Portal, PortalError, PortalResult};
pub use repo::document_repo::{DocumentRepository, DEFAULT_NAMESPACE};
pub use repo::kv_repo::{KvRepository, MemoryKvRepository, SqliteKvRepository};
pub use repo::{RepoError, RepoResult};
pub use service::notice_service::NoticeDraft;
pub use service::routine_service::RoutineDraft;
pub use service::{MutationError, MutationResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
