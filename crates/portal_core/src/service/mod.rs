//! Gated document mutators.
//!
//! # Responsibility
//! - Provide one pure transformation per collection edit.
//! - Refuse edits the session is not authorized for.
//! - Keep id uniqueness and poll voting invariants intact.
//!
//! # Invariants
//! - A mutator never modifies its input; it returns a new document or an error.
//! - Any error means the caller's document stays exactly as it was.
//! - Removing an absent entry succeeds and yields an equal document.

pub mod academic_service;
pub mod attendance_service;
pub mod notice_service;
pub mod poll_service;
pub mod routine_service;
pub mod student_service;

use crate::auth::authorizer::can_mutate;
use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::EntityId;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type MutationResult<T> = Result<T, MutationError>;

/// Rejections returned by document mutators.
///
/// None of these are fatal; each is reported at the point of the user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// Session lacks the capability gating this collection.
    PermissionDenied { capability: Capability },
    /// Voting requires an identified member session.
    MemberRequired,
    /// Required input is missing or out of range.
    ValidationFailed(&'static str),
    /// The voter already voted on this poll.
    DuplicateVote { poll_id: EntityId, voter_id: EntityId },
    /// Target entity does not exist.
    NotFound(EntityId),
    /// A new entity reuses an existing id.
    DuplicateId(EntityId),
}

impl MutationError {
    /// Whether the rejection comes from role or capability checks.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. } | Self::MemberRequired)
    }

    /// Whether the UI should drop the rejection without alerting the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::DuplicateVote { .. })
    }
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied { capability } => {
                write!(f, "permission denied: `{capability}` edits are not allowed")
            }
            Self::MemberRequired => write!(f, "please login as a student to vote"),
            Self::ValidationFailed(field) => write!(f, "required field missing: {field}"),
            Self::DuplicateVote { poll_id, voter_id } => {
                write!(f, "student {voter_id} already voted on poll {poll_id}")
            }
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::DuplicateId(id) => write!(f, "id already exists: {id}"),
        }
    }
}

impl Error for MutationError {}

/// Refuses the edit unless `session` holds `capability`.
pub(crate) fn require(session: &Session, capability: Capability) -> MutationResult<()> {
    if can_mutate(session, capability) {
        return Ok(());
    }
    warn!(
        "event=mutation_gate module=service status=rejected role={} capability={}",
        session.role().as_str(),
        capability
    );
    Err(MutationError::PermissionDenied { capability })
}

/// Rejects blank required input.
pub(crate) fn require_text(value: &str, field: &'static str) -> MutationResult<()> {
    if value.trim().is_empty() {
        return Err(MutationError::ValidationFailed(field));
    }
    Ok(())
}

/// Generates a random id that `taken` reports as unused.
pub(crate) fn fresh_id(taken: impl Fn(&str) -> bool) -> EntityId {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !taken(candidate.as_str()) {
            return candidate;
        }
    }
}
