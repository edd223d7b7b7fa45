//! Credential resolution against the document's access keys and students.

use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::{AccessKey, Document, Student};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Process-wide master secret. Not stored in the document.
pub const MASTER_SECRET: &str = "admin789";

/// Authentication errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Credential matched no category.
    InvalidCredential,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredential => write!(f, "invalid credentials"),
        }
    }
}

impl Error for AuthError {}

/// Resolves credentials for one document snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Authorizer<'doc> {
    master_secret: &'doc str,
    access_keys: &'doc [AccessKey],
    students: &'doc [Student],
}

impl<'doc> Authorizer<'doc> {
    /// Creates an authorizer using [`MASTER_SECRET`].
    pub fn new(doc: &'doc Document) -> Self {
        Self::with_master_secret(doc, MASTER_SECRET)
    }

    pub fn with_master_secret(doc: &'doc Document, master_secret: &'doc str) -> Self {
        Self {
            master_secret,
            access_keys: &doc.access_keys,
            students: &doc.students,
        }
    }

    /// Resolves `credential` into a session.
    ///
    /// Surrounding whitespace is ignored; matching is otherwise exact and
    /// case-sensitive. The first matching category wins: master secret, then
    /// access keys in document order, then student ids.
    ///
    /// # Errors
    /// - Returns `InvalidCredential` when nothing matches.
    pub fn authenticate(&self, credential: &str) -> Result<Session, AuthError> {
        let credential = credential.trim();
        if credential.is_empty() {
            warn!("event=auth module=auth status=rejected reason=empty_credential");
            return Err(AuthError::InvalidCredential);
        }

        if credential == self.master_secret {
            info!("event=auth module=auth status=ok role=master");
            return Ok(Session::Master);
        }

        if let Some(entry) = self.access_keys.iter().find(|entry| entry.key == credential) {
            info!(
                "event=auth module=auth status=ok role=delegate key_name={} permissions={}",
                entry.name,
                entry.permissions.len()
            );
            return Ok(Session::Delegate {
                key_name: entry.name.clone(),
                permissions: entry.permissions.clone(),
            });
        }

        if let Some(student) = self.students.iter().find(|student| student.id == credential) {
            info!("event=auth module=auth status=ok role=member");
            return Ok(Session::Member {
                student: student.clone(),
            });
        }

        warn!("event=auth module=auth status=rejected reason=no_match");
        Err(AuthError::InvalidCredential)
    }
}

/// Returns whether `session` may mutate collections gated by `capability`.
///
/// Master may edit everything, delegates only what their key grants.
/// Members and anonymous sessions are always refused.
pub fn can_mutate(session: &Session, capability: Capability) -> bool {
    match session {
        Session::Master => true,
        Session::Delegate { permissions, .. } => permissions.contains(&capability),
        Session::Member { .. } | Session::Anonymous => false,
    }
}
