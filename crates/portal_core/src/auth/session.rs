//! Session state for the current portal user.

use crate::model::capability::Capability;
use crate::model::document::Student;
use std::collections::BTreeSet;

/// Coarse role of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Anonymous,
    Member,
    Delegate,
    Master,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Member => "member",
            Self::Delegate => "delegate",
            Self::Master => "master",
        }
    }
}

/// Current session.
///
/// Sessions are replaced wholesale on login and logout; they are never
/// persisted with the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    /// Identified student. May read and vote, never edit.
    Member { student: Student },
    /// Holder of a shared access key.
    Delegate {
        key_name: String,
        permissions: BTreeSet<Capability>,
    },
    Master,
}

impl Session {
    pub fn role(&self) -> Role {
        match self {
            Self::Anonymous => Role::Anonymous,
            Self::Member { .. } => Role::Member,
            Self::Delegate { .. } => Role::Delegate,
            Self::Master => Role::Master,
        }
    }

    /// Identified student for member sessions.
    pub fn identity(&self) -> Option<&Student> {
        match self {
            Self::Member { student } => Some(student),
            _ => None,
        }
    }

    /// Effective granted capabilities.
    pub fn permissions(&self) -> BTreeSet<Capability> {
        match self {
            Self::Master => Capability::all(),
            Self::Delegate { permissions, .. } => permissions.clone(),
            Self::Anonymous | Self::Member { .. } => BTreeSet::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Drops identity and permissions, returning to the anonymous state.
    pub fn logout(&mut self) {
        *self = Self::Anonymous;
    }
}
