//! Edit capabilities attached to access keys.
//!
//! # Responsibility
//! - Define the closed set of permission tags that gate collection edits.
//! - Parse persisted tag strings without letting unknown values through.
//!
//! # Invariants
//! - Tag strings are lowercase and matched exactly.
//! - Every mutating operation names exactly one capability.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Permission tag gating one collection's mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Routine,
    Academic,
    Student,
    Notice,
    Attendance,
    Polls,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 6] = [
        Self::Routine,
        Self::Academic,
        Self::Student,
        Self::Notice,
        Self::Attendance,
        Self::Polls,
    ];

    /// Stable string id used in persisted access keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Routine => CAPABILITY_ROUTINE,
            Self::Academic => CAPABILITY_ACADEMIC,
            Self::Student => CAPABILITY_STUDENT,
            Self::Notice => CAPABILITY_NOTICE,
            Self::Attendance => CAPABILITY_ATTENDANCE,
            Self::Polls => CAPABILITY_POLLS,
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Routine => "Edit the class routine.",
            Self::Academic => "Edit course subjects and shared academic resources.",
            Self::Student => "Edit the student directory.",
            Self::Notice => "Post and remove notices.",
            Self::Attendance => "Record and remove attendance sheets.",
            Self::Polls => "Create and delete polls.",
        }
    }

    /// Returns the full capability set granted to the master session.
    pub fn all() -> BTreeSet<Capability> {
        Self::ALL.into_iter().collect()
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const CAPABILITY_ROUTINE: &str = "routine";
pub const CAPABILITY_ACADEMIC: &str = "academic";
pub const CAPABILITY_STUDENT: &str = "student";
pub const CAPABILITY_NOTICE: &str = "notice";
pub const CAPABILITY_ATTENDANCE: &str = "attendance";
pub const CAPABILITY_POLLS: &str = "polls";

/// Parses one capability from its persisted tag.
pub fn parse_capability(value: &str) -> Result<Capability, CapabilityError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(CapabilityError::EmptyCapability);
    }

    match normalized {
        CAPABILITY_ROUTINE => Ok(Capability::Routine),
        CAPABILITY_ACADEMIC => Ok(Capability::Academic),
        CAPABILITY_STUDENT => Ok(Capability::Student),
        CAPABILITY_NOTICE => Ok(Capability::Notice),
        CAPABILITY_ATTENDANCE => Ok(Capability::Attendance),
        CAPABILITY_POLLS => Ok(Capability::Polls),
        other => Err(CapabilityError::UnsupportedCapability(other.to_string())),
    }
}

/// Deserializes an access key permission list, dropping unknown tags.
///
/// A stale or mistyped tag in persisted data must not invalidate the whole
/// document, so it is logged and ignored instead of failing the load.
pub(crate) fn deserialize_permissions<'de, D>(
    deserializer: D,
) -> Result<BTreeSet<Capability>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut permissions = BTreeSet::new();
    for tag in raw {
        match parse_capability(tag.as_str()) {
            Ok(capability) => {
                permissions.insert(capability);
            }
            Err(err) => {
                warn!("event=permission_tag_skipped module=model status=rejected reason={err}");
            }
        }
    }
    Ok(permissions)
}

/// Capability parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    EmptyCapability,
    UnsupportedCapability(String),
}

impl Display for CapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCapability => write!(f, "capability value must not be empty"),
            Self::UnsupportedCapability(value) => {
                write!(f, "capability is unsupported: {value}")
            }
        }
    }
}

impl Error for CapabilityError {}
