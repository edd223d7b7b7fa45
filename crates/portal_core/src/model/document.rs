//! Portal document aggregate.
//!
//! # Responsibility
//! - Define every collection entity persisted by the portal.
//! - Provide read-side helpers used by views (display orderings, lookups).
//! - Validate aggregate invariants after decoding persisted state.
//!
//! # Invariants
//! - Entities with an `id` are unique by id within their collection.
//! - Access keys are unique by `key` (case-sensitive).
//! - A poll's voter list never contains the same student twice.
//! - Collections keep insertion order; newest-first views reverse it.

use crate::model::capability::{deserialize_permissions, Capability};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier shared by all id-bearing entities.
///
/// Student ids double as member login credentials.
pub type EntityId = String;

/// Delivery mode of one routine class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutineMode {
    Online,
    Offline,
}

/// One scheduled class in the batch routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineItem {
    pub id: EntityId,
    pub mode: RoutineMode,
    /// Free text, e.g. `FRIDAY`.
    pub day: String,
    /// Free text, e.g. `8.00`.
    pub time: String,
    pub subject: String,
    pub teacher: String,
    /// Room number for offline classes, meeting link for online ones.
    pub location_or_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: EntityId,
    pub name: String,
    pub phone: String,
    /// Academic session label, e.g. `2019-20`.
    pub session: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: EntityId,
    pub name: String,
    pub designation: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: EntityId,
    /// Informational only; display order never depends on it.
    pub date: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: EntityId,
    pub date: String,
    pub subject: String,
    pub present_ids: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub option_text: String,
    pub vote_count: u32,
}

impl PollOption {
    pub fn new(option_text: impl Into<String>) -> Self {
        Self {
            option_text: option_text.into(),
            vote_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: EntityId,
    pub question: String,
    pub options: Vec<PollOption>,
    /// Student ids that already voted, in vote order.
    pub voters: Vec<EntityId>,
}

impl Poll {
    /// Returns whether `voter_id` has already voted on this poll.
    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.voters.iter().any(|voter| voter == voter_id)
    }

    pub fn total_votes(&self) -> u64 {
        self.options
            .iter()
            .map(|option| u64::from(option.vote_count))
            .sum()
    }
}

/// Course entry in the academic section. Identified by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub name: String,
    pub code: String,
    pub link: String,
}

/// Shared study material link. Identified by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// Shared delegate credential with a fixed permission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    /// Display label, e.g. `Class CR`.
    pub name: String,
    /// Secret credential string, matched exactly.
    pub key: String,
    #[serde(deserialize_with = "deserialize_permissions")]
    pub permissions: BTreeSet<Capability>,
}

/// Root aggregate holding every portal collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub routine: Vec<RoutineItem>,
    pub students: Vec<Student>,
    pub faculty: Vec<Faculty>,
    pub notices: Vec<Notice>,
    pub attendance: Vec<AttendanceRecord>,
    pub polls: Vec<Poll>,
    pub subjects: Vec<Subject>,
    pub resources: Vec<Resource>,
    pub access_keys: Vec<AccessKey>,
}

impl Document {
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    pub fn poll(&self, id: &str) -> Option<&Poll> {
        self.polls.iter().find(|poll| poll.id == id)
    }

    /// Routine entries of one `mode`, in insertion order.
    pub fn routine_by_mode(&self, mode: RoutineMode) -> impl Iterator<Item = &RoutineItem> {
        self.routine.iter().filter(move |item| item.mode == mode)
    }

    /// Notices most recently added first, regardless of their `date` field.
    pub fn notices_newest_first(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().rev()
    }

    /// Attendance sheets most recently recorded first.
    pub fn attendance_newest_first(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.attendance.iter().rev()
    }

    /// Polls most recently created first.
    pub fn polls_newest_first(&self) -> impl Iterator<Item = &Poll> {
        self.polls.iter().rev()
    }

    /// Number of attendance sheets that list `student_id` as present.
    pub fn attendance_count(&self, student_id: &str) -> usize {
        self.attendance
            .iter()
            .filter(|record| record.present_ids.iter().any(|id| id == student_id))
            .count()
    }

    /// Checks aggregate invariants.
    ///
    /// # Errors
    /// - Returns the first duplicated id, access key or poll voter found.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        ensure_unique("routine", self.routine.iter().map(|item| item.id.as_str()))?;
        ensure_unique("students", self.students.iter().map(|item| item.id.as_str()))?;
        ensure_unique("faculty", self.faculty.iter().map(|item| item.id.as_str()))?;
        ensure_unique("notices", self.notices.iter().map(|item| item.id.as_str()))?;
        ensure_unique(
            "attendance",
            self.attendance.iter().map(|item| item.id.as_str()),
        )?;
        ensure_unique("polls", self.polls.iter().map(|item| item.id.as_str()))?;

        let mut keys = HashSet::new();
        for entry in &self.access_keys {
            if !keys.insert(entry.key.as_str()) {
                return Err(DocumentValidationError::DuplicateAccessKey(
                    entry.name.clone(),
                ));
            }
        }

        for poll in &self.polls {
            let mut voters = HashSet::new();
            for voter in &poll.voters {
                if !voters.insert(voter.as_str()) {
                    return Err(DocumentValidationError::DuplicateVoter {
                        poll_id: poll.id.clone(),
                        voter_id: voter.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn ensure_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DocumentValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DocumentValidationError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Aggregate invariant violations found in a decoded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    DuplicateId {
        collection: &'static str,
        id: EntityId,
    },
    /// Carries the key's display name, never the secret itself.
    DuplicateAccessKey(String),
    DuplicateVoter {
        poll_id: EntityId,
        voter_id: EntityId,
    },
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id `{id}` in {collection}")
            }
            Self::DuplicateAccessKey(name) => {
                write!(f, "access key `{name}` reuses an existing key string")
            }
            Self::DuplicateVoter { poll_id, voter_id } => {
                write!(f, "voter `{voter_id}` recorded twice on poll `{poll_id}`")
            }
        }
    }
}

impl Error for DocumentValidationError {}

#[cfg(test)]
mod tests {
    use super::{
        Document, DocumentValidationError, Notice, Poll, PollOption, RoutineItem, RoutineMode,
    };
    use crate::model::seed::seed_document;

    fn notice(id: &str, date: &str) -> Notice {
        Notice {
            id: id.to_string(),
            date: date.to_string(),
            title: format!("title {id}"),
            body: String::new(),
        }
    }

    #[test]
    fn seed_document_is_valid() {
        seed_document().validate().expect("seed must satisfy invariants");
    }

    #[test]
    fn notices_newest_first_ignores_date_values() {
        let mut doc = Document::default();
        doc.notices.push(notice("a", "2030-01-01"));
        doc.notices.push(notice("b", "2001-01-01"));

        let ids: Vec<&str> = doc
            .notices_newest_first()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn routine_by_mode_splits_online_and_offline_classes() {
        let mut doc = seed_document();
        doc.routine.push(RoutineItem {
            id: "2".to_string(),
            mode: RoutineMode::Online,
            day: "SUNDAY".to_string(),
            time: "9.00".to_string(),
            subject: "Signals".to_string(),
            teacher: "MRK".to_string(),
            location_or_link: "https://meet.example/signals".to_string(),
        });

        let online: Vec<&str> = doc
            .routine_by_mode(RoutineMode::Online)
            .map(|item| item.id.as_str())
            .collect();
        let offline: Vec<&str> = doc
            .routine_by_mode(RoutineMode::Offline)
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(online, vec!["2"]);
        assert_eq!(offline, vec!["1"]);
    }

    #[test]
    fn polls_newest_first_reverses_creation_order() {
        let mut doc = seed_document();
        doc.polls.push(Poll {
            id: "p2".to_string(),
            question: "Venue?".to_string(),
            options: vec![PollOption::new("Lab"), PollOption::new("Hall")],
            voters: Vec::new(),
        });

        let ids: Vec<&str> = doc.polls_newest_first().map(|poll| poll.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[test]
    fn validate_rejects_duplicate_notice_ids() {
        let mut doc = Document::default();
        doc.notices.push(notice("n1", "2024-01-01"));
        doc.notices.push(notice("n1", "2024-01-02"));

        let err = doc.validate().expect_err("duplicate ids must fail");
        assert_eq!(
            err,
            DocumentValidationError::DuplicateId {
                collection: "notices",
                id: "n1".to_string(),
            }
        );
    }

    #[test]
    fn validate_rejects_duplicate_voters() {
        let mut doc = Document::default();
        doc.polls.push(Poll {
            id: "p".to_string(),
            question: "q".to_string(),
            options: vec![PollOption::new("A")],
            voters: vec!["s1".to_string(), "s1".to_string()],
        });

        assert!(matches!(
            doc.validate(),
            Err(DocumentValidationError::DuplicateVoter { .. })
        ));
    }

    #[test]
    fn serializes_access_keys_in_camel_case() {
        let json = serde_json::to_value(seed_document()).expect("serialize seed");
        assert!(json.get("accessKeys").is_some());
        assert!(json["routine"][0].get("locationOrLink").is_some());
        assert!(json["polls"][0]["options"][0].get("voteCount").is_some());
    }
}
