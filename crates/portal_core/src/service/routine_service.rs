//! Class routine mutators (capability `routine`).

use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::{Document, RoutineItem, RoutineMode};
use crate::service::{fresh_id, require, require_text, MutationResult};

const DEFAULT_ROUTINE_DAY: &str = "FRIDAY";

/// Input for a new routine class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDraft {
    pub mode: RoutineMode,
    /// Blank falls back to `FRIDAY`.
    pub day: String,
    pub time: String,
    pub subject: String,
    pub teacher: String,
    pub location_or_link: String,
}

impl Default for RoutineDraft {
    fn default() -> Self {
        Self {
            mode: RoutineMode::Offline,
            day: DEFAULT_ROUTINE_DAY.to_string(),
            time: String::new(),
            subject: String::new(),
            teacher: String::new(),
            location_or_link: String::new(),
        }
    }
}

/// Appends a class to the routine under a fresh id.
///
/// # Errors
/// - `PermissionDenied` without the `routine` capability.
/// - `ValidationFailed` when `subject` or `time` is blank.
pub fn add_routine_item(
    doc: &Document,
    session: &Session,
    draft: RoutineDraft,
) -> MutationResult<Document> {
    require(session, Capability::Routine)?;
    require_text(&draft.subject, "subject")?;
    require_text(&draft.time, "time")?;

    let id = fresh_id(|candidate| doc.routine.iter().any(|item| item.id == candidate));
    let day = if draft.day.trim().is_empty() {
        DEFAULT_ROUTINE_DAY.to_string()
    } else {
        draft.day
    };

    let mut next = doc.clone();
    next.routine.push(RoutineItem {
        id,
        mode: draft.mode,
        day,
        time: draft.time,
        subject: draft.subject,
        teacher: draft.teacher,
        location_or_link: draft.location_or_link,
    });
    Ok(next)
}

/// Removes the routine class with `id`; absent ids are a no-op.
pub fn remove_routine_item(doc: &Document, session: &Session, id: &str) -> MutationResult<Document> {
    require(session, Capability::Routine)?;
    let mut next = doc.clone();
    next.routine.retain(|item| item.id != id);
    Ok(next)
}
