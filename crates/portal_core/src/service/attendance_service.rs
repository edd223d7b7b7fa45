//! Attendance sheet mutators (capability `attendance`).

use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::{AttendanceRecord, Document, EntityId};
use crate::service::{fresh_id, require, require_text, MutationResult};
use log::warn;
use std::collections::HashSet;

/// Records one attendance sheet under a fresh id.
///
/// Present ids keep their given order. Repeated ids and ids that belong to
/// no registered student are dropped.
///
/// # Errors
/// - `PermissionDenied` without the `attendance` capability.
/// - `ValidationFailed` when `subject` is blank.
pub fn record_attendance(
    doc: &Document,
    session: &Session,
    date: impl Into<String>,
    subject: impl Into<String>,
    present_ids: Vec<EntityId>,
) -> MutationResult<Document> {
    require(session, Capability::Attendance)?;
    let subject = subject.into();
    require_text(&subject, "subject")?;

    let mut seen = HashSet::new();
    let mut present = Vec::with_capacity(present_ids.len());
    let mut unknown = 0usize;
    for id in present_ids {
        if doc.student(id.as_str()).is_none() {
            unknown += 1;
            continue;
        }
        if seen.insert(id.clone()) {
            present.push(id);
        }
    }
    if unknown > 0 {
        warn!("event=attendance_record module=service status=filtered unknown_ids={unknown}");
    }

    let id = fresh_id(|candidate| doc.attendance.iter().any(|record| record.id == candidate));
    let mut next = doc.clone();
    next.attendance.push(AttendanceRecord {
        id,
        date: date.into(),
        subject,
        present_ids: present,
    });
    Ok(next)
}

/// Removes the attendance sheet with `id`; absent ids are a no-op.
pub fn remove_attendance_record(
    doc: &Document,
    session: &Session,
    id: &str,
) -> MutationResult<Document> {
    require(session, Capability::Attendance)?;
    let mut next = doc.clone();
    next.attendance.retain(|record| record.id != id);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::record_attendance;
    use crate::auth::session::Session;
    use crate::model::seed::seed_document;

    #[test]
    fn drops_unknown_and_repeated_ids() {
        let doc = seed_document();
        let next = record_attendance(
            &doc,
            &Session::Master,
            "2024-06-01",
            "Circuit",
            vec![
                "2026002".to_string(),
                "9999999".to_string(),
                "2026001".to_string(),
                "2026002".to_string(),
            ],
        )
        .expect("master may record");

        assert_eq!(
            next.attendance[0].present_ids,
            vec!["2026002".to_string(), "2026001".to_string()]
        );
    }
}
