//! Student directory mutators (capability `student`).

use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::{Document, Student};
use crate::service::{require, require_text, MutationError, MutationResult};

/// Registers a student profile.
///
/// The student id doubles as the member login credential, so it is trimmed
/// and must not collide with an existing profile.
///
/// # Errors
/// - `PermissionDenied` without the `student` capability.
/// - `ValidationFailed` when `id` or `name` is blank.
/// - `DuplicateId` when the id is already registered.
pub fn add_student(doc: &Document, session: &Session, student: Student) -> MutationResult<Document> {
    require(session, Capability::Student)?;
    require_text(&student.id, "id")?;
    require_text(&student.name, "name")?;

    let id = student.id.trim().to_string();
    if doc.student(id.as_str()).is_some() {
        return Err(MutationError::DuplicateId(id));
    }

    let mut next = doc.clone();
    next.students.push(Student { id, ..student });
    Ok(next)
}

/// Removes the student with `id`; absent ids are a no-op.
///
/// Attendance sheets and poll voter lists keep their historical ids.
pub fn remove_student(doc: &Document, session: &Session, id: &str) -> MutationResult<Document> {
    require(session, Capability::Student)?;
    let mut next = doc.clone();
    next.students.retain(|student| student.id != id);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::add_student;
    use crate::auth::session::Session;
    use crate::model::document::{Document, Student};

    #[test]
    fn trims_student_id_on_registration() {
        let student = Student {
            id: " 2026100 ".to_string(),
            name: "Nadia".to_string(),
            phone: "017".to_string(),
            session: "2020-21".to_string(),
        };
        let next = add_student(&Document::default(), &Session::Master, student)
            .expect("master may add");
        assert_eq!(next.students[0].id, "2026100");
        assert_eq!(next.students[0].session, "2020-21");
    }
}
