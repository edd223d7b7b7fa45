//! Academic section mutators (capability `academic`).
//!
//! Subjects and resources carry no id; removal addresses them by position.

use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::{Document, Resource, Subject};
use crate::service::{require, require_text, MutationResult};

/// Appends a course subject. `name` is required.
pub fn add_subject(doc: &Document, session: &Session, subject: Subject) -> MutationResult<Document> {
    require(session, Capability::Academic)?;
    require_text(&subject.name, "name")?;
    let mut next = doc.clone();
    next.subjects.push(subject);
    Ok(next)
}

/// Removes the subject at `index`; out of range is a no-op.
pub fn remove_subject(doc: &Document, session: &Session, index: usize) -> MutationResult<Document> {
    require(session, Capability::Academic)?;
    let mut next = doc.clone();
    if index < next.subjects.len() {
        next.subjects.remove(index);
    }
    Ok(next)
}

/// Appends a shared resource link. `title` and `url` are required.
pub fn add_resource(
    doc: &Document,
    session: &Session,
    resource: Resource,
) -> MutationResult<Document> {
    require(session, Capability::Academic)?;
    require_text(&resource.title, "title")?;
    require_text(&resource.url, "url")?;
    let mut next = doc.clone();
    next.resources.push(resource);
    Ok(next)
}

/// Removes the resource at `index`; out of range is a no-op.
pub fn remove_resource(doc: &Document, session: &Session, index: usize) -> MutationResult<Document> {
    require(session, Capability::Academic)?;
    let mut next = doc.clone();
    if index < next.resources.len() {
        next.resources.remove(index);
    }
    Ok(next)
}
