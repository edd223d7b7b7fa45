//! Notice board mutators (capability `notice`).

use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::{Document, Notice};
use crate::service::{fresh_id, require, MutationResult};

/// Input for a new notice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeDraft {
    pub date: String,
    pub title: String,
    pub body: String,
}

/// Posts a notice under a fresh id.
///
/// Notices display newest-first by insertion, so the `date` value has no
/// effect on ordering.
pub fn add_notice(doc: &Document, session: &Session, draft: NoticeDraft) -> MutationResult<Document> {
    require(session, Capability::Notice)?;

    let id = fresh_id(|candidate| doc.notices.iter().any(|notice| notice.id == candidate));
    let mut next = doc.clone();
    next.notices.push(Notice {
        id,
        date: draft.date,
        title: draft.title,
        body: draft.body,
    });
    Ok(next)
}

/// Removes the notice with `id`; absent ids are a no-op.
pub fn remove_notice(doc: &Document, session: &Session, id: &str) -> MutationResult<Document> {
    require(session, Capability::Notice)?;
    let mut next = doc.clone();
    next.notices.retain(|notice| notice.id != id);
    Ok(next)
}
