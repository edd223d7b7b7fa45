//! Poll mutators.
//!
//! Creating and deleting polls is gated by the `polls` capability. Voting is
//! gated by role only: any identified member may vote once per poll, and no
//! capability grant is consulted.

use crate::auth::session::Session;
use crate::model::capability::Capability;
use crate::model::document::{Document, Poll, PollOption};
use crate::service::{fresh_id, require, MutationError, MutationResult};

/// Splits comma-separated option text into trimmed, non-empty options.
pub fn parse_poll_options(raw_options: &str) -> Vec<PollOption> {
    raw_options
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(PollOption::new)
        .collect()
}

/// Creates a poll with zeroed options and no voters.
///
/// The question is stored as given, even when blank.
pub fn create_poll(
    doc: &Document,
    session: &Session,
    question: impl Into<String>,
    raw_options: &str,
) -> MutationResult<Document> {
    require(session, Capability::Polls)?;

    let id = fresh_id(|candidate| doc.polls.iter().any(|poll| poll.id == candidate));
    let mut next = doc.clone();
    next.polls.push(Poll {
        id,
        question: question.into(),
        options: parse_poll_options(raw_options),
        voters: Vec::new(),
    });
    Ok(next)
}

/// Deletes the poll with `id`; absent ids are a no-op.
pub fn delete_poll(doc: &Document, session: &Session, id: &str) -> MutationResult<Document> {
    require(session, Capability::Polls)?;
    let mut next = doc.clone();
    next.polls.retain(|poll| poll.id != id);
    Ok(next)
}

/// Casts the session member's vote for `option_index` on `poll_id`.
///
/// The voter id is the member's student id. On success exactly one option
/// count grows by one and the voter is appended, replacing the poll as a
/// whole.
///
/// # Errors
/// - `MemberRequired` unless the session is a member.
/// - `NotFound` when the poll does not exist.
/// - `DuplicateVote` when the member already voted (checked before the index).
/// - `ValidationFailed("option_index")` when the index is out of range.
/// - `ValidationFailed("vote_count")` when the option count cannot grow.
pub fn cast_vote(
    doc: &Document,
    session: &Session,
    poll_id: &str,
    option_index: usize,
) -> MutationResult<Document> {
    let voter_id = match session.identity() {
        Some(student) => student.id.as_str(),
        None => return Err(MutationError::MemberRequired),
    };

    let position = doc
        .polls
        .iter()
        .position(|poll| poll.id == poll_id)
        .ok_or_else(|| MutationError::NotFound(poll_id.to_string()))?;
    let poll = &doc.polls[position];

    if poll.has_voted(voter_id) {
        return Err(MutationError::DuplicateVote {
            poll_id: poll.id.clone(),
            voter_id: voter_id.to_string(),
        });
    }
    if option_index >= poll.options.len() {
        return Err(MutationError::ValidationFailed("option_index"));
    }

    let mut updated = poll.clone();
    let option = &mut updated.options[option_index];
    option.vote_count = option
        .vote_count
        .checked_add(1)
        .ok_or(MutationError::ValidationFailed("vote_count"))?;
    updated.voters.push(voter_id.to_string());

    let mut next = doc.clone();
    next.polls[position] = updated;
    Ok(next)
}
