use portal_core::service::poll_service::{cast_vote, create_poll, delete_poll};
use portal_core::{seed_document, Document, MutationError, Poll, PollOption, Session};

fn member(id: &str) -> Session {
    let doc = seed_document();
    let student = doc.student(id).expect("seed student").clone();
    Session::Member { student }
}

fn doc_with_empty_poll() -> Document {
    let mut doc = seed_document();
    doc.polls = vec![Poll {
        id: "p-ab".to_string(),
        question: "A or B?".to_string(),
        options: vec![PollOption::new("A"), PollOption::new("B")],
        voters: Vec::new(),
    }];
    doc
}

#[test]
fn vote_increments_one_option_and_records_voter() {
    let doc = doc_with_empty_poll();
    let next = cast_vote(&doc, &member("2026001"), "p-ab", 0).expect("first vote");

    let poll = next.poll("p-ab").expect("poll");
    assert_eq!(poll.options[0].vote_count, 1);
    assert_eq!(poll.options[1].vote_count, 0);
    assert_eq!(poll.voters, vec!["2026001".to_string()]);
}

#[test]
fn second_vote_by_same_member_is_duplicate_for_any_index() {
    let doc = doc_with_empty_poll();
    let voted = cast_vote(&doc, &member("2026001"), "p-ab", 0).expect("first vote");

    for index in [0, 1, 7] {
        let err = cast_vote(&voted, &member("2026001"), "p-ab", index)
            .expect_err("second vote must fail");
        assert_eq!(
            err,
            MutationError::DuplicateVote {
                poll_id: "p-ab".to_string(),
                voter_id: "2026001".to_string(),
            }
        );
        assert!(err.is_silent());
    }
}

#[test]
fn different_members_vote_independently() {
    let doc = doc_with_empty_poll();
    let doc = cast_vote(&doc, &member("2026001"), "p-ab", 1).expect("vote 1");
    let doc = cast_vote(&doc, &member("2026002"), "p-ab", 1).expect("vote 2");

    let poll = doc.poll("p-ab").expect("poll");
    assert_eq!(poll.options[1].vote_count, 2);
    assert_eq!(poll.total_votes(), 2);
    assert_eq!(poll.voters.len(), 2);
}

#[test]
fn only_members_may_vote() {
    let doc = doc_with_empty_poll();
    let delegate = Session::Delegate {
        key_name: "Class CR".to_string(),
        permissions: portal_core::Capability::all(),
    };
    for session in [Session::Anonymous, Session::Master, delegate] {
        assert_eq!(
            cast_vote(&doc, &session, "p-ab", 0),
            Err(MutationError::MemberRequired)
        );
    }
}

#[test]
fn vote_rejects_unknown_poll_and_out_of_range_option() {
    let doc = doc_with_empty_poll();
    assert_eq!(
        cast_vote(&doc, &member("2026001"), "missing", 0),
        Err(MutationError::NotFound("missing".to_string()))
    );
    assert_eq!(
        cast_vote(&doc, &member("2026001"), "p-ab", 2),
        Err(MutationError::ValidationFailed("option_index"))
    );
}

#[test]
fn create_poll_splits_trims_and_drops_blank_options() {
    let doc = seed_document();
    let next = create_poll(
        &doc,
        &Session::Master,
        "Pick a day?",
        "Friday, Saturday,  , Sunday",
    )
    .expect("create poll");

    let poll = next.polls.last().expect("new poll");
    assert_eq!(poll.question, "Pick a day?");
    let options: Vec<(&str, u32)> = poll
        .options
        .iter()
        .map(|option| (option.option_text.as_str(), option.vote_count))
        .collect();
    assert_eq!(
        options,
        vec![("Friday", 0), ("Saturday", 0), ("Sunday", 0)]
    );
    assert!(poll.voters.is_empty());
    assert_ne!(poll.id, "p1");
}

#[test]
fn create_poll_accepts_blank_question() {
    let next = create_poll(&seed_document(), &Session::Master, "", "Yes,No").expect("create");
    assert_eq!(next.polls.last().expect("poll").question, "");
}

#[test]
fn poll_edits_require_polls_capability() {
    let doc = seed_document();
    let delegate = Session::Delegate {
        key_name: "Class CR".to_string(),
        permissions: doc.access_keys[0].permissions.clone(),
    };

    assert!(matches!(
        create_poll(&doc, &delegate, "q", "a,b"),
        Err(MutationError::PermissionDenied { .. })
    ));
    assert!(matches!(
        delete_poll(&doc, &member("2026001"), "p1"),
        Err(MutationError::PermissionDenied { .. })
    ));
}

#[test]
fn vote_after_poll_deleted_is_not_found() {
    let doc = delete_poll(&doc_with_empty_poll(), &Session::Master, "p-ab").expect("delete");
    assert!(matches!(
        cast_vote(&doc, &member("2026001"), "p-ab", 0),
        Err(MutationError::NotFound(_))
    ));
}

#[test]
fn saturated_option_count_rejects_vote_and_keeps_document() {
    let mut doc = seed_document();
    doc.polls[0].options[0].vote_count = u32::MAX;

    let err = cast_vote(&doc, &member("2026001"), "p1", 0).expect_err("count cannot grow");
    assert_eq!(err, MutationError::ValidationFailed("vote_count"));

    let next = cast_vote(&doc, &member("2026001"), "p1", 1).expect("other option still counts");
    let poll = next.poll("p1").expect("seed poll");
    assert_eq!(poll.options[0].vote_count, u32::MAX);
    assert_eq!(poll.options[1].vote_count, 4);
}
