use portal_core::{
    can_mutate, seed_document, AccessKey, AuthError, Authorizer, Capability, Role, Session,
    Student, MASTER_SECRET,
};
use std::collections::BTreeSet;

fn student(id: &str) -> Student {
    Student {
        id: id.to_string(),
        name: format!("student {id}"),
        phone: String::new(),
        session: "2019-20".to_string(),
    }
}

#[test]
fn master_secret_grants_every_capability() {
    let doc = seed_document();
    let session = Authorizer::new(&doc)
        .authenticate(MASTER_SECRET)
        .expect("master login");

    assert_eq!(session.role(), Role::Master);
    for capability in Capability::ALL {
        assert!(can_mutate(&session, capability));
    }
}

#[test]
fn delegate_can_mutate_exactly_its_key_permissions() {
    let mut doc = seed_document();
    doc.access_keys.push(AccessKey {
        name: "Poll Desk".to_string(),
        key: "POLL-1".to_string(),
        permissions: [Capability::Polls, Capability::Academic].into_iter().collect(),
    });

    for entry in &doc.access_keys {
        let session = Authorizer::new(&doc)
            .authenticate(entry.key.as_str())
            .expect("delegate login");
        assert_eq!(session.role(), Role::Delegate);
        assert_eq!(session.permissions(), entry.permissions);
        for capability in Capability::ALL {
            assert_eq!(
                can_mutate(&session, capability),
                entry.permissions.contains(&capability),
                "key {} capability {}",
                entry.name,
                capability
            );
        }
    }
}

#[test]
fn student_id_yields_member_that_can_never_edit() {
    let doc = seed_document();
    for entry in &doc.students {
        let session = Authorizer::new(&doc)
            .authenticate(entry.id.as_str())
            .expect("member login");

        assert_eq!(session.role(), Role::Member);
        assert_eq!(session.identity().map(|s| s.id.as_str()), Some(entry.id.as_str()));
        assert!(session.permissions().is_empty());
        for capability in Capability::ALL {
            assert!(!can_mutate(&session, capability));
        }
    }
}

#[test]
fn unmatched_credentials_fail_with_invalid_credential() {
    let doc = seed_document();
    let authorizer = Authorizer::new(&doc);
    for credential in ["", "ADMIN789", "cr-7890", "2026003", "T1", "n1"] {
        assert_eq!(
            authorizer.authenticate(credential),
            Err(AuthError::InvalidCredential),
            "credential {credential:?}"
        );
    }
}

#[test]
fn access_key_wins_over_colliding_student_id() {
    let mut doc = seed_document();
    doc.students.push(student("CR-7890"));

    let session = Authorizer::new(&doc)
        .authenticate("CR-7890")
        .expect("colliding credential");
    assert_eq!(session.role(), Role::Delegate);
}

#[test]
fn master_secret_wins_over_colliding_key_and_student() {
    let mut doc = seed_document();
    doc.access_keys.push(AccessKey {
        name: "Shadow".to_string(),
        key: MASTER_SECRET.to_string(),
        permissions: BTreeSet::new(),
    });
    doc.students.push(student(MASTER_SECRET));

    let session = Authorizer::new(&doc)
        .authenticate(MASTER_SECRET)
        .expect("master login");
    assert_eq!(session, Session::Master);
}

#[test]
fn first_matching_access_key_wins() {
    let mut doc = seed_document();
    doc.access_keys.push(AccessKey {
        name: "Second".to_string(),
        key: "SHARED".to_string(),
        permissions: [Capability::Polls].into_iter().collect(),
    });
    doc.access_keys.insert(
        0,
        AccessKey {
            name: "First".to_string(),
            key: "SHARED".to_string(),
            permissions: [Capability::Notice].into_iter().collect(),
        },
    );

    let session = Authorizer::new(&doc).authenticate("SHARED").expect("login");
    match session {
        Session::Delegate { key_name, .. } => assert_eq!(key_name, "First"),
        other => panic!("expected delegate, got {other:?}"),
    }
}
