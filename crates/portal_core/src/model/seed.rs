//! Fixed seed document used when no persisted state is available.

use crate::model::capability::Capability;
use crate::model::document::{
    AccessKey, Document, Faculty, Notice, Poll, PollOption, Resource, RoutineItem, RoutineMode,
    Student, Subject,
};

/// Builds the seed document.
///
/// Contents: one routine class, two students, one faculty member, one notice,
/// no attendance, one two-option poll, one subject, one resource and one
/// delegate key granting routine/notice/attendance edits.
pub fn seed_document() -> Document {
    Document {
        routine: vec![RoutineItem {
            id: "1".to_string(),
            mode: RoutineMode::Offline,
            day: "FRIDAY".to_string(),
            time: "8.00".to_string(),
            subject: "Circuit".to_string(),
            teacher: "ASK".to_string(),
            location_or_link: "20002".to_string(),
        }],
        students: vec![
            Student {
                id: "2026001".to_string(),
                name: "Al-Amin".to_string(),
                phone: "01700000001".to_string(),
                session: "2019-20".to_string(),
            },
            Student {
                id: "2026002".to_string(),
                name: "Tanvir Ahmed".to_string(),
                phone: "01700000002".to_string(),
                session: "2019-20".to_string(),
            },
        ],
        faculty: vec![Faculty {
            id: "T1".to_string(),
            name: "Dr. Jahid Hasan".to_string(),
            designation: "Head of Dept.".to_string(),
            phone: "01800000000".to_string(),
        }],
        notices: vec![Notice {
            id: "n1".to_string(),
            date: "2024-05-20".to_string(),
            title: "Midterm Schedule Published".to_string(),
            body: "The midterm exams for Spring 2024 will start from June 5th. \
                   Please check the portal for details."
                .to_string(),
        }],
        attendance: Vec::new(),
        polls: vec![Poll {
            id: "p1".to_string(),
            question: "When should we have the next study session?".to_string(),
            options: vec![
                PollOption {
                    option_text: "Friday Evening".to_string(),
                    vote_count: 5,
                },
                PollOption {
                    option_text: "Saturday Morning".to_string(),
                    vote_count: 3,
                },
            ],
            voters: Vec::new(),
        }],
        subjects: vec![Subject {
            name: "Microprocessor".to_string(),
            code: "EEE 311".to_string(),
            link: "https://drive.google.com".to_string(),
        }],
        resources: vec![Resource {
            title: "Power Electronics Notes".to_string(),
            url: "https://drive.google.com".to_string(),
        }],
        access_keys: vec![AccessKey {
            name: "Class CR".to_string(),
            key: "CR-7890".to_string(),
            permissions: [
                Capability::Routine,
                Capability::Notice,
                Capability::Attendance,
            ]
            .into_iter()
            .collect(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::seed_document;
    use crate::model::capability::Capability;

    #[test]
    fn seed_has_expected_collection_sizes() {
        let doc = seed_document();
        assert_eq!(doc.routine.len(), 1);
        assert_eq!(doc.students.len(), 2);
        assert_eq!(doc.faculty.len(), 1);
        assert_eq!(doc.notices.len(), 1);
        assert!(doc.attendance.is_empty());
        assert_eq!(doc.polls.len(), 1);
        assert_eq!(doc.polls[0].options.len(), 2);
        assert_eq!(doc.subjects.len(), 1);
        assert_eq!(doc.resources.len(), 1);
        assert_eq!(doc.access_keys.len(), 1);
    }

    #[test]
    fn seed_delegate_key_grants_routine_notice_attendance() {
        let doc = seed_document();
        let permissions: Vec<Capability> =
            doc.access_keys[0].permissions.iter().copied().collect();
        assert_eq!(
            permissions,
            vec![
                Capability::Routine,
                Capability::Notice,
                Capability::Attendance
            ]
        );
    }
}
