//! Advisory text services (notice summaries, weekly advice).
//!
//! # Responsibility
//! - Define the fallible advisor contract implemented by local or remote
//!   backends.
//! - Degrade every failure to a fixed fallback string.
//!
//! # Invariants
//! - Advisory failures are logged and never propagated to callers.
//! - Advice context is the two most recently inserted notices.

pub mod extractive;

use crate::model::document::{Document, Notice};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returned when a notice summary cannot be produced.
pub const SUMMARY_FALLBACK: &str = "Could not generate summary at this time.";
/// Returned when weekly advice cannot be produced.
pub const ADVICE_FALLBACK: &str = "Keep studying hard, future engineers!";

const ADVICE_CONTEXT_NOTICES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    /// Backend could not be reached or refused the request.
    Unavailable(String),
    /// Backend answered with no usable text.
    EmptyResponse,
}

impl Display for AdvisoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "advisor unavailable: {message}"),
            Self::EmptyResponse => write!(f, "advisor returned an empty response"),
        }
    }
}

impl Error for AdvisoryError {}

/// Fallible advisory backend.
pub trait Advisor {
    fn summarize(&self, text: &str) -> Result<String, AdvisoryError>;
    fn advise(&self, recent_notices: &[Notice]) -> Result<String, AdvisoryError>;
}

/// Summarizes a notice body, degrading to [`SUMMARY_FALLBACK`].
pub fn summarize_notice(advisor: &dyn Advisor, text: &str) -> String {
    resolve("summarize", advisor.summarize(text), SUMMARY_FALLBACK)
}

/// Produces the weekly advice line, degrading to [`ADVICE_FALLBACK`].
pub fn word_of_the_week(advisor: &dyn Advisor, doc: &Document) -> String {
    resolve(
        "advise",
        advisor.advise(recent_notices(doc)),
        ADVICE_FALLBACK,
    )
}

/// The most recently inserted notices, oldest of them first.
pub fn recent_notices(doc: &Document) -> &[Notice] {
    let start = doc.notices.len().saturating_sub(ADVICE_CONTEXT_NOTICES);
    &doc.notices[start..]
}

fn resolve(
    operation: &'static str,
    outcome: Result<String, AdvisoryError>,
    fallback: &'static str,
) -> String {
    let outcome = outcome.and_then(|text| {
        if text.trim().is_empty() {
            Err(AdvisoryError::EmptyResponse)
        } else {
            Ok(text)
        }
    });
    match outcome {
        Ok(text) => text,
        Err(err) => {
            warn!("event=advisory module=advisory status=fallback operation={operation} error={err}");
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        recent_notices, summarize_notice, word_of_the_week, Advisor, AdvisoryError,
        ADVICE_FALLBACK, SUMMARY_FALLBACK,
    };
    use crate::model::document::{Document, Notice};
    use crate::model::seed::seed_document;

    struct Offline;

    impl Advisor for Offline {
        fn summarize(&self, _text: &str) -> Result<String, AdvisoryError> {
            Err(AdvisoryError::Unavailable("no network".to_string()))
        }

        fn advise(&self, _recent_notices: &[Notice]) -> Result<String, AdvisoryError> {
            Ok("   ".to_string())
        }
    }

    struct Echo;

    impl Advisor for Echo {
        fn summarize(&self, text: &str) -> Result<String, AdvisoryError> {
            Ok(format!("summary: {text}"))
        }

        fn advise(&self, recent_notices: &[Notice]) -> Result<String, AdvisoryError> {
            Ok(format!("{} notices", recent_notices.len()))
        }
    }

    fn notice(id: &str) -> Notice {
        Notice {
            id: id.to_string(),
            date: "2024-05-20".to_string(),
            title: id.to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn failures_degrade_to_fallback_strings() {
        assert_eq!(summarize_notice(&Offline, "exam"), SUMMARY_FALLBACK);
        assert_eq!(word_of_the_week(&Offline, &seed_document()), ADVICE_FALLBACK);
    }

    #[test]
    fn successful_answers_pass_through() {
        assert_eq!(summarize_notice(&Echo, "exam"), "summary: exam");
        assert_eq!(word_of_the_week(&Echo, &seed_document()), "1 notices");
    }

    #[test]
    fn recent_notices_keeps_last_two_insertions() {
        let mut doc = Document::default();
        assert!(recent_notices(&doc).is_empty());
        for id in ["a", "b", "c"] {
            doc.notices.push(notice(id));
        }
        let ids: Vec<&str> = recent_notices(&doc).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
