//! Offline advisor that condenses notice text locally.

use crate::advisory::{Advisor, AdvisoryError};
use crate::model::document::Notice;
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_SUMMARY_CHARS: usize = 140;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?](\s|$)").expect("valid sentence regex"));

/// Summarizes by keeping the first sentence, capped to a character budget.
#[derive(Debug, Clone, Copy)]
pub struct ExtractiveAdvisor {
    max_chars: usize,
}

impl Default for ExtractiveAdvisor {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_CHARS)
    }
}

impl ExtractiveAdvisor {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    fn condense(&self, text: &str) -> Option<String> {
        let normalized = WHITESPACE_RE.replace_all(text, " ");
        let normalized = normalized.trim();
        if normalized.is_empty() {
            return None;
        }

        let first_sentence = match SENTENCE_END_RE.find(normalized) {
            Some(found) => normalized[..found.start() + 1].trim_end(),
            None => normalized,
        };
        if first_sentence.chars().count() <= self.max_chars {
            return Some(first_sentence.to_string());
        }
        let mut truncated: String = first_sentence.chars().take(self.max_chars).collect();
        truncated.push_str("...");
        Some(truncated)
    }
}

impl Advisor for ExtractiveAdvisor {
    fn summarize(&self, text: &str) -> Result<String, AdvisoryError> {
        self.condense(text).ok_or(AdvisoryError::EmptyResponse)
    }

    fn advise(&self, recent_notices: &[Notice]) -> Result<String, AdvisoryError> {
        let titles: Vec<String> = recent_notices
            .iter()
            .rev()
            .filter_map(|notice| self.condense(notice.title.as_str()))
            .collect();
        if titles.is_empty() {
            return Err(AdvisoryError::EmptyResponse);
        }
        Ok(format!("Stay on top of this week: {}", titles.join("; ")))
    }
}
