//! Persistence boundary for the portal document.
//!
//! # Responsibility
//! - Define the key-value storage contract the document is saved through.
//! - Encode and decode the document as JSON under one fixed namespace.
//! - Fall back to the seed document when nothing parsable is persisted.
//!
//! # Invariants
//! - `decode_document` validates; `load_or_seed` keeps parsed data even when
//!   validation fails.
//! - Storage errors never reach mutation results; callers log them.

pub mod document_repo;
pub mod kv_repo;

use crate::model::document::DocumentValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage and codec errors.
#[derive(Debug)]
pub enum RepoError {
    Sqlite(rusqlite::Error),
    /// Storage file was written by a newer schema than this build knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Codec(serde_json::Error),
    InvalidData(DocumentValidationError),
    /// Backend refused the operation (quota, read-only medium, ...).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "storage query failed: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Codec(err) => write!(f, "document encoding failed: {err}"),
            Self::InvalidData(err) => write!(f, "invalid persisted document: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Codec(err) => Some(err),
            Self::InvalidData(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

impl From<DocumentValidationError> for RepoError {
    fn from(value: DocumentValidationError) -> Self {
        Self::InvalidData(value)
    }
}
