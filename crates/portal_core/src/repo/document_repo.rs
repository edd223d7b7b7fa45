//! Document load/save over a key-value repository.
//!
//! # Invariants
//! - The whole document is written as one JSON value under one namespace.
//! - `load_or_seed` never fails: an absent, unreadable or unparsable payload
//!   yields the seed.
//! - A payload that parses is never replaced by the seed, even when it breaks
//!   document invariants.

use crate::model::document::Document;
use crate::model::seed::seed_document;
use crate::repo::kv_repo::KvRepository;
use crate::repo::RepoResult;
use log::{info, warn};

/// Default storage namespace for the portal document.
pub const DEFAULT_NAMESPACE: &str = "uu_eee_data";

/// Encodes a document as JSON text.
pub fn encode_document(doc: &Document) -> RepoResult<String> {
    Ok(serde_json::to_string(doc)?)
}

/// Parses a document from JSON text without checking invariants.
pub fn parse_document(payload: &str) -> RepoResult<Document> {
    Ok(serde_json::from_str(payload)?)
}

/// Decodes and validates a document from JSON text.
pub fn decode_document(payload: &str) -> RepoResult<Document> {
    let doc = parse_document(payload)?;
    doc.validate()?;
    Ok(doc)
}

/// Persists the portal document through a key-value repository.
pub struct DocumentRepository<R: KvRepository> {
    kv: R,
    namespace: String,
}

impl<R: KvRepository> DocumentRepository<R> {
    /// Uses [`DEFAULT_NAMESPACE`].
    pub fn new(kv: R) -> Self {
        Self::with_namespace(kv, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(kv: R, namespace: impl Into<String>) -> Self {
        Self {
            kv,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kv(&self) -> &R {
        &self.kv
    }

    /// Loads the persisted document, `None` when nothing was saved yet.
    ///
    /// # Errors
    /// - Storage read failures.
    /// - Payloads that do not decode or violate document invariants.
    pub fn load(&self) -> RepoResult<Option<Document>> {
        match self.kv.get(self.namespace.as_str())? {
            Some(payload) => decode_document(payload.as_str()).map(Some),
            None => Ok(None),
        }
    }

    /// Loads the persisted document, falling back to the seed document.
    ///
    /// Only a missing, unreadable or unparsable payload is replaced by the
    /// seed. A parsed document that fails [`Document::validate`] is kept as
    /// stored and logged, so the next save writes the user's data back.
    pub fn load_or_seed(&self) -> Document {
        let payload = match self.kv.get(self.namespace.as_str()) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                info!(
                    "event=document_load module=repo status=ok source=seed namespace={}",
                    self.namespace
                );
                return seed_document();
            }
            Err(err) => {
                warn!(
                    "event=document_load module=repo status=error source=seed namespace={} error={}",
                    self.namespace, err
                );
                return seed_document();
            }
        };

        match parse_document(payload.as_str()) {
            Ok(doc) => {
                match doc.validate() {
                    Ok(()) => info!(
                        "event=document_load module=repo status=ok source=storage namespace={}",
                        self.namespace
                    ),
                    Err(err) => warn!(
                        "event=document_load module=repo status=degraded source=storage namespace={} error={}",
                        self.namespace, err
                    ),
                }
                doc
            }
            Err(err) => {
                warn!(
                    "event=document_load module=repo status=error source=seed namespace={} error={}",
                    self.namespace, err
                );
                seed_document()
            }
        }
    }

    /// Writes the full document under the namespace.
    pub fn save(&mut self, doc: &Document) -> RepoResult<()> {
        let payload = encode_document(doc)?;
        self.kv.put(self.namespace.as_str(), payload.as_str())
    }
}
