//! Application root: owns the document, the session and the storage handle.
//!
//! # Responsibility
//! - Load the document once (persisted or seed) and hold it for the process.
//! - Route credentials through the authorizer and keep the current session.
//! - Apply gated mutators and persist after every successful mutation.
//!
//! # Invariants
//! - The document is replaced as a whole, only with a mutator's output.
//! - A rejected mutation or failed login leaves document and session as-is.
//! - Save failures are logged; the in-memory document stays authoritative.

use crate::auth::authorizer::{can_mutate, AuthError, Authorizer};
use crate::auth::session::Session;
use crate::config::{ConfigError, PortalConfig, StorageLocation};
use crate::logging::init_logging;
use crate::model::capability::Capability;
use crate::model::document::{Document, EntityId, Resource, Student, Subject};
use crate::repo::document_repo::DocumentRepository;
use crate::repo::kv_repo::{KvRepository, SqliteKvRepository};
use crate::repo::RepoError;
use crate::service::notice_service::NoticeDraft;
use crate::service::routine_service::RoutineDraft;
use crate::service::{
    academic_service, attendance_service, notice_service, poll_service, routine_service,
    student_service, MutationError, MutationResult,
};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PortalResult<T> = Result<T, PortalError>;

/// Errors raised while opening the portal.
#[derive(Debug)]
pub enum PortalError {
    Config(ConfigError),
    Logging(String),
    Repo(RepoError),
}

impl Display for PortalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PortalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConfigError> for PortalError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for PortalError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Root controller over one document and one session.
pub struct Portal<R: KvRepository> {
    repo: DocumentRepository<R>,
    document: Document,
    session: Session,
    last_save_error: Option<String>,
}

impl Portal<SqliteKvRepository> {
    /// Validates `config`, starts logging when a log directory is set, and
    /// opens SQLite-backed storage.
    pub fn open(config: &PortalConfig) -> PortalResult<Self> {
        config.validate()?;

        if let Some(log_dir) = &config.log_dir {
            init_logging(
                config.log_level.as_str(),
                log_dir.to_string_lossy().as_ref(),
            )
            .map_err(PortalError::Logging)?;
        }

        let kv = match &config.storage {
            StorageLocation::Memory => SqliteKvRepository::in_memory()?,
            StorageLocation::File(path) => SqliteKvRepository::open(path)?,
        };
        Ok(Self::with_repository(DocumentRepository::with_namespace(
            kv,
            config.namespace.trim(),
        )))
    }
}

impl<R: KvRepository> Portal<R> {
    /// Loads the document (or the seed) and starts anonymous.
    pub fn with_repository(repo: DocumentRepository<R>) -> Self {
        let document = repo.load_or_seed();
        Self {
            repo,
            document,
            session: Session::Anonymous,
            last_save_error: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn repository(&self) -> &DocumentRepository<R> {
        &self.repo
    }

    /// Message of the most recent failed save, cleared by the next success.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Replaces the session when `credential` resolves.
    ///
    /// # Errors
    /// - `InvalidCredential`; the current session is kept.
    pub fn login(&mut self, credential: &str) -> Result<&Session, AuthError> {
        let session = Authorizer::new(&self.document).authenticate(credential)?;
        self.session = session;
        Ok(&self.session)
    }

    pub fn logout(&mut self) {
        info!(
            "event=logout module=portal status=ok role={}",
            self.session.role().as_str()
        );
        self.session.logout();
    }

    pub fn can_mutate(&self, capability: Capability) -> bool {
        can_mutate(&self.session, capability)
    }

    pub fn add_routine_item(&mut self, draft: RoutineDraft) -> MutationResult<()> {
        self.apply("add_routine_item", |doc, session| {
            routine_service::add_routine_item(doc, session, draft)
        })
    }

    pub fn remove_routine_item(&mut self, id: &str) -> MutationResult<()> {
        self.apply("remove_routine_item", |doc, session| {
            routine_service::remove_routine_item(doc, session, id)
        })
    }

    pub fn add_student(&mut self, student: Student) -> MutationResult<()> {
        self.apply("add_student", |doc, session| {
            student_service::add_student(doc, session, student)
        })
    }

    pub fn remove_student(&mut self, id: &str) -> MutationResult<()> {
        self.apply("remove_student", |doc, session| {
            student_service::remove_student(doc, session, id)
        })
    }

    pub fn add_notice(&mut self, draft: NoticeDraft) -> MutationResult<()> {
        self.apply("add_notice", |doc, session| {
            notice_service::add_notice(doc, session, draft)
        })
    }

    pub fn remove_notice(&mut self, id: &str) -> MutationResult<()> {
        self.apply("remove_notice", |doc, session| {
            notice_service::remove_notice(doc, session, id)
        })
    }

    pub fn record_attendance(
        &mut self,
        date: &str,
        subject: &str,
        present_ids: Vec<EntityId>,
    ) -> MutationResult<()> {
        self.apply("record_attendance", |doc, session| {
            attendance_service::record_attendance(doc, session, date, subject, present_ids)
        })
    }

    pub fn remove_attendance_record(&mut self, id: &str) -> MutationResult<()> {
        self.apply("remove_attendance_record", |doc, session| {
            attendance_service::remove_attendance_record(doc, session, id)
        })
    }

    pub fn create_poll(&mut self, question: &str, raw_options: &str) -> MutationResult<()> {
        self.apply("create_poll", |doc, session| {
            poll_service::create_poll(doc, session, question, raw_options)
        })
    }

    pub fn delete_poll(&mut self, id: &str) -> MutationResult<()> {
        self.apply("delete_poll", |doc, session| {
            poll_service::delete_poll(doc, session, id)
        })
    }

    /// Votes as the logged-in member.
    pub fn cast_vote(&mut self, poll_id: &str, option_index: usize) -> MutationResult<()> {
        self.apply("cast_vote", |doc, session| {
            poll_service::cast_vote(doc, session, poll_id, option_index)
        })
    }

    pub fn add_subject(&mut self, subject: Subject) -> MutationResult<()> {
        self.apply("add_subject", |doc, session| {
            academic_service::add_subject(doc, session, subject)
        })
    }

    pub fn remove_subject(&mut self, index: usize) -> MutationResult<()> {
        self.apply("remove_subject", |doc, session| {
            academic_service::remove_subject(doc, session, index)
        })
    }

    pub fn add_resource(&mut self, resource: Resource) -> MutationResult<()> {
        self.apply("add_resource", |doc, session| {
            academic_service::add_resource(doc, session, resource)
        })
    }

    pub fn remove_resource(&mut self, index: usize) -> MutationResult<()> {
        self.apply("remove_resource", |doc, session| {
            academic_service::remove_resource(doc, session, index)
        })
    }

    fn apply(
        &mut self,
        operation: &'static str,
        mutate: impl FnOnce(&Document, &Session) -> MutationResult<Document>,
    ) -> MutationResult<()> {
        match mutate(&self.document, &self.session) {
            Ok(next) => {
                self.document = next;
                debug!("event=mutation module=portal status=ok operation={operation}");
                self.persist(operation);
                Ok(())
            }
            Err(err) => {
                log_rejection(operation, &err);
                Err(err)
            }
        }
    }

    fn persist(&mut self, operation: &'static str) {
        match self.repo.save(&self.document) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                error!(
                    "event=document_save module=portal status=error operation={operation} error={err}"
                );
                self.last_save_error = Some(err.to_string());
            }
        }
    }
}

fn log_rejection(operation: &'static str, err: &MutationError) {
    if err.is_silent() {
        debug!("event=mutation module=portal status=rejected operation={operation} reason={err}");
    } else {
        warn!("event=mutation module=portal status=rejected operation={operation} reason={err}");
    }
}
