//! Portal runtime configuration.
//!
//! # Responsibility
//! - Describe where the document is stored and how logging is set up.
//! - Validate configuration before any storage is opened.
//!
//! # Invariants
//! - File storage paths must be absolute.
//! - The storage namespace is never blank.

use crate::logging::{default_log_level, normalize_level};
use crate::repo::document_repo::DEFAULT_NAMESPACE;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Backing medium for the key-value storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// Private in-memory SQLite database; nothing survives the process.
    Memory,
    /// SQLite database file at an absolute path.
    File(PathBuf),
}

/// Configuration consumed by [`crate::portal::Portal::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub storage: StorageLocation,
    /// Key the document is stored under.
    pub namespace: String,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            storage: StorageLocation::Memory,
            namespace: DEFAULT_NAMESPACE.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl PortalConfig {
    /// Default configuration persisting to the SQLite file at `path`.
    pub fn with_storage_file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Checks configuration invariants.
    ///
    /// # Errors
    /// - Blank namespace, relative storage or log paths, unknown log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if let StorageLocation::File(path) = &self.storage {
            if !path.is_absolute() {
                return Err(ConfigError::RelativeStoragePath(path.clone()));
            }
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        normalize_level(self.log_level.as_str()).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyNamespace,
    RelativeStoragePath(PathBuf),
    RelativeLogDir(PathBuf),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNamespace => write!(f, "storage namespace must not be empty"),
            Self::RelativeStoragePath(path) => write!(
                f,
                "storage path must be absolute, got `{}`",
                path.display()
            ),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}
