//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! in the model itself. Model and input errors are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The artifact source could not deliver what was asked for.
    #[error("Failed to retrieve {what} from {repository}: {reason}")]
    RetrievalFailed {
        what: String,
        repository: String,
        reason: String,
    },

    /// A named template does not exist, failed to parse, or failed to render.
    #[error("Template '{template}' failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Version-control initialisation of the generated project failed.
    #[error("Repository operation '{operation}' failed at {path}: {reason}")]
    RepositoryFailed {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// A source directory expected by a copy step is missing.
    #[error("Generated model directory not found: {path}")]
    ModelDirectoryMissing { path: PathBuf },

    /// Port/Adapter lock poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RetrievalFailed { repository, .. } => vec![
                format!("Could not reach {}", repository),
                "Check your network connection and the --owner/--repo settings".into(),
                "Try: modelsmith listTags to see available versions".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "A built-in template is broken; this is a bug in modelsmith".into(),
                "The partially scaffolded project has been left on disk for inspection".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::RepositoryFailed { .. } => vec![
                "Ensure git is installed and in your PATH".into(),
                "The generated files are in place; you can commit them manually".into(),
            ],
            Self::ModelDirectoryMissing { .. } => vec![
                "Check the --component and --package values".into(),
                "Try: modelsmith listPackages to see what the model contains".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RetrievalFailed { .. } => ErrorCategory::Retrieval,
            Self::RenderingFailed { .. } => ErrorCategory::Template,
            Self::FilesystemError { .. } | Self::RepositoryFailed { .. } => ErrorCategory::Io,
            Self::ModelDirectoryMissing { .. } => ErrorCategory::Validation,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
