//! Unified error handling for modelsmith core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with a display category and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for modelsmith core operations.
#[derive(Debug, Error, Clone)]
pub enum SmithError {
    /// Errors from the domain layer (input validation, malformed models).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (ports and orchestration).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SmithError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check `modelsmith config list` and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in modelsmith".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` for a missing/invalid required input.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }
}

/// Error categories for UI display and exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid user input.
    Validation,
    /// The remote artifact could not be retrieved.
    Retrieval,
    /// The artifact could not be parsed.
    MalformedArtifact,
    /// A template could not be parsed or rendered (a defect, not bad input).
    Template,
    /// A filesystem or external command failure.
    Io,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SmithResult<T> = Result<T, SmithError>;
