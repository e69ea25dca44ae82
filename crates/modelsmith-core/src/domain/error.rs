// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside reports)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("{field} parameter missing")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Project structure is empty")]
    EmptyStructure,

    // ========================================================================
    // Artifact Errors
    // ========================================================================
    #[error("Malformed model artifact: {reason}")]
    MalformedArtifact { reason: String },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Data for template '{template}' could not be serialized: {reason}")]
    TemplateData { template: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for --{}", field),
                "Example: modelsmith setup --name personal --component administrasjon --package personal".into(),
            ],
            Self::InvalidValue { reason, .. } => vec![
                format!("Details: {}", reason),
                "Use --help for usage information".into(),
            ],
            Self::MalformedArtifact { .. } => vec![
                "The downloaded model is not a well-formed XMI document".into(),
                "Re-download it with --force, or pick another version with --tag".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } | Self::InvalidValue { .. } => {
                ErrorCategory::Validation
            }
            Self::MalformedArtifact { .. } => ErrorCategory::MalformedArtifact,
            Self::TemplateData { .. } => ErrorCategory::Template,
            Self::AbsolutePathNotAllowed { .. } | Self::DuplicatePath { .. } | Self::EmptyStructure => {
                ErrorCategory::Internal
            }
        }
    }
}
