use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Centralized domain validation.
///
/// All input validation lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// A value the user must supply; blank counts as missing.
    pub fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field });
        }
        Ok(())
    }

    /// A consumer name becomes part of a directory name.
    pub fn validate_consumer_name(name: &str) -> Result<(), DomainError> {
        Self::require("name", name)?;
        let invalid = |reason: &str| DomainError::InvalidValue {
            field: "name",
            value: name.to_string(),
            reason: reason.to_string(),
        };
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        Ok(())
    }

    /// Component and package select directories inside the generated area.
    pub fn validate_model_selector(field: &'static str, value: &str) -> Result<(), DomainError> {
        if value.is_empty() {
            return Ok(());
        }
        RelativePath::try_new(value)
            .map(|_| ())
            .map_err(|_| DomainError::InvalidValue {
                field,
                value: value.to_string(),
                reason: "must be a plain relative name".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_missing() {
        assert_eq!(
            DomainValidator::require("component", "  "),
            Err(DomainError::MissingRequiredField { field: "component" })
        );
    }

    #[test]
    fn consumer_name_rules() {
        assert!(DomainValidator::validate_consumer_name("personal").is_ok());
        assert!(DomainValidator::validate_consumer_name("").is_err());
        assert!(DomainValidator::validate_consumer_name(".hidden").is_err());
        assert!(DomainValidator::validate_consumer_name("a/b").is_err());
    }

    #[test]
    fn selectors_must_stay_relative() {
        assert!(DomainValidator::validate_model_selector("package", "").is_ok());
        assert!(DomainValidator::validate_model_selector("package", "kodeverk").is_ok());
        assert!(DomainValidator::validate_model_selector("component", "../etc").is_err());
        assert!(DomainValidator::validate_model_selector("component", "/abs").is_err());
    }
}
