//! Error types for resource decoding and validation.
//!
//! Structural failures keep the decoder's own error untouched; validation
//! failures have their own variant so callers can tell the two apart.

use thiserror::Error;

/// A decoded resource broke one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid kind: {kind:?} for a {resource} type")]
    InvalidKind { kind: String, resource: &'static str },

    #[error("spec cannot be empty")]
    EmptySpec,
}

/// Failure to turn a document into a resource.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The JSON document does not have the expected shape
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The YAML document does not have the expected shape
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl DecodeError {
    /// The validation failure, if decoding got past the structural step
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            DecodeError::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// True when the input was structurally malformed
    pub fn is_malformed(&self) -> bool {
        matches!(self, DecodeError::Json(_) | DecodeError::Yaml(_))
    }
}

/// A string did not name any known resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kind: {0:?}")]
pub struct UnknownKind(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_kind_message() {
        let err = ValidationError::InvalidKind {
            kind: "GlobalDatasource".to_string(),
            resource: "Datasource",
        };
        assert_eq!(
            err.to_string(),
            r#"invalid kind: "GlobalDatasource" for a Datasource type"#
        );
    }

    #[test]
    fn test_invalid_kind_message_escapes_value() {
        let err = ValidationError::InvalidKind {
            kind: "a\"b".to_string(),
            resource: "GlobalDatasource",
        };
        assert_eq!(
            err.to_string(),
            r#"invalid kind: "a\"b" for a GlobalDatasource type"#
        );
    }

    #[test]
    fn test_empty_spec_message() {
        assert_eq!(ValidationError::EmptySpec.to_string(), "spec cannot be empty");
    }

    #[test]
    fn test_decode_error_classification() {
        let malformed: DecodeError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(malformed.is_malformed());
        assert!(malformed.validation().is_none());

        let invalid: DecodeError = ValidationError::EmptySpec.into();
        assert!(!invalid.is_malformed());
        assert_eq!(invalid.validation(), Some(&ValidationError::EmptySpec));
        assert_eq!(invalid.to_string(), "spec cannot be empty");
    }
}
