//! Error taxonomy for the fetch → normalize → classify → score pipeline.
//!
//! Every variant of [`PipelineError`] is terminal for the current request only,
//! except [`PipelineError::Authentication`], which halts the session.
//! [`StartupError`] covers conditions detected before the session opens.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::SurveyField;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Absent column or blank cell.
    Missing,
    /// Present but not coercible to the required type.
    Invalid,
}

/// One offending field in a survey record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldIssue {
    pub field: SurveyField,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn missing(field: SurveyField) -> Self {
        Self {
            field,
            kind: IssueKind::Missing,
        }
    }

    pub fn invalid(field: SurveyField) -> Self {
        Self {
            field,
            kind: IssueKind::Invalid,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Missing => write!(f, "{} is missing", self.field),
            IssueKind::Invalid => write!(f, "{} is invalid", self.field),
        }
    }
}

/// Failure of one "view results" request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// Credential load or parse failure.
    #[error("Error authenticating with Google Sheets: {message}")]
    Authentication { message: String },

    /// Network, remote auth, or malformed-sheet failure while fetching.
    #[error("Error accessing Google Sheets: {message}")]
    Service { message: String },

    /// No worksheet row carries the requested identifier.
    #[error("No record found for ID {user_id}")]
    NotFound { user_id: String },

    /// The record is incomplete; carries every offending field.
    #[error("The following data is missing or invalid: {}", join_issues(.issues))]
    Validation { issues: Vec<FieldIssue> },

    /// Feature assembly or model invocation failed.
    #[error("An error occurred: {message}")]
    Prediction { message: String },
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.field.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl PipelineError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    pub fn not_found(user_id: impl Into<String>) -> Self {
        Self::NotFound {
            user_id: user_id.into(),
        }
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        Self::Prediction {
            message: message.into(),
        }
    }

    /// Only credential failures end the session; everything else lets the
    /// user retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Offending fields for a validation failure, empty otherwise.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::Validation { issues } => issues,
            _ => &[],
        }
    }
}

/// Conditions that prevent the session from opening at all.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Model file '{path}' not found.")]
    ModelNotFound { path: PathBuf },

    #[error("Invalid model artifact '{path}': {message}")]
    ModelInvalid { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Credentials(#[from] PipelineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_authentication_is_fatal() {
        assert!(PipelineError::authentication("bad key").is_fatal());
        assert!(!PipelineError::service("timeout").is_fatal());
        assert!(!PipelineError::not_found("42").is_fatal());
        assert!(!PipelineError::prediction("boom").is_fatal());
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let err = PipelineError::Validation {
            issues: vec![
                FieldIssue::missing(SurveyField::Age),
                FieldIssue::invalid(SurveyField::Impulsiveness),
            ],
        };
        assert_eq!(
            err.to_string(),
            "The following data is missing or invalid: Age, Impulsiveness"
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            PipelineError::not_found("12345").to_string(),
            "No record found for ID 12345"
        );
    }
}
