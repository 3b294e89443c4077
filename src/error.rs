use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by simulation, configuration and workload loading.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The workload failed validation; nothing was simulated.
    #[error("invalid workload: {summary}")]
    InvalidWorkload {
        /// First problem found, plus a count of the rest.
        summary: String,
        /// Every problem found.
        errors: Vec<ValidationError>,
    },
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A config or workload file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A config or workload file is not valid JSON for its type.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Results could not be rendered as JSON.
    #[error("failed to write JSON output: {0}")]
    Output(#[source] serde_json::Error),
}

/// A type alias for `Result<T, ScheduleError>`.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

impl ScheduleError {
    /// Wraps a non-empty list of validation problems.
    pub fn invalid_workload(errors: Vec<ValidationError>) -> Self {
        let summary = match errors.as_slice() {
            [] => "no details".to_string(),
            [only] => only.to_string(),
            [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
        };
        Self::InvalidWorkload { summary, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_workload_summary() {
        let errors = vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate process ID: 1"),
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate process ID: 2"),
        ];
        let err = ScheduleError::invalid_workload(errors);
        assert_eq!(
            err.to_string(),
            "invalid workload: Duplicate process ID: 1 (and 1 more)"
        );
    }

    #[test]
    fn test_output_error_is_not_reported_as_input() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ScheduleError::Output(source);
        assert!(err.to_string().starts_with("failed to write JSON output: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_single_error_summary() {
        let err = ScheduleError::invalid_workload(vec![ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            "bad arrival",
        )]);
        assert_eq!(err.to_string(), "invalid workload: bad arrival");
    }
}
