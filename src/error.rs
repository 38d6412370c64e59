//! Error types for netconform.

use std::fmt;

use thiserror::Error;

use crate::codes;

/// Classified error carried by every fallible operation in the crate.
///
/// The message is pre-rendered as `"{code}: {interpolated message}"` from
/// the error-code registry, so callers and log-matchers see one stable
/// format regardless of where the failure originated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClassifiedError {
    /// Stable registry code, e.g. `"E1007"`.
    pub code: &'static str,

    /// Fully interpolated `"{code}: {message}"` text.
    pub message: String,
}

impl ClassifiedError {
    /// Build a classified error from a registry code and interpolation args.
    pub fn new(code: &'static str, args: &[(&str, &str)]) -> Self {
        Self {
            code,
            message: codes::format_error(code, args),
        }
    }

    /// Log the error with device/object context, then hand it back.
    ///
    /// Errors are always logged with their context before being returned,
    /// so orchestration layers that aggregate results still leave a trail.
    pub fn log(self, object: &impl fmt::Display) -> Self {
        log::error!("{object} | {}", self.message);
        self
    }
}

/// Driver resolution failure, listing every lookup path attempted.
///
/// The path list is a first-class part of the contract: a caller debugging
/// a missing registration needs to see exactly what was tried, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionError {
    /// Registry keys tried, in lookup order.
    pub checked_paths: Vec<String>,
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths = format!("{:?}", self.checked_paths);
        f.write_str(&codes::format_error("E1001", &[("checked_paths", &paths)]))
    }
}

impl std::error::Error for ResolutionError {}

impl From<ResolutionError> for ClassifiedError {
    fn from(err: ResolutionError) -> Self {
        ClassifiedError::new(
            "E1001",
            &[("checked_paths", &format!("{:?}", err.checked_paths))],
        )
    }
}

/// Result type alias using the classified error contract.
pub type Result<T> = std::result::Result<T, ClassifiedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_error_display() {
        let err = ClassifiedError::new("E1005", &[]);
        assert_eq!(
            err.to_string(),
            "E1005: There was no username defined, preemptively failed."
        );
        assert_eq!(err.code, "E1005");
    }

    #[test]
    fn test_resolution_error_lists_paths() {
        let err = ResolutionError {
            checked_paths: vec!["cisco_ios.cli".to_string(), "default.cli".to_string()],
        };
        let classified: ClassifiedError = err.clone().into();
        assert_eq!(classified.code, "E1001");
        assert!(err.to_string().contains("cisco_ios.cli"));
        assert!(classified.message.contains("default.cli"));
    }
}
