//! Command-execution backend boundary.
//!
//! The crate never opens device sessions itself; a caller supplies a
//! [`CommandRunner`] (a CLI-session backend, a structured-API client, a
//! test double). The core's only obligations at this boundary are to keep
//! authentication and timeout failures distinct, and to never trust raw
//! output without hidden-error classification.

pub mod offline;

use async_trait::async_trait;
use thiserror::Error;

use crate::device::DeviceContext;
use crate::error::ClassifiedError;

/// Failure kinds a backend may report. Authentication and timeout are
/// deliberately separate variants; conflating them loses the distinction
/// the error taxonomy requires.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// The device rejected the session credentials.
    #[error("authentication rejected: {0}")]
    AuthenticationFailed(String),

    /// The backend gave up waiting on the device.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Anything the backend could not classify further.
    #[error("{0}")]
    Unknown(String),
}

impl TransportError {
    /// Map a backend failure to its registry code.
    pub fn classify(&self) -> ClassifiedError {
        let (code, detail) = match self {
            TransportError::AuthenticationFailed(detail) => ("E1017", detail),
            TransportError::Timeout(detail) => ("E1018", detail),
            TransportError::Unknown(detail) => ("E1016", detail),
        };
        ClassifiedError::new(code, &[("error", detail)])
    }
}

/// Result of pushing configuration to a device.
#[derive(Debug, Clone)]
pub struct PushResult {
    /// Whether the device reported that anything changed.
    pub changed: bool,

    /// Device-reported diff of the applied change, when available.
    pub diff: Option<String>,

    /// The backend's result text for the push.
    pub result: String,
}

/// Command-execution backend collaborator.
///
/// Implementations own session lifecycle, retries, and timeouts; the core
/// imposes no timeout policy of its own and never retries.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute a single command (or, for structured-API backends, fetch a
    /// single endpoint) and return the raw output.
    async fn run_command(
        &self,
        device: &DeviceContext,
        command: &str,
    ) -> Result<String, TransportError>;

    /// Push configuration text with merge (`replace == false`) or
    /// full-replace (`replace == true`) semantics.
    async fn apply_config(
        &self,
        device: &DeviceContext,
        config: &str,
        replace: bool,
    ) -> Result<PushResult, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keeps_kinds_distinct() {
        let auth = TransportError::AuthenticationFailed("bad password".to_string());
        let timeout = TransportError::Timeout("no prompt after 30s".to_string());
        let unknown = TransportError::Unknown("channel collapsed".to_string());

        assert_eq!(auth.classify().code, "E1017");
        assert_eq!(timeout.classify().code, "E1018");
        assert_eq!(unknown.classify().code, "E1016");
    }

    #[test]
    fn test_classify_carries_backend_detail() {
        let err = TransportError::Unknown("channel collapsed".to_string());
        assert!(err.classify().message.contains("channel collapsed"));
    }
}
