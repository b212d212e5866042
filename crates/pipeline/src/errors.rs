//! Error types for the squad domain.
//!
//! [`SquadError`] covers the few conditions that stop a run from producing
//! its artefact. Stage failures are *not* errors at this level: they are
//! [`crate::RoleOutcome`] values threaded through the pipeline.
//!
//! [`LlmError`] is what a [`crate::TextProvider`] returns when a call fails.
//! The router turns it into [`crate::RoleOutcome::ProviderFailure`] so it
//! never escapes a stage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ArtifactPath;

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that prevent a squad run from completing.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum SquadError {
    /// The configuration (file or overrides) is invalid.
    ///
    /// Produced at load time; a run never starts with an invalid config.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// A prompt template exists but could not be read.
    ///
    /// A *missing* template is not an error; it yields empty text.
    #[error("Prompt template '{name}' could not be read: {message}")]
    TemplateUnreadable {
        /// Template name (the role name).
        name: String,
        /// Underlying I/O failure.
        message: String,
    },

    /// The run report could not be persisted.
    #[error("Failed to write run report to {path}: {message}")]
    ArtifactWrite {
        /// Destination that could not be written.
        path: ArtifactPath,
        /// Underlying I/O failure.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Provider call errors
// ---------------------------------------------------------------------------

/// Failure of a single outbound provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LlmError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the provider.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The response decoded but carried no text.
    #[error("response contained no text")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_write_names_the_path() {
        let err = SquadError::ArtifactWrite {
            path: ArtifactPath::new("artifacts/last_run_report.md").unwrap(),
            message: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write run report to artifacts/last_run_report.md: permission denied"
        );
    }

    #[test]
    fn status_error_display() {
        let err = LlmError::Status {
            status: 401,
            body: "invalid x-api-key".into(),
        };
        assert_eq!(err.to_string(), "HTTP 401: invalid x-api-key");
    }
}
