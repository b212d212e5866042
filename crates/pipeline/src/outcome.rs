//! The tagged result of asking a role for text.

use serde::{Deserialize, Serialize};

use crate::{CredentialName, LlmError, ProviderKind, Role};

/// What came back when a role was asked a prompt.
///
/// Every variant is a normal value. Failures are kept distinguishable from
/// real content here and only flattened to text by [`RoleOutcome::text`] when
/// the pipeline threads them into the next prompt or the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleOutcome {
    /// The bound provider answered.
    Success {
        /// Primary text of the provider response.
        text: String,
    },

    /// The bound provider has no connection because its credential was absent.
    ConfigurationError {
        /// Credential that was missing at construction time.
        credential: CredentialName,
        /// Role that needed it.
        role: Role,
    },

    /// The requested role name is not one the router recognises, or the role
    /// has no binding.
    UnknownRole {
        /// Name as the caller supplied it.
        name: String,
    },

    /// The provider was reached (or attempted) and the call failed.
    ProviderFailure {
        /// Provider that failed.
        provider: ProviderKind,
        /// Role the call was made for.
        role: Role,
        /// The failure as reported by the adapter.
        error: LlmError,
    },
}

impl RoleOutcome {
    /// Creates a [`RoleOutcome::Success`].
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    /// Returns `true` only for [`RoleOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The text this outcome contributes to prompts and the report.
    ///
    /// Successful outcomes yield the provider text verbatim; failures yield a
    /// one-line `Error: ...` description.
    pub fn text(&self) -> String {
        match self {
            Self::Success { text } => text.clone(),
            Self::ConfigurationError { credential, role } => {
                format!("Error: {credential} not configured for {role} role.")
            }
            Self::UnknownRole { .. } => "Error: Unknown Role".to_string(),
            Self::ProviderFailure {
                provider,
                role,
                error,
            } => format!("Error: {provider} request for {role} role failed: {error}"),
        }
    }
}

impl std::fmt::Display for RoleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}
