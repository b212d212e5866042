//! Pipeline roles and the backend providers that can answer them.
//!
//! A [`Role`] is the logical identity of a stage. A [`ProviderKind`] is the
//! external service that answers it. The two are deliberately separate: which
//! provider answers which role is a configuration fact held in
//! [`crate::RoleBindings`], never a property of the role itself.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CredentialName, ModelId};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// One of the three fixed stages of a squad run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Decomposes the request into a technical task list.
    Planner,
    /// Turns the plan into concrete code changes.
    Builder,
    /// Reviews plan and implementation.
    Auditor,
}

impl Role {
    /// All roles in stage order.
    pub const ALL: [Role; 3] = [Role::Planner, Role::Builder, Role::Auditor];

    /// Returns the lowercase role name used in bindings and template lookup.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Planner => "planner",
            Role::Builder => "builder",
            Role::Auditor => "auditor",
        }
    }

    /// Returns the report section heading this role's output is filed under.
    pub fn section_title(self) -> &'static str {
        match self {
            Role::Planner => "Plan",
            Role::Builder => "Build",
            Role::Auditor => "Audit",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`Role::from_str`] for names outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognisedRole(pub String);

impl std::fmt::Display for UnrecognisedRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognised role '{}'", self.0)
    }
}

impl std::error::Error for UnrecognisedRole {}

impl FromStr for Role {
    type Err = UnrecognisedRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planner" => Ok(Role::Planner),
            "builder" => Ok(Role::Builder),
            "auditor" => Ok(Role::Auditor),
            _ => Err(UnrecognisedRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProviderKind
// ---------------------------------------------------------------------------

/// An external text-generation service a role can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Anthropic Messages API.
    Anthropic,
    /// OpenAI Chat Completions API.
    #[serde(rename = "openai")]
    OpenAi,
    /// Google Gemini `generateContent` API.
    Gemini,
}

impl ProviderKind {
    /// All known providers.
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Anthropic,
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
    ];

    /// Returns the lowercase provider name used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// The environment credential whose presence enables this provider.
    pub fn credential_name(self) -> CredentialName {
        let name = match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GOOGLE_API_KEY",
        };
        CredentialName(name.to_string())
    }

    /// The model requested when configuration does not override it.
    pub fn default_model(self) -> ModelId {
        let model = match self {
            ProviderKind::Anthropic => "claude-3-5-sonnet-latest",
            ProviderKind::OpenAi => "gpt-4o",
            ProviderKind::Gemini => "gemini-pro",
        };
        ModelId(model.to_string())
    }

    /// The response-length ceiling sent when configuration does not override it.
    ///
    /// Anthropic requires one on every request; the others accept `None`.
    pub fn default_max_tokens(self) -> Option<u32> {
        match self {
            ProviderKind::Anthropic => Some(4096),
            ProviderKind::OpenAi | ProviderKind::Gemini => None,
        }
    }

    /// The API base URL used when configuration does not override it.
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
