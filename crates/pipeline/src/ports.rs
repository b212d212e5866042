//! Port traits implemented by infrastructure crates.
//!
//! The domain states *what* it needs (text from a provider, a template by
//! name, somewhere to put the report) and the `llm` and `nodes` crates supply
//! *how*.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{ArtifactPath, LlmError, ProviderKind, Role, RunReport, SquadError};

/// A backend connection: send a prompt, receive text.
///
/// Implementations carry their own fixed invocation (model, length ceiling)
/// and are read-only after construction, so one instance may serve every
/// stage of a run.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Which provider this connection talks to.
    fn kind(&self) -> ProviderKind;

    /// Sends `prompt` as a single user message and returns the primary text
    /// of the response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// The backend connections that exist for one run, keyed by provider.
///
/// A provider whose credential was absent simply has no entry.
#[derive(Clone, Default)]
pub struct BackendConnections {
    by_kind: BTreeMap<ProviderKind, Arc<dyn TextProvider>>,
}

impl BackendConnections {
    /// An empty set: every role will report a configuration error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `connection`, keyed by its own [`TextProvider::kind`]. A second
    /// connection of the same kind replaces the first.
    #[must_use]
    pub fn with(mut self, connection: Arc<dyn TextProvider>) -> Self {
        self.by_kind.insert(connection.kind(), connection);
        self
    }

    /// Returns the connection for `kind`, if one was created.
    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn TextProvider>> {
        self.by_kind.get(&kind)
    }

    /// Providers with a live connection.
    pub fn kinds(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.by_kind.keys().copied()
    }

    /// Returns `true` if no connection exists.
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

impl std::fmt::Debug for BackendConnections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConnections")
            .field("kinds", &self.by_kind.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Source of optional per-role prompt templates.
#[async_trait]
pub trait PromptTemplates: Send + Sync {
    /// Returns the template for `role`, or empty text if none exists.
    ///
    /// # Errors
    ///
    /// [`SquadError::TemplateUnreadable`] if a template exists but cannot be
    /// read.
    async fn load(&self, role: Role) -> Result<String, SquadError>;
}

/// Destination of the run report.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists `report`, replacing any previous report, and returns where
    /// it was written.
    ///
    /// # Errors
    ///
    /// [`SquadError::ArtifactWrite`] if the report could not be persisted.
    async fn save(&self, report: &RunReport) -> Result<ArtifactPath, SquadError>;
}

/// A [`PromptTemplates`] with no templates at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

#[async_trait]
impl PromptTemplates for NoTemplates {
    async fn load(&self, _role: Role) -> Result<String, SquadError> {
        Ok(String::new())
    }
}
