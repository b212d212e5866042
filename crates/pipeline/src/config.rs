//! Run configuration: credentials, role bindings, and provider settings.
//!
//! A [`SquadConfig`] is built once by the composition root and injected into
//! everything that needs it. Nothing below the composition root reads the
//! process environment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ArtifactPath, ModelId, ProviderKind, Role};

/// Default location of the run report.
pub const DEFAULT_REPORT_PATH: &str = "artifacts/last_run_report.md";

/// Default directory searched for `<role>.md` prompt templates.
pub const DEFAULT_TEMPLATE_DIR: &str = "prompts";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// API keys for the providers that have one.
///
/// A provider is either present with a non-empty key or absent. There is no
/// placeholder value: absence is what the router observes.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: BTreeMap<ProviderKind, String>,
}

impl Credentials {
    /// Builds credentials by looking up each provider's credential name.
    ///
    /// Empty or whitespace-only values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut credentials = Self::default();
        for kind in ProviderKind::ALL {
            if let Some(key) = lookup(kind.credential_name().as_str()) {
                credentials = credentials.with(kind, key);
            }
        }
        credentials
    }

    /// Returns a copy with `key` set for `kind`. Blank keys are ignored.
    #[must_use]
    pub fn with(mut self, kind: ProviderKind, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.trim().is_empty() {
            self.keys.insert(kind, key);
        }
        self
    }

    /// Returns the key for `kind`, if present.
    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        self.keys.get(&kind).map(String::as_str)
    }

    /// Providers that have a key, in declaration order.
    pub fn present(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.keys.keys().copied()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("present", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Role bindings
// ---------------------------------------------------------------------------

/// Which provider answers which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleBindings(BTreeMap<Role, ProviderKind>);

impl RoleBindings {
    /// A table with no roles bound.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns a copy with `role` bound to `provider`.
    #[must_use]
    pub fn bind(mut self, role: Role, provider: ProviderKind) -> Self {
        self.0.insert(role, provider);
        self
    }

    /// Returns the provider bound to `role`.
    pub fn provider_for(&self, role: Role) -> Option<ProviderKind> {
        self.0.get(&role).copied()
    }
}

impl Default for RoleBindings {
    /// Planner and builder share Anthropic; the auditor uses OpenAI.
    fn default() -> Self {
        Self::empty()
            .bind(Role::Planner, ProviderKind::Anthropic)
            .bind(Role::Builder, ProviderKind::Anthropic)
            .bind(Role::Auditor, ProviderKind::OpenAi)
    }
}

// ---------------------------------------------------------------------------
// Provider settings
// ---------------------------------------------------------------------------

/// The fixed invocation parameters for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Model requested on every call.
    pub model: ModelId,
    /// Response-length ceiling, where the provider takes one.
    pub max_tokens: Option<u32>,
    /// API base URL without a trailing path segment for the endpoint.
    pub base_url: String,
}

impl ProviderSettings {
    /// Built-in settings for `kind`.
    pub fn defaults_for(kind: ProviderKind) -> Self {
        Self {
            model: kind.default_model(),
            max_tokens: kind.default_max_tokens(),
            base_url: kind.default_base_url().to_string(),
        }
    }
}

/// Partial [`ProviderSettings`] as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderOverrides {
    /// Replacement model.
    pub model: Option<ModelId>,
    /// Replacement response-length ceiling.
    pub max_tokens: Option<u32>,
    /// Replacement base URL.
    pub base_url: Option<String>,
}

// ---------------------------------------------------------------------------
// SquadConfig
// ---------------------------------------------------------------------------

/// Everything a run needs to know before it starts.
#[derive(Debug, Clone)]
pub struct SquadConfig {
    /// Provider API keys.
    pub credentials: Credentials,
    /// Role → provider table.
    pub bindings: RoleBindings,
    /// Per-provider settings; providers not listed use their defaults.
    pub providers: BTreeMap<ProviderKind, ProviderSettings>,
    /// Directory holding `<role>.md` prompt templates.
    pub template_dir: ArtifactPath,
    /// Where the run report is written.
    pub report_path: ArtifactPath,
}

impl SquadConfig {
    /// Default configuration with the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            bindings: RoleBindings::default(),
            providers: BTreeMap::new(),
            template_dir: ArtifactPath(DEFAULT_TEMPLATE_DIR.to_string()),
            report_path: ArtifactPath(DEFAULT_REPORT_PATH.to_string()),
        }
    }

    /// Effective settings for `kind`.
    pub fn provider_settings(&self, kind: ProviderKind) -> ProviderSettings {
        self.providers
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ProviderSettings::defaults_for(kind))
    }

    /// Applies file-level overrides on top of the current values.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.report_path {
            self.report_path = path;
        }
        if let Some(dir) = overrides.template_dir {
            self.template_dir = dir;
        }
        for (role, provider) in overrides.bindings {
            self.bindings.0.insert(role, provider);
        }
        for (kind, patch) in overrides.providers {
            let mut settings = self.provider_settings(kind);
            if let Some(model) = patch.model {
                settings.model = model;
            }
            if patch.max_tokens.is_some() {
                settings.max_tokens = patch.max_tokens;
            }
            if let Some(base_url) = patch.base_url {
                settings.base_url = base_url;
            }
            self.providers.insert(kind, settings);
        }
    }
}

/// The optional config file (`.squad/config.toml`).
///
/// Credentials are intentionally absent: they only come from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Replacement report path.
    pub report_path: Option<ArtifactPath>,
    /// Replacement template directory.
    pub template_dir: Option<ArtifactPath>,
    /// Role rebindings; unlisted roles keep their binding.
    pub bindings: BTreeMap<Role, ProviderKind>,
    /// Per-provider setting patches.
    pub providers: BTreeMap<ProviderKind, ProviderOverrides>,
}
