//! Core domain for the squad: a fixed Planner → Builder → Auditor pipeline
//! answered by external language-model providers.
//!
//! This crate holds every domain concept and the port traits infrastructure
//! crates implement. It defines *what* is needed; `llm` and `nodes` define
//! *how* to supply it.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RunId`, `ArtifactPath`, `ModelId`, ...) |
//! | [`roles`] | `Role` and `ProviderKind` |
//! | [`outcome`] | `RoleOutcome`, the tagged result of a role invocation |
//! | [`report`] | `RunReport` and its Markdown rendering |
//! | [`config`] | `SquadConfig`, credentials, bindings, provider settings |
//! | [`ports`] | `TextProvider`, `BackendConnections`, `PromptTemplates`, `ReportStore` |
//! | [`types`] | Shared value types (`Timestamp`) |
//! | [`errors`] | `SquadError` and `LlmError` |

pub mod config;
pub mod errors;
pub mod identifiers;
pub mod outcome;
pub mod ports;
pub mod report;
pub mod roles;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{
    ConfigOverrides, Credentials, ProviderOverrides, ProviderSettings, RoleBindings, SquadConfig,
    DEFAULT_REPORT_PATH, DEFAULT_TEMPLATE_DIR,
};
pub use errors::{LlmError, SquadError};
pub use identifiers::{ArtifactPath, CredentialName, ModelId, RunId};
pub use outcome::RoleOutcome;
pub use ports::{BackendConnections, NoTemplates, PromptTemplates, ReportStore, TextProvider};
pub use report::RunReport;
pub use roles::{ProviderKind, Role, UnrecognisedRole};
pub use types::Timestamp;
