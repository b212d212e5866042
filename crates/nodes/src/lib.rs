//! Squad orchestration: the provider router and the pipeline driver.
//!
//! This crate provides the [`ProviderRouter`] that every role invocation goes
//! through, the fixed stage prompts, the [`SquadRunner`] that drives the
//! Planner → Builder → Auditor sequence, and file-system implementations of
//! the template and report ports.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The driver sequences calls between the domain
//! types in [`pipeline`] and the port traits (providers, templates, report
//! store). Provider HTTP details live in the `llm` crate.

pub mod gateway;
pub mod prompts;
pub mod report_store;
pub mod squad;
pub mod templates;

pub use gateway::ProviderRouter;
pub use report_store::FileReportStore;
pub use squad::{SquadRun, SquadRunner, DEFAULT_REQUEST};
pub use templates::FsPromptTemplates;
