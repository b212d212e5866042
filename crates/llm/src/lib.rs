//! Squad LLM provider infrastructure adapters.
//!
//! Implements the [`pipeline::TextProvider`] trait for Anthropic, OpenAI and
//! Google Gemini, and creates the [`pipeline::BackendConnections`] for a run
//! from the credentials in a [`pipeline::SquadConfig`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, request formatting and response
//! parsing live here. The [`pipeline`] crate sees only
//! [`pipeline::TextProvider`]. Adding a provider means a new adapter module
//! and a [`pipeline::ProviderKind`] variant; no other crate changes.
//!
//! ## Failure behaviour
//!
//! Every adapter makes exactly one request per call. Transport failures,
//! non-success statuses, unparseable bodies and text-less answers are all
//! returned as [`pipeline::LlmError`]; nothing is retried.

mod anthropic;
mod connect;
mod gemini;
mod http;
mod openai;

pub use anthropic::AnthropicProvider;
pub use connect::connect_backends;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
