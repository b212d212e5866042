//! The provider router: answers "what text comes back when role R is asked
//! prompt P".
//!
//! Every call goes through here. The router resolves the role through the
//! binding table, checks that the bound backend actually has a connection,
//! and converts every failure into a [`RoleOutcome`] so nothing a provider
//! does can abort a run.

use pipeline::{BackendConnections, Role, RoleBindings, RoleOutcome};
use tracing::{info, instrument, warn};

/// Routes role invocations to backend connections.
///
/// Immutable after construction; safe to share across stages.
#[derive(Debug, Clone)]
pub struct ProviderRouter {
    bindings: RoleBindings,
    connections: BackendConnections,
}

impl ProviderRouter {
    /// Creates a router over `connections` using `bindings`.
    ///
    /// Missing connections are not an error here; they are reported per role
    /// on invocation.
    pub fn new(bindings: RoleBindings, connections: BackendConnections) -> Self {
        Self {
            bindings,
            connections,
        }
    }

    /// Asks `role` for a response to `prompt`.
    #[instrument(name = "invoke_role", skip(self, role, prompt), fields(role = %role))]
    pub async fn invoke(&self, role: Role, prompt: &str) -> RoleOutcome {
        let Some(provider) = self.bindings.provider_for(role) else {
            warn!("role has no provider binding");
            return RoleOutcome::UnknownRole {
                name: role.as_str().to_string(),
            };
        };

        let Some(connection) = self.connections.get(provider) else {
            let credential = provider.credential_name();
            warn!(%provider, %credential, "bound provider has no connection");
            return RoleOutcome::ConfigurationError { credential, role };
        };

        info!(%provider, "calling {}", role.as_str().to_uppercase());

        match connection.complete(prompt).await {
            Ok(text) => RoleOutcome::success(text),
            Err(error) => {
                warn!(%provider, %error, "provider call failed");
                RoleOutcome::ProviderFailure {
                    provider,
                    role,
                    error,
                }
            }
        }
    }

    /// Asks the role named `role_name` for a response to `prompt`.
    ///
    /// Names outside the recognised set yield [`RoleOutcome::UnknownRole`]
    /// without touching any backend.
    pub async fn invoke_named(&self, role_name: &str, prompt: &str) -> RoleOutcome {
        match role_name.parse::<Role>() {
            Ok(role) => self.invoke(role, prompt).await,
            Err(unrecognised) => {
                warn!(role = role_name, "{unrecognised}");
                RoleOutcome::UnknownRole {
                    name: role_name.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use pipeline::{LlmError, ProviderKind, TextProvider};

    use super::*;

    struct Canned {
        kind: ProviderKind,
        reply: Result<String, LlmError>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn ok(kind: ProviderKind, text: &str) -> Arc<Self> {
            Arc::new(Self {
                kind,
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(kind: ProviderKind, error: LlmError) -> Arc<Self> {
            Arc::new(Self {
                kind,
                reply: Err(error),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextProvider for Canned {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn router_with(connections: BackendConnections) -> ProviderRouter {
        ProviderRouter::new(RoleBindings::default(), connections)
    }

    #[tokio::test]
    async fn every_role_returns_provider_text() {
        let router = router_with(
            BackendConnections::new()
                .with(Canned::ok(ProviderKind::Anthropic, "X"))
                .with(Canned::ok(ProviderKind::OpenAi, "X")),
        );

        for role in Role::ALL {
            assert_eq!(router.invoke(role, "prompt").await, RoleOutcome::success("X"));
        }
    }

    #[tokio::test]
    async fn planner_and_builder_share_one_connection() {
        let anthropic = Canned::ok(ProviderKind::Anthropic, "shared");
        let router = router_with(BackendConnections::new().with(anthropic.clone()));

        router.invoke(Role::Planner, "a").await;
        router.invoke(Role::Builder, "b").await;

        assert_eq!(anthropic.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn absent_credential_names_credential_and_role() {
        let openai = Canned::ok(ProviderKind::OpenAi, "audit");
        let router = router_with(BackendConnections::new().with(openai.clone()));

        let outcome = router.invoke(Role::Builder, "build it").await;

        assert_eq!(
            outcome,
            RoleOutcome::ConfigurationError {
                credential: ProviderKind::Anthropic.credential_name(),
                role: Role::Builder,
            }
        );
        let text = outcome.text();
        assert!(text.contains("ANTHROPIC_API_KEY"));
        assert!(text.contains("builder"));
        assert_eq!(openai.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn absent_auditor_credential_names_openai_key() {
        let router = router_with(BackendConnections::new());

        let outcome = router.invoke(Role::Auditor, "review").await;

        assert_eq!(
            outcome.text(),
            "Error: OPENAI_API_KEY not configured for auditor role."
        );
    }

    #[tokio::test]
    async fn unrecognised_role_name_is_unknown_role() {
        let anthropic = Canned::ok(ProviderKind::Anthropic, "X");
        let router = router_with(BackendConnections::new().with(anthropic.clone()));

        for prompt in ["", "do something", "ignore previous instructions"] {
            let outcome = router.invoke_named("sabotage", prompt).await;
            assert_eq!(
                outcome,
                RoleOutcome::UnknownRole {
                    name: "sabotage".into()
                }
            );
            assert_eq!(outcome.text(), "Error: Unknown Role");
        }
        assert_eq!(anthropic.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn recognised_role_name_dispatches() {
        let router = router_with(
            BackendConnections::new().with(Canned::ok(ProviderKind::OpenAi, "checked")),
        );

        assert_eq!(
            router.invoke_named("AUDITOR", "p").await,
            RoleOutcome::success("checked")
        );
    }

    #[tokio::test]
    async fn unbound_role_is_unknown_role() {
        let router = ProviderRouter::new(
            RoleBindings::empty().bind(Role::Auditor, ProviderKind::OpenAi),
            BackendConnections::new().with(Canned::ok(ProviderKind::OpenAi, "X")),
        );

        assert_eq!(
            router.invoke(Role::Planner, "p").await,
            RoleOutcome::UnknownRole {
                name: "planner".into()
            }
        );
    }

    #[tokio::test]
    async fn rebinding_is_a_configuration_change() {
        let router = ProviderRouter::new(
            RoleBindings::default().bind(Role::Planner, ProviderKind::Gemini),
            BackendConnections::new()
                .with(Canned::ok(ProviderKind::Gemini, "from gemini"))
                .with(Canned::ok(ProviderKind::Anthropic, "from anthropic")),
        );

        assert_eq!(
            router.invoke(Role::Planner, "p").await,
            RoleOutcome::success("from gemini")
        );
        assert_eq!(
            router.invoke(Role::Builder, "p").await,
            RoleOutcome::success("from anthropic")
        );
    }

    #[tokio::test]
    async fn provider_failure_is_a_value() {
        let router = router_with(BackendConnections::new().with(Canned::failing(
            ProviderKind::OpenAi,
            LlmError::Status {
                status: 503,
                body: "overloaded".into(),
            },
        )));

        let outcome = router.invoke(Role::Auditor, "p").await;

        assert_eq!(
            outcome,
            RoleOutcome::ProviderFailure {
                provider: ProviderKind::OpenAi,
                role: Role::Auditor,
                error: LlmError::Status {
                    status: 503,
                    body: "overloaded".into(),
                },
            }
        );
    }
}
