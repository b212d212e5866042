//! Backend connection factory.

use std::sync::Arc;

use pipeline::{BackendConnections, ProviderKind, SquadConfig, TextProvider};
use tracing::{debug, info};

use crate::{AnthropicProvider, GeminiProvider, OpenAiProvider};

/// Creates one connection per provider whose credential is present.
///
/// Absent credentials create nothing, and absence of every credential is not
/// an error here: the router reports it per role when a stage asks.
pub fn connect_backends(config: &SquadConfig) -> BackendConnections {
    let mut connections = BackendConnections::new();

    for kind in ProviderKind::ALL {
        let Some(api_key) = config.credentials.get(kind) else {
            debug!(provider = %kind, credential = %kind.credential_name(), "credential absent; no connection");
            continue;
        };

        let settings = config.provider_settings(kind);
        let connection: Arc<dyn TextProvider> = match kind {
            ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(api_key, settings)),
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(api_key, settings)),
            ProviderKind::Gemini => Arc::new(GeminiProvider::new(api_key, settings)),
        };
        connections = connections.with(connection);
    }

    info!(
        connected = ?connections.kinds().collect::<Vec<_>>(),
        "backend connections established"
    );
    connections
}
