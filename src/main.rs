// ABOUTME: firegpt server binary - wires config, store, tools, and client
// ABOUTME: together and serves the HTTP API.

use std::sync::Arc;

use firegpt::config::Config;
use firegpt::llm::{LlmClient, OpenRouterClient};
use firegpt::server::{AppState, router};
use firegpt::store::{InMemoryTermStore, TermStore};
use firegpt::tool::Registry;
use firegpt::tools::TermLookupTool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Arc::new(Config::from_env());

    let store: Arc<dyn TermStore> = match &config.terms_path {
        Some(path) => {
            let store = InMemoryTermStore::from_json_file(path)?;
            tracing::info!(terms = store.len(), path = %path.display(), "loaded terminology store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("FIREGPT_TERMS_PATH not set, starting with an empty terminology store");
            Arc::new(InMemoryTermStore::default())
        }
    };

    let registry = Registry::new();
    registry.register(TermLookupTool::new(store)).await;

    let client: Option<Arc<dyn LlmClient>> = match std::env::var("OPENROUTER_API_KEY") {
        Ok(key) => {
            let client = OpenRouterClient::with_headers(
                key,
                config.referer.as_deref(),
                config.title.as_deref(),
            )
            .with_default_model(&config.model);
            Some(Arc::new(client))
        }
        Err(_) => {
            tracing::warn!("OPENROUTER_API_KEY not set, query requests will be rejected");
            None
        }
    };

    let state = AppState {
        client,
        registry,
        config: config.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, model = %config.model, "firegpt listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
