//! strided — live classroom walk coordinator daemon.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tokio::sync::broadcast;

use stride_api::ApiState;
use stride_core::config::StrideConfig;
use stride_core::QuestionDeck;
use stride_services::SessionRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config
    if let Err(e) = StrideConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let config = StrideConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        StrideConfig::default()
    });
    tracing::info!(port = config.network.api_port, "strided starting");

    // Question deck — fixed for every session created by this process.
    let deck = match QuestionDeck::load(&config.deck.path) {
        Ok(deck) => {
            tracing::info!(
                path = %config.deck.path.display(),
                questions = deck.len(),
                "question deck loaded"
            );
            deck
        }
        Err(e) => {
            tracing::warn!(error = %e, "deck unavailable, using built-in questions");
            QuestionDeck::builtin()
        }
    };
    let questions = Arc::new(deck.statements().to_vec());

    // Shared state
    let registry = SessionRegistry::new();
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    let state = ApiState {
        registry: registry.clone(),
        questions,
        allow_late_join: config.session.allow_late_join,
        started_at: Instant::now(),
        shutdown_tx,
    };

    let bind_addr = config.network.bind_addr.clone();
    let api_port = config.network.api_port;
    let api_task = tokio::spawn(async move {
        if let Err(e) = stride_api::serve(state, &bind_addr, api_port).await {
            tracing::error!(error = %e, "API server exited");
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, shutting down");
        }
        _ = shutdown_rx.recv() => {
            tracing::info!("shutdown requested, shutting down");
        }
    }

    // Sessions are memory-only and ephemeral — dropping them is the whole
    // shutdown story.
    registry.clear();
    api_task.abort();
    tracing::info!("strided stopped");
    Ok(())
}
