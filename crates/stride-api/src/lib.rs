//! stride-api — HTTP + WebSocket gateway for the session engine.
//!
//! The gateway is deliberately thin: it translates wire events into engine
//! calls and snapshot broadcasts into socket writes. All session semantics
//! live in stride-services.

pub mod handlers;
pub mod ws;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use handlers::ApiState;

/// Build the full application router. Public so integration tests can bind
/// an ephemeral port themselves.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/sessions",
            get(handlers::handle_session_list).post(handlers::handle_session_create),
        )
        .route(
            "/sessions/{id}",
            get(handlers::handle_session_inspect).delete(handlers::handle_session_delete),
        )
        .route("/sessions/{id}/start", post(handlers::handle_session_start))
        .route("/sessions/{id}/reset", post(handlers::handle_session_reset))
        .route("/sessions/{id}/join", post(handlers::handle_join))
        .route("/sessions/{id}/answers", post(handlers::handle_answer_submit))
        .route(
            "/sessions/{id}/participants/{participant_id}",
            delete(handlers::handle_participant_remove),
        )
        .route("/sessions/{id}/ws", get(ws::handle_session_ws))
        .route("/status", get(handlers::handle_status))
        .route("/daemon/shutdown", post(handlers::handle_shutdown))
        .with_state(state);

    Router::new().nest("/api", api_routes).layer(cors)
}

pub async fn serve(state: ApiState, bind_addr: &str, port: u16) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind_addr, port)).await?;
    tracing::info!(%bind_addr, port, "API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
