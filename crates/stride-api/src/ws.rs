//! WebSocket gateway — per-connection snapshot delivery.
//!
//! A subscriber gets a full snapshot immediately on connect, then every
//! snapshot the session publishes, in publish order. Delivery is
//! fire-and-forget per connection: a subscriber that falls behind the
//! broadcast buffer is re-synced from a fresh full snapshot instead of
//! stalling the session or other subscribers.
//!
//! Connections that present a `participant_id` are participant connections;
//! attach/detach toggles that participant's liveness flag. Connections
//! without one are viewer connections (the instructor dashboard).

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use stride_core::types::Snapshot;
use stride_services::SessionHandle;

use crate::handlers::{error_response, ApiState};

#[derive(Deserialize)]
pub struct WsQuery {
    /// Reconnect token from the join response. Identity persists across
    /// reconnects within the same session.
    pub participant_id: Option<String>,
}

pub async fn handle_session_ws(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, (StatusCode, String)> {
    let handle = state.registry.get(&session_id).map_err(error_response)?;
    Ok(ws.on_upgrade(move |socket| subscriber_loop(socket, handle, query.participant_id)))
}

async fn subscriber_loop(
    mut socket: WebSocket,
    handle: Arc<SessionHandle>,
    participant_id: Option<String>,
) {
    // Subscribe before the initial snapshot so nothing published in between
    // is lost — a duplicate snapshot is fine, a missing one is not.
    let mut rx = handle.subscribe();

    if let Some(pid) = &participant_id {
        if handle.set_connected(pid, true).await.is_err() {
            tracing::warn!(participant_id = %pid, "ws attach for unknown participant");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    }

    let snap = handle.snapshot().await;
    if send_snapshot(&mut socket, &snap).await.is_err() {
        detach(&handle, participant_id.as_deref()).await;
        return;
    }

    loop {
        tokio::select! {
            published = rx.recv() => match published {
                Ok(snap) => {
                    if send_snapshot(&mut socket, &snap).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // Too slow for the buffer — resume from a full snapshot.
                    tracing::warn!(missed, "ws subscriber lagged, re-syncing");
                    let snap = handle.snapshot().await;
                    if send_snapshot(&mut socket, &snap).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                // Mutations travel over HTTP; inbound frames only matter
                // for liveness.
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
        }
    }

    detach(&handle, participant_id.as_deref()).await;
}

async fn send_snapshot(socket: &mut WebSocket, snap: &Snapshot) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(snap) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "snapshot serialization failed");
            return Ok(());
        }
    };
    socket.send(Message::Text(text.into())).await
}

async fn detach(handle: &SessionHandle, participant_id: Option<&str>) {
    if let Some(pid) = participant_id {
        // The session may have been reset or the participant removed while
        // connected — stale detach is not an error.
        let _ = handle.set_connected(pid, false).await;
    }
}
