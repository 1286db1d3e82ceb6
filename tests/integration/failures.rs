//! Error surface of the HTTP API: not-found, invalid-state, duplicates.

use anyhow::Result;

use crate::*;
use serde_json::json;

#[tokio::test]
async fn unknown_session_is_404_everywhere() -> Result<()> {
    let srv = spawn_server().await?;

    let (status, _) = http_get(&srv.api("/sessions/deadbeef")).await?;
    assert_eq!(status, 404);

    let (status, _) = http_post(
        &srv.api("/sessions/deadbeef/join"),
        &json!({ "nickname": "ghost" }),
    )
    .await?;
    assert_eq!(status, 404);

    let (status, _) = http_post_empty(&srv.api("/sessions/deadbeef/start")).await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn unknown_participant_is_404() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    join(&srv, &session_id, "real").await?;
    start(&srv, &session_id).await?;

    let (status, _) = http_post(
        &srv.api(&format!("/sessions/{session_id}/answers")),
        &json!({ "participant_id": "deadbeefdeadbeef", "question": 0, "value": "agree" }),
    )
    .await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn illegal_transitions_are_409() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;

    // Start with an empty roster.
    let (status, _) = http_post_empty(&srv.api(&format!("/sessions/{session_id}/start"))).await?;
    assert_eq!(status, 409);

    // Reset before start.
    let (status, _) = http_post_empty(&srv.api(&format!("/sessions/{session_id}/reset"))).await?;
    assert_eq!(status, 409);

    let p1 = join(&srv, &session_id, "p1").await?;
    start(&srv, &session_id).await?;

    // Double start.
    let (status, _) = http_post_empty(&srv.api(&format!("/sessions/{session_id}/start"))).await?;
    assert_eq!(status, 409);

    // Answer for a question that is not open.
    let (status, _) = http_post(
        &srv.api(&format!("/sessions/{session_id}/answers")),
        &json!({ "participant_id": p1, "question": 2, "value": "agree" }),
    )
    .await?;
    assert_eq!(status, 409);
    Ok(())
}

#[tokio::test]
async fn duplicate_answer_is_success_not_error() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    let p1 = join(&srv, &session_id, "p1").await?;
    join(&srv, &session_id, "p2").await?;
    start(&srv, &session_id).await?;

    let first = submit(&srv, &session_id, &p1, 0, "agree").await?;
    assert_eq!(first["recorded"], true);
    assert_eq!(first["duplicate"], false);

    // Retry — even with the opposite value — is a silent no-op.
    let retry = submit(&srv, &session_id, &p1, 0, "disagree").await?;
    assert_eq!(retry["recorded"], false);
    assert_eq!(retry["duplicate"], true);

    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["answered_current"], 1);
    assert_eq!(snap["participants"][0]["position"], 1);
    Ok(())
}

#[tokio::test]
async fn late_join_policy_gates_completed_sessions() -> Result<()> {
    // Policy off: completed sessions reject joins.
    let srv = spawn_server_with(false).await?;
    let session_id = create_session(&srv, "Walk").await?;
    let p1 = join(&srv, &session_id, "p1").await?;
    start(&srv, &session_id).await?;
    for q in 0..3 {
        submit(&srv, &session_id, &p1, q, "agree").await?;
    }

    let (status, _) = http_post(
        &srv.api(&format!("/sessions/{session_id}/join")),
        &json!({ "nickname": "too-late" }),
    )
    .await?;
    assert_eq!(status, 409);

    // Default policy: accepted into the roster for a potential reset.
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    let p1 = join(&srv, &session_id, "p1").await?;
    start(&srv, &session_id).await?;
    for q in 0..3 {
        submit(&srv, &session_id, &p1, q, "agree").await?;
    }
    join(&srv, &session_id, "just-in-time").await?;
    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["participants"].as_array().unwrap().len(), 2);
    Ok(())
}
