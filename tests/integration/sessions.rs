//! Session lifecycle over the HTTP API: create, list, inspect, delete.

use anyhow::Result;

use crate::*;

#[tokio::test]
async fn create_inspect_delete_roundtrip() -> Result<()> {
    let srv = spawn_server().await?;

    let session_id = create_session(&srv, "Morning Class").await?;
    assert_eq!(session_id.len(), 8);

    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["name"], "Morning Class");
    assert_eq!(snap["state"], "waiting");
    assert_eq!(snap["current_question"], -1);
    assert_eq!(snap["total_questions"], 3);
    assert!(snap["participants"].as_array().unwrap().is_empty());

    let (status, body) = http_delete(&srv.api(&format!("/sessions/{session_id}"))).await?;
    assert_eq!(status, 200);
    assert_eq!(body["deleted"], true);

    let (status, _) = http_get(&srv.api(&format!("/sessions/{session_id}"))).await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn list_shows_every_session() -> Result<()> {
    let srv = spawn_server().await?;
    let id_a = create_session(&srv, "A").await?;
    let id_b = create_session(&srv, "B").await?;

    let (status, body) = http_get(&srv.api("/sessions")).await?;
    assert_eq!(status, 200);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    let ids: Vec<&str> = sessions
        .iter()
        .map(|s| s["session_id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&id_a.as_str()));
    assert!(ids.contains(&id_b.as_str()));
    Ok(())
}

#[tokio::test]
async fn status_reports_daemon_and_session_summaries() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    join(&srv, &session_id, "ada").await?;

    let (status, body) = http_get(&srv.api("/status")).await?;
    assert_eq!(status, 200);
    assert_eq!(body["total_questions"], 3);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["participants"], 1);
    assert_eq!(sessions[0]["state"], "waiting");
    Ok(())
}

#[tokio::test]
async fn reset_keeps_roster_and_restarts_the_walk() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    let p1 = join(&srv, &session_id, "p1").await?;
    let p2 = join(&srv, &session_id, "p2").await?;
    start(&srv, &session_id).await?;
    submit(&srv, &session_id, &p1, 0, "agree").await?;
    submit(&srv, &session_id, &p2, 0, "disagree").await?;

    let (status, body) =
        http_post_empty(&srv.api(&format!("/sessions/{session_id}/reset"))).await?;
    assert_eq!(status, 200);
    assert_eq!(body["reset"], true);

    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["state"], "waiting");
    assert_eq!(snap["current_question"], -1);
    assert_eq!(snap["answered_current"], 0);
    let participants = snap["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    for p in participants {
        assert_eq!(p["position"], 0);
    }

    // Immediately re-enterable.
    start(&srv, &session_id).await?;
    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["state"], "in_progress");
    assert_eq!(snap["current_question"], 0);
    Ok(())
}
