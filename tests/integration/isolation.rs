//! Session independence: concurrent sessions never observe each other.

use anyhow::Result;

use crate::*;

#[tokio::test]
async fn concurrent_sessions_stay_isolated() -> Result<()> {
    let srv = spawn_server().await?;
    let id_a = create_session(&srv, "A").await?;
    let id_b = create_session(&srv, "B").await?;

    // Drive both sessions concurrently.
    let pa = join(&srv, &id_a, "alice").await?;
    let pb = join(&srv, &id_b, "bob").await?;
    let (ra, rb) = tokio::join!(start(&srv, &id_a), start(&srv, &id_b));
    ra?;
    rb?;

    let (sa, sb) = tokio::join!(
        submit(&srv, &id_a, &pa, 0, "agree"),
        submit(&srv, &id_b, &pb, 0, "disagree"),
    );
    sa?;
    sb?;

    let snap_a = inspect(&srv, &id_a).await?;
    let snap_b = inspect(&srv, &id_b).await?;

    // Each session advanced on its own single-member barrier.
    assert_eq!(snap_a["current_question"], 1);
    assert_eq!(snap_b["current_question"], 1);

    let roster_a = snap_a["participants"].as_array().unwrap();
    let roster_b = snap_b["participants"].as_array().unwrap();
    assert_eq!(roster_a.len(), 1);
    assert_eq!(roster_b.len(), 1);
    assert_eq!(roster_a[0]["nickname"], "alice");
    assert_eq!(roster_b[0]["nickname"], "bob");
    assert_eq!(roster_a[0]["position"], 1);
    assert_eq!(roster_b[0]["position"], -1);
    Ok(())
}

#[tokio::test]
async fn answering_in_one_session_fails_with_anothers_token() -> Result<()> {
    let srv = spawn_server().await?;
    let id_a = create_session(&srv, "A").await?;
    let id_b = create_session(&srv, "B").await?;

    let pa = join(&srv, &id_a, "alice").await?;
    join(&srv, &id_b, "bob").await?;
    start(&srv, &id_b).await?;

    // Participant ids are session-scoped, not global.
    let (status, _) = http_post(
        &srv.api(&format!("/sessions/{id_b}/answers")),
        &serde_json::json!({ "participant_id": pa, "question": 0, "value": "agree" }),
    )
    .await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn deleting_one_session_leaves_the_other_running() -> Result<()> {
    let srv = spawn_server().await?;
    let id_a = create_session(&srv, "A").await?;
    let id_b = create_session(&srv, "B").await?;
    let pb = join(&srv, &id_b, "bob").await?;
    start(&srv, &id_b).await?;

    let (status, _) = http_delete(&srv.api(&format!("/sessions/{id_a}"))).await?;
    assert_eq!(status, 200);

    // B is untouched and still accepts answers.
    let r = submit(&srv, &id_b, &pb, 0, "agree").await?;
    assert_eq!(r["advanced"], true);
    Ok(())
}
