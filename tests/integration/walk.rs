//! The end-to-end walk: barrier, positions, completion, ranking.

use anyhow::Result;

use crate::*;

/// The canonical scenario: three participants, question 0 stays open at 2/3
/// answers, closes on the third, positions move one unit each.
#[tokio::test]
async fn three_participant_barrier_scenario() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Test").await?;
    let p1 = join(&srv, &session_id, "P1").await?;
    let p2 = join(&srv, &session_id, "P2").await?;
    let p3 = join(&srv, &session_id, "P3").await?;
    start(&srv, &session_id).await?;

    let r1 = submit(&srv, &session_id, &p1, 0, "agree").await?;
    let r2 = submit(&srv, &session_id, &p2, 0, "disagree").await?;
    assert_eq!(r1["advanced"], false);
    assert_eq!(r2["advanced"], false);

    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["answered_current"], 2);
    assert_eq!(snap["current_question"], 0);

    let r3 = submit(&srv, &session_id, &p3, 0, "agree").await?;
    assert_eq!(r3["advanced"], true);

    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["current_question"], 1);
    assert_eq!(snap["question"], "statement two");
    assert_eq!(snap["answered_current"], 0);

    let position_of = |snap: &serde_json::Value, id: &str| -> i64 {
        snap["participants"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == id)
            .unwrap()["position"]
            .as_i64()
            .unwrap()
    };
    assert_eq!(position_of(&snap, &p1), 1);
    assert_eq!(position_of(&snap, &p2), -1);
    assert_eq!(position_of(&snap, &p3), 1);
    Ok(())
}

#[tokio::test]
async fn full_walk_completes_with_ranking() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    let p1 = join(&srv, &session_id, "always-agrees").await?;
    let p2 = join(&srv, &session_id, "always-disagrees").await?;
    start(&srv, &session_id).await?;

    for q in 0..3 {
        submit(&srv, &session_id, &p1, q, "agree").await?;
        submit(&srv, &session_id, &p2, q, "disagree").await?;
    }

    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["state"], "completed");
    assert_eq!(snap["current_question"], 3);
    assert_eq!(snap["question"], serde_json::Value::Null);

    let ranked = snap["ranked_final"].as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["id"], p1.as_str());
    assert_eq!(ranked[0]["position"], 3);
    assert_eq!(ranked[0]["rank"], 1);
    assert_eq!(ranked[1]["id"], p2.as_str());
    assert_eq!(ranked[1]["position"], -3);
    assert_eq!(ranked[1]["rank"], 2);
    Ok(())
}

#[tokio::test]
async fn removing_the_last_pending_participant_advances() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    let p1 = join(&srv, &session_id, "p1").await?;
    let p2 = join(&srv, &session_id, "p2").await?;
    start(&srv, &session_id).await?;

    submit(&srv, &session_id, &p1, 0, "agree").await?;

    let (status, body) = http_delete(&srv.api(&format!(
        "/sessions/{session_id}/participants/{p2}"
    )))
    .await?;
    assert_eq!(status, 200);
    assert_eq!(body["removed"], true);
    assert_eq!(body["advanced"], true);

    let snap = inspect(&srv, &session_id).await?;
    assert_eq!(snap["current_question"], 1);
    assert_eq!(snap["participants"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn late_joiner_is_counted_for_the_open_question() -> Result<()> {
    let srv = spawn_server().await?;
    let session_id = create_session(&srv, "Walk").await?;
    let p1 = join(&srv, &session_id, "p1").await?;
    start(&srv, &session_id).await?;

    // Roster grows mid-question — the barrier now needs both.
    let p2 = join(&srv, &session_id, "late").await?;
    let r = submit(&srv, &session_id, &p1, 0, "agree").await?;
    assert_eq!(r["advanced"], false);

    let r = submit(&srv, &session_id, &p2, 0, "agree").await?;
    assert_eq!(r["advanced"], true);
    Ok(())
}
