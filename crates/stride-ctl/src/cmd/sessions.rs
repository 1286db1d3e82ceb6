//! Session management commands.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::http::{base_url, delete_json, get_json, post_json, post_json_body};

pub async fn cmd_session_create(port: u16, name: &str) -> Result<()> {
    #[derive(Serialize)]
    struct CreateRequest<'a> {
        name: &'a str,
    }

    #[derive(Deserialize)]
    struct CreateResponse {
        session_id: String,
        total_questions: usize,
    }

    let resp: CreateResponse = post_json_body(
        &format!("{}/sessions", base_url(port)),
        &CreateRequest { name },
    )
    .await?;

    println!("✓ Session created: {}", resp.session_id);
    println!("  Name      : {}", name);
    println!("  Questions : {}", resp.total_questions);
    println!("  Join via  : POST /api/sessions/{}/join", resp.session_id);

    Ok(())
}

pub async fn cmd_session_list(port: u16) -> Result<()> {
    #[derive(Deserialize)]
    struct ListResponse {
        sessions: Vec<SessionSummary>,
    }

    #[derive(Deserialize)]
    struct SessionSummary {
        session_id: String,
        name: String,
        state: String,
        participants: usize,
        current_question: i64,
        total_questions: usize,
    }

    let resp: ListResponse = get_json(&format!("{}/sessions", base_url(port))).await?;

    if resp.sessions.is_empty() {
        println!("No active sessions.");
        return Ok(());
    }

    println!("═══════════════════════════════════════");
    println!("  Active Sessions ({})", resp.sessions.len());
    println!("═══════════════════════════════════════");
    for s in &resp.sessions {
        println!("  ┌─ {}", s.session_id);
        println!("  │  name         : {}", s.name);
        println!("  │  state        : {}", s.state);
        println!("  │  participants : {}", s.participants);
        println!(
            "  └─ question     : {}/{}",
            s.current_question, s.total_questions
        );
    }

    Ok(())
}

pub async fn cmd_session_inspect(port: u16, session_id: &str) -> Result<()> {
    let snap: Value = get_json(&format!("{}/sessions/{}", base_url(port), session_id)).await?;

    println!("═══════════════════════════════════════");
    println!("  Session Details");
    println!("═══════════════════════════════════════");
    println!("  ID        : {}", snap["session_id"].as_str().unwrap_or("?"));
    println!("  Name      : {}", snap["name"].as_str().unwrap_or("?"));
    println!("  State     : {}", snap["state"].as_str().unwrap_or("?"));
    println!(
        "  Question  : {}/{}",
        snap["current_question"], snap["total_questions"]
    );
    if let Some(text) = snap["question"].as_str() {
        println!("  Open      : {}", text);
    }
    println!("  Answered  : {}", snap["answered_current"]);

    if let Some(participants) = snap["participants"].as_array() {
        println!("\n  Participants ({}):", participants.len());
        for p in participants {
            let live = if p["connected"].as_bool().unwrap_or(false) {
                "●"
            } else {
                "○"
            };
            let answered = if p["answered_current"].as_bool().unwrap_or(false) {
                "answered"
            } else {
                "pending"
            };
            println!(
                "  {} {:>4}  {}  [{}]",
                live, p["position"], p["nickname"].as_str().unwrap_or("?"), answered
            );
        }
    }

    if let Some(ranked) = snap["ranked_final"].as_array() {
        println!("\n  Final ranking:");
        for r in ranked {
            println!(
                "  #{} {} ({})",
                r["rank"],
                r["nickname"].as_str().unwrap_or("?"),
                r["position"]
            );
        }
    }

    Ok(())
}

pub async fn cmd_session_start(port: u16, session_id: &str) -> Result<()> {
    #[derive(Deserialize)]
    struct StartResponse {
        session_id: String,
        started: bool,
    }

    let resp: StartResponse =
        post_json(&format!("{}/sessions/{}/start", base_url(port), session_id)).await?;

    if resp.started {
        println!("✓ Session started: {}", resp.session_id);
    }
    Ok(())
}

pub async fn cmd_session_reset(port: u16, session_id: &str) -> Result<()> {
    #[derive(Deserialize)]
    struct ResetResponse {
        session_id: String,
        reset: bool,
    }

    let resp: ResetResponse =
        post_json(&format!("{}/sessions/{}/reset", base_url(port), session_id)).await?;

    if resp.reset {
        println!("✓ Session reset: {} (roster retained)", resp.session_id);
    }
    Ok(())
}

pub async fn cmd_session_drop(port: u16, session_id: &str) -> Result<()> {
    #[derive(Deserialize)]
    struct DropResponse {
        session_id: String,
        deleted: bool,
    }

    let resp: DropResponse =
        delete_json(&format!("{}/sessions/{}", base_url(port), session_id)).await?;

    if resp.deleted {
        println!("✓ Session deleted: {}", resp.session_id);
    } else {
        println!("Session not found: {}", session_id);
    }
    Ok(())
}

pub async fn cmd_participant_kick(port: u16, session_id: &str, participant_id: &str) -> Result<()> {
    #[derive(Deserialize)]
    struct RemoveResponse {
        participant_id: String,
        removed: bool,
        advanced: bool,
    }

    let resp: RemoveResponse = delete_json(&format!(
        "{}/sessions/{}/participants/{}",
        base_url(port),
        session_id,
        participant_id
    ))
    .await?;

    if resp.removed {
        println!("✓ Participant removed: {}", resp.participant_id);
        if resp.advanced {
            println!("  They were the last pending answer — walk advanced.");
        }
    }
    Ok(())
}
