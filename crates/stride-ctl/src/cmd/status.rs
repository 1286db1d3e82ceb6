//! Daemon status and shutdown commands.

use anyhow::Result;
use serde::Deserialize;

use super::http::{base_url, get_json, post_json};

pub async fn cmd_status(port: u16) -> Result<()> {
    #[derive(Deserialize)]
    struct StatusResponse {
        uptime_secs: u64,
        total_questions: usize,
        sessions: Vec<SessionStatus>,
    }

    #[derive(Deserialize)]
    struct SessionStatus {
        session_id: String,
        name: String,
        state: String,
        participants: usize,
        connected: usize,
        current_question: i64,
        answered_current: usize,
        uptime_secs: u64,
    }

    let resp: StatusResponse = get_json(&format!("{}/status", base_url(port))).await?;

    println!("═══════════════════════════════════════");
    println!("  Stride Daemon Status");
    println!("═══════════════════════════════════════");
    println!("  Uptime          : {}s", resp.uptime_secs);
    println!("  Deck questions  : {}", resp.total_questions);
    println!("  Active sessions : {}", resp.sessions.len());

    if resp.sessions.is_empty() {
        println!("\n  No active sessions.");
    } else {
        println!("\n  Sessions:");
        for s in &resp.sessions {
            println!("  ┌─ {} ({})", s.session_id, s.name);
            println!("  │  state     : {}", s.state);
            println!(
                "  │  roster    : {} ({} connected)",
                s.participants, s.connected
            );
            println!(
                "  │  question  : {} ({} answered)",
                s.current_question, s.answered_current
            );
            println!("  └─ uptime    : {}s", s.uptime_secs);
        }
    }

    Ok(())
}

pub async fn cmd_shutdown(port: u16) -> Result<()> {
    #[derive(Deserialize)]
    struct ShutdownResponse {
        shutting_down: bool,
    }

    let resp: ShutdownResponse =
        post_json(&format!("{}/daemon/shutdown", base_url(port))).await?;

    if resp.shutting_down {
        println!("✓ Daemon shutting down.");
    }
    Ok(())
}
