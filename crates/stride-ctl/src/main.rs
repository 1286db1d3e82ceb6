//! stride-ctl — command-line interface for the Stride daemon.

use anyhow::{Context, Result};

mod cmd;

use cmd::sessions::{
    cmd_participant_kick, cmd_session_create, cmd_session_drop, cmd_session_inspect,
    cmd_session_list, cmd_session_reset, cmd_session_start,
};
use cmd::status::{cmd_shutdown, cmd_status};

const DEFAULT_PORT: u16 = 9030;

fn print_usage() {
    println!("Usage: stride-ctl [--port <port>] <command>");
    println!();
    println!("Commands:");
    println!("  status                      Show daemon status and all sessions");
    println!("  create <name>               Create a session");
    println!("  sessions                    List active sessions");
    println!("  sessions inspect <id>       Show one session's full snapshot");
    println!("  sessions drop <id>          Delete a session");
    println!("  start <id>                  Start the walk");
    println!("  reset <id>                  Reset the walk, keeping the roster");
    println!("  kick <id> <participant>     Remove a participant");
    println!("  shutdown                    Stop the daemon");
    println!();
    println!("Options:");
    println!("  --port <port>   API port (default: {})", DEFAULT_PORT);
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Parse --port option
    let mut port = DEFAULT_PORT;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--port" {
            i += 1;
            port = args
                .get(i)
                .context("--port requires a value")?
                .parse()
                .context("--port must be a number")?;
        } else {
            remaining.push(&args[i]);
        }
        i += 1;
    }

    match remaining.as_slice() {
        ["status"] | [] => cmd_status(port).await,
        ["create", name] => cmd_session_create(port, name).await,
        ["sessions"] => cmd_session_list(port).await,
        ["sessions", "inspect", id] => cmd_session_inspect(port, id).await,
        ["sessions", "drop", id] => cmd_session_drop(port, id).await,
        ["start", id] => cmd_session_start(port, id).await,
        ["reset", id] => cmd_session_reset(port, id).await,
        ["kick", id, participant] => cmd_participant_kick(port, id, participant).await,
        ["shutdown"] => cmd_shutdown(port).await,
        ["help"] | ["--help"] | ["-h"] => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            print_usage();
            std::process::exit(1);
        }
    }
}
