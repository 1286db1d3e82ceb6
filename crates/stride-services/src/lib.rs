//! stride-services — the session engine.
//!
//! Owns everything between the gateway and the pure core types: the
//! process-wide session registry, the per-session state machine with its
//! answer barrier, and the per-session snapshot broadcast.

mod ids;
pub mod registry;
pub mod session;

pub use registry::SessionRegistry;
pub use session::{SessionHandle, SubmitOutcome, SNAPSHOT_CAPACITY};
