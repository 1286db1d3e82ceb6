//! One session: state machine, roster, answer barrier, snapshot broadcast.
//!
//! `SessionCore` holds the mutable state and is only ever touched behind the
//! `SessionHandle` mutex — that lock is the serialization boundary the
//! barrier depends on. Every mutation fully applies and publishes its
//! snapshot before the lock is released, so subscribers see snapshots in
//! exactly the order mutations were applied. There is no I/O inside the
//! critical section.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::{broadcast, Mutex};

use stride_core::position::next_position;
use stride_core::types::{ParticipantView, RankEntry, SessionState, Snapshot};
use stride_core::{AnswerValue, SessionError};

use crate::ids::random_id;

/// Snapshot broadcast capacity per session. A receiver that falls this far
/// behind lags and must re-sync from a full snapshot.
pub const SNAPSHOT_CAPACITY: usize = 256;

/// Result of an answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Answer recorded. `advanced` is true when it closed the barrier and
    /// the session moved to the next question (or completed).
    Recorded { advanced: bool },
    /// The participant had already answered this question. Idempotent no-op.
    Duplicate,
}

/// One roster member.
#[derive(Debug)]
struct Participant {
    nickname: String,
    position: i32,
    connected: bool,
    /// Monotonic join order, used for final-rank tie breaking.
    joined_seq: u64,
}

/// An answer as recorded in the ledger. Immutable once stored.
#[derive(Debug, Clone, Copy)]
struct RecordedAnswer {
    value: AnswerValue,
    #[allow(dead_code)]
    recorded_at: u64,
}

/// Mutable state of one session. Never shared — see `SessionHandle`.
struct SessionCore {
    id: String,
    name: String,
    questions: Arc<Vec<String>>,
    state: SessionState,
    /// Index of the open question. None while waiting or completed.
    current: Option<usize>,
    participants: HashMap<String, Participant>,
    /// Ledger: question index → participant id → answer. Append-only
    /// between resets; at most one entry per (participant, question).
    answers: HashMap<usize, HashMap<String, RecordedAnswer>>,
    next_seq: u64,
    created_at: Instant,
}

impl SessionCore {
    fn new(id: String, name: String, questions: Arc<Vec<String>>) -> Self {
        Self {
            id,
            name,
            questions,
            state: SessionState::Waiting,
            current: None,
            participants: HashMap::new(),
            answers: HashMap::new(),
            next_seq: 0,
            created_at: Instant::now(),
        }
    }

    fn join(&mut self, nickname: &str, allow_late_join: bool) -> Result<String, SessionError> {
        if self.state == SessionState::Completed && !allow_late_join {
            return Err(SessionError::InvalidState("walk already completed"));
        }

        let participant_id = random_id(8);
        self.participants.insert(
            participant_id.clone(),
            Participant {
                nickname: nickname.to_string(),
                position: 0,
                connected: false,
                joined_seq: self.next_seq,
            },
        );
        self.next_seq += 1;

        tracing::info!(
            session_id = %self.id,
            participant_id = %participant_id,
            nickname,
            roster = self.participants.len(),
            "participant joined"
        );
        Ok(participant_id)
    }

    fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Waiting {
            return Err(SessionError::InvalidState("session already started"));
        }
        if self.participants.is_empty() {
            return Err(SessionError::InvalidState("no participants in session"));
        }

        self.state = SessionState::InProgress;
        self.current = Some(0);
        tracing::info!(
            session_id = %self.id,
            roster = self.participants.len(),
            questions = self.questions.len(),
            "session started"
        );
        Ok(())
    }

    fn submit(
        &mut self,
        participant_id: &str,
        question: usize,
        value: AnswerValue,
    ) -> Result<SubmitOutcome, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::InvalidState("session is not in progress"));
        }
        let open = self
            .current
            .ok_or(SessionError::InvalidState("no question is open"))?;
        if question != open {
            return Err(SessionError::InvalidState("question is not open"));
        }
        if !self.participants.contains_key(participant_id) {
            return Err(SessionError::UnknownParticipant);
        }

        let ledger = self.answers.entry(open).or_default();
        if ledger.contains_key(participant_id) {
            // Client retry or reconnect — accept silently, change nothing.
            return Ok(SubmitOutcome::Duplicate);
        }
        ledger.insert(
            participant_id.to_string(),
            RecordedAnswer {
                value,
                recorded_at: epoch_secs(),
            },
        );

        // Position moves only as a side effect of this participant's own
        // accepted answer.
        if let Some(p) = self.participants.get_mut(participant_id) {
            p.position = next_position(p.position, value);
        }

        let advanced = self.evaluate_barrier()?;
        Ok(SubmitOutcome::Recorded { advanced })
    }

    /// Close the barrier and advance if every roster member has answered the
    /// open question. Returns true when the session advanced.
    fn evaluate_barrier(&mut self) -> Result<bool, SessionError> {
        let open = match self.current {
            Some(q) if self.state == SessionState::InProgress => q,
            _ => return Ok(false),
        };
        let roster = self.participants.len();
        let answered = self.answers.get(&open).map_or(0, |l| l.len());

        if answered > roster {
            let msg = format!(
                "question {open} has {answered} answers for a roster of {roster}"
            );
            tracing::error!(session_id = %self.id, "{msg}");
            return Err(SessionError::Invariant(msg));
        }
        // An empty roster never closes a barrier.
        if roster == 0 || answered < roster {
            return Ok(false);
        }

        let agrees = self.answers.get(&open).map_or(0, |l| {
            l.values().filter(|a| a.value == AnswerValue::Agree).count()
        });
        tracing::info!(
            session_id = %self.id,
            question = open,
            agrees,
            disagrees = answered - agrees,
            "barrier closed"
        );

        let next = open + 1;
        if next >= self.questions.len() {
            self.state = SessionState::Completed;
            self.current = None;
            tracing::info!(session_id = %self.id, "walk completed");
        } else {
            self.current = Some(next);
            tracing::info!(session_id = %self.id, question = next, "advanced to next question");
        }
        Ok(true)
    }

    fn reset(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Waiting {
            return Err(SessionError::InvalidState("session has not started"));
        }

        self.state = SessionState::Waiting;
        self.current = None;
        self.answers.clear();
        for p in self.participants.values_mut() {
            p.position = 0;
        }
        tracing::info!(
            session_id = %self.id,
            roster = self.participants.len(),
            "session reset, roster retained"
        );
        Ok(())
    }

    /// Instructor removal. The participant's answer for the still-open
    /// question is dropped with them, then the barrier is re-evaluated —
    /// if they were the only pending answer the session advances.
    fn remove_participant(&mut self, participant_id: &str) -> Result<bool, SessionError> {
        if self.participants.remove(participant_id).is_none() {
            return Err(SessionError::UnknownParticipant);
        }
        if let Some(open) = self.current {
            if let Some(ledger) = self.answers.get_mut(&open) {
                ledger.remove(participant_id);
            }
        }
        tracing::info!(
            session_id = %self.id,
            participant_id,
            roster = self.participants.len(),
            "participant removed"
        );
        self.evaluate_barrier()
    }

    fn set_connected(&mut self, participant_id: &str, connected: bool) -> Result<(), SessionError> {
        let p = self
            .participants
            .get_mut(participant_id)
            .ok_or(SessionError::UnknownParticipant)?;
        p.connected = connected;
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        let open_ledger = self.current.and_then(|q| self.answers.get(&q));

        let mut participants: Vec<(&String, &Participant)> = self.participants.iter().collect();
        participants.sort_by_key(|(_, p)| p.joined_seq);

        let views = participants
            .iter()
            .map(|(id, p)| ParticipantView {
                id: (*id).clone(),
                nickname: p.nickname.clone(),
                position: p.position,
                answered_current: open_ledger.is_some_and(|l| l.contains_key(*id)),
                connected: p.connected,
            })
            .collect();

        let current_question = match (self.state, self.current) {
            (SessionState::Waiting, _) => -1,
            (SessionState::InProgress, Some(q)) => q as i64,
            _ => self.questions.len() as i64,
        };

        Snapshot {
            session_id: self.id.clone(),
            name: self.name.clone(),
            state: self.state,
            current_question,
            question: self
                .current
                .and_then(|q| self.questions.get(q))
                .cloned(),
            total_questions: self.questions.len(),
            answered_current: open_ledger.map_or(0, |l| l.len()),
            participants: views,
            ranked_final: (self.state == SessionState::Completed).then(|| self.ranked_final()),
        }
    }

    /// Final ranking: position descending, ties broken by join order, equal
    /// positions share a rank.
    fn ranked_final(&self) -> Vec<RankEntry> {
        let mut ordered: Vec<(&String, &Participant)> = self.participants.iter().collect();
        ordered.sort_by(|(_, a), (_, b)| {
            b.position
                .cmp(&a.position)
                .then(a.joined_seq.cmp(&b.joined_seq))
        });

        let mut out = Vec::with_capacity(ordered.len());
        let mut rank = 0;
        let mut prev_position = None;
        for (idx, (id, p)) in ordered.iter().enumerate() {
            if prev_position != Some(p.position) {
                rank = idx + 1;
                prev_position = Some(p.position);
            }
            out.push(RankEntry {
                rank,
                id: (*id).clone(),
                nickname: p.nickname.clone(),
                position: p.position,
            });
        }
        out
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ── Handle ────────────────────────────────────────────────────────────────────

/// Shared handle to one session.
///
/// The mutex is the per-session serialization boundary: no two mutations of
/// the same session interleave, and the snapshot for each mutation is
/// published before the lock drops. Sessions share no mutable state with
/// each other.
pub struct SessionHandle {
    core: Mutex<SessionCore>,
    events: broadcast::Sender<Arc<Snapshot>>,
}

impl SessionHandle {
    pub(crate) fn new(id: String, name: String, questions: Arc<Vec<String>>) -> Arc<Self> {
        let (events, _) = broadcast::channel(SNAPSHOT_CAPACITY);
        Arc::new(Self {
            core: Mutex::new(SessionCore::new(id, name, questions)),
            events,
        })
    }

    /// Subscribe to this session's snapshot feed. Fire-and-forget on the
    /// sending side — a slow subscriber lags, it never blocks the session.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Snapshot>> {
        self.events.subscribe()
    }

    /// Current full snapshot, without mutating anything.
    pub async fn snapshot(&self) -> Snapshot {
        self.core.lock().await.snapshot()
    }

    pub async fn join(
        &self,
        nickname: &str,
        allow_late_join: bool,
    ) -> Result<String, SessionError> {
        let mut core = self.core.lock().await;
        let participant_id = core.join(nickname, allow_late_join)?;
        self.publish(&core);
        Ok(participant_id)
    }

    pub async fn start(&self) -> Result<(), SessionError> {
        let mut core = self.core.lock().await;
        core.start()?;
        self.publish(&core);
        Ok(())
    }

    pub async fn submit(
        &self,
        participant_id: &str,
        question: usize,
        value: AnswerValue,
    ) -> Result<SubmitOutcome, SessionError> {
        let mut core = self.core.lock().await;
        let outcome = core.submit(participant_id, question, value)?;
        // A duplicate changed nothing — publishing would only repeat the
        // previous snapshot.
        if outcome != SubmitOutcome::Duplicate {
            self.publish(&core);
        }
        Ok(outcome)
    }

    pub async fn reset(&self) -> Result<(), SessionError> {
        let mut core = self.core.lock().await;
        core.reset()?;
        self.publish(&core);
        Ok(())
    }

    /// Remove a participant. Returns true when removal closed the barrier
    /// and the session advanced.
    pub async fn remove_participant(&self, participant_id: &str) -> Result<bool, SessionError> {
        let mut core = self.core.lock().await;
        let advanced = core.remove_participant(participant_id)?;
        self.publish(&core);
        Ok(advanced)
    }

    /// Toggle connection liveness. Disconnects never remove a participant —
    /// their roster entry and recorded answers stay authoritative.
    pub async fn set_connected(
        &self,
        participant_id: &str,
        connected: bool,
    ) -> Result<(), SessionError> {
        let mut core = self.core.lock().await;
        core.set_connected(participant_id, connected)?;
        self.publish(&core);
        Ok(())
    }

    /// Seconds since the session was created. For the status endpoint.
    pub async fn uptime_secs(&self) -> u64 {
        self.core.lock().await.created_at.elapsed().as_secs()
    }

    fn publish(&self, core: &SessionCore) {
        // send() errs when nobody is subscribed — fine.
        let _ = self.events.send(Arc::new(core.snapshot()));
    }
}
