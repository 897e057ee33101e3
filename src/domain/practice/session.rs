//! PracticeSession aggregate - the conversation-practice state machine.
//!
//! The aggregate owns the transcript, saved vocabulary, correction list and
//! summary of one browser context. Gateway calls happen outside of it: an
//! operation hands out a ticket, the caller awaits the gateway, and the
//! result is applied with the ticket. Tickets carry the session generation
//! they were issued under, so results that arrive after a reset or restart
//! are discarded instead of applied to the wrong session.

use crate::domain::foundation::{SessionId, StateMachine, Timestamp};
use crate::domain::scenario::Scenario;

use super::{ChatMessage, Correction, PracticeError, SessionPhase, SessionSummary, VocabularyList};

/// Handle for one outstanding correction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTicket {
    generation: u64,
    turn: u64,
    user_index: usize,
}

impl TurnTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the correction gateway needs for one turn.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub ticket: TurnTicket,
    pub user_message: String,
    pub scenario_title: String,
}

/// Handle for the summary request of an ended session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTicket {
    generation: u64,
}

impl SummaryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the summary gateway needs for an ended session.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub ticket: SummaryTicket,
    pub conversation_log: String,
    pub saved_vocabulary: Vec<String>,
    pub corrections: Vec<String>,
}

/// Result of applying a correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant reply was appended.
    Applied(ChatMessage),
    /// The ticket no longer matches the session; nothing changed.
    Discarded,
}

/// Result of rolling back a failed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rollback {
    /// The optimistic user message was removed.
    RolledBack(ChatMessage),
    /// The ticket no longer matches the session; nothing changed.
    Discarded,
}

/// Practice session aggregate.
///
/// # Invariants
///
/// - `phase == Idle` iff `scenario` is `None` iff `messages` is empty
/// - `phase == Active` implies the first message is the scenario welcome
/// - `corrections` grows only from corrected turns
/// - at most one correction request is pending
/// - `generation` strictly increases on every start and reset
#[derive(Debug, Clone)]
pub struct PracticeSession {
    id: SessionId,
    generation: u64,
    next_turn: u64,
    phase: SessionPhase,
    scenario: Option<Scenario>,
    messages: Vec<ChatMessage>,
    vocabulary: VocabularyList,
    corrections: Vec<String>,
    summary: Option<SessionSummary>,
    pending_turn: Option<TurnTicket>,
    started_at: Option<Timestamp>,
    ended_at: Option<Timestamp>,
}

impl PracticeSession {
    /// Creates an idle session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            generation: 0,
            next_turn: 0,
            phase: SessionPhase::Idle,
            scenario: None,
            messages: Vec::new(),
            vocabulary: VocabularyList::new(),
            corrections: Vec::new(),
            summary: None,
            pending_turn: None,
            started_at: None,
            ended_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn saved_vocabulary(&self) -> &[String] {
        self.vocabulary.as_slice()
    }

    pub fn corrections(&self) -> &[String] {
        &self.corrections
    }

    /// The summary of the ended session, if one has been applied.
    ///
    /// A summary kept across a reset is not visible until the session is
    /// ended again; the next start discards it.
    pub fn summary(&self) -> Option<&SessionSummary> {
        match self.phase {
            SessionPhase::Ended => self.summary.as_ref(),
            _ => None,
        }
    }

    pub fn is_correction_pending(&self) -> bool {
        self.pending_turn.is_some()
    }

    pub fn is_summary_pending(&self) -> bool {
        self.phase == SessionPhase::Ended && self.summary.is_none()
    }

    pub fn started_at(&self) -> Option<&Timestamp> {
        self.started_at.as_ref()
    }

    pub fn ended_at(&self) -> Option<&Timestamp> {
        self.ended_at.as_ref()
    }

    /// `role: text` per message, newline separated, in display order.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(ChatMessage::transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts practicing `scenario`.
    ///
    /// Valid from `Idle` or `Ended`. Clears everything from the previous
    /// session and seeds the transcript with the scenario welcome.
    pub fn start(&mut self, scenario: Scenario) -> Result<(), PracticeError> {
        self.transition(SessionPhase::Active)?;

        self.generation += 1;
        self.pending_turn = None;
        self.messages = vec![ChatMessage::assistant(scenario.welcome_message.clone())];
        self.scenario = Some(scenario);
        self.vocabulary.clear();
        self.corrections.clear();
        self.summary = None;
        self.started_at = Some(Timestamp::now());
        self.ended_at = None;
        Ok(())
    }

    /// Appends the user's message and opens a correction request for it.
    ///
    /// # Errors
    ///
    /// - `NotActive` unless the session is active
    /// - `CorrectionInFlight` if another turn is still waiting
    /// - `BlankInput` if `text` is empty or whitespace
    pub fn begin_turn(&mut self, text: &str) -> Result<TurnRequest, PracticeError> {
        if self.phase != SessionPhase::Active {
            return Err(PracticeError::NotActive(self.phase));
        }
        if self.pending_turn.is_some() {
            return Err(PracticeError::CorrectionInFlight);
        }
        if text.trim().is_empty() {
            return Err(PracticeError::BlankInput("text"));
        }
        let scenario_title = self
            .scenario
            .as_ref()
            .map(|s| s.title.clone())
            .ok_or(PracticeError::NotStarted)?;

        let ticket = TurnTicket {
            generation: self.generation,
            turn: self.next_turn,
            user_index: self.messages.len(),
        };
        self.next_turn += 1;
        self.messages.push(ChatMessage::user(text));
        self.pending_turn = Some(ticket);

        Ok(TurnRequest {
            ticket,
            user_message: text.to_string(),
            scenario_title,
        })
    }

    /// Applies the correction for a pending turn.
    pub fn complete_turn(&mut self, ticket: TurnTicket, correction: Correction) -> TurnOutcome {
        if !self.is_current_turn(ticket) {
            return TurnOutcome::Discarded;
        }
        self.pending_turn = None;

        if correction.is_corrected {
            self.corrections.push(correction.explanation.clone());
        }
        let reply = ChatMessage::reply(correction);
        self.messages.push(reply.clone());
        TurnOutcome::Applied(reply)
    }

    /// Undoes a turn whose correction request failed.
    pub fn abort_turn(&mut self, ticket: TurnTicket) -> Rollback {
        if !self.is_current_turn(ticket) || ticket.user_index >= self.messages.len() {
            return Rollback::Discarded;
        }
        self.pending_turn = None;
        Rollback::RolledBack(self.messages.remove(ticket.user_index))
    }

    /// Saves a word to the vocabulary list; returns false if already saved.
    pub fn save_vocabulary(&mut self, word: &str) -> Result<bool, PracticeError> {
        if !self.phase.has_scenario() {
            return Err(PracticeError::NotStarted);
        }
        if word.trim().is_empty() {
            return Err(PracticeError::BlankInput("word"));
        }
        Ok(self.vocabulary.insert(word))
    }

    /// Ends the session and opens the summary request.
    ///
    /// The phase changes immediately. A correction still in flight is
    /// retired and will be discarded when it arrives.
    pub fn end(&mut self) -> Result<SummaryRequest, PracticeError> {
        if self.phase != SessionPhase::Active {
            return Err(PracticeError::NotActive(self.phase));
        }
        self.transition(SessionPhase::Ended)?;
        self.pending_turn = None;
        self.summary = None;
        self.ended_at = Some(Timestamp::now());

        Ok(SummaryRequest {
            ticket: SummaryTicket {
                generation: self.generation,
            },
            conversation_log: self.transcript(),
            saved_vocabulary: self.vocabulary.as_slice().to_vec(),
            corrections: self.corrections.clone(),
        })
    }

    /// Stores the generated (or fallback) summary; returns false if the
    /// ticket is stale.
    pub fn apply_summary(&mut self, ticket: SummaryTicket, summary: SessionSummary) -> bool {
        if ticket.generation != self.generation || !self.is_summary_pending() {
            return false;
        }
        self.summary = Some(summary);
        true
    }

    /// Returns to idle, dropping the scenario and transcript.
    ///
    /// Saved vocabulary, corrections and summary are left for the next
    /// `start` to clear.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.generation += 1;
        self.pending_turn = None;
        self.scenario = None;
        self.messages.clear();
        self.started_at = None;
        self.ended_at = None;
    }

    fn is_current_turn(&self, ticket: TurnTicket) -> bool {
        ticket.generation == self.generation && self.pending_turn == Some(ticket)
    }

    fn transition(&mut self, to: SessionPhase) -> Result<(), PracticeError> {
        let from = self.phase;
        self.phase = from
            .transition_to(to)
            .map_err(|_| PracticeError::InvalidTransition { from, to })?;
        Ok(())
    }
}
