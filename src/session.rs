//! The in-progress session: turn recording, live statistics, archival.

use chrono::Utc;

use crate::db::KeyValueStore;
use crate::error::{CaromError, Result};
use crate::history::HistoryStore;
use crate::models::{ArchivedDetail, ArchivedSession, SessionState, SessionStats, Turn};

/// Owns the ledger of the session being played.
///
/// After a turn is added without a reason, the engine holds a pending reason
/// slot for it. The caller settles it with [`attach_reason`] (a label, or
/// `None` for skip) before staging the next score. The engine does not block
/// on it: a new [`add_turn`] simply closes the slot with no reason.
///
/// [`attach_reason`]: SessionEngine::attach_reason
/// [`add_turn`]: SessionEngine::add_turn
#[derive(Debug, Default)]
pub struct SessionEngine {
    state: SessionState,
    reason_pending: bool,
}

impl SessionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a turn. Never fails; scores and turn counts are unbounded.
    pub fn add_turn(&mut self, score: u64, reason: Option<String>) -> Turn {
        let turn = Turn::new(self.state.turn_count + 1, score, reason);

        self.state.total_score = self.state.total_score.saturating_add(score);
        self.state.turn_count += 1;
        if turn.is_zero() {
            self.state.zero_count += 1;
        }
        self.reason_pending = turn.reason.is_none();
        self.state.turns.push(turn.clone());

        tracing::debug!(
            "Turn {} scored {} (total {}, moyenne {})",
            turn.index,
            turn.score,
            self.state.total_score,
            self.state.moyenne()
        );
        turn
    }

    /// Settle the reason slot of the turn just committed. `None` means the
    /// picker was skipped or dismissed.
    pub fn attach_reason(&mut self, reason: Option<String>) -> Result<&Turn> {
        if !self.reason_pending {
            return Err(CaromError::NoPendingReason);
        }
        self.reason_pending = false;

        let turn = self
            .state
            .turns
            .last_mut()
            .ok_or(CaromError::NoPendingReason)?;
        if let Some(reason) = reason {
            tracing::debug!("Turn {} tagged '{}'", turn.index, reason);
            turn.reason = Some(reason);
        }
        Ok(&*turn)
    }

    pub fn reason_pending(&self) -> bool {
        self.reason_pending
    }

    /// Discard the session in progress.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
        self.reason_pending = false;
    }

    /// Archive the session and start a fresh one.
    ///
    /// With no turns this is [`CaromError::NoOp`] and nothing is touched.
    /// If archiving fails the session is kept as is.
    pub fn end_session<S: KeyValueStore>(
        &mut self,
        history: &mut HistoryStore<S>,
    ) -> Result<ArchivedSession> {
        if self.state.turn_count == 0 {
            return Err(CaromError::NoOp);
        }

        let summary = self.state.moyenne().rounded();
        let detail = ArchivedDetail::new(self.state.turns.clone(), Some(Utc::now()));
        let index = history.archive(summary, detail.clone())?;

        self.reset();

        Ok(ArchivedSession {
            index,
            summary,
            detail,
        })
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::from(&self.state)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn turns(&self) -> &[Turn] {
        &self.state.turns
    }
}
