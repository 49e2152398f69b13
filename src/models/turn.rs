use serde::{Deserialize, Serialize};

/// One recorded scoring event within a session.
///
/// Turns are immutable once recorded, except that a failure reason may be
/// attached exactly once, right after the turn is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// 1-based position within the session.
    pub index: u32,
    pub score: u64,
    /// Failure reason label, copied by value from the catalog.
    pub reason: Option<String>,
}

impl Turn {
    pub fn new(index: u32, score: u64, reason: Option<String>) -> Self {
        Self {
            index,
            score,
            reason,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.score == 0
    }
}

/// Which entry the user picked after committing a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonChoice {
    /// Skip or dismiss: the turn keeps no reason.
    Skip,
    /// Position in the reason catalog.
    Catalog(usize),
}
