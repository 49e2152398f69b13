use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::moyenne::Moyenne;
use super::turn::Turn;

/// Full turn-by-turn record of a completed session.
///
/// Stored in a sequence parallel to the session summaries: the same index in
/// both sequences always refers to the same session. Turns are copied
/// verbatim from the ledger, so later catalog edits never reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DetailRecord", into = "DetailRecord")]
pub struct ArchivedDetail {
    pub turns: Vec<Turn>,
    /// When the session was ended. Absent in records written by older tools.
    pub ended_at: Option<DateTime<Utc>>,
}

impl ArchivedDetail {
    pub fn new(turns: Vec<Turn>, ended_at: Option<DateTime<Utc>>) -> Self {
        Self { turns, ended_at }
    }

    /// Sum of turn scores, saturating like the live session ledger.
    pub fn total_score(&self) -> u64 {
        self.turns
            .iter()
            .fold(0, |total, turn| total.saturating_add(turn.score))
    }

    pub fn turn_count(&self) -> u32 {
        self.turns.len() as u32
    }

    pub fn moyenne(&self) -> Moyenne {
        Moyenne::new(self.total_score(), self.turns.len() as u64)
    }
}

/// Persisted shape of an [`ArchivedDetail`].
///
/// The turn index is implied by position and rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailRecord {
    pub turns: Vec<TurnRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub score: u64,
}

impl From<DetailRecord> for ArchivedDetail {
    fn from(record: DetailRecord) -> Self {
        let turns = record
            .turns
            .into_iter()
            .enumerate()
            .map(|(i, t)| Turn::new(i as u32 + 1, t.score, t.reason))
            .collect();
        Self {
            turns,
            ended_at: record.ended_at,
        }
    }
}

impl From<ArchivedDetail> for DetailRecord {
    fn from(detail: ArchivedDetail) -> Self {
        Self {
            turns: detail
                .turns
                .into_iter()
                .map(|t| TurnRecord {
                    reason: t.reason,
                    score: t.score,
                })
                .collect(),
            ended_at: detail.ended_at,
        }
    }
}

/// Result of ending a session: where it landed in the archive and what was
/// stored there.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedSession {
    pub index: usize,
    /// The session moyenne, rounded to two decimals.
    pub summary: f64,
    pub detail: ArchivedDetail,
}
