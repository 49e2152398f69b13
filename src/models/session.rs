use super::moyenne::Moyenne;
use super::turn::Turn;

/// The turn ledger of the session in progress.
///
/// The counters always agree with `turns`: `total_score` is the sum of turn
/// scores, `turn_count` its length and `zero_count` the number of scoreless
/// turns. Only [`SessionEngine`](crate::session::SessionEngine) mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub turns: Vec<Turn>,
    pub total_score: u64,
    pub turn_count: u32,
    pub zero_count: u32,
}

impl SessionState {
    pub fn moyenne(&self) -> Moyenne {
        Moyenne::new(self.total_score, u64::from(self.turn_count))
    }
}

/// Live statistics shown while a session is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub total_score: u64,
    pub turn_count: u32,
    pub zero_count: u32,
    pub moyenne: Moyenne,
}

impl From<&SessionState> for SessionStats {
    fn from(state: &SessionState) -> Self {
        Self {
            total_score: state.total_score,
            turn_count: state.turn_count,
            zero_count: state.zero_count,
            moyenne: state.moyenne(),
        }
    }
}
