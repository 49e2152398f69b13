use serde::Serialize;

/// One line of the archived-session table.
///
/// A reason row directly follows the turn it belongs to and is not counted
/// as a turn of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailRow {
    Turn {
        turn_index: u32,
        score: u64,
        /// Sum of scores up to and including this turn.
        cumulative_total: u64,
    },
    Reason {
        turn_index: u32,
        text: String,
    },
}

/// Table rows plus the cumulative-score series of one archived session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailProjection {
    pub rows: Vec<DetailRow>,
    /// Cumulative score after each turn; one point per turn.
    pub series: Vec<u64>,
}

impl DetailProjection {
    /// `(turn index, cumulative score)` chart coordinates.
    pub fn points(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.series
            .iter()
            .enumerate()
            .map(|(i, &total)| (i as u32 + 1, total))
    }
}
