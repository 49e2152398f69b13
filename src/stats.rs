//! Targets and projections derived from live stats and the archive.
//!
//! Target moyennes are handled in integer hundredths so that thresholds
//! such as `0.90 × 10 turns = 9 points` compare exactly.

use serde::Serialize;

use crate::models::SessionStats;

/// Number of stepped targets in a projection table.
pub const PROJECTION_TARGETS: u64 = 3;

/// A target moyenne as whole hundredths, e.g. `0.90` → `90`.
pub fn to_hundredths(target: f64) -> u64 {
    (target * 100.0).round().max(0.0) as u64
}

/// Mean of the given session moyennes; 0 when there are none.
pub fn overall_moyenne(summaries: &[f64]) -> f64 {
    if summaries.is_empty() {
        return 0.0;
    }
    summaries.iter().sum::<f64>() / summaries.len() as f64
}

/// Points expected over a match of `turns` turns at the given moyenne.
pub fn score_target(moyenne: f64, turns: u32) -> u64 {
    (moyenne * f64::from(turns)).floor().max(0.0) as u64
}

/// Smallest number of points still to score within `turns_ahead` turns so
/// that the session moyenne reaches `target`.
pub fn score_needed(score: u64, played: u32, target: f64, turns_ahead: u32) -> u64 {
    let turns = u128::from(played) + u128::from(turns_ahead);
    let required = (u128::from(to_hundredths(target)) * turns).div_ceil(100);
    let needed = required.saturating_sub(u128::from(score));
    u64::try_from(needed).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionCell {
    pub turns: u32,
    pub needed_score: u64,
    pub needed_per_turn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub target: f64,
    pub cells: Vec<ProjectionCell>,
}

/// Points needed within 1..=`columns` turns for the base target and the
/// next stepped targets.
pub fn projection_table(
    stats: &SessionStats,
    target: f64,
    step: f64,
    columns: u32,
) -> Vec<ProjectionRow> {
    let base = to_hundredths(target);
    let step = to_hundredths(step);

    (0..PROJECTION_TARGETS)
        .map(|k| {
            let target = (base + step * k) as f64 / 100.0;
            let cells = (1..=columns)
                .map(|turns| {
                    let needed_score =
                        score_needed(stats.total_score, stats.turn_count, target, turns);
                    ProjectionCell {
                        turns,
                        needed_score,
                        needed_per_turn: needed_score as f64 / f64::from(turns),
                    }
                })
                .collect();
            ProjectionRow { target, cells }
        })
        .collect()
}

/// Moyenne needed over the next `games` sessions for the rolling average of
/// the last `window` sessions to reach `target`.
///
/// `None` until `window` sessions are archived, or when `games` is not in
/// `1..=window`.
pub fn required_moyenne(
    summaries: &[f64],
    window: usize,
    target: f64,
    games: usize,
) -> Option<f64> {
    if games == 0 || games > window || summaries.len() < window {
        return None;
    }

    let kept = window - games;
    let kept_sum: f64 = summaries[summaries.len() - kept..].iter().sum();
    let required = (window as f64 * target - kept_sum) / games as f64;
    Some(required.max(0.0))
}

/// Archive-wide figures shown next to the session history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub sessions: usize,
    /// Mean moyenne over the rolling window.
    pub moyenne: f64,
    pub score_target: u64,
    /// `(target, moyenne needed next game)` for each stepped target.
    pub next_game: Vec<(f64, Option<f64>)>,
}

impl OverallStats {
    /// `recent` holds the last `window` summaries (fewer while the archive is
    /// shorter); `sessions` is the size of the whole archive.
    pub fn compute(
        recent: &[f64],
        sessions: usize,
        window: usize,
        match_turns: u32,
        target: f64,
        step: f64,
    ) -> Self {
        let moyenne = overall_moyenne(recent);
        let base = to_hundredths(target);
        let step = to_hundredths(step);

        let next_game = (0..PROJECTION_TARGETS)
            .map(|k| {
                let target = (base + step * k) as f64 / 100.0;
                (target, required_moyenne(recent, window, target, 1))
            })
            .collect();

        Self {
            sessions,
            moyenne,
            score_target: score_target(moyenne, match_turns),
            next_game,
        }
    }
}
