//! Plain-text rendering for the terminal front end.

use std::fmt::Write;

use crate::models::{format_two, DetailProjection, DetailRow, SessionStats};
use crate::stats::{OverallStats, ProjectionRow};

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One-line live session summary.
pub fn render_stats(stats: &SessionStats, staged: &str) -> String {
    format!(
        "Score {}  Turns {}  Moyenne {}  0s {}  | Add: {}",
        stats.total_score, stats.turn_count, stats.moyenne, stats.zero_count, staged
    )
}

/// Numbered reason choices; `0` is always skip.
pub fn render_reason_picker(choices: &[String]) -> String {
    let mut output = String::from("  0) skip\n");
    for (i, label) in choices.iter().enumerate() {
        let _ = writeln!(output, "  {}) {}", i + 1, label);
    }
    output
}

/// Turn table of an archived session, with reasons nested under their turn.
///
/// Example output:
/// ```text
/// Turn  Score  Total
///    1      2      2
///    2      0      2
///          └ Kiss
///    3      5      7
/// ```
pub fn render_detail(projection: &DetailProjection) -> String {
    let mut output = String::from("Turn  Score  Total\n");
    for row in &projection.rows {
        match row {
            DetailRow::Turn {
                turn_index,
                score,
                cumulative_total,
            } => {
                let _ = writeln!(
                    output,
                    "{:>4}  {:>5}  {:>5}",
                    turn_index, score, cumulative_total
                );
            }
            DetailRow::Reason { text, .. } => {
                let _ = writeln!(output, "         └ {}", text);
            }
        }
    }
    output
}

/// Cumulative series as a sparkline scaled to its final (largest) value.
pub fn render_sparkline(series: &[u64]) -> String {
    let max = series.iter().copied().max().unwrap_or(0);
    series
        .iter()
        .map(|&value| {
            if max == 0 {
                SPARKS[0]
            } else {
                let level = (u128::from(value) * 7 / u128::from(max)) as usize;
                SPARKS[level]
            }
        })
        .collect()
}

/// Archived session moyennes, numbered from 1.
pub fn render_history(summaries: &[f64]) -> String {
    let mut output = String::new();
    for (i, moyenne) in summaries.iter().enumerate() {
        let _ = writeln!(output, "{:>4}. {}", i + 1, format_two(*moyenne));
    }
    output
}

pub fn render_overall(overall: &OverallStats) -> String {
    let mut output = format!(
        "Sessions {}  Avg Moyenne {}  Score Target {}\n",
        overall.sessions,
        format_two(overall.moyenne),
        overall.score_target
    );
    for (target, required) in &overall.next_game {
        let required = required.map(format_two).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(output, "  Target {}: next game {}", format_two(*target), required);
    }
    output
}

/// Needed-points grid: one row per target, one column per turn count.
pub fn render_projections(rows: &[ProjectionRow]) -> String {
    let mut output = String::from("Target\\Turns");
    if let Some(first) = rows.first() {
        for cell in &first.cells {
            let _ = write!(output, " {:>4}", cell.turns);
        }
    }
    output.push('\n');

    for row in rows {
        let _ = write!(output, "{:>12}", format_two(row.target));
        for cell in &row.cells {
            let _ = write!(output, " {:>4}", cell.needed_score);
        }
        output.push('\n');
    }
    output
}
