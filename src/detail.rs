//! Turn table and cumulative-score series for an archived session.

use crate::models::{ArchivedDetail, DetailProjection, DetailRow};

/// Derive the display rows and chart series of one archived session.
pub fn project(detail: &ArchivedDetail) -> DetailProjection {
    let mut rows = Vec::with_capacity(detail.turns.len());
    let mut series = Vec::with_capacity(detail.turns.len());
    let mut cumulative: u64 = 0;

    for turn in &detail.turns {
        cumulative = cumulative.saturating_add(turn.score);
        rows.push(DetailRow::Turn {
            turn_index: turn.index,
            score: turn.score,
            cumulative_total: cumulative,
        });
        if let Some(text) = &turn.reason {
            rows.push(DetailRow::Reason {
                turn_index: turn.index,
                text: text.clone(),
            });
        }
        series.push(cumulative);
    }

    DetailProjection { rows, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Turn;

    fn detail(turns: &[(u64, Option<&str>)]) -> ArchivedDetail {
        ArchivedDetail::new(
            turns
                .iter()
                .enumerate()
                .map(|(i, (score, reason))| {
                    Turn::new(i as u32 + 1, *score, reason.map(str::to_string))
                })
                .collect(),
            None,
        )
    }

    fn cumulative_totals(projection: &DetailProjection) -> Vec<u64> {
        projection
            .rows
            .iter()
            .filter_map(|row| match row {
                DetailRow::Turn {
                    cumulative_total, ..
                } => Some(*cumulative_total),
                DetailRow::Reason { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_prefix_sums() {
        let projection = project(&detail(&[(2, None), (5, None), (3, None)]));
        assert_eq!(cumulative_totals(&projection), vec![2, 7, 10]);
        assert_eq!(projection.series, vec![2, 7, 10]);
    }

    #[test]
    fn test_reason_row_follows_its_turn() {
        let projection = project(&detail(&[(0, Some("Kiss")), (4, None)]));

        assert_eq!(
            projection.rows,
            vec![
                DetailRow::Turn {
                    turn_index: 1,
                    score: 0,
                    cumulative_total: 0
                },
                DetailRow::Reason {
                    turn_index: 1,
                    text: "Kiss".to_string()
                },
                DetailRow::Turn {
                    turn_index: 2,
                    score: 4,
                    cumulative_total: 4
                },
            ]
        );
        assert_eq!(projection.series.len(), 2);
    }

    #[test]
    fn test_row_count_is_turns_plus_reasons() {
        let projection = project(&detail(&[
            (1, Some("Too thin")),
            (0, Some("Kiss")),
            (3, None),
            (0, None),
        ]));
        assert_eq!(projection.rows.len(), 4 + 2);
        let turn_rows = projection
            .rows
            .iter()
            .filter(|row| matches!(row, DetailRow::Turn { .. }));
        assert_eq!(turn_rows.count(), 4);
    }

    #[test]
    fn test_points_are_one_based() {
        let projection = project(&detail(&[(2, None), (5, None)]));
        let points: Vec<(u32, u64)> = projection.points().collect();
        assert_eq!(points, vec![(1, 2), (2, 7)]);
    }

    #[test]
    fn test_empty_session() {
        let projection = project(&detail(&[]));
        assert!(projection.rows.is_empty());
        assert!(projection.series.is_empty());
    }
}
