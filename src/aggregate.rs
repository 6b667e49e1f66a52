//! Per-column point totals and per-card progress ratios

use crate::schema::WorkflowSchema;
use crate::types::{Points, Status};
use serde::{Deserialize, Serialize};

/// Point totals displayed in a column header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAggregates {
    /// Σ total, with missing/zero totals counted as 1 so unsized tasks
    /// still carry nominal weight
    pub total_points: u64,
    /// Σ total − Σ done over raw totals. Negative is a valid displayed
    /// state (overflow), never clamped.
    pub remaining_points: i64,
    /// Σ review
    pub review_points: u64,
}

impl ColumnAggregates {
    /// Accumulate aggregates over a column's point records
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Points>) -> Self {
        let mut agg = Self::default();
        for p in points {
            agg.total_points += match p.total {
                None | Some(0) => 1,
                Some(total) => u64::from(total),
            };
            agg.remaining_points +=
                i64::from(p.total.unwrap_or(0)) - i64::from(p.done);
            agg.review_points += u64::from(p.review);
        }
        agg
    }
}

/// Completion percentage shown on a card.
///
/// Terminal statuses always read 100; otherwise `floor(done/total × 100)`
/// with an unsized task reading 0.
pub fn progress_ratio(points: &Points, status: &Status, schema: &WorkflowSchema) -> u32 {
    if schema.is_terminal(status) {
        return 100;
    }
    match points.total {
        None | Some(0) => 0,
        Some(total) => points.done * 100 / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{labels, KanbanStyle};

    #[test]
    fn test_unsized_tasks_count_as_one() {
        // Totals [1, missing, 3] => 5
        let points = [
            Points::sized(1),
            Points::default(),
            Points::sized(3),
        ];
        let agg = ColumnAggregates::from_points(points.iter());
        assert_eq!(agg.total_points, 5);
    }

    #[test]
    fn test_remaining_uses_raw_totals() {
        let points = [Points::sized(5).with_done(2), Points::default().with_done(1)];
        let agg = ColumnAggregates::from_points(points.iter());
        // (5 - 2) + (0 - 1) = 2
        assert_eq!(agg.remaining_points, 2);
    }

    #[test]
    fn test_negative_remaining_is_preserved() {
        let points = [Points::sized(2).with_done(7)];
        let agg = ColumnAggregates::from_points(points.iter());
        assert_eq!(agg.remaining_points, -5);
    }

    #[test]
    fn test_review_points() {
        let points = [
            Points::sized(3).with_review(2),
            Points::sized(1).with_review(1),
        ];
        let agg = ColumnAggregates::from_points(points.iter());
        assert_eq!(agg.review_points, 3);
    }

    #[test]
    fn test_progress_ratio() {
        let schema = WorkflowSchema::new(KanbanStyle::Default, false);
        let doing = Status::from(labels::IN_PROGRESS);

        assert_eq!(progress_ratio(&Points::sized(4).with_done(1), &doing, &schema), 25);
        assert_eq!(progress_ratio(&Points::sized(3).with_done(1), &doing, &schema), 33);
        assert_eq!(progress_ratio(&Points::default(), &doing, &schema), 0);
        assert_eq!(progress_ratio(&Points::sized(0), &doing, &schema), 0);

        // Terminal status reads 100 regardless of points
        let done = Status::from(labels::DONE);
        assert_eq!(progress_ratio(&Points::default(), &done, &schema), 100);
    }
}
