//! Within-column ordering
//!
//! Pinned cards come first, keeping their relative order; remaining
//! cards are ordered by `updated_at` descending. Ordering is always
//! recomputed, never stored — only the pinned flag persists.

use crate::types::Task;
use std::cmp::Ordering;

/// Sort a column's tasks in place: pinned first (stable among
/// themselves), then most recently updated first.
pub fn sort_column(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| match (a.pinned, b.pinned) {
        // Stable sort keeps the relative order of pinned cards
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => b.updated_at.cmp(&a.updated_at),
    });
}

/// Index at which a card with the given (pinned, updated_at) key should
/// be inserted to keep the column ordered. Used for optimistic placement.
pub fn insertion_index(
    keys: impl Iterator<Item = (bool, chrono::DateTime<chrono::Utc>)>,
    pinned: bool,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> usize {
    let mut index = 0;
    for (other_pinned, other_updated) in keys {
        let precedes = match (other_pinned, pinned) {
            (true, true) => true, // append after existing pinned cards
            (true, false) => true,
            (false, true) => false,
            (false, false) => other_updated >= updated_at,
        };
        if precedes {
            index += 1;
        } else {
            break;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, pinned: bool, day: u32) -> Task {
        Task::new(id, id, "Backlog", "p1")
            .with_pinned(pinned)
            .with_updated_at(Utc.with_ymd_and_hms(2026, 8, day, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_pinned_first_then_recency() {
        let a = task("a", false, 3);
        let b = task("b", true, 1);
        let c = task("c", false, 9);
        let d = task("d", true, 2);

        let mut column: Vec<&Task> = vec![&a, &b, &c, &d];
        sort_column(&mut column);

        let ids: Vec<&str> = column.iter().map(|t| t.id.as_str()).collect();
        // b and d keep their relative order; c is newer than a
        assert_eq!(ids, ["b", "d", "c", "a"]);
    }

    #[test]
    fn test_no_unpinned_precedes_pinned() {
        let tasks: Vec<Task> = (1..=10)
            .map(|i| task(&format!("t{i}"), i % 3 == 0, i))
            .collect();
        let mut column: Vec<&Task> = tasks.iter().collect();
        sort_column(&mut column);

        let first_unpinned = column.iter().position(|t| !t.pinned).unwrap();
        assert!(
            column[first_unpinned..].iter().all(|t| !t.pinned),
            "pinned card found after an unpinned one"
        );
    }

    #[test]
    fn test_insertion_index_matches_sort() {
        let a = task("a", true, 5);
        let b = task("b", false, 9);
        let c = task("c", false, 2);
        let column = [&a, &b, &c];
        let keys = || column.iter().map(|t| (t.pinned, t.updated_at));

        // A new unpinned card from day 7 lands between b and c
        let day7 = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();
        assert_eq!(insertion_index(keys(), false, day7), 2);

        // A new pinned card appends after the existing pinned block
        let day1 = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(insertion_index(keys(), true, day1), 1);
    }
}
