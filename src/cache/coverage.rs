// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Covered-range bookkeeping with gap detection
//!
//! This module tracks which calendar days already have authoritative data and
//! computes the minimal list of sub-ranges that still need to be fetched for a
//! requested window. Ranges are inclusive on both ends; gap boundaries are
//! derived by stepping one day before or after a covered range.

use std::cmp::{max, min};

use crate::types::day::CalendarDay;
use crate::types::range::DateRange;

/// Normalize a list of ranges into sorted, disjoint, non-adjacent spans
///
/// Empty ranges are dropped. Ranges that overlap or touch (one ends the day
/// before the next starts) are folded into a single span. The result is the
/// same regardless of the input order, and merging an already merged list
/// returns it unchanged.
///
/// # Examples
///
/// ```
/// use slotscan::{merge_ranges, DateRange};
///
/// let merged = merge_ranges(&[
///     DateRange::parse("2024-03-06", "2024-03-10").unwrap(),
///     DateRange::parse("2024-03-01", "2024-03-05").unwrap(),
/// ]);
/// assert_eq!(merged, vec![DateRange::parse("2024-03-01", "2024-03-10").unwrap()]);
/// ```
pub fn merge_ranges(ranges: &[DateRange]) -> Vec<DateRange> {
    let mut sorted: Vec<DateRange> = ranges.iter().copied().filter(|r| !r.is_empty()).collect();
    sorted.sort_by_key(|r| r.start);

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if last.touches(&range) => {
                last.end = max(last.end, range.end);
            }
            _ => merged.push(range),
        }
    }

    merged
}

/// Calculate the sub-ranges of `target` not contained in `covered`
///
/// `covered` does not need to be normalized; it is merged first. The result is
/// sorted, disjoint, and every returned range contains only uncovered days. An
/// empty `target` yields no gaps.
///
/// # Examples
///
/// ```
/// use slotscan::{missing_ranges, DateRange};
///
/// let covered = [
///     DateRange::parse("2024-03-01", "2024-03-10").unwrap(),
///     DateRange::parse("2024-03-15", "2024-03-20").unwrap(),
/// ];
/// let target = DateRange::parse("2024-03-01", "2024-03-20").unwrap();
///
/// assert_eq!(
///     missing_ranges(&covered, target),
///     vec![DateRange::parse("2024-03-11", "2024-03-14").unwrap()]
/// );
/// ```
pub fn missing_ranges(covered: &[DateRange], target: DateRange) -> Vec<DateRange> {
    if target.is_empty() {
        return vec![];
    }

    let merged = merge_ranges(covered);

    let mut gaps = vec![];
    let mut cursor = target.start;

    for range in &merged {
        if range.end < cursor {
            continue;
        }
        if range.start > target.end {
            break;
        }

        if range.start > cursor {
            // cursor < range.start, so the day before range.start exists
            if let Some(before) = range.start.pred() {
                let gap_end = min(before, target.end);
                if gap_end >= cursor {
                    gaps.push(DateRange::new(cursor, gap_end));
                }
            }
        }

        // Move cursor past this range
        match range.end.succ() {
            Some(next) => cursor = max(cursor, next),
            None => return gaps,
        }
        if cursor > target.end {
            return gaps;
        }
    }

    // Trailing gap after the last covered range
    if cursor <= target.end {
        gaps.push(DateRange::new(cursor, target.end));
    }

    gaps
}

/// The set of day ranges a cache holds complete data for
///
/// Always kept maximally merged: sorted by start, no two ranges overlap and no
/// two ranges are adjacent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveredSet {
    ranges: Vec<DateRange>,
}

impl CoveredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a covered set from arbitrary, possibly overlapping ranges
    pub fn from_ranges(ranges: &[DateRange]) -> Self {
        Self {
            ranges: merge_ranges(ranges),
        }
    }

    /// Mark `range` as covered, merging it with neighbouring ranges
    ///
    /// Returns `true` if at least one previously uncovered day became covered.
    pub fn insert(&mut self, range: DateRange) -> bool {
        if range.is_empty() || self.covers(&range) {
            return false;
        }

        // First range that overlaps or touches `range`
        let lo = self
            .ranges
            .partition_point(|r| r.end.succ().is_some_and(|next| next < range.start));
        // One past the last range that overlaps or touches `range`
        let hi = self
            .ranges
            .partition_point(|r| range.end.succ().is_none_or(|next| r.start <= next));

        let merged = if lo < hi {
            DateRange::new(
                min(self.ranges[lo].start, range.start),
                max(self.ranges[hi - 1].end, range.end),
            )
        } else {
            range
        };

        self.ranges.splice(lo..hi, [merged]);
        true
    }

    /// Whether every day of `range` is covered
    ///
    /// An empty range is never considered covered.
    pub fn covers(&self, range: &DateRange) -> bool {
        if range.is_empty() {
            return false;
        }
        let idx = self.ranges.partition_point(|r| r.end < range.start);
        self.ranges
            .get(idx)
            .is_some_and(|candidate| candidate.contains_range(range))
    }

    /// Whether `day` is covered
    pub fn contains_day(&self, day: CalendarDay) -> bool {
        self.covers(&DateRange::single(day))
    }

    /// Sub-ranges of `target` that are not covered
    pub fn missing(&self, target: DateRange) -> Vec<DateRange> {
        missing_ranges(&self.ranges, target)
    }

    /// The normalized covered ranges, in ascending order
    pub fn ranges(&self) -> &[DateRange] {
        &self.ranges
    }

    /// Total number of covered days
    pub fn total_days(&self) -> u64 {
        self.ranges.iter().map(DateRange::len_days).sum()
    }

    /// Number of disjoint covered ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CalendarDay {
        CalendarDay::parse(s).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(day(start), day(end))
    }

    #[test]
    fn test_missing_ranges_empty_cache() {
        let gaps = missing_ranges(&[], range("2024-03-01", "2024-03-31"));
        assert_eq!(gaps, vec![range("2024-03-01", "2024-03-31")]);
    }

    #[test]
    fn test_missing_ranges_covered_prefix_excluded() {
        let covered = [range("2024-03-01", "2024-03-10")];
        let gaps = missing_ranges(&covered, range("2024-03-05", "2024-03-20"));
        assert_eq!(gaps, vec![range("2024-03-11", "2024-03-20")]);
    }

    #[test]
    fn test_missing_ranges_single_gap_between_spans() {
        let covered = [
            range("2024-03-01", "2024-03-10"),
            range("2024-03-15", "2024-03-20"),
        ];
        let gaps = missing_ranges(&covered, range("2024-03-01", "2024-03-20"));
        assert_eq!(gaps, vec![range("2024-03-11", "2024-03-14")]);
    }

    #[test]
    fn test_missing_ranges_gap_at_start() {
        let covered = [range("2024-03-15", "2024-03-31")];
        let gaps = missing_ranges(&covered, range("2024-03-01", "2024-03-31"));
        assert_eq!(gaps, vec![range("2024-03-01", "2024-03-14")]);
    }

    #[test]
    fn test_missing_ranges_surrounding_gaps() {
        let covered = [range("2024-03-10", "2024-03-20")];
        let gaps = missing_ranges(&covered, range("2024-03-01", "2024-03-31"));
        assert_eq!(
            gaps,
            vec![
                range("2024-03-01", "2024-03-09"),
                range("2024-03-21", "2024-03-31")
            ]
        );
    }

    #[test]
    fn test_missing_ranges_fully_covered() {
        let covered = [range("2024-02-01", "2024-04-30")];
        assert!(missing_ranges(&covered, range("2024-03-01", "2024-03-31")).is_empty());
    }

    #[test]
    fn test_missing_ranges_degenerate_target() {
        let gaps = missing_ranges(&[], range("2024-03-10", "2024-03-01"));
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_missing_ranges_single_day_target() {
        let gaps = missing_ranges(&[], DateRange::single(day("2024-03-01")));
        assert_eq!(gaps, vec![range("2024-03-01", "2024-03-01")]);
    }

    #[test]
    fn test_missing_ranges_ignores_covered_outside_target() {
        let covered = [
            range("2024-01-01", "2024-01-31"),
            range("2024-05-01", "2024-05-31"),
        ];
        let gaps = missing_ranges(&covered, range("2024-03-01", "2024-03-31"));
        assert_eq!(gaps, vec![range("2024-03-01", "2024-03-31")]);
    }

    #[test]
    fn test_missing_ranges_unmerged_input() {
        // Overlapping, unsorted and touching input is normalized first
        let covered = [
            range("2024-03-08", "2024-03-12"),
            range("2024-03-01", "2024-03-05"),
            range("2024-03-06", "2024-03-09"),
            range("2024-03-12", "2024-03-11"),
        ];
        let gaps = missing_ranges(&covered, range("2024-03-01", "2024-03-15"));
        assert_eq!(gaps, vec![range("2024-03-13", "2024-03-15")]);
    }

    #[test]
    fn test_missing_ranges_covered_through_calendar_max() {
        let start = CalendarDay::MAX.saturating_sub_days(10);
        let covered = [DateRange::new(start, CalendarDay::MAX)];
        let target = DateRange::new(start.saturating_sub_days(5), CalendarDay::MAX);

        let gaps = missing_ranges(&covered, target);
        assert_eq!(
            gaps,
            vec![DateRange::new(target.start, start.pred().unwrap())]
        );
    }

    #[test]
    fn test_merge_ranges_adjacent_touching() {
        let merged = merge_ranges(&[
            range("2024-03-01", "2024-03-05"),
            range("2024-03-06", "2024-03-10"),
        ]);
        assert_eq!(merged, vec![range("2024-03-01", "2024-03-10")]);
    }

    #[test]
    fn test_merge_ranges_keeps_separated_spans() {
        let merged = merge_ranges(&[
            range("2024-03-07", "2024-03-10"),
            range("2024-03-01", "2024-03-05"),
        ]);
        assert_eq!(
            merged,
            vec![
                range("2024-03-01", "2024-03-05"),
                range("2024-03-07", "2024-03-10")
            ]
        );
    }

    #[test]
    fn test_merge_ranges_contained_range() {
        let merged = merge_ranges(&[
            range("2024-03-01", "2024-03-31"),
            range("2024-03-10", "2024-03-12"),
        ]);
        assert_eq!(merged, vec![range("2024-03-01", "2024-03-31")]);
    }

    #[test]
    fn test_merge_ranges_empty_input() {
        assert!(merge_ranges(&[]).is_empty());
        assert!(merge_ranges(&[range("2024-03-02", "2024-03-01")]).is_empty());
    }

    #[test]
    fn test_covered_set_insert_bridges_neighbours() {
        let mut set = CoveredSet::new();
        assert!(set.insert(range("2024-03-01", "2024-03-05")));
        assert!(set.insert(range("2024-03-10", "2024-03-15")));
        assert_eq!(set.len(), 2);

        // Fills the hole exactly, touching both sides
        assert!(set.insert(range("2024-03-06", "2024-03-09")));
        assert_eq!(set.ranges(), &[range("2024-03-01", "2024-03-15")]);
        assert_eq!(set.total_days(), 15);
    }

    #[test]
    fn test_covered_set_insert_swallows_multiple_ranges() {
        let mut set = CoveredSet::from_ranges(&[
            range("2024-03-01", "2024-03-02"),
            range("2024-03-05", "2024-03-06"),
            range("2024-03-09", "2024-03-10"),
            range("2024-03-20", "2024-03-21"),
        ]);
        set.insert(range("2024-03-02", "2024-03-11"));
        assert_eq!(
            set.ranges(),
            &[
                range("2024-03-01", "2024-03-11"),
                range("2024-03-20", "2024-03-21")
            ]
        );
    }

    #[test]
    fn test_covered_set_insert_already_covered_is_noop() {
        let mut set = CoveredSet::from_ranges(&[range("2024-03-01", "2024-03-31")]);
        assert!(!set.insert(range("2024-03-10", "2024-03-20")));
        assert!(!set.insert(range("2024-03-20", "2024-03-10")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_covered_set_covers_and_contains() {
        let set = CoveredSet::from_ranges(&[
            range("2024-03-01", "2024-03-10"),
            range("2024-03-15", "2024-03-20"),
        ]);
        assert!(set.covers(&range("2024-03-02", "2024-03-09")));
        assert!(!set.covers(&range("2024-03-09", "2024-03-16")));
        assert!(set.contains_day(day("2024-03-15")));
        assert!(!set.contains_day(day("2024-03-12")));
        assert!(!set.contains_day(day("2024-02-29")));
    }

    #[test]
    fn test_covered_set_clear() {
        let mut set = CoveredSet::from_ranges(&[range("2024-03-01", "2024-03-10")]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.total_days(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        fn base() -> CalendarDay {
            CalendarDay::from_ymd(2024, 1, 1).unwrap()
        }

        fn at(offset: u32) -> CalendarDay {
            base().saturating_add_days(offset)
        }

        /// Strategy for generating ranges within roughly one year; some are empty
        fn range_strategy() -> impl Strategy<Value = DateRange> {
            (0u32..400u32, 0u32..45u32).prop_map(|(start, len)| {
                if len == 0 {
                    // Reversed bounds produce an empty range
                    DateRange::new(at(start + 1), at(start))
                } else {
                    DateRange::new(at(start), at(start + len - 1))
                }
            })
        }

        fn ranges_strategy() -> impl Strategy<Value = Vec<DateRange>> {
            prop::collection::vec(range_strategy(), 0..12)
        }

        fn day_set(ranges: &[DateRange]) -> BTreeSet<CalendarDay> {
            ranges.iter().flat_map(|r| r.days()).collect()
        }

        proptest! {
            /// Property: merging is idempotent
            #[test]
            fn test_merge_is_idempotent(ranges in ranges_strategy()) {
                let once = merge_ranges(&ranges);
                let twice = merge_ranges(&once);
                prop_assert_eq!(once, twice);
            }

            /// Property: merged output is sorted, disjoint and non-adjacent, and covers the same days
            #[test]
            fn test_merge_is_normalized(ranges in ranges_strategy()) {
                let merged = merge_ranges(&ranges);
                for pair in merged.windows(2) {
                    prop_assert!(!pair[0].touches(&pair[1]), "{} touches {}", pair[0], pair[1]);
                    prop_assert!(pair[0].end < pair[1].start);
                }
                prop_assert!(merged.iter().all(|r| !r.is_empty()));
                prop_assert_eq!(day_set(&merged), day_set(&ranges));
            }

            /// Property: covered days plus gap days contain every target day
            #[test]
            fn test_gaps_complete_coverage(covered in ranges_strategy(), target in range_strategy()) {
                let gaps = missing_ranges(&covered, target);
                let mut days = day_set(&covered);
                days.extend(day_set(&gaps));

                for day in target.days() {
                    prop_assert!(days.contains(&day), "{} in {} is neither covered nor a gap", day, target);
                }
            }

            /// Property: gaps contain only uncovered days inside the target
            #[test]
            fn test_gaps_are_not_redundant(covered in ranges_strategy(), target in range_strategy()) {
                let gaps = missing_ranges(&covered, target);
                let covered_days = day_set(&covered);

                for gap in &gaps {
                    prop_assert!(!gap.is_empty(), "empty gap emitted");
                    prop_assert!(target.contains_range(gap), "{} escapes {}", gap, target);
                    for day in gap.days() {
                        prop_assert!(!covered_days.contains(&day), "{} in gap {} is covered", day, gap);
                    }
                }
            }

            /// Property: gaps are sorted and separated by at least one covered day
            #[test]
            fn test_gaps_are_minimal(covered in ranges_strategy(), target in range_strategy()) {
                let gaps = missing_ranges(&covered, target);
                for pair in gaps.windows(2) {
                    prop_assert!(!pair[0].touches(&pair[1]), "{} and {} should be one gap", pair[0], pair[1]);
                    prop_assert!(pair[0].end < pair[1].start);
                }
            }

            /// Property: computing gaps twice gives the same answer
            #[test]
            fn test_gaps_are_pure(covered in ranges_strategy(), target in range_strategy()) {
                prop_assert_eq!(missing_ranges(&covered, target), missing_ranges(&covered, target));
            }

            /// Property: incremental inserts agree with a batch merge and never lose days
            #[test]
            fn test_covered_set_grows_monotonically(ranges in ranges_strategy()) {
                let mut set = CoveredSet::new();
                let mut previous = BTreeSet::new();

                for range in &ranges {
                    set.insert(*range);
                    let current = day_set(set.ranges());
                    prop_assert!(current.is_superset(&previous));
                    prop_assert!(current.is_superset(&day_set(&[*range])));
                    previous = current;
                }

                let expected = merge_ranges(&ranges);
                prop_assert_eq!(set.ranges(), expected.as_slice());
            }

            /// Property: after inserting every gap the target is fully covered
            #[test]
            fn test_filling_gaps_covers_target(covered in ranges_strategy(), target in range_strategy()) {
                let mut set = CoveredSet::from_ranges(&covered);
                for gap in set.missing(target) {
                    set.insert(gap);
                }
                prop_assert!(set.missing(target).is_empty());
                if !target.is_empty() {
                    prop_assert!(set.covers(&target));
                }
            }
        }
    }
}
