use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Half-open interval `[start, end)`.
///
/// Equality is exact bound equality, there is no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeRange { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date < self.end
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    fn overlaps_or_touches(&self, other: &TimeRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Union of both ranges.
    ///
    /// Returns a single range spanning both if they overlap or touch,
    /// otherwise both ranges unchanged, earliest first.
    pub fn plus(&self, other: &TimeRange) -> Vec<TimeRange> {
        if self.overlaps_or_touches(other) {
            return vec![TimeRange {
                start: self.start.min(other.start),
                end: self.end.max(other.end),
            }];
        }
        if self.start <= other.start {
            vec![*self, *other]
        } else {
            vec![*other, *self]
        }
    }

    /// Parts of `self` not covered by `other`: zero, one or two ranges.
    pub fn minus(&self, other: &TimeRange) -> Vec<TimeRange> {
        let mut remainders = Vec::with_capacity(2);
        if other.start > self.start {
            remainders.push(TimeRange {
                start: self.start,
                end: other.start.min(self.end),
            });
        }
        if other.end < self.end {
            remainders.push(TimeRange {
                start: other.end.max(self.start),
                end: self.end,
            });
        }
        remainders.retain(|range| !range.is_empty());
        remainders
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 1, d, 0, 0, 0).unwrap()
    }

    fn range(from: u32, to: u32) -> TimeRange {
        TimeRange::new(day(from), day(to))
    }

    #[test]
    fn plus_merges_overlapping_ranges() {
        assert_eq!(range(1, 5).plus(&range(3, 8)), vec![range(1, 8)]);
        assert_eq!(range(3, 8).plus(&range(1, 5)), vec![range(1, 8)]);
        assert_eq!(range(1, 10).plus(&range(3, 5)), vec![range(1, 10)]);
    }

    #[test]
    fn plus_merges_touching_ranges() {
        assert_eq!(range(1, 3).plus(&range(3, 6)), vec![range(1, 6)]);
    }

    #[test]
    fn plus_keeps_disjoint_ranges_ordered() {
        assert_eq!(range(8, 9).plus(&range(1, 3)), vec![range(1, 3), range(8, 9)]);
        assert_eq!(range(1, 3).plus(&range(8, 9)), vec![range(1, 3), range(8, 9)]);
    }

    #[test]
    fn minus_splits_around_inner_range() {
        assert_eq!(range(1, 10).minus(&range(3, 5)), vec![range(1, 3), range(5, 10)]);
    }

    #[test]
    fn minus_keeps_single_remainder() {
        assert_eq!(range(2, 10).minus(&range(1, 5)), vec![range(5, 10)]);
        assert_eq!(range(2, 10).minus(&range(2, 5)), vec![range(5, 10)]);
        assert_eq!(range(1, 10).minus(&range(5, 12)), vec![range(1, 5)]);
    }

    #[test]
    fn minus_covering_range_is_empty() {
        assert_eq!(range(3, 5).minus(&range(1, 10)), vec![]);
    }

    #[test]
    fn minus_disjoint_range_keeps_self() {
        assert_eq!(range(3, 5).minus(&range(7, 10)), vec![range(3, 5)]);
        assert_eq!(range(7, 10).minus(&range(3, 5)), vec![range(7, 10)]);
    }

    fn arb_range() -> impl Strategy<Value = TimeRange> {
        (0i64..1_000_000, 1i64..1_000_000).prop_map(|(start, len)| {
            TimeRange::new(
                DateTime::from_timestamp(start, 0).unwrap(),
                DateTime::from_timestamp(start + len, 0).unwrap(),
            )
        })
    }

    proptest! {
        #[test]
        fn range_algebra_is_idempotent(r in arb_range()) {
            prop_assert!(r.minus(&r).is_empty());
            prop_assert_eq!(r.plus(&r), vec![r]);
        }

        #[test]
        fn minus_never_overlaps_subtracted_range(a in arb_range(), b in arb_range()) {
            for remainder in a.minus(&b) {
                prop_assert!(!remainder.overlaps(&b));
                prop_assert!(a.start <= remainder.start && remainder.end <= a.end);
            }
        }

        #[test]
        fn plus_covers_both_ranges(a in arb_range(), b in arb_range()) {
            let union = a.plus(&b);
            for r in [a, b] {
                prop_assert!(union.iter().any(|u| u.start <= r.start && r.end <= u.end));
            }
        }
    }
}
