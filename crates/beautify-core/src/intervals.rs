//! Style intervals.
//!
//! Style tags applied to a text surface are stored as half-open char-offset intervals, grouped
//! into layers so that one source of styling can be replaced without touching another.

/// Style ID type
pub type StyleId = u32;

/// Style layer ID
///
/// Distinguishes style sources so that a layer can be replaced or cleared wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleLayerId(pub u32);

impl StyleLayerId {
    /// Create a style layer id from a raw numeric identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Lexical syntax highlighting layer (keywords, strings, numbers, comments).
    pub const SYNTAX: Self = Self(1);
}

/// A styled range `[start, end)` in char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Start offset
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Style ID
    pub style_id: StyleId,
}

impl Interval {
    /// Create a new interval with `[start, end)` offsets and a style id.
    pub fn new(start: usize, end: usize, style_id: StyleId) -> Self {
        Self {
            start,
            end,
            style_id,
        }
    }

    /// Check if the interval contains a position.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if two intervals overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Interval set sorted by start offset.
///
/// Queries binary-search the start offsets and use a running maximum of end offsets to stop
/// scanning backwards early, giving O(log n + k) lookups for typical highlight layers.
#[derive(Debug, Clone, Default)]
pub struct IntervalTree {
    intervals: Vec<Interval>,
    /// `max_end[i]` is the largest `end` among `intervals[..=i]`.
    max_end: Vec<usize>,
}

impl IntervalTree {
    /// Create an empty interval tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from intervals in any order. Empty intervals are dropped.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut intervals: Vec<Interval> =
            intervals.into_iter().filter(|i| i.start < i.end).collect();
        intervals.sort_by_key(|i| i.start);
        let mut tree = Self {
            intervals,
            max_end: Vec::new(),
        };
        tree.recompute_max_end(0);
        tree
    }

    fn recompute_max_end(&mut self, from: usize) {
        self.max_end.resize(self.intervals.len(), 0);
        let mut running = if from == 0 { 0 } else { self.max_end[from - 1] };
        for idx in from..self.intervals.len() {
            running = running.max(self.intervals[idx].end);
            self.max_end[idx] = running;
        }
    }

    /// Insert an interval, keeping start order. Empty intervals are ignored.
    pub fn insert(&mut self, interval: Interval) {
        if interval.start >= interval.end {
            return;
        }
        let pos = self
            .intervals
            .partition_point(|existing| existing.start <= interval.start);
        self.intervals.insert(pos, interval);
        self.recompute_max_end(pos);
    }

    /// All intervals containing `pos`.
    pub fn query_point(&self, pos: usize) -> Vec<&Interval> {
        let upper = self.intervals.partition_point(|i| i.start <= pos);
        let mut hits = Vec::new();
        for idx in (0..upper).rev() {
            if self.max_end[idx] <= pos {
                break;
            }
            if self.intervals[idx].contains(pos) {
                hits.push(&self.intervals[idx]);
            }
        }
        hits.reverse();
        hits
    }

    /// All intervals overlapping `[start, end)`, in start order.
    pub fn query_range(&self, start: usize, end: usize) -> Vec<&Interval> {
        if start >= end {
            return Vec::new();
        }
        let upper = self.intervals.partition_point(|i| i.start < end);
        let mut lower = self.intervals[..upper].partition_point(|i| i.start < start);
        while lower > 0 && self.max_end[lower - 1] > start {
            lower -= 1;
        }
        self.intervals[lower..upper]
            .iter()
            .filter(|i| i.end > start)
            .collect()
    }

    /// Iterate all intervals in start order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    /// Remove every interval.
    pub fn clear(&mut self) {
        self.intervals.clear();
        self.max_end.clear();
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the tree holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_and_range_queries() {
        let tree = IntervalTree::from_intervals(vec![
            Interval::new(10, 20, 3),
            Interval::new(0, 100, 1),
            Interval::new(15, 16, 2),
            Interval::new(5, 5, 9),
        ]);
        assert_eq!(tree.len(), 3);

        let ids: Vec<_> = tree.query_point(15).iter().map(|i| i.style_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(tree.query_point(100).len(), 0);

        let ids: Vec<_> = tree.query_range(16, 18).iter().map(|i| i.style_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(tree.query_range(7, 7).is_empty());
    }

    #[test]
    fn long_interval_is_found_behind_short_ones() {
        let mut tree = IntervalTree::new();
        tree.insert(Interval::new(0, 50, 1));
        for start in 1..10 {
            tree.insert(Interval::new(start, start + 1, 2));
        }
        let hits = tree.query_range(40, 41);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].style_id, 1);

        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.query_point(0).is_empty());
    }
}
