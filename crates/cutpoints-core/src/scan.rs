//! Sequential range scan over one partition.
//!
//! Both search strategies share this fold: consecutive points are merged
//! into a range until a boundary (or a feature change) closes it. What
//! happens to the range still open at the end of a partition is up to the
//! strategy.

use crate::boundary::{is_boundary, midpoint};
use crate::point::{Candidate, LabelCounts, Point};

/// Fold state of a partition scan.
///
/// `closed` holds the candidates emitted so far, `open` the counts of the
/// range that is still accumulating and ends at `last`.
#[derive(Debug, Clone)]
pub(crate) struct PartitionScan<'a> {
    pub(crate) closed: Vec<Candidate>,
    pub(crate) first: &'a Point,
    pub(crate) last: &'a Point,
    pub(crate) open: LabelCounts,
}

impl<'a> PartitionScan<'a> {
    fn start(first: &'a Point) -> Self {
        Self {
            closed: Vec::new(),
            first,
            last: first,
            open: first.counts.clone(),
        }
    }

    /// Fold the next point in sort order into the scan.
    fn step(mut self, point: &'a Point) -> Self {
        let threshold = if point.feature != self.last.feature {
            // Distributions never merge across features.
            Some(self.last.value)
        } else if is_boundary(&self.last.counts, &point.counts) {
            Some(midpoint(self.last.value, point.value))
        } else {
            None
        };

        match threshold {
            Some(threshold) => {
                let counts = std::mem::replace(&mut self.open, point.counts.clone());
                self.closed.push(Candidate {
                    feature: self.last.feature,
                    threshold,
                    counts,
                });
            }
            None => self.open += &point.counts,
        }
        self.last = point;
        self
    }

    /// Append the scan of the partition that directly follows this one.
    ///
    /// The result is identical to scanning both partitions as one. If the
    /// seam is a boundary the open range closes at the seam midpoint,
    /// otherwise it flows into the first range of `next`. Callers only join
    /// partitions of the same feature.
    pub(crate) fn join(mut self, mut next: PartitionScan<'a>) -> Self {
        debug_assert_eq!(self.last.feature, next.first.feature);
        if is_boundary(&self.last.counts, &next.first.counts) {
            let threshold = midpoint(self.last.value, next.first.value);
            let counts = std::mem::replace(&mut self.open, next.open);
            self.closed.push(Candidate {
                feature: self.last.feature,
                threshold,
                counts,
            });
        } else {
            match next.closed.first_mut() {
                Some(head) => {
                    head.counts += &self.open;
                    self.open = next.open;
                }
                None => {
                    self.open += &next.open;
                }
            }
        }
        self.closed.append(&mut next.closed);
        self.last = next.last;
        self
    }

    /// Close the open range at `threshold` and return every candidate.
    pub(crate) fn close_at(mut self, threshold: f64) -> Vec<Candidate> {
        self.closed.push(Candidate {
            feature: self.last.feature,
            threshold,
            counts: self.open,
        });
        self.closed
    }

    /// Close the open range at the last scanned value.
    pub(crate) fn close(self) -> Vec<Candidate> {
        let threshold = self.last.value;
        self.close_at(threshold)
    }
}

/// Scan points in order, returning `None` for an empty partition.
pub(crate) fn scan_partition<'a, I>(points: I) -> Option<PartitionScan<'a>>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(PartitionScan::start(first), PartitionScan::step))
}
