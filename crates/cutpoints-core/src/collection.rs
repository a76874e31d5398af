//! Partitioned input collection.
//!
//! [`PartitionedPoints`] stands in for a distributed collection: an ordered
//! list of partitions, each holding a contiguous run of the globally sorted
//! points. Partitions are the unit of parallel work.

use crate::error::CutError;
use crate::point::Point;

/// Globally sorted points split into ordered partitions.
///
/// The concatenation of all partitions, in partition order, is expected to be
/// sorted ascending by `(feature, value)` and unique by that key. Sortedness
/// is a precondition and is not verified here.
#[derive(Debug, Clone)]
pub struct PartitionedPoints {
    partitions: Vec<Vec<Point>>,
    n_labels: usize,
}

impl PartitionedPoints {
    /// Build a collection from pre-partitioned points.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`CutError::InvalidLabelCount`] | `n_labels` is zero |
    /// | [`CutError::LabelCountMismatch`] | a point's label vector is not `n_labels` wide |
    pub fn new(partitions: Vec<Vec<Point>>, n_labels: usize) -> Result<Self, CutError> {
        if n_labels == 0 {
            return Err(CutError::InvalidLabelCount { n_labels });
        }
        for (partition, points) in partitions.iter().enumerate() {
            for (position, point) in points.iter().enumerate() {
                let got = point.counts.n_labels();
                if got != n_labels {
                    return Err(CutError::LabelCountMismatch {
                        partition,
                        position,
                        expected: n_labels,
                        got,
                    });
                }
            }
        }
        Ok(Self {
            partitions,
            n_labels,
        })
    }

    /// Split a sorted vector into `n_partitions` contiguous partitions whose
    /// sizes differ by at most one.
    ///
    /// When there are fewer points than partitions the trailing partitions
    /// are empty.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`CutError::InvalidPartitionCount`] | `n_partitions` is zero |
    /// | [`CutError::InvalidLabelCount`] | `n_labels` is zero |
    /// | [`CutError::LabelCountMismatch`] | a point's label vector is not `n_labels` wide |
    pub fn from_sorted(
        points: Vec<Point>,
        n_partitions: usize,
        n_labels: usize,
    ) -> Result<Self, CutError> {
        if n_partitions == 0 {
            return Err(CutError::InvalidPartitionCount { n_partitions });
        }
        let n = points.len();
        let base = n / n_partitions;
        let rem = n % n_partitions;

        let mut iter = points.into_iter();
        let partitions = (0..n_partitions)
            .map(|i| iter.by_ref().take(base + usize::from(i < rem)).collect())
            .collect();
        Self::new(partitions, n_labels)
    }

    /// Return the label vector width shared by every point.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.n_labels
    }

    /// Return the number of partitions, including empty ones.
    #[must_use]
    pub fn n_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Return the total number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    /// Return `true` if no partition holds a point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(Vec::is_empty)
    }

    /// Borrow the partitions in order.
    #[must_use]
    pub fn partitions(&self) -> &[Vec<Point>] {
        &self.partitions
    }

    /// Iterate over all points in global order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.partitions.iter().flatten()
    }

    /// Global sort index of the first point of every partition.
    ///
    /// This is the exclusive prefix sum of the partition lengths.
    pub(crate) fn partition_offsets(&self) -> Vec<usize> {
        self.partitions
            .iter()
            .scan(0usize, |acc, part| {
                let start = *acc;
                *acc += part.len();
                Some(start)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::PartitionedPoints;
    use crate::error::CutError;
    use crate::point::Point;

    fn points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(0, i as f64, vec![1, 0])).collect()
    }

    #[test]
    fn from_sorted_balances_sizes() {
        let coll = PartitionedPoints::from_sorted(points(10), 3, 2).unwrap();
        let sizes: Vec<usize> = coll.partitions().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(coll.len(), 10);
    }

    #[test]
    fn from_sorted_keeps_global_order() {
        let coll = PartitionedPoints::from_sorted(points(7), 4, 2).unwrap();
        let values: Vec<f64> = coll.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn from_sorted_more_partitions_than_points() {
        let coll = PartitionedPoints::from_sorted(points(2), 5, 2).unwrap();
        assert_eq!(coll.n_partitions(), 5);
        let sizes: Vec<usize> = coll.partitions().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn zero_partitions_rejected() {
        let err = PartitionedPoints::from_sorted(points(3), 0, 2).unwrap_err();
        assert!(matches!(err, CutError::InvalidPartitionCount { n_partitions: 0 }));
    }

    #[test]
    fn zero_labels_rejected() {
        let err = PartitionedPoints::new(vec![], 0).unwrap_err();
        assert!(matches!(err, CutError::InvalidLabelCount { n_labels: 0 }));
    }

    #[test]
    fn short_label_vector_rejected() {
        let parts = vec![
            vec![Point::new(0, 1.0, vec![1, 0])],
            vec![Point::new(0, 2.0, vec![1, 0]), Point::new(0, 3.0, vec![1])],
        ];
        let err = PartitionedPoints::new(parts, 2).unwrap_err();
        assert!(matches!(
            err,
            CutError::LabelCountMismatch {
                partition: 1,
                position: 1,
                expected: 2,
                got: 1,
            }
        ));
    }

    #[test]
    fn partition_offsets_are_prefix_sums() {
        let coll = PartitionedPoints::from_sorted(points(10), 3, 2).unwrap();
        assert_eq!(coll.partition_offsets(), vec![0, 4, 7]);
    }

    #[test]
    fn empty_collection() {
        let coll = PartitionedPoints::new(vec![Vec::new(), Vec::new()], 3).unwrap();
        assert!(coll.is_empty());
        assert_eq!(coll.len(), 0);
        assert_eq!(coll.partition_offsets(), vec![0, 0]);
    }
}
