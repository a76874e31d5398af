//! Domain types for cutpoints-io.

use cutpoints_core::{PartitionedPoints, Point};

use crate::IoError;

/// Points loaded from a CSV file, in global `(feature, value)` order.
///
/// Produced by [`PointReader`](crate::PointReader). Every point carries one
/// count per entry of `label_names`.
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Vec<Point>,
    label_names: Vec<String>,
}

impl PointSet {
    pub(crate) fn new(points: Vec<Point>, label_names: Vec<String>) -> Self {
        Self {
            points,
            label_names,
        }
    }

    /// Return the points in sort order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Return the label column names from the CSV header.
    #[must_use]
    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Return the label vector width.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.label_names.len()
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` if the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return one past the highest observed feature index.
    ///
    /// Used as the feature count when the caller does not supply one.
    #[must_use]
    pub fn n_features_observed(&self) -> usize {
        self.points.last().map_or(0, |p| p.feature.index() + 1)
    }

    /// Split the points into `n_partitions` contiguous partitions.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Core`] wrapping
    /// [`CutError::InvalidPartitionCount`](cutpoints_core::CutError::InvalidPartitionCount)
    /// if `n_partitions` is zero.
    pub fn into_partitioned(self, n_partitions: usize) -> Result<PartitionedPoints, IoError> {
        let n_labels = self.n_labels();
        Ok(PartitionedPoints::from_sorted(
            self.points,
            n_partitions,
            n_labels,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::PointSet;
    use crate::IoError;
    use cutpoints_core::{CutError, Point};

    fn set() -> PointSet {
        PointSet::new(
            vec![
                Point::new(0, 1.0, vec![1, 0]),
                Point::new(0, 2.0, vec![0, 1]),
                Point::new(3, 0.5, vec![2, 2]),
            ],
            vec!["yes".into(), "no".into()],
        )
    }

    #[test]
    fn observed_features_from_last_point() {
        assert_eq!(set().n_features_observed(), 4);
        assert_eq!(PointSet::new(vec![], vec!["a".into()]).n_features_observed(), 0);
    }

    #[test]
    fn into_partitioned_keeps_order() {
        let coll = set().into_partitioned(2).unwrap();
        assert_eq!(coll.n_partitions(), 2);
        assert_eq!(coll.n_labels(), 2);
        let values: Vec<f64> = coll.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 0.5]);
    }

    #[test]
    fn zero_partitions_is_core_error() {
        let err = set().into_partitioned(0).unwrap_err();
        assert!(matches!(
            err,
            IoError::Core(CutError::InvalidPartitionCount { n_partitions: 0 })
        ));
    }
}
