use std::fmt;
use std::ops::AddAssign;

/// Zero-based feature column index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct FeatureIndex(usize);

impl FeatureIndex {
    /// Create a new feature index from a zero-based column position.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based feature column index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-class occurrence counts for a single value or a range of values.
///
/// Position `i` holds the number of training examples with class label `i`.
/// All vectors taking part in one search share the same length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LabelCounts(Vec<u64>);

impl LabelCounts {
    /// Wrap a vector of per-label counts.
    #[must_use]
    pub fn new(counts: Vec<u64>) -> Self {
        Self(counts)
    }

    /// All-zero counts for `n_labels` classes.
    #[must_use]
    pub fn zeros(n_labels: usize) -> Self {
        Self(vec![0; n_labels])
    }

    /// Return the number of label positions.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.0.len()
    }

    /// Return the counts as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Return the total number of examples across all labels.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0, |acc, &c| acc.saturating_add(c))
    }

    /// Return how many labels have a positive count.
    #[must_use]
    pub fn n_present(&self) -> usize {
        self.0.iter().filter(|&&c| c > 0).count()
    }
}

impl From<Vec<u64>> for LabelCounts {
    fn from(counts: Vec<u64>) -> Self {
        Self(counts)
    }
}

impl AsRef<[u64]> for LabelCounts {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

impl AddAssign<&LabelCounts> for LabelCounts {
    fn add_assign(&mut self, rhs: &LabelCounts) {
        debug_assert_eq!(self.0.len(), rhs.0.len(), "label vectors differ in length");
        for (acc, &c) in self.0.iter_mut().zip(&rhs.0) {
            *acc = acc.saturating_add(c);
        }
    }
}

/// One distinct observed value of one feature with its class distribution.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Feature the value belongs to.
    pub feature: FeatureIndex,
    /// The observed value. May be NaN.
    pub value: f64,
    /// How many examples of each class take this value.
    pub counts: LabelCounts,
}

impl Point {
    /// Create a point from a raw feature index, value and label counts.
    #[must_use]
    pub fn new(feature: usize, value: f64, counts: impl Into<LabelCounts>) -> Self {
        Self {
            feature: FeatureIndex::new(feature),
            value,
            counts: counts.into(),
        }
    }
}

/// A candidate cut point closing one range of a feature's values.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    /// Feature the cut applies to.
    pub feature: FeatureIndex,
    /// Threshold value: the midpoint between the two flanking points, or the
    /// last value of the range when nothing follows it.
    pub threshold: f64,
    /// Summed label counts of every point in the range ending here.
    pub counts: LabelCounts,
}

#[cfg(test)]
mod tests {
    use super::{FeatureIndex, LabelCounts, Point};

    // --- FeatureIndex ---

    #[test]
    fn feature_index_roundtrip() {
        let fi = FeatureIndex::new(7);
        assert_eq!(fi.index(), 7);
    }

    #[test]
    fn feature_index_display() {
        let fi = FeatureIndex::new(3);
        assert_eq!(format!("{fi}"), "3");
    }

    #[test]
    fn feature_index_ordering() {
        assert!(FeatureIndex::new(1) < FeatureIndex::new(5));
    }

    // --- LabelCounts ---

    #[test]
    fn zeros_has_requested_width() {
        let counts = LabelCounts::zeros(4);
        assert_eq!(counts.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(counts.n_labels(), 4);
    }

    #[test]
    fn add_assign_is_elementwise() {
        let mut acc = LabelCounts::new(vec![1, 0, 2]);
        acc += &LabelCounts::new(vec![3, 4, 0]);
        assert_eq!(acc.as_slice(), &[4, 4, 2]);
    }

    #[test]
    fn add_assign_saturates() {
        let mut acc = LabelCounts::new(vec![u64::MAX - 1, 3]);
        acc += &LabelCounts::new(vec![5, 4]);
        assert_eq!(acc.as_slice(), &[u64::MAX, 7]);
    }

    #[test]
    fn total_and_present() {
        let counts = LabelCounts::new(vec![5, 0, 2, 0]);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.n_present(), 2);
    }

    // --- Point ---

    #[test]
    fn point_new_wraps_feature() {
        let p = Point::new(2, 1.5, vec![1, 0]);
        assert_eq!(p.feature, FeatureIndex::new(2));
        assert_eq!(p.counts.as_slice(), &[1, 0]);
    }
}
