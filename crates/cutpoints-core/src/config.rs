//! Configuration builder for candidate cut point search.

use std::fmt;

use crate::collection::PartitionedPoints;
use crate::error::CutError;
use crate::result::CandidateResult;

/// Strategy used to reconcile ranges that cross partition seams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Reindex and repartition by feature layout. Deterministic, and
    /// independent of partition counts.
    Exact,
    /// Scan the existing partitions and fix only the trailing seam of each
    /// from the next partition's first point. May emit extra candidates at
    /// seams.
    Fast,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Exact => write!(f, "exact"),
            ScanMode::Fast => write!(f, "fast"),
        }
    }
}

/// Configuration for candidate cut point search.
///
/// Construct via [`CandidateConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter     | Default  |
/// |---------------|----------|
/// | `max_by_part` | 10 000   |
/// | `mode`        | `Exact`  |
#[derive(Debug, Clone)]
pub struct CandidateConfig {
    pub(crate) n_features: usize,
    pub(crate) n_labels: usize,
    pub(crate) max_by_part: usize,
    pub(crate) mode: ScanMode,
}

impl CandidateConfig {
    /// Create a new config for `n_features` features and `n_labels` classes.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`CutError::InvalidFeatureCount`] | `n_features` is zero |
    /// | [`CutError::InvalidLabelCount`] | `n_labels` is zero |
    pub fn new(n_features: usize, n_labels: usize) -> Result<Self, CutError> {
        if n_features == 0 {
            return Err(CutError::InvalidFeatureCount { n_features });
        }
        if n_labels == 0 {
            return Err(CutError::InvalidLabelCount { n_labels });
        }
        Ok(Self {
            n_features,
            n_labels,
            max_by_part: 10_000,
            mode: ScanMode::Exact,
        })
    }

    /// Set the maximum number of values per partition in the exact layout.
    #[must_use]
    pub fn with_max_by_part(mut self, max_by_part: usize) -> Self {
        self.max_by_part = max_by_part;
        self
    }

    /// Set the seam reconciliation strategy.
    #[must_use]
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Return the expected number of features.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the label vector width.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.n_labels
    }

    /// Return the per-partition value budget.
    #[must_use]
    pub fn max_by_part(&self) -> usize {
        self.max_by_part
    }

    /// Return the scan mode.
    #[must_use]
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Find candidate cut points in a sorted, partitioned point collection.
    ///
    /// # Errors
    ///
    /// | Variant                          | When                                           |
    /// |----------------------------------|------------------------------------------------|
    /// | [`CutError::LabelWidthMismatch`] | `points` were built for a different `n_labels` |
    /// | [`CutError::InvalidMaxByPart`]   | `max_by_part` is zero                          |
    /// | [`CutError::FeatureOutOfRange`]  | a point's feature is `>= n_features`           |
    pub fn find(&self, points: &PartitionedPoints) -> Result<CandidateResult, CutError> {
        crate::search::find_candidates(self, points)
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateConfig, ScanMode};
    use crate::error::CutError;

    #[test]
    fn defaults_are_correct() {
        let cfg = CandidateConfig::new(3, 2).unwrap();
        assert_eq!(cfg.n_features(), 3);
        assert_eq!(cfg.n_labels(), 2);
        assert_eq!(cfg.max_by_part(), 10_000);
        assert_eq!(cfg.mode(), ScanMode::Exact);
    }

    #[test]
    fn builder_chaining() {
        let cfg = CandidateConfig::new(1, 4)
            .unwrap()
            .with_max_by_part(64)
            .with_mode(ScanMode::Fast);
        assert_eq!(cfg.max_by_part(), 64);
        assert_eq!(cfg.mode(), ScanMode::Fast);
    }

    #[test]
    fn zero_features_rejected() {
        assert!(matches!(
            CandidateConfig::new(0, 2),
            Err(CutError::InvalidFeatureCount { n_features: 0 })
        ));
    }

    #[test]
    fn zero_labels_rejected() {
        assert!(matches!(
            CandidateConfig::new(2, 0),
            Err(CutError::InvalidLabelCount { n_labels: 0 })
        ));
    }

    #[test]
    fn mode_display() {
        assert_eq!(ScanMode::Exact.to_string(), "exact");
        assert_eq!(ScanMode::Fast.to_string(), "fast");
    }
}
