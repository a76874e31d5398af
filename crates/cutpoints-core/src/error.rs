/// Errors from candidate cut point search.
#[derive(Debug, thiserror::Error)]
pub enum CutError {
    /// Returned when the expected feature count is zero.
    #[error("n_features must be at least 1, got {n_features}")]
    InvalidFeatureCount {
        /// The invalid n_features value provided.
        n_features: usize,
    },

    /// Returned when the label vector width is zero.
    #[error("n_labels must be at least 1, got {n_labels}")]
    InvalidLabelCount {
        /// The invalid n_labels value provided.
        n_labels: usize,
    },

    /// Returned when the per-partition point budget is zero.
    #[error("max_by_part must be at least 1, got {max_by_part}")]
    InvalidMaxByPart {
        /// The invalid max_by_part value provided.
        max_by_part: usize,
    },

    /// Returned when a collection is requested with zero partitions.
    #[error("n_partitions must be at least 1, got {n_partitions}")]
    InvalidPartitionCount {
        /// The invalid n_partitions value provided.
        n_partitions: usize,
    },

    /// Returned when a point refers to a feature outside `[0, n_features)`.
    #[error("feature index {feature} is out of range for {n_features} features")]
    FeatureOutOfRange {
        /// The offending feature index.
        feature: usize,
        /// The expected number of features.
        n_features: usize,
    },

    /// Returned when a point's label vector does not have `n_labels` entries.
    #[error("point {position} of partition {partition} has {got} label counts, expected {expected}")]
    LabelCountMismatch {
        /// Zero-based partition holding the point.
        partition: usize,
        /// Zero-based position of the point inside its partition.
        position: usize,
        /// The label vector width the collection was built with.
        expected: usize,
        /// The actual width of the point's label vector.
        got: usize,
    },

    /// Returned when the configuration and the point collection disagree on
    /// the label vector width.
    #[error("configured for {expected} labels, but the points carry {got}")]
    LabelWidthMismatch {
        /// The configured n_labels.
        expected: usize,
        /// The collection's n_labels.
        got: usize,
    },
}
