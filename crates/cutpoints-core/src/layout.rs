//! Per-feature partition layout.
//!
//! Counts the distinct values of every feature and decides how many balanced
//! sub-partitions each feature's sorted run is split into, so that no
//! partition holds more than `max_by_part` values.

use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::collection::PartitionedPoints;
use crate::error::CutError;
use crate::point::FeatureIndex;

/// Layout of one feature's sorted values across sub-partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct FeatureLayout {
    /// The feature this entry describes.
    pub feature: FeatureIndex,
    /// Number of distinct values. Features without observations count as one
    /// placeholder value.
    pub n_values: usize,
    /// `true` when the feature has no observed points and `n_values` is the
    /// placeholder.
    pub synthetic: bool,
    /// Running total of `n_values` over all preceding features, placeholders
    /// included.
    pub value_offset: usize,
    /// Target number of values per sub-partition.
    pub part_size: usize,
    /// Number of sub-partitions the feature is split into.
    pub n_parts: usize,
    /// Number of sub-partitions of all preceding features.
    pub part_offset: usize,
}

impl FeatureLayout {
    /// Return the partition ids owned by this feature.
    #[must_use]
    pub fn partitions(&self) -> Range<usize> {
        self.part_offset..self.part_offset + self.n_parts
    }
}

/// Layout entries for every expected feature, ordered by feature index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    entries: Vec<FeatureLayout>,
    total_partitions: usize,
}

impl LayoutPlan {
    /// Return the entries, one per feature in `[0, n_features)`.
    #[must_use]
    pub fn entries(&self) -> &[FeatureLayout] {
        &self.entries
    }

    /// Return the entry of a feature, if it is part of the plan.
    #[must_use]
    pub fn get(&self, feature: FeatureIndex) -> Option<&FeatureLayout> {
        self.entries.get(feature.index())
    }

    /// Return the number of features covered.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.entries.len()
    }

    /// Return the sum of all features' sub-partition counts.
    #[must_use]
    pub fn total_partitions(&self) -> usize {
        self.total_partitions
    }
}

/// Split `n_values` into balanced sub-partitions of at most `max_by_part`.
///
/// Returns `(part_size, n_parts)`. The size is rebalanced so parts are as
/// equal as possible instead of all full but a small last one.
fn split_feature(n_values: usize, max_by_part: usize) -> (usize, usize) {
    let n_parts = n_values.div_ceil(max_by_part);
    let part_size = n_values.div_ceil(n_parts);
    (part_size, n_values.div_ceil(part_size))
}

/// Plan the sub-partition layout of every feature in `[0, n_features)`.
///
/// Features with no observed points receive a synthetic single-value entry,
/// so every expected feature owns at least one partition.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`CutError::InvalidFeatureCount`] | `n_features` is zero |
/// | [`CutError::InvalidMaxByPart`] | `max_by_part` is zero |
/// | [`CutError::FeatureOutOfRange`] | a point's feature is `>= n_features` |
#[instrument(skip(points), fields(n_points = points.len()))]
pub fn plan_layout(
    points: &PartitionedPoints,
    max_by_part: usize,
    n_features: usize,
) -> Result<LayoutPlan, CutError> {
    if n_features == 0 {
        return Err(CutError::InvalidFeatureCount { n_features });
    }
    if max_by_part == 0 {
        return Err(CutError::InvalidMaxByPart { max_by_part });
    }

    // Indexing by feature keeps the counts sorted by feature.
    let observed: Vec<usize> = points
        .partitions()
        .par_iter()
        .map(|part| {
            let mut counts = vec![0usize; n_features];
            for point in part {
                let feature = point.feature.index();
                if feature >= n_features {
                    return Err(CutError::FeatureOutOfRange {
                        feature,
                        n_features,
                    });
                }
                counts[feature] += 1;
            }
            Ok(counts)
        })
        .try_reduce(
            || vec![0usize; n_features],
            |mut acc, counts| {
                for (a, c) in acc.iter_mut().zip(counts) {
                    *a += c;
                }
                Ok(acc)
            },
        )?;

    let mut entries = Vec::with_capacity(n_features);
    let mut value_offset = 0usize;
    let mut part_offset = 0usize;
    for (feature, &n_observed) in observed.iter().enumerate() {
        let synthetic = n_observed == 0;
        let n_values = n_observed.max(1);
        let (part_size, n_parts) = split_feature(n_values, max_by_part);
        entries.push(FeatureLayout {
            feature: FeatureIndex::new(feature),
            n_values,
            synthetic,
            value_offset,
            part_size,
            n_parts,
            part_offset,
        });
        value_offset += n_values;
        part_offset += n_parts;
    }

    let n_synthetic = entries.iter().filter(|e| e.synthetic).count();
    debug!(
        total_partitions = part_offset,
        total_values = value_offset,
        n_synthetic,
        "layout planned"
    );

    Ok(LayoutPlan {
        entries,
        total_partitions: part_offset,
    })
}
