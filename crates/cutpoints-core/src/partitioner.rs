//! Feature-aware partition assignment.

use crate::layout::LayoutPlan;
use crate::point::FeatureIndex;

/// Key of a point during the exact repartition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    /// Feature of the point.
    pub feature: FeatureIndex,
    /// Value of the point.
    pub value: f64,
    /// Dense zero-based position of the point in the global sort order.
    pub sort_index: usize,
}

/// Maps sort keys to partition ids following a [`LayoutPlan`].
///
/// All points of a feature land in that feature's contiguous run of
/// partitions, bucketed into consecutive groups of `part_size` values in
/// global sort order. A partition never mixes features.
#[derive(Debug, Clone, Copy)]
pub struct FeaturePartitioner<'a> {
    layout: &'a LayoutPlan,
}

impl<'a> FeaturePartitioner<'a> {
    /// Create a partitioner over a planned layout.
    #[must_use]
    pub fn new(layout: &'a LayoutPlan) -> Self {
        Self { layout }
    }

    /// Return the number of partitions keys are mapped into.
    #[must_use]
    pub fn num_partitions(&self) -> usize {
        self.layout.total_partitions()
    }

    /// Return the partition id of a key, in `[0, num_partitions())`.
    ///
    /// # Panics
    ///
    /// Panics if the key's feature is not covered by the layout. The layout
    /// planner rejects such features before a partitioner is built.
    #[must_use]
    pub fn partition(&self, key: &SortKey) -> usize {
        let entry = &self.layout.entries()[key.feature.index()];
        let local = key.sort_index.saturating_sub(entry.value_offset + 1);
        entry.part_offset + local / entry.part_size
    }
}
