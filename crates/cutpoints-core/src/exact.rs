//! Exact search: global reindex, feature-aware repartition, scan.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::collection::PartitionedPoints;
use crate::layout::LayoutPlan;
use crate::partitioner::{FeaturePartitioner, SortKey};
use crate::point::{Candidate, Point};
use crate::scan::{PartitionScan, scan_partition};

/// Group every point into the partition chosen by the layout.
///
/// Each point first receives its dense global sort index (the partition's
/// starting offset plus its position inside the partition). Input order is
/// the global sort order, so appending keeps every bucket ascending.
fn repartition<'a>(points: &'a PartitionedPoints, layout: &LayoutPlan) -> Vec<Vec<&'a Point>> {
    let partitioner = FeaturePartitioner::new(layout);
    let offsets = points.partition_offsets();

    let keyed: Vec<Vec<(usize, &'a Point)>> = points
        .partitions()
        .par_iter()
        .zip(offsets.par_iter())
        .map(|(part, &start)| {
            part.iter()
                .enumerate()
                .map(|(i, point)| {
                    let key = SortKey {
                        feature: point.feature,
                        value: point.value,
                        sort_index: start + i,
                    };
                    (partitioner.partition(&key), point)
                })
                .collect()
        })
        .collect();

    let mut buckets: Vec<Vec<&'a Point>> = vec![Vec::new(); partitioner.num_partitions()];
    for (id, point) in keyed.into_iter().flatten() {
        buckets[id].push(point);
    }
    buckets
}

/// Find candidates with the exact strategy.
///
/// Partitions produced by the repartition hold a single feature each. After
/// the parallel scans, each feature's sub-partitions are joined in order, so
/// a range that crosses a sub-partition seam is reported once, exactly as a
/// single sequential scan would. The output does not depend on
/// `max_by_part` or on the input partitioning.
#[instrument(skip_all, fields(n_points = points.len(), total_partitions = layout.total_partitions()))]
pub(crate) fn find_exact(points: &PartitionedPoints, layout: &LayoutPlan) -> Vec<Candidate> {
    let buckets = repartition(points, layout);
    let n_empty = buckets.iter().filter(|b| b.is_empty()).count();
    debug!(
        n_buckets = buckets.len(),
        n_empty,
        largest = buckets.iter().map(Vec::len).max().unwrap_or(0),
        "repartition complete"
    );

    let scans: Vec<Option<PartitionScan<'_>>> = buckets
        .par_iter()
        .map(|bucket| scan_partition(bucket.iter().copied()))
        .collect();

    let mut scans = scans.into_iter();
    let mut candidates = Vec::new();
    for entry in layout.entries() {
        let joined = scans
            .by_ref()
            .take(entry.n_parts)
            .flatten()
            .reduce(PartitionScan::join);
        if let Some(scan) = joined {
            candidates.extend(scan.close());
        }
    }
    debug!(n_candidates = candidates.len(), "sub-partition scans joined");
    candidates
}
