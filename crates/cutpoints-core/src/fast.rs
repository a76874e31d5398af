//! Fast search over the existing partitioning.
//!
//! Skips the reindex and repartition. Each partition is scanned as it is and
//! only its trailing seam is resolved, using the first point of the next
//! partition. Counts are never merged across a seam, so a range that
//! continues into the next partition is still closed at the seam.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::boundary::midpoint;
use crate::collection::PartitionedPoints;
use crate::point::{Candidate, FeatureIndex};
use crate::scan::scan_partition;

/// First `(feature, value)` of every partition, `None` for empty ones.
fn partition_heads(points: &PartitionedPoints) -> Vec<Option<(FeatureIndex, f64)>> {
    points
        .partitions()
        .par_iter()
        .map(|part| part.first().map(|p| (p.feature, p.value)))
        .collect()
}

/// Find candidates with the fast strategy.
#[instrument(skip_all, fields(n_points = points.len(), n_partitions = points.n_partitions()))]
pub(crate) fn find_fast(points: &PartitionedPoints) -> Vec<Candidate> {
    let heads = partition_heads(points);
    debug!(
        n_nonempty = heads.iter().flatten().count(),
        "partition heads gathered"
    );
    let heads = &heads;

    points
        .partitions()
        .par_iter()
        .enumerate()
        .flat_map_iter(|(index, part)| {
            let Some(scan) = scan_partition(part) else {
                return Vec::new();
            };
            let threshold = match heads.get(index + 1).copied().flatten() {
                Some((feature, value)) if feature == scan.last.feature => {
                    midpoint(scan.last.value, value)
                }
                _ => scan.last.value,
            };
            scan.close_at(threshold)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{find_fast, partition_heads};
    use crate::collection::PartitionedPoints;
    use crate::point::{Candidate, FeatureIndex, Point};

    fn summary(candidates: &[Candidate]) -> Vec<(usize, f64, Vec<u64>)> {
        candidates
            .iter()
            .map(|c| (c.feature.index(), c.threshold, c.counts.as_slice().to_vec()))
            .collect()
    }

    #[test]
    fn heads_mark_empty_partitions() {
        let coll = PartitionedPoints::new(
            vec![
                vec![Point::new(0, 1.0, vec![1])],
                Vec::new(),
                vec![Point::new(1, 7.0, vec![1]), Point::new(1, 8.0, vec![1])],
            ],
            1,
        )
        .unwrap();
        assert_eq!(
            partition_heads(&coll),
            vec![
                Some((FeatureIndex::new(0), 1.0)),
                None,
                Some((FeatureIndex::new(1), 7.0)),
            ]
        );
    }

    #[test]
    fn single_partition_matches_sequential_scan() {
        let points = vec![
            Point::new(0, 1.0, vec![5, 0]),
            Point::new(0, 2.0, vec![5, 0]),
            Point::new(0, 3.0, vec![0, 5]),
            Point::new(1, 0.5, vec![2, 0]),
        ];
        let coll = PartitionedPoints::from_sorted(points, 1, 2).unwrap();
        assert_eq!(
            summary(&find_fast(&coll)),
            vec![
                (0, 2.5, vec![10, 0]),
                (0, 3.0, vec![0, 5]),
                (1, 0.5, vec![2, 0]),
            ]
        );
    }

    #[test]
    fn seam_inside_feature_closes_at_midpoint() {
        let coll = PartitionedPoints::new(
            vec![
                vec![Point::new(0, 1.0, vec![1, 0]), Point::new(0, 2.0, vec![1, 0])],
                vec![Point::new(0, 4.0, vec![1, 0])],
            ],
            2,
        )
        .unwrap();
        assert_eq!(
            summary(&find_fast(&coll)),
            vec![(0, 3.0, vec![2, 0]), (0, 4.0, vec![1, 0])]
        );
    }

    #[test]
    fn seam_between_features_closes_at_last_value() {
        let coll = PartitionedPoints::new(
            vec![
                vec![Point::new(0, 1.0, vec![1, 0]), Point::new(0, 2.0, vec![1, 0])],
                vec![Point::new(1, -5.0, vec![1, 0])],
            ],
            2,
        )
        .unwrap();
        assert_eq!(
            summary(&find_fast(&coll)),
            vec![(0, 2.0, vec![2, 0]), (1, -5.0, vec![1, 0])]
        );
    }

    #[test]
    fn empty_next_partition_closes_at_last_value() {
        let coll = PartitionedPoints::new(
            vec![
                vec![Point::new(0, 1.0, vec![1, 0])],
                Vec::new(),
                vec![Point::new(0, 3.0, vec![1, 0])],
            ],
            2,
        )
        .unwrap();
        assert_eq!(
            summary(&find_fast(&coll)),
            vec![(0, 1.0, vec![1, 0]), (0, 3.0, vec![1, 0])]
        );
    }

    #[test]
    fn seam_midpoint_ignores_nan_head() {
        let coll = PartitionedPoints::new(
            vec![
                vec![Point::new(0, 1.0, vec![1, 0])],
                vec![Point::new(0, f64::NAN, vec![0, 1])],
            ],
            2,
        )
        .unwrap();
        let out = find_fast(&coll);
        assert_eq!(out[0].threshold, 1.0);
        assert!(out[1].threshold.is_nan());
    }

    #[test]
    fn all_empty_partitions() {
        let coll = PartitionedPoints::new(vec![Vec::new(); 4], 3).unwrap();
        assert!(find_fast(&coll).is_empty());
    }
}
