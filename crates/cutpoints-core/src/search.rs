//! Candidate search entry point shared by both strategies.

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::collection::PartitionedPoints;
use crate::config::{CandidateConfig, ScanMode};
use crate::error::CutError;
use crate::exact::find_exact;
use crate::fast::find_fast;
use crate::layout::plan_layout;
use crate::result::{CandidateResult, SearchMetadata};

/// Reject points whose feature lies outside `[0, n_features)`.
///
/// The exact path gets this from the layout planner; the fast path has no
/// layout and checks separately.
fn check_feature_range(points: &PartitionedPoints, n_features: usize) -> Result<(), CutError> {
    let bad = points
        .partitions()
        .par_iter()
        .find_map_first(|part| part.iter().find(|p| p.feature.index() >= n_features));
    match bad {
        Some(point) => Err(CutError::FeatureOutOfRange {
            feature: point.feature.index(),
            n_features,
        }),
        None => Ok(()),
    }
}

/// Run the configured search.
#[instrument(skip_all, fields(mode = %config.mode, n_points = points.len()))]
pub(crate) fn find_candidates(
    config: &CandidateConfig,
    points: &PartitionedPoints,
) -> Result<CandidateResult, CutError> {
    if points.n_labels() != config.n_labels {
        return Err(CutError::LabelWidthMismatch {
            expected: config.n_labels,
            got: points.n_labels(),
        });
    }
    if config.max_by_part == 0 {
        return Err(CutError::InvalidMaxByPart {
            max_by_part: config.max_by_part,
        });
    }

    info!(
        mode = %config.mode,
        n_points = points.len(),
        n_partitions = points.n_partitions(),
        n_features = config.n_features,
        n_labels = config.n_labels,
        max_by_part = config.max_by_part,
        "searching candidate cut points"
    );

    let (candidates, layout) = match config.mode {
        ScanMode::Exact => {
            let layout = plan_layout(points, config.max_by_part, config.n_features)?;
            (find_exact(points, &layout), Some(layout))
        }
        ScanMode::Fast => {
            check_feature_range(points, config.n_features)?;
            (find_fast(points), None)
        }
    };

    let metadata = SearchMetadata {
        mode: config.mode,
        n_points: points.len(),
        n_features: config.n_features,
        n_labels: config.n_labels,
        n_input_partitions: points.n_partitions(),
        n_scan_partitions: layout
            .as_ref()
            .map_or(points.n_partitions(), |l| l.total_partitions()),
    };

    info!(
        n_candidates = candidates.len(),
        n_scan_partitions = metadata.n_scan_partitions,
        "candidate search complete"
    );

    Ok(CandidateResult::new(candidates, layout, metadata))
}
