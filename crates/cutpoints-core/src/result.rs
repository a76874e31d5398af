//! Search result types.

use crate::config::ScanMode;
use crate::layout::LayoutPlan;
use crate::point::{Candidate, FeatureIndex};

/// Metadata about a search run.
#[derive(Debug, Clone)]
pub struct SearchMetadata {
    /// Strategy used.
    pub mode: ScanMode,
    /// Number of input points.
    pub n_points: usize,
    /// Expected number of features.
    pub n_features: usize,
    /// Label vector width.
    pub n_labels: usize,
    /// Number of partitions in the input collection.
    pub n_input_partitions: usize,
    /// Number of partitions actually scanned. Equals the layout's
    /// `total_partitions` in exact mode and the input count in fast mode.
    pub n_scan_partitions: usize,
}

/// Result of a candidate search.
///
/// Candidates of one feature appear in ascending threshold order.
#[derive(Debug)]
pub struct CandidateResult {
    candidates: Vec<Candidate>,
    layout: Option<LayoutPlan>,
    metadata: SearchMetadata,
}

impl CandidateResult {
    /// Create a new search result.
    pub(crate) fn new(
        candidates: Vec<Candidate>,
        layout: Option<LayoutPlan>,
        metadata: SearchMetadata,
    ) -> Self {
        Self {
            candidates,
            layout,
            metadata,
        }
    }

    /// Borrow all candidates.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Consume the result and return the candidates.
    #[must_use]
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    /// Iterate over the candidates of one feature.
    pub fn for_feature(&self, feature: FeatureIndex) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(move |c| c.feature == feature)
    }

    /// Return the number of candidates per feature, indexed by feature.
    #[must_use]
    pub fn counts_per_feature(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.metadata.n_features];
        for c in &self.candidates {
            counts[c.feature.index()] += 1;
        }
        counts
    }

    /// Return the feature layout. Only planned in exact mode.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutPlan> {
        self.layout.as_ref()
    }

    /// Return run metadata.
    #[must_use]
    pub fn metadata(&self) -> &SearchMetadata {
        &self.metadata
    }
}
