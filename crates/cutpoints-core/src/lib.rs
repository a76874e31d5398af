//! Candidate cut point search for MDLP discretization.
//!
//! Takes `(feature, value)` points with per-class label counts, sorted
//! globally and split into partitions, and emits every boundary threshold at
//! which a class distribution changes, together with the counts accumulated
//! since the previous threshold. Two strategies are provided: an exact one
//! that repartitions by feature layout, and a fast one that scans the input
//! partitions as they are.

mod boundary;
mod collection;
mod config;
mod error;
mod exact;
mod fast;
mod layout;
mod partitioner;
mod point;
mod result;
mod scan;
mod search;

pub use boundary::{is_boundary, midpoint};
pub use collection::PartitionedPoints;
pub use config::{CandidateConfig, ScanMode};
pub use error::CutError;
pub use layout::{FeatureLayout, LayoutPlan, plan_layout};
pub use partitioner::{FeaturePartitioner, SortKey};
pub use point::{Candidate, FeatureIndex, LabelCounts, Point};
pub use result::{CandidateResult, SearchMetadata};
