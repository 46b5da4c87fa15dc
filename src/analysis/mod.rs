//! Distribution analysis.
//!
//! Read-only fairness metrics over a completed [`Allocation`](crate::allocation::Allocation),
//! rebalance suggestions, and an explicit cache the caller owns.
//!
//! Every metric is deterministic: analyzing the same allocation twice
//! yields identical scores.

mod cache;
mod metrics;

pub use cache::{AnalysisCache, DEFAULT_CACHE_CAPACITY};
pub use metrics::{
    analyze, analyze_with_continuity, DistributionMetrics, RebalanceSuggestion, ScholarLoad,
};
