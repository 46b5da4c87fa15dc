//! Distribution quality metrics.
//!
//! Computes fairness indicators from a completed allocation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Balance score | `max(0, 100 - 100 * stddev / mean)` of active scholar totals |
//! | Continuity score | Fraction of procedures kept with yesterday's scholar |
//! | Specialization score | `100 * mean(1 / distinct scholars)` per procedure type |
//! | Point spread | Heaviest minus lightest active total |
//!
//! A scholar is active when posted or carrying work.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::allocation::Allocation;
use crate::continuity::ContinuityMap;
use crate::models::{Assignment, Tier};

/// Allocation fairness indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionMetrics {
    /// 0..100, higher = more even totals.
    pub balance_score: f64,
    /// 0.0..1.0; `None` when no continuity map was supplied.
    pub continuity_score: Option<f64>,
    /// 0..100, higher = fewer scholars per procedure type.
    pub specialization_score: f64,
    /// Mean active scholar total.
    pub mean_points: f64,
    /// Population standard deviation of active totals.
    pub std_dev: f64,
    /// Heaviest minus lightest active total.
    pub point_spread: u32,
    /// Per-scholar load, in allocation order.
    pub loads: Vec<ScholarLoad>,
}

/// One scholar's load summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarLoad {
    pub scholar_id: String,
    pub scholar_name: String,
    pub tier: Tier,
    pub is_active: bool,
    pub total_points: u32,
    pub target_points: f64,
}

/// A suggested move between two scholars of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceSuggestion {
    pub tier: Tier,
    /// Heaviest scholar in the tier.
    pub from_scholar: String,
    /// Lightest scholar in the tier.
    pub to_scholar: String,
    /// Point gap between the two.
    pub gap: u32,
}

/// Computes metrics without continuity information.
pub fn analyze(allocation: &Allocation) -> DistributionMetrics {
    DistributionMetrics::calculate(allocation, None)
}

/// Computes metrics, scoring continuity against `continuity`.
pub fn analyze_with_continuity(allocation: &Allocation, continuity: &ContinuityMap) -> DistributionMetrics {
    DistributionMetrics::calculate(allocation, Some(continuity))
}

impl DistributionMetrics {
    /// Computes metrics from an allocation.
    pub fn calculate(allocation: &Allocation, continuity: Option<&ContinuityMap>) -> Self {
        let loads: Vec<ScholarLoad> = allocation.assignments.iter().map(ScholarLoad::from).collect();
        let active: Vec<f64> = loads
            .iter()
            .filter(|l| l.is_active)
            .map(|l| l.total_points as f64)
            .collect();

        let (mean_points, std_dev) = if active.is_empty() {
            (0.0, 0.0)
        } else {
            let n = active.len() as f64;
            let mean = active.iter().sum::<f64>() / n;
            let variance = active.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            (mean, variance.sqrt())
        };

        let balance_score = if mean_points > 0.0 {
            (100.0 - 100.0 * std_dev / mean_points).max(0.0)
        } else {
            100.0
        };

        let active_totals = loads.iter().filter(|l| l.is_active).map(|l| l.total_points);
        let point_spread = match (active_totals.clone().max(), active_totals.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };

        Self {
            balance_score,
            continuity_score: continuity.map(|map| continuity_score(&allocation.assignments, map)),
            specialization_score: specialization_score(&allocation.assignments),
            mean_points,
            std_dev,
            point_spread,
            loads,
        }
    }

    /// Whether balance reaches `min_balance`.
    pub fn meets_threshold(&self, min_balance: f64) -> bool {
        self.balance_score >= min_balance
    }

    /// Same-tier moves worth considering: for each tier, the heaviest and
    /// lightest active scholars when their gap exceeds `threshold`.
    pub fn suggestions(&self, threshold: u32) -> Vec<RebalanceSuggestion> {
        let mut out = Vec::new();
        for tier in Tier::ALL {
            let in_tier: Vec<&ScholarLoad> = self
                .loads
                .iter()
                .filter(|l| l.is_active && l.tier == tier)
                .collect();
            // First maximum / first minimum, so input order breaks ties.
            let heaviest = in_tier.iter().rev().max_by_key(|l| l.total_points);
            let lightest = in_tier.iter().min_by_key(|l| l.total_points);
            if let (Some(h), Some(l)) = (heaviest, lightest) {
                let gap = h.total_points - l.total_points;
                if gap > threshold {
                    out.push(RebalanceSuggestion {
                        tier,
                        from_scholar: h.scholar_id.clone(),
                        to_scholar: l.scholar_id.clone(),
                        gap,
                    });
                }
            }
        }
        out
    }
}

impl From<&Assignment> for ScholarLoad {
    fn from(a: &Assignment) -> Self {
        Self {
            scholar_id: a.scholar.id.clone(),
            scholar_name: a.scholar.name.clone(),
            tier: a.scholar.tier,
            is_active: a.scholar.is_posted || a.total_points > 0,
            total_points: a.total_points,
            target_points: a.target_points,
        }
    }
}

fn continuity_score(assignments: &[Assignment], continuity: &ContinuityMap) -> f64 {
    let mut total = 0usize;
    let mut kept = 0usize;
    for a in assignments {
        for item in &a.procedures {
            total += 1;
            if continuity.scholar_for(&item.patient_name) == Some(a.scholar.name.as_str()) {
                kept += 1;
            }
        }
    }
    if total == 0 {
        1.0
    } else {
        kept as f64 / total as f64
    }
}

fn specialization_score(assignments: &[Assignment]) -> f64 {
    let mut handlers: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for a in assignments {
        for item in &a.procedures {
            handlers
                .entry(item.procedure.id.as_str())
                .or_default()
                .insert(a.scholar.id.as_str());
        }
    }
    if handlers.is_empty() {
        return 100.0;
    }
    let sum: f64 = handlers.values().map(|s| 1.0 / s.len() as f64).sum();
    100.0 * sum / handlers.len() as f64
}
