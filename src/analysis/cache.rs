//! Caller-owned metrics cache.
//!
//! Entries are keyed by the content the metrics read: scholar identity and
//! tier, posting flags, totals and targets, placed procedures, and the
//! continuity map. Keys are compared in full on lookup, so two allocations
//! never share an entry. The cache holds at most `capacity` entries and
//! evicts the oldest first. Nothing is cached process-wide.

use std::collections::{HashMap, VecDeque};

use super::metrics::DistributionMetrics;
use crate::allocation::Allocation;
use crate::continuity::ContinuityMap;

/// Entry limit for [`AnalysisCache::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Memoizes [`DistributionMetrics`] per allocation content.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    entries: HashMap<ContentKey, DistributionMetrics>,
    /// Insertion order for eviction.
    order: VecDeque<ContentKey>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

/// Everything [`DistributionMetrics::calculate`] depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ContentKey {
    scholars: Vec<ScholarKey>,
    continuity: Option<Vec<(String, String)>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScholarKey {
    id: String,
    name: String,
    tier: u8,
    is_posted: bool,
    total_points: u32,
    target_bits: u64,
    /// (patient id, patient name, procedure id) in placement order.
    items: Vec<(String, String, String)>,
}

impl ContentKey {
    fn new(allocation: &Allocation, continuity: Option<&ContinuityMap>) -> Self {
        let scholars = allocation
            .assignments
            .iter()
            .map(|a| ScholarKey {
                id: a.scholar.id.clone(),
                name: a.scholar.name.clone(),
                tier: a.scholar.tier.level(),
                is_posted: a.scholar.is_posted,
                total_points: a.total_points,
                target_bits: a.target_points.to_bits(),
                items: a
                    .procedures
                    .iter()
                    .map(|item| {
                        (
                            item.patient_id.clone(),
                            item.patient_name.clone(),
                            item.procedure.id.clone(),
                        )
                    })
                    .collect(),
            })
            .collect();
        let continuity = continuity.map(|map| {
            map.iter()
                .map(|(p, s)| (p.to_string(), s.to_string()))
                .collect()
        });
        Self {
            scholars,
            continuity,
        }
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl AnalysisCache {
    /// Creates an empty cache holding up to [`DEFAULT_CACHE_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache holding up to `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns cached metrics, computing them on a miss.
    pub fn get_or_analyze(
        &mut self,
        allocation: &Allocation,
        continuity: Option<&ContinuityMap>,
    ) -> &DistributionMetrics {
        let key = ContentKey::new(allocation, continuity);
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            while self.entries.len() >= self.capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            self.order.push_back(key.clone());
            self.entries
                .insert(key.clone(), DistributionMetrics::calculate(allocation, continuity));
        }
        &self.entries[&key]
    }

    /// Drops every entry. Call when postings, patients, or continuity change
    /// for a day whose metrics are held elsewhere.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
