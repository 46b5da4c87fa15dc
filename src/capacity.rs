//! Capacity policy.
//!
//! Two-phase patient quotas per seniority tier. Phase 1 fills every scholar
//! up to `base`; phase 2 continues up to `max`. Quotas count patients, not
//! points.
//!
//! | Tier | Base | Max |
//! |------|------|-----|
//! | 1 (junior) | 3 | 4 |
//! | 2 | 2 | 3 |
//! | 3 (senior) | 1 | 2 |

use serde::{Deserialize, Serialize};

use crate::models::Tier;

/// Patient quota for one scholar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// Phase 1 limit.
    pub base: usize,
    /// Phase 2 limit.
    pub max: usize,
}

/// Allocation phase under quota gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fill to base quota.
    Base,
    /// Fill to max quota.
    Max,
}

impl Phase {
    /// Phases in the order they are applied.
    pub const ORDER: [Phase; 2] = [Phase::Base, Phase::Max];
}

impl Quota {
    /// Limit applying in the given phase.
    pub fn limit(self, phase: Phase) -> usize {
        match phase {
            Phase::Base => self.base,
            Phase::Max => self.max,
        }
    }

    /// Whether a scholar holding `patients` may take another in `phase`.
    pub fn admits(self, patients: usize, phase: Phase) -> bool {
        patients < self.limit(phase)
    }
}

/// Quota for a tier.
pub fn quota_for(tier: Tier) -> Quota {
    match tier {
        Tier::Junior => Quota { base: 3, max: 4 },
        Tier::Middle => Quota { base: 2, max: 3 },
        Tier::Senior => Quota { base: 1, max: 2 },
    }
}
