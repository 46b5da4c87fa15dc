//! Allocation configuration.
//!
//! Loaded from JSON; every field has a default so an empty object is a
//! valid config.
//!
//! ```json
//! {
//!   "tier_weights": { "junior": 0.5, "middle": 0.3, "senior": 0.2 },
//!   "gender_restricted": ["urinary_catheterization"],
//!   "quota_mode": "advisory"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, RotaError};
use crate::models::Tier;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Fraction of the fairness pool each tier should carry.
    #[serde(default)]
    pub tier_weights: TierWeights,
    /// Procedure ids that require a same-gender scholar.
    #[serde(default = "default_gender_restricted")]
    pub gender_restricted: Vec<String>,
    /// How the capacity table is applied.
    #[serde(default)]
    pub quota_mode: QuotaMode,
}

/// Per-tier point share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    #[serde(default = "default_junior_weight")]
    pub junior: f64,
    #[serde(default = "default_middle_weight")]
    pub middle: f64,
    #[serde(default = "default_senior_weight")]
    pub senior: f64,
}

/// Capacity table semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaMode {
    /// Quotas never gate placement; overruns are reported.
    #[default]
    Advisory,
    /// Phase 1 (base) then phase 2 (max) quotas are hard gates.
    Enforced,
}

fn default_gender_restricted() -> Vec<String> {
    vec!["urinary_catheterization".to_string()]
}

fn default_junior_weight() -> f64 {
    0.5
}

fn default_middle_weight() -> f64 {
    0.3
}

fn default_senior_weight() -> f64 {
    0.2
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            junior: default_junior_weight(),
            middle: default_middle_weight(),
            senior: default_senior_weight(),
        }
    }
}

impl TierWeights {
    /// Creates weights for tiers 1, 2 and 3.
    pub fn new(junior: f64, middle: f64, senior: f64) -> Self {
        Self {
            junior,
            middle,
            senior,
        }
    }

    /// Weight of one tier.
    pub fn weight(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Junior => self.junior,
            Tier::Middle => self.middle,
            Tier::Senior => self.senior,
        }
    }

    /// Weights renormalized over `present` tiers; absent tiers get 0.
    ///
    /// Falls back to an even split when every present tier weighs 0.
    pub fn normalized(&self, present: &[Tier]) -> [f64; 3] {
        let mut out = [0.0; 3];
        let sum: f64 = present.iter().map(|&t| self.weight(t)).sum();
        for &tier in present {
            out[tier.index()] = if sum > 0.0 {
                self.weight(tier) / sum
            } else {
                1.0 / present.len() as f64
            };
        }
        out
    }

    /// Checks every weight is finite and non-negative with at least one positive.
    pub fn validate(&self) -> Result<()> {
        for tier in Tier::ALL {
            let w = self.weight(tier);
            if !w.is_finite() || w < 0.0 {
                return Err(RotaError::InvalidConfig(format!(
                    "weight for {tier} must be a non-negative number, got {w}"
                )));
            }
        }
        if Tier::ALL.iter().all(|&t| self.weight(t) == 0.0) {
            return Err(RotaError::InvalidConfig(
                "at least one tier weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            tier_weights: TierWeights::default(),
            gender_restricted: default_gender_restricted(),
            quota_mode: QuotaMode::default(),
        }
    }
}

impl AllocationConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks weights are usable.
    pub fn validate(&self) -> Result<()> {
        self.tier_weights.validate()
    }

    /// Whether a procedure id requires same-gender matching.
    pub fn is_gender_restricted(&self, procedure_id: &str) -> bool {
        self.gender_restricted.iter().any(|r| r == procedure_id)
    }
}
