//! Scholar (trainee staff) model.
//!
//! Scholars are the entities that receive procedures. Each has a seniority
//! tier, a gender for same-gender matching, and a per-day posting flag.
//! Everything except `is_posted` is stable across days.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Gender;
use crate::error::RotaError;

/// A trainee available for allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scholar {
    /// Unique scholar identifier.
    pub id: String,
    /// Display name (continuity references scholars by name).
    pub name: String,
    /// Seniority tier.
    pub tier: Tier,
    pub gender: Gender,
    /// On duty today.
    #[serde(default = "default_posted")]
    pub is_posted: bool,
}

fn default_posted() -> bool {
    true
}

/// Seniority tier by year of training.
///
/// Ordered junior first: `Junior < Middle < Senior`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Tier 1 (first year).
    Junior,
    /// Tier 2.
    Middle,
    /// Tier 3 (final year).
    Senior,
}

impl Tier {
    /// All tiers, junior first.
    pub const ALL: [Tier; 3] = [Tier::Junior, Tier::Middle, Tier::Senior];

    /// Numeric tier (1-3).
    pub fn level(self) -> u8 {
        match self {
            Tier::Junior => 1,
            Tier::Middle => 2,
            Tier::Senior => 3,
        }
    }

    /// Position in [`Tier::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self.level() as usize - 1
    }
}

impl TryFrom<u8> for Tier {
    type Error = RotaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::Junior),
            2 => Ok(Tier::Middle),
            3 => Ok(Tier::Senior),
            other => Err(RotaError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.level()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.level())
    }
}

impl Scholar {
    /// Creates a posted scholar.
    pub fn new(id: impl Into<String>, name: impl Into<String>, tier: Tier, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            gender,
            is_posted: true,
        }
    }

    /// Sets the posting flag.
    pub fn with_posted(mut self, is_posted: bool) -> Self {
        self.is_posted = is_posted;
        self
    }

    /// Marks the scholar as off duty.
    pub fn unposted(self) -> Self {
        self.with_posted(false)
    }
}
