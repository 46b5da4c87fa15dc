//! Error types.

use thiserror::Error;

/// Errors raised at the construction boundary (tiers, grades, config).
///
/// The allocation engine itself never returns these; it degrades to
/// unassigned patients instead.
#[derive(Debug, Error)]
pub enum RotaError {
    #[error("invalid seniority tier {0}: expected 1, 2 or 3")]
    InvalidTier(u8),

    #[error("invalid procedure grade {0}: expected 1, 2 or 3")]
    InvalidGrade(u8),

    #[error("invalid gender '{0}': expected M or F")]
    InvalidGender(String),

    #[error("invalid allocation config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RotaError>;
