//! Procedure model.
//!
//! A procedure is a graded clinical task. The grade (1-3) classifies
//! intensity and fixes the point value; points are copied onto each
//! instance so load arithmetic never needs the catalog.

use serde::{Deserialize, Serialize};

use crate::error::RotaError;

/// Procedure intensity grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    /// Routine bedside task.
    One,
    /// Intermediate task.
    Two,
    /// Invasive or skilled task.
    Three,
}

impl Grade {
    /// Point value carried by procedures of this grade.
    pub fn points(self) -> u32 {
        match self {
            Grade::One => 1,
            Grade::Two => 2,
            Grade::Three => 3,
        }
    }

    /// Numeric grade (1-3).
    pub fn level(self) -> u8 {
        match self {
            Grade::One => 1,
            Grade::Two => 2,
            Grade::Three => 3,
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = RotaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Grade::One),
            2 => Ok(Grade::Two),
            3 => Ok(Grade::Three),
            other => Err(RotaError::InvalidGrade(other)),
        }
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.level()
    }
}

/// A procedure instance attached to a patient.
///
/// Deserialization recomputes `points` from `grade`; a stored point value
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredProcedure")]
pub struct Procedure {
    /// Catalog identifier (e.g., "iv_cannulation").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Intensity grade.
    pub grade: Grade,
    /// Point value (denormalized from the grade).
    pub points: u32,
}

impl Procedure {
    /// Creates a procedure; points follow the grade.
    pub fn new(id: impl Into<String>, name: impl Into<String>, grade: Grade) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade,
            points: grade.points(),
        }
    }
}

/// Wire form of a [`Procedure`]. A stored `points` field is skipped as unknown.
#[derive(Deserialize)]
struct StoredProcedure {
    id: String,
    name: String,
    grade: Grade,
}

impl From<StoredProcedure> for Procedure {
    fn from(stored: StoredProcedure) -> Self {
        Procedure::new(stored.id, stored.name, stored.grade)
    }
}
