//! Patient model.
//!
//! A patient carries an ordered list of procedures for the day. Attendants
//! accompany a patient but receive no procedures and never enter allocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Procedure;
use crate::error::RotaError;

/// Patient or scholar gender, used for same-gender matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(alias = "M", alias = "male")]
    Male,
    #[serde(alias = "F", alias = "female")]
    Female,
}

impl Gender {
    /// The other gender.
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    /// Single-letter code ("M" / "F").
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = RotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(RotaError::InvalidGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A patient entered for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier.
    pub id: String,
    /// Patient name (continuity is keyed by name).
    pub name: String,
    pub gender: Gender,
    /// Procedures in entry order.
    pub procedures: Vec<Procedure>,
    /// Attendants are excluded from allocation.
    #[serde(default)]
    pub is_attendant: bool,
}

impl Patient {
    /// Creates a patient with no procedures.
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            procedures: Vec::new(),
            is_attendant: false,
        }
    }

    /// Creates an attendant.
    pub fn attendant(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            is_attendant: true,
            ..Self::new(id, name, gender)
        }
    }

    /// Adds a procedure.
    pub fn with_procedure(mut self, procedure: Procedure) -> Self {
        self.procedures.push(procedure);
        self
    }

    /// Adds several procedures.
    pub fn with_procedures(mut self, procedures: impl IntoIterator<Item = Procedure>) -> Self {
        self.procedures.extend(procedures);
        self
    }

    /// Removes every procedure with the given catalog id. Returns how many were removed.
    pub fn remove_procedure(&mut self, procedure_id: &str) -> usize {
        let before = self.procedures.len();
        self.procedures.retain(|p| p.id != procedure_id);
        before - self.procedures.len()
    }

    /// Sum of procedure points.
    pub fn total_points(&self) -> u32 {
        self.procedures.iter().map(|p| p.points).sum()
    }

    /// Whether this patient takes part in allocation.
    pub fn needs_allocation(&self) -> bool {
        !self.is_attendant && !self.procedures.is_empty()
    }

    /// First procedure whose id appears in `restricted`, if any.
    pub fn restricted_procedure<'a>(&'a self, restricted: &[String]) -> Option<&'a Procedure> {
        self.procedures
            .iter()
            .find(|p| restricted.iter().any(|r| r == &p.id))
    }
}
