//! Day record: the storage-facing data contract.
//!
//! A day record bundles a date's patients and scholars (with that day's
//! posting flags) and, once allocation has run, the assignment array. The
//! stored assignments feed the next day's [`ContinuityMap`](crate::continuity::ContinuityMap).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::allocation::Allocation;
use crate::models::{Assignment, Patient, Scholar};

/// Everything recorded for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub scholars: Vec<Scholar>,
    /// Allocation output, empty until allocation has run.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl DayRecord {
    /// Creates an empty record.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            patients: Vec::new(),
            scholars: Vec::new(),
            assignments: Vec::new(),
        }
    }

    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    pub fn with_scholars(mut self, scholars: Vec<Scholar>) -> Self {
        self.scholars = scholars;
        self
    }

    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments = assignments;
        self
    }

    /// Stores an allocation result as the day's assignments.
    pub fn with_allocation(self, allocation: &Allocation) -> Self {
        self.with_assignments(allocation.assignments.clone())
    }

    /// Whether any procedure has been recorded as assigned.
    pub fn has_assignments(&self) -> bool {
        self.assignments.iter().any(|a| !a.is_empty())
    }
}
