//! Assignment (per-scholar solution) model.
//!
//! One assignment exists per scholar for a day, even when it carries no
//! work, so downstream summaries can rely on exactly one entry per scholar.

use serde::{Deserialize, Serialize};

use super::{Gender, Patient, Procedure, Scholar};

/// A scholar's workload for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The scholar this workload belongs to.
    pub scholar: Scholar,
    /// Assigned procedures in placement order.
    pub procedures: Vec<AssignedProcedure>,
    /// Running total of procedure points.
    pub total_points: u32,
    /// Fair share of the day's point pool for this scholar.
    pub target_points: f64,
}

/// A procedure placed with a scholar, tagged with its patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedProcedure {
    /// Owning patient ID (denormalized for query convenience).
    pub patient_id: String,
    pub patient_name: String,
    pub patient_gender: Gender,
    pub procedure: Procedure,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new(scholar: Scholar) -> Self {
        Self {
            scholar,
            procedures: Vec::new(),
            total_points: 0,
            target_points: 0.0,
        }
    }

    /// Places every procedure of `patient` on this assignment.
    ///
    /// Returns the points added.
    pub fn add_patient(&mut self, patient: &Patient) -> u32 {
        for procedure in &patient.procedures {
            self.procedures.push(AssignedProcedure {
                patient_id: patient.id.clone(),
                patient_name: patient.name.clone(),
                patient_gender: patient.gender,
                procedure: procedure.clone(),
            });
        }
        let added = patient.total_points();
        self.total_points += added;
        added
    }

    /// Whether no procedures were assigned.
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Number of assigned procedures.
    pub fn procedure_count(&self) -> usize {
        self.procedures.len()
    }

    /// Distinct patient names, in first-placement order.
    pub fn patient_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for item in &self.procedures {
            if !names.contains(&item.patient_name.as_str()) {
                names.push(&item.patient_name);
            }
        }
        names
    }

    /// Number of distinct patients (the unit quotas are counted in).
    pub fn patient_count(&self) -> usize {
        self.patient_names().len()
    }

    /// Whether any procedure of the named patient is on this assignment.
    pub fn has_patient(&self, patient_name: &str) -> bool {
        self.procedures.iter().any(|p| p.patient_name == patient_name)
    }

    /// Procedures assigned for one patient.
    pub fn procedures_for_patient(&self, patient_id: &str) -> Vec<&Procedure> {
        self.procedures
            .iter()
            .filter(|p| p.patient_id == patient_id)
            .map(|p| &p.procedure)
            .collect()
    }
}
