//! Allocation result model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capacity::Quota;
use crate::models::{Assignment, Patient, Scholar, Tier};

/// The outcome of one allocation run.
///
/// Holds one [`Assignment`] per input scholar (in input order), the
/// patients that could not be placed, and advisory quota overruns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
    /// Patients left out, with the reason.
    pub unassigned: Vec<UnassignedPatient>,
    /// Scholars holding more patients than their tier's max quota.
    pub quota_overruns: Vec<QuotaOverrun>,
}

/// A patient the engine could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignedPatient {
    pub patient_id: String,
    pub patient_name: String,
    /// Points left unallocated.
    pub points: u32,
    pub reason: UnassignedReason,
}

/// Why a patient was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnassignedReason {
    /// The scholar list was empty.
    NoStaff,
    /// A gender-restricted procedure with no same-gender scholar, posted or not.
    NoSameGenderStaff { procedure_id: String },
    /// Every eligible scholar has reached its max quota.
    QuotaExhausted,
}

/// A scholar over the max quota of its tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaOverrun {
    pub scholar_id: String,
    pub scholar_name: String,
    pub tier: Tier,
    /// Patients held.
    pub patients: usize,
    pub quota: Quota,
}

impl UnassignedPatient {
    pub(crate) fn new(patient: &Patient, reason: UnassignedReason) -> Self {
        Self {
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            points: patient.total_points(),
            reason,
        }
    }
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnassignedReason::NoStaff => f.write_str("no scholars available"),
            UnassignedReason::NoSameGenderStaff { procedure_id } => {
                write!(f, "no same-gender scholar for {procedure_id}")
            }
            UnassignedReason::QuotaExhausted => f.write_str("all eligible scholars at max quota"),
        }
    }
}

impl Allocation {
    /// Sum of assigned points across all scholars.
    pub fn total_points(&self) -> u32 {
        self.assignments.iter().map(|a| a.total_points).sum()
    }

    /// Number of assigned procedures.
    pub fn procedure_count(&self) -> usize {
        self.assignments.iter().map(Assignment::procedure_count).sum()
    }

    /// Sum of points left unassigned.
    pub fn unassigned_points(&self) -> u32 {
        self.unassigned.iter().map(|u| u.points).sum()
    }

    /// Whether every patient was placed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Finds the assignment for a scholar.
    pub fn assignment_for(&self, scholar_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.scholar.id == scholar_id)
    }

    /// Scholars holding any procedure of the patient.
    pub fn scholars_for_patient(&self, patient_id: &str) -> Vec<&Scholar> {
        self.assignments
            .iter()
            .filter(|a| a.procedures.iter().any(|p| p.patient_id == patient_id))
            .map(|a| &a.scholar)
            .collect()
    }

    /// Whether the patient was left out.
    pub fn is_unassigned(&self, patient_id: &str) -> bool {
        self.unassigned.iter().any(|u| u.patient_id == patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Grade, Procedure};

    fn sample() -> Allocation {
        let asha = Patient::new("p1", "Asha", Gender::Female)
            .with_procedure(Procedure::new("vitals", "Vital signs", Grade::One))
            .with_procedure(Procedure::new("suturing", "Suturing", Grade::Three));
        let ravi = Patient::new("p2", "Ravi", Gender::Male)
            .with_procedure(Procedure::new("abg", "Arterial blood gas", Grade::Two));

        let mut a1 = Assignment::new(Scholar::new("s1", "Dr. X", Tier::Junior, Gender::Female));
        a1.add_patient(&asha);
        let a2 = Assignment::new(Scholar::new("s2", "Dr. Y", Tier::Senior, Gender::Female));

        Allocation {
            assignments: vec![a1, a2],
            unassigned: vec![UnassignedPatient::new(
                &ravi,
                UnassignedReason::NoSameGenderStaff {
                    procedure_id: "abg".into(),
                },
            )],
            quota_overruns: Vec::new(),
        }
    }

    #[test]
    fn test_allocation_totals() {
        let a = sample();
        assert_eq!(a.total_points(), 4);
        assert_eq!(a.procedure_count(), 2);
        assert_eq!(a.unassigned_points(), 2);
        assert!(!a.is_complete());
        assert!(a.is_unassigned("p2"));
    }

    #[test]
    fn test_lookup() {
        let a = sample();
        assert_eq!(a.assignment_for("s2").unwrap().total_points, 0);
        assert!(a.assignment_for("s9").is_none());
        let scholars = a.scholars_for_patient("p1");
        assert_eq!(scholars.len(), 1);
        assert_eq!(scholars[0].id, "s1");
        assert!(a.scholars_for_patient("p2").is_empty());
    }

    #[test]
    fn test_reason_serde_tagged() {
        let json = serde_json::to_string(&UnassignedReason::NoSameGenderStaff {
            procedure_id: "urinary_catheterization".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"kind":"no_same_gender_staff","procedure_id":"urinary_catheterization"}"#
        );
        assert_eq!(UnassignedReason::QuotaExhausted.to_string(), "all eligible scholars at max quota");
    }
}
