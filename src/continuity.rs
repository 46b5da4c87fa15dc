//! Continuity of care.
//!
//! A returning patient keeps the scholar who treated them on the most
//! recent prior day with recorded data. The [`ContinuityMap`] holds
//! `patient name -> scholar name` and is read-only input to allocation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::day::DayRecord;
use crate::models::{Assignment, Patient};

/// Patient name to previously assigned scholar name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuityMap(BTreeMap<String, String>);

impl ContinuityMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a patient/scholar pair.
    pub fn with_entry(mut self, patient_name: impl Into<String>, scholar_name: impl Into<String>) -> Self {
        self.insert(patient_name, scholar_name);
        self
    }

    /// Records a patient/scholar pair, replacing any previous scholar.
    pub fn insert(&mut self, patient_name: impl Into<String>, scholar_name: impl Into<String>) {
        self.0.insert(patient_name.into(), scholar_name.into());
    }

    /// Scholar previously assigned to the patient.
    pub fn scholar_for(&self, patient_name: &str) -> Option<&str> {
        self.0.get(patient_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in patient-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, s)| (p.as_str(), s.as_str()))
    }

    /// Builds the map from one day's assignments.
    ///
    /// Scans each assignment's procedure list; when a patient appears under
    /// several scholars the first one scanned wins.
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut map = BTreeMap::new();
        for assignment in assignments {
            for item in &assignment.procedures {
                map.entry(item.patient_name.clone())
                    .or_insert_with(|| assignment.scholar.name.clone());
            }
        }
        Self(map)
    }

    /// Builds the map from the most recent day strictly before `today`
    /// that has recorded assignments.
    pub fn from_history(days: &[DayRecord], today: NaiveDate) -> Self {
        days.iter()
            .filter(|d| d.date < today && d.has_assignments())
            .max_by_key(|d| d.date)
            .map(|d| Self::from_assignments(&d.assignments))
            .unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for ContinuityMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolves each patient to its continuity scholar name, if any.
///
/// Keys are patient ids. Patients absent from the map resolve to `None`.
/// Whether the named scholar is present today is decided by the allocator.
pub fn resolve(continuity: &ContinuityMap, patients: &[Patient]) -> HashMap<String, Option<String>> {
    patients
        .iter()
        .map(|p| {
            (
                p.id.clone(),
                continuity.scholar_for(&p.name).map(str::to_string),
            )
        })
        .collect()
}
