//! Day report projection.
//!
//! Reshapes an allocation patient-first for export and renders a plain-text
//! report. Pure projection: order follows the allocation, no placement
//! logic lives here.

use serde::Serialize;
use std::fmt::Write;

use crate::allocation::Allocation;
use crate::models::{Gender, Procedure};

/// One patient and the scholars treating them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub patient_id: String,
    pub patient_name: String,
    pub gender: Gender,
    /// (scholar name, procedures) in assignment order.
    pub scholars: Vec<(String, Vec<Procedure>)>,
}

impl PatientSummary {
    /// Total points across all scholars.
    pub fn total_points(&self) -> u32 {
        self.scholars
            .iter()
            .flat_map(|(_, procs)| procs)
            .map(|p| p.points)
            .sum()
    }
}

/// Patient-centric view, patients ordered by first appearance.
pub fn patient_view(allocation: &Allocation) -> Vec<PatientSummary> {
    let mut out: Vec<PatientSummary> = Vec::new();

    for assignment in &allocation.assignments {
        for item in &assignment.procedures {
            let idx = match out.iter().position(|s| s.patient_id == item.patient_id) {
                Some(idx) => idx,
                None => {
                    out.push(PatientSummary {
                        patient_id: item.patient_id.clone(),
                        patient_name: item.patient_name.clone(),
                        gender: item.patient_gender,
                        scholars: Vec::new(),
                    });
                    out.len() - 1
                }
            };
            let summary = &mut out[idx];
            match summary
                .scholars
                .iter_mut()
                .find(|(name, _)| *name == assignment.scholar.name)
            {
                Some((_, procs)) => procs.push(item.procedure.clone()),
                None => summary
                    .scholars
                    .push((assignment.scholar.name.clone(), vec![item.procedure.clone()])),
            }
        }
    }

    out
}

/// Plain-text report: one block per scholar, then unassigned patients.
pub fn render_text(allocation: &Allocation) -> String {
    let mut out = String::new();

    for a in &allocation.assignments {
        let posted = if a.scholar.is_posted { "" } else { ", not posted" };
        let _ = writeln!(
            out,
            "{} ({}{}) - {} pts / target {:.1}",
            a.scholar.name, a.scholar.tier, posted, a.total_points, a.target_points
        );
        if a.is_empty() {
            let _ = writeln!(out, "  (no procedures)");
            continue;
        }
        for name in a.patient_names() {
            let procs: Vec<&str> = a
                .procedures
                .iter()
                .filter(|p| p.patient_name == name)
                .map(|p| p.procedure.name.as_str())
                .collect();
            let _ = writeln!(out, "  {}: {}", name, procs.join(", "));
        }
    }

    if !allocation.unassigned.is_empty() {
        let _ = writeln!(out, "Unassigned:");
        for u in &allocation.unassigned {
            let _ = writeln!(out, "  {} ({} pts): {}", u.patient_name, u.points, u.reason);
        }
    }

    out
}
