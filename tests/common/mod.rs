//! Shared fixtures for integration tests.
#![allow(dead_code)]

use tracing_subscriber::EnvFilter;
use u_rota::catalog::ProcedureCatalog;
use u_rota::models::{Gender, Patient, Scholar, Tier};

/// Installs a debug-level subscriber that writes through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Patient with catalog procedures by id.
pub fn patient(id: &str, name: &str, gender: Gender, procedure_ids: &[&str]) -> Patient {
    let catalog = ProcedureCatalog::builtin();
    Patient::new(id, name, gender).with_procedures(procedure_ids.iter().map(|pid| {
        catalog
            .procedure(pid)
            .unwrap_or_else(|| panic!("unknown catalog id {pid}"))
    }))
}

/// Posted scholar whose id and name match.
pub fn scholar(name: &str, tier: Tier, gender: Gender) -> Scholar {
    Scholar::new(name, name, tier, gender)
}

/// Name of the single scholar holding the patient, if any.
pub fn owner(allocation: &u_rota::allocation::Allocation, patient_id: &str) -> Option<String> {
    let scholars = allocation.scholars_for_patient(patient_id);
    assert!(scholars.len() <= 1, "patient {patient_id} split across scholars");
    scholars.first().map(|s| s.name.clone())
}
