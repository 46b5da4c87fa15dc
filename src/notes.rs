//! Daily-notes parser.
//!
//! Turns semi-structured ward notes into [`Patient`]s, one patient per line:
//!
//! ```text
//! # ward 4
//! Asha (F): IV cannulation, dressing
//! Ravi (M) attendant
//! Kumar (M): foley, ABG
//! ```
//!
//! Procedure phrases are resolved through the [`ProcedureCatalog`]
//! (longest match first). Unknown phrases are ignored. A non-attendant line
//! that resolves to no procedure at all produces no patient.

use tracing::debug;

use crate::catalog::ProcedureCatalog;
use crate::models::{Gender, Patient};

/// Parses daily notes into patients with ids `p1, p2, ...` in line order.
pub fn parse_notes(text: &str, catalog: &ProcedureCatalog) -> Vec<Patient> {
    let mut patients = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line, catalog, patients.len() + 1) {
            Some(patient) => patients.push(patient),
            None => debug!(line = line_no + 1, text = line, "skipped unparseable note line"),
        }
    }

    patients
}

fn parse_line(line: &str, catalog: &ProcedureCatalog, seq: usize) -> Option<Patient> {
    let (head, body) = match line.split_once(':') {
        Some((head, body)) => (head.trim(), body.trim()),
        None => (line, ""),
    };

    let open = head.rfind('(')?;
    let close = head[open..].find(')')? + open;
    let name = head[..open].trim();
    if name.is_empty() {
        return None;
    }
    let gender: Gender = head[open + 1..close].parse().ok()?;
    let trailer = head[close + 1..].trim().to_lowercase();
    let id = format!("p{seq}");

    if trailer == "attendant" {
        return Some(Patient::attendant(id, name, gender));
    }

    let procedures = catalog.resolve_all(body);
    if procedures.is_empty() {
        return None;
    }
    Some(Patient::new(id, name, gender).with_procedures(procedures))
}
