//! Input validation for allocation.
//!
//! Checks structural integrity of patients and scholars at the boundary
//! where they are built. The allocator itself tolerates all of these and
//! degrades gracefully; validation lets the caller reject bad input before
//! a silently odd allocation is produced. Detects:
//! - Duplicate IDs
//! - Duplicate names (continuity is keyed by name on both sides)
//! - Empty names
//! - Non-attendant patients with no procedures
//! - Attendants carrying procedures

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Patient, Scholar};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Two entities share the same name.
    DuplicateName,
    /// A patient or scholar has a blank name.
    EmptyName,
    /// A non-attendant patient has no procedures.
    EmptyPatient,
    /// An attendant has procedures, which allocation would ignore.
    AttendantWithProcedures,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a day's patients and scholars.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(patients: &[Patient], scholars: &[Scholar]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut scholar_ids = HashSet::new();
    let mut scholar_names = HashSet::new();
    for s in scholars {
        if !scholar_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate scholar ID: {}", s.id),
            ));
        }
        if s.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Scholar '{}' has no name", s.id),
            ));
        } else if !scholar_names.insert(s.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate scholar name: {}", s.name),
            ));
        }
    }

    let mut patient_ids = HashSet::new();
    let mut patient_names = HashSet::new();
    for p in patients {
        if !patient_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate patient ID: {}", p.id),
            ));
        }
        if p.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Patient '{}' has no name", p.id),
            ));
        } else if !p.is_attendant && !patient_names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate patient name: {}", p.name),
            ));
        }

        if p.is_attendant && !p.procedures.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::AttendantWithProcedures,
                format!("Attendant '{}' has procedures that will not be allocated", p.id),
            ));
        } else if !p.is_attendant && p.procedures.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPatient,
                format!("Patient '{}' has no procedures", p.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
