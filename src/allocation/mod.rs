//! Allocation engine.
//!
//! Assigns every non-attendant patient's procedures to exactly one
//! scholar, honoring continuity of care, same-gender procedures, tier
//! fairness, and (optionally) the two-phase capacity table.
//!
//! Each run is a pure function of patients, scholars, and the continuity
//! map. The result always holds one [`Assignment`](crate::models::Assignment)
//! per scholar.

mod allocator;
mod result;

pub use allocator::{AllocationRequest, Allocator};
pub use result::{Allocation, QuotaOverrun, UnassignedPatient, UnassignedReason};
