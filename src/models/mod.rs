//! Rota domain models.
//!
//! Provides the data types for a day's allocation problem and its
//! solution.
//!
//! # Domain Mappings
//!
//! | u-rota | Scheduling analogue |
//! |--------|---------------------|
//! | Patient | Task |
//! | Procedure | Activity |
//! | Scholar | Human resource |
//! | Assignment | Per-resource schedule row |

mod assignment;
mod patient;
mod procedure;
mod scholar;

pub use assignment::{AssignedProcedure, Assignment};
pub use patient::{Gender, Patient};
pub use procedure::{Grade, Procedure};
pub use scholar::{Scholar, Tier};
