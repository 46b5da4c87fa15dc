//! Daily procedure allocation for tiered trainee rosters.
//!
//! Assigns every patient's graded procedures to exactly one scholar,
//! balancing points across seniority tiers while keeping returning patients
//! with yesterday's scholar and routing gender-restricted procedures to
//! same-gender scholars.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Procedure`, `Patient`, `Scholar`, `Assignment`
//! - **`catalog`**: Procedure catalog with longest-match-first text resolution
//! - **`notes`**: Free-text daily notes to `Patient`s
//! - **`capacity`**: Two-phase patient quotas per tier
//! - **`continuity`**: Continuity map, resolution, and extraction from history
//! - **`config`**: `AllocationConfig` (tier weights, restricted procedures, quota mode)
//! - **`allocation`**: The allocation engine
//! - **`analysis`**: Fairness metrics and caller-owned cache
//! - **`report`**: Patient-centric projection and text report
//! - **`day`**: Day record storage contract
//! - **`validation`**: Input integrity checks (duplicate IDs/names, empty patients)
//!
//! # Pipeline
//!
//! ```text
//! notes --parse--> patients --+
//! history --continuity map----+--> Allocator --> Allocation --> analysis / report / DayRecord
//! roster ---------------------+
//! ```

pub mod allocation;
pub mod analysis;
pub mod capacity;
pub mod catalog;
pub mod config;
pub mod continuity;
pub mod day;
pub mod error;
pub mod models;
pub mod notes;
pub mod report;
pub mod validation;

pub use error::{Result, RotaError};
