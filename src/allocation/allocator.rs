//! Fairness-first procedure allocator.
//!
//! # Algorithm
//!
//! Each step has absolute priority over the next; nothing is revisited.
//!
//! 1. **Continuity.** A patient whose name maps to a scholar on today's
//!    roster (posted or not) goes wholly to that scholar, whatever the load.
//!    A gender-restricted procedure overrides continuity when the genders
//!    differ.
//! 2. **Gender restriction.** A patient with a gender-restricted procedure
//!    may only go to same-gender scholars.
//! 3. **Fairness.** Remaining patients are placed heaviest first (stable on
//!    ties). Each tier's target is `pool × weight`, where the pool is the
//!    points left after continuity. Among tiers with a candidate, the one
//!    with the largest `target - placed` deficit is chosen, then the same-gender
//!    scholar with the lowest total (input order on ties), falling back to
//!    the opposite gender. Posted scholars are tried before non-posted.
//! 4. **Quota.** In [`QuotaMode::Enforced`] the capacity table gates
//!    candidates in two phases (base, then max). In
//!    [`QuotaMode::Advisory`] it only reports overruns.
//!
//! # Complexity
//! O(p log p + p * s) where p=patients, s=scholars.

use tracing::{debug, info, instrument, warn};

use super::result::{Allocation, QuotaOverrun, UnassignedPatient, UnassignedReason};
use crate::capacity::{quota_for, Phase};
use crate::config::{AllocationConfig, QuotaMode, TierWeights};
use crate::continuity::{self, ContinuityMap};
use crate::error;
use crate::models::{Assignment, Patient, Scholar, Tier};

/// Input container for allocation.
#[derive(Debug, Clone, Default)]
pub struct AllocationRequest {
    /// Today's patients (attendants are ignored).
    pub patients: Vec<Patient>,
    /// Today's scholars with posting flags.
    pub scholars: Vec<Scholar>,
    /// Previous scholar per patient name.
    pub continuity: ContinuityMap,
}

impl AllocationRequest {
    /// Creates a request with no continuity.
    pub fn new(patients: Vec<Patient>, scholars: Vec<Scholar>) -> Self {
        Self {
            patients,
            scholars,
            continuity: ContinuityMap::new(),
        }
    }

    /// Sets the continuity map.
    pub fn with_continuity(mut self, continuity: ContinuityMap) -> Self {
        self.continuity = continuity;
        self
    }
}

/// Procedure allocator.
///
/// Stateless between calls: every run builds fresh totals, so one
/// allocator can serve any number of days, concurrently if needed.
///
/// # Example
///
/// ```
/// use u_rota::allocation::{AllocationRequest, Allocator};
/// use u_rota::models::{Gender, Grade, Patient, Procedure, Scholar, Tier};
///
/// let patients = vec![Patient::new("p1", "Asha", Gender::Female)
///     .with_procedure(Procedure::new("iv_cannulation", "IV cannulation", Grade::Two))
///     .with_procedure(Procedure::new("suturing", "Suturing", Grade::Three))];
/// let scholars = vec![
///     Scholar::new("s1", "Dr. Meera", Tier::Junior, Gender::Female),
///     Scholar::new("s2", "Dr. Anil", Tier::Senior, Gender::Male),
/// ];
///
/// let allocation = Allocator::new().allocate_request(&AllocationRequest::new(patients, scholars));
/// assert_eq!(allocation.assignments.len(), 2);
/// assert_eq!(allocation.total_points(), 5);
/// assert!(allocation.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocationConfig,
}

/// How a patient reached a scholar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Continuity,
    Fairness,
}

/// Working state for one run.
struct Board<'a> {
    scholars: &'a [Scholar],
    assignments: Vec<Assignment>,
    patient_counts: Vec<usize>,
    /// Fairness-placed points per tier.
    tier_points: [u32; 3],
}

impl<'a> Board<'a> {
    fn new(scholars: &'a [Scholar]) -> Self {
        Self {
            scholars,
            assignments: scholars.iter().cloned().map(Assignment::new).collect(),
            patient_counts: vec![0; scholars.len()],
            tier_points: [0; 3],
        }
    }

    fn place(&mut self, idx: usize, patient: &Patient, via: Placement) {
        let added = self.assignments[idx].add_patient(patient);
        self.patient_counts[idx] += 1;
        if via == Placement::Fairness {
            self.tier_points[self.scholars[idx].tier.index()] += added;
        }
        debug!(
            patient = %patient.name,
            scholar = %self.scholars[idx].name,
            tier = self.scholars[idx].tier.level(),
            points = added,
            via = ?via,
            "placed patient"
        );
    }

    /// Picks a scholar from a non-empty candidate pool by tier deficit,
    /// then gender preference, then lowest total.
    ///
    /// A tier's target is `fairness_pool × weight`. Tiers with nobody in
    /// the pool are left out of the ranking.
    fn pick(&self, pool: &[usize], patient: &Patient, fairness_pool: u32, weights: &TierWeights) -> usize {
        let present = Tier::ALL
            .into_iter()
            .filter(|&t| pool.iter().any(|&i| self.scholars[i].tier == t));

        // Strict comparison keeps the junior-most tier on equal deficits.
        let mut best: Option<(Tier, f64)> = None;
        for tier in present {
            let target = fairness_pool as f64 * weights.weight(tier);
            let deficit = target - self.tier_points[tier.index()] as f64;
            if best.map_or(true, |(_, d)| deficit > d) {
                best = Some((tier, deficit));
            }
        }
        let tier = best.map(|(t, _)| t).unwrap_or(Tier::Junior);

        let in_tier: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&i| self.scholars[i].tier == tier)
            .collect();
        let same_gender: Vec<usize> = in_tier
            .iter()
            .copied()
            .filter(|&i| self.scholars[i].gender == patient.gender)
            .collect();
        let bucket = if same_gender.is_empty() { &in_tier } else { &same_gender };

        // min_by_key keeps the first minimum, i.e. input order on ties.
        bucket
            .iter()
            .copied()
            .min_by_key(|&i| self.assignments[i].total_points)
            .unwrap_or(pool[0])
    }

    /// Sets each assignment's fair share of the day's points.
    fn set_targets(&mut self, weights: &TierWeights) {
        let any_posted = self.scholars.iter().any(|s| s.is_posted);
        let active: Vec<bool> = self
            .scholars
            .iter()
            .map(|s| s.is_posted || !any_posted)
            .collect();

        let mut per_tier = [0usize; 3];
        for (s, &is_active) in self.scholars.iter().zip(&active) {
            if is_active {
                per_tier[s.tier.index()] += 1;
            }
        }
        let present: Vec<Tier> = Tier::ALL
            .into_iter()
            .filter(|t| per_tier[t.index()] > 0)
            .collect();
        let normalized = weights.normalized(&present);
        let day_pool: u32 = self.assignments.iter().map(|a| a.total_points).sum();

        for (i, assignment) in self.assignments.iter_mut().enumerate() {
            let t = assignment.scholar.tier.index();
            assignment.target_points = if active[i] {
                day_pool as f64 * normalized[t] / per_tier[t] as f64
            } else {
                0.0
            };
        }
    }

    fn quota_overruns(&self) -> Vec<QuotaOverrun> {
        self.scholars
            .iter()
            .zip(&self.patient_counts)
            .filter_map(|(s, &count)| {
                let quota = quota_for(s.tier);
                (count > quota.max).then(|| QuotaOverrun {
                    scholar_id: s.id.clone(),
                    scholar_name: s.name.clone(),
                    tier: s.tier,
                    patients: count,
                    quota,
                })
            })
            .collect()
    }
}

impl Allocator {
    /// Creates an allocator with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the whole config after validating it.
    pub fn with_config(mut self, config: AllocationConfig) -> error::Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Sets the quota mode.
    pub fn with_quota_mode(mut self, mode: QuotaMode) -> Self {
        self.config.quota_mode = mode;
        self
    }

    /// Sets the tier weights after validating them.
    pub fn with_tier_weights(mut self, weights: TierWeights) -> error::Result<Self> {
        weights.validate()?;
        self.config.tier_weights = weights;
        Ok(self)
    }

    /// Sets the gender-restricted procedure ids.
    pub fn with_gender_restricted(mut self, procedure_ids: Vec<String>) -> Self {
        self.config.gender_restricted = procedure_ids;
        self
    }

    /// Current config.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Allocates from a request.
    pub fn allocate_request(&self, request: &AllocationRequest) -> Allocation {
        self.allocate(&request.patients, &request.scholars, &request.continuity)
    }

    /// Allocates every non-attendant patient's procedures to scholars.
    ///
    /// Never fails: patients that cannot be placed are returned in
    /// [`Allocation::unassigned`]. With no scholars the result has no
    /// assignments and every patient is unassigned with
    /// [`UnassignedReason::NoStaff`].
    #[instrument(skip_all, fields(patients = patients.len(), scholars = scholars.len()))]
    pub fn allocate(&self, patients: &[Patient], scholars: &[Scholar], continuity: &ContinuityMap) -> Allocation {
        let eligible: Vec<&Patient> = patients.iter().filter(|p| p.needs_allocation()).collect();

        if scholars.is_empty() {
            warn!(patients = eligible.len(), "no scholars; nothing can be allocated");
            return Allocation {
                assignments: Vec::new(),
                unassigned: eligible
                    .into_iter()
                    .map(|p| UnassignedPatient::new(p, UnassignedReason::NoStaff))
                    .collect(),
                quota_overruns: Vec::new(),
            };
        }

        let resolved = continuity::resolve(continuity, patients);
        let mut board = Board::new(scholars);
        let mut remaining: Vec<&Patient> = Vec::new();

        for patient in eligible {
            let wanted = resolved.get(&patient.id).and_then(|s| s.as_deref());
            match wanted.and_then(|name| self.continuity_scholar(patient, name, scholars)) {
                Some(idx) => board.place(idx, patient, Placement::Continuity),
                None => remaining.push(patient),
            }
        }

        let fairness_pool: u32 = remaining.iter().map(|p| p.total_points()).sum();
        // Stable: equal totals keep input order.
        remaining.sort_by(|a, b| b.total_points().cmp(&a.total_points()));

        let mut unassigned = Vec::new();
        for patient in remaining {
            match self.select(&board, patient, fairness_pool) {
                Ok(idx) => board.place(idx, patient, Placement::Fairness),
                Err(reason) => {
                    warn!(patient = %patient.name, reason = %reason, "patient left unassigned");
                    unassigned.push(UnassignedPatient::new(patient, reason));
                }
            }
        }

        board.set_targets(&self.config.tier_weights);
        let quota_overruns = board.quota_overruns();
        for overrun in &quota_overruns {
            warn!(
                scholar = %overrun.scholar_name,
                patients = overrun.patients,
                max = overrun.quota.max,
                "scholar above max quota"
            );
        }

        let allocation = Allocation {
            assignments: board.assignments,
            unassigned,
            quota_overruns,
        };
        info!(
            points = allocation.total_points(),
            procedures = allocation.procedure_count(),
            unassigned = allocation.unassigned.len(),
            "allocation complete"
        );
        allocation
    }

    /// Index of the continuity scholar, if it can take the patient.
    fn continuity_scholar(&self, patient: &Patient, name: &str, scholars: &[Scholar]) -> Option<usize> {
        let Some(idx) = scholars.iter().position(|s| s.name == name) else {
            debug!(patient = %patient.name, scholar = name, "continuity scholar not on roster");
            return None;
        };
        if let Some(procedure) = patient.restricted_procedure(&self.config.gender_restricted) {
            if scholars[idx].gender != patient.gender {
                warn!(
                    patient = %patient.name,
                    scholar = name,
                    procedure = %procedure.id,
                    "continuity dropped: gender-restricted procedure"
                );
                return None;
            }
        }
        Some(idx)
    }

    /// Chooses a scholar for a patient outside continuity.
    fn select(&self, board: &Board<'_>, patient: &Patient, fairness_pool: u32) -> Result<usize, UnassignedReason> {
        let restricted = patient.restricted_procedure(&self.config.gender_restricted);
        let scholars = board.scholars;
        let mut had_candidates = false;

        for posted in [true, false] {
            let pool: Vec<usize> = (0..scholars.len())
                .filter(|&i| scholars[i].is_posted == posted)
                .filter(|&i| restricted.is_none() || scholars[i].gender == patient.gender)
                .collect();
            if pool.is_empty() {
                continue;
            }
            had_candidates = true;

            match self.config.quota_mode {
                QuotaMode::Advisory => {
                    return Ok(board.pick(&pool, patient, fairness_pool, &self.config.tier_weights));
                }
                QuotaMode::Enforced => {
                    for phase in Phase::ORDER {
                        let open: Vec<usize> = pool
                            .iter()
                            .copied()
                            .filter(|&i| quota_for(scholars[i].tier).admits(board.patient_counts[i], phase))
                            .collect();
                        if !open.is_empty() {
                            return Ok(board.pick(&open, patient, fairness_pool, &self.config.tier_weights));
                        }
                    }
                }
            }
        }

        Err(match (had_candidates, restricted) {
            (true, _) => UnassignedReason::QuotaExhausted,
            (false, Some(p)) => UnassignedReason::NoSameGenderStaff {
                procedure_id: p.id.clone(),
            },
            (false, None) => UnassignedReason::NoStaff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RotaError;
    use crate::models::{Gender, Grade, Procedure};

    fn proc(id: &str, grade: Grade) -> Procedure {
        Procedure::new(id, id, grade)
    }

    fn patient(id: &str, gender: Gender, grades: &[Grade]) -> Patient {
        Patient::new(id, id, gender).with_procedures(grades.iter().map(|&g| proc("vitals", g)))
    }

    fn scholar(id: &str, tier: Tier, gender: Gender) -> Scholar {
        Scholar::new(id, id, tier, gender)
    }

    fn owner(allocation: &Allocation, patient_id: &str) -> Option<String> {
        allocation
            .scholars_for_patient(patient_id)
            .first()
            .map(|s| s.id.clone())
    }

    #[test]
    fn test_single_patient_goes_to_largest_deficit_tier() {
        let patients = vec![patient("p1", Gender::Female, &[Grade::Two, Grade::Three])];
        let scholars = vec![
            scholar("s3", Tier::Senior, Gender::Female),
            scholar("s2", Tier::Middle, Gender::Female),
            scholar("s1", Tier::Junior, Gender::Female),
        ];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(owner(&a, "p1").as_deref(), Some("s1"));
        assert_eq!(a.assignments.len(), 3);
        assert_eq!(a.assignment_for("s1").unwrap().total_points, 5);
    }

    #[test]
    fn test_attendants_ignored() {
        let patients = vec![
            Patient::attendant("a1", "Ravi", Gender::Male),
            patient("p1", Gender::Male, &[Grade::One]),
        ];
        let scholars = vec![scholar("s1", Tier::Junior, Gender::Male)];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(a.procedure_count(), 1);
        assert!(a.is_complete());
    }

    #[test]
    fn test_same_gender_preferred_within_tier() {
        let patients = vec![patient("p1", Gender::Male, &[Grade::One])];
        let scholars = vec![
            scholar("f1", Tier::Junior, Gender::Female),
            scholar("m1", Tier::Junior, Gender::Male),
        ];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(owner(&a, "p1").as_deref(), Some("m1"));
    }

    #[test]
    fn test_opposite_gender_fallback_for_unrestricted() {
        let patients = vec![patient("p1", Gender::Male, &[Grade::One])];
        let scholars = vec![scholar("f1", Tier::Junior, Gender::Female)];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(owner(&a, "p1").as_deref(), Some("f1"));
    }

    #[test]
    fn test_lowest_total_within_bucket() {
        // Single tier: every patient goes to the lighter scholar.
        let patients = vec![
            patient("p1", Gender::Female, &[Grade::Three]),
            patient("p2", Gender::Female, &[Grade::Two]),
            patient("p3", Gender::Female, &[Grade::One]),
        ];
        let scholars = vec![
            scholar("s1", Tier::Junior, Gender::Female),
            scholar("s2", Tier::Junior, Gender::Female),
        ];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(owner(&a, "p1").as_deref(), Some("s1"));
        assert_eq!(owner(&a, "p2").as_deref(), Some("s2"));
        assert_eq!(owner(&a, "p3").as_deref(), Some("s2"));
    }

    #[test]
    fn test_posted_before_unposted() {
        let patients = vec![patient("p1", Gender::Female, &[Grade::One])];
        let scholars = vec![
            scholar("off", Tier::Junior, Gender::Female).unposted(),
            scholar("on", Tier::Senior, Gender::Male),
        ];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(owner(&a, "p1").as_deref(), Some("on"));
    }

    #[test]
    fn test_restricted_falls_back_to_unposted_same_gender() {
        let patients = vec![Patient::new("p1", "p1", Gender::Male)
            .with_procedure(proc("urinary_catheterization", Grade::Two))];
        let scholars = vec![
            scholar("f1", Tier::Junior, Gender::Female),
            scholar("m_off", Tier::Senior, Gender::Male).unposted(),
        ];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(owner(&a, "p1").as_deref(), Some("m_off"));
    }

    #[test]
    fn test_continuity_beats_load() {
        let patients = vec![
            patient("p1", Gender::Female, &[Grade::Three, Grade::Three]),
            patient("p2", Gender::Female, &[Grade::Three]),
        ];
        let scholars = vec![
            scholar("s1", Tier::Junior, Gender::Female),
            scholar("s2", Tier::Senior, Gender::Female),
        ];
        let continuity = ContinuityMap::new().with_entry("p1", "s2").with_entry("p2", "s2");
        let a = Allocator::new().allocate(&patients, &scholars, &continuity);
        assert_eq!(a.assignment_for("s2").unwrap().total_points, 9);
        assert!(a.assignment_for("s1").unwrap().is_empty());
    }

    #[test]
    fn test_continuity_to_unposted_scholar() {
        let patients = vec![patient("p1", Gender::Female, &[Grade::One])];
        let scholars = vec![
            scholar("s1", Tier::Junior, Gender::Female),
            scholar("s2", Tier::Junior, Gender::Female).unposted(),
        ];
        let continuity = ContinuityMap::new().with_entry("p1", "s2");
        let a = Allocator::new().allocate(&patients, &scholars, &continuity);
        assert_eq!(owner(&a, "p1").as_deref(), Some("s2"));
    }

    #[test]
    fn test_gender_restriction_overrides_continuity() {
        let patients = vec![Patient::new("p1", "p1", Gender::Male)
            .with_procedure(proc("urinary_catheterization", Grade::Two))];
        let scholars = vec![
            scholar("f1", Tier::Junior, Gender::Female),
            scholar("m1", Tier::Senior, Gender::Male),
        ];
        let continuity = ContinuityMap::new().with_entry("p1", "f1");
        let a = Allocator::new().allocate(&patients, &scholars, &continuity);
        assert_eq!(owner(&a, "p1").as_deref(), Some("m1"));
    }

    #[test]
    fn test_deficit_tracks_fairness_points() {
        // Pool of 10 points, weights 0.5/0.5 across junior and senior.
        let patients = vec![
            patient("p1", Gender::Female, &[Grade::Three, Grade::Two]),
            patient("p2", Gender::Female, &[Grade::Three]),
            patient("p3", Gender::Female, &[Grade::Two]),
        ];
        let scholars = vec![
            scholar("j", Tier::Junior, Gender::Female),
            scholar("s", Tier::Senior, Gender::Female),
        ];
        let a = Allocator::new()
            .with_tier_weights(TierWeights::new(0.5, 0.0, 0.5))
            .unwrap()
            .allocate(&patients, &scholars, &ContinuityMap::new());
        // p1 (5) -> junior; senior deficit 5 > 0 -> p2 and p3 to senior.
        assert_eq!(owner(&a, "p1").as_deref(), Some("j"));
        assert_eq!(owner(&a, "p2").as_deref(), Some("s"));
        assert_eq!(owner(&a, "p3").as_deref(), Some("s"));
    }

    #[test]
    fn test_absent_tier_keeps_raw_weights() {
        // No junior: middle target 10 * 0.3 = 3, senior 10 * 0.2 = 2.
        let patients = vec![
            patient("p1", Gender::Female, &[Grade::Three, Grade::Two]),
            patient("p2", Gender::Female, &[Grade::Three]),
            patient("p3", Gender::Female, &[Grade::Two]),
        ];
        let scholars = vec![
            scholar("m", Tier::Middle, Gender::Female),
            scholar("s", Tier::Senior, Gender::Female),
        ];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        // p1: 3 vs 2 -> middle; p2: -2 vs 2 -> senior; p3: -2 vs -1 -> senior.
        assert_eq!(owner(&a, "p1").as_deref(), Some("m"));
        assert_eq!(owner(&a, "p2").as_deref(), Some("s"));
        assert_eq!(owner(&a, "p3").as_deref(), Some("s"));
        assert_eq!(a.assignment_for("m").unwrap().total_points, 5);
        assert_eq!(a.assignment_for("s").unwrap().total_points, 5);
    }

    #[test]
    fn test_invalid_weights_rejected_by_builder() {
        assert!(matches!(
            Allocator::new().with_tier_weights(TierWeights::new(-1.0, 0.5, 0.5)),
            Err(RotaError::InvalidConfig(_))
        ));
        assert!(Allocator::new()
            .with_tier_weights(TierWeights::new(f64::NAN, 0.5, 0.5))
            .is_err());

        let config = AllocationConfig {
            tier_weights: TierWeights::new(0.0, 0.0, 0.0),
            ..Default::default()
        };
        assert!(Allocator::new().with_config(config).is_err());
        assert!(Allocator::new().with_config(AllocationConfig::default()).is_ok());
    }

    #[test]
    fn test_targets() {
        let patients = vec![
            patient("p1", Gender::Female, &[Grade::Three, Grade::Three]),
            patient("p2", Gender::Female, &[Grade::Three, Grade::One]),
        ];
        let scholars = vec![
            scholar("j1", Tier::Junior, Gender::Female),
            scholar("j2", Tier::Junior, Gender::Female),
            scholar("s1", Tier::Senior, Gender::Female),
            scholar("off", Tier::Middle, Gender::Female).unposted(),
        ];
        let a = Allocator::new()
            .with_tier_weights(TierWeights::new(0.6, 0.2, 0.2))
            .unwrap()
            .allocate(&patients, &scholars, &ContinuityMap::new());
        // Middle tier is off duty, so junior/senior renormalize to 0.75/0.25.
        let target = |id: &str| a.assignment_for(id).unwrap().target_points;
        assert!((target("j1") - 10.0 * 0.75 / 2.0).abs() < 1e-10);
        assert!((target("s1") - 10.0 * 0.25).abs() < 1e-10);
        assert!((target("off") - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_scholars() {
        let patients = vec![patient("p1", Gender::Female, &[Grade::One])];
        let a = Allocator::new().allocate(&patients, &[], &ContinuityMap::new());
        assert!(a.assignments.is_empty());
        assert_eq!(a.unassigned.len(), 1);
        assert_eq!(a.unassigned[0].reason, UnassignedReason::NoStaff);
    }

    #[test]
    fn test_empty_patients() {
        let scholars = vec![scholar("s1", Tier::Junior, Gender::Female)];
        let a = Allocator::new().allocate(&[], &scholars, &ContinuityMap::new());
        assert_eq!(a.assignments.len(), 1);
        assert!(a.assignments[0].is_empty());
        assert!(a.is_complete());
    }

    #[test]
    fn test_enforced_quota_exhausted() {
        let patients: Vec<Patient> = (1..=3)
            .map(|i| patient(&format!("p{i}"), Gender::Female, &[Grade::One]))
            .collect();
        let scholars = vec![scholar("s1", Tier::Senior, Gender::Female)];
        let a = Allocator::new()
            .with_quota_mode(QuotaMode::Enforced)
            .allocate(&patients, &scholars, &ContinuityMap::new());
        assert_eq!(a.assignment_for("s1").unwrap().patient_count(), 2);
        assert_eq!(a.unassigned.len(), 1);
        assert_eq!(a.unassigned[0].reason, UnassignedReason::QuotaExhausted);
        assert!(a.quota_overruns.is_empty());
    }

    #[test]
    fn test_advisory_quota_reports_overrun() {
        let patients: Vec<Patient> = (1..=3)
            .map(|i| patient(&format!("p{i}"), Gender::Female, &[Grade::One]))
            .collect();
        let scholars = vec![scholar("s1", Tier::Senior, Gender::Female)];
        let a = Allocator::new().allocate(&patients, &scholars, &ContinuityMap::new());
        assert!(a.is_complete());
        assert_eq!(a.quota_overruns.len(), 1);
        assert_eq!(a.quota_overruns[0].patients, 3);
        assert_eq!(a.quota_overruns[0].quota.max, 2);
    }

    #[test]
    fn test_request_builder() {
        let request = AllocationRequest::new(
            vec![patient("Asha", Gender::Female, &[Grade::One])],
            vec![
                scholar("s1", Tier::Junior, Gender::Female),
                scholar("s2", Tier::Senior, Gender::Female),
            ],
        )
        .with_continuity(ContinuityMap::new().with_entry("Asha", "s2"));
        let a = Allocator::new().allocate_request(&request);
        assert_eq!(owner(&a, "Asha").as_deref(), Some("s2"));
    }
}
