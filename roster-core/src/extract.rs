//! Solution Extractor (§4.4): reads solved variable values, builds the
//! canonical assignment set, accounts cost and penalty, and validates §3
//! invariants 2-5 before handing back a pure [`Solution`] value.

use crate::error::{AssignmentError, Result};
use crate::model::variables::DecisionVariables;
use crate::models::domain::{Assignment, Domain, Slot, SolveStatus, Solution};
use crate::models::ids::{base_letter, MechanicId};
use crate::solver::SolveOutcome;
use hashbrown::HashMap;
use tracing::info;

fn is_chosen(outcome: &SolveOutcome, var: good_lp::Variable) -> bool {
    outcome.values.get(&var).copied().unwrap_or(0.0) > 0.5
}

/// Renders a slot for diagnostics using the display-letter base map where it
/// applies, falling back to the raw id outside the current deployment's map.
fn describe_slot(slot: Slot) -> String {
    match base_letter(slot.base) {
        Some(letter) => format!("({letter},g{},s{})", slot.period, slot.shift),
        None => format!("(b{},g{},s{})", slot.base, slot.period, slot.shift),
    }
}

/// Reads the solved model into a [`Solution`] (§4.4). Returns an empty
/// assignment set, unvalidated, when the solver did not reach a usable
/// status — invariant checks only apply to a real incumbent.
pub fn extract(domain: &Domain, decision: &DecisionVariables, outcome: &SolveOutcome) -> Result<Solution> {
    if !outcome.status.has_solution() {
        return Ok(Solution {
            assignments: Vec::new(),
            movement_cost: 0.0,
            avoidance_penalty: 0.0,
            objective_value: 0.0,
            solve_status: outcome.status,
            solve_seconds: outcome.solve_seconds,
            unassigned_mechanics: domain.mechanics.len(),
        });
    }

    let mut assignments = Vec::with_capacity(domain.mechanics.len());
    for &m in &domain.mechanics {
        for &b in &domain.bases {
            for &g in &domain.periods {
                for &s in &domain.shifts {
                    if is_chosen(outcome, decision.x_of(m, b, g, s)) {
                        assignments.push(Assignment::new(m, Slot::new(b, g, s), domain.cost_of(m, b)));
                    }
                }
            }
        }
    }

    let movement_cost: f64 = assignments.iter().map(|a| a.cost).sum();

    let mut avoidance_penalty = 0.0;
    for (&(pair, _slot), &var) in &decision.y {
        if is_chosen(outcome, var) {
            avoidance_penalty += domain.avoidance_penalty(pair.0, pair.1);
        }
    }

    let assignments_by_slot = index_by_slot(&assignments);

    validate_single_assignment(&assignments)?;
    validate_skill_coverage(domain, &assignments_by_slot)?;
    validate_inspector_coverage(domain, &assignments_by_slot)?;
    validate_no_self_inspection(domain, &assignments_by_slot)?;

    let objective_value = movement_cost + avoidance_penalty;
    let unassigned_mechanics = domain.mechanics.len() - assignments.len();

    info!(
        assignments = assignments.len(),
        unassigned = unassigned_mechanics,
        movement_cost,
        avoidance_penalty,
        objective_value,
        "solution extracted"
    );

    Ok(Solution {
        assignments,
        movement_cost,
        avoidance_penalty,
        objective_value,
        solve_status: outcome.status,
        solve_seconds: outcome.solve_seconds,
        unassigned_mechanics,
    })
}

fn index_by_slot(assignments: &[Assignment]) -> HashMap<Slot, Vec<MechanicId>> {
    let mut by_slot: HashMap<Slot, Vec<MechanicId>> = HashMap::new();
    for a in assignments {
        by_slot.entry(a.slot()).or_default().push(a.mechanic);
    }
    by_slot
}

fn validate_single_assignment(assignments: &[Assignment]) -> Result<()> {
    let mut seen: HashMap<MechanicId, ()> = HashMap::with_capacity(assignments.len());
    for a in assignments {
        if seen.insert(a.mechanic, ()).is_some() {
            return Err(AssignmentError::InvariantViolation {
                invariant: "single_assignment",
                detail: format!("mechanic {} appears in more than one assignment", a.mechanic),
            });
        }
    }
    Ok(())
}

fn validate_skill_coverage(domain: &Domain, assignments_by_slot: &HashMap<Slot, Vec<MechanicId>>) -> Result<()> {
    for (slot, aircraft, discipline) in domain.active_skill_coverage() {
        let key = crate::models::skill::SkillKey::new(aircraft, discipline);
        let covered = assignments_by_slot
            .get(&slot)
            .is_some_and(|mechanics| mechanics.iter().any(|&m| domain.has_regular_skill(m, key)));
        if !covered {
            return Err(AssignmentError::InvariantViolation {
                invariant: "skill_coverage",
                detail: format!("slot {} missing regular skill {key}", describe_slot(slot)),
            });
        }
    }
    Ok(())
}

fn validate_inspector_coverage(domain: &Domain, assignments_by_slot: &HashMap<Slot, Vec<MechanicId>>) -> Result<()> {
    for (slot, key) in domain.active_inspector_demand() {
        let covered = assignments_by_slot
            .get(&slot)
            .is_some_and(|mechanics| mechanics.iter().any(|&m| domain.has_inspector_skill(m, key)));
        if !covered {
            return Err(AssignmentError::InvariantViolation {
                invariant: "inspector_coverage",
                detail: format!("slot {} missing inspector skill {key}", describe_slot(slot)),
            });
        }
    }
    Ok(())
}

/// §3 invariant 5: conditional on an alternate mechanic existing in the
/// whole pool, not merely among those assigned (§9 "Self-inspection conditional").
fn validate_no_self_inspection(domain: &Domain, assignments_by_slot: &HashMap<Slot, Vec<MechanicId>>) -> Result<()> {
    for (slot, key) in domain.active_inspector_demand() {
        let Some(mechanics) = assignments_by_slot.get(&slot) else { continue };

        for &m in mechanics {
            if !domain.has_inspector_skill(m, key) {
                continue;
            }
            let alternate_exists_in_pool = domain.mechanics.iter().any(|&other| other != m && domain.has_regular_skill(other, key));
            if !alternate_exists_in_pool {
                continue;
            }
            let alternate_assigned = mechanics.iter().any(|&other| other != m && domain.has_regular_skill(other, key));
            if !alternate_assigned {
                return Err(AssignmentError::InvariantViolation {
                    invariant: "no_self_inspection",
                    detail: format!(
                        "mechanic {m} inspects own work for skill {key} at slot {} with no co-assigned alternate",
                        describe_slot(slot)
                    ),
                });
            }
        }
    }
    Ok(())
}
