//! Constraint families and objective for the assignment model (§4.2).
//!
//! Emitted against the generic `good_lp::SolverModel` trait so this module
//! has no compile-time dependency on a specific backend; the Solver Driver
//! picks the concrete backend and calls `add_constraints` against it.

use crate::model::variables::DecisionVariables;
use crate::models::domain::Domain;
use crate::models::ids::MechanicId;
use crate::models::skill::SkillKey;
use good_lp::{constraint, Expression, SolverModel};
use hashbrown::HashMap;
use tracing::debug;

/// Per-skill lists of mechanics holding the regular/inspector variant,
/// avoiding the naive `O(|mechanics|^2)` scan per slot per column (§9).
struct SkillHolders {
    regular: HashMap<SkillKey, Vec<MechanicId>>,
    inspector: HashMap<SkillKey, Vec<MechanicId>>,
}

fn index_skill_holders(domain: &Domain) -> SkillHolders {
    let mut regular: HashMap<SkillKey, Vec<MechanicId>> = HashMap::new();
    let mut inspector: HashMap<SkillKey, Vec<MechanicId>> = HashMap::new();

    for &m in &domain.mechanics {
        if let Some(skills) = domain.regular_skills.get(&m) {
            for &key in skills {
                regular.entry(key).or_default().push(m);
            }
        }
        if let Some(skills) = domain.inspector_skills.get(&m) {
            for &key in skills {
                inspector.entry(key).or_default().push(m);
            }
        }
    }

    SkillHolders { regular, inspector }
}

fn single_assignment<P: SolverModel>(mut problem: P, domain: &Domain, dv: &DecisionVariables) -> P {
    let mut emitted = 0usize;
    for &m in &domain.mechanics {
        let total: Expression = domain
            .bases
            .iter()
            .flat_map(|&b| domain.periods.iter().flat_map(move |&g| domain.shifts.iter().map(move |&s| (b, g, s))))
            .map(|(b, g, s)| dv.x_of(m, b, g, s))
            .sum();
        problem = problem.with(constraint!(total <= 1));
        emitted += 1;
    }
    debug!(constraints = emitted, family = "single_assignment", "emitted");
    problem
}

fn skill_coverage<P: SolverModel>(mut problem: P, domain: &Domain, dv: &DecisionVariables) -> P {
    let mut emitted = 0usize;
    for (slot, aircraft, discipline) in domain.active_skill_coverage() {
        let key = SkillKey::new(aircraft, discipline);
        let holders: Expression = domain
            .mechanics
            .iter()
            .filter(|&&m| domain.has_regular_skill(m, key))
            .map(|&m| dv.x_of(m, slot.base, slot.period, slot.shift))
            .sum();
        problem = problem.with(constraint!(holders >= 1));
        emitted += 1;
    }
    debug!(constraints = emitted, family = "skill_coverage", "emitted");
    problem
}

fn inspector_coverage<P: SolverModel>(mut problem: P, domain: &Domain, dv: &DecisionVariables) -> P {
    let mut emitted = 0usize;
    for (slot, key) in domain.active_inspector_demand() {
        let holders: Expression = domain
            .mechanics
            .iter()
            .filter(|&&m| domain.has_inspector_skill(m, key))
            .map(|&m| dv.x_of(m, slot.base, slot.period, slot.shift))
            .sum();
        problem = problem.with(constraint!(holders >= 1));
        emitted += 1;
    }
    debug!(constraints = emitted, family = "inspector_coverage", "emitted");
    problem
}

/// Constraint family 4: only generated per `(slot, m*)` when at least one
/// *other* mechanic holds the matching regular skill (§3 invariant 5, §9
/// "Self-inspection conditional" — an acknowledged gap, not silently closed).
fn no_self_inspection<P: SolverModel>(mut problem: P, domain: &Domain, dv: &DecisionVariables, holders: &SkillHolders) -> P {
    let mut emitted = 0usize;
    for (slot, key) in domain.active_inspector_demand() {
        let Some(inspector_holders) = holders.inspector.get(&key) else { continue };
        let Some(regular_holders) = holders.regular.get(&key) else { continue };

        for &m_star in inspector_holders {
            let others: Vec<MechanicId> = regular_holders.iter().copied().filter(|&m| m != m_star).collect();
            if others.is_empty() {
                continue;
            }
            let others_sum: Expression = others.iter().map(|&m| dv.x_of(m, slot.base, slot.period, slot.shift)).sum();
            let lhs = dv.x_of(m_star, slot.base, slot.period, slot.shift) - others_sum;
            problem = problem.with(constraint!(lhs <= 0));
            emitted += 1;
        }
    }
    debug!(constraints = emitted, family = "no_self_inspection", "emitted");
    problem
}

fn avoidance_linearization<P: SolverModel>(mut problem: P, dv: &DecisionVariables) -> P {
    let mut emitted = 0usize;
    for (&(pair, slot), &y) in &dv.y {
        let x1 = dv.x_of(pair.0, slot.base, slot.period, slot.shift);
        let x2 = dv.x_of(pair.1, slot.base, slot.period, slot.shift);
        problem = problem.with(constraint!(y <= x1));
        problem = problem.with(constraint!(y <= x2));
        problem = problem.with(constraint!(y >= x1 + x2 - 1));
        emitted += 3;
    }
    debug!(constraints = emitted, family = "avoidance_linearization", "emitted");
    problem
}

/// Emits all five constraint families into `problem` (§4.2).
pub fn add_constraints<P: SolverModel>(problem: P, domain: &Domain, dv: &DecisionVariables) -> P {
    let holders = index_skill_holders(domain);

    let problem = single_assignment(problem, domain, dv);
    let problem = skill_coverage(problem, domain, dv);
    let problem = inspector_coverage(problem, domain, dv);
    let problem = no_self_inspection(problem, domain, dv, &holders);
    avoidance_linearization(problem, dv)
}

/// Movement cost plus avoidance penalty, minimized (§4.2). The cost term
/// depends only on `(mechanic, base)`, never on `(period, shift)` — preserve
/// this shape exactly (§9 "Cost shape").
pub fn build_objective(domain: &Domain, dv: &DecisionVariables) -> Expression {
    let movement_cost: Expression = domain
        .mechanics
        .iter()
        .flat_map(|&m| domain.bases.iter().map(move |&b| (m, b)))
        .flat_map(|(m, b)| {
            domain
                .periods
                .iter()
                .flat_map(move |&g| domain.shifts.iter().map(move |&s| (g, s)))
                .map(move |(g, s)| dv.x_of(m, b, g, s) * domain.cost_of(m, b))
        })
        .sum();

    let avoidance_penalty: Expression =
        dv.y.iter().map(|(&(pair, _slot), &y)| y * domain.avoidance_penalty(pair.0, pair.1)).sum();

    movement_cost + avoidance_penalty
}
