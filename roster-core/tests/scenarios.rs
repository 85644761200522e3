//! End-to-end scenarios driving the public `assign` entry point over hand-built
//! rows, mirroring the literal examples worked through while designing the
//! constraint families and the avoidance penalty.

use hashbrown::HashMap as HMap;
use roster_core::models::{MechanicId, SkillDiscipline, SolveStatus};
use roster_core::{assign, RawRow, SolverOptions};

fn row(pairs: &[(&str, &str)]) -> RawRow {
    let map: HMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    RawRow::new(map)
}

fn full_skill_row(mechanic_id: i64) -> RawRow {
    row(&[("mechanic_id", &mechanic_id.to_string()), ("aw139_af", "1"), ("aw139_r", "1"), ("aw139_av", "1")])
}

fn options() -> SolverOptions {
    SolverOptions::default()
}

#[test]
fn s1_single_slot_picks_cheaper_mechanic() {
    let skills = vec![full_skill_row(1), full_skill_row(2)];
    let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1")])];
    let cost = vec![row(&[("id", "1"), ("A", "10")]), row(&[("id", "2"), ("A", "20")])];

    let solution = assign(&skills, &schedule, &cost, None, &options()).unwrap();

    assert_eq!(solution.solve_status, SolveStatus::Optimal);
    assert_eq!(solution.assignments.len(), 1);
    assert_eq!(solution.assignments[0].mechanic, MechanicId(1));
    assert_eq!(solution.movement_cost, 10.0);
    assert_eq!(solution.objective_value, 10.0);
}

/// Inspector demand forces mechanic 1 (the sole airframe-inspector holder) to
/// the slot, and the no-self-inspection family forces a cheap regular-skill
/// partner (mechanic 2) alongside it rather than leaving the expensive
/// mechanic 3 unused for nothing.
#[test]
fn s2_inspector_forced_with_partner() {
    let skills = vec![
        row(&[("mechanic_id", "1"), ("aw139_af", "1"), ("aw139_r", "1"), ("aw139_av", "1"), ("aw139_af_inspec", "1")]),
        full_skill_row(2),
        full_skill_row(3),
    ];
    let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1"), ("aw139_af_inspec", "1")])];
    let cost = vec![
        row(&[("id", "1"), ("A", "5")]),
        row(&[("id", "2"), ("A", "5")]),
        row(&[("id", "3"), ("A", "100")]),
    ];

    let solution = assign(&skills, &schedule, &cost, None, &options()).unwrap();

    assert_eq!(solution.solve_status, SolveStatus::Optimal);
    let assigned: Vec<MechanicId> = solution.assignments.iter().map(|a| a.mechanic).collect();
    assert!(assigned.contains(&MechanicId(1)));
    assert!(assigned.contains(&MechanicId(2)));
    assert!(!assigned.contains(&MechanicId(3)));
    assert_eq!(solution.movement_cost, 10.0);
}

/// Only mechanic 1 holds any skill at all for this aircraft, so the engine
/// and avionics coverage constraints have no holder to satisfy — the slot is
/// infeasible regardless of the self-inspection rule.
#[test]
fn s3_sole_inspector_with_no_alternate_is_infeasible() {
    let skills = vec![row(&[("mechanic_id", "1"), ("aw139_af", "1"), ("aw139_af_inspec", "1")])];
    let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1"), ("aw139_af_inspec", "1")])];
    let cost = vec![row(&[("id", "1"), ("A", "10")])];

    let solution = assign(&skills, &schedule, &cost, None, &options()).unwrap();

    assert_eq!(solution.solve_status, SolveStatus::Infeasible);
    assert!(solution.assignments.is_empty());
}

/// Two slots: slot A needs an inspector (only mechanic 2 qualifies) plus a
/// co-assigned regular-skill partner; slot B just needs any full-skill
/// mechanic. Mechanics 1 and 3 are otherwise cost-tied as that partner, so
/// without the avoidance penalty the solver is indifferent between pairing
/// mechanic 1 with the inspector (triggering the avoided pair) or pairing
/// mechanic 3. The avoidance penalty between 1 and 2 breaks the tie toward
/// keeping them apart, even though doing so costs nothing extra in movement
/// cost here (the penalty only has to outweigh the *other* candidate's cost).
#[test]
fn s4_avoidance_penalty_breaks_a_cost_tie() {
    let skills = vec![
        full_skill_row(1),
        row(&[("mechanic_id", "2"), ("aw139_af", "1"), ("aw139_r", "1"), ("aw139_av", "1"), ("aw139_af_inspec", "1")]),
        full_skill_row(3),
    ];
    let schedule = vec![
        row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1"), ("aw139_af_inspec", "1")]),
        row(&[("base_id", "2"), ("period", "1"), ("shift", "1"), ("aw139", "1")]),
    ];
    let cost = vec![
        row(&[("id", "1"), ("A", "1"), ("B", "1")]),
        row(&[("id", "2"), ("A", "1"), ("B", "1")]),
        row(&[("id", "3"), ("A", "1"), ("B", "1")]),
    ];
    let avoidance = vec![row(&[("mechanic_id", "1"), ("avoid_mechanic_id", "2"), ("penalty", "1000")])];

    let solution = assign(&skills, &schedule, &cost, Some(&avoidance), &options()).unwrap();

    assert_eq!(solution.solve_status, SolveStatus::Optimal);
    assert_eq!(solution.avoidance_penalty, 0.0);
    assert_eq!(solution.movement_cost, 3.0);

    let base_of = |mechanic: MechanicId| {
        solution.assignments.iter().find(|a| a.mechanic == mechanic).map(|a| a.base.0)
    };
    assert_eq!(base_of(MechanicId(2)), Some(1));
    assert_ne!(base_of(MechanicId(1)), Some(1));
}

/// A malformed avoidance file is recovered per-row (logged and skipped), not
/// treated as fatal, and the solve proceeds exactly as if no avoidance rows
/// had been supplied at all.
#[test]
fn s5_malformed_avoidance_file_degrades_to_no_avoidance() {
    let skills = vec![full_skill_row(1), full_skill_row(2)];
    let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1")])];
    let cost = vec![row(&[("id", "1"), ("A", "10")]), row(&[("id", "2"), ("A", "20")])];
    let malformed_avoidance = vec![row(&[("mechanic_id", "1"), ("avoid_mechanic_id", "2")])]; // missing penalty

    let with_bad_file = assign(&skills, &schedule, &cost, Some(&malformed_avoidance), &options()).unwrap();
    let without_file = assign(&skills, &schedule, &cost, None, &options()).unwrap();

    assert_eq!(with_bad_file.solve_status, SolveStatus::Optimal);
    assert_eq!(with_bad_file.assignments.len(), without_file.assignments.len());
    assert_eq!(with_bad_file.objective_value, without_file.objective_value);
    assert_eq!(with_bad_file.assignments[0].mechanic, MechanicId(1));
}

/// Avoidance rows for both orderings of the same pair collapse into the one
/// canonical entry the normalizer stores, so the penalty is applied exactly
/// once per slot rather than doubled.
#[test]
fn s6_avoidance_symmetry_is_not_double_counted() {
    let skills = vec![full_skill_row(1), full_skill_row(2)];
    let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1")])];
    let cost = vec![row(&[("id", "1"), ("A", "1")]), row(&[("id", "2"), ("A", "1")])];
    let avoidance = vec![
        row(&[("mechanic_id", "1"), ("avoid_mechanic_id", "2"), ("penalty", "50")]),
        row(&[("mechanic_id", "2"), ("avoid_mechanic_id", "1"), ("penalty", "50")]),
    ];

    let solution = assign(&skills, &schedule, &cost, Some(&avoidance), &options()).unwrap();

    // Only one mechanic is needed at the single slot, so the avoidance pair
    // is never co-assigned here; this just confirms the symmetric rows
    // normalize to a solvable model rather than, say, a duplicated penalty
    // the objective would otherwise double.
    assert_eq!(solution.solve_status, SolveStatus::Optimal);
    assert_eq!(solution.avoidance_penalty, 0.0);
    assert_eq!(solution.movement_cost, 1.0);
}

/// Each mechanic is the sole holder of one of the three disciplines the slot
/// needs, so all three are forced onto it regardless of cost or avoidance —
/// including the two that avoid each other. This is the one path that
/// actually walks the nonzero branch of the penalty-summing loop, rather
/// than merely confirming it stays at zero.
#[test]
fn avoidance_penalty_accrues_when_a_pair_is_forced_onto_the_same_slot() {
    let skills = vec![
        row(&[("mechanic_id", "1"), ("aw139_af", "1")]),
        row(&[("mechanic_id", "2"), ("aw139_r", "1")]),
        row(&[("mechanic_id", "3"), ("aw139_av", "1")]),
    ];
    let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1")])];
    let cost = vec![
        row(&[("id", "1"), ("A", "1")]),
        row(&[("id", "2"), ("A", "1")]),
        row(&[("id", "3"), ("A", "1")]),
    ];
    let avoidance = vec![row(&[("mechanic_id", "1"), ("avoid_mechanic_id", "2"), ("penalty", "37")])];

    let solution = assign(&skills, &schedule, &cost, Some(&avoidance), &options()).unwrap();

    assert_eq!(solution.solve_status, SolveStatus::Optimal);
    let assigned: Vec<MechanicId> = solution.assignments.iter().map(|a| a.mechanic).collect();
    assert!(assigned.contains(&MechanicId(1)));
    assert!(assigned.contains(&MechanicId(2)));
    assert!(assigned.contains(&MechanicId(3)));
    assert_eq!(solution.movement_cost, 3.0);
    assert_eq!(solution.avoidance_penalty, 37.0);
    assert_eq!(solution.objective_value, solution.movement_cost + 37.0);
}

#[test]
fn avionics_specialist_displays_as_avionic() {
    use roster_core::presentation::{display_position, DisplayPosition};

    let skills = vec![
        row(&[("mechanic_id", "1"), ("aw139_av", "1")]),
        row(&[("mechanic_id", "2"), ("aw139_af", "1"), ("aw139_r", "1")]),
    ];
    let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1")])];
    let cost = vec![row(&[("id", "1"), ("A", "1")]), row(&[("id", "2"), ("A", "5")])];

    let solution = assign(&skills, &schedule, &cost, None, &options()).unwrap();
    assert_eq!(solution.assignments.len(), 2);
    let assignment = solution.assignments.iter().find(|a| a.mechanic == MechanicId(1)).unwrap();

    let domain = roster_core::normalize::normalize(&skills, &schedule, &cost, None).unwrap();
    assert_eq!(display_position(&domain, MechanicId(1), assignment, &solution.assignments), DisplayPosition::Avionic);
    assert!(!roster_core::presentation::has_discipline(&domain, MechanicId(1), SkillDiscipline::Airframe));
}
