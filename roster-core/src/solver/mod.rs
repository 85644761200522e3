//! Solver Driver (§4.3): tries configured backends in preference order,
//! enforces the time limit, and returns a closed [`SolveStatus`] plus the raw
//! variable values for the Solution Extractor. Raw backend status codes
//! never escape this module (§9).

use crate::config::SolverPreference;
use crate::error::{AssignmentError, Result};
use crate::model::{self, variables::DecisionVariables};
use crate::models::domain::{Domain, SolveStatus};
use good_lp::{SolverModel, Variable};
use hashbrown::HashMap;
use std::time::Instant;
use tracing::{info, warn};

/// Options controlling the solve (§4.3, §6 `timeLimitSeconds`).
#[derive(Debug, Clone)]
pub struct SolverOptions {
    pub preferences: Vec<SolverPreference>,
    pub time_limit_seconds: Option<f64>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { preferences: vec![SolverPreference::Scip, SolverPreference::Cbc], time_limit_seconds: None }
    }
}

/// Variable values read out of the solved model, keyed by the same
/// `good_lp::Variable` handles the Model Builder produced (§4.4 reads these,
/// never a backend-specific solution type).
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub solve_seconds: f64,
    pub values: HashMap<Variable, f64>,
}

fn read_values(solution: &impl good_lp::Solution, decision: &DecisionVariables) -> HashMap<Variable, f64> {
    let mut values = HashMap::with_capacity(decision.x.len() + decision.y.len());
    for &var in decision.x.values() {
        values.insert(var, solution.value(var));
    }
    for &var in decision.y.values() {
        values.insert(var, solution.value(var));
    }
    values
}

fn status_from_error(err: &good_lp::ResolutionError) -> SolveStatus {
    match err {
        good_lp::ResolutionError::Infeasible => SolveStatus::Infeasible,
        good_lp::ResolutionError::Unbounded => SolveStatus::Unbounded,
        _ => SolveStatus::Abnormal,
    }
}

fn finish(
    result: std::result::Result<impl good_lp::Solution, good_lp::ResolutionError>,
    decision: &DecisionVariables,
    elapsed: f64,
    time_limit_seconds: Option<f64>,
) -> SolveOutcome {
    match result {
        Ok(solution) => {
            let values = read_values(&solution, decision);
            // good_lp's generic `SolverModel` trait doesn't surface a
            // separate "stopped on time limit with an incumbent" status;
            // approximate it from wall-clock proximity to the configured
            // limit (documented as an Open Question resolution in DESIGN.md).
            let status = match time_limit_seconds {
                Some(limit) if elapsed >= limit * 0.99 => SolveStatus::Feasible,
                _ => SolveStatus::Optimal,
            };
            SolveOutcome { status, solve_seconds: elapsed, values }
        }
        Err(err) => {
            let status = status_from_error(&err);
            warn!(error = %err, ?status, "solve did not return a usable incumbent");
            SolveOutcome { status, solve_seconds: elapsed, values: HashMap::new() }
        }
    }
}

/// Attempts one backend preference; `None` means it was compiled out
/// (`kSolverUnavailable` for that preference, §4.3).
fn try_preference(preference: SolverPreference, domain: &Domain, time_limit_seconds: Option<f64>) -> Option<SolveOutcome> {
    match preference {
        SolverPreference::Scip => try_scip(domain, time_limit_seconds),
        SolverPreference::Cbc => try_cbc(domain, time_limit_seconds),
        SolverPreference::Glop => try_highs(domain, time_limit_seconds),
    }
}

#[cfg(feature = "scip")]
fn try_scip(domain: &Domain, time_limit_seconds: Option<f64>) -> Option<SolveOutcome> {
    let model = model::build(domain);
    let problem = model.vars.minimise(model.objective).using(good_lp::solvers::scip::scip);
    let problem = match time_limit_seconds {
        Some(limit) => problem.set_time_limit(limit),
        None => problem,
    };
    let problem = model::builder::add_constraints(problem, domain, &model.decision);

    let start = Instant::now();
    let result = problem.solve();
    let elapsed = start.elapsed().as_secs_f64();

    Some(finish(result, &model.decision, elapsed, time_limit_seconds))
}

#[cfg(not(feature = "scip"))]
fn try_scip(_domain: &Domain, _time_limit_seconds: Option<f64>) -> Option<SolveOutcome> {
    None
}

#[cfg(feature = "coin_cbc")]
fn try_cbc(domain: &Domain, time_limit_seconds: Option<f64>) -> Option<SolveOutcome> {
    let model = model::build(domain);
    let problem = model.vars.minimise(model.objective).using(good_lp::solvers::coin_cbc::coin_cbc);
    let problem = match time_limit_seconds {
        Some(limit) => problem.set_time_limit(limit),
        None => problem,
    };
    let problem = model::builder::add_constraints(problem, domain, &model.decision);

    let start = Instant::now();
    let result = problem.solve();
    let elapsed = start.elapsed().as_secs_f64();

    Some(finish(result, &model.decision, elapsed, time_limit_seconds))
}

#[cfg(not(feature = "coin_cbc"))]
fn try_cbc(_domain: &Domain, _time_limit_seconds: Option<f64>) -> Option<SolveOutcome> {
    None
}

/// `GLOP` is LP-only and unsuitable for this 0/1 program; `HiGHS` is
/// substituted as the nearest fast open-source alternative (§4.3, `DESIGN.md`).
#[cfg(feature = "highs")]
fn try_highs(domain: &Domain, time_limit_seconds: Option<f64>) -> Option<SolveOutcome> {
    let model = model::build(domain);
    let problem = model.vars.minimise(model.objective).using(good_lp::solvers::highs::highs);
    let problem = match time_limit_seconds {
        Some(limit) => problem.set_time_limit(limit),
        None => problem,
    };
    let problem = model::builder::add_constraints(problem, domain, &model.decision);

    let start = Instant::now();
    let result = problem.solve();
    let elapsed = start.elapsed().as_secs_f64();

    Some(finish(result, &model.decision, elapsed, time_limit_seconds))
}

#[cfg(not(feature = "highs"))]
fn try_highs(_domain: &Domain, _time_limit_seconds: Option<f64>) -> Option<SolveOutcome> {
    None
}

/// Tries each preference in order, falling back on `kSolverUnavailable`
/// (§4.3). Returns `AssignmentError::SolverUnavailable` only if every
/// configured preference was compiled out.
pub fn solve(domain: &Domain, options: &SolverOptions) -> Result<SolveOutcome> {
    let mut tried = Vec::with_capacity(options.preferences.len());

    for &preference in &options.preferences {
        tried.push(preference.as_str().to_string());
        info!(preference = preference.as_str(), "attempting solver backend");
        match try_preference(preference, domain, options.time_limit_seconds) {
            Some(outcome) => return Ok(outcome),
            None => warn!(preference = preference.as_str(), "backend not compiled in, falling back"),
        }
    }

    Err(AssignmentError::SolverUnavailable { tried })
}
