//! Assignment Core for aircraft maintenance mechanic rostering.
//!
//! Canonicalizes raw tabular rows into a typed domain, synthesizes a 0/1
//! integer program over an abstract MIP backend, drives the solve, and
//! extracts a verified [`models::Solution`]. File ingestion, the UI, and
//! workbook rendering are external collaborators; this crate stops at the
//! structured solution value.

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod models;
pub mod normalize;
pub mod presentation;
pub mod solver;

pub use error::{AssignmentError, Result};
pub use models::{Domain, RawRow, Solution};
pub use solver::SolverOptions;

use tracing::info;

/// Runs one `normalize → build → solve → extract` cycle (§2 data flow).
pub fn assign(
    skill_rows: &[RawRow],
    schedule_rows: &[RawRow],
    cost_rows: &[RawRow],
    avoidance_rows: Option<&[RawRow]>,
    options: &SolverOptions,
) -> Result<Solution> {
    let domain = normalize::normalize(skill_rows, schedule_rows, cost_rows, avoidance_rows)?;

    // The driver builds its own model per backend attempt (each consumes a
    // fresh `ProblemVariables`); rebuilding the decision-variable layout here
    // is cheap (no solve) and gives the extractor the same variable indices
    // in the same deterministic order (§5 "Ordering guarantees").
    let model = model::build(&domain);
    let outcome = solver::solve(&domain, options)?;
    let solution = extract::extract(&domain, &model.decision, &outcome)?;

    info!(status = ?solution.solve_status, objective = solution.objective_value, "assignment cycle complete");
    Ok(solution)
}
