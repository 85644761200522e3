//! Error kinds for the Assignment Core (§7).
//!
//! `AvoidanceParse` is the one kind the Normalizer recovers from locally
//! (logs and continues with an empty avoidance map for the offending row);
//! every other variant is fatal and propagates to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssignmentError {
    /// A required column is absent, or a row is structurally malformed (`kInputSchema`).
    #[error("input schema error in {source_name}: missing or malformed column '{column}' (row {row})")]
    InputSchema { source_name: &'static str, column: String, row: usize },

    /// A required numeric cell could not be coerced to the expected type (`kInputType`).
    #[error("input type error in {source_name}: cell '{column}' at row {row} is not numeric")]
    InputType { source_name: &'static str, column: String, row: usize },

    /// No configured solver backend could be constructed (`kSolverUnavailable`).
    #[error("no configured solver backend is available; tried: {tried:?}")]
    SolverUnavailable { tried: Vec<String> },

    /// The extracted solution violates one of the §3 invariants (`kInvariantViolation`).
    #[error("solution invariant '{invariant}' violated: {detail}")]
    InvariantViolation { invariant: &'static str, detail: String },
}

pub type Result<T> = std::result::Result<T, AssignmentError>;
