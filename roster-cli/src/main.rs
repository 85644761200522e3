//! Thin CSV adapter driving one `build -> solve -> extract` cycle of the
//! assignment core. Exists only to exercise the core end-to-end from CSV
//! fixtures; it is not the roster-rendering deliverable and must not grow
//! workbook-formatting logic (SPEC §1).

use clap::Parser;
use hashbrown::HashMap;
use roster_core::config::{RosterConfig, SolverPreference};
use roster_core::models::RawRow;
use roster_core::solver::SolverOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "roster-cli", about = "Solve one mechanic rostering assignment from CSV fixtures")]
struct Args {
    /// CSV of mechanic_id plus skill/inspector columns.
    #[arg(long)]
    skills: PathBuf,

    /// CSV of base_id, period, shift plus demand/inspector-requirement columns.
    #[arg(long)]
    schedule: PathBuf,

    /// CSV of id plus base-letter cost columns.
    #[arg(long)]
    cost: PathBuf,

    /// Optional CSV of mechanic_id, avoid_mechanic_id, penalty.
    #[arg(long)]
    avoidance: Option<PathBuf>,

    /// Preferred solver backend, overriding the `SOLVER` environment variable.
    #[arg(long)]
    solver: Option<String>,

    /// Solver wall-clock cap in seconds, overriding `TIME_LIMIT_SECONDS`.
    #[arg(long)]
    time_limit_seconds: Option<f64>,
}

fn read_rows(path: &Path) -> Result<Vec<RawRow>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<HashMap<String, String>>() {
        rows.push(RawRow::new(record?));
    }
    Ok(rows)
}

fn exit_code_for(solution: &roster_core::Solution) -> ExitCode {
    use roster_core::models::SolveStatus;
    match solution.solve_status {
        SolveStatus::Optimal | SolveStatus::Feasible => ExitCode::from(0),
        SolveStatus::Infeasible => ExitCode::from(1),
        SolveStatus::Unbounded | SolveStatus::Abnormal | SolveStatus::NotSolved => ExitCode::from(3),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut config = RosterConfig::from_env();
    config.init_tracing();

    if let Some(solver) = &args.solver {
        if let Some(preference) = SolverPreference::parse(solver) {
            config.solver = preference;
        } else {
            error!(value = %solver, "unrecognized --solver value, keeping configured default");
        }
    }
    let time_limit_seconds = args.time_limit_seconds.or(config.time_limit_seconds);

    let skill_rows = match read_rows(&args.skills) {
        Ok(rows) => rows,
        Err(err) => {
            error!(error = %err, path = %args.skills.display(), "failed to read skills CSV");
            return ExitCode::from(2);
        }
    };
    let schedule_rows = match read_rows(&args.schedule) {
        Ok(rows) => rows,
        Err(err) => {
            error!(error = %err, path = %args.schedule.display(), "failed to read schedule CSV");
            return ExitCode::from(2);
        }
    };
    let cost_rows = match read_rows(&args.cost) {
        Ok(rows) => rows,
        Err(err) => {
            error!(error = %err, path = %args.cost.display(), "failed to read cost CSV");
            return ExitCode::from(2);
        }
    };
    let avoidance_rows = match &args.avoidance {
        Some(path) => match read_rows(path) {
            Ok(rows) => Some(rows),
            Err(err) => {
                error!(error = %err, path = %path.display(), "failed to read avoidance CSV");
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    let mut preferences = vec![config.solver];
    for fallback in [SolverPreference::Scip, SolverPreference::Cbc, SolverPreference::Glop] {
        if fallback != config.solver {
            preferences.push(fallback);
        }
    }
    let options = SolverOptions { preferences, time_limit_seconds };

    info!(
        skills = skill_rows.len(),
        schedule = schedule_rows.len(),
        cost = cost_rows.len(),
        avoidance = avoidance_rows.as_ref().map_or(0, Vec::len),
        "loaded input rows"
    );

    let solution = roster_core::assign(&skill_rows, &schedule_rows, &cost_rows, avoidance_rows.as_deref(), &options);

    match solution {
        Ok(solution) => {
            let code = exit_code_for(&solution);
            match serde_json::to_string_pretty(&solution) {
                Ok(json) => println!("{json}"),
                Err(err) => error!(error = %err, "failed to serialize solution"),
            }
            code
        }
        Err(err) => {
            error!(error = %err, "assignment failed");
            match err {
                roster_core::AssignmentError::InputSchema { .. } | roster_core::AssignmentError::InputType { .. } => ExitCode::from(2),
                _ => ExitCode::from(3),
            }
        }
    }
}
