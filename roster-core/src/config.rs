//! Configuration surface (§6) and logging setup.
//!
//! Mirrors the original implementation's `Config` class: read from
//! environment variables, validate, and warn-and-default on anything
//! invalid rather than failing the run.

use std::env;
use tracing::warn;

const DEFAULT_SOLVER: &str = "SCIP";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEFAULT_DATA_DIR: &str = "data";

/// Preferred MIP backend (§6 `solver` option).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPreference {
    Scip,
    Cbc,
    Glop,
}

impl SolverPreference {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SCIP" => Some(Self::Scip),
            "CBC" => Some(Self::Cbc),
            "GLOP" => Some(Self::Glop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolverPreference::Scip => "SCIP",
            SolverPreference::Cbc => "CBC",
            SolverPreference::Glop => "GLOP",
        }
    }
}

/// Application configuration (§6 "Configuration surface").
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub solver: SolverPreference,
    pub log_level: String,
    pub data_dir: String,
    pub time_limit_seconds: Option<f64>,
}

impl RosterConfig {
    /// Builds configuration from environment variables, defaulting and
    /// warning on anything unrecognized (mirrors `config.py::Config._validate`).
    pub fn from_env() -> Self {
        let solver_raw = env::var("SOLVER").unwrap_or_else(|_| DEFAULT_SOLVER.to_string());
        let solver = SolverPreference::parse(&solver_raw).unwrap_or_else(|| {
            warn!(invalid = %solver_raw, default = DEFAULT_SOLVER, "invalid solver, defaulting");
            SolverPreference::parse(DEFAULT_SOLVER).expect("default solver is always valid")
        });

        let log_level_raw = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        let log_level = if is_valid_log_level(&log_level_raw) {
            log_level_raw
        } else {
            warn!(invalid = %log_level_raw, default = DEFAULT_LOG_LEVEL, "invalid log level, defaulting");
            DEFAULT_LOG_LEVEL.to_string()
        };

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

        let time_limit_seconds = env::var("TIME_LIMIT_SECONDS").ok().and_then(|raw| raw.parse::<f64>().ok());

        Self { solver, log_level, data_dir, time_limit_seconds }
    }

    /// Installs a `tracing-subscriber` filtered at the configured level,
    /// the Rust equivalent of `logging.basicConfig(...)`.
    pub fn init_tracing(&self) {
        let filter = tracing_subscriber::EnvFilter::try_new(&self.log_level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_LEVEL));

        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            solver: SolverPreference::parse(DEFAULT_SOLVER).expect("default solver is always valid"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            time_limit_seconds: None,
        }
    }
}

fn is_valid_log_level(value: &str) -> bool {
    matches!(value, "DEBUG" | "INFO" | "WARNING" | "ERROR" | "CRITICAL")
}
