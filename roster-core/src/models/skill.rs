//! Aircraft types, skill disciplines and the skills built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of aircraft types (§3, extensible by configuration in a later deployment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    Aw139,
    H175,
    Sk92,
}

impl AircraftType {
    pub const ALL: [AircraftType; 3] = [AircraftType::Aw139, AircraftType::H175, AircraftType::Sk92];

    /// Input column tag, e.g. `aw139`.
    pub fn tag(&self) -> &'static str {
        match self {
            AircraftType::Aw139 => "aw139",
            AircraftType::H175 => "h175",
            AircraftType::Sk92 => "sk92",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.tag() == tag)
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Closed set of skill disciplines (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillDiscipline {
    Airframe,
    Engine,
    Avionics,
}

impl SkillDiscipline {
    pub const ALL: [SkillDiscipline; 3] =
        [SkillDiscipline::Airframe, SkillDiscipline::Engine, SkillDiscipline::Avionics];

    /// Input column suffix, e.g. `_af`.
    pub fn suffix(&self) -> &'static str {
        match self {
            SkillDiscipline::Airframe => "_af",
            SkillDiscipline::Engine => "_r",
            SkillDiscipline::Avionics => "_av",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.suffix() == suffix)
    }
}

impl fmt::Display for SkillDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// A `(aircraft, discipline)` pair, the unit a regular skill column encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillKey {
    pub aircraft: AircraftType,
    pub discipline: SkillDiscipline,
}

impl SkillKey {
    pub fn new(aircraft: AircraftType, discipline: SkillDiscipline) -> Self {
        Self { aircraft, discipline }
    }

    /// Regular-skill column name, e.g. `aw139_af`.
    pub fn column_name(&self) -> String {
        format!("{}{}", self.aircraft.tag(), self.discipline.suffix())
    }

    /// Inspector-skill column name, e.g. `aw139_af_inspec`.
    pub fn inspector_column_name(&self) -> String {
        format!("{}_inspec", self.column_name())
    }

    /// Parses a `<aircraft>_<discipline>` column name.
    pub fn parse(column: &str) -> Option<Self> {
        for aircraft in AircraftType::ALL {
            let prefix = aircraft.tag();
            if let Some(rest) = column.strip_prefix(prefix) {
                if let Some(discipline) = SkillDiscipline::from_suffix(rest) {
                    return Some(SkillKey::new(aircraft, discipline));
                }
            }
        }
        None
    }

    /// Parses a `<aircraft>_<discipline>_inspec` column name into its regular counterpart.
    pub fn parse_inspector(column: &str) -> Option<Self> {
        column.strip_suffix("_inspec").and_then(SkillKey::parse)
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
