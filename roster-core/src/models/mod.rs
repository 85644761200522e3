//! Value types for the domain and the inputs/outputs built around it.

pub mod domain;
pub mod ids;
pub mod rows;
pub mod skill;

pub use domain::{Assignment, AvoidancePairKey, Domain, SolveStatus, Solution, Slot};
pub use ids::{base_letter, shift_name, BaseId, MechanicId, PeriodId, ShiftId};
pub use rows::RawRow;
pub use skill::{AircraftType, SkillDiscipline, SkillKey};
