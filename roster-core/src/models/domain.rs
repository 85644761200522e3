//! The normalized in-memory domain and the solution value types built from it.

use crate::models::ids::{shift_name, BaseId, MechanicId, PeriodId, ShiftId};
use crate::models::skill::{AircraftType, SkillDiscipline, SkillKey};
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

/// A `(base, period, shift)` triple, the unit of demand (§3, §GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub base: BaseId,
    pub period: PeriodId,
    pub shift: ShiftId,
}

impl Slot {
    pub fn new(base: BaseId, period: PeriodId, shift: ShiftId) -> Self {
        Self { base, period, shift }
    }
}

/// Canonical, symmetric key for an avoidance pair: always `(min, max)`.
///
/// Both orderings are still reachable through [`Domain::avoidance_penalty`];
/// only one entry is stored (§9, "Symmetric avoidance map").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AvoidancePairKey(pub MechanicId, pub MechanicId);

impl AvoidancePairKey {
    pub fn new(m1: MechanicId, m2: MechanicId) -> Self {
        if m1 <= m2 {
            Self(m1, m2)
        } else {
            Self(m2, m1)
        }
    }
}

/// The typed, immutable domain produced by the Input Normalizer (§4.1).
#[derive(Debug, Clone, Default)]
pub struct Domain {
    /// Sorted, duplicate-free mechanic ids.
    pub mechanics: Vec<MechanicId>,
    /// Sorted, duplicate-free base ids.
    pub bases: Vec<BaseId>,
    /// Sorted, duplicate-free period ids.
    pub periods: Vec<PeriodId>,
    /// Sorted, duplicate-free shift ids.
    pub shifts: Vec<ShiftId>,

    /// `regular_skills[m]` is the set of regular `SkillKey`s mechanic `m` holds.
    pub regular_skills: HashMap<MechanicId, HashSet<SkillKey>>,
    /// `inspector_skills[m]` is the set of inspector `SkillKey`s mechanic `m` holds.
    pub inspector_skills: HashMap<MechanicId, HashSet<SkillKey>>,

    /// `demand[slot][aircraft]` is the positive-count activation flag for the
    /// three discipline-coverage constraints at that slot (§3 invariant 3).
    pub demand: HashMap<Slot, HashMap<AircraftType, u32>>,
    /// `inspector_demand[slot][skill]` is the inspector requirement count at that slot.
    pub inspector_demand: HashMap<Slot, HashMap<SkillKey, u32>>,

    /// `cost[(mechanic, base)]`, missing entries are zero.
    pub cost: HashMap<(MechanicId, BaseId), f64>,

    /// Canonical symmetric avoidance penalties, keyed by `(min, max)`.
    pub avoidance: HashMap<AvoidancePairKey, f64>,
}

impl Domain {
    /// Cost of placing `mechanic` at `base`; zero if absent (§3).
    pub fn cost_of(&self, mechanic: MechanicId, base: BaseId) -> f64 {
        self.cost.get(&(mechanic, base)).copied().unwrap_or(0.0)
    }

    /// Avoidance penalty between two (possibly equal) mechanics; zero if absent or equal.
    pub fn avoidance_penalty(&self, m1: MechanicId, m2: MechanicId) -> f64 {
        if m1 == m2 {
            return 0.0;
        }
        self.avoidance.get(&AvoidancePairKey::new(m1, m2)).copied().unwrap_or(0.0)
    }

    /// All unordered avoidance pairs with a nonzero penalty, as `(m1 < m2, penalty)`.
    pub fn avoidance_pairs(&self) -> impl Iterator<Item = (MechanicId, MechanicId, f64)> + '_ {
        self.avoidance.iter().map(|(key, &penalty)| (key.0, key.1, penalty))
    }

    /// True iff `mechanic` holds the regular skill for `key`.
    pub fn has_regular_skill(&self, mechanic: MechanicId, key: SkillKey) -> bool {
        self.regular_skills.get(&mechanic).is_some_and(|skills| skills.contains(&key))
    }

    /// True iff `mechanic` holds the inspector skill for `key`.
    pub fn has_inspector_skill(&self, mechanic: MechanicId, key: SkillKey) -> bool {
        self.inspector_skills.get(&mechanic).is_some_and(|skills| skills.contains(&key))
    }

    /// All active `(slot, aircraft, discipline)` coverage obligations (§4.2 family 2).
    pub fn active_skill_coverage(&self) -> impl Iterator<Item = (Slot, AircraftType, SkillDiscipline)> + '_ {
        self.demand.iter().flat_map(|(&slot, per_aircraft)| {
            per_aircraft.iter().filter(|(_, &count)| count > 0).flat_map(move |(&aircraft, _)| {
                SkillDiscipline::ALL.into_iter().map(move |discipline| (slot, aircraft, discipline))
            })
        })
    }

    /// All active `(slot, inspector skill)` obligations (§4.2 family 3).
    pub fn active_inspector_demand(&self) -> impl Iterator<Item = (Slot, SkillKey)> + '_ {
        self.inspector_demand
            .iter()
            .flat_map(|(&slot, per_skill)| per_skill.iter().filter(|(_, &count)| count > 0).map(move |(&key, _)| (slot, key)))
    }
}

/// A chosen placement of one mechanic at one slot (§3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub mechanic: MechanicId,
    pub base: BaseId,
    pub period: PeriodId,
    pub shift: ShiftId,
    pub shift_name: &'static str,
    pub cost: f64,
}

impl Assignment {
    pub fn new(mechanic: MechanicId, slot: Slot, cost: f64) -> Self {
        Self { mechanic, base: slot.base, period: slot.period, shift: slot.shift, shift_name: shift_name(slot.shift), cost }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.base, self.period, self.shift)
    }
}

/// Closed solver status enum; raw backend status codes never escape this module (§9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    Abnormal,
    NotSolved,
}

impl SolveStatus {
    /// Statuses carrying a usable assignment set (§4.4, §7).
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// The pure-value result of a `build → solve → extract` cycle (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub assignments: Vec<Assignment>,
    pub movement_cost: f64,
    pub avoidance_penalty: f64,
    pub objective_value: f64,
    pub solve_status: SolveStatus,
    pub solve_seconds: f64,
    pub unassigned_mechanics: usize,
}
