//! Derived presentation attributes (§4.5) — pure functions over `Domain` and
//! `Assignment` so a future renderer never reimplements this logic.

use crate::models::domain::{Assignment, Domain};
use crate::models::ids::MechanicId;
use crate::models::skill::{AircraftType, SkillDiscipline, SkillKey};

/// The role a mechanic fills at their assignment, for display purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPosition {
    Inspector,
    Mechanic,
    Avionic,
}

fn co_assigned(assignment: &Assignment, all_assignments: &[Assignment]) -> Vec<MechanicId> {
    all_assignments
        .iter()
        .filter(|other| other.mechanic != assignment.mechanic && other.slot() == assignment.slot())
        .map(|other| other.mechanic)
        .collect()
}

/// `displayPosition` (§4.5): `Inspector` iff the mechanic actually fills an
/// active inspector requirement at this slot and at least one co-assigned
/// mechanic holds the matching regular skill; otherwise `Avionic` if the
/// mechanic has any avionics regular skill but not both airframe and engine;
/// otherwise `Mechanic`.
pub fn display_position(domain: &Domain, mechanic: MechanicId, assignment: &Assignment, all_assignments: &[Assignment]) -> DisplayPosition {
    let slot = assignment.slot();
    let partners = co_assigned(assignment, all_assignments);

    let fills_inspector_role = domain
        .inspector_demand
        .get(&slot)
        .into_iter()
        .flat_map(|per_skill| per_skill.iter().filter(|(_, &count)| count > 0).map(|(&key, _)| key))
        .any(|key| {
            domain.has_inspector_skill(mechanic, key) && partners.iter().any(|&other| domain.has_regular_skill(other, key))
        });

    if fills_inspector_role {
        return DisplayPosition::Inspector;
    }

    let has_avionics = AircraftType::ALL
        .into_iter()
        .any(|aircraft| domain.has_regular_skill(mechanic, SkillKey::new(aircraft, SkillDiscipline::Avionics)));
    let has_full_airframe_and_engine = has_discipline(domain, mechanic, SkillDiscipline::Airframe) && has_discipline(domain, mechanic, SkillDiscipline::Engine);

    if has_avionics && !has_full_airframe_and_engine {
        return DisplayPosition::Avionic;
    }

    DisplayPosition::Mechanic
}

/// `hasDiscipline` (§4.5): true iff the mechanic holds `discipline`'s regular
/// skill for at least one aircraft type.
pub fn has_discipline(domain: &Domain, mechanic: MechanicId, discipline: SkillDiscipline) -> bool {
    AircraftType::ALL.into_iter().any(|aircraft| domain.has_regular_skill(mechanic, SkillKey::new(aircraft, discipline)))
}
