//! Input Normalizer (§4.1): canonicalizes raw tabular rows into a [`Domain`].

use crate::error::{AssignmentError, Result};
use crate::models::domain::{AvoidancePairKey, Domain, Slot};
use crate::models::ids::{BaseId, MechanicId, PeriodId, ShiftId};
use crate::models::skill::{AircraftType, SkillKey};
use crate::models::rows::RawRow;
use hashbrown::{HashMap, HashSet};
use tracing::{info, warn};

fn required_cell<'a>(row: &'a RawRow, source_name: &'static str, column: &str, row_idx: usize) -> Result<&'a str> {
    row.get(column).ok_or_else(|| AssignmentError::InputSchema { source_name, column: column.to_string(), row: row_idx })
}

fn parse_i64(source_name: &'static str, column: &str, row_idx: usize, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<f64>()
        .map(|v| v as i64)
        .map_err(|_| AssignmentError::InputType { source_name, column: column.to_string(), row: row_idx })
}

fn parse_f64(source_name: &'static str, column: &str, row_idx: usize, raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| AssignmentError::InputType { source_name, column: column.to_string(), row: row_idx })
}

fn required_i64(row: &RawRow, source_name: &'static str, column: &str, row_idx: usize) -> Result<i64> {
    let raw = required_cell(row, source_name, column, row_idx)?;
    parse_i64(source_name, column, row_idx, raw)
}

/// Truthiness-by-integer-reading coercion for skill columns (§4.1).
fn parse_truthy(source_name: &'static str, column: &str, row_idx: usize, raw: &str) -> Result<bool> {
    let value = parse_f64(source_name, column, row_idx, raw)?;
    Ok(value as i64 != 0)
}

/// Non-negative count coercion for demand/inspector-requirement columns;
/// null or `<= 0` means the column is inactive for that slot (§4.1).
fn parse_count(source_name: &'static str, column: &str, row_idx: usize, raw: &str) -> Result<i64> {
    parse_i64(source_name, column, row_idx, raw)
}

fn base_id_from_letter(letter: &str) -> Option<BaseId> {
    match letter {
        "A" => Some(BaseId(1)),
        "B" => Some(BaseId(2)),
        "C" => Some(BaseId(3)),
        _ => None,
    }
}

/// Canonicalizes raw tabular rows into a typed, immutable [`Domain`] (§4.1).
///
/// `avoidance_rows` failures are recovered per-row: a malformed avoidance row
/// is logged and skipped rather than discarding the whole file (§4.1, an
/// intentional narrowing of the original's whole-file `try/except`; see
/// `DESIGN.md`).
pub fn normalize(
    skill_rows: &[RawRow],
    schedule_rows: &[RawRow],
    cost_rows: &[RawRow],
    avoidance_rows: Option<&[RawRow]>,
) -> Result<Domain> {
    let mut mechanics_set: HashSet<MechanicId> = HashSet::new();
    let mut regular_skills: HashMap<MechanicId, HashSet<SkillKey>> = HashMap::new();
    let mut inspector_skills: HashMap<MechanicId, HashSet<SkillKey>> = HashMap::new();

    for (row_idx, row) in skill_rows.iter().enumerate() {
        let mechanic = MechanicId(required_i64(row, "skills", "mechanic_id", row_idx)? as u32);
        mechanics_set.insert(mechanic);

        let regular_entry = regular_skills.entry(mechanic).or_default();
        let inspector_entry = inspector_skills.entry(mechanic).or_default();

        for aircraft in AircraftType::ALL {
            for discipline in crate::models::skill::SkillDiscipline::ALL {
                let key = SkillKey::new(aircraft, discipline);

                let column = key.column_name();
                if let Some(raw) = row.get(&column) {
                    if parse_truthy("skills", &column, row_idx, raw)? {
                        regular_entry.insert(key);
                    }
                }

                let inspector_column = key.inspector_column_name();
                if let Some(raw) = row.get(&inspector_column) {
                    if parse_truthy("skills", &inspector_column, row_idx, raw)? {
                        inspector_entry.insert(key);
                    }
                }
            }
        }
    }

    let mut bases_set: HashSet<BaseId> = HashSet::new();
    let mut periods_set: HashSet<PeriodId> = HashSet::new();
    let mut shifts_set: HashSet<ShiftId> = HashSet::new();
    let mut demand: HashMap<Slot, HashMap<AircraftType, u32>> = HashMap::new();
    let mut inspector_demand: HashMap<Slot, HashMap<SkillKey, u32>> = HashMap::new();

    for (row_idx, row) in schedule_rows.iter().enumerate() {
        let base = BaseId(required_i64(row, "schedule", "base_id", row_idx)? as u32);
        let period = PeriodId(required_i64(row, "schedule", "period", row_idx)? as u32);
        let shift = ShiftId(required_i64(row, "schedule", "shift", row_idx)? as u32);
        bases_set.insert(base);
        periods_set.insert(period);
        shifts_set.insert(shift);
        let slot = Slot::new(base, period, shift);

        let aircraft_demand = demand.entry(slot).or_default();
        for (column, raw) in row.0.iter() {
            let Some(aircraft) = AircraftType::from_tag(column) else { continue };
            let count = parse_count("schedule", column, row_idx, raw)?;
            if count > 0 {
                *aircraft_demand.entry(aircraft).or_insert(0) += count as u32;
            }
        }

        let slot_inspector_demand = inspector_demand.entry(slot).or_default();
        for (column, raw) in row.0.iter() {
            if !column.ends_with("_inspec") {
                continue;
            }
            let Some(key) = SkillKey::parse_inspector(column) else { continue };
            let count = parse_count("schedule", column, row_idx, raw)?;
            if count > 0 {
                *slot_inspector_demand.entry(key).or_insert(0) += count as u32;
            }
        }
    }

    let mut cost: HashMap<(MechanicId, BaseId), f64> = HashMap::new();
    for (row_idx, row) in cost_rows.iter().enumerate() {
        let mechanic = MechanicId(required_i64(row, "cost", "id", row_idx)? as u32);
        for letter in ["A", "B", "C"] {
            let Some(base) = base_id_from_letter(letter) else { continue };
            if let Some(raw) = row.get(letter) {
                let value = parse_f64("cost", letter, row_idx, raw)?;
                cost.insert((mechanic, base), value.max(0.0));
            }
        }
    }

    let mut avoidance: HashMap<AvoidancePairKey, f64> = HashMap::new();
    if let Some(rows) = avoidance_rows {
        for (row_idx, row) in rows.iter().enumerate() {
            match parse_avoidance_row(row, row_idx) {
                Ok((m1, m2, penalty)) => {
                    avoidance.insert(AvoidancePairKey::new(m1, m2), penalty);
                }
                Err(err) => {
                    warn!(row = row_idx, error = %err, "could not parse avoidance row, skipping");
                }
            }
        }
    }

    let mut mechanics: Vec<MechanicId> = mechanics_set.into_iter().collect();
    mechanics.sort();
    let mut bases: Vec<BaseId> = bases_set.into_iter().collect();
    bases.sort();
    let mut periods: Vec<PeriodId> = periods_set.into_iter().collect();
    periods.sort();
    let mut shifts: Vec<ShiftId> = shifts_set.into_iter().collect();
    shifts.sort();

    info!(
        mechanics = mechanics.len(),
        bases = bases.len(),
        periods = periods.len(),
        shifts = shifts.len(),
        avoidance_pairs = avoidance.len(),
        "normalized input domain"
    );

    Ok(Domain { mechanics, bases, periods, shifts, regular_skills, inspector_skills, demand, inspector_demand, cost, avoidance })
}

fn parse_avoidance_row(row: &RawRow, row_idx: usize) -> Result<(MechanicId, MechanicId, f64)> {
    let m1 = MechanicId(required_i64(row, "avoidance", "mechanic_id", row_idx)? as u32);
    let m2 = MechanicId(required_i64(row, "avoidance", "avoid_mechanic_id", row_idx)? as u32);
    let penalty_raw = required_cell(row, "avoidance", "penalty", row_idx)?;
    let penalty = parse_f64("avoidance", "penalty", row_idx, penalty_raw)?;
    Ok((m1, m2, penalty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn normalizes_minimal_domain() {
        let skills = vec![row(&[("mechanic_id", "1"), ("aw139_af", "1"), ("aw139_r", "1"), ("aw139_av", "1")])];
        let schedule = vec![row(&[("base_id", "1"), ("period", "1"), ("shift", "1"), ("aw139", "1")])];
        let cost = vec![row(&[("id", "1"), ("A", "10")])];

        let domain = normalize(&skills, &schedule, &cost, None).unwrap();

        assert_eq!(domain.mechanics, vec![MechanicId(1)]);
        assert_eq!(domain.bases, vec![BaseId(1)]);
        assert!(domain.has_regular_skill(MechanicId(1), SkillKey::new(AircraftType::Aw139, crate::models::skill::SkillDiscipline::Airframe)));
        assert_eq!(domain.cost_of(MechanicId(1), BaseId(1)), 10.0);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let skills = vec![row(&[("aw139_af", "1")])];
        let err = normalize(&skills, &[], &[], None).unwrap_err();
        assert!(matches!(err, AssignmentError::InputSchema { .. }));
    }

    #[test]
    fn non_numeric_required_cell_is_fatal() {
        let skills = vec![row(&[("mechanic_id", "not-a-number")])];
        let err = normalize(&skills, &[], &[], None).unwrap_err();
        assert!(matches!(err, AssignmentError::InputType { .. }));
    }

    #[test]
    fn malformed_avoidance_row_is_skipped_not_fatal() {
        let skills = vec![row(&[("mechanic_id", "1")])];
        let avoidance = vec![row(&[("mechanic_id", "1"), ("avoid_mechanic_id", "2")])]; // missing penalty
        let domain = normalize(&skills, &[], &[], Some(&avoidance)).unwrap();
        assert!(domain.avoidance.is_empty());
    }

    #[test]
    fn avoidance_map_is_symmetric() {
        let skills = vec![row(&[("mechanic_id", "1")]), row(&[("mechanic_id", "2")])];
        let avoidance = vec![row(&[("mechanic_id", "1"), ("avoid_mechanic_id", "2"), ("penalty", "50")])];
        let domain = normalize(&skills, &[], &[], Some(&avoidance)).unwrap();

        assert_eq!(domain.avoidance_penalty(MechanicId(1), MechanicId(2)), 50.0);
        assert_eq!(domain.avoidance_penalty(MechanicId(2), MechanicId(1)), 50.0);
        assert_eq!(domain.avoidance.len(), 1);
    }
}
