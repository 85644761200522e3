//! Decision variable layout for the assignment model (§4.2).

use crate::models::domain::{AvoidancePairKey, Domain, Slot};
use crate::models::ids::{BaseId, MechanicId, PeriodId, ShiftId};
use good_lp::{variable, ProblemVariables, Variable};
use hashbrown::HashMap;

/// `x[m,b,g,s]` and `y[m1,m2,b,g,s]` decision variables, indexed for O(1)
/// lookup during constraint and objective construction.
pub struct DecisionVariables {
    pub x: HashMap<(MechanicId, BaseId, PeriodId, ShiftId), Variable>,
    pub y: HashMap<(AvoidancePairKey, Slot), Variable>,
}

impl DecisionVariables {
    pub fn x_of(&self, m: MechanicId, b: BaseId, g: PeriodId, s: ShiftId) -> Variable {
        self.x[&(m, b, g, s)]
    }
}

/// Creates `x` for every `(mechanic, base, period, shift)` and `y` for every
/// nonzero avoidance pair at every slot, pre-reserving storage sized from
/// `|mechanics|x|bases|x|periods|x|shifts|` so the nested loops below never
/// trigger a reallocation (§5).
pub fn create_decision_variables(vars: &mut ProblemVariables, domain: &Domain) -> DecisionVariables {
    let slot_count = domain.bases.len() * domain.periods.len() * domain.shifts.len();
    let x_capacity = domain.mechanics.len() * slot_count;

    let mut x = HashMap::with_capacity(x_capacity);
    for &m in &domain.mechanics {
        for &b in &domain.bases {
            for &g in &domain.periods {
                for &s in &domain.shifts {
                    let var = vars.add(variable().binary().name(format!("x_m{m}_b{b}_g{g}_s{s}")));
                    x.insert((m, b, g, s), var);
                }
            }
        }
    }

    let avoidance_pairs: Vec<(MechanicId, MechanicId, f64)> = domain.avoidance_pairs().collect();
    let mut y = HashMap::with_capacity(avoidance_pairs.len() * slot_count);
    for (m1, m2, penalty) in avoidance_pairs {
        if penalty == 0.0 {
            continue;
        }
        let pair = AvoidancePairKey::new(m1, m2);
        for &b in &domain.bases {
            for &g in &domain.periods {
                for &s in &domain.shifts {
                    let slot = Slot::new(b, g, s);
                    let var = vars.add(variable().binary().name(format!("y_avoid_m{m1}_m{m2}_b{b}_g{g}_s{s}")));
                    y.insert((pair, slot), var);
                }
            }
        }
    }

    DecisionVariables { x, y }
}
