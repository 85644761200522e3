//! Model Builder (§4.2): turns a [`Domain`] into decision variables, five
//! constraint families, and a linear objective, against the backend-agnostic
//! `good_lp::SolverModel` trait.

pub mod builder;
pub mod variables;

use crate::models::domain::Domain;
use good_lp::{Expression, ProblemVariables};
use tracing::info;
use variables::DecisionVariables;

/// The unsolved model: variables and objective, ready for a backend to
/// `.minimise(objective).using(solver)` and have `builder::add_constraints`
/// applied to the resulting problem.
pub struct MipModel {
    pub vars: ProblemVariables,
    pub decision: DecisionVariables,
    pub objective: Expression,
}

/// Builds the full model from a normalized domain (§4.2).
pub fn build(domain: &Domain) -> MipModel {
    let mut vars = ProblemVariables::new();
    let decision = variables::create_decision_variables(&mut vars, domain);
    let objective = builder::build_objective(domain, &decision);

    info!(
        variables = decision.x.len() + decision.y.len(),
        x_variables = decision.x.len(),
        y_variables = decision.y.len(),
        "model built"
    );

    MipModel { vars, decision, objective }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ids::{BaseId, MechanicId, PeriodId, ShiftId};
    use hashbrown::HashMap;

    fn minimal_domain() -> Domain {
        Domain {
            mechanics: vec![MechanicId(1), MechanicId(2)],
            bases: vec![BaseId(1)],
            periods: vec![PeriodId(1)],
            shifts: vec![ShiftId(1)],
            regular_skills: HashMap::new(),
            inspector_skills: HashMap::new(),
            demand: HashMap::new(),
            inspector_demand: HashMap::new(),
            cost: HashMap::new(),
            avoidance: HashMap::new(),
        }
    }

    #[test]
    fn variable_count_matches_cartesian_product() {
        let domain = minimal_domain();
        let model = build(&domain);
        assert_eq!(model.decision.x.len(), 2);
        assert_eq!(model.decision.y.len(), 0);
    }
}
