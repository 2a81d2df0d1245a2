//! Mutable model under construction.
//!
//! `good_lp` sets the objective before constraints are attached to a
//! problem, so rules cannot push constraints into the backend directly.
//! [`RosterModel`] collects variables and constraints while the rules run;
//! the driver drains it once the objective is known.

use good_lp::{variable, Constraint, ProblemVariables, Variable, VariableDefinition};

/// Collects decision variables, auxiliary variables, and constraints while
/// the rules are applied.
pub struct RosterModel {
    variables: ProblemVariables,
    constraints: Vec<Constraint>,
    variable_count: usize,
}

impl RosterModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            variables: ProblemVariables::new(),
            constraints: Vec::new(),
            variable_count: 0,
        }
    }

    /// Adds a variable from a full definition.
    pub fn add(&mut self, definition: VariableDefinition) -> Variable {
        self.variable_count += 1;
        self.variables.add(definition)
    }

    /// Adds a named binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> Variable {
        self.add(variable().binary().name(name))
    }

    /// Adds a named non-negative continuous variable.
    pub fn add_nonneg(&mut self, name: impl Into<String>) -> Variable {
        self.add(variable().min(0.0).name(name))
    }

    /// Appends a constraint.
    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Number of variables added so far (decision plus auxiliary).
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Number of constraints collected so far.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Consumes the model into its variable pool and constraint list.
    pub(crate) fn into_parts(self) -> (ProblemVariables, Vec<Constraint>) {
        (self.variables, self.constraints)
    }
}

impl Default for RosterModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::constraint;

    #[test]
    fn test_counts_track_additions() {
        let mut model = RosterModel::new();
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        let _slack = model.add_nonneg("s");
        model.push(constraint!(a + b <= 1));
        assert_eq!(model.variable_count(), 3);
        assert_eq!(model.constraint_count(), 1);
    }
}
