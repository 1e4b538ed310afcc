use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

use crate::support::{
    constraint::Constraint,
    nomial::{Signomial, Variable},
    program::Program,
    units::{Dimension, SiQuantity},
};

/// Constraints marked tight may be slack by this relative amount.
const TIGHT_TOL: f64 = 1e-3;

/// Errors reading a value off a [`Solution`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadoutError {
    #[error("`{variable}` is not part of the solution")]
    Unknown { variable: String },

    #[error("`{variable}` has dimension {actual}, not {requested}")]
    Dimension {
        variable: String,
        requested: Dimension,
        actual: Dimension,
    },
}

/// The optimum found by a solver.
///
/// Holds the value (in SI base units) of every variable the program
/// mentions, free or fixed.
#[derive(Debug, Clone)]
pub struct Solution {
    cost: f64,
    values: BTreeMap<Variable, f64>,
    slack_tight: Vec<Constraint>,
    iterations: usize,
}

impl Solution {
    /// Completes a solution from the free-variable values of `program`.
    pub(crate) fn new(program: &Program, free: BTreeMap<Variable, f64>, iterations: usize) -> Self {
        let mut values = free;
        values.extend(program.fixed_values().iter().map(|(v, x)| (v.clone(), *x)));

        let value_of = |v: &Variable| values.get(v).copied();
        let cost = program.cost().evaluate(value_of).unwrap_or(f64::NAN);

        let slack_tight: Vec<Constraint> = program
            .tight_constraints()
            .iter()
            .filter(|c| c.ratio(value_of).is_some_and(|r| r < 1.0 - TIGHT_TOL))
            .cloned()
            .collect();
        for constraint in &slack_tight {
            warn!(%constraint, "constraint marked tight is slack");
        }

        Self {
            cost,
            values,
            slack_tight,
            iterations,
        }
    }

    /// The optimal cost, in the SI units of the cost expression.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The SI value of a variable.
    #[must_use]
    pub fn value(&self, variable: &Variable) -> Option<f64> {
        self.values.get(variable).copied()
    }

    /// The value of a variable as a typed quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadoutError`] if the variable is not in the solution or
    /// its dimension differs from `Q`'s.
    pub fn quantity<Q: SiQuantity>(&self, variable: &Variable) -> Result<Q, ReadoutError> {
        let value = self.value(variable).ok_or_else(|| ReadoutError::Unknown {
            variable: variable.name().to_string(),
        })?;
        if !Q::dimension().approx_eq(&variable.dimension()) {
            return Err(ReadoutError::Dimension {
                variable: variable.name().to_string(),
                requested: Q::dimension(),
                actual: variable.dimension(),
            });
        }
        Ok(Q::from_si(value))
    }

    /// Evaluates an expression at the solution.
    pub fn evaluate(&self, expr: impl Into<Signomial>) -> Option<f64> {
        expr.into().evaluate(|v| self.value(v))
    }

    /// Constraints marked tight that are slack at this solution.
    #[must_use]
    pub fn slack_tight_constraints(&self) -> &[Constraint] {
        &self.slack_tight
    }

    /// GP solves performed to reach this solution.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, f64)> {
        self.values.iter().map(|(v, x)| (v, *x))
    }
}
