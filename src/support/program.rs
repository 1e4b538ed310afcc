//! Programs ready to hand to a solver.
//!
//! A [`Program`] pairs a posynomial cost with a [`ConstraintSet`], checked
//! once before any solve:
//!
//! - every constraint and the cost are dimensionally consistent,
//! - every substitution matches the dimension of its variable,
//! - every fixed value is strictly positive.
//!
//! Fixed variables are then folded into coefficients. Constraints left
//! without variables are checked on the spot and dropped.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

use crate::support::{
    constraint::{Constraint, ConstraintSet},
    nomial::{Posynomial, Variable},
    units::Dimension,
};

/// Relative tolerance when checking constraints that became constant.
const CONSTANT_TOL: f64 = 1e-6;

/// Errors found while assembling a [`Program`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProgramError {
    /// A constraint adds or relates terms of different dimensions.
    #[error("constraint {index} mixes dimensions {first} and {second}: {constraint}")]
    InconsistentConstraint {
        index: usize,
        constraint: String,
        first: Dimension,
        second: Dimension,
    },

    /// The cost adds terms of different dimensions.
    #[error("cost mixes dimensions {first} and {second}")]
    InconsistentCost { first: Dimension, second: Dimension },

    /// The cost has no terms or a non-positive coefficient.
    #[error("cost must be a posynomial with positive coefficients: {cost}")]
    InvalidCost { cost: String },

    /// A substitution does not have the dimension of its variable.
    #[error("substitution for `{variable}` has dimension {actual}, expected {expected}")]
    SubstitutionDimension {
        variable: String,
        expected: Dimension,
        actual: Dimension,
    },

    /// A fixed or substituted value is zero, negative or not a number.
    #[error("value of `{variable}` must be strictly positive, got {value}")]
    NonPositiveValue { variable: String, value: f64 },

    /// A constraint without free variables does not hold.
    #[error("constraint {index} is violated by fixed values: {constraint} (lhs/rhs = {ratio})")]
    ConstantInfeasible {
        index: usize,
        constraint: String,
        ratio: f64,
    },
}

/// A cost and constraints over free variables, with fixed values folded in.
#[derive(Debug, Clone)]
pub struct Program {
    cost: Posynomial,
    constraints: Vec<Constraint>,
    free: Vec<Variable>,
    fixed: BTreeMap<Variable, f64>,
    tight: Vec<Constraint>,
}

impl Program {
    /// Validates and assembles a program minimizing `cost`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProgramError`] describing the first problem found.
    pub fn new(cost: impl Into<Posynomial>, set: ConstraintSet) -> Result<Self, ProgramError> {
        let cost = cost.into();
        check_cost(&cost)?;
        check_substitutions(&set)?;

        let mut variables: BTreeSet<Variable> = cost
            .terms()
            .iter()
            .flat_map(|t| t.exponents().keys().cloned())
            .collect();
        for (index, constraint) in set.iter().enumerate() {
            if let Err((first, second)) = constraint.dimension() {
                return Err(ProgramError::InconsistentConstraint {
                    index,
                    constraint: constraint.to_string(),
                    first,
                    second,
                });
            }
            variables.extend(constraint.variables().cloned());
        }

        let mut fixed = BTreeMap::new();
        let mut free = Vec::new();
        for variable in variables {
            match set.fixed_value(&variable) {
                Some(value) if value > 0.0 => {
                    fixed.insert(variable, value);
                }
                Some(value) => {
                    return Err(ProgramError::NonPositiveValue {
                        variable: variable.name().to_string(),
                        value,
                    });
                }
                None => free.push(variable),
            }
        }

        let value_of = |v: &Variable| fixed.get(v).copied();
        let mut constraints = Vec::with_capacity(set.len());
        let mut tight = Vec::new();
        for (index, constraint) in set.iter().enumerate() {
            if constraint.is_tight() {
                tight.push(constraint.clone());
            }
            let folded = constraint.substitute(value_of);
            if folded.variables().next().is_some() {
                constraints.push(folded);
                continue;
            }
            let ratio = folded.ratio(|_| None).unwrap_or(f64::NAN);
            if !holds(&folded, ratio) {
                return Err(ProgramError::ConstantInfeasible {
                    index,
                    constraint: constraint.to_string(),
                    ratio,
                });
            }
        }

        debug!(
            free = free.len(),
            fixed = fixed.len(),
            constraints = constraints.len(),
            "assembled program"
        );

        Ok(Self {
            cost: cost.substitute(value_of),
            constraints,
            free,
            fixed,
            tight,
        })
    }

    /// Assembles a program from parts that are already folded and checked.
    pub(crate) fn from_parts(
        cost: Posynomial,
        constraints: Vec<Constraint>,
        free: Vec<Variable>,
        fixed: BTreeMap<Variable, f64>,
        tight: Vec<Constraint>,
    ) -> Self {
        Self {
            cost,
            constraints,
            free,
            fixed,
            tight,
        }
    }

    /// The cost with fixed values folded in.
    #[must_use]
    pub fn cost(&self) -> &Posynomial {
        &self.cost
    }

    /// Constraints with fixed values folded in.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Variables the solver chooses, ordered by declaration.
    #[must_use]
    pub fn free_variables(&self) -> &[Variable] {
        &self.free
    }

    /// Values of every fixed variable the program mentions.
    #[must_use]
    pub fn fixed_values(&self) -> &BTreeMap<Variable, f64> {
        &self.fixed
    }

    /// Constraints marked tight, as written before folding.
    #[must_use]
    pub fn tight_constraints(&self) -> &[Constraint] {
        &self.tight
    }

    /// True if no constraint needs signomial treatment.
    #[must_use]
    pub fn is_gp(&self) -> bool {
        self.constraints.iter().all(|c| c.kind().is_gp())
    }
}

fn check_cost(cost: &Posynomial) -> Result<(), ProgramError> {
    if cost.is_empty() || cost.terms().iter().any(|t| t.coefficient() <= 0.0) {
        return Err(ProgramError::InvalidCost {
            cost: cost.to_string(),
        });
    }
    cost.dimension()
        .map(|_| ())
        .map_err(|(first, second)| ProgramError::InconsistentCost { first, second })
}

fn check_substitutions(set: &ConstraintSet) -> Result<(), ProgramError> {
    for (variable, substitution) in set.substitutions() {
        if !substitution.dimension.approx_eq(&variable.dimension()) {
            return Err(ProgramError::SubstitutionDimension {
                variable: variable.name().to_string(),
                expected: variable.dimension(),
                actual: substitution.dimension,
            });
        }
    }
    Ok(())
}

fn holds(constraint: &Constraint, ratio: f64) -> bool {
    if constraint.kind().is_equality() {
        (ratio - 1.0).abs() <= CONSTANT_TOL
    } else {
        ratio <= 1.0 + CONSTANT_TOL
    }
}
