use std::collections::BTreeMap;

use tracing::debug;

use crate::support::{
    constraint::{Constraint, ConstraintKind},
    nomial::{Monomial, Posynomial, Variable},
    program::Program,
    units::SiQuantity,
};

use super::{GpSolver, GpSolverConfig, SolveError, Solution, Solver};

/// Settings for the sequential GP solver.
#[derive(Debug, Clone, Copy)]
pub struct SpSolverConfig {
    /// GP approximations solved before giving up.
    pub max_iters: usize,

    /// Stop once the relative cost change between approximations is below this.
    pub rel_tol: f64,

    /// Settings for each GP approximation.
    pub gp: GpSolverConfig,
}

impl Default for SpSolverConfig {
    fn default() -> Self {
        Self {
            max_iters: 50,
            rel_tol: 1e-6,
            gp: GpSolverConfig::default(),
        }
    }
}

/// Finds a local optimum of a signomial program by solving a sequence of
/// GP approximations.
///
/// At each iteration every signomial inequality `p ≤ n` is replaced by
/// `p ≤ n̂`, where `n̂` is the best local monomial approximation of `n` at
/// the current point, and every signomial equality `p = n` by `p̂ = n̂`.
/// Free variables start at one (in SI base units) unless given an initial
/// guess.
#[derive(Debug, Clone, Default)]
pub struct SpSolver {
    config: SpSolverConfig,
    initial: BTreeMap<Variable, f64>,
}

impl SpSolver {
    #[must_use]
    pub fn new(config: SpSolverConfig) -> Self {
        Self {
            config,
            initial: BTreeMap::new(),
        }
    }

    /// Starts `variable` at `value` instead of one.
    #[must_use]
    pub fn with_initial_guess<Q: SiQuantity>(mut self, variable: &Variable, value: Q) -> Self {
        self.initial.insert(variable.clone(), value.si_value());
        self
    }

    /// The GP approximation of `program` at `point`.
    fn approximate(
        program: &Program,
        point: &BTreeMap<Variable, f64>,
    ) -> Result<Program, SolveError> {
        let value_of = |v: &Variable| point.get(v).copied();
        let degenerate = |c: &Constraint| SolveError::DegenerateSignomial {
            constraint: c.to_string(),
        };

        let mut constraints = Vec::with_capacity(program.constraints().len());
        for constraint in program.constraints() {
            match constraint.kind() {
                ConstraintKind::Posynomial | ConstraintKind::MonomialEquality => {
                    constraints.push(constraint.clone());
                }
                ConstraintKind::Signomial => {
                    let (p, n) = constraint.split();
                    if p.is_empty() {
                        continue;
                    }
                    let n = condense(&n, value_of).ok_or_else(|| degenerate(constraint))?;
                    constraints.push(Constraint::leq(p, n));
                }
                ConstraintKind::SignomialEquality => {
                    let (p, n) = constraint.split();
                    let p = condense(&p, value_of).ok_or_else(|| degenerate(constraint))?;
                    let n = condense(&n, value_of).ok_or_else(|| degenerate(constraint))?;
                    constraints.push(Constraint::equal(p, n));
                }
            }
        }

        Ok(Program::from_parts(
            program.cost().clone(),
            constraints,
            program.free_variables().to_vec(),
            program.fixed_values().clone(),
            Vec::new(),
        ))
    }
}

/// The monomial matching `p` in value and gradient at a point.
///
/// By the arithmetic-geometric mean inequality it never exceeds `p`.
/// Returns `None` for an empty posynomial or a point missing a value.
fn condense(p: &Posynomial, value_of: impl Fn(&Variable) -> Option<f64>) -> Option<Monomial> {
    if p.is_empty() {
        return None;
    }
    let values: Vec<f64> = p
        .terms()
        .iter()
        .map(|t| t.evaluate(&value_of))
        .collect::<Option<_>>()?;
    let total: f64 = values.iter().sum();

    Some(
        p.terms()
            .iter()
            .zip(values)
            .fold(Monomial::constant(1.0), |acc, (term, value)| {
                let share = value / total;
                acc.times(&term.scale(1.0 / share).pow(share))
            }),
    )
}

impl Solver for SpSolver {
    fn solve(&self, program: &Program) -> Result<Solution, SolveError> {
        let gp = GpSolver::new(self.config.gp);
        if program.is_gp() {
            return gp.solve(program);
        }

        let mut point: BTreeMap<Variable, f64> = program
            .free_variables()
            .iter()
            .map(|v| (v.clone(), self.initial.get(v).copied().unwrap_or(1.0)))
            .collect();

        let mut previous: Option<f64> = None;
        let mut change = f64::INFINITY;
        for iteration in 1..=self.config.max_iters {
            let approximation = Self::approximate(program, &point)?;
            let free = gp
                .solve_free(&approximation)
                .map_err(|source| SolveError::SpIteration {
                    iteration,
                    source: Box::new(source),
                })?;
            point.extend(free);

            let cost = program
                .cost()
                .evaluate(|v| point.get(v).copied())
                .unwrap_or(f64::NAN);
            debug!(iteration, cost, "solved GP approximation");

            if let Some(previous) = previous {
                change = ((cost - previous) / cost).abs();
                if change < self.config.rel_tol {
                    return Ok(Solution::new(program, point, iteration));
                }
            }
            previous = Some(cost);
        }

        Err(SolveError::SpNotConverged {
            iterations: self.config.max_iters,
            change,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::constraint::{ConstraintSet, Relate};

    #[test]
    fn condensed_monomial_touches_the_posynomial() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");
        let p = &x + 2.0 * &y;
        let at = |v: &Variable| Some(if *v == x { 1.0 } else { 2.0 });

        let m = condense(&p, at).unwrap();
        assert_relative_eq!(m.evaluate(at).unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(m.exponent(&x), 0.2, epsilon = 1e-12);
        assert_relative_eq!(m.exponent(&y), 0.8, epsilon = 1e-12);

        let elsewhere = |v: &Variable| Some(if *v == x { 3.0 } else { 0.5 });
        assert!(m.evaluate(elsewhere).unwrap() <= p.evaluate(elsewhere).unwrap());
    }

    #[test]
    fn signomial_inequality() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");
        let set = ConstraintSet::from([(&x + &y).geq(3.0), y.leq(1.0)]);
        let program = Program::new(&x, set).unwrap();
        assert!(!program.is_gp());

        let sol = SpSolver::default().solve(&program).unwrap();
        assert_relative_eq!(sol.value(&x).unwrap(), 2.0, max_relative = 1e-4);
        assert!(sol.iterations() > 1);
    }

    #[test]
    fn signomial_equality() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");
        let set = ConstraintSet::from([x.equals(&y + 1.0), y.geq(2.0)]);
        let program = Program::new(&x, set).unwrap();

        let sol = SpSolver::default()
            .with_initial_guess(&y, 2.0)
            .solve(&program)
            .unwrap();
        assert_relative_eq!(sol.value(&x).unwrap(), 3.0, max_relative = 1e-4);
    }

    #[test]
    fn geometric_programs_pass_straight_through() {
        let x = Variable::dimensionless("x", "");
        let program = Program::new(&x, ConstraintSet::from([x.geq(2.0)])).unwrap();
        let sol = SpSolver::default().solve(&program).unwrap();
        assert_eq!(sol.iterations(), 1);
        assert_relative_eq!(sol.value(&x).unwrap(), 2.0, max_relative = 1e-4);
    }
}
