//! A compact barrier-method solver for geometric programs.
//!
//! The program is solved in log space (`y = ln x`), where it is convex:
//!
//! 1. A point satisfying the monomial equalities is found by least squares.
//! 2. Phase I minimizes a common slack on every posynomial constraint until
//!    the point is strictly feasible.
//! 3. Phase II follows the central path of the log-barrier problem until the
//!    duality gap is below tolerance.
//!
//! Centering uses Newton's method on the equality-constrained KKT system
//! with a backtracking line search.

mod barrier;
mod config;

pub use config::GpSolverConfig;

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::support::{nomial::Variable, program::Program};

use super::{SolveError, Solution, Solver};

use barrier::{Barrier, LogProblem, Phase, newton_step};

/// Residual tolerance on the initial equality solve.
const EQUALITY_TOL: f64 = 1e-8;

/// Outer barrier iterations before giving up.
const MAX_BARRIER_ITERS: usize = 100;

/// Solves geometric programs with a log-space barrier method.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpSolver {
    config: GpSolverConfig,
}

impl GpSolver {
    #[must_use]
    pub fn new(config: GpSolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GpSolverConfig {
        &self.config
    }

    /// Optimal values of the free variables of a GP-only program.
    pub(crate) fn solve_free(&self, program: &Program) -> Result<BTreeMap<Variable, f64>, SolveError> {
        let free = program.free_variables();
        if free.is_empty() {
            return Ok(BTreeMap::new());
        }

        let problem = LogProblem::new(program);
        let y = self.optimize(&problem)?;

        let limit = self.config.log_bound - self.config.unbounded_margin;
        if let Some(k) = y.iter().position(|yk| yk.abs() > limit) {
            return Err(SolveError::Unbounded {
                variable: free[k].name().to_string(),
            });
        }

        Ok(free.iter().cloned().zip(y.iter().map(|yk| yk.exp())).collect())
    }

    fn optimize(&self, problem: &LogProblem) -> Result<DVector<f64>, SolveError> {
        let n = problem.n;
        let mut y = self.equality_start(problem)?;

        let worst = problem.worst_violation(&y);
        if worst > -self.config.feasibility_margin {
            let mut z = y.clone().resize_vertically(n + 1, worst + 1.0);
            let margin = self.config.feasibility_margin;
            z = self.barrier_method(problem, Phase::Feasibility, z, |z| z[n] < -margin)?;

            let slack = z[n];
            debug!(slack, "phase I finished");
            if slack >= 0.0 {
                return Err(SolveError::Infeasible {
                    violation: slack.exp(),
                });
            }
            y = z.rows(0, n).into_owned();
        }

        self.barrier_method(problem, Phase::Optimality, y, |_| false)
    }

    /// The least-norm solution of the monomial equalities.
    fn equality_start(&self, problem: &LogProblem) -> Result<DVector<f64>, SolveError> {
        if problem.eq_a.nrows() == 0 {
            return Ok(DVector::zeros(problem.n));
        }

        let y = problem
            .eq_a
            .clone()
            .svd(true, true)
            .solve(&problem.eq_b, 1e-12)
            .map_err(|reason| SolveError::Numerical {
                reason: reason.to_string(),
            })?;

        let residual = (&problem.eq_a * &y - &problem.eq_b).amax();
        if residual > EQUALITY_TOL * (1.0 + problem.eq_b.amax()) {
            return Err(SolveError::Infeasible {
                violation: residual.exp(),
            });
        }
        if y.amax() >= self.config.log_bound {
            return Err(SolveError::Numerical {
                reason: "equalities force a variable outside the log bound".into(),
            });
        }
        Ok(y)
    }

    fn barrier_method(
        &self,
        problem: &LogProblem,
        phase: Phase,
        start: DVector<f64>,
        stop: impl Fn(&DVector<f64>) -> bool,
    ) -> Result<DVector<f64>, SolveError> {
        let mut barrier = Barrier {
            problem,
            phase,
            t: self.config.initial_barrier,
            bound: self.config.log_bound,
        };
        let a = barrier.equality_matrix();
        #[allow(clippy::cast_precision_loss)]
        let m = barrier.terms() as f64;

        let mut z = start;
        for _ in 0..MAX_BARRIER_ITERS {
            z = self.center(&barrier, &a, z)?;
            debug!(?phase, t = barrier.t, gap = m / barrier.t, "centered");
            if stop(&z) || m / barrier.t < self.config.gap_tol {
                return Ok(z);
            }
            barrier.t *= self.config.barrier_growth;
        }

        Err(SolveError::Numerical {
            reason: format!("barrier method did not reach the gap tolerance in {MAX_BARRIER_ITERS} steps"),
        })
    }

    /// Minimizes the barrier objective with Newton's method.
    fn center(
        &self,
        barrier: &Barrier<'_>,
        a: &DMatrix<f64>,
        start: DVector<f64>,
    ) -> Result<DVector<f64>, SolveError> {
        let mut z = start;
        let mut value = barrier.value(&z).ok_or_else(|| SolveError::Numerical {
            reason: "centering started outside the barrier domain".into(),
        })?;

        for _ in 0..self.config.max_newton_iters {
            let (grad, hess) = barrier.derivatives(&z);
            let residual = &barrier.problem.eq_b - a * &z;
            let dz = newton_step(&hess, &grad, a, &residual).ok_or_else(|| {
                SolveError::Numerical {
                    reason: "singular Newton system".into(),
                }
            })?;

            let decrement = -grad.dot(&dz);
            if decrement / 2.0 <= self.config.newton_tol {
                return Ok(z);
            }

            let mut step = 1.0;
            loop {
                let candidate = &z + &dz * step;
                if let Some(v) = barrier.value(&candidate) {
                    if v <= value - self.config.line_search_alpha * step * decrement {
                        z = candidate;
                        value = v;
                        break;
                    }
                }
                step *= self.config.line_search_beta;
                if step < 1e-12 {
                    // No further progress possible at working precision.
                    return Ok(z);
                }
            }
        }

        debug!(phase = ?barrier.phase, "Newton iteration limit reached");
        Ok(z)
    }
}

impl Solver for GpSolver {
    fn solve(&self, program: &Program) -> Result<Solution, SolveError> {
        let count = program
            .constraints()
            .iter()
            .filter(|c| !c.kind().is_gp())
            .count();
        if count > 0 {
            return Err(SolveError::NotGeometric { count });
        }

        let free = self.solve_free(program)?;
        Ok(Solution::new(program, free, 1))
    }
}
