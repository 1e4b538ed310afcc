//! Log-space barrier functions for geometric programs.
//!
//! With `y = ln x`, a posynomial `Σ_j c_j Π x^{a_j}` becomes the convex
//! log-sum-exp `ln Σ_j exp(a_j · y + ln c_j)` and a monomial equality
//! becomes a linear equation in `y`.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};

use crate::support::{
    nomial::{Monomial, Variable},
    program::Program,
};

/// `ln Σ_j exp(a_j · y + b_j)`
pub(super) struct LogSumExp {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl LogSumExp {
    fn new(terms: &[Monomial], index: &BTreeMap<Variable, usize>) -> Self {
        let mut a = DMatrix::zeros(terms.len(), index.len());
        for (row, term) in terms.iter().enumerate() {
            for (variable, exponent) in term.exponents() {
                if let Some(&col) = index.get(variable) {
                    a[(row, col)] = *exponent;
                }
            }
        }
        let b = DVector::from_iterator(terms.len(), terms.iter().map(|t| t.coefficient().ln()));
        Self { a, b }
    }

    pub(super) fn value(&self, y: &DVector<f64>) -> f64 {
        let z = &self.a * y + &self.b;
        let max = z.max();
        max + z.map(|zi| (zi - max).exp()).sum().ln()
    }

    /// Value, gradient and Hessian at `y`.
    fn derivatives(&self, y: &DVector<f64>) -> (f64, DVector<f64>, DMatrix<f64>) {
        let z = &self.a * y + &self.b;
        let max = z.max();
        let weights = z.map(|zi| (zi - max).exp());
        let total = weights.sum();
        let p = weights / total;

        let grad = self.a.transpose() * &p;
        let hess = self.a.transpose() * DMatrix::from_diagonal(&p) * &self.a - &grad * grad.transpose();
        (max + total.ln(), grad, hess)
    }
}

/// A geometric program in log space.
pub(super) struct LogProblem {
    pub(super) n: usize,
    pub(super) cost: LogSumExp,
    /// Each must stay below zero.
    pub(super) inequalities: Vec<LogSumExp>,
    /// `eq_a · y = eq_b`
    pub(super) eq_a: DMatrix<f64>,
    pub(super) eq_b: DVector<f64>,
}

impl LogProblem {
    /// Translates a GP-only program.
    pub(super) fn new(program: &Program) -> Self {
        let index: BTreeMap<Variable, usize> = program
            .free_variables()
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();
        let n = index.len();

        let mut inequalities = Vec::new();
        let mut equalities = Vec::new();
        for constraint in program.constraints() {
            if let Some(p) = constraint.as_posynomial() {
                inequalities.push(LogSumExp::new(p.terms(), &index));
            } else if let Some(m) = constraint.as_monomial_equality() {
                equalities.push(m);
            }
        }

        let mut eq_a = DMatrix::zeros(equalities.len(), n);
        let mut eq_b = DVector::zeros(equalities.len());
        for (row, m) in equalities.iter().enumerate() {
            for (variable, exponent) in m.exponents() {
                if let Some(&col) = index.get(variable) {
                    eq_a[(row, col)] = *exponent;
                }
            }
            eq_b[row] = -m.coefficient().ln();
        }

        Self {
            n,
            cost: LogSumExp::new(program.cost().terms(), &index),
            inequalities,
            eq_a,
            eq_b,
        }
    }

    /// The largest constraint value at `y`, or `-∞` without constraints.
    pub(super) fn worst_violation(&self, y: &DVector<f64>) -> f64 {
        self.inequalities
            .iter()
            .map(|f| f.value(y))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Phase {
    /// Minimize a slack `s` with every constraint `≤ s`, over `(y, s)`.
    Feasibility,
    /// Minimize the cost over `y`.
    Optimality,
}

/// The centering objective of one barrier step.
///
/// Every variable is confined to `|y_k| < bound` by its own log barrier, so
/// each centering problem has a minimizer even when the program does not.
pub(super) struct Barrier<'a> {
    pub(super) problem: &'a LogProblem,
    pub(super) phase: Phase,
    pub(super) t: f64,
    pub(super) bound: f64,
}

impl Barrier<'_> {
    pub(super) fn dim(&self) -> usize {
        match self.phase {
            Phase::Feasibility => self.problem.n + 1,
            Phase::Optimality => self.problem.n,
        }
    }

    /// Number of barrier terms, which sets the duality gap `m / t`.
    pub(super) fn terms(&self) -> usize {
        let slack_bound = usize::from(self.phase == Phase::Feasibility);
        self.problem.inequalities.len() + 2 * self.problem.n + slack_bound
    }

    /// Equality constraints over the barrier variables.
    pub(super) fn equality_matrix(&self) -> DMatrix<f64> {
        self.problem
            .eq_a
            .clone()
            .resize_horizontally(self.dim(), 0.0)
    }

    fn split(&self, z: &DVector<f64>) -> (DVector<f64>, f64) {
        let n = self.problem.n;
        let y = z.rows(0, n).into_owned();
        let slack = match self.phase {
            Phase::Feasibility => z[n],
            Phase::Optimality => 0.0,
        };
        (y, slack)
    }

    /// The objective, or `None` outside its domain.
    pub(super) fn value(&self, z: &DVector<f64>) -> Option<f64> {
        let (y, slack) = self.split(z);

        let mut total = match self.phase {
            Phase::Feasibility => {
                if slack <= -1.0 {
                    return None;
                }
                self.t * slack - (slack + 1.0).ln()
            }
            Phase::Optimality => self.t * self.problem.cost.value(&y),
        };

        for f in &self.problem.inequalities {
            let g = f.value(&y) - slack;
            if g >= 0.0 || g.is_nan() {
                return None;
            }
            total -= (-g).ln();
        }

        for &yk in y.iter() {
            if yk.abs() >= self.bound {
                return None;
            }
            total -= (self.bound - yk).ln() + (self.bound + yk).ln();
        }

        Some(total)
    }

    /// Gradient and Hessian of the objective inside its domain.
    pub(super) fn derivatives(&self, z: &DVector<f64>) -> (DVector<f64>, DMatrix<f64>) {
        let n = self.problem.n;
        let dim = self.dim();
        let (y, slack) = self.split(z);

        let mut grad = DVector::<f64>::zeros(dim);
        let mut hess = DMatrix::<f64>::zeros(dim, dim);

        match self.phase {
            Phase::Feasibility => {
                let d = slack + 1.0;
                grad[n] += self.t - 1.0 / d;
                hess[(n, n)] += 1.0 / (d * d);
            }
            Phase::Optimality => {
                let (_, g0, h0) = self.problem.cost.derivatives(&y);
                let mut g = grad.rows_mut(0, n);
                g += g0 * self.t;
                let mut h = hess.view_mut((0, 0), (n, n));
                h += h0 * self.t;
            }
        }

        for f in &self.problem.inequalities {
            let (value, gf, hf) = f.derivatives(&y);
            let d = slack - value;

            let mut dg = DVector::<f64>::zeros(dim);
            dg.rows_mut(0, n).copy_from(&gf);
            if self.phase == Phase::Feasibility {
                dg[n] = -1.0;
            }

            grad += &dg / d;
            hess += &dg * dg.transpose() / (d * d);
            let mut h = hess.view_mut((0, 0), (n, n));
            h += hf / d;
        }

        for (k, &yk) in y.iter().enumerate() {
            let upper = self.bound - yk;
            let lower = self.bound + yk;
            grad[k] += 1.0 / upper - 1.0 / lower;
            hess[(k, k)] += 1.0 / (upper * upper) + 1.0 / (lower * lower);
        }

        (grad, hess)
    }
}

/// Solves the equality-constrained Newton system
///
/// ```text
/// [ H  Aᵀ ] [ dz ]   [ -g ]
/// [ A  0  ] [ w  ] = [  r ]
/// ```
///
/// falling back to a least-squares solve when the system is singular
/// (redundant equalities).
pub(super) fn newton_step(
    hess: &DMatrix<f64>,
    grad: &DVector<f64>,
    a: &DMatrix<f64>,
    residual: &DVector<f64>,
) -> Option<DVector<f64>> {
    let n = grad.len();
    let p = a.nrows();

    if p == 0 {
        if let Some(cholesky) = hess.clone().cholesky() {
            return Some(cholesky.solve(&-grad));
        }
        return hess.clone().svd(true, true).solve(&-grad, 1e-14).ok();
    }

    let mut kkt = DMatrix::<f64>::zeros(n + p, n + p);
    kkt.view_mut((0, 0), (n, n)).copy_from(hess);
    kkt.view_mut((n, 0), (p, n)).copy_from(a);
    kkt.view_mut((0, n), (n, p)).copy_from(&a.transpose());

    let mut rhs = DVector::<f64>::zeros(n + p);
    rhs.rows_mut(0, n).copy_from(&-grad);
    rhs.rows_mut(n, p).copy_from(residual);

    let solution = kkt
        .clone()
        .lu()
        .solve(&rhs)
        .filter(|s| s.iter().all(|x| x.is_finite()))
        .or_else(|| kkt.svd(true, true).solve(&rhs, 1e-12).ok())?;
    Some(solution.rows(0, n).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn log_sum_exp_matches_direct_evaluation() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");
        let index = BTreeMap::from([(x.clone(), 0), (y.clone(), 1)]);
        let p = 2.0 * &x + &x * &y;
        let f = LogSumExp::new(p.terms(), &index);

        let at = DVector::from_vec(vec![3.0_f64.ln(), 0.5_f64.ln()]);
        assert_relative_eq!(f.value(&at), (6.0_f64 + 1.5).ln(), epsilon = 1e-12);

        let (value, grad, hess) = f.derivatives(&at);
        assert_relative_eq!(value, 7.5_f64.ln(), epsilon = 1e-12);
        // d/dy1 = share of the x·y term
        assert_relative_eq!(grad[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(grad[1], 1.5 / 7.5, epsilon = 1e-12);
        assert_relative_eq!(hess[(1, 1)], 0.2 * 0.8, epsilon = 1e-12);
    }

    #[test]
    fn newton_step_respects_equalities() {
        let hess = DMatrix::identity(2, 2);
        let grad = DVector::from_vec(vec![1.0, -1.0]);
        let a = DMatrix::from_row_slice(1, 2, &[1.0, 1.0]);
        let residual = DVector::zeros(1);

        let dz = newton_step(&hess, &grad, &a, &residual).unwrap();
        assert_relative_eq!(dz[0] + dz[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(dz[0], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn redundant_equalities_still_step() {
        let hess = DMatrix::identity(2, 2);
        let grad = DVector::from_vec(vec![1.0, -1.0]);
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let residual = DVector::zeros(2);

        let dz = newton_step(&hess, &grad, &a, &residual).unwrap();
        assert_relative_eq!(dz[0] + dz[1], 0.0, epsilon = 1e-9);
    }
}
