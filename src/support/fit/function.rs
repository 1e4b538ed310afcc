//! Direct evaluation of a fitted relation.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use super::{FitError, FitKind, FitRecord};

/// Solver settings for inverting implicit fits.
#[derive(Debug, Clone, Copy)]
pub struct FitFunctionConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on `ln w`.
    pub log_tol: f64,
}

impl Default for FitFunctionConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            log_tol: 1e-12,
        }
    }
}

impl FitFunctionConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.log_tol,
            x_rel_tol: 0.0,
            residual_tol: self.log_tol,
        }
    }
}

/// A fit record as a callable `w = f(u)`.
///
/// Useful for checking a fit against data, or for reading a fitted value off
/// a solution without building a program.
///
/// ```
/// use gp_models::support::fit::{FitFunction, FitRecord};
/// use twine_core::Model;
///
/// let fit = FitRecord::from_csv("ftype,d,K,e00,c0,a1\nSMA,1,1,0.77,1.28,1\n", 0).unwrap();
/// let w = FitFunction::new(fit).call(&vec![2.0]).unwrap();
/// assert!((w - 1.28 * 2.0_f64.powf(0.77)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct FitFunction {
    record: FitRecord,
    config: FitFunctionConfig,
}

impl FitFunction {
    #[must_use]
    pub fn new(record: FitRecord) -> Self {
        Self::with_config(record, FitFunctionConfig::default())
    }

    #[must_use]
    pub fn with_config(record: FitRecord, config: FitFunctionConfig) -> Self {
        Self { record, config }
    }

    /// `ln(c_k Π u_i^{e_k,i})` for every term.
    fn log_terms(&self, inputs: &[f64]) -> Vec<f64> {
        self.record
            .terms()
            .iter()
            .map(|t| {
                t.exponents
                    .iter()
                    .zip(inputs)
                    .fold(t.coefficient.into_inner().ln(), |acc, (e, u)| acc + e * u.ln())
            })
            .collect()
    }

    fn solve_implicit(&self, log_terms: Vec<f64>, alpha: Vec<f64>) -> Result<f64, FitError> {
        #[allow(clippy::cast_precision_loss)]
        let ln_k = (log_terms.len() as f64).ln();

        // The largest term alone reaches one at the lower end; every term is
        // at most 1/K at the upper end.
        let (lo, hi) = log_terms.iter().zip(&alpha).fold(
            (f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(lo, hi), (s, a)| (lo.max(s / a), hi.max((s + ln_k) / a)),
        );
        if hi - lo <= self.config.log_tol {
            return Ok(lo.exp());
        }

        let residual = ImplicitResidual { log_terms, alpha };
        let solution = bisection::solve(
            &residual,
            &ImplicitProblem,
            [lo, hi],
            &self.config.bisection(),
            |_event: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
        )?;

        if solution.status != bisection::Status::Converged {
            return Err(FitError::MaxIters {
                residual: solution.residual,
                iters: solution.iters,
            });
        }

        Ok(solution.snapshot.input.exp())
    }
}

impl Model for FitFunction {
    type Input = Vec<f64>;
    type Output = f64;
    type Error = FitError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        if input.len() != self.record.d() {
            return Err(FitError::DimensionMismatch {
                expected: self.record.d(),
                actual: input.len(),
            });
        }
        let log_terms = self.log_terms(input);

        match self.record.kind() {
            FitKind::MaxAffine => Ok(log_terms
                .into_iter()
                .fold(f64::NEG_INFINITY, f64::max)
                .exp()),
            FitKind::SoftmaxAffine { alpha } => {
                let sum: f64 = log_terms.into_iter().map(f64::exp).sum();
                Ok(sum.powf(1.0 / alpha.into_inner()))
            }
            FitKind::ImplicitSoftmaxAffine { alpha } => {
                self.solve_implicit(log_terms, alpha.iter().map(|a| a.into_inner()).collect())
            }
        }
    }
}

/// `ln Σ_k exp(s_k - α_k v)` as a function of `v = ln w`.
struct ImplicitResidual {
    log_terms: Vec<f64>,
    alpha: Vec<f64>,
}

impl Model for ImplicitResidual {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, v: &f64) -> Result<f64, Infallible> {
        let exponents: Vec<f64> = self
            .log_terms
            .iter()
            .zip(&self.alpha)
            .map(|(s, a)| s - a * v)
            .collect();
        let max = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(max + exponents.iter().map(|x| (x - max).exp()).sum::<f64>().ln())
    }
}

struct ImplicitProblem;

impl EquationProblem<1> for ImplicitProblem {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([*output])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn fit(csv: &str) -> FitFunction {
        FitFunction::new(FitRecord::from_csv(csv, 0).unwrap())
    }

    #[test]
    fn max_affine_takes_the_largest_term() {
        let f = fit("ftype,d,K,e00,e10,c0,c1\nMA,1,2,1.0,0.5,1.0,2.0\n");
        assert_relative_eq!(f.call(&vec![4.0]).unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(f.call(&vec![9.0]).unwrap(), 9.0, epsilon = 1e-12);
        assert_relative_eq!(f.call(&vec![1.0]).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn softmax_affine_softens_the_maximum() {
        let f = fit("ftype,d,K,e00,e01,e10,e11,c0,c1,a1\nSMA,2,2,1,0,0,1,1,1,2\n");
        assert_relative_eq!(f.call(&vec![3.0, 4.0]).unwrap(), 7.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn implicit_softmax_satisfies_its_relation() {
        let f = fit("ftype,d,K,e00,e10,c0,c1,a1,a2\nISMA,1,2,1,0,1,1,1,2\n");
        let w = f.call(&vec![2.0]).unwrap();
        assert_relative_eq!(2.0 / w + 1.0 / (w * w), 1.0, epsilon = 1e-9);
        assert_relative_eq!(w, 1.0 + 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn single_term_implicit_fit_is_explicit() {
        let f = fit("ftype,d,K,e00,c0,a1\nISMA,1,1,2,3,2\n");
        // 3·u^2 / w^2 = 1
        assert_relative_eq!(f.call(&vec![2.0]).unwrap(), 3.0_f64.sqrt() * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn wrong_input_count_is_rejected() {
        let f = fit("ftype,d,K,e00,c0\nMA,1,1,1,1\n");
        assert!(matches!(
            f.call(&vec![1.0, 2.0]),
            Err(FitError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }
}
