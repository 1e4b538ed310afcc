//! Truncated Taylor expansions that stay posynomial.

use crate::support::nomial::Posynomial;

/// The first `terms` terms of the Taylor series of `eˣ - 1`.
///
/// Every term `xⁱ / i!` has a positive coefficient, so the result is a
/// posynomial lower bound on `eˣ - 1` for positive `x`. Useful wherever an
/// exponential (the Breguet range equation, the rocket equation) must sit on
/// the large side of a GP inequality.
///
/// ```
/// use gp_models::support::{nomial::Variable, taylor::te_exp_minus1};
///
/// let z = Variable::dimensionless("z", "");
/// let p = te_exp_minus1(&z, 3);
/// assert_eq!(p.len(), 3);
///
/// let at_half = p.evaluate(|_| Some(0.5)).unwrap();
/// assert!((at_half - (0.5 + 0.125 + 0.125 / 6.0)).abs() < 1e-12);
/// ```
#[must_use]
pub fn te_exp_minus1(x: impl Into<Posynomial>, terms: u32) -> Posynomial {
    let x = x.into();
    let mut factorial = 1.0;
    (1..=terms)
        .map(|i| {
            factorial *= f64::from(i);
            x.powi(i) / factorial
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::nomial::Variable;

    #[test]
    fn converges_to_the_exponential() {
        let x = Variable::dimensionless("x", "");
        let at = |_: &Variable| Some(0.3);

        let short = te_exp_minus1(&x, 2).evaluate(at).unwrap();
        let long = te_exp_minus1(&x, 8).evaluate(at).unwrap();
        let exact = 0.3_f64.exp_m1();

        assert!(short < long);
        assert!(long <= exact);
        assert_relative_eq!(long, exact, max_relative = 1e-8);
    }

    #[test]
    fn expands_posynomial_arguments() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");
        let p = te_exp_minus1(&x + &y, 2);

        // (x + y) + (x + y)²/2 = x + y + x²/2 + xy + y²/2
        assert_eq!(p.len(), 5);
        assert_relative_eq!(p.evaluate(|_| Some(1.0)).unwrap(), 4.0);
    }

    #[test]
    fn zero_terms_is_empty() {
        let x = Variable::dimensionless("x", "");
        assert!(te_exp_minus1(&x, 0).is_empty());
    }
}
