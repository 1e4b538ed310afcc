use std::{fmt, iter::Sum};

use crate::support::units::Dimension;

use super::{Monomial, Variable, monomial::collect_like_terms};

/// A sum of monomials.
///
/// Posynomials built through the operator overloads only ever contain the
/// terms they were given; whether every coefficient is positive (and the
/// expression is therefore a true posynomial) is checked where it matters,
/// when a constraint is classified.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Posynomial {
    terms: Vec<Monomial>,
}

impl Posynomial {
    pub fn new(terms: impl IntoIterator<Item = Monomial>) -> Self {
        Self {
            terms: collect_like_terms(terms),
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[Monomial] {
        &self.terms
    }

    #[must_use]
    pub fn into_terms(self) -> Vec<Monomial> {
        self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The single term, if this posynomial is a monomial.
    #[must_use]
    pub fn as_monomial(&self) -> Option<&Monomial> {
        match self.terms.as_slice() {
            [term] => Some(term),
            _ => None,
        }
    }

    /// Raises the posynomial to a non-negative integer power by expansion.
    #[must_use]
    pub fn powi(&self, n: u32) -> Self {
        (0..n).fold(Self::from(1.0), |acc, _| acc.times(self))
    }

    /// The common dimension of all terms.
    ///
    /// # Errors
    ///
    /// Returns the first pair of disagreeing term dimensions.
    pub fn dimension(&self) -> Result<Option<Dimension>, (Dimension, Dimension)> {
        common_dimension(&self.terms)
    }

    /// Evaluates the posynomial, returning `None` if any variable has no value.
    pub fn evaluate(&self, value_of: impl Fn(&Variable) -> Option<f64>) -> Option<f64> {
        self.terms
            .iter()
            .try_fold(0.0, |acc, t| t.evaluate(&value_of).map(|x| acc + x))
    }

    /// Folds every variable with a known value into the coefficients.
    #[must_use]
    pub fn substitute(&self, value_of: impl Fn(&Variable) -> Option<f64>) -> Self {
        Self::new(self.terms.iter().map(|t| t.substitute(&value_of)))
    }

    pub(crate) fn plus(self, rhs: Self) -> Self {
        Self::new(self.terms.into_iter().chain(rhs.terms))
    }

    pub(crate) fn times(&self, rhs: &Self) -> Self {
        Self::new(
            self.terms
                .iter()
                .flat_map(|a| rhs.terms.iter().map(move |b| a.times(b))),
        )
    }

    pub(crate) fn divide(&self, rhs: &Monomial) -> Self {
        let inverse = rhs.pow(-1.0);
        Self::new(self.terms.iter().map(|t| t.times(&inverse)))
    }
}

/// Returns the dimension shared by every term, or the first mismatch.
pub(super) fn common_dimension(
    terms: &[Monomial],
) -> Result<Option<Dimension>, (Dimension, Dimension)> {
    let mut dims = terms.iter().map(Monomial::dimension);
    let Some(first) = dims.next() else {
        return Ok(None);
    };
    for dim in dims {
        if !dim.approx_eq(&first) {
            return Err((first, dim));
        }
    }
    Ok(Some(first))
}

impl From<f64> for Posynomial {
    fn from(value: f64) -> Self {
        Self::new([Monomial::constant(value)])
    }
}

impl From<&Variable> for Posynomial {
    fn from(variable: &Variable) -> Self {
        Self::new([Monomial::from(variable)])
    }
}

impl From<Variable> for Posynomial {
    fn from(variable: Variable) -> Self {
        Self::new([Monomial::from(variable)])
    }
}

impl From<Monomial> for Posynomial {
    fn from(monomial: Monomial) -> Self {
        Self::new([monomial])
    }
}

impl From<&Monomial> for Posynomial {
    fn from(monomial: &Monomial) -> Self {
        Self::new([monomial.clone()])
    }
}

impl Sum<Monomial> for Posynomial {
    fn sum<I: Iterator<Item = Monomial>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Sum<Posynomial> for Posynomial {
    fn sum<I: Iterator<Item = Posynomial>>(iter: I) -> Self {
        Self::new(iter.flat_map(Posynomial::into_terms))
    }
}

impl<'a> Sum<&'a Variable> for Posynomial {
    fn sum<I: Iterator<Item = &'a Variable>>(iter: I) -> Self {
        Self::new(iter.map(Monomial::from))
    }
}

impl fmt::Display for Posynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        let terms: Vec<String> = self.terms.iter().map(ToString::to_string).collect();
        f.write_str(&terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::{Area, Length};

    #[test]
    fn like_terms_combine() {
        let x = Variable::dimensionless("x", "");
        let p = &x + &x + 1.0;
        assert_eq!(p.len(), 2);
        assert_relative_eq!(p.evaluate(|_| Some(3.0)).unwrap(), 7.0);
    }

    #[test]
    fn products_expand() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");
        let p = (&x + &y).powi(2);
        // x^2 + 2xy + y^2
        assert_eq!(p.len(), 3);
        assert_relative_eq!(p.evaluate(|_| Some(1.0)).unwrap(), 4.0);
        assert_eq!(Posynomial::from(2.0).powi(0), Posynomial::from(1.0));
    }

    #[test]
    fn dimensions_must_agree() {
        let s = Variable::free::<Area>("S", "");
        let b = Variable::free::<Length>("b", "");
        assert!((&b * &b + &s).dimension().is_ok());
        assert!((&b + &s).dimension().is_err());
        assert_eq!(Posynomial::default().dimension(), Ok(None));
    }

    #[test]
    fn sums_of_variables() {
        let dm = Variable::dimensionless_vector(4, "dm", "");
        let total: Posynomial = dm.iter().sum();
        assert_eq!(total.len(), 4);
    }
}
