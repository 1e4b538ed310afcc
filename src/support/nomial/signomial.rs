use std::fmt;

use crate::support::units::Dimension;

use super::{Monomial, Posynomial, Variable, monomial::collect_like_terms, posynomial::common_dimension};

/// A sum of monomials with coefficients of either sign.
///
/// Signomials appear once a model subtracts terms; constraints over them are
/// not log-convex and need a sequential solve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signomial {
    terms: Vec<Monomial>,
}

impl Signomial {
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
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Splits into the posynomial of positive terms and the posynomial of
    /// negated negative terms, so that `self = positive - negative`.
    #[must_use]
    pub fn split(&self) -> (Posynomial, Posynomial) {
        let positive = self
            .terms
            .iter()
            .filter(|t| t.coefficient() > 0.0)
            .cloned();
        let negative = self
            .terms
            .iter()
            .filter(|t| t.coefficient() < 0.0)
            .map(|t| t.scale(-1.0));
        (Posynomial::new(positive), Posynomial::new(negative))
    }

    /// Converts to a posynomial if every coefficient is positive.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if any coefficient is not positive.
    pub fn into_posynomial(self) -> Result<Posynomial, Self> {
        if self.terms.iter().all(|t| t.coefficient() > 0.0) {
            Ok(Posynomial::new(self.terms))
        } else {
            Err(self)
        }
    }

    /// The common dimension of all terms.
    ///
    /// # Errors
    ///
    /// Returns the first pair of disagreeing term dimensions.
    pub fn dimension(&self) -> Result<Option<Dimension>, (Dimension, Dimension)> {
        common_dimension(&self.terms)
    }

    /// Evaluates the signomial, returning `None` if any variable has no value.
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

    pub(crate) fn negate(self) -> Self {
        Self::new(self.terms.into_iter().map(|t| t.scale(-1.0)))
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

impl From<f64> for Signomial {
    fn from(value: f64) -> Self {
        Self::new([Monomial::constant(value)])
    }
}

impl From<&Variable> for Signomial {
    fn from(variable: &Variable) -> Self {
        Self::new([Monomial::from(variable)])
    }
}

impl From<Variable> for Signomial {
    fn from(variable: Variable) -> Self {
        Self::new([Monomial::from(variable)])
    }
}

impl From<Monomial> for Signomial {
    fn from(monomial: Monomial) -> Self {
        Self::new([monomial])
    }
}

impl From<&Monomial> for Signomial {
    fn from(monomial: &Monomial) -> Self {
        Self::new([monomial.clone()])
    }
}

impl From<Posynomial> for Signomial {
    fn from(posynomial: Posynomial) -> Self {
        Self::new(posynomial.into_terms())
    }
}

impl From<&Posynomial> for Signomial {
    fn from(posynomial: &Posynomial) -> Self {
        Self::new(posynomial.terms().iter().cloned())
    }
}

impl fmt::Display for Signomial {
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

    #[test]
    fn subtraction_splits_by_sign() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");
        let s = &x + 2.0 - &y * 3.0;

        let (positive, negative) = s.split();
        assert_eq!(positive.len(), 2);
        assert_eq!(negative.len(), 1);
        assert_relative_eq!(negative.terms()[0].coefficient(), 3.0);
        assert!(s.clone().into_posynomial().is_err());
        assert_relative_eq!(s.evaluate(|_| Some(1.0)).unwrap(), 0.0);
    }

    #[test]
    fn cancellation_removes_terms() {
        let x = Variable::dimensionless("x", "");
        let s = &x - &x;
        assert!(s.is_empty());
    }
}
