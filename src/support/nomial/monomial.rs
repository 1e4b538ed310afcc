use std::{collections::BTreeMap, fmt};

use crate::support::units::Dimension;

use super::Variable;

/// Exponents smaller than this are treated as zero after arithmetic.
const ZERO_EXPONENT: f64 = 1e-12;

/// A single term `c · Π xᵢ^aᵢ`.
///
/// Monomials used in geometric programs have `c > 0`; a negative coefficient
/// only makes sense as a term of a [`Signomial`](super::Signomial).
#[derive(Debug, Clone, PartialEq)]
pub struct Monomial {
    coefficient: f64,
    exponents: BTreeMap<Variable, f64>,
}

impl Monomial {
    /// A constant monomial.
    #[must_use]
    pub fn constant(coefficient: f64) -> Self {
        Self {
            coefficient,
            exponents: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    #[must_use]
    pub fn exponents(&self) -> &BTreeMap<Variable, f64> {
        &self.exponents
    }

    /// The exponent of `variable`, zero if it does not appear.
    #[must_use]
    pub fn exponent(&self, variable: &Variable) -> f64 {
        self.exponents.get(variable).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Raises the monomial to a real power.
    #[must_use]
    pub fn pow(&self, exponent: f64) -> Self {
        Self {
            coefficient: self.coefficient.powf(exponent),
            exponents: self
                .exponents
                .iter()
                .map(|(v, a)| (v.clone(), a * exponent))
                .filter(|(_, a)| a.abs() > ZERO_EXPONENT)
                .collect(),
        }
    }

    /// The dimension implied by the variables and their exponents.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.exponents
            .iter()
            .fold(Dimension::DIMENSIONLESS, |acc, (v, a)| {
                acc * v.dimension().powf(*a)
            })
    }

    /// Evaluates the monomial, returning `None` if any variable has no value.
    pub fn evaluate(&self, value_of: impl Fn(&Variable) -> Option<f64>) -> Option<f64> {
        self.exponents
            .iter()
            .try_fold(self.coefficient, |acc, (v, a)| {
                value_of(v).map(|x| acc * x.powf(*a))
            })
    }

    /// Folds every variable with a known value into the coefficient.
    #[must_use]
    pub fn substitute(&self, value_of: impl Fn(&Variable) -> Option<f64>) -> Self {
        let mut coefficient = self.coefficient;
        let mut exponents = BTreeMap::new();
        for (v, a) in &self.exponents {
            match value_of(v) {
                Some(x) => coefficient *= x.powf(*a),
                None => {
                    exponents.insert(v.clone(), *a);
                }
            }
        }
        Self {
            coefficient,
            exponents,
        }
    }

    pub(crate) fn times(&self, rhs: &Self) -> Self {
        let mut exponents = self.exponents.clone();
        for (v, a) in &rhs.exponents {
            *exponents.entry(v.clone()).or_insert(0.0) += a;
        }
        exponents.retain(|_, a| a.abs() > ZERO_EXPONENT);
        Self {
            coefficient: self.coefficient * rhs.coefficient,
            exponents,
        }
    }

    pub(crate) fn divide(&self, rhs: &Self) -> Self {
        self.times(&rhs.pow(-1.0))
    }

    pub(crate) fn scale(&self, factor: f64) -> Self {
        Self {
            coefficient: self.coefficient * factor,
            exponents: self.exponents.clone(),
        }
    }

    /// True if both monomials have identical variables and exponents.
    pub(crate) fn is_like(&self, other: &Self) -> bool {
        self.exponents.len() == other.exponents.len()
            && self
                .exponents
                .iter()
                .zip(other.exponents.iter())
                .all(|((v, a), (w, b))| v == w && (a - b).abs() <= ZERO_EXPONENT)
    }
}

/// Sums like terms and drops terms whose coefficients cancel.
pub(super) fn collect_like_terms(terms: impl IntoIterator<Item = Monomial>) -> Vec<Monomial> {
    let mut collected: Vec<Monomial> = Vec::new();
    for term in terms {
        match collected.iter_mut().find(|t| t.is_like(&term)) {
            Some(existing) => existing.coefficient += term.coefficient,
            None => collected.push(term),
        }
    }
    collected.retain(|t| t.coefficient != 0.0);
    collected
}

impl From<f64> for Monomial {
    fn from(coefficient: f64) -> Self {
        Self::constant(coefficient)
    }
}

impl From<&Variable> for Monomial {
    fn from(variable: &Variable) -> Self {
        Self {
            coefficient: 1.0,
            exponents: BTreeMap::from([(variable.clone(), 1.0)]),
        }
    }
}

impl From<Variable> for Monomial {
    fn from(variable: Variable) -> Self {
        Self {
            coefficient: 1.0,
            exponents: BTreeMap::from([(variable, 1.0)]),
        }
    }
}

impl From<&Monomial> for Monomial {
    fn from(monomial: &Monomial) -> Self {
        monomial.clone()
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut factors = Vec::new();
        if self.exponents.is_empty() || (self.coefficient - 1.0).abs() > f64::EPSILON {
            factors.push(format!("{}", self.coefficient));
        }
        for (v, a) in &self.exponents {
            if (a - 1.0).abs() <= ZERO_EXPONENT {
                factors.push(v.name().to_string());
            } else {
                factors.push(format!("{}^{a}", v.name()));
            }
        }
        f.write_str(&factors.join("·"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::{Area, Length};

    use crate::support::units::SiQuantity;

    #[test]
    fn products_merge_exponents() {
        let s = Variable::free::<Area>("S", "area");
        let b = Variable::free::<Length>("b", "span");

        let chord = &s / &b;
        assert_relative_eq!(chord.exponent(&s), 1.0);
        assert_relative_eq!(chord.exponent(&b), -1.0);
        assert!(chord.dimension().approx_eq(&Length::dimension()));

        let unity = chord.times(&chord.pow(-1.0));
        assert!(unity.is_constant());
        assert_relative_eq!(unity.coefficient(), 1.0);
    }

    #[test]
    fn substitution_folds_known_values() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::fixed("y", "", 4.0);
        let m = 3.0 * &x * y.pow(0.5);

        let folded = m.substitute(|v| v.value());
        assert_relative_eq!(folded.coefficient(), 6.0);
        assert_relative_eq!(folded.exponent(&x), 1.0);
        assert_eq!(folded.exponents().len(), 1);

        assert!(m.evaluate(|v| v.value()).is_none());
        let value = m.evaluate(|v| if *v == x { Some(2.0) } else { v.value() });
        assert_relative_eq!(value.unwrap(), 12.0);
    }

    #[test]
    fn like_terms_collect() {
        let x = Variable::dimensionless("x", "");
        let terms = collect_like_terms([
            Monomial::from(&x).scale(2.0),
            Monomial::constant(1.0),
            Monomial::from(&x).scale(-2.0),
        ]);
        assert_eq!(terms.len(), 1);
        assert!(terms[0].is_constant());
    }
}
