use tracing::warn;

use crate::support::{
    constraint::{Constraint, ConstraintModel, ConstraintSet, Relate},
    nomial::{Monomial, Posynomial, Variable},
    solve::Solution,
};

use super::{FitError, FitKind, FitRecord, FitTerm};

/// An independent or dependent fit operand.
///
/// A vector holds one monomial per operating point, e.g. one per flight
/// segment. Scalars are broadcast across the vectors they are combined with.
#[derive(Debug, Clone, PartialEq)]
pub enum FitInput {
    Scalar(Monomial),
    Vector(Vec<Monomial>),
}

impl FitInput {
    /// The vector length, or `None` for a scalar.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::Vector(v) => Some(v.len()),
        }
    }

    fn at(&self, index: usize) -> &Monomial {
        match self {
            Self::Scalar(m) => m,
            Self::Vector(v) => &v[index],
        }
    }
}

impl From<Monomial> for FitInput {
    fn from(m: Monomial) -> Self {
        Self::Scalar(m)
    }
}

impl From<&Monomial> for FitInput {
    fn from(m: &Monomial) -> Self {
        Self::Scalar(m.clone())
    }
}

impl From<&Variable> for FitInput {
    fn from(v: &Variable) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<Vec<Monomial>> for FitInput {
    fn from(v: Vec<Monomial>) -> Self {
        Self::Vector(v)
    }
}

impl From<&[Variable]> for FitInput {
    fn from(v: &[Variable]) -> Self {
        Self::Vector(v.iter().map(Monomial::from).collect())
    }
}

impl From<&Vec<Variable>> for FitInput {
    fn from(v: &Vec<Variable>) -> Self {
        Self::from(v.as_slice())
    }
}

/// How much the dependent variable is inflated to cover fit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMargin {
    /// Use the fit as-is.
    #[default]
    None,
    /// Divide the dependent variable by `1 + rms_err`.
    Rms,
    /// Divide the dependent variable by `1 + max_err`.
    Max,
}

/// A fit input found outside the domain the fit was made on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfBounds {
    /// Operating point (vector element).
    pub element: usize,
    /// Independent variable index.
    pub input: usize,
    pub value: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Constraints tying a dependent monomial to its inputs through a fit.
///
/// For `N` operating points the set contains `K·N` constraints for a
/// max-affine fit and `N` constraints for either softmax-affine family.
///
/// ```
/// use gp_models::support::{
///     constraint::ConstraintModel,
///     fit::{FitConstraintSet, FitInput, FitRecord},
///     nomial::Variable,
/// };
///
/// let fit = FitRecord::from_csv("ftype,d,K,e00,c0,a1\nSMA,1,1,0.77,1.28,1\n", 0).unwrap();
/// let w = Variable::dimensionless("w", "");
/// let u = Variable::fixed("u", "", 2.0);
///
/// let cs = FitConstraintSet::new(&fit, &w, [FitInput::from(&u)]).unwrap();
/// assert_eq!(cs.constraints().len(), 1);
///
/// // A one-dimensional fit cannot take two inputs.
/// assert!(FitConstraintSet::new(&fit, &w, [FitInput::from(&u), FitInput::from(&u)]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FitConstraintSet {
    record: FitRecord,
    dependent: FitInput,
    inputs: Vec<FitInput>,
    margin: Variable,
    points: usize,
}

impl FitConstraintSet {
    /// Applies `record` to a dependent operand and `d` independent operands.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::DimensionMismatch`] if the number of inputs is not
    /// the fit's `d`, or [`FitError::ShapeMismatch`] if two vector operands
    /// differ in length.
    pub fn new(
        record: &FitRecord,
        dependent: impl Into<FitInput>,
        inputs: impl IntoIterator<Item = FitInput>,
    ) -> Result<Self, FitError> {
        Self::with_margin(record, dependent, inputs, ErrorMargin::None)
    }

    /// Like [`FitConstraintSet::new`], dividing the dependent operand by an
    /// error margin taken from the record.
    ///
    /// # Errors
    ///
    /// See [`FitConstraintSet::new`].
    pub fn with_margin(
        record: &FitRecord,
        dependent: impl Into<FitInput>,
        inputs: impl IntoIterator<Item = FitInput>,
        margin: ErrorMargin,
    ) -> Result<Self, FitError> {
        let dependent = dependent.into();
        let inputs: Vec<FitInput> = inputs.into_iter().collect();

        if inputs.len() != record.d() {
            return Err(FitError::DimensionMismatch {
                expected: record.d(),
                actual: inputs.len(),
            });
        }

        let mut points = None;
        for len in std::iter::once(&dependent)
            .chain(&inputs)
            .filter_map(FitInput::len)
        {
            match points {
                None => points = Some(len),
                Some(expected) if expected != len => {
                    return Err(FitError::ShapeMismatch {
                        expected,
                        actual: len,
                    });
                }
                Some(_) => {}
            }
        }

        let margin_value = 1.0
            + match margin {
                ErrorMargin::None => 0.0,
                ErrorMargin::Rms => record.rms_err().unwrap_or(0.0),
                ErrorMargin::Max => record.max_err().unwrap_or(0.0),
            };

        Ok(Self {
            record: record.clone(),
            dependent,
            inputs,
            margin: Variable::fixed("m_fit", "fit error margin", margin_value),
            points: points.unwrap_or(1),
        })
    }

    /// Number of operating points the fit is applied at.
    #[must_use]
    pub fn points(&self) -> usize {
        self.points
    }

    /// The fixed margin variable; substitute it to change the margin.
    #[must_use]
    pub fn margin(&self) -> &Variable {
        &self.margin
    }

    #[must_use]
    pub fn record(&self) -> &FitRecord {
        &self.record
    }

    /// Reports inputs that left the fitted domain at a solution.
    ///
    /// Fits extrapolate silently, so this is the only place the domain
    /// bounds are looked at. Each violation is also logged as a warning.
    #[must_use]
    pub fn check_bounds(&self, solution: &Solution) -> Vec<OutOfBounds> {
        let mut found = Vec::new();
        for element in 0..self.points {
            for (input, operand) in self.inputs.iter().enumerate() {
                let Some(value) = operand.at(element).evaluate(|v| solution.value(v)) else {
                    continue;
                };
                let lower = self.record.lower_bound(input);
                let upper = self.record.upper_bound(input);
                if lower.is_some_and(|lb| value < lb) || upper.is_some_and(|ub| value > ub) {
                    warn!(
                        fit = self.record.kind().tag(),
                        element, input, value, ?lower, ?upper,
                        "fit input outside fitted domain"
                    );
                    found.push(OutOfBounds {
                        element,
                        input,
                        value,
                        lower,
                        upper,
                    });
                }
            }
        }
        found
    }

    fn term(&self, term: &FitTerm, element: usize) -> Monomial {
        term.exponents
            .iter()
            .zip(&self.inputs)
            .fold(Monomial::constant(term.coefficient.into_inner()), |acc, (e, u)| {
                acc.times(&u.at(element).pow(*e))
            })
    }
}

impl ConstraintModel for FitConstraintSet {
    fn constraints(&self) -> ConstraintSet {
        let margin = Monomial::from(&self.margin);
        let mut set = ConstraintSet::new();

        for element in 0..self.points {
            let w = self.dependent.at(element).divide(&margin);
            let terms = self.record.terms().iter().map(|t| self.term(t, element));

            match self.record.kind() {
                FitKind::MaxAffine => {
                    set.extend(terms.map(|t| w.geq(t)));
                }
                FitKind::SoftmaxAffine { alpha } => {
                    let rhs: Posynomial = terms.sum();
                    set.push(w.pow(alpha.into_inner()).geq(rhs));
                }
                FitKind::ImplicitSoftmaxAffine { alpha } => {
                    let lhs: Posynomial = terms
                        .zip(alpha)
                        .map(|(t, a)| t.times(&w.pow(-a.into_inner())))
                        .sum();
                    set.push(Constraint::leq(lhs, 1.0));
                }
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        constraint::ConstraintKind,
        program::Program,
        solve::{GpSolver, Solver},
    };

    fn ma_fit() -> FitRecord {
        FitRecord::from_csv(
            "ftype,d,K,e00,e10,c0,c1,lb0,ub0\nMA,1,2,1.0,0.5,1.0,2.0,0.1,10\n",
            0,
        )
        .unwrap()
    }

    fn sma_fit() -> FitRecord {
        FitRecord::from_csv(
            "ftype,d,K,e00,c0,a1,rms_err,max_err,lb0,ub0\nSMA,1,1,0.77,1.28,1.0,0.01,0.02,0.1,10\n",
            0,
        )
        .unwrap()
    }

    fn minimize(cost: &Variable, set: ConstraintSet) -> crate::support::solve::Solution {
        let program = Program::new(cost, set).unwrap();
        GpSolver::default().solve(&program).unwrap()
    }

    #[test]
    fn max_affine_emits_one_constraint_per_term() {
        let w = Variable::dimensionless("w", "");
        let u = Variable::fixed("u", "", 4.0);
        let cs = FitConstraintSet::new(&ma_fit(), &w, [FitInput::from(&u)]).unwrap();

        let set = cs.constraints();
        assert_eq!(set.len(), 2);
        assert_eq!(set.count(ConstraintKind::Posynomial), 2);

        let sol = minimize(&w, set);
        assert_relative_eq!(sol.value(&w).unwrap(), 4.0, max_relative = 1e-4);
    }

    #[test]
    fn softmax_affine_emits_a_single_constraint() {
        let w = Variable::dimensionless("w", "");
        let u = Variable::fixed("u", "", 2.0);
        let cs = FitConstraintSet::new(&sma_fit(), &w, [FitInput::from(&u)]).unwrap();

        let set = cs.constraints();
        assert_eq!(set.len(), 1);

        let sol = minimize(&w, set);
        assert_relative_eq!(
            sol.value(&w).unwrap(),
            1.28 * 2.0_f64.powf(0.77),
            max_relative = 1e-4
        );
    }

    #[test]
    fn margins_inflate_the_dependent_variable() {
        let w = Variable::dimensionless("w", "");
        let u = Variable::fixed("u", "", 2.0);
        let cs = FitConstraintSet::with_margin(&sma_fit(), &w, [FitInput::from(&u)], ErrorMargin::Max)
            .unwrap();
        assert_relative_eq!(cs.margin().value().unwrap(), 1.02);

        let sol = minimize(&w, cs.constraints());
        assert_relative_eq!(
            sol.value(&w).unwrap(),
            1.02 * 1.28 * 2.0_f64.powf(0.77),
            max_relative = 1e-4
        );
    }

    #[test]
    fn scalars_broadcast_across_vectors() {
        let fit = FitRecord::from_csv(
            "ftype,d,K,e00,e01,e10,e11,c0,c1,a1\nSMA,2,2,1,0,0,1,1,1,1\n",
            0,
        )
        .unwrap();
        let w = Variable::dimensionless_vector(3, "w", "");
        let u1 = Variable::fixed_vector("u_1", "", [2.0, 2.0, 2.0]);
        let u2 = Variable::fixed("u_2", "", 3.0);

        let cs = FitConstraintSet::new(&fit, &w, [FitInput::from(&u1), FitInput::from(&u2)])
            .unwrap();
        assert_eq!(cs.points(), 3);

        let set = cs.constraints();
        assert_eq!(set.len(), 3);

        let cost: Posynomial = w.iter().sum();
        let program = Program::new(cost, set).unwrap();
        let sol = GpSolver::default().solve(&program).unwrap();
        for wi in &w {
            assert_relative_eq!(sol.value(wi).unwrap(), 5.0, max_relative = 1e-4);
        }
    }

    #[test]
    fn input_count_must_match_fit_dimension() {
        let w = Variable::dimensionless("w", "");
        let u = Variable::dimensionless("u", "");
        let result = FitConstraintSet::new(&ma_fit(), &w, [FitInput::from(&u), FitInput::from(&u)]);
        assert!(matches!(
            result,
            Err(FitError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn vector_lengths_must_agree() {
        let fit = FitRecord::from_csv(
            "ftype,d,K,e00,e01,c0\nMA,2,1,1,1,1\n",
            0,
        )
        .unwrap();
        let w = Variable::dimensionless("w", "");
        let a = Variable::dimensionless_vector(2, "a", "");
        let b = Variable::dimensionless_vector(3, "b", "");
        let result = FitConstraintSet::new(&fit, &w, [FitInput::from(&a), FitInput::from(&b)]);
        assert!(matches!(
            result,
            Err(FitError::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn implicit_softmax_bounds_the_dependent_variable() {
        let fit = FitRecord::from_csv(
            "ftype,d,K,e00,e10,c0,c1,a1,a2\nISMA,1,2,1,0,1,1,1,2\n",
            0,
        )
        .unwrap();
        let w = Variable::dimensionless("w", "");
        let u = Variable::fixed("u", "", 2.0);
        let cs = FitConstraintSet::new(&fit, &w, [FitInput::from(&u)]).unwrap();

        let sol = minimize(&w, cs.constraints());
        // 2/w + 1/w^2 = 1  =>  w = 1 + sqrt(2)
        assert_relative_eq!(sol.value(&w).unwrap(), 1.0 + 2.0_f64.sqrt(), max_relative = 1e-4);
    }

    #[test]
    fn reports_inputs_outside_the_fitted_domain() {
        let w = Variable::dimensionless("w", "");
        let u = Variable::fixed("u", "", 20.0);
        let cs = FitConstraintSet::new(&ma_fit(), &w, [FitInput::from(&u)]).unwrap();

        let sol = minimize(&w, cs.constraints());
        let violations = cs.check_bounds(&sol);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].upper, Some(10.0));
        assert_relative_eq!(violations[0].value, 20.0);
    }
}
