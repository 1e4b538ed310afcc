//! Tagged algebraic constraints and the sets models build from them.
//!
//! A [`Constraint`] relates two nomials with `≤` or `=`. Its
//! [`ConstraintKind`] is derived from the operands when the constraint is
//! built, so a solver can tell at a glance whether a set is a geometric
//! program or needs signomial treatment:
//!
//! | relation                         | kind                                   |
//! |----------------------------------|----------------------------------------|
//! | posynomial `≤` monomial          | [`ConstraintKind::Posynomial`]         |
//! | monomial `=` monomial            | [`ConstraintKind::MonomialEquality`]   |
//! | any other inequality             | [`ConstraintKind::Signomial`]          |
//! | any other equality               | [`ConstraintKind::SignomialEquality`]  |
//!
//! Relations are written with the [`Relate`] methods:
//!
//! ```
//! use gp_models::support::{
//!     constraint::{ConstraintKind, Relate},
//!     nomial::Variable,
//! };
//!
//! let w = Variable::dimensionless("W", "weight");
//! let x = Variable::dimensionless("x", "");
//!
//! assert_eq!(w.geq(&x + 1.0).kind(), ConstraintKind::Posynomial);
//! assert_eq!(w.equals(&x * 2.0).kind(), ConstraintKind::MonomialEquality);
//! assert_eq!(w.geq(&x - 1.0).kind(), ConstraintKind::Signomial);
//! ```

use std::{collections::BTreeMap, fmt};

use crate::support::{
    nomial::{Monomial, Posynomial, Signomial, Variable},
    units::{Dimension, SiQuantity},
};

/// How a constraint can be handed to a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// A posynomial bounded above by a monomial.
    Posynomial,
    /// Two monomials held equal.
    MonomialEquality,
    /// An inequality that is not log-convex.
    Signomial,
    /// An equality between arbitrary nomials.
    SignomialEquality,
}

impl ConstraintKind {
    /// True for kinds a geometric program accepts directly.
    #[must_use]
    pub fn is_gp(self) -> bool {
        matches!(self, Self::Posynomial | Self::MonomialEquality)
    }

    #[must_use]
    pub fn is_equality(self) -> bool {
        matches!(self, Self::MonomialEquality | Self::SignomialEquality)
    }
}

/// A relation `lhs ≤ rhs` or `lhs = rhs`.
///
/// `≥` relations are stored flipped, so the left side is always the side
/// bounded from above.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    lhs: Signomial,
    rhs: Signomial,
    kind: ConstraintKind,
    tight: bool,
}

impl Constraint {
    /// Builds `lhs ≤ rhs`.
    pub fn leq(lhs: impl Into<Signomial>, rhs: impl Into<Signomial>) -> Self {
        let lhs = lhs.into();
        let rhs = rhs.into();
        let kind = if is_positive_posynomial(&lhs) && positive_monomial(&rhs).is_some() {
            ConstraintKind::Posynomial
        } else {
            ConstraintKind::Signomial
        };
        Self {
            lhs,
            rhs,
            kind,
            tight: false,
        }
    }

    /// Builds `lhs = rhs`.
    pub fn equal(lhs: impl Into<Signomial>, rhs: impl Into<Signomial>) -> Self {
        let lhs = lhs.into();
        let rhs = rhs.into();
        let kind = if positive_monomial(&lhs).is_some() && positive_monomial(&rhs).is_some() {
            ConstraintKind::MonomialEquality
        } else {
            ConstraintKind::SignomialEquality
        };
        Self {
            lhs,
            rhs,
            kind,
            tight: false,
        }
    }

    /// Marks the constraint as expected to be active at the optimum.
    ///
    /// Solutions report tight constraints that turn out slack.
    #[must_use]
    pub fn tight(mut self) -> Self {
        self.tight = true;
        self
    }

    #[must_use]
    pub fn is_tight(&self) -> bool {
        self.tight
    }

    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    #[must_use]
    pub fn lhs(&self) -> &Signomial {
        &self.lhs
    }

    #[must_use]
    pub fn rhs(&self) -> &Signomial {
        &self.rhs
    }

    /// The GP form `p ≤ 1` of a posynomial constraint.
    ///
    /// Returns `None` for any other kind.
    #[must_use]
    pub fn as_posynomial(&self) -> Option<Posynomial> {
        if self.kind != ConstraintKind::Posynomial {
            return None;
        }
        let lhs = self.lhs.clone().into_posynomial().ok()?;
        let rhs = positive_monomial(&self.rhs)?;
        Some(lhs.divide(&rhs))
    }

    /// The GP form `m = 1` of a monomial equality.
    ///
    /// Returns `None` for any other kind.
    #[must_use]
    pub fn as_monomial_equality(&self) -> Option<Monomial> {
        if self.kind != ConstraintKind::MonomialEquality {
            return None;
        }
        Some(positive_monomial(&self.lhs)?.divide(&positive_monomial(&self.rhs)?))
    }

    /// Splits `lhs - rhs` into positive parts `(p, n)` so the relation reads
    /// `p ≤ n` (or `p = n` for equalities).
    #[must_use]
    pub fn split(&self) -> (Posynomial, Posynomial) {
        (self.lhs.clone() - self.rhs.clone()).split()
    }

    /// The common dimension of both sides.
    ///
    /// # Errors
    ///
    /// Returns the first pair of disagreeing term dimensions.
    pub fn dimension(&self) -> Result<Option<Dimension>, (Dimension, Dimension)> {
        let lhs = self.lhs.dimension()?;
        let rhs = self.rhs.dimension()?;
        match (lhs, rhs) {
            (Some(a), Some(b)) if !a.approx_eq(&b) => Err((a, b)),
            (Some(a), _) => Ok(Some(a)),
            (None, b) => Ok(b),
        }
    }

    /// Every variable the constraint mentions.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.lhs
            .terms()
            .iter()
            .chain(self.rhs.terms())
            .flat_map(|t| t.exponents().keys())
    }

    /// Replaces every variable with a known value by that value.
    #[must_use]
    pub fn substitute(&self, value_of: impl Fn(&Variable) -> Option<f64>) -> Self {
        let lhs = self.lhs.substitute(&value_of);
        let rhs = self.rhs.substitute(&value_of);
        let rebuilt = if self.kind.is_equality() {
            Self::equal(lhs, rhs)
        } else {
            Self::leq(lhs, rhs)
        };
        Self {
            tight: self.tight,
            ..rebuilt
        }
    }

    /// Evaluates `lhs / rhs` at a point, or `None` if a value is missing.
    pub fn ratio(&self, value_of: impl Fn(&Variable) -> Option<f64>) -> Option<f64> {
        Some(self.lhs.evaluate(&value_of)? / self.rhs.evaluate(&value_of)?)
    }
}

fn is_positive_posynomial(s: &Signomial) -> bool {
    !s.is_empty() && s.terms().iter().all(|t| t.coefficient() > 0.0)
}

fn positive_monomial(s: &Signomial) -> Option<Monomial> {
    match s.terms() {
        [term] if term.coefficient() > 0.0 => Some(term.clone()),
        _ => None,
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.kind.is_equality() { "=" } else { "<=" };
        write!(f, "{} {op} {}", self.lhs, self.rhs)
    }
}

/// Builds constraints from nomials.
///
/// Implemented for numbers, variables and every nomial type. The receiver is
/// borrowed, so a variable can appear in any number of relations.
pub trait Relate {
    fn to_signomial(&self) -> Signomial;

    /// `self ≥ rhs`
    fn geq(&self, rhs: impl Into<Signomial>) -> Constraint {
        Constraint::leq(rhs, self.to_signomial())
    }

    /// `self ≤ rhs`
    fn leq(&self, rhs: impl Into<Signomial>) -> Constraint {
        Constraint::leq(self.to_signomial(), rhs)
    }

    /// `self = rhs`
    fn equals(&self, rhs: impl Into<Signomial>) -> Constraint {
        Constraint::equal(self.to_signomial(), rhs)
    }
}

macro_rules! relate_by_ref {
    ($($ty:ty),*) => {
        $(
            impl Relate for $ty {
                fn to_signomial(&self) -> Signomial {
                    Signomial::from(self)
                }
            }
        )*
    };
}

relate_by_ref!(Variable, Monomial, Posynomial);

impl Relate for Signomial {
    fn to_signomial(&self) -> Signomial {
        self.clone()
    }
}

impl Relate for f64 {
    fn to_signomial(&self) -> Signomial {
        Signomial::from(*self)
    }
}

/// A value assigned to a variable before solving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Substitution {
    /// Value in SI base units.
    pub value: f64,
    pub dimension: Dimension,
}

/// An ordered collection of constraints plus variable substitutions.
///
/// Substitutions override the fixed values variables were declared with.
/// When two sets are merged, the substitutions of the set merged last win.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
    substitutions: BTreeMap<Variable, Substitution>,
}

impl ConstraintSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends the constraints and substitutions of another set.
    pub fn include(&mut self, other: ConstraintSet) -> &mut Self {
        self.constraints.extend(other.constraints);
        self.substitutions.extend(other.substitutions);
        self
    }

    /// Appends the constraints of a sub-model.
    pub fn include_model(&mut self, model: &impl ConstraintModel) -> &mut Self {
        self.include(model.constraints())
    }

    /// Assigns `value` to `variable`, overriding any earlier value.
    pub fn substitute<Q: SiQuantity>(&mut self, variable: &Variable, value: Q) -> &mut Self {
        self.substitutions.insert(
            variable.clone(),
            Substitution {
                value: value.si_value(),
                dimension: Q::dimension(),
            },
        );
        self
    }

    /// Builder form of [`ConstraintSet::substitute`].
    #[must_use]
    pub fn with_substitution<Q: SiQuantity>(mut self, variable: &Variable, value: Q) -> Self {
        self.substitute(variable, value);
        self
    }

    #[must_use]
    pub fn substitutions(&self) -> &BTreeMap<Variable, Substitution> {
        &self.substitutions
    }

    /// The value a variable takes before solving: its substitution if one
    /// exists, otherwise its declared fixed value.
    #[must_use]
    pub fn fixed_value(&self, variable: &Variable) -> Option<f64> {
        self.substitutions
            .get(variable)
            .map(|s| s.value)
            .or_else(|| variable.value())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// True if every constraint is GP-compatible.
    #[must_use]
    pub fn is_gp(&self) -> bool {
        self.constraints.iter().all(|c| c.kind().is_gp())
    }

    /// Counts constraints of one kind.
    #[must_use]
    pub fn count(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind() == kind).count()
    }
}

impl Extend<Constraint> for ConstraintSet {
    fn extend<I: IntoIterator<Item = Constraint>>(&mut self, iter: I) {
        self.constraints.extend(iter);
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
            substitutions: BTreeMap::new(),
        }
    }
}

impl<const N: usize> From<[Constraint; N]> for ConstraintSet {
    fn from(constraints: [Constraint; N]) -> Self {
        constraints.into_iter().collect()
    }
}

impl IntoIterator for ConstraintSet {
    type Item = Constraint;
    type IntoIter = std::vec::IntoIter<Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

/// A model that contributes constraints to a program.
///
/// Parents include their sub-models explicitly in their own
/// [`constraints`](ConstraintModel::constraints).
pub trait ConstraintModel {
    fn constraints(&self) -> ConstraintSet;
}

impl ConstraintModel for ConstraintSet {
    fn constraints(&self) -> ConstraintSet {
        self.clone()
    }
}

impl<M: ConstraintModel> ConstraintModel for [M] {
    fn constraints(&self) -> ConstraintSet {
        let mut set = ConstraintSet::new();
        for model in self {
            set.include_model(model);
        }
        set
    }
}

impl<M: ConstraintModel> ConstraintModel for Vec<M> {
    fn constraints(&self) -> ConstraintSet {
        self.as_slice().constraints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::foot};

    #[test]
    fn classification_follows_operands() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");

        assert_eq!(x.leq(&y).kind(), ConstraintKind::Posynomial);
        assert_eq!((&x + &y).leq(1.0).kind(), ConstraintKind::Posynomial);
        assert_eq!(1.0_f64.geq(&x + &y).kind(), ConstraintKind::Posynomial);
        assert_eq!((&x + &y).geq(1.0).kind(), ConstraintKind::Signomial);
        assert_eq!(x.equals(&y + 1.0).kind(), ConstraintKind::SignomialEquality);
        assert_eq!((&x * &y).equals(3.0).kind(), ConstraintKind::MonomialEquality);
    }

    #[test]
    fn gp_forms_normalize_to_one() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::dimensionless("y", "");

        let p = (&x + &y).leq(2.0 * &y).as_posynomial().unwrap();
        assert_relative_eq!(p.evaluate(|_| Some(1.0)).unwrap(), 1.0);

        let m = x.equals(&y * 4.0).as_monomial_equality().unwrap();
        assert_relative_eq!(m.coefficient(), 0.25);
        assert!(x.geq(&y - 1.0).as_posynomial().is_none());
    }

    #[test]
    fn substitution_keeps_tightness_and_reclassifies() {
        let x = Variable::dimensionless("x", "");
        let y = Variable::fixed("y", "", 3.0);

        let c = x.geq(&y - 1.0).tight();
        assert_eq!(c.kind(), ConstraintKind::Signomial);
        let folded = c.substitute(|v| v.value());
        assert!(folded.is_tight());
        assert_eq!(folded.kind(), ConstraintKind::Posynomial);
    }

    #[test]
    fn later_substitutions_win() {
        let l = Variable::free::<Length>("l", "length");
        let mut first = ConstraintSet::new();
        first.substitute(&l, Length::new::<foot>(1.0));
        let mut second = ConstraintSet::new();
        second.substitute(&l, Length::new::<foot>(2.0));

        first.include(second);
        assert_relative_eq!(first.fixed_value(&l).unwrap(), 0.6096);
    }

    #[test]
    fn mixed_dimensions_are_detected() {
        let l = Variable::free::<Length>("l", "length");
        let x = Variable::dimensionless("x", "");
        assert!(l.leq(&x).dimension().is_err());
        assert!(l.leq(&l * 2.0).dimension().is_ok());
    }
}
