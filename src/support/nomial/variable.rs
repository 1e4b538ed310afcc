use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{self, AtomicU64},
    },
};

use crate::support::units::{Dimension, SiQuantity};

use super::Monomial;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A named, positive, real-valued decision variable.
///
/// Every declaration creates a distinct variable: two wings each declaring a
/// weight `W` own two different variables even though the names match.
/// Cloning a `Variable` is cheap and yields a handle to the same declaration,
/// which is how models reference variables owned by other models.
///
/// A variable may carry a fixed value (in SI base units). Fixed variables are
/// folded into coefficients before solving and can be overridden with
/// substitutions on a [`ConstraintSet`](crate::support::constraint::ConstraintSet).
#[derive(Clone)]
pub struct Variable(Arc<Declaration>);

#[derive(Debug)]
struct Declaration {
    id: u64,
    name: String,
    description: String,
    dimension: Dimension,
    value: Option<f64>,
}

impl Variable {
    fn declare(
        name: impl Into<String>,
        description: impl Into<String>,
        dimension: Dimension,
        value: Option<f64>,
    ) -> Self {
        Self(Arc::new(Declaration {
            id: NEXT_ID.fetch_add(1, atomic::Ordering::Relaxed),
            name: name.into(),
            description: description.into(),
            dimension,
            value,
        }))
    }

    /// Declares a free variable with the dimension of quantity type `Q`.
    ///
    /// ```
    /// use gp_models::support::nomial::Variable;
    /// use uom::si::f64::Area;
    ///
    /// let s = Variable::free::<Area>("S", "surface area");
    /// assert!(s.value().is_none());
    /// ```
    pub fn free<Q: SiQuantity>(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::declare(name, description, Q::dimension(), None)
    }

    /// Declares a free dimensionless variable.
    pub fn dimensionless(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::free::<f64>(name, description)
    }

    /// Declares a variable fixed to `value`.
    ///
    /// The dimension is taken from the quantity type; pass a bare `f64` for a
    /// dimensionless value.
    pub fn fixed<Q: SiQuantity>(
        name: impl Into<String>,
        description: impl Into<String>,
        value: Q,
    ) -> Self {
        Self::declare(name, description, Q::dimension(), Some(value.si_value()))
    }

    /// Declares `n` free variables named `name[0]`, `name[1]`, ….
    pub fn vector<Q: SiQuantity>(n: usize, name: &str, description: &str) -> Vec<Self> {
        (0..n)
            .map(|i| Self::free::<Q>(format!("{name}[{i}]"), description))
            .collect()
    }

    /// Declares `n` free dimensionless variables.
    pub fn dimensionless_vector(n: usize, name: &str, description: &str) -> Vec<Self> {
        Self::vector::<f64>(n, name, description)
    }

    /// Declares one fixed variable per value, named `name[0]`, `name[1]`, ….
    pub fn fixed_vector<Q: SiQuantity>(
        name: &str,
        description: &str,
        values: impl IntoIterator<Item = Q>,
    ) -> Vec<Self> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Self::fixed(format!("{name}[{i}]"), description, value))
            .collect()
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.0.description
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.0.dimension
    }

    /// The declared fixed value in SI base units, if any.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.0.value
    }

    /// Raises the variable to a real power.
    #[must_use]
    pub fn pow(&self, exponent: f64) -> Monomial {
        Monomial::from(self).pow(exponent)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.id.cmp(&other.0.id)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} [{}]", self.0.name, self.0.id, self.0.dimension)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, MassDensity},
        mass_density::gram_per_cubic_centimeter,
    };

    #[test]
    fn declarations_are_distinct() {
        let a = Variable::free::<Length>("b", "span");
        let b = Variable::free::<Length>("b", "span");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn fixed_values_are_stored_in_si() {
        let rho = Variable::fixed(
            "rho",
            "density of CFRP",
            MassDensity::new::<gram_per_cubic_centimeter>(1.6),
        );
        assert_relative_eq!(rho.value().unwrap(), 1600.0, epsilon = 1e-9);
        assert_eq!(rho.dimension(), MassDensity::dimension());

        let lam = Variable::fixed("lam", "taper ratio", 0.5);
        assert!(lam.dimension().is_dimensionless());
    }

    #[test]
    fn vectors_are_indexed() {
        let eta = Variable::fixed_vector("eta", "(2y/b)", [0.0, 0.5, 1.0]);
        assert_eq!(eta.len(), 3);
        assert_eq!(eta[1].name(), "eta[1]");
        assert_relative_eq!(eta[2].value().unwrap(), 1.0);

        let c = Variable::vector::<Length>(4, "c", "chord");
        assert_eq!(c[3].name(), "c[3]");
        assert!(c[0].value().is_none());
    }
}
