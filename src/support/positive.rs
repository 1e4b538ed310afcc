//! Strictly positive values, checked once at construction.
//!
//! Geometric programs are defined over positive reals only: every fixed
//! variable value, every posynomial coefficient and every fit coefficient
//! must be greater than zero. [`Positive<T>`] carries that invariant so code
//! downstream of construction never has to re-check it.
//!
//! ```
//! use gp_models::support::positive::Positive;
//!
//! let c = Positive::new(1.28).unwrap();
//! assert_eq!(c.into_inner(), 1.28);
//!
//! assert!(Positive::new(0.0).is_err());
//! assert!(Positive::new(-2.0).is_err());
//! assert!(Positive::new(f64::NAN).is_err());
//! ```

use std::cmp::Ordering;

use num_traits::Zero;
use thiserror::Error;

/// An error returned when a value is not strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PositiveError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
}

/// A wrapper guaranteeing its value is greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Positive<T>(T);

impl<T: PartialOrd + Zero> Positive<T> {
    /// Wraps a value after checking it is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns a [`PositiveError`] if the value is zero, negative or `NaN`.
    pub fn new(value: T) -> Result<Self, PositiveError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(Self(value)),
            Some(Ordering::Equal) => Err(PositiveError::Zero),
            Some(Ordering::Less) => Err(PositiveError::Negative),
            None => Err(PositiveError::NotANumber),
        }
    }
}

impl<T> Positive<T> {
    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> AsRef<T> for Positive<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::MassDensity, mass_density::gram_per_cubic_centimeter};

    #[test]
    fn floats() {
        assert!(Positive::new(1e-10).is_ok());
        assert_eq!(Positive::new(0.0), Err(PositiveError::Zero));
        assert_eq!(Positive::new(-5.0), Err(PositiveError::Negative));
        assert_eq!(Positive::new(f64::NAN), Err(PositiveError::NotANumber));
    }

    #[test]
    fn densities() {
        let rho = MassDensity::new::<gram_per_cubic_centimeter>(1.6);
        assert!(Positive::new(rho).is_ok());

        let rho = MassDensity::new::<gram_per_cubic_centimeter>(0.0);
        assert!(Positive::new(rho).is_err());
    }
}
