//! Extensions to [`uom`] for constraint modeling.
//!
//! This crate uses [`uom`] for all physical quantities that enter a model:
//! variable declarations, fixed values, substitutions and solution readout.
//! Internally every value is stored as an `f64` in SI base units, and every
//! variable carries a [`Dimension`] so that sums and relations can be checked
//! for consistency before a program is handed to a solver.
//!
//! ## Quantities
//!
//! The [`SiQuantity`] trait bridges `uom` quantities (and bare `f64` for
//! dimensionless values) to the SI `f64` storage:
//!
//! ```
//! use gp_models::support::units::{Dimension, SiQuantity};
//! use uom::si::{f64::MassDensity, mass_density::gram_per_cubic_centimeter};
//!
//! let rho = MassDensity::new::<gram_per_cubic_centimeter>(1.6);
//! assert!((rho.si_value() - 1600.0).abs() < 1e-9);
//! assert_eq!(MassDensity::dimension(), Dimension::new([-3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
//! ```
//!
//! Quantities that `uom` does not name (torque constants, areal densities,
//! second moments of area, …) are provided as aliases in this module.

mod dimension;
mod quantities;

pub use dimension::Dimension;
pub use quantities::{
    ArealDensity, Circulation, ForcePerLength, InverseArea, InverseLength, SecondMomentOfArea,
    SpecificFuelConsumption, SpecificTorque, SpecificWeight, VoltageConstant,
};

use std::marker::PhantomData;

use uom::{
    si::{Quantity, SI},
    typenum::Integer,
};

/// A value that can be stored as an SI base-unit `f64` with a known dimension.
///
/// Implemented for every `uom` SI quantity with `f64` storage, and for `f64`
/// itself as a dimensionless value.
pub trait SiQuantity {
    /// The dimension of this quantity type.
    fn dimension() -> Dimension;

    /// The value expressed in SI base units.
    fn si_value(&self) -> f64;

    /// Builds the quantity from a value expressed in SI base units.
    fn from_si(value: f64) -> Self;
}

impl SiQuantity for f64 {
    fn dimension() -> Dimension {
        Dimension::DIMENSIONLESS
    }

    fn si_value(&self) -> f64 {
        *self
    }

    fn from_si(value: f64) -> Self {
        value
    }
}

impl<D> SiQuantity for Quantity<D, SI<f64>, f64>
where
    D: uom::si::Dimension + ?Sized,
{
    fn dimension() -> Dimension {
        Dimension::new([
            f64::from(D::L::to_i32()),
            f64::from(D::M::to_i32()),
            f64::from(D::T::to_i32()),
            f64::from(D::I::to_i32()),
            f64::from(D::Th::to_i32()),
            f64::from(D::N::to_i32()),
            f64::from(D::J::to_i32()),
        ])
    }

    fn si_value(&self) -> f64 {
        self.value
    }

    fn from_si(value: f64) -> Self {
        Quantity {
            dimension: PhantomData,
            units: PhantomData,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        angular_velocity::revolution_per_minute,
        f64::{AngularVelocity, Force, Length, Ratio},
        force::pound_force,
        length::foot,
        ratio::ratio,
    };

    #[test]
    fn converts_to_si_base_units() {
        assert_relative_eq!(Length::new::<foot>(1.0).si_value(), 0.3048);
        assert_relative_eq!(
            Force::new::<pound_force>(1.0).si_value(),
            4.448_221_615_260_5,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            AngularVelocity::new::<revolution_per_minute>(60.0).si_value(),
            2.0 * std::f64::consts::PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn dimensions_follow_the_quantity_type() {
        assert_eq!(
            Force::dimension(),
            Dimension::new([1.0, 1.0, -2.0, 0.0, 0.0, 0.0, 0.0])
        );
        assert!(Ratio::dimension().is_dimensionless());
        assert!(f64::dimension().is_dimensionless());
        assert!(AngularVelocity::dimension() == Dimension::new([0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0]));
        assert_relative_eq!(Ratio::new::<ratio>(0.5).si_value(), 0.5);
    }

    #[test]
    fn round_trips_through_si() {
        let length = Length::from_si(2.0);
        assert_relative_eq!(length.get::<foot>(), 2.0 / 0.3048);
    }
}
