use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P2, P4, Z0},
};

/// Force per unit length (distributed load), N/m in SI.
pub type ForcePerLength = Quantity<ISQ<Z0, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Weight per unit volume, N/m³ in SI.
pub type SpecificWeight = Quantity<ISQ<N2, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Area mass density, kg/m² in SI.
pub type ArealDensity = Quantity<ISQ<N2, P1, Z0, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Second moment of area, m⁴ in SI.
pub type SecondMomentOfArea = Quantity<ISQ<P4, Z0, Z0, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Reciprocal length, 1/m in SI.
pub type InverseLength = Quantity<ISQ<N1, Z0, Z0, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Reciprocal area, 1/m² in SI.
pub type InverseArea = Quantity<ISQ<N2, Z0, Z0, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Circulation (velocity times length), m²/s in SI.
pub type Circulation = Quantity<ISQ<P2, Z0, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Mass per unit torque, kg/(N·m) in SI.
pub type SpecificTorque = Quantity<ISQ<N2, Z0, P2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Fuel mass per unit shaft energy (BSFC), kg/J in SI.
pub type SpecificFuelConsumption = Quantity<ISQ<N2, Z0, P2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Motor speed per unit voltage, rad/(s·V) in SI.
pub type VoltageConstant = Quantity<ISQ<N2, N1, P2, P1, Z0, Z0, Z0>, SI<f64>, f64>;

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::units::SiQuantity;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{ElectricPotential, Force, Frequency, Length, Mass, Torque},
        force::newton,
        length::meter,
    };

    #[test]
    fn aliases_match_products_of_named_quantities() {
        let per_length: ForcePerLength = Force::new::<newton>(10.0) / Length::new::<meter>(2.0);
        assert_relative_eq!(per_length.si_value(), 5.0);

        assert!(
            SpecificTorque::dimension().approx_eq(&(Mass::dimension() / Torque::dimension()))
        );
        assert!(
            VoltageConstant::dimension()
                .approx_eq(&(Frequency::dimension() / ElectricPotential::dimension()))
        );
        assert!(InverseArea::dimension().approx_eq(&(InverseLength::dimension().powf(2.0))));
    }
}
