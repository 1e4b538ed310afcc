use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, Length, MassDensity, Pressure, Velocity},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet, Relate},
    nomial::Variable,
};

/// The values a [`FlightState`] is declared with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightCondition {
    pub airspeed: Velocity,
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    /// Used by engine models to derate shaft power at construction.
    pub altitude: Length,
}

impl Default for FlightCondition {
    fn default() -> Self {
        Self {
            airspeed: Velocity::new::<meter_per_second>(50.0),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.255),
            viscosity: DynamicViscosity::new::<pascal_second>(1.5e-5),
            altitude: Length::new::<meter>(0.0),
        }
    }
}

/// Freestream conditions for one flight segment.
#[derive(Debug, Clone)]
pub struct FlightState {
    /// Airspeed.
    pub v: Variable,
    /// Air density.
    pub rho: Variable,
    /// Air viscosity.
    pub mu: Variable,
    /// Never exceed dynamic pressure, `1.2 ρ V²`.
    pub qne: Variable,
    altitude: Length,
}

impl FlightState {
    #[must_use]
    pub fn new(condition: FlightCondition) -> Self {
        Self {
            v: Variable::fixed("V", "airspeed", condition.airspeed),
            rho: Variable::fixed("rho", "air density", condition.density),
            mu: Variable::fixed("mu", "air viscosity", condition.viscosity),
            qne: Variable::free::<Pressure>("qne", "never exceed dynamic pressure"),
            altitude: condition.altitude,
        }
    }

    /// One state per condition, e.g. one per flight segment.
    #[must_use]
    pub fn segments(conditions: &[FlightCondition]) -> Vec<Self> {
        conditions.iter().copied().map(Self::new).collect()
    }

    #[must_use]
    pub fn altitude(&self) -> Length {
        self.altitude
    }
}

impl Default for FlightState {
    fn default() -> Self {
        Self::new(FlightCondition::default())
    }
}

impl ConstraintModel for FlightState {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([self.qne.equals(1.2 * self.v.pow(2.0) * &self.rho)])
    }
}
