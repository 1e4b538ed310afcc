use std::{convert::Infallible, f64::consts::PI};

use uom::si::f64::{Area, Force, Length, Volume};

use crate::{
    models::{aircraft::FlightState, gravity, materials::CfrpFabric},
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::{PerformanceModel, PhysicalComponent},
        nomial::Variable,
    },
};

/// Knud Thomsen's exponent for the surface area of an ellipsoid.
const THOMSEN_P: f64 = 1.6075;

/// Prolate ellipsoid fuselage with a carbon fabric skin.
#[derive(Debug, Clone)]
pub struct EllipticalFuselage {
    /// Fuselage radius.
    pub r: Variable,
    /// Fuselage length.
    pub l: Variable,
    /// Wetted area.
    pub s: Variable,
    /// Fuselage weight.
    pub w: Variable,
    /// Weight margin factor, 2.
    pub mfac: Variable,
    /// Fineness ratio of length to diameter.
    pub f: Variable,
    /// Form factor.
    pub k: Variable,
    /// Fuselage volume.
    pub vol: Variable,
    /// Skin thickness.
    pub t: Variable,
    /// Number of plies, 2.
    pub nply: Variable,
    pub material: CfrpFabric,
}

impl EllipticalFuselage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            r: Variable::free::<Length>("R", "fuselage radius"),
            l: Variable::free::<Length>("l", "fuselage length"),
            s: Variable::free::<Area>("S", "wetted fuselage area"),
            w: Variable::free::<Force>("W", "fuselage weight"),
            mfac: Variable::fixed("mfac", "fuselage weight margin factor", 2.0),
            f: Variable::dimensionless("f", "fineness ratio of length to diameter"),
            k: Variable::dimensionless("k", "fuselage form factor"),
            vol: Variable::free::<Volume>("Vol", "fuselage volume"),
            t: Variable::free::<Length>("t", "fuselage skin thickness"),
            nply: Variable::fixed("nply", "number of plys", 2.0),
            material: CfrpFabric::new(),
        }
    }
}

impl Default for EllipticalFuselage {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for EllipticalFuselage {
    fn constraints(&self) -> ConstraintSet {
        let (r, l) = (&self.r, &self.l);
        let mut set = ConstraintSet::from([
            self.f.equals(l / r / 2.0),
            self.k
                .geq(1.0 + 60.0 / self.f.pow(3.0) + &self.f / 400.0),
            (3.0 * (&self.s / PI).pow(THOMSEN_P)).geq(
                2.0 * (2.0 * l * r).pow(THOMSEN_P) + (2.0 * r).pow(2.0 * THOMSEN_P),
            ),
            self.vol.leq(4.0 * PI / 3.0 * (l / 2.0) * r.pow(2.0)),
            (&self.w / &self.mfac)
                .geq(&self.s * &self.material.rho * &self.t * gravity()),
            self.t.geq(&self.nply * &self.material.tmin),
        ]);
        set.include_model(&self.material);
        set
    }
}

impl PhysicalComponent for EllipticalFuselage {
    type State = FlightState;
    type Performance = EllipticalFuselageAero;
    type Error = Infallible;

    fn flight_model(&self, state: &FlightState) -> Result<EllipticalFuselageAero, Infallible> {
        Ok(EllipticalFuselageAero::new(self, state))
    }
}

/// Skin friction drag scaled by the form factor.
#[derive(Debug, Clone)]
pub struct EllipticalFuselageAero {
    /// Skin friction coefficient.
    pub cf: Variable,
    /// Reynolds number.
    pub re: Variable,
    /// Drag coefficient.
    pub cd: Variable,
    /// Drag margin, 1.
    pub mfac: Variable,
    state: (Variable, Variable, Variable),
    l: Variable,
    k: Variable,
}

impl EllipticalFuselageAero {
    #[must_use]
    pub fn new(fuselage: &EllipticalFuselage, state: &FlightState) -> Self {
        Self {
            cf: Variable::dimensionless("Cf", "fuselage skin friction coefficient"),
            re: Variable::dimensionless("Re", "fuselage reynolds number"),
            cd: Variable::dimensionless("Cd", "fuselage drag coefficient"),
            mfac: Variable::fixed("mfac", "fuselage drag margin", 1.0),
            state: (state.rho.clone(), state.v.clone(), state.mu.clone()),
            l: fuselage.l.clone(),
            k: fuselage.k.clone(),
        }
    }
}

impl ConstraintModel for EllipticalFuselageAero {
    fn constraints(&self) -> ConstraintSet {
        let (rho, v, mu) = &self.state;
        ConstraintSet::from([
            self.re.equals(v * rho * &self.l / mu),
            self.cf.geq(0.455 * self.re.pow(-0.3)),
            (&self.cd / &self.mfac).geq(&self.cf * &self.k),
        ])
    }
}

impl PerformanceModel for EllipticalFuselageAero {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::meter;

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn sphere_area_is_recovered() {
        // With l = 2R the ellipsoid is a sphere of area 4πR².
        let fuselage = EllipticalFuselage::new();
        let area = fuselage.constraints().iter().nth(2).cloned().unwrap();
        let set = ConstraintSet::from([area])
            .with_substitution(&fuselage.r, Length::new::<meter>(0.5))
            .with_substitution(&fuselage.l, Length::new::<meter>(1.0));
        let program = Program::new(&fuselage.s, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        assert_relative_eq!(
            solution.value(&fuselage.s).unwrap(),
            4.0 * PI * 0.25,
            max_relative = 1e-5
        );
    }

    #[test]
    fn drag_scales_skin_friction_by_the_form_factor() {
        let fuselage = EllipticalFuselage::new();
        assert!(fuselage.constraints().is_gp());

        let aero = fuselage.flight_model(&FlightState::default()).unwrap();
        let set = aero
            .constraints()
            .with_substitution(&fuselage.l, Length::new::<meter>(2.0))
            .with_substitution(&fuselage.k, 1.2);
        let program = Program::new(&aero.cd, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let re: f64 = 50.0 * 1.255 * 2.0 / 1.5e-5;
        assert_relative_eq!(
            solution.value(&aero.cd).unwrap(),
            1.2 * 0.455 * re.powf(-0.3),
            max_relative = 1e-5
        );
    }
}
