//! Fuselage models.
//!
//! [`Fuselage`] is a cylindrical body with a nose and a tail bulk, holding a
//! fuel tank inside a Kevlar skin. [`EllipticalFuselage`] is a lighter
//! ellipsoid of carbon fabric.

mod elliptical;
mod fuel_tank;
mod skin;

pub use elliptical::{EllipticalFuselage, EllipticalFuselageAero};
pub use fuel_tank::FuelTank;
pub use skin::{FuselageLanding, FuselageSkin, FuselageSkinLoading};

use std::{convert::Infallible, f64::consts::PI};

use uom::si::f64::{Area, Force, Length, Volume};

use crate::support::{
    constraint::{Constraint, ConstraintModel, ConstraintSet, Relate},
    modular::{PerformanceModel, PhysicalComponent},
    nomial::{Posynomial, Variable},
};

use super::FlightState;

/// Cylindrical fuselage carrying the fuel.
#[derive(Debug, Clone)]
pub struct Fuselage {
    /// Fuselage radius.
    pub r: Variable,
    /// Fuselage length.
    pub l: Variable,
    /// Cross sectional area.
    pub s: Variable,
    /// Fuselage weight.
    pub w: Variable,
    /// Weight margin factor, 2.1.
    pub mfac: Variable,
    /// Center body length.
    pub l_body: Variable,
    /// Body length to radius ratio.
    pub k_body: Variable,
    /// Nose length to radius ratio.
    pub k_nose: Variable,
    /// Bulk length to radius ratio.
    pub k_bulk: Variable,
    /// Wetted area.
    pub s_wet: Variable,
    /// Wetted area of the body.
    pub s_body: Variable,
    /// Wetted area of the nose.
    pub s_nose: Variable,
    /// Wetted area of the bulk.
    pub s_bulk: Variable,
    /// Volume of the body.
    pub vol_body: Variable,
    pub fuel_tank: FuelTank,
    pub skin: FuselageSkin,
}

impl Fuselage {
    /// A fuselage holding `w_fuel` of fuel.
    #[must_use]
    pub fn new(w_fuel: &Variable) -> Self {
        let r = Variable::free::<Length>("R", "fuselage radius");
        let l_body = Variable::free::<Length>("l_body", "center body length");
        let s_wet = Variable::free::<Area>("S_wet", "fuselage wetted area");
        let skin = FuselageSkin::new(&s_wet, &r, &l_body);
        Self {
            l: Variable::free::<Length>("l", "fuselage length"),
            s: Variable::free::<Area>("S", "fuselage cross sectional area"),
            w: Variable::free::<Force>("W", "fuselage weight"),
            mfac: Variable::fixed("mfac", "fuselage weight margin factor", 2.1),
            k_body: Variable::dimensionless("k_body", "body length to radius ratio"),
            k_nose: Variable::dimensionless("k_nose", "nose length to radius ratio"),
            k_bulk: Variable::dimensionless("k_bulk", "bulk length to radius ratio"),
            s_body: Variable::free::<Area>("S_body", "wetted surface area of body"),
            s_nose: Variable::free::<Area>("S_nose", "wetted surface area of nose"),
            s_bulk: Variable::free::<Area>("S_bulk", "wetted surface area of bulk"),
            vol_body: Variable::free::<Volume>("Vol_body", "volume of body"),
            fuel_tank: FuelTank::new(w_fuel),
            skin,
            r,
            l_body,
            s_wet,
        }
    }

    /// Structural load cases for a center weight `w_cent`.
    #[must_use]
    pub fn loading(&self, w_cent: &Variable) -> FuselageLoading {
        FuselageLoading::new(self, w_cent)
    }
}

impl ConstraintModel for Fuselage {
    fn constraints(&self) -> ConstraintSet {
        let r = &self.r;
        let third = 1.0 / 3.0;
        let nose_shape = 1.0 / 3.0 + 2.0 / 3.0 * self.k_nose.pow(1.6);
        let bulk_shape =
            0.012_322 * self.k_bulk.pow(2.0) + 1.524_925 * &self.k_bulk + 0.502_498;

        let mut set = ConstraintSet::from([
            self.k_body.equals(&self.l_body / r),
            self.s_wet.geq(&self.s_body + &self.s_nose + &self.s_bulk),
            self.s_body.geq(2.0 * PI * r * &self.l_body),
            self.s_nose
                .pow(1.6)
                .geq((2.0 * PI).powf(1.6) * r.pow(3.2) * nose_shape),
            self.s_bulk.geq(r.pow(2.0) * bulk_shape),
            self.vol_body.leq(PI * r.pow(2.0) * &self.l_body),
            self.l.leq(
                3.0 * r
                    * self.k_body.pow(third)
                    * self.k_nose.pow(third)
                    * self.k_bulk.pow(third),
            ),
            self.s.geq(PI * r.pow(2.0)),
            self.vol_body.geq(&self.fuel_tank.vol),
            (&self.w / &self.mfac).geq(&self.fuel_tank.w + &self.skin.w),
        ]);
        set.include_model(&self.fuel_tank).include_model(&self.skin);
        set
    }
}

impl PhysicalComponent for Fuselage {
    type State = FlightState;
    type Performance = FuselageAero;
    type Error = Infallible;

    fn flight_model(&self, state: &FlightState) -> Result<FuselageAero, Infallible> {
        Ok(FuselageAero::new(self, state))
    }
}

/// Skin bending and landing load cases.
#[derive(Debug, Clone)]
pub struct FuselageLoading {
    pub bending: FuselageSkinLoading,
    pub landing: FuselageLanding,
}

impl FuselageLoading {
    #[must_use]
    pub fn new(fuselage: &Fuselage, w_cent: &Variable) -> Self {
        Self {
            bending: FuselageSkinLoading::new(&fuselage.skin, w_cent),
            landing: FuselageLanding::new(&fuselage.skin, w_cent),
        }
    }
}

impl ConstraintModel for FuselageLoading {
    fn constraints(&self) -> ConstraintSet {
        let mut set = self.bending.constraints();
        set.include_model(&self.landing);
        set
    }
}

impl PerformanceModel for FuselageLoading {}

/// Fuselage drag from skin friction and a form factor fit over the body
/// length ratios.
#[derive(Debug, Clone)]
pub struct FuselageAero {
    /// Skin friction coefficient.
    pub cf: Variable,
    /// Reynolds number.
    pub re: Variable,
    /// Reference Reynolds number, 1e6.
    pub re_ref: Variable,
    /// Skin friction coefficient at the reference Reynolds number.
    pub cf_ref: Variable,
    /// Drag coefficient.
    pub cd: Variable,
    state: (Variable, Variable, Variable),
    l: Variable,
    k: [Variable; 3],
}

impl FuselageAero {
    #[must_use]
    pub fn new(fuselage: &Fuselage, state: &FlightState) -> Self {
        Self {
            cf: Variable::dimensionless("Cf", "fuselage skin friction coefficient"),
            re: Variable::dimensionless("Re", "fuselage reynolds number"),
            re_ref: Variable::fixed("Re_ref", "reference Reynolds number", 1e6),
            cf_ref: Variable::dimensionless("Cf_ref", "reference skin friction coefficient"),
            cd: Variable::dimensionless("Cd", "fuselage drag coefficient"),
            state: (state.rho.clone(), state.v.clone(), state.mu.clone()),
            l: fuselage.l.clone(),
            k: [
                fuselage.k_body.clone(),
                fuselage.k_nose.clone(),
                fuselage.k_bulk.clone(),
            ],
        }
    }
}

impl ConstraintModel for FuselageAero {
    fn constraints(&self) -> ConstraintSet {
        let (rho, v, mu) = &self.state;
        let [body, nose, bulk] = &self.k;
        let form: Posynomial = [
            (0.002_430_49, [0.033_607, 1.216_82, 0.306_251]),
            (0.002_550_95, [-0.031_688_7, -0.585_489, 1.153_94]),
            (0.043_601_1, [0.054_572_2, 0.258_228, -1.426_64]),
            (0.009_704_79, [0.8661, -0.209_136, -0.156_166]),
        ]
        .into_iter()
        .map(|(c, [eb, en, ek])| c * body.pow(eb) * nose.pow(en) * bulk.pow(ek))
        .sum();

        ConstraintSet::from([
            self.re.equals(v * rho * &self.l / mu),
            self.cf.geq(0.455 * self.re.pow(-0.3)),
            self.cf_ref.equals(0.455 * self.re_ref.pow(-0.3)),
            Constraint::leq(&self.cf / &self.cf_ref * form, self.cd.pow(0.996_232)),
        ])
    }
}

impl PerformanceModel for FuselageAero {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::force::pound_force;

    use crate::support::{
        constraint::ConstraintKind,
        modular::flight_models,
        program::Program,
        solve::{GpSolver, Solver},
    };

    fn fuselage() -> Fuselage {
        let w_fuel = Variable::fixed("Wfuel", "fuel weight", Force::new::<pound_force>(10.0));
        Fuselage::new(&w_fuel)
    }

    #[test]
    fn fuselage_is_a_geometric_program() {
        let fuselage = fuselage();
        let set = fuselage.constraints();

        assert!(set.is_gp());
        assert_eq!(set.len(), 10 + 2 + 5);
        assert_eq!(set.count(ConstraintKind::MonomialEquality), 1);
    }

    #[test]
    fn loading_covers_bending_and_landing() {
        let fuselage = fuselage();
        let w_cent = Variable::free::<Force>("Wcent", "center weight");
        assert_eq!(fuselage.loading(&w_cent).constraints().len(), 4 + 5);
    }

    #[test]
    fn reference_friction_follows_the_reference_reynolds_number() {
        let fuselage = fuselage();
        let states = [FlightState::default(), FlightState::default()];
        let aero = flight_models(&fuselage, &states).unwrap();

        assert_eq!(aero.len(), 2);
        let set = aero[0].constraints();
        assert!(set.is_gp());
        assert_eq!(set.count(ConstraintKind::MonomialEquality), 2);

        let reference = set.iter().nth(2).cloned().unwrap();
        let program = Program::new(&aero[0].cf_ref, ConstraintSet::from([reference])).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();
        assert_relative_eq!(
            solution.value(&aero[0].cf_ref).unwrap(),
            0.455 / 1e6_f64.powf(0.3),
            max_relative = 1e-6
        );
    }
}
