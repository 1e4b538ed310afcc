//! Propellers.
//!
//! [`Propeller`] holds the blade geometry and weight. [`ActuatorProp`] is a
//! GP actuator disk performance model with fixed swirl and viscous losses.
//! [`BladeElementProp`] resolves the blade into elements with a vortex wake
//! and an airfoil polar, which makes it a signomial program.

mod blade_element;

pub use blade_element::{BladeElementPerf, BladeElementProp};

use std::{convert::Infallible, f64::consts::PI};

use uom::si::{
    angular_velocity::revolution_per_minute,
    area::{square_foot, square_meter},
    f64::{AngularVelocity, Area, Force, Length, Power, Torque, Velocity},
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet, Relate},
    modular::{PerformanceModel, PhysicalComponent},
    nomial::Variable,
    units::{InverseArea, SiQuantity},
};

use super::FlightState;

fn max_rotation_rate() -> Variable {
    Variable::fixed(
        "omega_max",
        "max rotation rate",
        AngularVelocity::new::<revolution_per_minute>(10_000.0),
    )
}

fn tip_mach() -> Variable {
    Variable::fixed("M_tip", "max tip mach number", 0.5)
}

/// Propeller geometry and weight.
#[derive(Debug, Clone)]
pub struct Propeller {
    /// Propeller radius.
    pub r: Variable,
    /// Propeller weight.
    pub w: Variable,
    /// Weight scaling factor, 4e-4 1/ft².
    pub k: Variable,
    /// Max static thrust.
    pub t_m: Variable,
    /// Chord of each blade element.
    pub c: Vec<Variable>,
}

impl Propeller {
    /// A propeller resolved into `n` blade elements.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let per_square_foot = 4e-4 / Area::new::<square_foot>(1.0).get::<square_meter>();
        Self {
            r: Variable::free::<Length>("R", "prop radius"),
            w: Variable::free::<Force>("W", "prop weight"),
            k: Variable::fixed(
                "K",
                "prop weight scaling factor",
                InverseArea::from_si(per_square_foot),
            ),
            t_m: Variable::free::<Force>("T_m", "prop max static thrust"),
            c: Variable::vector::<Length>(n, "c", "prop chord"),
        }
    }

    /// Number of blade elements.
    #[must_use]
    pub fn elements(&self) -> usize {
        self.c.len()
    }
}

impl Default for Propeller {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ConstraintModel for Propeller {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([self.w.geq(&self.k * &self.t_m * self.r.pow(2.0))])
    }
}

impl PhysicalComponent for Propeller {
    type State = FlightState;
    type Performance = ActuatorProp;
    type Error = Infallible;

    fn flight_model(&self, state: &FlightState) -> Result<ActuatorProp, Infallible> {
        Ok(ActuatorProp::new(self, state))
    }
}

/// Actuator disk propeller performance.
#[derive(Debug, Clone)]
pub struct ActuatorProp {
    /// Thrust.
    pub t: Variable,
    /// Disk loading coefficient.
    pub tc: Variable,
    /// Swirl and nonuniformity losses, 0.7.
    pub etaadd: Variable,
    /// Viscous losses, 0.85.
    pub etav: Variable,
    /// Inviscid losses.
    pub etai: Variable,
    /// Overall efficiency.
    pub eta: Variable,
    /// `2 - 1/etaadd` at the default swirl losses.
    pub z1: Variable,
    /// `Tc + 1`.
    pub z2: Variable,
    /// Advance ratio.
    pub lam: Variable,
    /// Thrust coefficient.
    pub ct: Variable,
    /// Power coefficient.
    pub cp: Variable,
    /// Torque.
    pub q: Variable,
    /// Rotation rate.
    pub omega: Variable,
    /// Max rotation rate, 10000 rpm.
    pub omega_max: Variable,
    /// Shaft power.
    pub p_shaft: Variable,
    /// Tip mach number limit, 0.5.
    pub m_tip: Variable,
    /// Speed of sound at altitude, 295 m/s.
    pub a: Variable,
    v: Variable,
    rho: Variable,
    r: Variable,
    t_m: Variable,
}

impl ActuatorProp {
    #[must_use]
    pub fn new(prop: &Propeller, state: &FlightState) -> Self {
        let etaadd = 0.7;
        Self {
            t: Variable::free::<Force>("T", "thrust"),
            tc: Variable::dimensionless("Tc", "coefficient of thrust"),
            etaadd: Variable::fixed("etaadd", "swirl and nonuniformity losses", etaadd),
            etav: Variable::fixed("etav", "viscous losses", 0.85),
            etai: Variable::dimensionless("etai", "inviscid losses"),
            eta: Variable::dimensionless("eta", "overall efficiency"),
            z1: Variable::fixed("z1", "efficiency helper 1", 2.0 - 1.0 / etaadd),
            z2: Variable::dimensionless("z2", "efficiency helper 2"),
            lam: Variable::dimensionless("lam", "advance ratio"),
            ct: Variable::dimensionless("CT", "thrust coefficient"),
            cp: Variable::dimensionless("CP", "power coefficient"),
            q: Variable::free::<Torque>("Q", "torque"),
            omega: Variable::free::<AngularVelocity>("omega", "propeller rotation rate"),
            omega_max: max_rotation_rate(),
            p_shaft: Variable::free::<Power>("P_shaft", "shaft power"),
            m_tip: tip_mach(),
            a: Variable::fixed(
                "a",
                "speed of sound at altitude",
                Velocity::new::<meter_per_second>(295.0),
            ),
            v: state.v.clone(),
            rho: state.rho.clone(),
            r: prop.r.clone(),
            t_m: prop.t_m.clone(),
        }
    }
}

impl ConstraintModel for ActuatorProp {
    fn constraints(&self) -> ConstraintSet {
        let (v, rho, r, omega) = (&self.v, &self.rho, &self.r, &self.omega);
        let disk = 0.5 * rho * v.pow(2.0) * PI * r.pow(2.0);
        let tip = omega * r;
        ConstraintSet::from([
            self.eta.leq(&self.etav * &self.etai),
            self.tc.geq(&self.t / disk),
            self.z2.geq(&self.tc + 1.0),
            (&self.etai * (&self.z1 + self.z2.pow(0.5) / &self.etaadd)).leq(2.0),
            self.lam.geq(v / &tip),
            self.ct.geq(&self.tc * self.lam.pow(2.0)),
            self.cp
                .leq(&self.q * omega / (0.5 * rho * tip.pow(3.0) * PI * r.pow(2.0))),
            self.eta.geq(&self.ct * &self.lam / &self.cp),
            omega.leq(&self.omega_max),
            self.p_shaft.equals(&self.q * omega),
            (&self.m_tip * &self.a).pow(2.0).geq(tip.pow(2.0) + v.pow(2.0)),
            self.t_m.geq(&self.t),
        ])
    }
}

impl PerformanceModel for ActuatorProp {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::MassDensity, force::pound_force, mass_density::kilogram_per_cubic_meter,
        torque::newton_meter,
    };

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn actuator_disk_trades_efficiency_against_weight() {
        let prop = Propeller::default();
        let state = FlightState::default();
        let perf = prop.flight_model(&state).unwrap();

        let mut set = prop.constraints();
        set.include_model(&perf)
            .substitute(&state.rho, MassDensity::new::<kilogram_per_cubic_meter>(1.225))
            .substitute(&perf.t, Force::new::<pound_force>(100.0))
            .substitute(
                &perf.omega,
                AngularVelocity::new::<revolution_per_minute>(1000.0),
            );
        assert!(set.is_gp());

        let w_ref = Variable::fixed("Wref", "", Force::new::<pound_force>(100.0));
        let q_ref = Variable::fixed("Qref", "", Torque::new::<newton_meter>(100.0));
        let cost = perf.eta.pow(-1.0) + &prop.w / &w_ref + &perf.q / &q_ref;
        let program = Program::new(cost, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        assert_relative_eq!(solution.cost(), 3.7509, max_relative = 1e-3);
        // The optimum sits on the tip mach limit.
        let tip = solution.value(&perf.omega).unwrap() * solution.value(&prop.r).unwrap();
        assert_relative_eq!(
            tip.powi(2) + 50.0_f64.powi(2),
            (0.5 * 295.0_f64).powi(2),
            max_relative = 1e-4
        );
    }
}
