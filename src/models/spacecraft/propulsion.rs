//! Rocket stages and the burns they perform.

use std::convert::Infallible;

use uom::si::{
    f64::{Mass, Time},
    time::second,
};

use crate::{
    models::gravity,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::{PerformanceModel, PhysicalComponent},
        nomial::Variable,
        taylor::te_exp_minus1,
    },
};

/// A rocket stage with a fixed engine and dry mass.
#[derive(Debug, Clone)]
pub struct RocketStage {
    /// Specific impulse, 300 s.
    pub isp: Variable,
    /// Dry mass.
    pub m_dry: Variable,
}

impl RocketStage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            isp: Variable::fixed("ISP", "specific impulse", Time::new::<second>(300.0)),
            m_dry: Variable::free::<Mass>("m_dry", "dry mass"),
        }
    }
}

impl Default for RocketStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for RocketStage {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
    }
}

impl PhysicalComponent for RocketStage {
    /// The velocity change the burn delivers.
    type State = Variable;
    type Performance = Burn;
    type Error = Infallible;

    fn flight_model(&self, deltav: &Variable) -> Result<Burn, Infallible> {
        Ok(Burn::new(self, deltav))
    }
}

/// The rocket equation `m_prop/m_co = exp(Δv / (g ISP)) - 1`, bounded below by
/// its third order Taylor expansion.
#[derive(Debug, Clone)]
pub struct Burn {
    /// Propellant mass.
    pub m_prop: Variable,
    /// Mass at cutoff.
    pub m_co: Variable,
    isp: Variable,
    deltav: Variable,
}

impl Burn {
    #[must_use]
    pub fn new(stage: &RocketStage, deltav: &Variable) -> Self {
        Self {
            m_prop: Variable::free::<Mass>("m_prop", "propellant mass"),
            m_co: Variable::free::<Mass>("m_co", "mass at cutoff"),
            isp: stage.isp.clone(),
            deltav: deltav.clone(),
        }
    }
}

impl ConstraintModel for Burn {
    fn constraints(&self) -> ConstraintSet {
        let exhaust_ratio = &self.deltav / (gravity() * &self.isp);
        ConstraintSet::from([(&self.m_prop / &self.m_co).geq(te_exp_minus1(exhaust_ratio, 3))])
    }
}

impl PerformanceModel for Burn {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Velocity, mass::kilogram, velocity::meter_per_second};

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn propellant_for_three_kilometers_per_second() {
        let stage = RocketStage::new();
        let deltav = Variable::fixed(
            "deltav",
            "required delta-V",
            Velocity::new::<meter_per_second>(3000.0),
        );
        let burn = stage.flight_model(&deltav).unwrap();

        let set = burn
            .constraints()
            .with_substitution(&burn.m_co, Mass::new::<kilogram>(1000.0));
        let program = Program::new(&burn.m_prop, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let x: f64 = 3000.0 / (9.81 * 300.0);
        assert_relative_eq!(
            solution.quantity::<Mass>(&burn.m_prop).unwrap().get::<kilogram>(),
            1000.0 * (x + x.powi(2) / 2.0 + x.powi(3) / 6.0),
            max_relative = 1e-5
        );
    }
}
