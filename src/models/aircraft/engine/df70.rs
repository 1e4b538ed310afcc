use std::convert::Infallible;

use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Force, Length, Power},
    force::pound_force,
    length::inch,
    power::horsepower,
};

use crate::{
    models::aircraft::FlightState,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::{PerformanceModel, PhysicalComponent},
        nomial::Variable,
        units::SpecificFuelConsumption,
    },
};

use super::{bsfc_min, ShaftPower};

/// The 3W DF70 two-stroke engine.
#[derive(Debug, Clone)]
pub struct Df70 {
    /// Installed engine weight.
    pub w: Variable,
    /// Weight margin factor, 1.
    pub mfac: Variable,
    /// Minimum BSFC, 0.3162 kg/kW/hr.
    pub bsfc_min: Variable,
    /// Installed DF70 weight, 7.76 lbf.
    pub w_df70: Variable,
    /// Max shaft power at sea level, 5.17 hp.
    pub p_sl_max: Variable,
    /// Engine height, 12 in.
    pub h: Variable,
}

impl Df70 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            w: Variable::free::<Force>("W", "installed engine weight"),
            mfac: Variable::fixed("mfac", "engine weight margin factor", 1.0),
            bsfc_min: bsfc_min(),
            w_df70: Variable::fixed(
                "W_DF70",
                "installed DF70 engine weight",
                Force::new::<pound_force>(7.76),
            ),
            p_sl_max: Variable::fixed(
                "P_sl_max",
                "max shaft power at sea level",
                Power::new::<horsepower>(5.17),
            ),
            h: Variable::fixed("h", "engine height", Length::new::<inch>(12.0)),
        }
    }
}

impl Default for Df70 {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for Df70 {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([(&self.w / &self.mfac).geq(&self.w_df70)])
    }
}

impl PhysicalComponent for Df70 {
    type State = FlightState;
    type Performance = Df70Perf;
    type Error = Infallible;

    fn flight_model(&self, state: &FlightState) -> Result<Df70Perf, Infallible> {
        Ok(Df70Perf::new(self, state))
    }
}

/// Fuel consumption of the [`Df70`] as a function of engine speed.
#[derive(Debug, Clone)]
pub struct Df70Perf {
    /// Shaft power.
    pub p_shaft: Variable,
    /// Brake specific fuel consumption.
    pub bsfc: Variable,
    /// Total power, avionics included.
    pub p_total: Variable,
    /// Max shaft power at altitude.
    pub p_shaft_max: Variable,
    /// Shaft power lapse at the state altitude.
    pub l_eng: Variable,
    /// BSFC margin factor, 1.
    pub mfac: Variable,
    /// Engine speed.
    pub rpm: Variable,
    /// Max engine speed, 7698 rpm.
    pub rpm_max: Variable,
    shaft: ShaftPower,
    bsfc_min: Variable,
}

impl Df70Perf {
    #[must_use]
    pub fn new(engine: &Df70, state: &FlightState) -> Self {
        let shaft = ShaftPower::new(&engine.p_sl_max, state);
        Self {
            p_shaft: shaft.p_shaft.clone(),
            bsfc: Variable::free::<SpecificFuelConsumption>(
                "BSFC",
                "brake specific fuel consumption",
            ),
            p_total: shaft.p_total.clone(),
            p_shaft_max: shaft.p_shaft_max.clone(),
            l_eng: shaft.l_eng.clone(),
            mfac: Variable::fixed("mfac", "BSFC margin factor", 1.0),
            rpm: Variable::free::<AngularVelocity>("RPM", "engine operating speed"),
            rpm_max: Variable::fixed(
                "RPM_max",
                "maximum engine speed",
                AngularVelocity::new::<revolution_per_minute>(7698.0),
            ),
            shaft,
            bsfc_min: engine.bsfc_min.clone(),
        }
    }
}

impl ConstraintModel for Df70Perf {
    fn constraints(&self) -> ConstraintSet {
        let speed = &self.rpm / &self.rpm_max;
        let bsfc = &self.bsfc / &self.mfac / &self.bsfc_min;
        let mut set = ConstraintSet::from([
            bsfc.pow(36.2209)
                .geq(2.31541 * speed.pow(8.06517) + 0.001_033_64 * speed.pow(-38.8545)),
            (&self.p_total / &self.p_shaft_max)
                .pow(0.1)
                .equals(0.999_495 * speed.pow(0.294_421)),
            self.rpm.leq(&self.rpm_max),
        ]);
        set.include(self.shaft.constraints());
        set
    }
}

impl PerformanceModel for Df70Perf {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn speed_and_consumption_follow_the_throttle() {
        let engine = Df70::new();
        let perf = engine.flight_model(&FlightState::default()).unwrap();
        let set = perf
            .constraints()
            .with_substitution(&perf.p_shaft, Power::new::<horsepower>(2.0));
        assert!(set.is_gp());

        let program = Program::new(&perf.bsfc * &perf.p_total, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();
        let value = |v: &Variable| solution.value(v).unwrap();

        let throttle = value(&perf.p_total) / value(&perf.p_shaft_max);
        let speed = value(&perf.rpm) / value(&perf.rpm_max);
        assert!(speed <= 1.0 + 1e-6);
        assert_relative_eq!(
            throttle.powf(0.1),
            0.999_495 * speed.powf(0.294_421),
            max_relative = 1e-5
        );
        assert_relative_eq!(
            value(&perf.p_shaft_max),
            Power::new::<horsepower>(5.17).get::<uom::si::power::watt>(),
            max_relative = 1e-6
        );
        assert!(value(&perf.bsfc) >= value(&engine.bsfc_min) * (1.0 - 1e-6));
    }
}
