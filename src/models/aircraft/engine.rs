//! Two-stroke gasoline engines.
//!
//! [`Engine`] is a generic engine sized by a power-law weight fit. [`Df70`]
//! is a fixed engine with a closed-form fuel consumption curve. Both derate
//! shaft power with altitude by `1 - 0.035 h / 1000 ft`.

mod df70;

pub use df70::{Df70, Df70Perf};

use uom::si::{
    energy::kilowatt_hour,
    f64::{Energy, Force, Length, Mass, Power},
    force::pound_force,
    length::foot,
    mass::kilogram,
    power::{horsepower, watt},
};

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet, Relate},
    fit::{FitConstraintSet, FitError, FitInput, FitRecord},
    modular::{PerformanceModel, PhysicalComponent},
    nomial::Variable,
    units::SpecificFuelConsumption,
};

use super::FlightState;

const POWER_LAW_FIT: &str = include_str!("engine/power_lawfit.csv");
const POWER_BSFC_FIT: &str = include_str!("engine/power_bsfc_fit.csv");

/// Fraction of sea level shaft power available at `altitude`.
fn lapse(altitude: Length) -> f64 {
    1.0 - 0.035 * altitude.get::<foot>() / 1000.0
}

fn bsfc_min() -> Variable {
    let value: SpecificFuelConsumption =
        Mass::new::<kilogram>(0.3162) / Energy::new::<kilowatt_hour>(1.0);
    Variable::fixed("BSFC_min", "minimum BSFC", value)
}

/// The shaft power relations shared by every engine.
#[derive(Debug, Clone)]
struct ShaftPower {
    p_shaft: Variable,
    p_avn: Variable,
    p_total: Variable,
    eta_alternator: Variable,
    l_eng: Variable,
    p_shaft_max: Variable,
    p_sl_max: Variable,
}

impl ShaftPower {
    fn new(p_sl_max: &Variable, state: &FlightState) -> Self {
        Self {
            p_shaft: Variable::free::<Power>("P_shaft", "shaft power"),
            p_avn: Variable::fixed("P_avn", "avionics power", Power::new::<watt>(40.0)),
            p_total: Variable::free::<Power>("P_total", "total power, avionics included"),
            eta_alternator: Variable::fixed("eta_alternator", "alternator efficiency", 0.8),
            l_eng: Variable::fixed("L_eng", "shaft power loss factor", lapse(state.altitude())),
            p_shaft_max: Variable::free::<Power>("P_shaft_max", "max shaft power at altitude"),
            p_sl_max: p_sl_max.clone(),
        }
    }

    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([
            (&self.p_shaft_max / &self.p_sl_max).equals(&self.l_eng),
            self.p_shaft_max.geq(&self.p_total),
            self.p_total.geq(&self.p_shaft + &self.p_avn / &self.eta_alternator),
        ])
    }
}

/// Engine whose weight follows a power law in sea level power.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Installed engine weight.
    pub w: Variable,
    /// Weight margin factor, 1.
    pub mfac: Variable,
    /// Minimum BSFC, 0.3162 kg/kW/hr.
    pub bsfc_min: Variable,
    /// Reference shaft power, 10 hp.
    pub p_ref: Variable,
    /// Reference engine weight, 10 lbf.
    pub w_engref: Variable,
    /// Uninstalled engine weight.
    pub w_eng: Variable,
    /// Max shaft power at sea level.
    pub p_sl_max: Variable,
    w_scale: Variable,
    weight_fit: FitConstraintSet,
}

impl Engine {
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled weight fit fails to load.
    pub fn new() -> Result<Self, FitError> {
        let p_ref = Variable::fixed(
            "P_ref",
            "reference shaft power",
            Power::new::<horsepower>(10.0),
        );
        let w_engref = Variable::fixed(
            "W_engref",
            "reference engine weight",
            Force::new::<pound_force>(10.0),
        );
        let w_eng = Variable::free::<Force>("W_eng", "engine weight");
        let p_sl_max = Variable::free::<Power>("P_sl_max", "max shaft power at sea level");

        let record = FitRecord::from_csv(POWER_LAW_FIT, 0)?;
        let weight_fit = FitConstraintSet::new(
            &record,
            &w_eng / &w_engref,
            [FitInput::from(&p_sl_max / &p_ref)],
        )?;

        Ok(Self {
            w: Variable::free::<Force>("W", "installed engine weight"),
            mfac: Variable::fixed("mfac", "engine weight margin factor", 1.0),
            bsfc_min: bsfc_min(),
            p_ref,
            w_engref,
            w_eng,
            p_sl_max,
            w_scale: Variable::fixed("W_scale", "", Force::new::<pound_force>(1.0)),
            weight_fit,
        })
    }
}

impl ConstraintModel for Engine {
    fn constraints(&self) -> ConstraintSet {
        let mut set = self.weight_fit.constraints();
        set.push(
            (&self.w / &self.mfac)
                .geq(2.572 * self.w_eng.pow(0.922) * self.w_scale.pow(0.078)),
        );
        set
    }
}

impl PhysicalComponent for Engine {
    type State = FlightState;
    type Performance = EnginePerf;
    type Error = FitError;

    fn flight_model(&self, state: &FlightState) -> Result<EnginePerf, FitError> {
        EnginePerf::new(self, state)
    }
}

/// Fuel consumption of an [`Engine`] at part throttle.
#[derive(Debug, Clone)]
pub struct EnginePerf {
    /// Shaft power.
    pub p_shaft: Variable,
    /// Brake specific fuel consumption.
    pub bsfc: Variable,
    /// Avionics power, 40 W.
    pub p_avn: Variable,
    /// Total power, avionics included.
    pub p_total: Variable,
    /// Alternator efficiency, 0.8.
    pub eta_alternator: Variable,
    /// Shaft power lapse at the state altitude.
    pub l_eng: Variable,
    /// Max shaft power at altitude.
    pub p_shaft_max: Variable,
    /// BSFC margin factor, 1.
    pub mfac: Variable,
    shaft: ShaftPower,
    bsfc_fit: FitConstraintSet,
}

impl EnginePerf {
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled BSFC fit fails to load.
    pub fn new(engine: &Engine, state: &FlightState) -> Result<Self, FitError> {
        let shaft = ShaftPower::new(&engine.p_sl_max, state);
        let bsfc =
            Variable::free::<SpecificFuelConsumption>("BSFC", "brake specific fuel consumption");
        let mfac = Variable::fixed("mfac", "BSFC margin factor", 1.0);

        let record = FitRecord::from_csv(POWER_BSFC_FIT, 0)?;
        let bsfc_fit = FitConstraintSet::new(
            &record,
            &bsfc / &mfac / &engine.bsfc_min,
            [FitInput::from(&shaft.p_total / &shaft.p_shaft_max)],
        )?;

        Ok(Self {
            p_shaft: shaft.p_shaft.clone(),
            bsfc,
            p_avn: shaft.p_avn.clone(),
            p_total: shaft.p_total.clone(),
            eta_alternator: shaft.eta_alternator.clone(),
            l_eng: shaft.l_eng.clone(),
            p_shaft_max: shaft.p_shaft_max.clone(),
            mfac,
            shaft,
            bsfc_fit,
        })
    }
}

impl ConstraintModel for EnginePerf {
    fn constraints(&self) -> ConstraintSet {
        let mut set = self.bsfc_fit.constraints();
        set.include(self.shaft.constraints());
        set
    }
}

impl PerformanceModel for EnginePerf {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::aircraft::FlightCondition,
        support::{
            program::Program,
            solve::{GpSolver, Solver},
        },
    };

    #[test]
    fn weight_follows_the_power_law() {
        let engine = Engine::new().unwrap();
        let set = engine
            .constraints()
            .with_substitution(&engine.p_sl_max, Power::new::<horsepower>(10.0));
        let program = Program::new(&engine.w, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let w_eng: f64 = 11.93;
        assert_relative_eq!(
            solution.quantity::<Force>(&engine.w_eng).unwrap().get::<pound_force>(),
            w_eng,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            solution.quantity::<Force>(&engine.w).unwrap().get::<pound_force>(),
            2.572 * w_eng.powf(0.922),
            max_relative = 1e-5
        );
    }

    #[test]
    fn power_lapses_with_altitude() {
        assert_relative_eq!(lapse(Length::new::<foot>(0.0)), 1.0);
        assert_relative_eq!(lapse(Length::new::<foot>(10_000.0)), 0.65, epsilon = 1e-12);

        let engine = Engine::new().unwrap();
        let state = FlightState::new(FlightCondition {
            altitude: Length::new::<foot>(5000.0),
            ..FlightCondition::default()
        });
        let perf = engine.flight_model(&state).unwrap();
        assert_relative_eq!(perf.l_eng.value().unwrap(), 0.825, epsilon = 1e-12);
    }

    #[test]
    fn part_throttle_raises_fuel_consumption() {
        let engine = Engine::new().unwrap();
        let perf = engine.flight_model(&FlightState::default()).unwrap();

        let set = perf
            .constraints()
            .with_substitution(&engine.p_sl_max, Power::new::<horsepower>(5.0))
            .with_substitution(&perf.p_shaft, Power::new::<horsepower>(2.0));
        let program = Program::new(&perf.bsfc * &perf.p_total, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let hp = Power::new::<horsepower>(1.0).get::<watt>();
        let throttle: f64 = (2.0 * hp + 50.0) / (5.0 * hp);
        let ratio = (0.5 * throttle.powi(-3) + 0.5 * throttle.powi(2)).powf(0.1);
        let bsfc = solution.value(&perf.bsfc).unwrap() / engine.bsfc_min.value().unwrap();
        assert_relative_eq!(bsfc, ratio, max_relative = 1e-4);
        assert_relative_eq!(
            solution.value(&perf.p_total).unwrap(),
            throttle * 5.0 * hp,
            max_relative = 1e-5
        );
    }
}
