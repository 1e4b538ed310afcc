//! Brushless DC electric motor.
//!
//! The motor is modeled by its voltage constant, internal resistance and
//! no-load current: `i = Q·Kv + i0` and `v = ω/Kv + i·R`.

use std::convert::Infallible;

use uom::si::{
    angular_velocity::{radian_per_second, revolution_per_minute},
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    f64::{
        AngularVelocity, ElectricCurrent, ElectricPotential, ElectricalResistance, Force, Power,
        Torque,
    },
};

use crate::{
    models::gravity,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::{PerformanceModel, PhysicalComponent},
        nomial::Variable,
        units::{SiQuantity, SpecificTorque, VoltageConstant},
    },
};

use super::FlightState;

fn rpm_per_volt(value: f64) -> VoltageConstant {
    VoltageConstant::from_si(
        AngularVelocity::new::<revolution_per_minute>(value).get::<radian_per_second>(),
    )
}

/// Motor size and electrical constants.
#[derive(Debug, Clone)]
pub struct Motor {
    /// Motor specific torque, 0.8 kg/(N·m).
    pub qstar: Variable,
    /// Motor weight.
    pub w: Variable,
    /// Max torque.
    pub qmax: Variable,
    /// Max voltage, 300 V.
    pub v_max: Variable,
    /// Min voltage constant, 1 rpm/V.
    pub kv_min: Variable,
    /// Max voltage constant, 1000 rpm/V.
    pub kv_max: Variable,
    /// Voltage constant.
    pub kv: Variable,
    /// No-load current, 4.5 A.
    pub i0: Variable,
    /// Internal resistance, 0.033 Ω.
    pub r: Variable,
}

impl Motor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            qstar: Variable::fixed(
                "Qstar",
                "motor specific torque",
                SpecificTorque::from_si(0.8),
            ),
            w: Variable::free::<Force>("W", "motor weight"),
            qmax: Variable::free::<Torque>("Qmax", "motor max. torque"),
            v_max: Variable::fixed(
                "V_max",
                "motor max voltage",
                ElectricPotential::new::<volt>(300.0),
            ),
            kv_min: Variable::fixed("Kv_min", "min motor voltage constant", rpm_per_volt(1.0)),
            kv_max: Variable::fixed("Kv_max", "max motor voltage constant", rpm_per_volt(1000.0)),
            kv: Variable::free::<VoltageConstant>("Kv", "motor voltage constant"),
            i0: Variable::fixed(
                "i0",
                "zero-load current",
                ElectricCurrent::new::<ampere>(4.5),
            ),
            r: Variable::fixed(
                "R",
                "internal resistance",
                ElectricalResistance::new::<ohm>(0.033),
            ),
        }
    }
}

impl Default for Motor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for Motor {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([
            self.w.geq(&self.qstar * &self.qmax * gravity()),
            self.kv.geq(&self.kv_min),
            self.kv.leq(&self.kv_max),
        ])
    }
}

impl PhysicalComponent for Motor {
    type State = FlightState;
    type Performance = MotorPerf;
    type Error = Infallible;

    fn flight_model(&self, _state: &FlightState) -> Result<MotorPerf, Infallible> {
        Ok(MotorPerf::new(self))
    }
}

/// Motor operating point.
///
/// The current and voltage bounds are tight whenever efficiency or
/// electrical power enters the cost.
#[derive(Debug, Clone)]
pub struct MotorPerf {
    /// Shaft power out.
    pub p_shaft: Variable,
    /// Electrical power in.
    pub p_elec: Variable,
    /// Motor efficiency.
    pub etam: Variable,
    /// Torque.
    pub q: Variable,
    /// Shaft speed.
    pub omega: Variable,
    /// Current.
    pub i: Variable,
    /// Voltage.
    pub v: Variable,
    motor: Motor,
}

impl MotorPerf {
    #[must_use]
    pub fn new(motor: &Motor) -> Self {
        Self {
            p_shaft: Variable::free::<Power>("Pshaft", "motor output shaft power"),
            p_elec: Variable::free::<Power>("Pelec", "motor input power"),
            etam: Variable::dimensionless("etam", "motor efficiency"),
            q: Variable::free::<Torque>("Q", "torque"),
            omega: Variable::free::<AngularVelocity>("omega", "propeller rotation rate"),
            i: Variable::free::<ElectricCurrent>("i", "current"),
            v: Variable::free::<ElectricPotential>("v", "voltage"),
            motor: motor.clone(),
        }
    }
}

impl ConstraintModel for MotorPerf {
    fn constraints(&self) -> ConstraintSet {
        let m = &self.motor;
        ConstraintSet::from([
            self.p_shaft.equals(&self.q * &self.omega),
            self.p_elec.equals(&self.v * &self.i),
            self.etam.equals(&self.p_shaft / &self.p_elec),
            m.qmax.geq(&self.q),
            self.v.leq(&m.v_max),
            self.i.geq(&self.q * &m.kv + &m.i0),
            self.v.geq(&self.omega / &m.kv + &self.i * &m.r),
        ])
    }
}

impl PerformanceModel for MotorPerf {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{force::pound_force, torque::newton_meter};

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn voltage_constant_is_stored_in_radians_per_second_per_volt() {
        assert_relative_eq!(
            rpm_per_volt(60.0).si_value(),
            2.0 * std::f64::consts::PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn best_voltage_constant_balances_losses() {
        let motor = Motor::new();
        let perf = motor.flight_model(&FlightState::default()).unwrap();

        let mut set = motor.constraints();
        set.include_model(&perf)
            .substitute(&perf.q, Torque::new::<newton_meter>(10.0));
        let w_ref = Variable::fixed("Wref", "", Force::new::<pound_force>(100.0));
        let program = Program::new(perf.etam.pow(-1.0) + &motor.w / &w_ref, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        // Efficiency (1 - i0/i)(1 - iR/Vmax) peaks at i = sqrt(i0 Vmax / R).
        let (q, i0, r, v_max): (f64, f64, f64, f64) = (10.0, 4.5, 0.033, 300.0);
        let current = (i0 * v_max / r).sqrt();
        let etam = (1.0 - i0 / current) * (1.0 - current * r / v_max);
        assert_relative_eq!(solution.value(&perf.etam).unwrap(), etam, max_relative = 1e-5);
        assert_relative_eq!(solution.value(&perf.i).unwrap(), current, max_relative = 1e-4);
        assert_relative_eq!(
            solution.value(&motor.kv).unwrap(),
            (current - i0) / q,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            solution.value(&motor.w).unwrap(),
            0.8 * q * 9.81,
            max_relative = 1e-5
        );
    }
}
