//! Mission segment models.

use uom::si::f64::{Force, Time};

use crate::{
    models::gravity,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::PerformanceModel,
        nomial::Variable,
        taylor::te_exp_minus1,
    },
};

/// Fuel burned over a loiter segment of duration `t`.
///
/// The Breguet endurance equation `W_fuel/W_end = exp(z) - 1` with
/// `z = P t BSFC g / √(W_end W_start)` is bounded below by the first three
/// terms of its Taylor series.
#[derive(Debug, Clone)]
pub struct BreguetEndurance {
    /// Breguet coefficient.
    pub z_bre: Variable,
    /// Time per flight segment.
    pub t: Variable,
    /// Fuel-oil fraction, 0.98.
    pub f_fueloil: Variable,
    /// Segment fuel weight.
    pub w_fuel: Variable,
    p_total: Variable,
    bsfc: Variable,
    w_start: Variable,
    w_end: Variable,
}

impl BreguetEndurance {
    /// Builds the segment for an engine drawing `p_total` at `bsfc`, taking
    /// the aircraft from `w_start` to `w_end`.
    #[must_use]
    pub fn new(p_total: &Variable, bsfc: &Variable, w_start: &Variable, w_end: &Variable) -> Self {
        Self {
            z_bre: Variable::dimensionless("z_bre", "Breguet coefficient"),
            t: Variable::free::<Time>("t", "time per flight segment"),
            f_fueloil: Variable::fixed("f_fueloil", "fuel-oil fraction", 0.98),
            w_fuel: Variable::free::<Force>("W_fuel", "segment fuel weight"),
            p_total: p_total.clone(),
            bsfc: bsfc.clone(),
            w_start: w_start.clone(),
            w_end: w_end.clone(),
        }
    }
}

impl ConstraintModel for BreguetEndurance {
    fn constraints(&self) -> ConstraintSet {
        let burn = &self.p_total * &self.t * &self.bsfc * gravity();
        let mean_weight = (&self.w_end * &self.w_start).pow(0.5);
        ConstraintSet::from([
            self.z_bre.geq(burn / mean_weight).tight(),
            (&self.f_fueloil * &self.w_fuel / &self.w_end).geq(te_exp_minus1(&self.z_bre, 3)),
            self.w_start.geq(&self.w_end + &self.w_fuel),
        ])
    }
}

impl PerformanceModel for BreguetEndurance {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        energy::kilowatt_hour,
        f64::{Energy, Mass, Power},
        force::newton,
        mass::kilogram,
        power::horsepower,
        time::day,
    };

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
        units::{SiQuantity, SpecificFuelConsumption},
    };

    #[test]
    fn one_day_loiter_on_two_horsepower() {
        let bsfc_value: SpecificFuelConsumption =
            Mass::new::<kilogram>(0.32) / Energy::new::<kilowatt_hour>(1.0);
        let p_total = Variable::fixed("P_total", "", Power::new::<horsepower>(2.0));
        let bsfc = Variable::fixed("BSFC", "", bsfc_value);
        let w_start = Variable::free::<Force>("W_start", "");
        let w_end = Variable::fixed("W_end", "", Force::new::<newton>(500.0));
        let segment = BreguetEndurance::new(&p_total, &bsfc, &w_start, &w_end);

        let set = segment
            .constraints()
            .with_substitution(&segment.t, Time::new::<day>(1.0));
        assert!(set.is_gp());
        let program = Program::new(&w_start, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let burn =
            Power::new::<horsepower>(2.0).si_value() * 86_400.0 * bsfc_value.si_value() * 9.81;
        let mut start: f64 = 500.0;
        for _ in 0..200 {
            let z = burn / (500.0 * start).sqrt();
            start = 500.0 + 500.0 / 0.98 * (z + z.powi(2) / 2.0 + z.powi(3) / 6.0);
        }
        assert_relative_eq!(solution.value(&w_start).unwrap(), start, max_relative = 1e-5);
        assert_relative_eq!(
            solution.value(&segment.w_fuel).unwrap(),
            start - 500.0,
            max_relative = 1e-4
        );
    }
}
