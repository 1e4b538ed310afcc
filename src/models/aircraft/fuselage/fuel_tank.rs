use uom::si::{
    f64::{Force, Volume},
    force::pound_force,
    volume::gallon,
};

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet, Relate},
    nomial::Variable,
    units::SpecificWeight,
};

/// Fuel tank sized for a total fuel weight.
#[derive(Debug, Clone)]
pub struct FuelTank {
    /// Fuel tank weight.
    pub w: Variable,
    /// Tank weight over fuel weight, 0.03.
    pub f: Variable,
    /// Fuel volume margin factor, 1.1.
    pub mfac: Variable,
    /// Specific weight of 100LL, 6.01 lbf/gal.
    pub rho_fuel: Variable,
    /// Fuel tank volume.
    pub vol: Variable,
    w_fuel: Variable,
}

impl FuelTank {
    #[must_use]
    pub fn new(w_fuel: &Variable) -> Self {
        let rho_fuel: SpecificWeight =
            Force::new::<pound_force>(6.01) / Volume::new::<gallon>(1.0);
        Self {
            w: Variable::free::<Force>("W", "fuel tank weight"),
            f: Variable::fixed("f", "fraction fuel tank weight to fuel weight", 0.03),
            mfac: Variable::fixed("mfac", "fuel volume margin factor", 1.1),
            rho_fuel: Variable::fixed("rho_fuel", "density of 100LL", rho_fuel),
            vol: Variable::free::<Volume>("Vol", "fuel tank volume"),
            w_fuel: w_fuel.clone(),
        }
    }
}

impl ConstraintModel for FuelTank {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([
            self.w.geq(&self.f * &self.w_fuel),
            (&self.vol / &self.mfac).geq(&self.w_fuel / &self.rho_fuel),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::volume::cubic_meter;

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn tank_holds_the_fuel_with_margin() {
        let w_fuel = Variable::fixed("Wfuel", "fuel weight", Force::new::<pound_force>(10.0));
        let tank = FuelTank::new(&w_fuel);

        let w_ref = Variable::fixed("Wref", "", Force::new::<pound_force>(1.0));
        let vol_ref = Variable::fixed("Volref", "", Volume::new::<cubic_meter>(1.0));
        let program =
            Program::new(&tank.w / &w_ref + &tank.vol / &vol_ref, tank.constraints()).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        assert_relative_eq!(
            solution.quantity::<Force>(&tank.w).unwrap().get::<pound_force>(),
            0.3,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            solution.quantity::<Volume>(&tank.vol).unwrap().get::<gallon>(),
            1.1 * 10.0 / 6.01,
            max_relative = 1e-5
        );
    }
}
