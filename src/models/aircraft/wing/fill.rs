use uom::si::f64::{Force, Length};

use crate::{
    models::{gravity, materials::FoamHd},
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        nomial::{Posynomial, Variable},
    },
};

use super::Planform;

/// Foam filling the airfoil cross section.
#[derive(Debug, Clone)]
pub struct WingCore {
    /// Core weight.
    pub w: Variable,
    /// Cross section area over chord squared, 0.0753449.
    pub abar: Variable,
    pub material: FoamHd,
    cave: Vec<Variable>,
    b: Variable,
    deta: Vec<Variable>,
}

impl WingCore {
    #[must_use]
    pub fn new(surface: &Planform) -> Self {
        Self {
            w: Variable::free::<Force>("W", "wing core weight"),
            abar: Variable::fixed("Abar", "normalized cross section area", 0.075_344_9),
            material: FoamHd::new(),
            cave: surface.cave.clone(),
            b: surface.b.clone(),
            deta: surface.deta.clone(),
        }
    }
}

impl ConstraintModel for WingCore {
    fn constraints(&self) -> ConstraintSet {
        let panels: Posynomial = self
            .cave
            .iter()
            .zip(&self.deta)
            .map(|(cave, deta)| cave.pow(2.0) * deta)
            .sum();
        ConstraintSet::from([self.w.geq(
            gravity() * &self.material.rho * &self.abar * &self.b * panels,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{force::newton, length::meter};

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn weight_integrates_section_area() {
        let planform = Planform::new(3, 1.0);
        let core = WingCore::new(&planform);
        let mut set = core.constraints();
        set.substitute(&planform.b, Length::new::<meter>(2.0));
        for cave in &planform.cave {
            set.substitute(cave, Length::new::<meter>(0.5));
        }
        let program = Program::new(&core.w, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        // 2·(b/2)·Σ Δη ρ g Ā c² over a constant chord is b ρ g Ā c².
        let expected = 2.0 * 36.0 * 9.81 * 0.075_344_9 * 0.25;
        let w: Force = solution.quantity(&core.w).unwrap();
        assert_relative_eq!(w.get::<newton>(), expected, max_relative = 1e-6);
    }
}
