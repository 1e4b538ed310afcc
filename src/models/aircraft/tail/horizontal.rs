use std::f64::consts::TAU;

use uom::si::f64::Length;

use crate::{
    models::aircraft::{
        wing::{Wing, WingConfig},
        FlightState,
    },
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        fit::FitError,
        modular::PhysicalComponent,
        nomial::Variable,
    },
};

use super::{surface_config, surface_constraints, TailAero};

/// Horizontal stabilizer: a small foam-filled wing without a spar.
#[derive(Debug, Clone)]
pub struct HorizontalTail {
    pub wing: Wing,
    /// Horizontal tail volume coefficient.
    pub vh: Variable,
    /// Horizontal tail moment arm.
    pub lh: Variable,
    /// Max downlift coefficient, 0.75.
    pub cl_hmin: Variable,
    /// Horizontal tail span effectiveness.
    pub mh: Variable,
}

impl HorizontalTail {
    /// A three-station tail with 0.8 taper.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(surface_config())
    }

    #[must_use]
    pub fn with_config(config: WingConfig) -> Self {
        Self {
            wing: Wing::with_config(config),
            vh: Variable::dimensionless("Vh", "horizontal tail volume coefficient"),
            lh: Variable::free::<Length>("lh", "horizontal tail moment arm"),
            cl_hmin: Variable::fixed("CLhmin", "max downlift coefficient", 0.75),
            mh: Variable::dimensionless("mh", "horizontal tail span effectiveness"),
        }
    }
}

impl Default for HorizontalTail {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for HorizontalTail {
    fn constraints(&self) -> ConstraintSet {
        let mut set = surface_constraints(&self.wing);
        set.push((&self.mh + 2.0 * &self.mh / &self.wing.planform.ar).leq(TAU));
        set
    }
}

impl PhysicalComponent for HorizontalTail {
    type State = [FlightState];
    type Performance = TailAero;
    type Error = FitError;

    fn flight_model(&self, state: &[FlightState]) -> Result<TailAero, FitError> {
        TailAero::new(&self.wing.planform, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn span_effectiveness_at_aspect_ratio_four() {
        let htail = HorizontalTail::new();
        let set = htail.constraints();
        assert!(set.is_gp());
        assert_eq!(set.fixed_value(&htail.wing.planform.ar), Some(4.0));
        assert!(htail.wing.spar.is_none());

        let limit = set.iter().last().cloned().unwrap();
        let set = ConstraintSet::from([limit, htail.mh.leq(10.0)])
            .with_substitution(&htail.wing.planform.ar, 4.0);
        let program = Program::new(1.0 / &htail.mh, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();
        assert_relative_eq!(
            solution.value(&htail.mh).unwrap(),
            2.0 * PI / 1.5,
            max_relative = 1e-6
        );
    }
}
