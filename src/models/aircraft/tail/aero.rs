use crate::{
    models::aircraft::{wing::Planform, FlightState},
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        fit::{ErrorMargin, FitConstraintSet, FitError, FitInput, FitRecord},
        modular::PerformanceModel,
        nomial::Variable,
    },
};

const TAIL_DRAG_FIT: &str = include_str!("tail_dragfit.csv");

/// Tail surface drag over one or more flight segments.
///
/// Drag comes from a fit over Reynolds number and thickness ratio, inflated
/// by the fit's RMS error.
#[derive(Debug, Clone)]
pub struct TailAero {
    /// Reynolds number per segment.
    pub re: Vec<Variable>,
    /// Drag coefficient per segment.
    pub cd: Vec<Variable>,
    fit: FitConstraintSet,
    s: Variable,
    b: Variable,
    states: Vec<(Variable, Variable, Variable)>,
}

impl TailAero {
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled drag fit fails to load.
    pub fn new(planform: &Planform, states: &[FlightState]) -> Result<Self, FitError> {
        let n = states.len();
        let re = Variable::dimensionless_vector(n, "Re", "Reynolds number");
        let cd = Variable::dimensionless_vector(n, "Cd", "drag coefficient");

        let record = FitRecord::from_csv(TAIL_DRAG_FIT, 0)?;
        let fit = FitConstraintSet::with_margin(
            &record,
            &cd,
            [FitInput::from(&re), FitInput::from(&planform.tau)],
            ErrorMargin::Rms,
        )?;

        Ok(Self {
            re,
            cd,
            fit,
            s: planform.s.clone(),
            b: planform.b.clone(),
            states: states
                .iter()
                .map(|s| (s.rho.clone(), s.v.clone(), s.mu.clone()))
                .collect(),
        })
    }
}

impl ConstraintModel for TailAero {
    fn constraints(&self) -> ConstraintSet {
        let mut set: ConstraintSet = self
            .states
            .iter()
            .zip(&self.re)
            .map(|((rho, v, mu), re)| re.equals(v * rho * &self.s / &self.b / mu))
            .collect();
        set.include_model(&self.fit);
        set
    }
}

impl PerformanceModel for TailAero {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Area, Length},
        length::meter,
    };

    use crate::{
        models::aircraft::tail::HorizontalTail,
        support::{
            constraint::ConstraintKind,
            modular::PhysicalComponent,
            program::Program,
            solve::{GpSolver, Solver},
        },
    };

    #[test]
    fn one_reynolds_number_and_fit_per_segment() {
        let htail = HorizontalTail::new();
        let states = FlightState::segments(&[Default::default(); 2]);
        let aero = htail.flight_model(&states).unwrap();

        let set = aero.constraints();
        assert_eq!(set.len(), 2 + 2);
        assert_eq!(set.count(ConstraintKind::MonomialEquality), 2);
        assert_relative_eq!(aero.fit.margin().value().unwrap(), 1.03);
    }

    #[test]
    fn drag_is_inflated_by_the_rms_error() {
        let planform = Planform::new(3, 0.8);
        let aero = TailAero::new(&planform, &[FlightState::default()]).unwrap();

        let set = aero
            .constraints()
            .with_substitution(&planform.s, Area::new::<square_meter>(0.5))
            .with_substitution(&planform.b, Length::new::<meter>(2.0))
            .with_substitution(&planform.tau, 0.1);
        let program = Program::new(&aero.cd[0], set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let re: f64 = 50.0 * 1.255 * 0.25 / 1.5e-5;
        let fit = 0.35 * re.powf(-0.3) + 1.5 * re.powf(-0.3) * 0.1_f64.powf(1.2);
        assert_relative_eq!(solution.value(&aero.re[0]).unwrap(), re, max_relative = 1e-6);
        assert_relative_eq!(
            solution.value(&aero.cd[0]).unwrap(),
            fit * 1.03,
            max_relative = 1e-5
        );
    }
}
