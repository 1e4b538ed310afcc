use std::f64::consts::PI;

use crate::{
    models::aircraft::FlightState,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        fit::{FitConstraintSet, FitError, FitInput, FitRecord},
        modular::PerformanceModel,
        nomial::Variable,
    },
};

use super::Planform;

const PROFILE_DRAG_FIT: &str = include_str!("jho_fitdata.csv");

/// Wing drag over one or more flight segments.
///
/// Profile drag comes from an airfoil polar fit over lift coefficient and
/// Reynolds number. A polar fit with three inputs also takes the thickness
/// ratio of the planform.
#[derive(Debug, Clone)]
pub struct WingAero {
    /// Wing drag coefficient per segment.
    pub cd: Vec<Variable>,
    /// Lift coefficient per segment.
    pub cl: Vec<Variable>,
    /// Stall lift coefficient, 1.3.
    pub cl_stall: Variable,
    /// Span efficiency, 0.9.
    pub e: Variable,
    /// Reynolds number per segment.
    pub re: Vec<Variable>,
    /// Profile drag coefficient per segment.
    pub cdp: Vec<Variable>,
    polar: FitConstraintSet,
    ar: Variable,
    cmac: Variable,
    states: Vec<(Variable, Variable, Variable)>,
}

impl WingAero {
    /// Builds the model with the bundled airfoil polar.
    ///
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled polar fails to load.
    pub fn new(planform: &Planform, states: &[FlightState]) -> Result<Self, FitError> {
        Self::with_polar(planform, states, &FitRecord::from_csv(PROFILE_DRAG_FIT, 0)?)
    }

    /// Builds the model with a custom airfoil polar.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::DimensionMismatch`] if `polar` takes other than
    /// two inputs (lift coefficient and Reynolds number) or three (plus
    /// thickness ratio).
    pub fn with_polar(
        planform: &Planform,
        states: &[FlightState],
        polar: &FitRecord,
    ) -> Result<Self, FitError> {
        let n = states.len();
        let cl = Variable::dimensionless_vector(n, "CL", "lift coefficient");
        let re = Variable::dimensionless_vector(n, "Re", "reynolds number");
        let cdp = Variable::dimensionless_vector(n, "cdp", "wing profile drag coefficient");

        let mut inputs = vec![FitInput::from(&cl), FitInput::from(&re)];
        if polar.d() == 3 {
            inputs.push(FitInput::from(&planform.tau));
        }
        let polar = FitConstraintSet::new(polar, &cdp, inputs)?;

        Ok(Self {
            cd: Variable::dimensionless_vector(n, "Cd", "wing drag coefficient"),
            cl,
            cl_stall: Variable::fixed("CLstall", "stall CL", 1.3),
            e: Variable::fixed("e", "span efficiency", 0.9),
            re,
            cdp,
            polar,
            ar: planform.ar.clone(),
            cmac: planform.cmac.clone(),
            states: states
                .iter()
                .map(|s| (s.rho.clone(), s.v.clone(), s.mu.clone()))
                .collect(),
        })
    }

    /// Number of flight segments.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.states.len()
    }
}

impl ConstraintModel for WingAero {
    fn constraints(&self) -> ConstraintSet {
        let mut set = ConstraintSet::new();
        for (i, (rho, v, mu)) in self.states.iter().enumerate() {
            let induced = self.cl[i].pow(2.0) / (PI * &self.ar * &self.e);
            set.extend([
                self.cd[i].geq(&self.cdp[i] + induced),
                self.re[i].equals(rho * v * &self.cmac / mu),
                self.cl[i].leq(&self.cl_stall),
            ]);
        }
        set.include_model(&self.polar);
        set
    }
}

impl PerformanceModel for WingAero {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::meter};

    use crate::support::{
        constraint::ConstraintKind,
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn one_set_of_relations_per_segment() {
        let planform = Planform::default();
        let states = FlightState::segments(&[Default::default(); 3]);
        let aero = WingAero::new(&planform, &states).unwrap();

        assert_eq!(aero.segments(), 3);
        let set = aero.constraints();
        assert_eq!(set.len(), 3 * 3 + 3);
        assert_eq!(set.count(ConstraintKind::MonomialEquality), 3);
    }

    #[test]
    fn polar_with_thickness_broadcasts_the_planform() {
        let polar = FitRecord::from_csv(
            "ftype,d,K,e00,e01,e02,c0,a1\nSMA,3,1,0.5,-0.2,1.0,0.1,1\n",
            0,
        )
        .unwrap();
        let planform = Planform::default();
        let states = FlightState::segments(&[Default::default(); 2]);
        let aero = WingAero::with_polar(&planform, &states, &polar).unwrap();
        assert_eq!(aero.constraints().len(), 2 * 3 + 2);
    }

    #[test]
    fn rejects_polars_over_one_input() {
        let polar = FitRecord::from_csv("ftype,d,K,e00,c0,a1\nSMA,1,1,0.5,0.1,1\n", 0).unwrap();
        let err = WingAero::with_polar(&Planform::default(), &[FlightState::default()], &polar)
            .unwrap_err();
        assert!(matches!(
            err,
            FitError::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn drag_is_profile_plus_induced() {
        let planform = Planform::default();
        let states = [FlightState::default()];
        let aero = WingAero::new(&planform, &states).unwrap();

        let set = aero
            .constraints()
            .with_substitution(&planform.ar, 10.0)
            .with_substitution(&planform.cmac, Length::new::<meter>(0.3))
            .with_substitution(&aero.cl[0], 0.8);
        let program = Program::new(&aero.cd[0], set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let re: f64 = 1.255 * 50.0 * 0.3 / 1.5e-5;
        let cdp = (0.36 * re.powf(-0.6) + 8.1e-5 * 0.8_f64.powi(5)).sqrt();
        assert_relative_eq!(solution.value(&aero.re[0]).unwrap(), re, max_relative = 1e-6);
        assert_relative_eq!(
            solution.value(&aero.cd[0]).unwrap(),
            cdp + 0.64 / (PI * 10.0 * 0.9),
            max_relative = 1e-5
        );
    }
}
