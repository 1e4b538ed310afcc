//! Normalized discretized cantilever beam.

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet, Relate},
    nomial::Variable,
};

/// The load a [`Beam`] is built for, one value per node from root to tip.
#[derive(Debug, Clone, PartialEq)]
pub enum BeamLoad {
    /// Normalized distributed load. Shear is integrated from the tip.
    Distributed(Vec<f64>),
    /// Normalized shear, prescribed directly.
    Shear(Vec<f64>),
}

impl BeamLoad {
    fn values(&self) -> &[f64] {
        match self {
            Self::Distributed(values) | Self::Shear(values) => values,
        }
    }
}

/// A cantilever beam in normalized variables.
///
/// Shear, moment, slope and deflection are integrated from a free tip to a
/// clamped root with the trapezoidal rule over elements of length `dx`.
/// Coupling models scale the normalized results by a reference force and
/// length, and bound `EIbar` by the stiffness of the real section.
#[derive(Debug, Clone)]
pub struct Beam {
    /// Normalized stiffness of each element.
    pub eibar: Vec<Variable>,
    /// Normalized element length.
    pub dx: Variable,
    /// Normalized distributed load at each node. Empty when the shear is
    /// prescribed.
    pub qbar: Vec<Variable>,
    /// Normalized shear at each node.
    pub sbar: Vec<Variable>,
    /// Tip shear, effectively zero.
    pub sbartip: Variable,
    /// Normalized moment at each node.
    pub mbar: Vec<Variable>,
    /// Tip moment, effectively zero.
    pub mbartip: Variable,
    /// Slope at each node.
    pub th: Vec<Variable>,
    /// Root slope, effectively zero.
    pub throot: Variable,
    /// Normalized deflection at each node.
    pub dbar: Vec<Variable>,
    /// Root deflection, effectively zero.
    pub dbarroot: Variable,
}

impl Beam {
    /// Builds a beam with one node per load value.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two load values are given.
    #[must_use]
    pub fn new(load: &BeamLoad) -> Self {
        let n = load.values().len();
        assert!(n >= 2, "a beam needs at least two nodes, got {n}");

        let (qbar, sbar) = match load {
            BeamLoad::Distributed(q) => (
                Variable::fixed_vector("qbar", "normalized loading", q.iter().copied()),
                Variable::dimensionless_vector(n, "Sbar", "normalized shear"),
            ),
            BeamLoad::Shear(s) => (
                Vec::new(),
                Variable::fixed_vector("Sbar", "normalized shear", s.iter().copied()),
            ),
        };

        Self {
            eibar: Variable::dimensionless_vector(
                n - 1,
                "EIbar",
                "normalized YM and moment of inertia",
            ),
            dx: Variable::dimensionless("dx", "normalized length of element"),
            qbar,
            sbar,
            sbartip: Variable::fixed("Sbartip", "tip loading", 1e-10),
            mbar: Variable::dimensionless_vector(n, "Mbar", "normalized moment"),
            mbartip: Variable::fixed("Mbartip", "tip moment", 1e-10),
            th: Variable::dimensionless_vector(n, "theta", "deflection slope"),
            throot: Variable::fixed("throot", "base angle", 1e-10),
            dbar: Variable::dimensionless_vector(n, "dbar", "normalized displacement"),
            dbarroot: Variable::fixed("dbarroot", "base deflection", 1e-10),
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.sbar.len()
    }
}

impl ConstraintModel for Beam {
    fn constraints(&self) -> ConstraintSet {
        let last = self.nodes() - 1;
        let half_dx = 0.5 * &self.dx;
        let mut set = ConstraintSet::new();

        if !self.qbar.is_empty() {
            for i in 0..last {
                let load = &half_dx * (&self.qbar[i] + &self.qbar[i + 1]);
                set.push(self.sbar[i].geq(&self.sbar[i + 1] + load));
            }
            set.push(self.sbar[last].geq(&self.sbartip));
        }

        for i in 0..last {
            let shear = &half_dx * (&self.sbar[i] + &self.sbar[i + 1]);
            let moment = &half_dx / &self.eibar[i] * (&self.mbar[i + 1] + &self.mbar[i]);
            let slope = &half_dx * (&self.th[i + 1] + &self.th[i]);
            set.extend([
                self.mbar[i].geq(&self.mbar[i + 1] + shear),
                self.th[i + 1].geq(&self.th[i] + moment),
                self.dbar[i + 1].geq(&self.dbar[i] + slope),
            ]);
        }
        set.extend([
            self.mbar[last].geq(&self.mbartip),
            self.th[0].geq(&self.throot),
            self.dbar[0].geq(&self.dbarroot),
        ]);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    fn tip_deflection(beam: &Beam, eibar: f64) -> f64 {
        let mut set = beam.constraints();
        set.substitute(&beam.dx, 1.0 / (beam.nodes() - 1) as f64);
        for e in &beam.eibar {
            set.substitute(e, eibar);
        }
        let tip = &beam.dbar[beam.nodes() - 1];
        let program = Program::new(tip, set).unwrap();
        GpSolver::default().solve(&program).unwrap().value(tip).unwrap()
    }

    #[test]
    fn single_element_under_uniform_load() {
        // One trapezoidal element: S = 1, M = 1/2, θ = 1/4, δ = 1/8.
        let beam = Beam::new(&BeamLoad::Distributed(vec![1.0, 1.0]));
        assert_relative_eq!(tip_deflection(&beam, 1.0), 0.125, max_relative = 1e-5);
    }

    #[test]
    fn stiffer_beams_deflect_less() {
        let beam = Beam::new(&BeamLoad::Shear(vec![1.0; 3]));
        assert!(beam.qbar.is_empty());
        assert_eq!(beam.constraints().len(), 2 * 3 + 3);

        let soft = tip_deflection(&beam, 1.0);
        let stiff = tip_deflection(&beam, 4.0);
        assert_relative_eq!(soft / stiff, 4.0, max_relative = 1e-4);
    }
}
