use std::f64::consts::PI;

use crate::support::{
    constraint::{Constraint, ConstraintModel, ConstraintSet, Relate},
    nomial::Variable,
    units::SecondMomentOfArea,
};

use super::{BoxSpar, Planform, Wing, WingConfig};

/// A [`BoxSpar`] whose closed section also carries torsion.
///
/// The polar moment of inertia of each panel is bounded by the thin-walled
/// box formula, which is not posynomial in the section dimensions.
#[derive(Debug, Clone)]
pub struct TorsionBoxSpar {
    pub spar: BoxSpar,
    /// Polar moment of inertia of each panel.
    pub j: Vec<Variable>,
}

impl TorsionBoxSpar {
    #[must_use]
    pub fn new(surface: &Planform) -> Self {
        let spar = BoxSpar::new(surface);
        let j = Variable::vector::<SecondMomentOfArea>(
            spar.i.len(),
            "J",
            "spar x polar moment of inertia",
        );
        Self { spar, j }
    }
}

impl ConstraintModel for TorsionBoxSpar {
    fn constraints(&self) -> ConstraintSet {
        let spar = &self.spar;
        let mut set = spar.constraints();
        for i in 0..self.j.len() {
            let depth = &spar.cave[i] * &spar.tau;
            let walls = &depth * &spar.width[i] * &spar.tshear[i] / 3.0;
            set.push(self.j[i].leq(walls * (depth + &spar.width[i])));
        }
        set
    }
}

/// A [`Wing`] with a spanwise lift effectiveness for tail sizing.
#[derive(Debug, Clone)]
pub struct SpWing {
    pub wing: Wing,
    /// Span wise effectiveness.
    pub mw: Variable,
}

impl SpWing {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WingConfig::default())
    }

    #[must_use]
    pub fn with_config(config: WingConfig) -> Self {
        Self {
            wing: Wing::with_config(config),
            mw: Variable::dimensionless("mw", "span wise effectiveness"),
        }
    }
}

impl Default for SpWing {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for SpWing {
    fn constraints(&self) -> ConstraintSet {
        let mut set = self.wing.constraints();
        set.push(Constraint::leq(
            2.0 * PI,
            &self.mw + 2.0 * &self.mw / &self.wing.planform.ar,
        ));
        set
    }
}
