use std::f64::consts::PI;

use uom::si::f64::{Force, Length, Mass, Volume};

use crate::{
    models::{gravity, materials::CfrpFabric},
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        nomial::{Monomial, Posynomial, Variable},
        units::SecondMomentOfArea,
    },
};

/// Thin-walled tapered carbon tube.
#[derive(Debug, Clone)]
pub struct TubeSpar {
    /// Weight margin factor, 1.
    pub mfac: Variable,
    /// Taper index, 0.8.
    pub k: Variable,
    /// `1 - k/2`.
    pub kfac: Variable,
    /// Spar weight.
    pub w: Variable,
    /// Bending moment of inertia of each segment.
    pub i: Vec<Variable>,
    /// Polar moment of inertia of each segment.
    pub j: Vec<Variable>,
    /// Diameter of each segment.
    pub d: Vec<Variable>,
    /// Wall thickness of each segment.
    pub t: Vec<Variable>,
    /// Mass of each segment.
    pub dm: Vec<Variable>,
    /// Section modulus of each segment.
    pub sy: Vec<Variable>,
    pub material: CfrpFabric,
    deta: Variable,
    l: Variable,
}

impl TubeSpar {
    /// A tube of `n - 1` segments, each `deta` of the length `l`.
    #[must_use]
    pub fn new(n: usize, deta: &Variable, l: &Variable) -> Self {
        let k = 0.8;
        Self {
            mfac: Variable::fixed("mfac", "weight margin factor", 1.0),
            k: Variable::fixed("k", "taper index", k),
            kfac: Variable::fixed("kfac", "(1-k/2)", 1.0 - k / 2.0),
            w: Variable::free::<Force>("W", "spar weight"),
            i: Variable::vector::<SecondMomentOfArea>(n - 1, "I", "moment of inertia"),
            j: Variable::vector::<SecondMomentOfArea>(n - 1, "J", "polar moment of inertia"),
            d: Variable::vector::<Length>(n - 1, "d", "diameter"),
            t: Variable::vector::<Length>(n - 1, "t", "thickness"),
            dm: Variable::vector::<Mass>(n - 1, "dm", "segment mass"),
            sy: Variable::vector::<Volume>(n - 1, "Sy", "section modulus"),
            material: CfrpFabric::new(),
            deta: deta.clone(),
            l: l.clone(),
        }
    }

    /// The sizing constraints, with `extra` weight carried on the tube.
    pub(super) fn constraints_with(&self, extra: Option<Monomial>) -> ConstraintSet {
        let rho = &self.material.rho;
        let mut set = ConstraintSet::new();
        for s in 0..self.d.len() {
            let (d, t) = (&self.d[s], &self.t[s]);
            set.extend([
                self.i[s].leq(PI / 8.0 * t * d.pow(3.0)),
                self.j[s].leq(PI / 4.0 * t * d.pow(3.0)),
                self.sy[s].leq(2.0 * &self.i[s] / d),
                self.dm[s].geq(PI * rho * d * &self.deta * t * &self.kfac * &self.l),
                t.geq(&self.material.tmin),
            ]);
        }

        let mass: Posynomial = self.dm.iter().sum();
        let mut carried = gravity() * mass;
        if let Some(extra) = extra {
            carried = carried + extra;
        }
        set.push((&self.w / &self.mfac).geq(carried));
        set
    }
}

impl ConstraintModel for TubeSpar {
    fn constraints(&self) -> ConstraintSet {
        self.constraints_with(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn taper_factor_follows_the_index() {
        let deta = Variable::fixed("deta", "", 0.5);
        let l = Variable::free::<Length>("l", "");
        let spar = TubeSpar::new(3, &deta, &l);

        assert_relative_eq!(spar.kfac.value().unwrap(), 0.6);
        let set = spar.constraints();
        assert_eq!(set.len(), 2 * 5 + 1);
        assert!(set.is_gp());
    }
}
