use uom::si::f64::{Force, Length, Mass, Volume};

use crate::{
    models::{
        gravity,
        materials::{CfrpFabric, CfrpUd, FoamHd},
    },
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        nomial::{Posynomial, Variable},
        units::SecondMomentOfArea,
    },
};

use super::Planform;

/// Spar of two unidirectional carbon caps joined by a fabric shear web,
/// with foam between the caps.
#[derive(Debug, Clone)]
pub struct CapSpar {
    /// Spar weight.
    pub w: Variable,
    /// Spar width to chord ratio limit, 0.15.
    pub wlim: Variable,
    /// Curvature knockdown factor, 0.97.
    pub mfac: Variable,
    /// Height between caps.
    pub hin: Vec<Variable>,
    /// Bending moment of inertia.
    pub i: Vec<Variable>,
    /// Section modulus.
    pub sy: Vec<Variable>,
    /// Segment mass.
    pub dm: Vec<Variable>,
    /// Spar width.
    pub width: Vec<Variable>,
    /// Cap thickness.
    pub t: Vec<Variable>,
    /// Shear web thickness.
    pub tshear: Vec<Variable>,
    pub material: CfrpUd,
    pub shear_material: CfrpFabric,
    pub core_material: FoamHd,
    cave: Vec<Variable>,
    b: Variable,
    tau: Variable,
    deta: Vec<Variable>,
}

impl CapSpar {
    #[must_use]
    pub fn new(surface: &Planform) -> Self {
        let n = surface.cave.len();
        Self {
            w: Variable::free::<Force>("W", "spar weight"),
            wlim: Variable::fixed("wlim", "spar width to chord ratio", 0.15),
            mfac: Variable::fixed("mfac", "curvature knockdown factor", 0.97),
            hin: Variable::vector::<Length>(n, "hin", "height between caps"),
            i: Variable::vector::<SecondMomentOfArea>(n, "I", "spar x moment of inertia"),
            sy: Variable::vector::<Volume>(n, "Sy", "section modulus"),
            dm: Variable::vector::<Mass>(n, "dm", "segment spar mass"),
            width: Variable::vector::<Length>(n, "w", "spar width"),
            t: Variable::vector::<Length>(n, "t", "spar cap thickness"),
            tshear: Variable::vector::<Length>(n, "tshear", "shear web thickness"),
            material: CfrpUd::new(),
            shear_material: CfrpFabric::new(),
            core_material: FoamHd::new(),
            cave: surface.cave.clone(),
            b: surface.b.clone(),
            tau: surface.tau.clone(),
            deta: surface.deta.clone(),
        }
    }
}

impl ConstraintModel for CapSpar {
    fn constraints(&self) -> ConstraintSet {
        let rho = &self.material.rho;
        let rhoshear = &self.shear_material.rho;
        let rhocore = &self.core_material.rho;

        let mut set = ConstraintSet::new();
        for i in 0..self.cave.len() {
            let (hin, w, t, tshear) = (&self.hin[i], &self.width[i], &self.t[i], &self.tshear[i]);
            set.extend([
                (&self.i[i] / &self.mfac).leq(0.5 * w * t * hin.pow(2.0)),
                self.dm[i].geq(
                    (2.0 * rho * w * t
                        + 2.0 * tshear * rhoshear * (hin + 2.0 * t)
                        + rhocore * w * hin)
                        * (0.5 * &self.b * &self.deta[i]),
                ),
                w.leq(&self.wlim * &self.cave[i]),
                (&self.cave[i] * &self.tau).geq(hin + 2.0 * t),
                (&self.sy[i] * (0.5 * hin + t)).leq(&self.i[i]),
                tshear.geq(&self.shear_material.tmin),
            ]);
        }

        let mass: Posynomial = self.dm.iter().sum();
        set.push(self.w.geq(2.0 * gravity() * mass));
        set
    }
}
