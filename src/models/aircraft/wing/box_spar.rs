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

/// Closed box spar: four unidirectional caps, fabric webs on all sides and
/// a foam core lining the box.
#[derive(Debug, Clone)]
pub struct BoxSpar {
    /// Spar weight.
    pub w: Variable,
    /// Spar width to chord ratio limit, 0.15.
    pub wlim: Variable,
    /// Curvature knockdown factor, 0.97.
    pub mfac: Variable,
    /// Core to thickness ratio, 0.02.
    pub tcoret: Variable,
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
    /// Cross sectional diameter, equal to the width.
    pub d: Vec<Variable>,
    /// Cap thickness.
    pub t: Vec<Variable>,
    /// Shear web thickness.
    pub tshear: Vec<Variable>,
    /// Core thickness.
    pub tcore: Vec<Variable>,
    pub material: CfrpUd,
    pub shear_material: CfrpFabric,
    pub core_material: FoamHd,
    pub(super) cave: Vec<Variable>,
    b: Variable,
    pub(super) tau: Variable,
    deta: Vec<Variable>,
}

impl BoxSpar {
    #[must_use]
    pub fn new(surface: &Planform) -> Self {
        let n = surface.cave.len();
        Self {
            w: Variable::free::<Force>("W", "spar weight"),
            wlim: Variable::fixed("wlim", "spar width to chord ratio", 0.15),
            mfac: Variable::fixed("mfac", "curvature knockdown factor", 0.97),
            tcoret: Variable::fixed("tcoret", "core to thickness ratio", 0.02),
            hin: Variable::vector::<Length>(n, "hin", "height between caps"),
            i: Variable::vector::<SecondMomentOfArea>(n, "I", "spar x moment of inertia"),
            sy: Variable::vector::<Volume>(n, "Sy", "section modulus"),
            dm: Variable::vector::<Mass>(n, "dm", "segment spar mass"),
            width: Variable::vector::<Length>(n, "w", "spar width"),
            d: Variable::vector::<Length>(n, "d", "cross sectional diameter"),
            t: Variable::vector::<Length>(n, "t", "spar cap thickness"),
            tshear: Variable::vector::<Length>(n, "tshear", "shear web thickness"),
            tcore: Variable::vector::<Length>(n, "tcore", "core thickness"),
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

impl ConstraintModel for BoxSpar {
    fn constraints(&self) -> ConstraintSet {
        let rho = &self.material.rho;
        let rhoshear = &self.shear_material.rho;
        let rhocore = &self.core_material.rho;

        let mut set = ConstraintSet::new();
        for i in 0..self.cave.len() {
            let (hin, w, t) = (&self.hin[i], &self.width[i], &self.t[i]);
            let (tshear, tcore) = (&self.tshear[i], &self.tcore[i]);
            let depth = &self.cave[i] * &self.tau;
            set.extend([
                (&self.i[i] / &self.mfac).leq(w * t * hin.pow(2.0)),
                self.dm[i].geq(
                    (4.0 * rho * w * t
                        + 4.0 * tshear * rhoshear * (hin + w)
                        + 2.0 * rhocore * tcore * (w + hin))
                        * (0.5 * &self.b * &self.deta[i]),
                ),
                w.leq(&self.wlim * &self.cave[i]),
                depth.geq(hin + 4.0 * t + 2.0 * tcore),
                t.geq(&self.material.tmin),
                (&self.sy[i] * (0.5 * hin + 2.0 * t + tcore)).leq(&self.i[i]),
                tshear.geq(&self.shear_material.tmin),
                tcore.geq(&self.tcoret * &depth),
                self.d[i].equals(w),
            ]);
        }

        let mass: Posynomial = self.dm.iter().sum();
        set.push(self.w.geq(2.0 * gravity() * mass));
        set
    }
}
