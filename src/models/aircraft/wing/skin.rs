use uom::si::{
    f64::{Force, Length, MassDensity, Velocity},
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use crate::{
    models::{gravity, materials::CfrpFabric},
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        nomial::Variable,
        units::{ArealDensity, InverseLength, SiQuantity},
    },
};

use super::Planform;

/// Torsion-carrying composite skin.
#[derive(Debug, Clone)]
pub struct WingSkin {
    /// Skin weight.
    pub w: Variable,
    /// Skin thickness.
    pub t: Variable,
    /// Normalized torsional moment of inertia, 0.01114 1/mm.
    pub jtbar: Variable,
    /// Negative wing moment coefficient, 0.121.
    pub cmw: Variable,
    /// Sea level air density, 1.225 kg/m³.
    pub rhosl: Variable,
    /// Never exceed speed, 45 m/s.
    pub vne: Variable,
    pub material: CfrpFabric,
    s: Variable,
    croot: Variable,
}

impl WingSkin {
    #[must_use]
    pub fn new(surface: &Planform) -> Self {
        Self {
            w: Variable::free::<Force>("W", "wing skin weight"),
            t: Variable::free::<Length>("t", "wing skin thickness"),
            jtbar: Variable::fixed(
                "Jtbar",
                "torsional moment of inertia",
                InverseLength::from_si(11.14),
            ),
            cmw: Variable::fixed("Cmw", "negative wing moment coeff", 0.121),
            rhosl: Variable::fixed(
                "rhosl",
                "sea level air density",
                MassDensity::new::<kilogram_per_cubic_meter>(1.225),
            ),
            vne: Variable::fixed(
                "Vne",
                "never exceed vehicle speed",
                Velocity::new::<meter_per_second>(45.0),
            ),
            material: CfrpFabric::new(),
            s: surface.s.clone(),
            croot: surface.croot.clone(),
        }
    }
}

impl ConstraintModel for WingSkin {
    fn constraints(&self) -> ConstraintSet {
        let m = &self.material;
        ConstraintSet::from([
            self.w.geq(2.0 * &m.rho * &self.s * &self.t * gravity()),
            self.t.geq(&m.tmin),
            m.tau.geq(
                &self.cmw * &self.s * &self.rhosl * self.vne.pow(2.0)
                    / (&self.jtbar * self.croot.pow(2.0) * &self.t),
            ),
        ])
    }
}

/// Secondary structure (ribs, leading edge, control surfaces) as an areal
/// density over the planform.
#[derive(Debug, Clone)]
pub struct WingSecondStruct {
    /// Secondary structure weight.
    pub w: Variable,
    /// Total areal density, 0.35 kg/m².
    pub rho_a: Variable,
    s: Variable,
}

impl WingSecondStruct {
    #[must_use]
    pub fn new(surface: &Planform) -> Self {
        Self {
            w: Variable::free::<Force>("W", "wing secondary structure weight"),
            rho_a: Variable::fixed("rhoA", "total areal density", ArealDensity::from_si(0.35)),
            s: surface.s.clone(),
        }
    }
}

impl ConstraintModel for WingSecondStruct {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([self.w.geq(&self.rho_a * &self.s * gravity())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, f64::Area, force::newton};

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn secondary_weight_scales_with_area() {
        let planform = Planform::default();
        let second = WingSecondStruct::new(&planform);
        let set = second
            .constraints()
            .with_substitution(&planform.s, Area::new::<square_meter>(4.0));
        let program = Program::new(&second.w, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let w: Force = solution.quantity(&second.w).unwrap();
        assert_relative_eq!(w.get::<newton>(), 0.35 * 4.0 * 9.81, max_relative = 1e-6);
    }

    #[test]
    fn skin_is_a_geometric_program() {
        let planform = Planform::default();
        let skin = WingSkin::new(&planform);
        let set = skin.constraints();
        assert_eq!(set.len(), 3);
        assert!(set.is_gp());
        assert_relative_eq!(skin.jtbar.value().unwrap(), 11.14);
        assert!(InverseLength::dimension().approx_eq(&skin.jtbar.dimension()));
    }
}
