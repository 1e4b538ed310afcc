use std::f64::consts::PI;

use uom::si::{
    f64::{
        Acceleration, AngularAcceleration, Force, Length, Mass, MassDensity, MomentOfInertia,
        Pressure, Torque,
    },
    length::inch,
    mass_density::gram_per_cubic_centimeter,
    pressure::{gigapascal, megapascal},
};

use crate::{
    models::gravity,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::PerformanceModel,
        nomial::Variable,
        units::{ForcePerLength, SecondMomentOfArea},
    },
};

fn kevlar_strength() -> Variable {
    Variable::fixed(
        "sigma_kevlar",
        "stress strength of Kevlar",
        Pressure::new::<megapascal>(190.0),
    )
}

/// Kevlar skin over the fuselage body.
#[derive(Debug, Clone)]
pub struct FuselageSkin {
    /// Skin weight.
    pub w: Variable,
    /// Skin mass.
    pub m: Variable,
    /// Kevlar density, 1.3629 g/cm³.
    pub rho_kevlar: Variable,
    /// Skin thickness.
    pub t: Variable,
    /// Minimum skin thickness, 0.03 in.
    pub t_min: Variable,
    /// Bending moment of inertia of the skin section.
    pub i: Variable,
    /// Mass moment of inertia.
    pub i_g: Variable,
    /// Young's modulus of Kevlar, 30 GPa.
    pub e: Variable,
    s: Variable,
    r: Variable,
    l: Variable,
}

impl FuselageSkin {
    /// A skin of wetted area `s` over a body of radius `r` and length `l`.
    #[must_use]
    pub fn new(s: &Variable, r: &Variable, l: &Variable) -> Self {
        Self {
            w: Variable::free::<Force>("W", "fuselage skin weight"),
            m: Variable::free::<Mass>("m", "fuselage skin mass"),
            rho_kevlar: Variable::fixed(
                "rho_kevlar",
                "kevlar density",
                MassDensity::new::<gram_per_cubic_centimeter>(1.3629),
            ),
            t: Variable::free::<Length>("t", "skin thickness"),
            t_min: Variable::fixed("t_min", "minimum skin thickness", Length::new::<inch>(0.03)),
            i: Variable::free::<SecondMomentOfArea>("I", "skin moment of inertia"),
            i_g: Variable::free::<MomentOfInertia>("I_g", "mass moment of inertia"),
            e: Variable::fixed(
                "E",
                "Young's modulus of Kevlar",
                Pressure::new::<gigapascal>(30.0),
            ),
            s: s.clone(),
            r: r.clone(),
            l: l.clone(),
        }
    }
}

impl ConstraintModel for FuselageSkin {
    fn constraints(&self) -> ConstraintSet {
        let (r, t) = (&self.r, &self.t);
        ConstraintSet::from([
            self.m.geq(&self.s * &self.rho_kevlar * t),
            self.w.geq(&self.m * gravity()),
            t.geq(&self.t_min),
            self.i.leq(PI * r.pow(3.0) * t),
            self.i_g
                .geq(&self.m * (4.0 * r.pow(2.0) + 4.0 * r * t + t.pow(2.0))),
        ])
    }
}

/// Bending of the skin under the center weight at the max load factor.
#[derive(Debug, Clone)]
pub struct FuselageSkinLoading {
    /// Horizontal axis center fuselage moment.
    pub m_h: Variable,
    /// Max load factor, 5.
    pub n_max: Variable,
    /// Stress strength of Kevlar, 190 MPa.
    pub sigma_kevlar: Variable,
    /// Distributed load.
    pub q: Variable,
    /// Max tip deflection ratio, 0.05.
    pub kappa: Variable,
    w_cent: Variable,
    skin: FuselageSkin,
}

impl FuselageSkinLoading {
    #[must_use]
    pub fn new(skin: &FuselageSkin, w_cent: &Variable) -> Self {
        Self {
            m_h: Variable::free::<Torque>("M_h", "horizontal axis center fuselage moment"),
            n_max: Variable::fixed("N_max", "max loading", 5.0),
            sigma_kevlar: kevlar_strength(),
            q: Variable::free::<ForcePerLength>("q", "distributed load"),
            kappa: Variable::fixed("kappa", "maximum tip deflection ratio", 0.05),
            w_cent: w_cent.clone(),
            skin: skin.clone(),
        }
    }
}

impl ConstraintModel for FuselageSkinLoading {
    fn constraints(&self) -> ConstraintSet {
        let skin = &self.skin;
        let half = 0.5 * &skin.l;
        ConstraintSet::from([
            self.m_h.geq(&self.n_max * &self.w_cent / 4.0 * &skin.l),
            self.sigma_kevlar.geq(&self.m_h * &skin.r / &skin.i),
            self.q.geq(&self.w_cent * &self.n_max / &skin.l),
            (&self.kappa * &half).geq(&self.q * half.pow(4.0) / (8.0 * &skin.e * &skin.i)),
        ])
    }
}

impl PerformanceModel for FuselageSkinLoading {}

/// Skin stress from the pitching moment of a hard landing.
#[derive(Debug, Clone)]
pub struct FuselageLanding {
    /// Maximum landing force.
    pub f: Variable,
    /// Max landing load factor, 5.
    pub n_max: Variable,
    /// Landing vertical acceleration.
    pub a: Variable,
    /// Angular acceleration about the rear fuselage.
    pub omegadot: Variable,
    /// Landing moment about the center of mass.
    pub m_g: Variable,
    /// Stress strength of Kevlar, 190 MPa.
    pub sigma_kevlar: Variable,
    w_cent: Variable,
    skin: FuselageSkin,
}

impl FuselageLanding {
    #[must_use]
    pub fn new(skin: &FuselageSkin, w_cent: &Variable) -> Self {
        Self {
            f: Variable::free::<Force>("F", "maximum landing force"),
            n_max: Variable::fixed("N_max", "maximum landing load factor", 5.0),
            a: Variable::free::<Acceleration>("a", "landing vertical acceleration"),
            omegadot: Variable::free::<AngularAcceleration>(
                "omegadot",
                "angular acceleration about rear fuselage",
            ),
            m_g: Variable::free::<Torque>("M_g", "landing moment about center of mass"),
            sigma_kevlar: kevlar_strength(),
            w_cent: w_cent.clone(),
            skin: skin.clone(),
        }
    }
}

impl ConstraintModel for FuselageLanding {
    fn constraints(&self) -> ConstraintSet {
        let skin = &self.skin;
        ConstraintSet::from([
            self.f.geq(&self.w_cent * &self.n_max),
            self.a.geq(&self.f / &skin.m),
            self.omegadot.geq(&self.a / (0.5 * &skin.l)),
            self.m_g.geq(&skin.i_g * &self.omegadot),
            self.sigma_kevlar.geq(&self.m_g * &skin.r / &skin.i),
        ])
    }
}

impl PerformanceModel for FuselageLanding {}
