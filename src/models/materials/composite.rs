use uom::si::{
    f64::{Length, MassDensity, Pressure},
    length::{inch, millimeter},
    mass_density::gram_per_cubic_centimeter,
    pressure::{gigapascal, megapascal},
};

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet},
    nomial::Variable,
};

/// Carbon fiber reinforced plastic fabric.
#[derive(Debug, Clone)]
pub struct CfrpFabric {
    /// Density, 1.6 g/cm³.
    pub rho: Variable,
    /// Minimum gauge thickness, 0.3048 mm.
    pub tmin: Variable,
    /// Torsional stress limit, 570 MPa.
    pub tau: Variable,
    /// Young's modulus, 150 GPa.
    pub e: Variable,
    /// Maximum stress, 400 MPa.
    pub sigma: Variable,
    /// Shear modulus, 2 GPa.
    pub g: Variable,
}

impl CfrpFabric {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rho: Variable::fixed(
                "rho",
                "density of CFRP",
                MassDensity::new::<gram_per_cubic_centimeter>(1.6),
            ),
            tmin: Variable::fixed(
                "tmin",
                "minimum gauge thickness",
                Length::new::<millimeter>(0.3048),
            ),
            tau: Variable::fixed(
                "tau",
                "torsional stress limit",
                Pressure::new::<megapascal>(570.0),
            ),
            e: Variable::fixed("E", "Youngs modulus", Pressure::new::<gigapascal>(150.0)),
            sigma: Variable::fixed("sigma", "max stress", Pressure::new::<megapascal>(400.0)),
            g: Variable::fixed("G", "shear modulus", Pressure::new::<gigapascal>(2.0)),
        }
    }
}

impl Default for CfrpFabric {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for CfrpFabric {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
    }
}

/// Unidirectional carbon fiber reinforced plastic.
#[derive(Debug, Clone)]
pub struct CfrpUd {
    /// Density, 1.6 g/cm³.
    pub rho: Variable,
    /// Young's modulus, 137 GPa.
    pub e: Variable,
    /// Maximum stress, 1700 MPa.
    pub sigma: Variable,
    /// Minimum gauge thickness, 0.1 mm.
    pub tmin: Variable,
}

impl CfrpUd {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rho: Variable::fixed(
                "rho",
                "density of CFRP",
                MassDensity::new::<gram_per_cubic_centimeter>(1.6),
            ),
            e: Variable::fixed(
                "E",
                "Youngs Modulus of CFRP",
                Pressure::new::<gigapascal>(137.0),
            ),
            sigma: Variable::fixed(
                "sigma",
                "maximum stress limit of CFRP",
                Pressure::new::<megapascal>(1700.0),
            ),
            tmin: Variable::fixed(
                "tmin",
                "minimum gauge thickness",
                Length::new::<millimeter>(0.1),
            ),
        }
    }
}

impl Default for CfrpUd {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for CfrpUd {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
    }
}

/// Kevlar.
#[derive(Debug, Clone)]
pub struct Kevlar {
    /// Density, 0.049 g/cm³.
    pub rho: Variable,
    /// Minimum gauge thickness, 0.012 in.
    pub tmin: Variable,
    /// Torsional stress limit, 200 MPa.
    pub tau: Variable,
}

impl Kevlar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rho: Variable::fixed(
                "rho",
                "density of Kevlar",
                MassDensity::new::<gram_per_cubic_centimeter>(0.049),
            ),
            tmin: Variable::fixed("tmin", "minimum gauge thickness", Length::new::<inch>(0.012)),
            tau: Variable::fixed(
                "tau",
                "torsional stress limit",
                Pressure::new::<megapascal>(200.0),
            ),
        }
    }
}

impl Default for Kevlar {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for Kevlar {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn properties_are_stored_in_si_units() {
        let fabric = CfrpFabric::new();
        assert_relative_eq!(fabric.rho.value().unwrap(), 1600.0, max_relative = 1e-12);
        assert_relative_eq!(fabric.tmin.value().unwrap(), 3.048e-4, max_relative = 1e-12);
        assert_relative_eq!(fabric.e.value().unwrap(), 150e9, max_relative = 1e-12);

        let kevlar = Kevlar::new();
        assert_relative_eq!(kevlar.tmin.value().unwrap(), 0.012 * 0.0254, max_relative = 1e-12);
    }

    #[test]
    fn instances_own_distinct_variables() {
        let a = CfrpUd::new();
        let b = CfrpUd::new();
        assert_ne!(a.rho, b.rho);
        assert!(a.constraints().is_empty());
    }
}
