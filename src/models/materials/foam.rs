use uom::si::{f64::MassDensity, mass_density::gram_per_cubic_centimeter};

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet},
    nomial::Variable,
};

/// High density foam.
#[derive(Debug, Clone)]
pub struct FoamHd {
    /// Density, 0.036 g/cm³.
    pub rho: Variable,
}

impl FoamHd {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rho: Variable::fixed(
                "rho",
                "foam density",
                MassDensity::new::<gram_per_cubic_centimeter>(0.036),
            ),
        }
    }
}

impl Default for FoamHd {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for FoamHd {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
    }
}

/// Low density foam.
#[derive(Debug, Clone)]
pub struct FoamLd {
    /// Density, 0.024 g/cm³.
    pub rho: Variable,
}

impl FoamLd {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rho: Variable::fixed(
                "rho",
                "foam density",
                MassDensity::new::<gram_per_cubic_centimeter>(0.024),
            ),
        }
    }
}

impl Default for FoamLd {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for FoamLd {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
    }
}
