//! Empennage models: tail surfaces, the tail boom, and the couplings
//! between them.
//!
//! Tail surfaces are small [`Wing`]s without a spar, held at an aspect
//! ratio of 4 with a lighter foam core.

mod aero;
mod boom;
mod empennage;
mod flexibility;
mod horizontal;
mod tube_spar;
mod vertical;

pub use aero::TailAero;
pub use boom::{
    TailBoom, TailBoomAero, TailBoomBending, TailBoomState, VerticalBoomTorsion,
};
pub use empennage::Empennage;
pub use flexibility::TailBoomFlexibility;
pub use horizontal::HorizontalTail;
pub use tube_spar::TubeSpar;
pub use vertical::VerticalTail;

use uom::si::{f64::MassDensity, mass_density::kilogram_per_cubic_meter};

use crate::support::constraint::{ConstraintModel, ConstraintSet};

use super::wing::{SparKind, Wing, WingConfig};

fn surface_config() -> WingConfig {
    WingConfig {
        stations: 3,
        taper: 0.8,
        spar: SparKind::None,
        ..WingConfig::default()
    }
}

fn surface_constraints(wing: &Wing) -> ConstraintSet {
    let mut set = wing.constraints();
    set.substitute(&wing.planform.ar, 4.0);
    if let Some(core) = &wing.core {
        set.substitute(&core.abar, 0.0548);
        set.substitute(
            &core.material.rho,
            MassDensity::new::<kilogram_per_cubic_meter>(24.0),
        );
    }
    set
}
