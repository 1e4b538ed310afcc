use uom::si::f64::Length;

use crate::{
    models::aircraft::{
        wing::{Wing, WingConfig},
        FlightState,
    },
    support::{
        constraint::{ConstraintModel, ConstraintSet},
        fit::FitError,
        modular::PhysicalComponent,
        nomial::Variable,
    },
};

use super::{surface_config, surface_constraints, TailAero};

/// Vertical stabilizer: a small foam-filled wing without a spar.
#[derive(Debug, Clone)]
pub struct VerticalTail {
    pub wing: Wing,
    /// Vertical tail volume coefficient.
    pub vv: Variable,
    /// Vertical tail moment arm.
    pub lv: Variable,
}

impl VerticalTail {
    /// A three-station tail with 0.8 taper.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(surface_config())
    }

    #[must_use]
    pub fn with_config(config: WingConfig) -> Self {
        Self {
            wing: Wing::with_config(config),
            vv: Variable::dimensionless("Vv", "vertical tail volume coefficient"),
            lv: Variable::free::<Length>("lv", "vertical tail moment arm"),
        }
    }
}

impl Default for VerticalTail {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for VerticalTail {
    fn constraints(&self) -> ConstraintSet {
        surface_constraints(&self.wing)
    }
}

impl PhysicalComponent for VerticalTail {
    type State = [FlightState];
    type Performance = TailAero;
    type Error = FitError;

    fn flight_model(&self, state: &[FlightState]) -> Result<TailAero, FitError> {
        TailAero::new(&self.wing.planform, state)
    }
}
