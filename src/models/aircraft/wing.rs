//! Wing models.
//!
//! A [`Wing`] owns a [`Planform`] and the structural components selected by
//! its [`WingConfig`]: a skin, a spar and a foam core, optionally with
//! secondary structure. Its weight is the margined sum of the component
//! weights.
//!
//! The remaining models analyse a wing in a state: [`WingAero`] adds drag
//! over any number of flight segments, while [`SparLoading`] and
//! [`GustLoading`] size the spar against distributed lift.
//!
//! ```
//! use gp_models::{
//!     models::aircraft::{wing::Wing, FlightState},
//!     support::modular::PhysicalComponent,
//! };
//!
//! let wing = Wing::new();
//! let cruise = FlightState::segments(&[Default::default(), Default::default()]);
//! let aero = wing.flight_model(&cruise).unwrap();
//! assert_eq!(aero.cd.len(), 2);
//! ```

mod aero;
mod box_spar;
mod cap_spar;
mod fill;
mod gust;
mod loading;
mod planform;
mod skin;
mod sp;

pub use aero::WingAero;
pub use box_spar::BoxSpar;
pub use cap_spar::CapSpar;
pub use fill::WingCore;
pub use gust::GustLoading;
pub use loading::SparLoading;
pub use planform::Planform;
pub use skin::{WingSecondStruct, WingSkin};
pub use sp::{SpWing, TorsionBoxSpar};

use uom::si::f64::Force;

use crate::{
    models::{
        aircraft::FlightState,
        materials::{CfrpFabric, CfrpUd},
    },
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        fit::FitError,
        modular::PhysicalComponent,
        nomial::{Posynomial, Variable},
    },
};

/// Which spar a wing carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SparKind {
    None,
    #[default]
    Cap,
    Box,
    /// A box spar that also carries torsion. Adds signomial constraints.
    TorsionBox,
}

/// Options for building a [`Wing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingConfig {
    /// Number of spanwise stations.
    pub stations: usize,
    /// Tip chord over root chord.
    pub taper: f64,
    pub spar: SparKind,
    pub skin: bool,
    /// Whether to fill the airfoil with foam.
    pub core: bool,
    /// Whether to add secondary structure weight.
    pub secondary: bool,
}

impl Default for WingConfig {
    fn default() -> Self {
        Self {
            stations: 5,
            taper: 0.5,
            spar: SparKind::Cap,
            skin: true,
            core: true,
            secondary: false,
        }
    }
}

/// The spar of a wing.
#[derive(Debug, Clone)]
pub enum Spar {
    Cap(CapSpar),
    Box(BoxSpar),
    TorsionBox(TorsionBoxSpar),
}

impl Spar {
    fn new(kind: SparKind, surface: &Planform) -> Option<Self> {
        match kind {
            SparKind::None => None,
            SparKind::Cap => Some(Self::Cap(CapSpar::new(surface))),
            SparKind::Box => Some(Self::Box(BoxSpar::new(surface))),
            SparKind::TorsionBox => Some(Self::TorsionBox(TorsionBoxSpar::new(surface))),
        }
    }

    /// Spar weight.
    #[must_use]
    pub fn w(&self) -> &Variable {
        match self {
            Self::Cap(spar) => &spar.w,
            Self::Box(spar) => &spar.w,
            Self::TorsionBox(spar) => &spar.spar.w,
        }
    }

    /// Bending moment of inertia of each panel.
    #[must_use]
    pub fn i(&self) -> &[Variable] {
        match self {
            Self::Cap(spar) => &spar.i,
            Self::Box(spar) => &spar.i,
            Self::TorsionBox(spar) => &spar.spar.i,
        }
    }

    /// Section modulus of each panel.
    #[must_use]
    pub fn sy(&self) -> &[Variable] {
        match self {
            Self::Cap(spar) => &spar.sy,
            Self::Box(spar) => &spar.sy,
            Self::TorsionBox(spar) => &spar.spar.sy,
        }
    }

    /// The cap material, which carries bending.
    #[must_use]
    pub fn material(&self) -> &CfrpUd {
        match self {
            Self::Cap(spar) => &spar.material,
            Self::Box(spar) => &spar.material,
            Self::TorsionBox(spar) => &spar.spar.material,
        }
    }

    /// The web material, which carries shear and torsion.
    #[must_use]
    pub fn shear_material(&self) -> &CfrpFabric {
        match self {
            Self::Cap(spar) => &spar.shear_material,
            Self::Box(spar) => &spar.shear_material,
            Self::TorsionBox(spar) => &spar.spar.shear_material,
        }
    }

    /// Polar moment of inertia of each panel, if the spar carries torsion.
    #[must_use]
    pub fn j(&self) -> Option<&[Variable]> {
        match self {
            Self::TorsionBox(spar) => Some(&spar.j),
            _ => None,
        }
    }
}

impl ConstraintModel for Spar {
    fn constraints(&self) -> ConstraintSet {
        match self {
            Self::Cap(spar) => spar.constraints(),
            Self::Box(spar) => spar.constraints(),
            Self::TorsionBox(spar) => spar.constraints(),
        }
    }
}

/// A lifting surface with its structure.
#[derive(Debug, Clone)]
pub struct Wing {
    /// Wing weight.
    pub w: Variable,
    /// Weight margin factor, 1.2.
    pub mfac: Variable,
    pub planform: Planform,
    pub skin: Option<WingSkin>,
    pub spar: Option<Spar>,
    pub core: Option<WingCore>,
    pub secondary: Option<WingSecondStruct>,
}

impl Wing {
    /// A five-station wing with a cap spar, skin and foam core.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WingConfig::default())
    }

    #[must_use]
    pub fn with_config(config: WingConfig) -> Self {
        let planform = Planform::new(config.stations, config.taper);
        Self {
            w: Variable::free::<Force>("W", "wing weight"),
            mfac: Variable::fixed("mfac", "wing weight margin factor", 1.2),
            skin: config.skin.then(|| WingSkin::new(&planform)),
            spar: Spar::new(config.spar, &planform),
            core: config.core.then(|| WingCore::new(&planform)),
            secondary: config.secondary.then(|| WingSecondStruct::new(&planform)),
            planform,
        }
    }

    /// Number of spanwise stations.
    #[must_use]
    pub fn stations(&self) -> usize {
        self.planform.stations()
    }

    /// The weights of the components present.
    fn component_weights(&self) -> impl Iterator<Item = &Variable> {
        self.skin
            .as_ref()
            .map(|c| &c.w)
            .into_iter()
            .chain(self.spar.as_ref().map(Spar::w))
            .chain(self.core.as_ref().map(|c| &c.w))
            .chain(self.secondary.as_ref().map(|c| &c.w))
    }

    /// Spar bending under distributed lift.
    ///
    /// Returns `None` for a wing without a spar.
    #[must_use]
    pub fn spar_loading(&self, state: &FlightState) -> Option<SparLoading> {
        SparLoading::new(self, state)
    }

    /// Spar bending with gust-augmented lift.
    ///
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled gust fit fails to load.
    pub fn gust_loading(&self, state: &FlightState) -> Result<Option<GustLoading>, FitError> {
        GustLoading::new(self, state)
    }
}

impl Default for Wing {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for Wing {
    fn constraints(&self) -> ConstraintSet {
        let components: Posynomial = self.component_weights().sum();

        let mut set = ConstraintSet::new();
        if !components.is_empty() {
            set.push((&self.w / &self.mfac).geq(components));
        }
        set.include_model(&self.planform);
        if let Some(skin) = &self.skin {
            set.include_model(skin);
        }
        if let Some(spar) = &self.spar {
            set.include_model(spar);
        }
        if let Some(core) = &self.core {
            set.include_model(core);
        }
        if let Some(secondary) = &self.secondary {
            set.include_model(secondary);
        }
        set
    }
}

impl PhysicalComponent for Wing {
    type State = [FlightState];
    type Performance = WingAero;
    type Error = FitError;

    fn flight_model(&self, state: &[FlightState]) -> Result<WingAero, FitError> {
        WingAero::new(&self.planform, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::slice;

    use uom::si::force::{newton, pound_force};

    use crate::support::{
        constraint::ConstraintKind,
        nomial::Monomial,
        program::Program,
        solve::{GpSolver, Solution, Solver},
    };

    /// Minimum drag of a 50 lbf wing that lifts its own weight under gust
    /// loading, with the spar sized for a 100 lbf load.
    fn min_drag(
        wing: &Wing,
        state: &FlightState,
        lift_pressure: fn(&FlightState) -> Monomial,
    ) -> (Solution, WingAero) {
        let aero = wing.flight_model(slice::from_ref(state)).unwrap();
        let loading = wing.spar_loading(state).unwrap();
        let gust = wing.gust_loading(state).unwrap().unwrap();

        let mut set = ConstraintSet::from([
            gust.v.equals(&state.v),
            gust.cl.equals(&aero.cl[0]),
            gust.ww.equals(&wing.w),
            gust.ww.leq(lift_pressure(state) * &aero.cl[0] * &wing.planform.s),
        ]);
        set.include_model(wing)
            .include_model(state)
            .include_model(&aero)
            .include_model(&loading)
            .include_model(&gust)
            .substitute(&wing.w, Force::new::<pound_force>(50.0))
            .substitute(&wing.planform.tau, 0.115)
            .substitute(&loading.w, Force::new::<pound_force>(100.0))
            .substitute(&gust.loading.w, Force::new::<pound_force>(100.0));

        let program = Program::new(&aero.cd[0], set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();
        (solution, aero)
    }

    fn check_min_drag(wing: &Wing, lift_pressure: fn(&FlightState) -> Monomial) {
        let state = FlightState::default();
        let (solution, aero) = min_drag(wing, &state, lift_pressure);

        let cd = solution.value(&aero.cd[0]).unwrap();
        let cl = solution.value(&aero.cl[0]).unwrap();
        let ar = solution.value(&wing.planform.ar).unwrap();
        let area = solution.value(&wing.planform.s).unwrap();
        assert!(cd > 0.0 && cd < 0.05, "cd = {cd}");
        assert!(cd > cl.powi(2) / (std::f64::consts::PI * ar * 0.9) * (1.0 - 1e-6));
        assert!(area > 0.0);

        let weight = Force::new::<pound_force>(50.0).get::<newton>();
        let lift = solution
            .evaluate(lift_pressure(&state) * &aero.cl[0] * &wing.planform.s)
            .unwrap();
        assert!(lift >= weight * (1.0 - 1e-4), "lift = {lift}");
    }

    #[test]
    #[ignore = "solves a full wing with gust loading, slow in debug builds"]
    fn cap_spar_wing_carries_its_weight_at_min_drag() {
        check_min_drag(&Wing::new(), |state| 0.5 * &state.rho * state.v.pow(2.0));
    }

    #[test]
    #[ignore = "solves a full wing with gust loading, slow in debug builds"]
    fn box_spar_wing_carries_its_weight_at_min_drag() {
        let wing = Wing::with_config(WingConfig {
            spar: SparKind::Box,
            ..WingConfig::default()
        });
        check_min_drag(&wing, |state| Monomial::from(&state.qne));
    }

    #[test]
    fn default_wing_is_a_geometric_program() {
        let wing = Wing::new();
        assert_eq!(wing.stations(), 5);
        assert!(matches!(wing.spar, Some(Spar::Cap(_))));
        assert!(wing.secondary.is_none());
        assert_eq!(wing.component_weights().count(), 3);
        assert!(wing.constraints().is_gp());
    }

    #[test]
    fn torsion_box_spar_makes_a_signomial_program() {
        let wing = Wing::with_config(WingConfig {
            spar: SparKind::TorsionBox,
            secondary: true,
            ..WingConfig::default()
        });
        let set = wing.constraints();

        assert!(!set.is_gp());
        assert_eq!(set.count(ConstraintKind::Signomial), 4);
        assert_eq!(wing.spar.as_ref().and_then(Spar::j).map(<[_]>::len), Some(4));
        assert_eq!(wing.component_weights().count(), 4);
    }

    #[test]
    fn bare_planform_has_no_weight_constraint() {
        let wing = Wing::with_config(WingConfig {
            spar: SparKind::None,
            skin: false,
            core: false,
            ..WingConfig::default()
        });
        assert!(wing.spar_loading(&FlightState::default()).is_none());
        assert_eq!(wing.constraints().len(), wing.planform.constraints().len());
    }
}
