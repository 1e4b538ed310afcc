//! Separating physical components from the conditions they operate in.
//!
//! A [`PhysicalComponent`] declares properties that do not change during
//! operation (dimensions, empty weight, material). A [`PerformanceModel`]
//! analyses one component in a given state (a flight condition, a mission
//! phase) using the component's variables plus its own. One component can be
//! analysed in any number of states, which is how a single wing is sized
//! against cruise, climb and gust cases at once.

use crate::support::constraint::ConstraintModel;

/// A component with fixed properties.
pub trait PhysicalComponent: ConstraintModel {
    /// The operating condition a performance model is built for.
    type State: ?Sized;

    /// The model analysing this component in a state.
    type Performance: PerformanceModel;

    /// Error raised while building the performance model.
    type Error;

    /// Builds the performance model of this component in `state`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the performance model cannot be built, for
    /// example when a bundled fit fails to load.
    fn flight_model(&self, state: &Self::State) -> Result<Self::Performance, Self::Error>;
}

/// Constraints on the behavior of a component in one state.
pub trait PerformanceModel: ConstraintModel {}

/// Builds one performance model per state.
///
/// # Errors
///
/// Returns the first error raised by [`PhysicalComponent::flight_model`].
pub fn flight_models<C>(
    component: &C,
    states: &[C::State],
) -> Result<Vec<C::Performance>, C::Error>
where
    C: PhysicalComponent,
    C::State: Sized,
{
    states
        .iter()
        .map(|state| component.flight_model(state))
        .collect()
}
