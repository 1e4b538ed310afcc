//! Aircraft subsystem models.
//!
//! Static models ([`wing::Wing`], [`fuselage::Fuselage`], [`motor::Motor`],
//! …) declare the geometry and weight of a component. Their performance
//! models take a [`FlightState`] (or one per flight segment) and add the
//! aerodynamic or power relations that hold in that state.

pub mod beam;
pub mod engine;
mod flight_state;
pub mod fuselage;
pub mod mission;
pub mod motor;
pub mod prop;
pub mod simple_ac;
pub mod tail;
pub mod wing;

pub use flight_state::{FlightCondition, FlightState};
