//! Domain models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules (`materials`,
//! `aircraft`, `spacecraft`). This organization may evolve as more models are
//! added.
//!
//! # Model structure
//!
//! A model is a struct whose public fields are the [`Variable`]s it declares
//! and the sub-models it owns. Constructors take the variables of other
//! models they couple to by reference and keep cheap clones of them, so a
//! model never owns another model's variables. Every model implements
//! [`ConstraintModel`]; a parent includes each of its children explicitly.
//!
//! Fixed values default to the figures documented on each field and can be
//! overridden with [`ConstraintSet::substitute`].
//!
//! [`Variable`]: crate::support::nomial::Variable
//! [`ConstraintModel`]: crate::support::constraint::ConstraintModel
//! [`ConstraintSet::substitute`]: crate::support::constraint::ConstraintSet::substitute

pub mod aircraft;
pub mod materials;
pub mod spacecraft;

use std::sync::LazyLock;

use uom::si::{acceleration::meter_per_second_squared, f64::Acceleration};

use crate::support::nomial::Variable;

static GRAVITY: LazyLock<Variable> = LazyLock::new(|| {
    Variable::fixed(
        "g",
        "earth surface gravitational acceleration",
        Acceleration::new::<meter_per_second_squared>(9.81),
    )
});

/// Earth surface gravitational acceleration, 9.81 m/s².
///
/// Every model refers to this one variable, so a single substitution
/// changes gravity everywhere.
#[must_use]
pub fn gravity() -> &'static Variable {
    &GRAVITY
}
