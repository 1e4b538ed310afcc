//! Building blocks shared by the models in this crate.
//!
//! The layers build on each other in this order:
//!
//! - [`units`] and [`positive`]: SI dimension bookkeeping and positivity.
//! - [`nomial`]: variables and the monomial, posynomial and signomial algebra.
//! - [`constraint`]: tagged constraints, constraint sets and substitutions.
//! - [`fit`]: turning stored curve fits into constraints.
//! - [`program`] and [`solve`]: validating an assembled program and solving it.
//! - [`modular`] and [`taylor`]: helpers for writing models.

pub mod constraint;
pub mod fit;
pub mod modular;
pub mod nomial;
pub mod positive;
pub mod program;
pub mod solve;
pub mod taylor;
pub mod units;
