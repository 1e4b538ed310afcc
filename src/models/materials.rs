//! Material property sets.
//!
//! Materials declare fixed properties only and contribute no constraints of
//! their own. Structural models own an instance of each material they use,
//! so overriding a property (e.g. the density of one wing's foam) never
//! affects other models.

mod composite;
mod foam;

pub use composite::{CfrpFabric, CfrpUd, Kevlar};
pub use foam::{FoamHd, FoamLd};
