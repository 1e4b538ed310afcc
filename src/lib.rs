//! # GP Models
//!
//! Engineering sizing models for aircraft and spacecraft subsystems,
//! expressed as geometric and signomial programs.
//!
//! Each model declares positive variables with physical units and the
//! constraints relating them: weight build-ups, beam bending, drag polars,
//! power and torque curves. Models compose by nesting, and the assembled
//! constraint set is handed to a solver that finds a feasible design point
//! minimizing a chosen cost.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain models (materials, aircraft subsystems, spacecraft).
//! - [`support`]: The modeling toolkit the models are written with.
//!
//! ## Example
//!
//! ```
//! use gp_models::support::{
//!     constraint::{ConstraintSet, Relate},
//!     nomial::Variable,
//!     program::Program,
//!     solve::{GpSolver, Solver},
//! };
//!
//! let x = Variable::dimensionless("x", "");
//! let y = Variable::dimensionless("y", "");
//! let set = ConstraintSet::from([(&x * &y).geq(4.0)]);
//!
//! let program = Program::new(&x + &y, set).unwrap();
//! let solution = GpSolver::default().solve(&program).unwrap();
//! assert!((solution.cost() - 4.0).abs() < 1e-4);
//! ```
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code in this crate follows a natural progression as needs emerge:
//!
//! 1. **Model-specific**: Starts next to the model that needs it
//! 2. **Domain-specific**: If useful across models in a domain (e.g., `aircraft`),
//!    it moves to a domain-level module
//! 3. **Crate-level**: If useful across multiple domains or potentially useful
//!    outside this crate, it moves to [`support`]

pub mod models;
pub mod support;
