//! Solvers for assembled programs.
//!
//! [`GpSolver`] handles programs whose constraints are all posynomial
//! inequalities or monomial equalities. [`SpSolver`] handles signomial
//! constraints by solving a sequence of local GP approximations, and
//! defers to [`GpSolver`] when none are present.

mod error;
mod gp;
mod solution;
mod sp;

pub use error::SolveError;
pub use gp::{GpSolver, GpSolverConfig};
pub use solution::{ReadoutError, Solution};
pub use sp::{SpSolver, SpSolverConfig};

use crate::support::program::Program;

/// Finds the optimum of a [`Program`].
pub trait Solver {
    /// Solves `program`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] if the program is infeasible, unbounded or
    /// outside the class this solver handles, or if the numerics fail.
    fn solve(&self, program: &Program) -> Result<Solution, SolveError>;
}
