use thiserror::Error;

/// Errors raised by a solver.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SolveError {
    /// A GP solver was handed signomial constraints.
    #[error("program has {count} signomial constraints; use a signomial solver")]
    NotGeometric { count: usize },

    /// No point satisfies every constraint.
    ///
    /// `violation` is the smallest factor by which the worst constraint is
    /// exceeded over the points explored.
    #[error("program is infeasible: constraints exceeded by a factor of {violation}")]
    Infeasible { violation: f64 },

    /// The cost decreases without bound as a variable goes to zero or infinity.
    #[error("program is unbounded in `{variable}`")]
    Unbounded { variable: String },

    /// Linear algebra failed or the iteration limit was reached.
    #[error("numerical failure: {reason}")]
    Numerical { reason: String },

    /// A signomial constraint has no positive side to condense.
    #[error("signomial constraint can never hold: {constraint}")]
    DegenerateSignomial { constraint: String },

    /// The sequence of GP approximations did not settle.
    #[error("signomial solve did not converge in {iterations} iterations (last change {change})")]
    SpNotConverged { iterations: usize, change: f64 },

    /// A GP approximation failed during a signomial solve.
    #[error("GP approximation {iteration} failed")]
    SpIteration {
        iteration: usize,
        #[source]
        source: Box<SolveError>,
    },
}
