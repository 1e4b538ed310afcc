use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::positive::PositiveError;

/// Errors raised while reading, applying or evaluating a fit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FitError {
    /// A required column is absent from the fit record.
    #[error("fit record is missing field `{field}`")]
    MissingField { field: String },

    /// A column could not be parsed as a number.
    #[error("fit field `{field}` is not a number: {value:?}")]
    InvalidNumber { field: String, value: String },

    /// A count field (`d` or `K`) is zero, negative, fractional or above 10.
    #[error("fit field `{field}` must be an integer from 1 to 10, got {value}")]
    InvalidCount { field: &'static str, value: f64 },

    /// The `ftype` column names no known fit family.
    #[error("unrecognized fit type `{ftype}`")]
    UnknownFitType { ftype: String },

    /// A coefficient or softness parameter is not strictly positive.
    #[error("fit field `{field}` must be strictly positive")]
    NonPositive {
        field: String,
        #[source]
        source: PositiveError,
    },

    /// The number of independent inputs differs from the fit's `d`.
    #[error("fit expects {expected} independent variables, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Two vector-valued inputs have different lengths.
    #[error("vectorized fit inputs have mismatched lengths {expected} and {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The fit table has no row at the requested index.
    #[error("fit table has no row {index}")]
    MissingRow { index: usize },

    /// The fit table could not be read.
    #[error("failed to read fit table")]
    Csv(#[from] csv::Error),

    /// An implicit fit could not be inverted.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// Bisection on an implicit fit reached its iteration limit.
    #[error("implicit fit did not converge: residual={residual}")]
    MaxIters { residual: f64, iters: usize },
}
