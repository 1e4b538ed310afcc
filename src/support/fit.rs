//! Empirical curve fits as GP-compatible constraints.
//!
//! Many relations in a sizing model are not first-principles physics but
//! fits to data: airfoil drag polars, engine fuel-consumption curves, weight
//! trends. Fits are stored as rows of a table (see [`FitRecord`]) in one of
//! three log-convex families:
//!
//! - `MA` (max-affine): `w = max_k c_k Π u_i^{e_k,i}`
//! - `SMA` (softmax-affine): `w^α = Σ_k c_k Π u_i^{e_k,i}`
//! - `ISMA` (implicit softmax-affine): `1 = Σ_k c_k Π u_i^{e_k,i} w^{-α_k}`
//!
//! [`FitConstraintSet`] turns a record plus a dependent operand and `d`
//! independent operands into constraints bounding the dependent operand from
//! below, which is exact at the optimum whenever the optimizer wants the
//! dependent quantity small. Operands may be vectors (one element per
//! operating point) mixed with scalars, which are broadcast.
//!
//! [`FitFunction`] evaluates a record directly.

mod builder;
mod error;
mod function;
mod record;
mod table;

pub use builder::{ErrorMargin, FitConstraintSet, FitInput, OutOfBounds};
pub use error::FitError;
pub use function::{FitFunction, FitFunctionConfig};
pub use record::{FitKind, FitRecord, FitTerm};
pub use table::read_table;
