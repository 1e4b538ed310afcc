//! Monomials, posynomials and signomials over positive variables.
//!
//! These are the algebraic building blocks of every model in this crate.
//! A [`Variable`] is a named positive real with a [`Dimension`] and an
//! optional fixed value; arithmetic on variables builds up:
//!
//! - [`Monomial`]: `c · Π xᵢ^aᵢ`
//! - [`Posynomial`]: a sum of monomials with positive coefficients
//! - [`Signomial`]: a sum of monomials with coefficients of either sign
//!
//! The operator overloads pick the narrowest result type, so products and
//! quotients of monomials stay monomials, sums become posynomials, and any
//! subtraction yields a signomial.
//!
//! ```
//! use gp_models::support::nomial::{Monomial, Posynomial, Variable};
//! use gp_models::support::units::SiQuantity;
//! use uom::si::f64::{Area, Length};
//!
//! let b = Variable::free::<Length>("b", "span");
//! let s = Variable::free::<Area>("S", "surface area");
//! let ar = Variable::dimensionless("AR", "aspect ratio");
//!
//! let chord: Monomial = &s / &b;
//! let drag: Posynomial = 0.01 + &ar * 0.02;
//! assert_eq!(drag.len(), 2);
//! assert!(chord.dimension().approx_eq(&Length::dimension()));
//! ```
//!
//! [`Dimension`]: crate::support::units::Dimension

mod monomial;
mod ops;
mod posynomial;
mod signomial;
mod variable;

pub use monomial::Monomial;
pub use posynomial::Posynomial;
pub use signomial::Signomial;
pub use variable::Variable;
