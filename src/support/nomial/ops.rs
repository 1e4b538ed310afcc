//! Operator overloads between numbers, variables and nomials.
//!
//! Result types:
//!
//! | operation                         | result        |
//! |-----------------------------------|---------------|
//! | monomial-like `*` `/` monomial-like | [`Monomial`]  |
//! | `+` without signomials             | [`Posynomial`] |
//! | posynomial `*` / `/` monomial-like  | [`Posynomial`] |
//! | anything `-` anything             | [`Signomial`]  |
//! | any operation with a signomial    | [`Signomial`]  |
//!
//! Monomial-like operands are `f64`, [`Variable`], `&Variable`, [`Monomial`]
//! and `&Monomial`.

use std::ops::{Add, Div, Mul, Sub};

use super::{Monomial, Posynomial, Signomial, Variable};

/// Expands `$mac!(L, R)` for every `L` in the first list and `R` in the second.
macro_rules! cross {
    ($mac:ident; [$($lhs:ty),* $(,)?]; $rhs:tt) => {
        $( cross!(@row $mac; $lhs; $rhs); )*
    };
    (@row $mac:ident; $lhs:ty; [$($rhs:ty),* $(,)?]) => {
        $( $mac!($lhs, $rhs); )*
    };
}

macro_rules! monomial_product {
    ($lhs:ty, $rhs:ty) => {
        impl Mul<$rhs> for $lhs {
            type Output = Monomial;

            fn mul(self, rhs: $rhs) -> Monomial {
                Monomial::from(self).times(&Monomial::from(rhs))
            }
        }

        impl Div<$rhs> for $lhs {
            type Output = Monomial;

            fn div(self, rhs: $rhs) -> Monomial {
                Monomial::from(self).divide(&Monomial::from(rhs))
            }
        }
    };
}

macro_rules! posynomial_product {
    ($lhs:ty, $rhs:ty) => {
        impl Mul<$rhs> for $lhs {
            type Output = Posynomial;

            fn mul(self, rhs: $rhs) -> Posynomial {
                Posynomial::from(self).times(&Posynomial::from(rhs))
            }
        }
    };
}

macro_rules! posynomial_quotient {
    ($lhs:ty, $rhs:ty) => {
        impl Div<$rhs> for $lhs {
            type Output = Posynomial;

            fn div(self, rhs: $rhs) -> Posynomial {
                Posynomial::from(self).divide(&Monomial::from(rhs))
            }
        }
    };
}

macro_rules! posynomial_sum {
    ($lhs:ty, $rhs:ty) => {
        impl Add<$rhs> for $lhs {
            type Output = Posynomial;

            fn add(self, rhs: $rhs) -> Posynomial {
                Posynomial::from(self).plus(Posynomial::from(rhs))
            }
        }
    };
}

macro_rules! signomial_product {
    ($lhs:ty, $rhs:ty) => {
        impl Mul<$rhs> for $lhs {
            type Output = Signomial;

            fn mul(self, rhs: $rhs) -> Signomial {
                Signomial::from(self).times(&Signomial::from(rhs))
            }
        }
    };
}

macro_rules! signomial_quotient {
    ($lhs:ty, $rhs:ty) => {
        impl Div<$rhs> for $lhs {
            type Output = Signomial;

            fn div(self, rhs: $rhs) -> Signomial {
                Signomial::from(self).divide(&Monomial::from(rhs))
            }
        }
    };
}

macro_rules! signomial_sum {
    ($lhs:ty, $rhs:ty) => {
        impl Add<$rhs> for $lhs {
            type Output = Signomial;

            fn add(self, rhs: $rhs) -> Signomial {
                Signomial::from(self).plus(Signomial::from(rhs))
            }
        }
    };
}

macro_rules! signomial_difference {
    ($lhs:ty, $rhs:ty) => {
        impl Sub<$rhs> for $lhs {
            type Output = Signomial;

            fn sub(self, rhs: $rhs) -> Signomial {
                Signomial::from(self).plus(Signomial::from(rhs).negate())
            }
        }
    };
}

// Monomial-like with monomial-like.
cross!(monomial_product; [Variable, &Variable, Monomial, &Monomial];
    [f64, Variable, &Variable, Monomial, &Monomial]);
cross!(monomial_product; [f64]; [Variable, &Variable, Monomial, &Monomial]);

// Posynomial products and quotients.
cross!(posynomial_product; [Posynomial];
    [f64, Variable, &Variable, Monomial, &Monomial, Posynomial]);
cross!(posynomial_product; [f64, Variable, &Variable, Monomial, &Monomial]; [Posynomial]);
cross!(posynomial_quotient; [Posynomial]; [f64, Variable, &Variable, Monomial, &Monomial]);

// Sums without signomials.
cross!(posynomial_sum; [Variable, &Variable, Monomial, &Monomial, Posynomial];
    [f64, Variable, &Variable, Monomial, &Monomial, Posynomial]);
cross!(posynomial_sum; [f64]; [Variable, &Variable, Monomial, &Monomial, Posynomial]);

// Anything involving a signomial.
cross!(signomial_product; [Signomial];
    [f64, Variable, &Variable, Monomial, &Monomial, Posynomial, Signomial]);
cross!(signomial_product; [f64, Variable, &Variable, Monomial, &Monomial, Posynomial];
    [Signomial]);
cross!(signomial_quotient; [Signomial]; [f64, Variable, &Variable, Monomial, &Monomial]);
cross!(signomial_sum; [Signomial];
    [f64, Variable, &Variable, Monomial, &Monomial, Posynomial, Signomial]);
cross!(signomial_sum; [f64, Variable, &Variable, Monomial, &Monomial, Posynomial];
    [Signomial]);

// Differences.
cross!(signomial_difference; [Variable, &Variable, Monomial, &Monomial, Posynomial, Signomial];
    [f64, Variable, &Variable, Monomial, &Monomial, Posynomial, Signomial]);
cross!(signomial_difference; [f64];
    [Variable, &Variable, Monomial, &Monomial, Posynomial, Signomial]);
