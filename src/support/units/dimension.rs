use std::{
    fmt,
    ops::{Div, Mul},
};

const SYMBOLS: [&str; 7] = ["m", "kg", "s", "A", "K", "mol", "cd"];

/// Tolerance used when comparing fractional exponents.
const EXPONENT_TOL: f64 = 1e-9;

/// Exponents of the seven SI base dimensions.
///
/// The order is length, mass, time, electric current, thermodynamic
/// temperature, amount of substance and luminous intensity.
/// Exponents are real-valued because posynomial fits routinely raise
/// dimensional quantities to fractional powers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension([f64; 7]);

impl Dimension {
    /// The dimension of a pure number.
    pub const DIMENSIONLESS: Self = Self([0.0; 7]);

    #[must_use]
    pub const fn new(exponents: [f64; 7]) -> Self {
        Self(exponents)
    }

    #[must_use]
    pub fn exponents(&self) -> [f64; 7] {
        self.0
    }

    /// Raises the dimension to a real power.
    #[must_use]
    pub fn powf(self, exponent: f64) -> Self {
        Self(self.0.map(|e| e * exponent))
    }

    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.approx_eq(&Self::DIMENSIONLESS)
    }

    /// Compares two dimensions, tolerating round-off in fractional exponents.
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= EXPONENT_TOL)
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (e, r) in out.iter_mut().zip(rhs.0) {
            *e += r;
        }
        Self(out)
    }
}

impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self * rhs.powf(-1.0)
    }
}

/// Formats as SI base units, e.g. `kg/(m·s^2)`, or `-` when dimensionless.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("-");
        }

        let factor = |symbol: &str, exponent: f64| {
            if (exponent - 1.0).abs() <= EXPONENT_TOL {
                symbol.to_string()
            } else {
                format!("{symbol}^{}", round_exponent(exponent))
            }
        };

        let numerator: Vec<String> = SYMBOLS
            .iter()
            .zip(self.0)
            .filter(|(_, e)| *e > EXPONENT_TOL)
            .map(|(s, e)| factor(s, e))
            .collect();
        let denominator: Vec<String> = SYMBOLS
            .iter()
            .zip(self.0)
            .filter(|(_, e)| *e < -EXPONENT_TOL)
            .map(|(s, e)| factor(s, -e))
            .collect();

        let numerator = if numerator.is_empty() {
            "1".to_string()
        } else {
            numerator.join("·")
        };

        match denominator.len() {
            0 => f.write_str(&numerator),
            1 => write!(f, "{numerator}/{}", denominator[0]),
            _ => write!(f, "{numerator}/({})", denominator.join("·")),
        }
    }
}

fn round_exponent(exponent: f64) -> f64 {
    (exponent * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let density = Dimension::new([-3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(density.to_string(), "kg/m^3");

        let pressure = Dimension::new([-1.0, 1.0, -2.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(pressure.to_string(), "kg/(m·s^2)");

        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "-");

        let rate = Dimension::new([0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(rate.to_string(), "1/s");
    }

    #[test]
    fn fractional_powers_recombine() {
        let force = Dimension::new([1.0, 1.0, -2.0, 0.0, 0.0, 0.0, 0.0]);
        let combined = force.powf(0.922) * force.powf(0.078);
        assert!(combined.approx_eq(&force));
        assert!((force / force).is_dimensionless());
    }
}
