use std::collections::{BTreeMap, HashMap};

use crate::support::positive::Positive;

use super::FitError;

/// The family of a fitted relation.
#[derive(Debug, Clone, PartialEq)]
pub enum FitKind {
    /// Max-affine: `w = max_k c_k Π u_i^{e_k,i}`.
    MaxAffine,

    /// Softmax-affine: `w^α = Σ_k c_k Π u_i^{e_k,i}`.
    SoftmaxAffine { alpha: Positive<f64> },

    /// Implicit softmax-affine: `1 = Σ_k c_k Π u_i^{e_k,i} w^{-α_k}`.
    ImplicitSoftmaxAffine { alpha: Vec<Positive<f64>> },
}

impl FitKind {
    /// The `ftype` tag used in fit tables.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MaxAffine => "MA",
            Self::SoftmaxAffine { .. } => "SMA",
            Self::ImplicitSoftmaxAffine { .. } => "ISMA",
        }
    }
}

/// One monomial piece `c_k Π u_i^{e_k,i}` of a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitTerm {
    pub coefficient: Positive<f64>,
    pub exponents: Vec<f64>,
}

/// A fitted relation `w = f(u_1, …, u_d)` read from a fit table.
///
/// Records are validated on construction and never change afterwards.
/// The input bounds and error statistics are metadata: they are reported by
/// [`FitConstraintSet::check_bounds`](super::FitConstraintSet::check_bounds)
/// and used for error margins, never enforced as constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct FitRecord {
    kind: FitKind,
    terms: Vec<FitTerm>,
    lower_bounds: Vec<Option<f64>>,
    upper_bounds: Vec<Option<f64>>,
    rms_err: Option<f64>,
    max_err: Option<f64>,
}

impl FitRecord {
    /// Parses a record from its columns.
    ///
    /// Required columns are `ftype`, `d`, `K`, `c{k}` and `e{k}{i}`, plus
    /// `a1` for `SMA` fits and `a1`…`aK` for `ISMA` fits. The columns
    /// `lb{i}`, `ub{i}`, `rms_err` and `max_err` are optional. Columns are
    /// trimmed; empty optional columns count as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`FitError`] if a required column is missing or malformed,
    /// the fit type is unknown, or a coefficient is not positive.
    pub fn from_fields<K, V>(fields: &HashMap<K, V>) -> Result<Self, FitError>
    where
        K: AsRef<str> + Eq + std::hash::Hash,
        V: AsRef<str>,
    {
        let columns: BTreeMap<&str, &str> = fields
            .iter()
            .map(|(k, v)| (k.as_ref().trim(), v.as_ref().trim()))
            .collect();
        Fields(columns).parse()
    }

    #[must_use]
    pub fn kind(&self) -> &FitKind {
        &self.kind
    }

    #[must_use]
    pub fn terms(&self) -> &[FitTerm] {
        &self.terms
    }

    /// Number of independent variables.
    #[must_use]
    pub fn d(&self) -> usize {
        self.lower_bounds.len()
    }

    /// Number of terms.
    #[must_use]
    pub fn k(&self) -> usize {
        self.terms.len()
    }

    /// Lower bound of the fitted domain along input `i`, if recorded.
    #[must_use]
    pub fn lower_bound(&self, i: usize) -> Option<f64> {
        self.lower_bounds.get(i).copied().flatten()
    }

    /// Upper bound of the fitted domain along input `i`, if recorded.
    #[must_use]
    pub fn upper_bound(&self, i: usize) -> Option<f64> {
        self.upper_bounds.get(i).copied().flatten()
    }

    #[must_use]
    pub fn rms_err(&self) -> Option<f64> {
        self.rms_err
    }

    #[must_use]
    pub fn max_err(&self) -> Option<f64> {
        self.max_err
    }
}

/// Exponent columns `e{k}{i}` are only unambiguous for single-digit indices.
const MAX_COUNT: f64 = 10.0;

struct Fields<'a>(BTreeMap<&'a str, &'a str>);

impl Fields<'_> {
    fn parse(&self) -> Result<FitRecord, FitError> {
        let ftype = self.text("ftype")?;
        let d = self.count("d")?;
        let k = self.count("K")?;

        let terms = (0..k)
            .map(|k| -> Result<FitTerm, FitError> {
                Ok(FitTerm {
                    coefficient: self.positive(&format!("c{k}"))?,
                    exponents: (0..d)
                        .map(|i| self.number(&format!("e{k}{i}")))
                        .collect::<Result<_, FitError>>()?,
                })
            })
            .collect::<Result<Vec<_>, FitError>>()?;

        let kind = match ftype {
            "MA" => FitKind::MaxAffine,
            "SMA" => FitKind::SoftmaxAffine {
                alpha: self.positive("a1")?,
            },
            "ISMA" => FitKind::ImplicitSoftmaxAffine {
                alpha: (1..=k)
                    .map(|k| self.positive(&format!("a{k}")))
                    .collect::<Result<_, FitError>>()?,
            },
            other => {
                return Err(FitError::UnknownFitType {
                    ftype: other.to_string(),
                });
            }
        };

        Ok(FitRecord {
            kind,
            terms,
            lower_bounds: (0..d)
                .map(|i| self.optional(&format!("lb{i}")))
                .collect::<Result<_, FitError>>()?,
            upper_bounds: (0..d)
                .map(|i| self.optional(&format!("ub{i}")))
                .collect::<Result<_, FitError>>()?,
            rms_err: self.optional("rms_err")?,
            max_err: self.optional("max_err")?,
        })
    }

    fn text(&self, field: &str) -> Result<&str, FitError> {
        self.0
            .get(field)
            .copied()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| FitError::MissingField {
                field: field.to_string(),
            })
    }

    fn number(&self, field: &str) -> Result<f64, FitError> {
        let text = self.text(field)?;
        text.parse().map_err(|_| FitError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        })
    }

    fn optional(&self, field: &str) -> Result<Option<f64>, FitError> {
        match self.0.get(field) {
            Some(v) if !v.is_empty() => self.number(field).map(Some),
            _ => Ok(None),
        }
    }

    fn positive(&self, field: &str) -> Result<Positive<f64>, FitError> {
        Positive::new(self.number(field)?).map_err(|source| FitError::NonPositive {
            field: field.to_string(),
            source,
        })
    }

    /// Counts are stored as floats by some fit tools (`2.0`).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn count(&self, field: &'static str) -> Result<usize, FitError> {
        let value = self.number(field)?;
        if value < 1.0 || value.fract() != 0.0 || value > MAX_COUNT {
            return Err(FitError::InvalidCount { field, value });
        }
        Ok(value as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn parses_max_affine_without_metadata() {
        let record = FitRecord::from_fields(&fields(&[
            ("ftype", "MA"),
            ("d", "1"),
            ("K", "2"),
            ("e00", "1.0"),
            ("e10", "0.5"),
            ("c0", "1.0"),
            ("c1", "2.0"),
        ]))
        .unwrap();

        assert_eq!(record.kind(), &FitKind::MaxAffine);
        assert_eq!(record.d(), 1);
        assert_eq!(record.k(), 2);
        assert_relative_eq!(record.terms()[1].exponents[0], 0.5);
        assert_relative_eq!(record.terms()[1].coefficient.into_inner(), 2.0);
        assert!(record.lower_bound(0).is_none());
        assert!(record.rms_err().is_none());
    }

    #[test]
    fn parses_softmax_with_bounds() {
        let record = FitRecord::from_fields(&fields(&[
            ("ftype", " SMA "),
            ("d", "1.0"),
            ("K", "1"),
            ("e00", "0.77"),
            ("c0", "1.28"),
            ("a1", "1.0"),
            ("rms_err", "0.01"),
            ("max_err", "0.02"),
            ("lb0", "0.1"),
            ("ub0", "10.0"),
        ]))
        .unwrap();

        assert_eq!(record.kind().tag(), "SMA");
        assert_eq!(record.lower_bound(0), Some(0.1));
        assert_eq!(record.upper_bound(0), Some(10.0));
        assert_eq!(record.max_err(), Some(0.02));
    }

    #[test]
    fn implicit_softmax_needs_one_alpha_per_term() {
        let mut f = fields(&[
            ("ftype", "ISMA"),
            ("d", "1"),
            ("K", "2"),
            ("e00", "1"),
            ("e10", "-1"),
            ("c0", "1"),
            ("c1", "1"),
            ("a1", "1"),
        ]);
        assert!(matches!(
            FitRecord::from_fields(&f),
            Err(FitError::MissingField { field }) if field == "a2"
        ));

        f.insert("a2".into(), "2".into());
        let record = FitRecord::from_fields(&f).unwrap();
        assert!(matches!(
            record.kind(),
            FitKind::ImplicitSoftmaxAffine { alpha } if alpha.len() == 2
        ));
    }

    #[test]
    fn rejects_bad_records() {
        let unknown = fields(&[("ftype", "GP"), ("d", "1"), ("K", "1"), ("e00", "1"), ("c0", "1")]);
        assert!(matches!(
            FitRecord::from_fields(&unknown),
            Err(FitError::UnknownFitType { ftype }) if ftype == "GP"
        ));

        let missing = fields(&[("ftype", "MA"), ("d", "1"), ("K", "1"), ("c0", "1")]);
        assert!(matches!(
            FitRecord::from_fields(&missing),
            Err(FitError::MissingField { field }) if field == "e00"
        ));

        let garbled = fields(&[("ftype", "MA"), ("d", "1"), ("K", "1"), ("e00", "x"), ("c0", "1")]);
        assert!(matches!(
            FitRecord::from_fields(&garbled),
            Err(FitError::InvalidNumber { .. })
        ));

        let negative = fields(&[("ftype", "MA"), ("d", "1"), ("K", "1"), ("e00", "1"), ("c0", "-1")]);
        assert!(matches!(
            FitRecord::from_fields(&negative),
            Err(FitError::NonPositive { .. })
        ));

        let empty = fields(&[("ftype", "MA"), ("d", "0"), ("K", "1"), ("c0", "1")]);
        assert!(matches!(
            FitRecord::from_fields(&empty),
            Err(FitError::InvalidCount { field: "d", .. })
        ));
    }

    #[test]
    fn counts_above_ten_are_ambiguous() {
        let eleven = fields(&[("ftype", "MA"), ("d", "1"), ("K", "11")]);
        assert!(matches!(
            FitRecord::from_fields(&eleven),
            Err(FitError::InvalidCount { field: "K", value }) if value == 11.0
        ));

        let ten = fields(&[("ftype", "MA"), ("d", "10"), ("K", "1"), ("c0", "1")]);
        assert!(!matches!(
            FitRecord::from_fields(&ten),
            Err(FitError::InvalidCount { .. })
        ));
    }
}
