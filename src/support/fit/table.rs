use std::collections::HashMap;

use super::{FitError, FitRecord};

/// Reads every row of a fit table.
///
/// The first line holds the column names; each following line is one fit.
/// Column order is irrelevant and unused columns are ignored.
///
/// # Errors
///
/// Returns a [`FitError`] if the text is not valid CSV or any row is not a
/// valid fit record.
pub fn read_table(csv_text: &str) -> Result<Vec<FitRecord>, FitError> {
    reader(csv_text)
        .deserialize::<HashMap<String, String>>()
        .map(|row| FitRecord::from_fields(&row?))
        .collect()
}

fn reader(csv_text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes())
}

impl FitRecord {
    /// Reads row `index` (zero-based, after the header) of a fit table.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::MissingRow`] if the table is shorter than that, or
    /// any error from reading that row. Other rows are not parsed.
    pub fn from_csv(csv_text: &str, index: usize) -> Result<Self, FitError> {
        let row = reader(csv_text)
            .deserialize::<HashMap<String, String>>()
            .nth(index)
            .ok_or(FitError::MissingRow { index })??;
        Self::from_fields(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::fit::FitKind;

    const TABLE: &str = "\
ftype,K,d,e00,e10,c0,c1,a1,rms_err,max_err,lb0,ub0
MA,2,1,1.0,0.5,1.0,2.0,,0.01,0.02,0.1,10
SMA,1,1,0.77,,1.28,,1.0,0.01,0.02,0.1,10
";

    #[test]
    fn reads_all_rows() {
        let fits = read_table(TABLE).unwrap();
        assert_eq!(fits.len(), 2);
        assert_eq!(fits[0].kind(), &FitKind::MaxAffine);
        assert_eq!(fits[1].k(), 1);
    }

    #[test]
    fn selects_a_row() {
        let sma = FitRecord::from_csv(TABLE, 1).unwrap();
        assert_eq!(sma.kind().tag(), "SMA");
        assert!(matches!(
            FitRecord::from_csv(TABLE, 2),
            Err(FitError::MissingRow { index: 2 })
        ));
    }

    #[test]
    fn malformed_rows_fail() {
        let table = "ftype,K,d,e00,c0\nMA,1,1,abc,1\n";
        assert!(matches!(
            read_table(table),
            Err(FitError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn a_malformed_row_does_not_hide_earlier_ones() {
        let table = "ftype,K,d,e00,c0,a1\nSMA,1,1,0.77,1.28,1\nSMA,1,1,abc,1,1\n";
        assert_eq!(FitRecord::from_csv(table, 0).unwrap().k(), 1);
        assert!(matches!(
            FitRecord::from_csv(table, 1),
            Err(FitError::InvalidNumber { .. })
        ));
        assert!(read_table(table).is_err());
    }
}
