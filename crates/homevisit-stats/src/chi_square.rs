use std::fmt;

use serde::Serialize;

use crate::crosstab::ContingencyTable;

/// Significance level the critical values are tabulated for.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Expected counts below this make the chi-square approximation unreliable.
const MIN_EXPECTED_COUNT: f64 = 5.0;

/// Critical values at p = 0.05 for 1 to 6 degrees of freedom.
const CRITICAL_VALUES: [f64; 6] = [3.84, 5.99, 7.81, 9.49, 11.07, 12.59];

/// Reasons a chi-square test cannot be evaluated.
///
/// These are informational states for the caller to display, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ChiSquareError {
    /// The table holds no observations.
    #[display("no data")]
    NoData,
    /// The table has a single row or column, leaving zero degrees of freedom.
    #[display("not applicable (df=0)")]
    NotApplicable,
}

/// Outcome of a Pearson chi-square test of independence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareResult {
    /// Σ (observed − expected)² / expected over cells with non-zero expectation.
    pub statistic: f64,
    /// `(rows − 1) × (columns − 1)`.
    pub degrees_of_freedom: usize,
    /// Critical value the statistic was compared against.
    pub critical_value: f64,
    /// Whether independence is rejected at p < 0.05.
    pub significant: bool,
    /// Whether any cell had an expected count in `(0, 5)`.
    pub low_expected_counts: bool,
}

/// Returns the p = 0.05 critical value for `degrees_of_freedom`.
///
/// Values for 1 to 6 degrees of freedom come from a fixed table; larger
/// values use the approximation `2·df + 1.64·√(2·df)`.
///
/// # Examples
///
/// ```
/// # use homevisit_stats::chi_square::critical_value;
/// assert_eq!(critical_value(0), None);
/// assert_eq!(critical_value(1), Some(3.84));
/// assert_eq!(critical_value(6), Some(12.59));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn critical_value(degrees_of_freedom: usize) -> Option<f64> {
    match degrees_of_freedom {
        0 => None,
        df @ 1..=6 => Some(CRITICAL_VALUES[df - 1]),
        df => {
            let df = df as f64;
            Some(2.0 * df + 1.64 * (2.0 * df).sqrt())
        }
    }
}

/// Independence is rejected only when the statistic strictly exceeds the
/// critical value.
fn exceeds_critical(statistic: f64, critical_value: f64) -> bool {
    statistic > critical_value
}

impl ChiSquareResult {
    /// Evaluates the chi-square statistic for `table`.
    ///
    /// Cells with an expected count of zero are skipped, which understates
    /// the statistic for sparse tables.
    ///
    /// # Errors
    ///
    /// * [`ChiSquareError::NoData`] if the table's grand total is zero
    /// * [`ChiSquareError::NotApplicable`] if the table has zero degrees of freedom
    ///
    /// # Examples
    ///
    /// ```
    /// # use homevisit_stats::{chi_square::ChiSquareResult, crosstab::ContingencyTable};
    /// let table = ContingencyTable::from_counts(
    ///     vec!["a".into(), "b".into()],
    ///     vec!["x".into(), "y".into()],
    ///     vec![vec![10, 10], vec![10, 10]],
    /// )
    /// .unwrap();
    /// let result = ChiSquareResult::evaluate(&table).unwrap();
    /// assert_eq!(result.statistic, 0.0);
    /// assert_eq!(result.degrees_of_freedom, 1);
    /// assert!(!result.significant);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate(table: &ContingencyTable) -> Result<Self, ChiSquareError> {
        let grand_total = table.grand_total();
        if grand_total == 0 {
            return Err(ChiSquareError::NoData);
        }

        let degrees_of_freedom = (table.rows().len() - 1) * (table.columns().len() - 1);
        let Some(critical_value) = critical_value(degrees_of_freedom) else {
            return Err(ChiSquareError::NotApplicable);
        };

        let n = grand_total as f64;
        let row_totals = table.row_totals();
        let column_totals = table.column_totals();

        let mut statistic = 0.0;
        let mut low_expected_counts = false;
        for (r, &row_total) in row_totals.iter().enumerate() {
            for (c, &column_total) in column_totals.iter().enumerate() {
                let expected = (row_total as f64) * (column_total as f64) / n;
                if expected <= 0.0 {
                    continue;
                }
                if expected < MIN_EXPECTED_COUNT {
                    low_expected_counts = true;
                }
                let observed = table.cell(r, c) as f64;
                statistic += (observed - expected).powi(2) / expected;
            }
        }

        Ok(Self {
            statistic,
            degrees_of_freedom,
            critical_value,
            significant: exceeds_critical(statistic, critical_value),
            low_expected_counts,
        })
    }

    /// One-line human readable summary, e.g. `Chi²: 4.17 (df=1) | p < 0.05 *`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChiSquareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chi²: {:.2} (df={})",
            self.statistic, self.degrees_of_freedom
        )?;
        if self.significant {
            write!(f, " | p < {SIGNIFICANCE_LEVEL} *")?;
        } else {
            write!(f, " | p > {SIGNIFICANCE_LEVEL} (ns)")?;
        }
        if self.low_expected_counts {
            write!(f, " (Low counts)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&str], columns: &[&str], counts: &[&[u64]]) -> ContingencyTable {
        ContingencyTable::from_counts(
            rows.iter().map(|s| (*s).to_owned()).collect(),
            columns.iter().map(|s| (*s).to_owned()).collect(),
            counts.iter().map(|row| row.to_vec()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_independent_table() {
        let result =
            ChiSquareResult::evaluate(&table(&["a", "b"], &["x", "y"], &[&[10, 10], &[10, 10]]))
                .unwrap();
        assert!(result.statistic.abs() < f64::EPSILON);
        assert_eq!(result.degrees_of_freedom, 1);
        assert!((result.critical_value - 3.84).abs() < f64::EPSILON);
        assert!(!result.significant);
        assert!(!result.low_expected_counts);
        assert_eq!(result.summary(), "Chi²: 0.00 (df=1) | p > 0.05 (ns)");
    }

    #[test]
    fn test_dependent_table() {
        let result =
            ChiSquareResult::evaluate(&table(&["a", "b"], &["x", "y"], &[&[20, 0], &[0, 20]]))
                .unwrap();
        assert!((result.statistic - 40.0).abs() < 1e-9);
        assert!(result.significant);
        assert_eq!(result.summary(), "Chi²: 40.00 (df=1) | p < 0.05 *");
    }

    #[test]
    fn test_low_expected_counts() {
        let result =
            ChiSquareResult::evaluate(&table(&["a", "b"], &["x", "y"], &[&[3, 1], &[1, 3]]))
                .unwrap();
        assert!((result.statistic - 2.0).abs() < 1e-9);
        assert!(result.low_expected_counts);
        assert!(!result.significant);
        assert_eq!(
            result.summary(),
            "Chi²: 2.00 (df=1) | p > 0.05 (ns) (Low counts)"
        );
    }

    #[test]
    fn test_no_data() {
        assert_eq!(
            ChiSquareResult::evaluate(&ContingencyTable::default()),
            Err(ChiSquareError::NoData)
        );
        let zeros = table(&["a", "b"], &["x", "y"], &[&[0, 0], &[0, 0]]);
        assert_eq!(ChiSquareResult::evaluate(&zeros), Err(ChiSquareError::NoData));
    }

    #[test]
    fn test_single_row_not_applicable() {
        let single = table(&["a"], &["x", "y"], &[&[5, 3]]);
        assert_eq!(
            ChiSquareResult::evaluate(&single),
            Err(ChiSquareError::NotApplicable)
        );
    }

    #[test]
    fn test_zero_expected_cells_skipped() {
        let sparse = table(&["a", "b"], &["x", "y"], &[&[5, 0], &[3, 0]]);
        let result = ChiSquareResult::evaluate(&sparse).unwrap();
        assert!(result.statistic.is_finite());
        assert!(result.statistic.abs() < 1e-9);
    }

    #[test]
    fn test_critical_value_table() {
        let cases = [
            (1, 3.84),
            (2, 5.99),
            (3, 7.81),
            (4, 9.49),
            (5, 11.07),
            (6, 12.59),
        ];
        for (df, expected) in cases {
            assert_eq!(critical_value(df), Some(expected), "df={df}");
        }
    }

    #[test]
    fn test_significance_boundary() {
        let cases = [
            (3.84, 3.84, false),
            (3.839, 3.84, false),
            (3.841, 3.84, true),
            (11.07, 11.07, false),
            (11.08, 11.07, true),
        ];
        for (statistic, critical, significant) in cases {
            assert_eq!(
                exceeds_critical(statistic, critical),
                significant,
                "statistic={statistic} critical={critical}"
            );
        }
    }

    #[test]
    fn test_two_by_three_table() {
        let result = ChiSquareResult::evaluate(&table(
            &["a", "b"],
            &["x", "y", "z"],
            &[&[10, 10, 10], &[10, 10, 10]],
        ))
        .unwrap();
        assert_eq!(result.degrees_of_freedom, 2);
        assert!((result.critical_value - 5.99).abs() < f64::EPSILON);
        assert!(!result.significant);
    }

    #[test]
    fn test_large_df_uses_approximation() {
        let expected = 2.0 * 8.0 + 1.64 * 16.0_f64.sqrt();
        assert!((critical_value(8).unwrap() - expected).abs() < 1e-9);

        let counts: Vec<Vec<u64>> = (0..3).map(|_| vec![4; 5]).collect();
        let uniform = ContingencyTable::from_counts(
            vec!["a".into(), "b".into(), "c".into()],
            vec!["p".into(), "q".into(), "r".into(), "s".into(), "t".into()],
            counts,
        )
        .unwrap();
        let result = ChiSquareResult::evaluate(&uniform).unwrap();
        assert_eq!(result.degrees_of_freedom, 8);
        assert!((result.critical_value - expected).abs() < 1e-9);
        assert!(result.low_expected_counts);
    }
}
