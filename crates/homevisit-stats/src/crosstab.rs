use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::field::{self, FieldSource};

/// Column label used when a cross-tabulation has no column variable.
pub const TOTAL_COLUMN: &str = "Total";

/// Error returned when an explicit count matrix does not describe a valid table.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TableShapeError {
    #[display("expected {expected} rows of counts, found {found}")]
    RowCountMismatch { expected: usize, found: usize },
    #[display("row {row} has {found} counts, expected {expected}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("{axis} labels must be unique and in ascending order")]
    UnsortedLabels { axis: &'static str },
}

/// A two-dimensional contingency table of record counts.
///
/// Row and column labels are each sorted ascending. Counts are stored as a
/// dense matrix indexed by label position, so any `(row, column)` pair that
/// was never observed reads as zero. Totals are always derived from the
/// cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    rows: Vec<String>,
    columns: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Cross-tabulates `row_field` against `column_field` over `records`.
    ///
    /// Without a column field every record lands in the single
    /// [`TOTAL_COLUMN`] column. Row and column values are cleaned
    /// independently, so absent or blank values are counted under
    /// [`UNKNOWN`](crate::field::UNKNOWN).
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::collections::BTreeMap;
    /// # use homevisit_stats::crosstab::ContingencyTable;
    /// let records = [
    ///     BTreeMap::from([("Diagnosis", "A"), ("Gender", "M")]),
    ///     BTreeMap::from([("Diagnosis", "A"), ("Gender", "F")]),
    ///     BTreeMap::from([("Diagnosis", "B"), ("Gender", "M")]),
    /// ];
    /// let table = ContingencyTable::from_records(&records, "Diagnosis", Some("Gender"));
    /// assert_eq!(table.rows(), ["A", "B"]);
    /// assert_eq!(table.columns(), ["F", "M"]);
    /// assert_eq!(table.count("B", "F"), 0);
    /// assert_eq!(table.grand_total(), 3);
    /// ```
    #[must_use]
    pub fn from_records<I>(records: I, row_field: &str, column_field: Option<&str>) -> Self
    where
        I: IntoIterator,
        I::Item: FieldSource,
    {
        let mut pairs = BTreeMap::<(String, String), u64>::new();
        let mut row_labels = BTreeSet::new();
        let mut column_labels = BTreeSet::new();

        for record in records {
            let row = field::category(&record, row_field);
            let column = match column_field {
                Some(name) => field::category(&record, name),
                None => TOTAL_COLUMN.to_owned(),
            };
            row_labels.insert(row.clone());
            column_labels.insert(column.clone());
            *pairs.entry((row, column)).or_default() += 1;
        }

        let rows = row_labels.into_iter().collect::<Vec<_>>();
        let columns = column_labels.into_iter().collect::<Vec<_>>();
        let mut counts = vec![vec![0; columns.len()]; rows.len()];
        for ((row, column), count) in pairs {
            if let (Ok(r), Ok(c)) = (rows.binary_search(&row), columns.binary_search(&column)) {
                counts[r][c] = count;
            }
        }

        Self {
            rows,
            columns,
            counts,
        }
    }

    /// Builds a table from explicit labels and a row-major count matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use homevisit_stats::crosstab::ContingencyTable;
    /// let table = ContingencyTable::from_counts(
    ///     vec!["a".into(), "b".into()],
    ///     vec!["x".into(), "y".into()],
    ///     vec![vec![10, 10], vec![10, 10]],
    /// )
    /// .unwrap();
    /// assert_eq!(table.grand_total(), 40);
    /// ```
    pub fn from_counts(
        rows: Vec<String>,
        columns: Vec<String>,
        counts: Vec<Vec<u64>>,
    ) -> Result<Self, TableShapeError> {
        if !rows.is_sorted_by(|a, b| a < b) {
            return Err(TableShapeError::UnsortedLabels { axis: "row" });
        }
        if !columns.is_sorted_by(|a, b| a < b) {
            return Err(TableShapeError::UnsortedLabels { axis: "column" });
        }
        if counts.len() != rows.len() {
            return Err(TableShapeError::RowCountMismatch {
                expected: rows.len(),
                found: counts.len(),
            });
        }
        if let Some((row, cells)) = counts
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(TableShapeError::ColumnCountMismatch {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            counts,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns `true` if the table has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Count at the given label pair; zero for unobserved pairs.
    #[must_use]
    pub fn count(&self, row: &str, column: &str) -> u64 {
        match (self.row_index(row), self.column_index(column)) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Count at the given label positions.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> u64 {
        self.counts[row][column]
    }

    /// Iterates over the counts of one row, in column order.
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = u64> + '_ {
        self.counts[row].iter().copied()
    }

    #[must_use]
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|cells| cells.iter().sum()).collect()
    }

    #[must_use]
    pub fn column_totals(&self) -> Vec<u64> {
        let mut totals = vec![0; self.columns.len()];
        for cells in &self.counts {
            for (total, count) in totals.iter_mut().zip(cells) {
                *total += count;
            }
        }
        totals
    }

    #[must_use]
    pub fn row_total(&self, row: &str) -> Option<u64> {
        self.row_index(row).map(|r| self.counts[r].iter().sum())
    }

    #[must_use]
    pub fn column_total(&self, column: &str) -> Option<u64> {
        self.column_index(column)
            .map(|c| self.counts.iter().map(|cells| cells[c]).sum())
    }

    /// Sum of all cells; equals the number of input records.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    fn row_index(&self, row: &str) -> Option<usize> {
        self.rows.binary_search_by(|l| l.as_str().cmp(row)).ok()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns
            .binary_search_by(|l| l.as_str().cmp(column))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::UNKNOWN;

    fn record(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn diagnosis_by_gender() -> Vec<BTreeMap<String, String>> {
        vec![
            record(&[("Diagnosis", "A"), ("Gender", "M")]),
            record(&[("Diagnosis", "A"), ("Gender", "F")]),
            record(&[("Diagnosis", "B"), ("Gender", "M")]),
        ]
    }

    #[test]
    fn test_two_variable_table() {
        let table = ContingencyTable::from_records(diagnosis_by_gender(), "Diagnosis", Some("Gender"));
        assert_eq!(table.rows(), ["A", "B"]);
        assert_eq!(table.columns(), ["F", "M"]);
        assert_eq!(table.count("A", "F"), 1);
        assert_eq!(table.count("A", "M"), 1);
        assert_eq!(table.count("B", "M"), 1);
        assert_eq!(table.count("B", "F"), 0);
        assert_eq!(table.row_total("A"), Some(2));
        assert_eq!(table.row_total("B"), Some(1));
        assert_eq!(table.grand_total(), 3);
    }

    #[test]
    fn test_totals_agree() {
        let records = vec![
            record(&[("Stage", "I"), ("Intent", "Curative")]),
            record(&[("Stage", "IV"), ("Intent", "Palliative Care")]),
            record(&[("Stage", "IV"), ("Intent", "End of Life")]),
            record(&[("Stage", ""), ("Intent", "Palliative Care")]),
            record(&[("Intent", "Palliative Care")]),
        ];
        let table = ContingencyTable::from_records(&records, "Stage", Some("Intent"));
        let grand = table.grand_total();
        assert_eq!(grand, records.len() as u64);
        assert_eq!(table.row_totals().iter().sum::<u64>(), grand);
        assert_eq!(table.column_totals().iter().sum::<u64>(), grand);
        assert_eq!(table.row_total(UNKNOWN), Some(2));
    }

    #[test]
    fn test_without_column_field() {
        let table = ContingencyTable::from_records(diagnosis_by_gender(), "Diagnosis", None);
        assert_eq!(table.columns(), [TOTAL_COLUMN]);
        assert_eq!(table.count("A", TOTAL_COLUMN), 2);
        assert_eq!(table.count("B", TOTAL_COLUMN), 1);
    }

    #[test]
    fn test_blank_column_value_is_unknown() {
        let records = vec![
            record(&[("Diagnosis", "A"), ("Gender", " ")]),
            record(&[("Diagnosis", "A")]),
        ];
        let table = ContingencyTable::from_records(&records, "Diagnosis", Some("Gender"));
        assert_eq!(table.columns(), [UNKNOWN]);
        assert_eq!(table.count("A", UNKNOWN), 2);
    }

    #[test]
    fn test_empty_records() {
        let records: Vec<BTreeMap<String, String>> = vec![];
        let table = ContingencyTable::from_records(&records, "Diagnosis", Some("Gender"));
        assert!(table.is_empty());
        assert_eq!(table.grand_total(), 0);
        assert!(table.row_totals().is_empty());
        assert!(table.column_totals().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let records = diagnosis_by_gender();
        let first = ContingencyTable::from_records(&records, "Diagnosis", Some("Gender"));
        let second = ContingencyTable::from_records(&records, "Diagnosis", Some("Gender"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_label_counts_zero() {
        let table = ContingencyTable::from_records(diagnosis_by_gender(), "Diagnosis", Some("Gender"));
        assert_eq!(table.count("C", "F"), 0);
        assert_eq!(table.row_total("C"), None);
        assert_eq!(table.column_total("F"), Some(1));
    }

    #[test]
    fn test_from_counts_rejects_bad_shape() {
        let labels = || vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(
            ContingencyTable::from_counts(labels(), labels(), vec![vec![1, 2]]),
            Err(TableShapeError::RowCountMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            ContingencyTable::from_counts(labels(), labels(), vec![vec![1, 2], vec![3]]),
            Err(TableShapeError::ColumnCountMismatch {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            ContingencyTable::from_counts(
                vec!["b".to_owned(), "a".to_owned()],
                labels(),
                vec![vec![1, 2], vec![3, 4]]
            ),
            Err(TableShapeError::UnsortedLabels { axis: "row" })
        );
    }
}
