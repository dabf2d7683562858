use homevisit_stats::{
    chi_square::{ChiSquareError, ChiSquareResult},
    crosstab::ContingencyTable,
};
use serde::Serialize;

use crate::record::PatientRecord;

/// Outcome of the significance test attached to a two-variable report.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Significance {
    Evaluated(ChiSquareResult),
    NoData,
    NotApplicable,
}

impl From<Result<ChiSquareResult, ChiSquareError>> for Significance {
    fn from(result: Result<ChiSquareResult, ChiSquareError>) -> Self {
        match result {
            Ok(result) => Significance::Evaluated(result),
            Err(ChiSquareError::NoData) => Significance::NoData,
            Err(ChiSquareError::NotApplicable) => Significance::NotApplicable,
        }
    }
}

impl Significance {
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Significance::Evaluated(result) => result.summary(),
            Significance::NoData => ChiSquareError::NoData.to_string(),
            Significance::NotApplicable => ChiSquareError::NotApplicable.to_string(),
        }
    }
}

/// Cross-tabulation of one or two patient fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabReport {
    pub row_field: String,
    pub column_field: Option<String>,
    pub table: ContingencyTable,
    /// Present only when a column field was given.
    pub significance: Option<Significance>,
}

impl CrossTabReport {
    /// Builds the report, or `None` when there are no patients to analyze.
    ///
    /// # Examples
    ///
    /// ```
    /// # use homevisit_registry::{analysis::CrossTabReport, record::PatientRecord};
    /// let mut a = PatientRecord::new();
    /// a.insert("Diagnosis", "Cancer");
    /// a.insert("Gender", "F");
    /// let report = CrossTabReport::new(&[a], "Diagnosis", Some("Gender")).unwrap();
    /// assert_eq!(report.table.grand_total(), 1);
    /// assert_eq!(report.significance.unwrap().summary(), "not applicable (df=0)");
    /// ```
    #[must_use]
    pub fn new(
        records: &[PatientRecord],
        row_field: &str,
        column_field: Option<&str>,
    ) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let column_field = column_field.filter(|f| !f.is_empty());
        let table = ContingencyTable::from_records(records, row_field, column_field);
        let significance = column_field.map(|_| ChiSquareResult::evaluate(&table).into());
        tracing::debug!(
            row_field,
            column_field,
            rows = table.rows().len(),
            columns = table.columns().len(),
            "cross-tabulation built"
        );
        Some(Self {
            row_field: row_field.to_owned(),
            column_field: column_field.map(str::to_owned),
            table,
            significance,
        })
    }
}

#[cfg(test)]
mod tests {
    use homevisit_stats::crosstab::TOTAL_COLUMN;
    use serde_json::json;

    use super::*;

    fn patients() -> Vec<PatientRecord> {
        serde_json::from_value(json!([
            { "Diagnosis": "A", "Gender": "M" },
            { "Diagnosis": "A", "Gender": "F" },
            { "Diagnosis": "B", "Gender": "M" },
        ]))
        .unwrap()
    }

    #[test]
    fn test_empty_registry_has_no_report() {
        assert!(CrossTabReport::new(&[], "Diagnosis", Some("Gender")).is_none());
    }

    #[test]
    fn test_single_variable_has_no_test() {
        let report = CrossTabReport::new(&patients(), "Diagnosis", None).unwrap();
        assert_eq!(report.table.columns(), [TOTAL_COLUMN]);
        assert!(report.significance.is_none());

        let report = CrossTabReport::new(&patients(), "Diagnosis", Some("")).unwrap();
        assert!(report.column_field.is_none());
        assert!(report.significance.is_none());
    }

    #[test]
    fn test_two_variables_evaluated() {
        let report = CrossTabReport::new(&patients(), "Diagnosis", Some("Gender")).unwrap();
        assert_eq!(report.table.count("B", "F"), 0);
        let Some(Significance::Evaluated(result)) = &report.significance else {
            panic!("expected evaluated test, got {:?}", report.significance);
        };
        assert_eq!(result.degrees_of_freedom, 1);
        assert!(result.low_expected_counts);
    }

    #[test]
    fn test_serialized_status() {
        let report = CrossTabReport::new(&patients(), "Diagnosis", Some("Gender")).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["significance"]["status"], "evaluated");
        assert_eq!(value["significance"]["degrees_of_freedom"], 1);
        assert_eq!(value["table"]["rows"], json!(["A", "B"]));
    }
}
