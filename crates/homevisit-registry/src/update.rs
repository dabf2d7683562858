//! Field updates for the visit and death workflows
//!
//! Updates are sent to the registry backend as a map of column header to new
//! cell value and applied to the local copy of the record at the same time.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    columns,
    record::{FieldValue, PatientRecord},
};

/// Column header to new cell value.
pub type FieldUpdates = BTreeMap<String, FieldValue>;

/// Date format used in visit and death columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn format_date(date: NaiveDate) -> FieldValue {
    FieldValue::Text(date.format(DATE_FORMAT).to_string())
}

/// First visit column (`V1`, `V2`, ...) that is absent or empty.
///
/// # Examples
///
/// ```
/// # use homevisit_registry::{record::PatientRecord, update::next_visit_slot};
/// let mut record = PatientRecord::new();
/// assert_eq!(next_visit_slot(&record), "V1");
/// record.insert("V1", "2024-01-10");
/// assert_eq!(next_visit_slot(&record), "V2");
/// ```
#[must_use]
pub fn next_visit_slot(record: &PatientRecord) -> String {
    (1..)
        .map(columns::visit_slot)
        .find(|slot| record.get(slot).is_none_or(FieldValue::is_empty))
        .unwrap_or_default()
}

/// A visit recorded on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitUpdate {
    /// Visit column receiving the date.
    pub slot: String,
    pub date: NaiveDate,
    /// Visit count after this visit.
    pub visit_count: u64,
}

impl VisitUpdate {
    #[must_use]
    pub fn for_patient(record: &PatientRecord, date: NaiveDate) -> Self {
        Self {
            slot: next_visit_slot(record),
            date,
            visit_count: record.visit_count().saturating_add(1),
        }
    }

    #[must_use]
    pub fn to_updates(&self) -> FieldUpdates {
        FieldUpdates::from([
            (self.slot.clone(), format_date(self.date)),
            (
                columns::VISIT_COUNT.to_owned(),
                FieldValue::from(self.visit_count),
            ),
        ])
    }
}

/// Death of a patient, with date and place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathRecord {
    pub date: NaiveDate,
    pub place: String,
}

impl DeathRecord {
    #[must_use]
    pub fn to_updates(&self) -> FieldUpdates {
        FieldUpdates::from([
            (
                columns::SURVIVAL_STATUS.to_owned(),
                FieldValue::from(columns::STATUS_DIED),
            ),
            (columns::DATE_OF_DEATH.to_owned(), format_date(self.date)),
            (
                columns::PLACE_OF_DEATH.to_owned(),
                FieldValue::Text(self.place.clone()),
            ),
        ])
    }
}

impl PatientRecord {
    /// Overwrites or inserts every field in `updates`.
    pub fn apply_updates(&mut self, updates: &FieldUpdates) {
        for (name, value) in updates {
            self.insert(name.as_str(), value.clone());
        }
    }
}
