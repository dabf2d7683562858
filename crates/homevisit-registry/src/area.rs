//! Grouping patients by geographic area
//!
//! Patients are organized by the city or district in the `Adress` column.
//! The list view shows one summary card per area; opening a card shows the
//! area's active and deceased patients.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{columns, record::PatientRecord};

/// Area assigned to patients without an `Adress` value.
pub const OTHER_AREA: &str = "Other";

fn raw_area(record: &PatientRecord) -> String {
    record
        .filled(columns::AREA)
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| OTHER_AREA.to_owned())
}

/// Display name of a patient's area: trimmed, first letter upper-cased,
/// remaining letters lower-cased.
///
/// # Examples
///
/// ```
/// # use homevisit_registry::{area::area_name, record::PatientRecord};
/// let mut record = PatientRecord::new();
/// record.insert("Adress", "  nEW town ");
/// assert_eq!(area_name(&record), "New town");
/// assert_eq!(area_name(&PatientRecord::new()), "Other");
/// ```
#[must_use]
pub fn area_name(record: &PatientRecord) -> String {
    let raw = raw_area(record);
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Returns `true` if `record` belongs to the area named `name`, ignoring case.
#[must_use]
pub fn in_area(record: &PatientRecord, name: &str) -> bool {
    raw_area(record).to_lowercase() == name.trim().to_lowercase()
}

/// Per-area summary shown on an area card.
#[derive(Debug, Clone, Serialize)]
pub struct AreaSummary<'a> {
    pub name: String,
    pub active: Vec<&'a PatientRecord>,
    pub deceased: Vec<&'a PatientRecord>,
    /// Sum of `number of visits` over all patients in the area.
    pub total_visits: u64,
}

impl AreaSummary<'_> {
    #[must_use]
    pub fn total(&self) -> usize {
        self.active.len() + self.deceased.len()
    }

    /// Fraction of the area's patients who are still active.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn active_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.active.len() as f64 / total as f64
    }
}

/// Groups `records` by [`area_name`], sorted by area name.
#[must_use]
pub fn group_by_area<'a, I>(records: I) -> Vec<AreaSummary<'a>>
where
    I: IntoIterator<Item = &'a PatientRecord>,
{
    let mut groups = BTreeMap::<String, AreaSummary<'a>>::new();
    for record in records {
        let name = area_name(record);
        let summary = groups
            .entry(name.clone())
            .or_insert_with(|| AreaSummary {
                name,
                active: vec![],
                deceased: vec![],
                total_visits: 0,
            });
        if record.is_deceased() {
            summary.deceased.push(record);
        } else {
            summary.active.push(record);
        }
        summary.total_visits = summary.total_visits.saturating_add(record.visit_count());
    }
    groups.into_values().collect()
}

/// Patients of a single area, split by survival status.
#[derive(Debug, Clone, Serialize)]
pub struct AreaDetail<'a> {
    pub name: String,
    pub active: Vec<&'a PatientRecord>,
    pub deceased: Vec<&'a PatientRecord>,
}

impl<'a> AreaDetail<'a> {
    /// Selects the patients of area `name` from `records`.
    #[must_use]
    pub fn for_area<I>(records: I, name: &str) -> Self
    where
        I: IntoIterator<Item = &'a PatientRecord>,
    {
        let (deceased, active) = records
            .into_iter()
            .filter(|record| in_area(record, name))
            .partition(|record| record.is_deceased());
        Self {
            name: name.to_owned(),
            active,
            deceased,
        }
    }
}
