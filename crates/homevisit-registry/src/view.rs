use crate::{
    RegistryError, columns,
    record::PatientRecord,
    update::FieldUpdates,
};

/// Filter applied to the patient list.
///
/// Both terms are case-insensitive substring matches; an empty term matches
/// every patient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Matched against the patient's area (`Adress`).
    pub area: String,
    /// Matched against the patient's name or file number.
    pub search: String,
}

impl ViewFilter {
    #[must_use]
    pub fn new(area: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            search: search.into(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.area.is_empty() && self.search.is_empty()
    }

    #[must_use]
    pub fn matches(&self, record: &PatientRecord) -> bool {
        let area_term = self.area.to_lowercase();
        let search_term = self.search.to_lowercase();
        let contains = |name: &str, term: &str| {
            record
                .text_or_empty(name)
                .to_lowercase()
                .contains(term)
        };

        let match_area = area_term.is_empty() || contains(columns::AREA, &area_term);
        let match_search = search_term.is_empty()
            || contains(columns::PATIENT_NAME, &search_term)
            || contains(columns::FILE_NUMBER, &search_term);
        match_area && match_search
    }
}

/// The loaded patient list together with the active filter.
///
/// A `ViewState` is owned by the front end and replaced rather than mutated
/// in place: changing the filter or applying an update consumes the state
/// and returns the new one.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    patients: Vec<PatientRecord>,
    filter: ViewFilter,
}

impl ViewState {
    #[must_use]
    pub fn new(patients: Vec<PatientRecord>) -> Self {
        Self {
            patients,
            filter: ViewFilter::default(),
        }
    }

    #[must_use]
    pub fn with_filter(self, filter: ViewFilter) -> Self {
        let state = Self { filter, ..self };
        tracing::debug!(
            area = %state.filter.area,
            search = %state.filter.search,
            visible = state.visible().count(),
            "filter applied"
        );
        state
    }

    #[must_use]
    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// All loaded patients, ignoring the filter.
    #[must_use]
    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    /// Patients passing the active filter, in load order.
    pub fn visible(&self) -> impl Iterator<Item = &PatientRecord> + '_ {
        self.patients.iter().filter(|p| self.filter.matches(p))
    }

    /// Finds a patient by file number among all loaded patients.
    #[must_use]
    pub fn find(&self, file_number: &str) -> Option<&PatientRecord> {
        self.patients.iter().find(|p| p.has_file_number(file_number))
    }

    /// Applies `updates` to the patient with `file_number`.
    ///
    /// Used to reflect a change locally before the backend confirms it.
    pub fn apply_updates(
        mut self,
        file_number: &str,
        updates: &FieldUpdates,
    ) -> Result<Self, RegistryError> {
        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.has_file_number(file_number))
            .ok_or_else(|| RegistryError::PatientNotFound {
                id: file_number.to_owned(),
            })?;
        patient.apply_updates(updates);
        tracing::debug!(file_number, fields = updates.len(), "updates applied locally");
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::FieldValue;

    fn state() -> ViewState {
        ViewState::new(
            serde_json::from_value(json!([
                { "Pt Name": "Jane Doe", "Pt file Num.": 1042, "Adress": "Zarqa" },
                { "Pt Name": "John Roe", "Pt file Num.": "2001", "Adress": "Amman" },
                { "Pt Name": "Ali Saleh", "Pt file Num.": 3310 },
            ]))
            .unwrap(),
        )
    }

    fn visible_names(state: &ViewState) -> Vec<String> {
        state.visible().map(|p| p.name().into_owned()).collect()
    }

    #[test]
    fn test_empty_filter_shows_all() {
        let state = state();
        assert!(state.filter().is_empty());
        assert_eq!(state.visible().count(), 3);
    }

    #[test]
    fn test_area_filter_is_case_insensitive_substring() {
        let state = state().with_filter(ViewFilter::new("zar", ""));
        assert_eq!(visible_names(&state), ["Jane Doe"]);
    }

    #[test]
    fn test_search_matches_name_or_file_number() {
        let state = state().with_filter(ViewFilter::new("", "JOHN"));
        assert_eq!(visible_names(&state), ["John Roe"]);

        let state = state.with_filter(ViewFilter::new("", "33"));
        assert_eq!(visible_names(&state), ["Ali Saleh"]);
    }

    #[test]
    fn test_filters_combine() {
        let state = state().with_filter(ViewFilter::new("amman", "jane"));
        assert_eq!(state.visible().count(), 0);
        assert_eq!(state.patients().len(), 3);
    }

    #[test]
    fn test_apply_updates() {
        let updates = FieldUpdates::from([("Servival Status".to_owned(), FieldValue::from("Died"))]);
        let state = state().apply_updates("2001", &updates).unwrap();
        assert!(state.find("2001").unwrap().is_deceased());
        assert!(!state.find("1042").unwrap().is_deceased());
    }

    #[test]
    fn test_apply_updates_unknown_patient() {
        let err = state()
            .apply_updates("9999", &FieldUpdates::new())
            .unwrap_err();
        assert!(matches!(err, RegistryError::PatientNotFound { id } if id == "9999"));
    }
}
