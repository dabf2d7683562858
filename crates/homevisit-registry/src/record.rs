//! Patient records as returned by the registry backend
//!
//! The backend is a spreadsheet exposed over HTTP: each row arrives as a JSON
//! object mapping column headers to loosely typed cells. [`PatientRecord`]
//! keeps every cell it receives, typed only as far as [`FieldValue`], so rows
//! round-trip unchanged when posted back.
//!
//! # Feed format
//!
//! The patient list is either a bare array of rows or an object wrapping the
//! array under `data`:
//!
//! ```json
//! [{ "Pt Name": "Jane Doe", "Pt file Num.": 1042, "Adress": "Zarqa" }]
//! ```
//!
//! ```json
//! { "data": [{ "Pt Name": "Jane Doe", "Pt file Num.": 1042 }] }
//! ```

use std::{borrow::Cow, collections::BTreeMap};

use homevisit_stats::field::FieldSource;
use serde::{Deserialize, Serialize};

use crate::columns;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From, derive_more::IsVariant)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl FieldValue {
    /// Textual form of the cell, or `None` for null.
    ///
    /// Numbers render the way JSON renders them (`3`, `1.5`).
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            FieldValue::Number(n) => Some(Cow::Owned(n.to_string())),
            FieldValue::Text(s) => Some(Cow::Borrowed(s)),
        }
    }

    /// Returns `true` for null cells and empty strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }
}

/// One patient row from the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl FromIterator<(String, FieldValue)> for PatientRecord {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl FieldSource for PatientRecord {
    fn field_text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.text(name)
    }
}

impl PatientRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Sets a field, returning the previous value.
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(name.into(), value.into())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Textual form of a field; `None` if absent or null.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }

    /// Textual form of a field, treating empty strings as absent.
    #[must_use]
    pub fn filled(&self, name: &str) -> Option<Cow<'_, str>> {
        self.text(name).filter(|s| !s.is_empty())
    }

    /// Textual form of a field, or an empty string.
    #[must_use]
    pub fn text_or_empty(&self, name: &str) -> Cow<'_, str> {
        self.filled(name).unwrap_or_default()
    }

    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        self.text_or_empty(columns::PATIENT_NAME)
    }

    /// The file number identifying this patient in the registry.
    #[must_use]
    pub fn file_number(&self) -> Option<&FieldValue> {
        self.get(columns::FILE_NUMBER).filter(|v| !v.is_empty())
    }

    /// Returns `true` if `id` names this patient's file number.
    #[must_use]
    pub fn has_file_number(&self, id: &str) -> bool {
        self.file_number()
            .and_then(FieldValue::as_text)
            .is_some_and(|n| n.trim() == id.trim())
    }

    /// Street address, falling back to the older header spelling.
    #[must_use]
    pub fn home_address(&self) -> Cow<'_, str> {
        self.filled(columns::HOME_ADDRESS)
            .or_else(|| self.filled(columns::HOME_ADDRESS_ALT))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_deceased(&self) -> bool {
        self.text(columns::SURVIVAL_STATUS).as_deref() == Some(columns::STATUS_DIED)
    }

    /// Number of recorded visits; unparseable counts are zero.
    #[must_use]
    pub fn visit_count(&self) -> u64 {
        self.text(columns::VISIT_COUNT)
            .and_then(|s| parse_leading_int(&s))
            .unwrap_or(0)
    }

    /// Returns `true` when the priority cell equals 1, as a number or numeric text.
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        match self.get(columns::PRIORITY) {
            Some(FieldValue::Number(n)) => n.as_f64() == Some(1.0),
            Some(FieldValue::Text(s)) => s.trim().parse::<f64>().ok() == Some(1.0),
            Some(FieldValue::Bool(b)) => *b,
            Some(FieldValue::Null) | None => false,
        }
    }
}

/// Parses the leading decimal digits of `s`, ignoring leading whitespace.
///
/// `"3"`, `"3 visits"` and `"3.7"` all give `Some(3)`. Counts cannot be
/// negative, so `"-2"` gives `None`.
pub(crate) fn parse_leading_int(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// The patient list as served by the registry backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatientFeed {
    List(Vec<PatientRecord>),
    Wrapped {
        #[serde(default)]
        data: Option<Vec<PatientRecord>>,
    },
}

impl PatientFeed {
    /// Unwraps the feed; a wrapper without `data` yields no patients.
    #[must_use]
    pub fn into_patients(self) -> Vec<PatientRecord> {
        match self {
            PatientFeed::List(patients) => patients,
            PatientFeed::Wrapped { data } => data.unwrap_or_default(),
        }
    }
}
