use serde::{Deserialize, Serialize};

use crate::{
    columns,
    record::{FieldValue, PatientRecord},
};

/// Ward every transferred patient is filed under.
pub const TRANSFER_WARD: &str = "Home Visits";
/// Room every transferred patient is filed under.
pub const TRANSFER_ROOM: &str = "Home";

/// A patient in the transfer backend's import schema.
///
/// Fields copied straight from the registry are omitted when the source
/// cell is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPatient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<FieldValue>,
    pub ward: String,
    pub room: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<FieldValue>,
    pub notes: String,
    pub treatment: String,
    pub medications: String,
}

impl From<&PatientRecord> for TransferPatient {
    fn from(patient: &PatientRecord) -> Self {
        let copy = |name: &str| patient.get(name).cloned();

        let specific = patient
            .filled(columns::SPECIFIC_DIAGNOSIS)
            .unwrap_or("N/A".into());
        let notes = format!(
            "Specific: {specific}\nAddress: {} - {}\nPriority: {}",
            patient.text_or_empty(columns::HOME_ADDRESS),
            patient.text_or_empty(columns::AREA),
            patient.text_or_empty(columns::PRIORITY),
        );

        let medications = if patient.text(columns::OPIOID).as_deref() == Some("Yes") {
            "Opioids: Yes".to_owned()
        } else {
            String::new()
        };

        Self {
            name: copy(columns::PATIENT_NAME),
            code: copy(columns::FILE_NUMBER),
            age: copy(columns::AGE),
            gender: copy(columns::GENDER),
            phone: copy(columns::PHONE),
            ward: TRANSFER_WARD.to_owned(),
            room: TRANSFER_ROOM.to_owned(),
            diagnosis: copy(columns::DIAGNOSIS),
            provider: copy(columns::PRIMARY_PHYSICIAN),
            notes,
            treatment: patient.text_or_empty(columns::INTENT_OF_CARE).into_owned(),
            medications,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_record() {
        let patient: PatientRecord = serde_json::from_value(json!({
            "Pt Name": "Jane Doe",
            "Pt file Num.": 1042,
            "Age": 71,
            "Gender": "F",
            "phone No.": "0790000000",
            "Diagnosis": "Cancer",
            "Specific Diagnosis": "Breast",
            "Primary Physicien": "Dr. Haddad",
            "Home Address ": "12 Main St",
            "Adress": "Zarqa",
            "priority": 1,
            "Intent of care": "Palliative Care",
            "opioid ": "Yes",
        }))
        .unwrap();

        let transfer = TransferPatient::from(&patient);
        assert_eq!(
            serde_json::to_value(&transfer).unwrap(),
            json!({
                "name": "Jane Doe",
                "code": 1042,
                "age": 71,
                "gender": "F",
                "phone": "0790000000",
                "ward": "Home Visits",
                "room": "Home",
                "diagnosis": "Cancer",
                "provider": "Dr. Haddad",
                "notes": "Specific: Breast\nAddress: 12 Main St - Zarqa\nPriority: 1",
                "treatment": "Palliative Care",
                "medications": "Opioids: Yes",
            })
        );
    }

    #[test]
    fn test_sparse_record() {
        let patient: PatientRecord =
            serde_json::from_value(json!({ "Pt Name": "John Roe", "opioid ": "No" })).unwrap();

        let transfer = TransferPatient::from(&patient);
        assert_eq!(transfer.code, None);
        assert_eq!(transfer.notes, "Specific: N/A\nAddress:  - \nPriority: ");
        assert_eq!(transfer.treatment, "");
        assert_eq!(transfer.medications, "");
        assert_eq!(transfer.ward, TRANSFER_WARD);
    }

    #[test]
    fn test_notes_ignore_alternate_address_column() {
        let patient: PatientRecord =
            serde_json::from_value(json!({ "Home Address": "7 Side St", "Adress": "Zarqa" }))
                .unwrap();

        let transfer = TransferPatient::from(&patient);
        assert_eq!(transfer.notes, "Specific: N/A\nAddress:  - Zarqa\nPriority: ");
    }
}
