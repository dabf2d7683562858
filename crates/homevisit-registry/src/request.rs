//! JSON bodies posted to the backends
//!
//! Both backends accept a single JSON object whose `action` field selects
//! the operation:
//!
//! ```json
//! { "action": "register", "data": { "Pt Name": "Jane Doe" } }
//! { "action": "update", "id": 1042, "updates": { "V2": "2024-03-15" } }
//! { "action": "import", "patients": [{ "name": "Jane Doe", "ward": "Home Visits" }] }
//! ```

use serde::Serialize;

use crate::{
    RegistryError,
    record::{FieldValue, PatientRecord},
    transfer::TransferPatient,
    update::FieldUpdates,
};

#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BackendRequest {
    /// Append a new patient row to the registry.
    Register { data: PatientRecord },
    /// Update cells of the row with file number `id`.
    Update { id: FieldValue, updates: FieldUpdates },
    /// Import patients into the transfer backend.
    Import { patients: Vec<TransferPatient> },
}

impl BackendRequest {
    #[must_use]
    pub fn register(data: PatientRecord) -> Self {
        BackendRequest::Register { data }
    }

    /// Builds an update for `patient`, keyed by its file number.
    pub fn update(patient: &PatientRecord, updates: FieldUpdates) -> Result<Self, RegistryError> {
        let id = patient
            .file_number()
            .cloned()
            .ok_or(RegistryError::MissingFileNumber)?;
        Ok(BackendRequest::Update { id, updates })
    }

    /// Builds an import of a single patient into the transfer backend.
    #[must_use]
    pub fn transfer(patient: &PatientRecord) -> Self {
        BackendRequest::Import {
            patients: vec![TransferPatient::from(patient)],
        }
    }

    /// Value of the `action` field.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            BackendRequest::Register { .. } => "register",
            BackendRequest::Update { .. } => "update",
            BackendRequest::Import { .. } => "import",
        }
    }
}
