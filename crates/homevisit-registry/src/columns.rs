//! Column headers of the registry spreadsheet.
//!
//! The backend returns rows keyed by these exact header strings, including
//! the sheet's own spelling and trailing spaces, so they must not be
//! corrected here.

pub const PATIENT_NAME: &str = "Pt Name";
pub const FILE_NUMBER: &str = "Pt file Num.";
pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const PHONE: &str = "phone No.";
pub const DIAGNOSIS: &str = "Diagnosis";
pub const SPECIFIC_DIAGNOSIS: &str = "Specific Diagnosis";
pub const PRIMARY_PHYSICIAN: &str = "Primary Physicien";
pub const HOME_ADDRESS: &str = "Home Address ";
/// Older sheets carry the header without the trailing space.
pub const HOME_ADDRESS_ALT: &str = "Home Address";
/// City or district of the patient; used for area grouping.
pub const AREA: &str = "Adress";
pub const PRIORITY: &str = "priority";
pub const INTENT_OF_CARE: &str = "Intent of care";
pub const OPIOID: &str = "opioid ";
pub const SURVIVAL_STATUS: &str = "Servival Status";
pub const DATE_OF_DEATH: &str = "Date of death";
pub const PLACE_OF_DEATH: &str = "Place of death";
pub const VISIT_COUNT: &str = "number of visits";
pub const SITE_OF_REFERRAL: &str = "Site of Referral";
pub const STAGE_OF_DISEASE: &str = "Stage of Disease";
pub const SOCIAL_STATUS: &str = "Social status";
pub const ECOG: &str = "ECOG";

/// `Servival Status` value marking a deceased patient.
pub const STATUS_DIED: &str = "Died";

/// Name of the `n`th visit date column (`V1`, `V2`, ...).
#[must_use]
pub fn visit_slot(n: usize) -> String {
    format!("V{n}")
}
