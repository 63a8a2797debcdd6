use serde::{Deserialize, Serialize};

use crate::config::UNKNOWN;

/// Patient and report metadata pulled from the document text.
/// Every field is "Unknown" unless a pattern matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub patient_name: String,
    pub age_gender: String,
    pub doctor: String,
    pub treatment_id: String,
    pub date: String,
}

impl Default for PatientInfo {
    fn default() -> Self {
        Self {
            patient_name: UNKNOWN.into(),
            age_gender: UNKNOWN.into(),
            doctor: UNKNOWN.into(),
            treatment_id: UNKNOWN.into(),
            date: UNKNOWN.into(),
        }
    }
}

impl PatientInfo {
    pub fn has_date(&self) -> bool {
        self.date != UNKNOWN
    }
}
