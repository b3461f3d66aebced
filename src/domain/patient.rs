use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned patient identifier.
pub type PatientId = i64;

/// Date format used on the wire for birth dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A patient record as last returned by the backend.
///
/// `birth_date` is kept exactly as the server sent it so the local list
/// always mirrors the last known response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: String,
    #[serde(rename = "telefono")]
    pub phone: String,
}

/// Payload for creating or replacing a patient. Everything but the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDraft {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "telefono")]
    pub phone: String,
}

impl Patient {
    pub fn new(
        id: PatientId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: birth_date.into(),
            phone: phone.into(),
        }
    }

    /// Builds the stored record for a draft the backend accepted under `id`.
    pub fn from_draft(id: PatientId, draft: PatientDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            birth_date: format_iso_date(draft.birth_date),
            phone: draft.phone,
        }
    }

    /// Birth date as a date-picker value, `None` when the server string is not ISO.
    pub fn birth_date_value(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.birth_date)
    }
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
