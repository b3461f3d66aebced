//! The patient editor form: field values, required-field validation and the
//! open/closed editor state the roster owns.

use std::fmt;

use chrono::NaiveDate;

use super::patient::{Patient, PatientDraft, PatientId};

/// The four editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    BirthDate,
    Phone,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::FirstName, Field::LastName, Field::BirthDate, Field::Phone];

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::BirthDate => "Birth date",
            Field::Phone => "Phone",
        }
    }

    /// Message shown under the field while it is empty.
    pub fn required_message(self) -> &'static str {
        match self {
            Field::FirstName => "Please enter the first name",
            Field::LastName => "Please enter the last name",
            Field::BirthDate => "Please enter the birth date",
            Field::Phone => "Please enter the phone number",
        }
    }
}

/// A field that blocked submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Values currently entered in the editor. The birth date is the
/// date-picker value, not the wire string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
}

impl FieldValues {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: Option<NaiveDate>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            phone: phone.into(),
        }
    }

    /// Pre-fills the form from a stored record.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            birth_date: patient.birth_date_value(),
            phone: patient.phone.clone(),
        }
    }

    /// Checks every field is filled in and builds the request payload.
    /// Text is sent as typed; trimming only decides emptiness.
    ///
    /// # Errors
    /// Returns one [`FieldError`] per empty field, in display order.
    pub fn validate(&self) -> Result<PatientDraft, Vec<FieldError>> {
        let errors: Vec<FieldError> = Field::ALL
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .map(|field| FieldError {
                field,
                message: field.required_message(),
            })
            .collect();

        match self.birth_date {
            Some(birth_date) if errors.is_empty() => Ok(PatientDraft {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                birth_date,
                phone: self.phone.clone(),
            }),
            _ => Err(errors),
        }
    }

    fn is_missing(&self, field: Field) -> bool {
        match field {
            Field::FirstName => self.first_name.trim().is_empty(),
            Field::LastName => self.last_name.trim().is_empty(),
            Field::BirthDate => self.birth_date.is_none(),
            Field::Phone => self.phone.trim().is_empty(),
        }
    }
}

/// Whether the editor is collecting a new record or changing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(PatientId),
}

impl EditorMode {
    pub fn title(self) -> &'static str {
        match self {
            EditorMode::Create => "Add Patient",
            EditorMode::Edit(_) => "Edit Patient",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            EditorMode::Create => "Add",
            EditorMode::Edit(_) => "Update",
        }
    }
}

/// An open editor: its mode, the working buffer and any blocking messages.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenEditor {
    pub mode: EditorMode,
    pub values: FieldValues,
    pub errors: Vec<FieldError>,
}

impl OpenEditor {
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

/// Editor visibility. Closed, or open in one of the two modes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Closed,
    Open(OpenEditor),
}

impl EditorState {
    pub fn create() -> Self {
        EditorState::Open(OpenEditor {
            mode: EditorMode::Create,
            values: FieldValues::default(),
            errors: Vec::new(),
        })
    }

    pub fn edit(patient: &Patient) -> Self {
        EditorState::Open(OpenEditor {
            mode: EditorMode::Edit(patient.id),
            values: FieldValues::from_patient(patient),
            errors: Vec::new(),
        })
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditorState::Open(_))
    }

    pub fn mode(&self) -> Option<EditorMode> {
        match self {
            EditorState::Closed => None,
            EditorState::Open(editor) => Some(editor.mode),
        }
    }

    pub fn values(&self) -> Option<&FieldValues> {
        match self {
            EditorState::Closed => None,
            EditorState::Open(editor) => Some(&editor.values),
        }
    }
}
