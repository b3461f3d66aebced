//! Screen state: the latest roster snapshot, the selected row and the text
//! typed into the modal form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{
    format_iso_date, parse_iso_date, EditorMode, EditorState, Field, FieldValues, OpenEditor,
    PatientId,
};
use crate::messages::RosterSnapshot;

/// A user intent the event loop forwards to the roster.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Reload,
    BeginAdd,
    BeginEdit(PatientId),
    Delete(PatientId),
    Submit(FieldValues),
    Cancel,
}

/// Text being typed into the modal. The birth date is plain `YYYY-MM-DD`
/// text until submit turns it into a date.
#[derive(Debug, Clone, PartialEq)]
pub struct FormBuffer {
    pub mode: EditorMode,
    pub focus: Field,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub phone: String,
}

impl FormBuffer {
    pub fn from_editor(editor: &OpenEditor) -> Self {
        let values = &editor.values;
        Self {
            mode: editor.mode,
            focus: Field::FirstName,
            first_name: values.first_name.clone(),
            last_name: values.last_name.clone(),
            birth_date: values.birth_date.map(format_iso_date).unwrap_or_default(),
            phone: values.phone.clone(),
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::BirthDate => &self.birth_date,
            Field::Phone => &self.phone,
        }
    }

    fn text_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::BirthDate => &mut self.birth_date,
            Field::Phone => &mut self.phone,
        }
    }

    /// Field values as the editor sees them. Unparseable date text counts as no date.
    pub fn to_values(&self) -> FieldValues {
        FieldValues::new(
            self.first_name.clone(),
            self.last_name.clone(),
            parse_iso_date(&self.birth_date),
            self.phone.clone(),
        )
    }

    fn focus_next(&mut self) {
        let index = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = Field::ALL[(index + 1) % Field::ALL.len()];
    }

    fn focus_prev(&mut self) {
        let index = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = Field::ALL[(index + Field::ALL.len() - 1) % Field::ALL.len()];
    }
}

/// Main application model.
#[derive(Debug, Default)]
pub struct App {
    pub snapshot: RosterSnapshot,
    pub selected: usize,
    pub form: Option<FormBuffer>,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Adopt the roster's latest state.
    ///
    /// The form buffer is rebuilt when an editor opens or switches target and
    /// dropped when it closes; otherwise the user's typing is kept.
    pub fn sync(&mut self, snapshot: RosterSnapshot) {
        match &snapshot.editor {
            EditorState::Closed => self.form = None,
            EditorState::Open(editor) => {
                let stale = self.form.as_ref().map_or(true, |form| form.mode != editor.mode);
                if stale {
                    self.form = Some(FormBuffer::from_editor(editor));
                }
            }
        }

        self.selected = self.selected.min(snapshot.patients.len().saturating_sub(1));
        self.snapshot = snapshot;
    }

    pub fn selected_id(&self) -> Option<PatientId> {
        self.snapshot.patients.get(self.selected).map(|p| p.id)
    }

    /// Handle keyboard input, returning the intent to send to the roster.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        if self.form.is_some() {
            self.handle_form_key(key)
        } else {
            self.handle_table_key(key)
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('a') => Some(Intent::BeginAdd),
            KeyCode::Char('e') | KeyCode::Enter => self.selected_id().map(Intent::BeginEdit),
            KeyCode::Char('d') => self.selected_id().map(Intent::Delete),
            KeyCode::Char('r') => Some(Intent::Reload),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.snapshot.patients.len() {
                    self.selected += 1;
                }
                None
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Intent> {
        let form = self.form.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                return Some(Intent::Cancel);
            }
            KeyCode::Enter => return Some(Intent::Submit(form.to_values())),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Backspace => {
                let focus = form.focus;
                form.text_mut(focus).pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let focus = form.focus;
                form.text_mut(focus).push(c);
            }
            _ => {}
        }
        None
    }
}
