//! Modal form for creating or editing one employee record.
//!
//! ```text
//! Closed --open_empty/open_with--> Open --submit--> valid:   Closed (draft returned)
//!                                              \--> invalid: Open (field errors)
//! Open --cancel--> Closed
//! ```

use std::fmt;

use log::debug;

use crate::errors::{FieldError, FieldErrors};
use crate::models::employee::{Employee, EmployeeDraft, EmployeeForm, EmployeeId, Field};
use crate::utils::validation::validate_form;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOptions {
    pub strict_image_url: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(EmployeeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenForm {
    pub mode: EditorMode,
    pub values: EmployeeForm,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Open(OpenForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    NotOpen,
    Invalid(FieldErrors),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::NotOpen => write!(f, "Editor is not open"),
            EditorError::Invalid(errors) => write!(f, "{}", errors),
        }
    }
}

impl std::error::Error for EditorError {}

#[derive(Debug, Default)]
pub struct RecordEditor {
    state: EditorState,
    options: EditorOptions,
}

impl RecordEditor {
    pub fn new(options: EditorOptions) -> Self {
        RecordEditor {
            state: EditorState::Closed,
            options,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open(_))
    }

    pub fn mode(&self) -> Option<&EditorMode> {
        self.form().map(|form| &form.mode)
    }

    pub fn values(&self) -> Option<&EmployeeForm> {
        self.form().map(|form| &form.values)
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        self.form().map(|form| &form.errors)
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors().and_then(|errors| errors.get(field))
    }

    /// Read-only id of the record being edited.
    pub fn id(&self) -> Option<&EmployeeId> {
        self.values().and_then(|values| values.id.as_ref())
    }

    fn form(&self) -> Option<&OpenForm> {
        match &self.state {
            EditorState::Open(form) => Some(form),
            EditorState::Closed => None,
        }
    }

    /// Opens a blank form. The id is assigned later, by whoever stores the result.
    pub fn open_empty(&mut self) {
        debug!("Opening editor for a new employee");
        self.state = EditorState::Open(OpenForm {
            mode: EditorMode::Create,
            values: EmployeeForm::default(),
            errors: FieldErrors::new(),
        });
    }

    pub fn open_with(&mut self, record: &Employee) {
        debug!("Opening editor for employee {}", record.id);
        self.state = EditorState::Open(OpenForm {
            mode: EditorMode::Edit(record.id.clone()),
            values: EmployeeForm::from(record),
            errors: FieldErrors::new(),
        });
    }

    /// Updates one field and clears that field's pending error. Other errors are untouched.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), EditorError> {
        match &mut self.state {
            EditorState::Open(form) => {
                form.values.set(field, value.into());
                form.errors.remove(field);
                Ok(())
            }
            EditorState::Closed => Err(EditorError::NotOpen),
        }
    }

    /// Validates the form. On success the editor closes and hands back the completed draft;
    /// on failure it stays open with the entered values intact and one error per bad field.
    pub fn submit(&mut self) -> Result<EmployeeDraft, EditorError> {
        let EditorState::Open(form) = &mut self.state else {
            return Err(EditorError::NotOpen);
        };

        match validate_form(&form.values, self.options.strict_image_url) {
            Ok(draft) => {
                self.state = EditorState::Closed;
                Ok(draft)
            }
            Err(errors) => {
                debug!("Editor submission rejected: {}", errors);
                form.errors = errors.clone();
                Err(EditorError::Invalid(errors))
            }
        }
    }

    /// Discards in-progress edits.
    pub fn cancel(&mut self) {
        self.state = EditorState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldErrorKind;
    use crate::models::employee::Gender;

    fn ann() -> Employee {
        Employee {
            id: EmployeeId::new("1"),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            gender: Gender::Female,
            image_url: "http://x/1.png".to_string(),
        }
    }

    fn filled_editor() -> RecordEditor {
        let mut editor = RecordEditor::default();
        editor.open_empty();
        editor.set_field(Field::FirstName, "Bo").unwrap();
        editor.set_field(Field::LastName, "Kim").unwrap();
        editor.set_field(Field::Email, "bo@x.com").unwrap();
        editor.set_field(Field::Gender, "Male").unwrap();
        editor.set_field(Field::ImageUrl, "http://x/2.png").unwrap();
        editor
    }

    #[test]
    fn starts_closed() {
        let mut editor = RecordEditor::default();
        assert_eq!(editor.state(), &EditorState::Closed);
        assert_eq!(editor.submit(), Err(EditorError::NotOpen));
        assert_eq!(editor.set_field(Field::Email, "a@b.c"), Err(EditorError::NotOpen));
    }

    #[test]
    fn open_with_prefills_every_field_and_id() {
        let mut editor = RecordEditor::default();
        editor.open_with(&ann());

        assert_eq!(editor.mode(), Some(&EditorMode::Edit(EmployeeId::new("1"))));
        assert_eq!(editor.id(), Some(&EmployeeId::new("1")));
        let values = editor.values().unwrap();
        assert_eq!(values, &EmployeeForm::from(&ann()));
        assert_eq!(values.image_url, "http://x/1.png");
    }

    #[test]
    fn resubmitting_unchanged_prefill_returns_same_record() {
        let mut editor = RecordEditor::default();
        editor.open_with(&ann());
        let draft = editor.submit().unwrap();
        assert_eq!(draft.into_employee(EmployeeId::generate), ann());
        assert!(!editor.is_open());
    }

    #[test]
    fn open_empty_leaves_fields_blank() {
        let mut editor = RecordEditor::default();
        editor.open_empty();
        assert_eq!(editor.mode(), Some(&EditorMode::Create));
        assert_eq!(editor.values(), Some(&EmployeeForm::default()));
        assert_eq!(editor.id(), None);
    }

    #[test]
    fn empty_first_name_keeps_editor_open() {
        let mut editor = filled_editor();
        editor.set_field(Field::FirstName, "").unwrap();

        let err = editor.submit().unwrap_err();
        assert!(matches!(err, EditorError::Invalid(_)));
        assert!(editor.is_open());
        assert_eq!(
            editor.error_for(Field::FirstName).unwrap().kind,
            FieldErrorKind::RequiredField
        );
    }

    #[test]
    fn bad_email_flags_only_email_and_preserves_values() {
        let mut editor = filled_editor();
        editor.set_field(Field::Email, "not-an-email").unwrap();
        let before = editor.values().unwrap().clone();

        assert!(editor.submit().is_err());

        let errors = editor.errors().unwrap();
        assert_eq!(errors.fields().collect::<Vec<_>>(), [Field::Email]);
        assert_eq!(errors.get(Field::Email).unwrap().kind, FieldErrorKind::Format);
        assert_eq!(editor.values(), Some(&before));
    }

    #[test]
    fn invalid_gender_is_rejected_and_valid_ones_pass() {
        let mut editor = filled_editor();
        editor.set_field(Field::Gender, "Other").unwrap();
        assert!(editor.submit().is_err());
        assert_eq!(
            editor.error_for(Field::Gender).unwrap().kind,
            FieldErrorKind::InvalidEnum
        );

        editor.set_field(Field::Gender, "Female").unwrap();
        let draft = editor.submit().unwrap();
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(draft.id, None);
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut editor = filled_editor();
        editor.set_field(Field::FirstName, "").unwrap();
        editor.set_field(Field::Email, "nope").unwrap();
        assert!(editor.submit().is_err());
        assert_eq!(editor.errors().unwrap().len(), 2);

        editor.set_field(Field::Email, "bo@x.com").unwrap();
        assert!(editor.error_for(Field::Email).is_none());
        assert!(editor.error_for(Field::FirstName).is_some());
    }

    #[test]
    fn strict_mode_rejects_malformed_image_url() {
        let mut editor = RecordEditor::new(EditorOptions { strict_image_url: true });
        editor.open_with(&ann());
        editor.set_field(Field::ImageUrl, "avatar.png").unwrap();
        assert!(editor.submit().is_err());
        assert_eq!(
            editor.error_for(Field::ImageUrl).unwrap().kind,
            FieldErrorKind::Format
        );
    }

    #[test]
    fn cancel_discards_in_progress_edits() {
        let mut editor = filled_editor();
        editor.cancel();
        assert!(!editor.is_open());
        assert!(editor.values().is_none());

        editor.open_empty();
        assert_eq!(editor.values(), Some(&EmployeeForm::default()));
    }
}
