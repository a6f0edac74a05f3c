//! The record editor.
//!
//! The editor holds one record's worth of field values and tracks whether
//! it is composing a new record or editing one picked from the browser.
//!
//! ```text
//!            select(record)
//!   New  ───────────────────▶  Editing { roll }
//!    ▲                               │
//!    └── clear / add / update / delete
//! ```
//!
//! Update and delete are only legal while editing, and always address the
//! roll captured at selection time, whatever the roll field now holds.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::record::{Field, Student};
use crate::storage::Store;
use crate::validate;

/// What the editor is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Composing a new record; only add is valid.
    #[default]
    New,
    /// Editing a stored record.
    Editing {
        /// Roll number of the record that was selected.
        roll: String,
    },
}

/// Form state for a single student record.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    fields: Student,
    mode: Mode,
}

impl Editor {
    /// Create an empty editor in [`Mode::New`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values, untrimmed.
    #[must_use]
    pub fn fields(&self) -> &Student {
        &self.fields
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Roll number of the selected record, if editing.
    #[must_use]
    pub fn selected_roll(&self) -> Option<&str> {
        match &self.mode {
            Mode::New => None,
            Mode::Editing { roll } => Some(roll.as_str()),
        }
    }

    /// Set one field from text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGender`] for an unrecognised gender.
    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        self.fields.set(field, value)
    }

    /// Replace every field at once without changing mode.
    pub fn set_fields(&mut self, fields: Student) {
        self.fields = fields;
    }

    /// Load a stored record and start editing it.
    pub fn select(&mut self, record: &Student) {
        self.fields = record.clone();
        self.mode = Mode::Editing {
            roll: record.roll.clone(),
        };
    }

    /// Empty every field, unset gender and return to [`Mode::New`].
    pub fn clear(&mut self) {
        self.fields = Student::default();
        self.mode = Mode::New;
    }

    /// Check the trimmed fields without touching the store and return them
    /// as [`Editor::add`] would insert them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRoll`], [`Error::InvalidContact`] or
    /// [`Error::InvalidDate`].
    pub fn validate(&self) -> Result<Student> {
        let record = self.fields.trimmed();
        validate::validate(&record)?;
        Ok(record)
    }

    /// Insert the current fields as a new record.
    ///
    /// On success the editor is cleared. On failure fields and mode are left
    /// as they were so the user can correct them.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any store call, or
    /// [`Error::DuplicateRoll`] if the roll number is taken.
    pub fn add(&mut self, store: &Store) -> Result<Student> {
        let record = self
            .validate()
            .inspect_err(|err| warn!("add rejected: {err}"))?;
        store
            .insert(&record)
            .inspect_err(|err| warn!("add failed: {err}"))?;

        info!(roll = %record.roll, "student added");
        self.clear();
        Ok(record)
    }

    /// Write the current fields over the selected record.
    ///
    /// Every non-key column is overwritten. The roll field is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] outside [`Mode::Editing`], a validation
    /// error, or [`Error::RollNotFound`] if the record was removed meanwhile.
    pub fn update(&mut self, store: &Store) -> Result<Student> {
        let roll = self.selected_roll().ok_or(Error::NoSelection)?.to_string();

        let mut record = self.fields.trimmed();
        record.roll.clone_from(&roll);
        validate::validate(&record).inspect_err(|err| warn!("update rejected: {err}"))?;

        if !store.update_by_roll(&roll, &record)? {
            warn!(%roll, "selected student vanished before update");
            return Err(Error::roll_not_found(roll));
        }

        info!(%roll, "student updated");
        self.clear();
        Ok(record)
    }

    /// Delete the selected record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] outside [`Mode::Editing`], or
    /// [`Error::RollNotFound`] if the record was removed meanwhile.
    pub fn delete(&mut self, store: &Store) -> Result<String> {
        let roll = self.selected_roll().ok_or(Error::NoSelection)?.to_string();

        if !store.delete_by_roll(&roll)? {
            warn!(%roll, "selected student vanished before delete");
            return Err(Error::roll_not_found(roll));
        }

        info!(%roll, "student deleted");
        self.clear();
        Ok(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use crate::record::Gender;

    fn fill(editor: &mut Editor, roll: &str) {
        editor.set(Field::Roll, roll).unwrap();
        editor.set(Field::Name, "Asha").unwrap();
        editor.set(Field::Class, "10").unwrap();
        editor.set(Field::Section, "A").unwrap();
        editor.set(Field::Contact, "9876543210").unwrap();
        editor.set(Field::Father, "Kumar").unwrap();
        editor.set(Field::Address, "12 Park Road").unwrap();
        editor.set(Field::Gender, "Female").unwrap();
        editor.set(Field::Dob, "01-01-2005").unwrap();
    }

    #[test]
    fn test_new_editor_is_blank() {
        let editor = Editor::new();
        assert_eq!(editor.mode(), &Mode::New);
        assert_eq!(editor.fields(), &Student::default());
        assert!(editor.selected_roll().is_none());
    }

    #[test]
    fn test_add_clears_on_success() {
        init_test_logging();
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");

        let added = editor.add(&store).unwrap();
        assert_eq!(added.roll, "R1");
        assert_eq!(added.gender, Some(Gender::Female));
        assert_eq!(editor.fields(), &Student::default());
        assert_eq!(editor.mode(), &Mode::New);
        assert_eq!(store.get("R1").unwrap(), Some(added));
    }

    #[test]
    fn test_validate_returns_trimmed_record() {
        let mut editor = Editor::new();
        fill(&mut editor, " R1 ");
        let record = editor.validate().unwrap();
        assert_eq!(record.roll, "R1");
        assert_eq!(editor.fields().roll, " R1 ");

        editor.set(Field::Roll, "   ").unwrap();
        assert!(matches!(editor.validate(), Err(Error::MissingRoll)));
    }

    #[test]
    fn test_add_trims_inputs() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "  R1  ");
        editor.set(Field::Contact, " 9876543210 ").unwrap();
        editor.set(Field::Name, "  Asha\t").unwrap();

        editor.add(&store).unwrap();
        let stored = store.get("R1").unwrap().unwrap();
        assert_eq!(stored.name, "Asha");
        assert_eq!(stored.contact, "9876543210");
    }

    #[test]
    fn test_add_invalid_contact_blocks_store() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        editor.set(Field::Contact, "12345").unwrap();

        let err = editor.add(&store).unwrap_err();
        assert!(matches!(err, Error::InvalidContact { .. }));
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(editor.fields().contact, "12345");
    }

    #[test]
    fn test_add_invalid_date_blocks_store() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        editor.set(Field::Dob, "2005-01-01").unwrap();

        assert!(matches!(
            editor.add(&store),
            Err(Error::InvalidDate { .. })
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_add_duplicate_keeps_fields() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        editor.add(&store).unwrap();

        fill(&mut editor, "R1");
        editor.set(Field::Name, "Other").unwrap();
        let err = editor.add(&store).unwrap_err();
        assert!(err.is_duplicate_roll());
        assert_eq!(editor.fields().name, "Other");
        assert_eq!(store.get("R1").unwrap().unwrap().name, "Asha");
    }

    #[test]
    fn test_add_while_editing_still_inserts() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        let original = editor.add(&store).unwrap();

        editor.select(&original);
        editor.set(Field::Roll, "R2").unwrap();
        editor.add(&store).unwrap();

        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(editor.mode(), &Mode::New);
    }

    #[test]
    fn test_update_and_delete_need_selection() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");

        assert!(matches!(editor.update(&store), Err(Error::NoSelection)));
        assert!(matches!(editor.delete(&store), Err(Error::NoSelection)));
    }

    #[test]
    fn test_select_enters_editing() {
        let mut editor = Editor::new();
        let mut record = Student::new("R7");
        record.name = "Ravi".to_string();

        editor.select(&record);
        assert_eq!(editor.mode(), &Mode::Editing { roll: "R7".into() });
        assert_eq!(editor.fields(), &record);

        editor.clear();
        assert_eq!(editor.mode(), &Mode::New);
        assert_eq!(editor.fields(), &Student::default());
    }

    #[test]
    fn test_update_keys_off_selected_roll() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        let original = editor.add(&store).unwrap();

        editor.select(&original);
        editor.set(Field::Roll, "R9").unwrap();
        editor.set(Field::Contact, "1111111111").unwrap();
        let updated = editor.update(&store).unwrap();

        assert_eq!(updated.roll, "R1");
        assert_eq!(store.get("R1").unwrap().unwrap().contact, "1111111111");
        assert!(store.get("R9").unwrap().is_none());
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(editor.mode(), &Mode::New);
    }

    #[test]
    fn test_update_validates() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        let original = editor.add(&store).unwrap();

        editor.select(&original);
        editor.set(Field::Dob, "31-02-2020").unwrap();
        assert!(matches!(
            editor.update(&store),
            Err(Error::InvalidDate { .. })
        ));
        assert_eq!(store.get("R1").unwrap().unwrap(), original);
        assert_eq!(editor.selected_roll(), Some("R1"));
    }

    #[test]
    fn test_update_vanished_row() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        let original = editor.add(&store).unwrap();

        editor.select(&original);
        store.delete_by_roll("R1").unwrap();

        assert!(matches!(
            editor.update(&store),
            Err(Error::RollNotFound { .. })
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_selected() {
        let store = Store::open_in_memory().unwrap();
        let mut editor = Editor::new();
        fill(&mut editor, "R1");
        let first = editor.add(&store).unwrap();
        fill(&mut editor, "R2");
        editor.add(&store).unwrap();

        editor.select(&first);
        assert_eq!(editor.delete(&store).unwrap(), "R1");
        assert!(store.get("R1").unwrap().is_none());
        assert!(store.get("R2").unwrap().is_some());
        assert_eq!(editor.mode(), &Mode::New);

        editor.select(&first);
        assert!(matches!(
            editor.delete(&store),
            Err(Error::RollNotFound { .. })
        ));
    }
}
