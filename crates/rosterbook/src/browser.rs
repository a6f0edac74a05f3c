//! The record browser: the visible listing of students.
//!
//! Every refresh or search replaces the whole row set with a fresh query;
//! nothing is cached between calls.

use tracing::debug;

use crate::editor::Editor;
use crate::error::{Error, Result};
use crate::record::{Field, Student};
use crate::storage::Store;

/// What produced the rows currently on show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Listing {
    /// Every record.
    #[default]
    All,
    /// A single-column search.
    Search {
        /// Column searched.
        field: Field,
        /// Text searched for.
        text: String,
    },
}

/// The listing view over the store.
#[derive(Debug, Clone, Default)]
pub struct Browser {
    rows: Vec<Student>,
    listing: Listing,
}

impl Browser {
    /// Create an empty browser. Call [`Browser::refresh`] to populate it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows with every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails; the rows are left unchanged.
    pub fn refresh(&mut self, store: &Store) -> Result<&[Student]> {
        self.rows = store.find_all()?;
        self.listing = Listing::All;
        debug!(rows = self.rows.len(), "browser refreshed");
        Ok(&self.rows)
    }

    /// Replace the rows with the records whose `field` contains `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails; the rows are left unchanged.
    pub fn search(&mut self, store: &Store, field: Field, text: &str) -> Result<&[Student]> {
        self.rows = store.find_by_column_substring(field, text)?;
        self.listing = Listing::Search {
            field,
            text: text.to_string(),
        };
        debug!(%field, text, rows = self.rows.len(), "browser searched");
        Ok(&self.rows)
    }

    /// Re-run whatever produced the current rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn reload(&mut self, store: &Store) -> Result<&[Student]> {
        match self.listing.clone() {
            Listing::All => self.refresh(store),
            Listing::Search { field, text } => self.search(store, field, &text),
        }
    }

    /// Copy the row at `index` into the editor and start editing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfRange`] if no such row is visible.
    pub fn select_row(&self, index: usize, editor: &mut Editor) -> Result<&Student> {
        let row = self.rows.get(index).ok_or(Error::RowOutOfRange {
            index,
            len: self.rows.len(),
        })?;
        editor.select(row);
        Ok(row)
    }

    /// Index of the visible row with this roll number.
    #[must_use]
    pub fn position(&self, roll: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.roll == roll)
    }

    /// The visible rows.
    #[must_use]
    pub fn rows(&self) -> &[Student] {
        &self.rows
    }

    /// What produced the visible rows.
    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Number of visible rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
