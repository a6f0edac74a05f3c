//! Storage layer for rosterbook.
//!
//! This module provides the `SQLite`-backed student table: insertion keyed by
//! roll number, whole-row updates and deletes, full listing in insertion order,
//! and single-column search through fixed, parameterised statements.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{Field, Gender, Student};

/// Path reported for in-memory stores.
const MEMORY_PATH: &str = ":memory:";

/// Lock wait used by [`Store::open`]; matches the configuration default.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// The student table.
///
/// A `Store` owns the only connection to its database file. Editor and browser
/// borrow it for each operation; the connection closes when the store drops.
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_timeout(path, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
    }

    /// Open the store named by the configuration and apply its settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open_with_timeout(
            config.database_path(),
            Duration::from_millis(config.storage.busy_timeout_ms),
        )
    }

    /// Open or create a store, waiting up to `busy_timeout` on a locked file.
    ///
    /// The timeout is in force before the pragmas and schema setup run.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(MEMORY_PATH),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateRoll`] if the roll number is taken; nothing is
    /// written in that case.
    pub fn insert(&self, student: &Student) -> Result<()> {
        let result = self.conn.execute(
            schema::INSERT_STUDENT,
            params![
                student.roll,
                student.name,
                student.class,
                student.section,
                student.contact,
                student.father,
                student.address,
                student.gender_text(),
                student.dob,
            ],
        );

        match result {
            Ok(_) => {
                debug!(roll = %student.roll, "inserted student");
                Ok(())
            }
            Err(err) if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                Err(Error::duplicate_roll(&student.roll))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite every non-key column of the row keyed by `roll`.
    ///
    /// The `roll` of `fields` is ignored. Returns `false` when no row matched,
    /// in which case nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn update_by_roll(&self, roll: &str, fields: &Student) -> Result<bool> {
        let affected = self.conn.execute(
            schema::UPDATE_STUDENT,
            params![
                fields.name,
                fields.class,
                fields.section,
                fields.contact,
                fields.father,
                fields.address,
                fields.gender_text(),
                fields.dob,
                roll,
            ],
        )?;
        debug!(roll, affected, "updated student");
        Ok(affected > 0)
    }

    /// Delete the row keyed by `roll`.
    ///
    /// Returns `true` if a row was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_by_roll(&self, roll: &str) -> Result<bool> {
        let affected = self.conn.execute(schema::DELETE_STUDENT, [roll])?;
        debug!(roll, affected, "deleted student");
        Ok(affected > 0)
    }

    /// Get a record by roll number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, roll: &str) -> Result<Option<Student>> {
        let student = self
            .conn
            .query_row(schema::SELECT_BY_ROLL, [roll], Self::row_to_student)
            .optional()?;
        Ok(student)
    }

    /// Every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn find_all(&self) -> Result<Vec<Student>> {
        self.query(schema::SELECT_ALL, None)
    }

    /// Records whose `field` contains `needle`, ignoring ASCII case.
    ///
    /// `%` and `_` in the needle match literally. Gender values are matched
    /// from the start instead, so `male` does not find `Female` while `fem`
    /// and `other` still find `Female` and `Others`. An empty needle returns
    /// every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn find_by_column_substring(&self, field: Field, needle: &str) -> Result<Vec<Student>> {
        let sql = match field {
            Field::Gender => {
                let prefix = needle.trim();
                if prefix.is_empty() {
                    return self.find_all();
                }
                return self.query(schema::search::GENDER, Some(&prefix_pattern(prefix)));
            }
            Field::Roll => schema::search::ROLL,
            Field::Name => schema::search::NAME,
            Field::Class => schema::search::CLASS,
            Field::Section => schema::search::SECTION,
            Field::Contact => schema::search::CONTACT,
            Field::Father => schema::search::FATHER,
            Field::Address => schema::search::ADDRESS,
            Field::Dob => schema::search::DOB,
        };
        self.query(sql, Some(&like_pattern(needle)))
    }

    /// Count records in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row(schema::COUNT_STUDENTS, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails or the database file can't
    /// be read.
    pub fn stats(&self) -> Result<StoreStats> {
        let total_records = self.count()?;

        let db_size_bytes = if self.path.as_os_str() == MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path)?.len()
        };

        Ok(StoreStats {
            total_records,
            db_size_bytes,
        })
    }

    fn query(&self, sql: &str, needle: Option<&str>) -> Result<Vec<Student>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = match needle {
            Some(needle) => stmt.query_map([needle], Self::row_to_student)?,
            None => stmt.query_map([], Self::row_to_student)?,
        };
        let students = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(students)
    }

    /// Convert a database row to a Student.
    ///
    /// Columns are nullable in the table, so NULL reads as empty text.
    fn row_to_student(row: &rusqlite::Row) -> rusqlite::Result<Student> {
        let text = |idx: usize| -> rusqlite::Result<String> {
            Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
        };

        let roll = text(0)?;
        let gender_str = text(7)?;
        let gender = if gender_str.is_empty() {
            None
        } else if let Ok(gender) = gender_str.parse::<Gender>() {
            Some(gender)
        } else {
            warn!(%roll, "Unknown gender: {}, leaving unset", gender_str);
            None
        };

        Ok(Student {
            roll,
            name: text(1)?,
            class: text(2)?,
            section: text(3)?,
            contact: text(4)?,
            father: text(5)?,
            address: text(6)?,
            gender,
            dob: text(8)?,
        })
    }
}

/// Build a `LIKE` pattern matching `needle` anywhere, escaping wildcards.
///
/// Folding is ASCII-only to agree with `SQLite`'s `LOWER`.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    push_escaped(&mut pattern, needle);
    pattern.push('%');
    pattern
}

/// Build a `LIKE` pattern matching values that start with `prefix`.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    push_escaped(&mut pattern, prefix);
    pattern.push('%');
    pattern
}

fn push_escaped(pattern: &mut String, text: &str) {
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c.to_ascii_lowercase());
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of records stored.
    pub total_records: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
