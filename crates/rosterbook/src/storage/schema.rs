//! `SQLite` schema definitions for rosterbook.
//!
//! This module contains the SQL statements for creating the database schema
//! and the fixed statements used to read and write student rows.

/// SQL statement to create the students table.
pub const CREATE_STUDENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS students (
    roll TEXT PRIMARY KEY,
    name TEXT,
    class TEXT,
    section TEXT,
    contact TEXT,
    father TEXT,
    address TEXT,
    gender TEXT,
    dob TEXT
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_STUDENTS_TABLE, CREATE_METADATA_TABLE];

/// Column list shared by every row read, in table order.
macro_rules! select_students {
    ($tail:literal) => {
        concat!(
            "SELECT roll, name, class, section, contact, father, address, gender, dob ",
            "FROM students ",
            $tail
        )
    };
}

/// Insert a full row.
pub const INSERT_STUDENT: &str = r"
INSERT INTO students (roll, name, class, section, contact, father, address, gender, dob)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
";

/// Overwrite every non-key column of the row keyed by `?9`.
pub const UPDATE_STUDENT: &str = r"
UPDATE students SET
    name = ?1, class = ?2, section = ?3, contact = ?4,
    father = ?5, address = ?6, gender = ?7, dob = ?8
WHERE roll = ?9
";

/// Delete the row keyed by `?1`.
pub const DELETE_STUDENT: &str = "DELETE FROM students WHERE roll = ?1";

/// Count all rows.
pub const COUNT_STUDENTS: &str = "SELECT COUNT(*) FROM students";

/// Every row in insertion order.
pub const SELECT_ALL: &str = select_students!("ORDER BY rowid");

/// The row keyed by `?1`.
pub const SELECT_BY_ROLL: &str = select_students!("WHERE roll = ?1");

/// Substring searches, one fixed statement per column.
///
/// `?1` is a lower-cased `LIKE` pattern with `\` as the escape character.
pub mod search {
    /// Search by roll number.
    pub const ROLL: &str =
        select_students!(r"WHERE LOWER(roll) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by name.
    pub const NAME: &str =
        select_students!(r"WHERE LOWER(name) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by class.
    pub const CLASS: &str =
        select_students!(r"WHERE LOWER(class) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by section.
    pub const SECTION: &str =
        select_students!(r"WHERE LOWER(section) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by contact.
    pub const CONTACT: &str =
        select_students!(r"WHERE LOWER(contact) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by father's name.
    pub const FATHER: &str =
        select_students!(r"WHERE LOWER(father) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by address.
    pub const ADDRESS: &str =
        select_students!(r"WHERE LOWER(address) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by date of birth.
    pub const DOB: &str =
        select_students!(r"WHERE LOWER(dob) LIKE ?1 ESCAPE '\' ORDER BY rowid");
    /// Search by gender. Bound with a prefix pattern, so `male` skips `Female`.
    pub const GENDER: &str =
        select_students!(r"WHERE LOWER(gender) LIKE ?1 ESCAPE '\' ORDER BY rowid");
}
