//! `rosterbook` - Student records kept in a local `SQLite` table
//!
//! The library is split along the three pieces of the records form: the
//! [`Store`] holding the table, the [`Editor`] that composes and validates one
//! record, and the [`Browser`] that lists and searches what is stored.
//!
//! ```no_run
//! use rosterbook::{Browser, Editor, Field, Store};
//!
//! # fn main() -> rosterbook::Result<()> {
//! let store = Store::open("students.db")?;
//! let mut editor = Editor::new();
//! editor.set(Field::Roll, "R1")?;
//! editor.set(Field::Contact, "9876543210")?;
//! editor.set(Field::Dob, "01-01-2005")?;
//! editor.add(&store)?;
//!
//! let mut browser = Browser::new();
//! browser.search(&store, Field::Roll, "r1")?;
//! browser.select_row(0, &mut editor)?;
//! editor.delete(&store)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod browser;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod record;
pub mod render;
pub mod shell;
pub mod storage;
pub mod validate;

pub use browser::{Browser, Listing};
pub use config::Config;
pub use editor::{Editor, Mode};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Field, Gender, Student};
pub use render::OutputFormat;
pub use shell::Shell;
pub use storage::{Store, StoreStats};
