//! Interactive editing session.
//!
//! The session keeps one editor and one browser over a borrowed store and
//! maps typed lines onto their operations, printing the listing again after
//! every change the way the form redraws its table.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::browser::Browser;
use crate::config::DisplayConfig;
use crate::editor::{Editor, Mode};
use crate::error::{Error, Result};
use crate::record::{Field, Gender};
use crate::render::{render_record, render_rows, OutputFormat};
use crate::storage::Store;

const HELP: &str = "\
Commands:
  list                     show every record
  search FIELD [TEXT]      show records whose FIELD contains TEXT
                           (gender: starts with TEXT)
  select ROLL | #N         load a listed record into the editor
  set FIELD [VALUE]        change an editor field (blank VALUE clears it)
  show                     show the editor fields and mode
  add                      save the editor as a new record
  update                   save the editor over the selected record
  delete                   delete the selected record
  clear                    empty the editor
  help                     show this text
  quit                     leave the session
Fields: roll, name, class, section, contact, father, address, gender, dob
";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show every record.
    List,
    /// Search one column.
    Search(Field, String),
    /// Select a listed record by roll number.
    SelectRoll(String),
    /// Select a listed record by 1-based row number.
    SelectRow(usize),
    /// Change an editor field.
    Set(Field, String),
    /// Show the editor.
    Show,
    /// Add the editor as a new record.
    Add,
    /// Update the selected record.
    Update,
    /// Delete the selected record.
    Delete,
    /// Empty the editor.
    Clear,
    /// Show help.
    Help,
    /// End the session.
    Quit,
    /// Blank line.
    Nothing,
}

impl ShellCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSearchField`] for a bad field name, or
    /// [`Error::InvalidCommand`] for an unrecognised or malformed command.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Self::Nothing,
            "list" | "all" => Self::List,
            "search" => {
                let (field, text) = split_field(rest)?;
                Self::Search(field, text)
            }
            "select" => match rest.strip_prefix('#') {
                Some(n) => {
                    let row = n
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| Error::invalid_command(format!("bad row number '{n}'")))?;
                    Self::SelectRow(row)
                }
                None if rest.is_empty() => {
                    return Err(Error::invalid_command("select needs a roll number or #row"))
                }
                None => Self::SelectRoll(rest.to_string()),
            },
            "set" => {
                let (field, value) = split_field(rest)?;
                Self::Set(field, value)
            }
            "show" => Self::Show,
            "add" => Self::Add,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(Error::invalid_command(format!("unknown command '{other}'"))),
        };
        Ok(command)
    }
}

fn split_field(rest: &str) -> Result<(Field, String)> {
    let (field, value) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(f, v)| (f, v.trim()));
    if field.is_empty() {
        return Err(Error::invalid_command("missing field name"));
    }
    Ok((field.parse()?, value.to_string()))
}

/// What the session wants done after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep going.
    Text(String),
    /// End the session.
    Quit,
}

/// An interactive session over one store.
#[derive(Debug)]
pub struct Shell<'s> {
    store: &'s Store,
    editor: Editor,
    browser: Browser,
    format: OutputFormat,
    max_width: usize,
}

impl<'s> Shell<'s> {
    /// Start a session and load every record into the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial listing fails.
    pub fn new(store: &'s Store, display: &DisplayConfig) -> Result<Self> {
        let mut browser = Browser::new();
        browser.refresh(store)?;
        Ok(Self {
            store,
            editor: Editor::new(),
            browser,
            // JSON is unreadable at a prompt; fall back to the table.
            format: match display.default_format {
                OutputFormat::Json => OutputFormat::Table,
                other => other,
            },
            max_width: display.max_column_width,
        })
    }

    /// The session's editor.
    #[must_use]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The session's browser.
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Read commands from `input` until it ends or `quit` is typed.
    ///
    /// User mistakes are printed and the session continues; storage
    /// failures end it.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O or storage failure.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        write!(output, "{}", self.listing()?)?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Text(text)) => write!(output, "{text}")?,
                Err(err) if err.is_user_error() => {
                    writeln!(output, "Error: {err}")?;
                }
                Err(err) => return Err(err),
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }

    /// Parse and carry out one line.
    ///
    /// # Errors
    ///
    /// Returns parse, validation, selection or storage errors.
    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        let command = ShellCommand::parse(line)?;
        debug!(?command, "shell command");

        let text = match command {
            ShellCommand::Nothing => String::new(),
            ShellCommand::Quit => return Ok(Reply::Quit),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::List => {
                self.browser.refresh(self.store)?;
                self.listing()?
            }
            ShellCommand::Search(field, text) => {
                self.browser.search(self.store, field, &text)?;
                self.listing()?
            }
            ShellCommand::SelectRoll(roll) => {
                let index = self
                    .browser
                    .position(&roll)
                    .ok_or_else(|| Error::roll_not_found(&roll))?;
                self.browser.select_row(index, &mut self.editor)?;
                self.form()
            }
            ShellCommand::SelectRow(row) => {
                self.browser.select_row(row - 1, &mut self.editor)?;
                self.form()
            }
            ShellCommand::Set(field, value) => {
                self.editor.set(field, &value)?;
                String::new()
            }
            ShellCommand::Show => self.form(),
            ShellCommand::Clear => {
                self.editor.clear();
                String::new()
            }
            ShellCommand::Add => {
                self.editor.add(self.store)?;
                self.after_change("Student added successfully!")?
            }
            ShellCommand::Update => {
                self.editor.update(self.store)?;
                self.after_change("Record updated.")?
            }
            ShellCommand::Delete => {
                self.editor.delete(self.store)?;
                self.after_change("Record deleted.")?
            }
        };
        Ok(Reply::Text(text))
    }

    /// Re-run the current listing, so an active search stays in effect.
    fn after_change(&mut self, message: &str) -> Result<String> {
        self.browser.reload(self.store)?;
        Ok(format!("{message}\n{}", self.listing()?))
    }

    fn listing(&self) -> Result<String> {
        render_rows(self.browser.rows(), self.format, self.max_width)
    }

    fn form(&self) -> String {
        let mode = match self.editor.mode() {
            Mode::New => "new record".to_string(),
            Mode::Editing { roll } => format!("editing {roll}"),
        };
        let genders: Vec<&str> = Gender::ALL.iter().map(|g| g.as_str()).collect();
        format!(
            "[{mode}]\n{}(gender: {})\n",
            render_record(self.editor.fields()),
            genders.join(" / ")
        )
    }
}
