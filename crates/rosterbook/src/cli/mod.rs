//! Command-line interface for rosterbook.
//!
//! This module provides the CLI structure for the `roster` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, FieldArgs, ListCommand, SearchCommand,
    StatusCommand, UpdateCommand,
};

use crate::logging::Verbosity;

/// roster - Keep student records in a local database
///
/// Add, update, delete, list and search student records, or open an
/// interactive session with `roster shell`.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new student record
    Add(AddCommand),

    /// Change fields of an existing record
    Update(UpdateCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// List every record
    List(ListCommand),

    /// Search records by one column
    Search(SearchCommand),

    /// Show database location and record count
    Status(StatusCommand),

    /// Open an interactive editing session
    Shell,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use crate::render::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "roster");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["roster", "-q", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let cli = Cli::try_parse_from(["roster", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "roster",
            "add",
            "--roll",
            "R1",
            "--name",
            "Asha",
            "--contact",
            "9876543210",
            "--dob",
            "01-01-2005",
            "--gender",
            "Female",
        ])
        .unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(add.roll, "R1");
        assert_eq!(add.fields.name.as_deref(), Some("Asha"));
        assert_eq!(add.fields.gender.as_deref(), Some("Female"));
        assert!(add.fields.address.is_none());
    }

    #[test]
    fn test_parse_add_requires_roll() {
        assert!(Cli::try_parse_from(["roster", "add", "--name", "Asha"]).is_err());
    }

    #[test]
    fn test_parse_update() {
        let cli =
            Cli::try_parse_from(["roster", "update", "R1", "--contact", "1111111111"]).unwrap();
        let Command::Update(update) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(update.roll, "R1");
        assert_eq!(update.fields.given(), vec![(Field::Contact, "1111111111")]);
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["roster", "search", "gender", "male", "-f", "json"]).unwrap();
        let Command::Search(search) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(search.field, Field::Gender);
        assert_eq!(search.text, "male");
        assert_eq!(search.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_search_empty_text() {
        let cli = Cli::try_parse_from(["roster", "search", "name"]).unwrap();
        let Command::Search(search) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(search.text, "");
    }

    #[test]
    fn test_parse_search_unknown_field() {
        assert!(Cli::try_parse_from(["roster", "search", "phone", "1"]).is_err());
    }

    #[test]
    fn test_parse_with_database() {
        let cli = Cli::try_parse_from(["roster", "list", "--database", "/tmp/s.db"]).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/s.db")));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["roster", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn test_parse_shell_and_config() {
        let cli = Cli::try_parse_from(["roster", "shell"]).unwrap();
        assert!(matches!(cli.command, Command::Shell));

        let cli = Cli::try_parse_from(["roster", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }
}
