//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::Result;
use crate::record::{Field, Student};
use crate::render::OutputFormat;

/// Non-key record fields accepted as flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Student name
    #[arg(long)]
    pub name: Option<String>,

    /// Class
    #[arg(long)]
    pub class: Option<String>,

    /// Section
    #[arg(long)]
    pub section: Option<String>,

    /// Ten digit contact number
    #[arg(long)]
    pub contact: Option<String>,

    /// Father's name
    #[arg(long)]
    pub father: Option<String>,

    /// Address
    #[arg(long)]
    pub address: Option<String>,

    /// Male, Female or Others (empty to unset)
    #[arg(long)]
    pub gender: Option<String>,

    /// Date of birth as DD-MM-YYYY
    #[arg(long)]
    pub dob: Option<String>,
}

impl FieldArgs {
    /// The fields that were given, paired with their values.
    #[must_use]
    pub fn given(&self) -> Vec<(Field, &str)> {
        [
            (Field::Name, &self.name),
            (Field::Class, &self.class),
            (Field::Section, &self.section),
            (Field::Contact, &self.contact),
            (Field::Father, &self.father),
            (Field::Address, &self.address),
            (Field::Gender, &self.gender),
            (Field::Dob, &self.dob),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    /// Overwrite the given fields of `record`.
    ///
    /// # Errors
    ///
    /// Returns an error if the gender is not recognised.
    pub fn apply_to(&self, record: &mut Student) -> Result<()> {
        for (field, value) in self.given() {
            record.set(field, value)?;
        }
        Ok(())
    }
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Roll number (must be unique)
    #[arg(long)]
    pub roll: String,

    /// Remaining fields
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Roll number of the record to change
    pub roll: String,

    /// Fields to overwrite; the rest keep their stored values
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Roll number of the record to delete
    pub roll: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Column to search (roll, name, class, section, contact, father,
    /// address, gender, dob)
    #[arg(value_parser = parse_field)]
    pub field: Field,

    /// Text to look for; empty matches everything
    #[arg(default_value = "")]
    pub text: String,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn parse_field(s: &str) -> std::result::Result<Field, String> {
    s.parse::<Field>().map_err(|e| e.to_string())
}
