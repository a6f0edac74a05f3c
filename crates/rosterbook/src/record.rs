//! Core record types for rosterbook.
//!
//! This module defines the student record, its gender enumeration, and the
//! closed set of fields that map one-to-one onto table columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Gender options offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other gender.
    Others,
}

impl Gender {
    /// All gender options in display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Others];

    /// The value stored in the `gender` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Others => "Others",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "others" | "other" => Ok(Self::Others),
            _ => Err(Error::UnknownGender(s.to_string())),
        }
    }
}

/// A single student record, keyed by roll number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Roll number (primary key).
    pub roll: String,
    /// Student name.
    pub name: String,
    /// Class.
    pub class: String,
    /// Section within the class.
    pub section: String,
    /// Ten digit contact number.
    pub contact: String,
    /// Father's name.
    pub father: String,
    /// Postal address.
    pub address: String,
    /// Gender, if chosen.
    pub gender: Option<Gender>,
    /// Date of birth as `DD-MM-YYYY`.
    pub dob: String,
}

impl Student {
    /// Create an otherwise blank record with the given roll number.
    #[must_use]
    pub fn new(roll: impl Into<String>) -> Self {
        Self {
            roll: roll.into(),
            ..Self::default()
        }
    }

    /// Text of the `gender` column; empty when unset.
    #[must_use]
    pub fn gender_text(&self) -> &'static str {
        self.gender.map_or("", Gender::as_str)
    }

    /// Read a field as displayed text.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Roll => &self.roll,
            Field::Name => &self.name,
            Field::Class => &self.class,
            Field::Section => &self.section,
            Field::Contact => &self.contact,
            Field::Father => &self.father,
            Field::Address => &self.address,
            Field::Gender => self.gender_text(),
            Field::Dob => &self.dob,
        }
    }

    /// Overwrite a field from text.
    ///
    /// A blank gender clears the selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGender`] if a non-blank gender is not recognised.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), Error> {
        let value = value.to_string();
        match field {
            Field::Roll => self.roll = value,
            Field::Name => self.name = value,
            Field::Class => self.class = value,
            Field::Section => self.section = value,
            Field::Contact => self.contact = value,
            Field::Father => self.father = value,
            Field::Address => self.address = value,
            Field::Gender => {
                self.gender = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            Field::Dob => self.dob = value,
        }
        Ok(())
    }

    /// Trim surrounding whitespace from every text field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            roll: self.roll.trim().to_string(),
            name: self.name.trim().to_string(),
            class: self.class.trim().to_string(),
            section: self.section.trim().to_string(),
            contact: self.contact.trim().to_string(),
            father: self.father.trim().to_string(),
            address: self.address.trim().to_string(),
            gender: self.gender,
            dob: self.dob.trim().to_string(),
        }
    }
}

/// A column of the students table.
///
/// This is the only way callers name a column, both for editing and for
/// searching, so column identifiers never come from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Roll number.
    Roll,
    /// Name.
    Name,
    /// Class.
    Class,
    /// Section.
    Section,
    /// Contact number.
    Contact,
    /// Father's name.
    Father,
    /// Address.
    Address,
    /// Gender.
    Gender,
    /// Date of birth.
    Dob,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 9] = [
        Field::Roll,
        Field::Name,
        Field::Class,
        Field::Section,
        Field::Contact,
        Field::Father,
        Field::Address,
        Field::Gender,
        Field::Dob,
    ];

    /// The SQL column name.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Roll => "roll",
            Self::Name => "name",
            Self::Class => "class",
            Self::Section => "section",
            Self::Contact => "contact",
            Self::Father => "father",
            Self::Address => "address",
            Self::Gender => "gender",
            Self::Dob => "dob",
        }
    }

    /// The label shown above the column.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Roll => "Roll No",
            Self::Name => "Name",
            Self::Class => "Class",
            Self::Section => "Section",
            Self::Contact => "Contact",
            Self::Father => "Father's Name",
            Self::Address => "Address",
            Self::Gender => "Gender",
            Self::Dob => "D.O.B",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts the column name or the heading, ignoring case, spaces,
    /// underscores, dots and apostrophes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '.' | '\'' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "roll" | "rollno" => Ok(Self::Roll),
            "name" => Ok(Self::Name),
            "class" => Ok(Self::Class),
            "section" => Ok(Self::Section),
            "contact" => Ok(Self::Contact),
            "father" | "fathersname" => Ok(Self::Father),
            "address" => Ok(Self::Address),
            "gender" => Ok(Self::Gender),
            "dob" => Ok(Self::Dob),
            _ => Err(Error::UnknownSearchField(s.to_string())),
        }
    }
}
