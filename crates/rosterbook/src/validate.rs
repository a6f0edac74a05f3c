//! Field format checks applied before a record reaches the store.
//!
//! Only three fields are constrained: the roll number must be present, the
//! contact must be exactly ten digits, and the date of birth must be a real
//! calendar date written `DD-MM-YYYY`. Everything else is accepted as typed.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, Result};
use crate::record::Student;

/// Format accepted for the date of birth.
pub const DOB_FORMAT: &str = "%d-%m-%Y";

static CONTACT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("contact pattern is valid"));

/// Check that a contact number is exactly ten ASCII digits.
///
/// # Errors
///
/// Returns [`Error::InvalidContact`] otherwise.
pub fn validate_contact(contact: &str) -> Result<()> {
    if CONTACT_PATTERN.is_match(contact) {
        Ok(())
    } else {
        Err(Error::InvalidContact {
            value: contact.to_string(),
        })
    }
}

/// Parse a date of birth written `DD-MM-YYYY`.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] when the text does not match the format or
/// names a day that does not exist (e.g. `31-02-2020`).
pub fn parse_dob(dob: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(dob, DOB_FORMAT).map_err(|_| Error::InvalidDate {
        value: dob.to_string(),
    })
}

/// Check that a date of birth is a valid `DD-MM-YYYY` date.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] otherwise.
pub fn validate_dob(dob: &str) -> Result<()> {
    parse_dob(dob).map(|_| ())
}

/// Validate a record ahead of an add or update.
///
/// Checks run in the order roll, contact, date of birth; the first failure
/// is returned.
///
/// # Errors
///
/// Returns [`Error::MissingRoll`], [`Error::InvalidContact`] or
/// [`Error::InvalidDate`].
pub fn validate(student: &Student) -> Result<()> {
    if student.roll.trim().is_empty() {
        return Err(Error::MissingRoll);
    }
    validate_contact(&student.contact)?;
    validate_dob(&student.dob)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_student() -> Student {
        let mut student = Student::new("R1");
        student.contact = "9876543210".to_string();
        student.dob = "01-01-2005".to_string();
        student
    }

    #[test]
    fn test_contact_ten_digits_passes() {
        assert!(validate_contact("1234567890").is_ok());
    }

    #[test]
    fn test_contact_nine_digits_fails() {
        assert!(matches!(
            validate_contact("123456789"),
            Err(Error::InvalidContact { .. })
        ));
    }

    #[test]
    fn test_contact_letters_fail() {
        assert!(validate_contact("12345abcde").is_err());
    }

    #[test]
    fn test_contact_edge_cases() {
        assert!(validate_contact("").is_err());
        assert!(validate_contact("12345678901").is_err());
        assert!(validate_contact("+123456789").is_err());
        assert!(validate_contact("12345 6789").is_err());
        // Non-ASCII digits are rejected.
        assert!(validate_contact("١٢٣٤٥٦٧٨٩٠").is_err());
    }

    #[test]
    fn test_dob_day_month_year_passes() {
        assert!(validate_dob("15-08-1999").is_ok());
        assert_eq!(
            parse_dob("15-08-1999").unwrap(),
            NaiveDate::from_ymd_opt(1999, 8, 15).unwrap()
        );
    }

    #[test]
    fn test_dob_iso_order_fails() {
        assert!(matches!(
            validate_dob("1999-08-15"),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_dob_impossible_date_fails() {
        assert!(validate_dob("31-02-2020").is_err());
    }

    #[test]
    fn test_dob_leap_day() {
        assert!(validate_dob("29-02-2020").is_ok());
        assert!(validate_dob("29-02-2021").is_err());
    }

    #[test]
    fn test_dob_other_separators_fail() {
        assert!(validate_dob("15/08/1999").is_err());
        assert!(validate_dob("").is_err());
    }

    #[test]
    fn test_validate_record() {
        assert!(validate(&valid_student()).is_ok());
    }

    #[test]
    fn test_validate_missing_roll() {
        let mut student = valid_student();
        student.roll = "   ".to_string();
        assert!(matches!(validate(&student), Err(Error::MissingRoll)));
    }

    #[test]
    fn test_validate_reports_contact_before_date() {
        let mut student = valid_student();
        student.contact = "12".to_string();
        student.dob = "nope".to_string();
        assert!(matches!(
            validate(&student),
            Err(Error::InvalidContact { .. })
        ));
    }

    #[test]
    fn test_validate_ignores_other_fields() {
        let mut student = valid_student();
        student.name = String::new();
        student.address = String::new();
        student.gender = None;
        assert!(validate(&student).is_ok());
    }
}
