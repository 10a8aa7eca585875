//! Domain validation errors.

use chrono::NaiveDate;
use std::fmt;

/// Errors that can occur during domain value object and entity validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No phone number was provided (blank or whitespace-only input).
    MissingPhone,

    /// The provided phone number could not be normalized.
    InvalidPhone(String),

    /// A stored phone number does not match the E.164 shape.
    ///
    /// This is raised only when rehydrating persisted data and signals a
    /// corrupted or hand-edited storage file.
    CorruptedPhone(String),

    /// The first name is empty after trimming.
    MissingFirstName,

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The birthday lies in the future.
    BirthdayInFuture(NaiveDate),

    /// A stored ringtone ordinal does not map to a known ringtone.
    UnknownRingtone(u8),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPhone => write!(f, "Phone number is required"),
            Self::InvalidPhone(phone) => write!(f, "Phone number is not valid: {}", phone),
            Self::CorruptedPhone(value) => {
                write!(f, "Stored phone number is corrupted: {}", value)
            }
            Self::MissingFirstName => write!(f, "First name is required"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::BirthdayInFuture(date) => {
                write!(f, "Birthday cannot be in the future: {}", date)
            }
            Self::UnknownRingtone(ordinal) => write!(f, "Unknown ringtone: {}", ordinal),
        }
    }
}

impl std::error::Error for ValidationError {}
