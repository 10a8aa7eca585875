//! Contact entity.

use crate::domain::{EmailAddress, PhoneNumber, ValidationError};
use crate::models::Ringtone;
use chrono::{Local, NaiveDate};

/// The full mutable field set of a contact, as raw input.
///
/// This is what callers hand to [`Contact::new`] and
/// [`Contact::update_details`]; validation and normalization (trimming,
/// empty-to-None) happen there, atomically for the whole set.
#[derive(Debug, Clone, Default)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub pronouns: Option<String>,
    pub ringtone: Ringtone,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Validated field set, produced by [`validate`] and applied as a whole.
#[derive(Debug, Clone)]
struct ValidatedDetails {
    first_name: String,
    last_name: Option<String>,
    email: Option<EmailAddress>,
    pronouns: Option<String>,
    ringtone: Ringtone,
    birthday: Option<NaiveDate>,
    notes: Option<String>,
}

/// A contact record, identified by its phone number's canonical E.164 form.
///
/// Invariants hold from construction onward: the first name is non-empty
/// after trimming, the email (when present) has a valid shape, the birthday
/// (when present) is not in the future. Optional text fields are trimmed,
/// with empty values normalized to `None`.
///
/// The identity never changes through [`Contact::update_details`]; replacing
/// the phone number requires [`Contact::with_phone_number`], which produces a
/// new contact. `Clone` is a deep copy and backs cancellable edit drafts:
/// mutate the clone, and drop it to abandon the edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    phone_number: PhoneNumber,
    first_name: String,
    last_name: Option<String>,
    email: Option<EmailAddress>,
    pronouns: Option<String>,
    ringtone: Ringtone,
    birthday: Option<NaiveDate>,
    notes: Option<String>,
}

/// Validate and normalize a complete field set.
///
/// Reports the first violated invariant; on success every field comes back
/// trimmed, with empty optionals collapsed to `None`.
fn validate(details: ContactDetails) -> Result<ValidatedDetails, ValidationError> {
    let first_name = details.first_name.trim().to_string();
    if first_name.is_empty() {
        return Err(ValidationError::MissingFirstName);
    }

    let email = match normalize_optional(details.email) {
        Some(email) => Some(EmailAddress::new(email)?),
        None => None,
    };

    if let Some(birthday) = details.birthday {
        let today = Local::now().date_naive();
        if birthday > today {
            return Err(ValidationError::BirthdayInFuture(birthday));
        }
    }

    Ok(ValidatedDetails {
        first_name,
        last_name: normalize_optional(details.last_name),
        email,
        pronouns: normalize_optional(details.pronouns),
        ringtone: details.ringtone,
        birthday: details.birthday,
        notes: normalize_optional(details.notes),
    })
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

impl Contact {
    /// Create a contact, validating the complete field set.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a `ValidationError`.
    pub fn new(phone_number: PhoneNumber, details: ContactDetails) -> Result<Self, ValidationError> {
        let validated = validate(details)?;
        Ok(Self::from_validated(phone_number, validated))
    }

    fn from_validated(phone_number: PhoneNumber, details: ValidatedDetails) -> Self {
        Self {
            phone_number,
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            pronouns: details.pronouns,
            ringtone: details.ringtone,
            birthday: details.birthday,
            notes: details.notes,
        }
    }

    /// Replace every mutable field, all-or-nothing.
    ///
    /// The complete new field set is validated before any assignment; when
    /// validation fails, the contact is left completely unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a `ValidationError`.
    pub fn update_details(&mut self, details: ContactDetails) -> Result<(), ValidationError> {
        let validated = validate(details)?;

        self.first_name = validated.first_name;
        self.last_name = validated.last_name;
        self.email = validated.email;
        self.pronouns = validated.pronouns;
        self.ringtone = validated.ringtone;
        self.birthday = validated.birthday;
        self.notes = validated.notes;

        Ok(())
    }

    /// A new contact with a different identity and identical other fields.
    ///
    /// Used when an edit changes the phone number itself: the stored record
    /// is replaced by the re-keyed contact rather than mutated.
    pub fn with_phone_number(&self, phone_number: PhoneNumber) -> Self {
        let mut contact = self.clone();
        contact.phone_number = phone_number;
        contact
    }

    /// The current mutable field set, for building an edit draft.
    pub fn details(&self) -> ContactDetails {
        ContactDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.as_ref().map(|e| e.as_str().to_string()),
            pronouns: self.pronouns.clone(),
            ringtone: self.ringtone,
            birthday: self.birthday,
            notes: self.notes.clone(),
        }
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    pub fn pronouns(&self) -> Option<&str> {
        self.pronouns.as_deref()
    }

    pub fn ringtone(&self) -> Ringtone {
        self.ringtone
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
