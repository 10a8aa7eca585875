//! Shared test doubles and builders.

use phonebook::normalizer::PhoneNumberNormalizer;
use phonebook::storage::InMemoryPhoneBookStateStorage;
use phonebook::{Contact, ContactDetails, PhoneBookService, PhoneNumber, Ringtone, ValidationError};
use chrono::NaiveDate;
use std::sync::Arc;

/// Deterministic normalizer: accepts `+` followed by digits verbatim,
/// rejects everything else. Keeps tests independent of phone metadata.
pub struct FakePhoneNumberNormalizer;

impl PhoneNumberNormalizer for FakePhoneNumberNormalizer {
    fn to_e164(&self, raw: &str, _default_region: &str) -> Result<String, ValidationError> {
        let trimmed = raw.trim();

        if trimmed.len() < 2 || !trimmed.starts_with('+') {
            return Err(ValidationError::InvalidPhone(raw.to_string()));
        }

        if !trimmed[1..].chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhone(raw.to_string()));
        }

        Ok(trimmed.to_string())
    }
}

/// Service over a fresh in-memory store.
#[allow(dead_code)]
pub fn new_service() -> PhoneBookService {
    service_on(Arc::new(InMemoryPhoneBookStateStorage::new()))
}

/// Service over an existing store (for cross-instance persistence tests).
#[allow(dead_code)]
pub fn service_on(storage: Arc<InMemoryPhoneBookStateStorage>) -> PhoneBookService {
    PhoneBookService::new(storage, Arc::new(FakePhoneNumberNormalizer))
        .expect("service should hydrate from in-memory storage")
}

/// Fluent contact builder for tests.
#[allow(dead_code)]
pub struct ContactBuilder {
    phone: Option<PhoneNumber>,
    details: ContactDetails,
}

#[allow(dead_code)]
impl ContactBuilder {
    pub fn create() -> Self {
        Self {
            phone: None,
            details: ContactDetails {
                first_name: "Ana".to_string(),
                ..ContactDetails::default()
            },
        }
    }

    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn with_first_name(mut self, first_name: &str) -> Self {
        self.details.first_name = first_name.to_string();
        self
    }

    pub fn with_last_name(mut self, last_name: &str) -> Self {
        self.details.last_name = Some(last_name.to_string());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.details.email = Some(email.to_string());
        self
    }

    pub fn with_pronouns(mut self, pronouns: &str) -> Self {
        self.details.pronouns = Some(pronouns.to_string());
        self
    }

    pub fn with_ringtone(mut self, ringtone: Ringtone) -> Self {
        self.details.ringtone = ringtone;
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.details.birthday = Some(birthday);
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.details.notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> Contact {
        let phone = self.phone.expect("PhoneNumber must be set. Use with_phone().");
        Contact::new(phone, self.details).expect("builder produced an invalid contact")
    }
}
