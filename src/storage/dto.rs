//! Wire representation of the persisted phonebook document.
//!
//! The document is versioned and camelCase. Mapping back to the domain goes
//! through the corruption-checking [`PhoneNumber::from_e164`] path and the
//! validating [`Contact`] constructor, so a hand-edited file that violates
//! entity invariants fails loudly at load time instead of producing an
//! invalid in-memory object.

use crate::domain::{PhoneNumber, ValidationError};
use crate::models::{Contact, ContactDetails, PhoneBookState, Ringtone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub(crate) const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PhoneBookStateDto {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub contacts: Vec<ContactDto>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContactDto {
    pub phone_e164: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_raw: Option<String>,

    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ringtone: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PhoneBookStateDto {
    pub fn from_state(state: &PhoneBookState) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            contacts: state.contacts.iter().map(ContactDto::from_contact).collect(),
        }
    }

    pub fn into_state(self) -> Result<PhoneBookState, ValidationError> {
        let contacts = self
            .contacts
            .into_iter()
            .map(ContactDto::into_contact)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PhoneBookState { contacts })
    }
}

impl ContactDto {
    fn from_contact(contact: &Contact) -> Self {
        Self {
            phone_e164: contact.phone_number().e164().to_string(),
            phone_raw: Some(contact.phone_number().raw().to_string()),
            first_name: contact.first_name().to_string(),
            last_name: contact.last_name().map(str::to_string),
            email: contact.email().map(|e| e.as_str().to_string()),
            pronouns: contact.pronouns().map(str::to_string),
            ringtone: Some(contact.ringtone().into()),
            birthday: contact.birthday(),
            notes: contact.notes().map(str::to_string),
        }
    }

    fn into_contact(self) -> Result<Contact, ValidationError> {
        let phone = PhoneNumber::from_e164(self.phone_e164, self.phone_raw)?;

        let ringtone = match self.ringtone {
            Some(ordinal) => Ringtone::try_from(ordinal)?,
            None => Ringtone::default(),
        };

        Contact::new(
            phone,
            ContactDetails {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                pronouns: self.pronouns,
                ringtone,
                birthday: self.birthday,
                notes: self.notes,
            },
        )
    }
}
