//! Phonebook - a single-user contact directory with durable persistence.
//!
//! Contacts are identified by their phone number's canonical E.164 form.
//! The service layer owns the in-memory collection, enforces uniqueness and
//! validation invariants, computes duplicate-name advisories, and persists
//! the full state atomically after every mutation.
//!
//! # Architecture
//!
//! - **domain**: value objects (phone number, email) and advisory warnings
//! - **models**: the contact entity, ringtones, and the aggregate state
//! - **normalizer**: the phone normalization port and its libphonenumber-backed
//!   implementation
//! - **storage**: the persistence port with file-backed and in-memory backends
//! - **services**: the phonebook service orchestrating it all
//! - **error**: error types at the service and storage boundaries
//! - **config**: configuration from environment variables
//! - **cli**: the interactive console front end

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod services;
pub mod storage;

pub use config::Config;
pub use domain::{DomainWarning, EmailAddress, PhoneNumber, ValidationError, WarningCode};
pub use error::{ConfigError, PhoneBookError, StorageError};
pub use models::{Contact, ContactDetails, PhoneBookState, Ringtone};
pub use normalizer::{LibPhoneNormalizer, PhoneNumberNormalizer};
pub use services::PhoneBookService;
pub use storage::{
    InMemoryPhoneBookStateStorage, JsonFilePhoneBookStateStorage, JsonFileStorageOptions,
    PhoneBookStateStorage,
};
