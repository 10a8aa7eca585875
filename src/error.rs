//! Error types for the phonebook.
//!
//! This module defines the service- and infrastructure-level error types
//! using `thiserror`. Domain validation errors live in [`crate::domain`];
//! they are wrapped transparently here so callers see them verbatim.

use crate::domain::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::services::PhoneBookService`].
#[derive(Error, Debug)]
pub enum PhoneBookError {
    /// Malformed or missing input; recoverable by re-prompting.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another contact already owns this canonical phone number.
    #[error("Phone number is already in use: {e164}")]
    DuplicatePhoneNumber { e164: String },

    /// No contact matches the lookup key.
    #[error("Contact not found for phone: {0}")]
    ContactNotFound(String),

    /// Persistence failed; the underlying cause is attached.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised by storage implementations.
///
/// Every variant wraps its underlying cause (reachable through
/// `std::error::Error::source`) instead of re-exporting the backing
/// technology's error type in its own shape.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading the storage file failed.
    #[error("Could not load phonebook data from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the storage file failed.
    #[error("Could not save phonebook data to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage file exists but cannot be parsed.
    ///
    /// Distinct from the file being absent, which is a normal first run.
    #[error("Phonebook storage file is corrupted: {path}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The state could not be serialized.
    #[error("Could not serialize phonebook data")]
    Serialize(#[source] serde_json::Error),

    /// A stored record violates a domain invariant (corrupted or
    /// hand-edited file).
    #[error("Stored contact record is invalid: {0}")]
    InvalidRecord(#[from] ValidationError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with PhoneBookError
pub type PhoneBookResult<T> = Result<T, PhoneBookError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
