//! Persistence port and its backends.
//!
//! Provides abstraction over phonebook state storage, enabling different
//! implementations (JSON file, in-memory). Every load and save exchanges a
//! structurally independent copy of the state; implementations must never
//! retain references into the service's live working set.

mod dto;
mod in_memory;
mod json_file;

pub use in_memory::InMemoryPhoneBookStateStorage;
pub use json_file::{JsonFilePhoneBookStateStorage, JsonFileStorageOptions};

use crate::error::StorageResult;
use crate::models::PhoneBookState;

/// Durable persistence of the complete phonebook state.
pub trait PhoneBookStateStorage: Send + Sync {
    /// Load the previously committed state.
    ///
    /// Returns an empty state when no prior data exists; a present but
    /// unreadable or unparseable store is an error, never silently empty.
    fn load(&self) -> StorageResult<PhoneBookState>;

    /// Durably persist the complete given state, replacing prior content.
    fn save(&self, state: &PhoneBookState) -> StorageResult<()>;
}
