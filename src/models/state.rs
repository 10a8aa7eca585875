//! The phonebook aggregate.

use crate::models::Contact;

/// The complete collection of contacts.
///
/// This is the exact unit exchanged with the storage port: every load and
/// save moves a structurally independent copy of the whole collection, so
/// storage implementations never alias the service's live working set.
///
/// Insertion order is preserved for deterministic serialization; it carries
/// no domain meaning.
#[derive(Debug, Clone, Default)]
pub struct PhoneBookState {
    pub contacts: Vec<Contact>,
}

impl PhoneBookState {
    pub fn new() -> Self {
        Self::default()
    }
}
