//! Data models for the phonebook.
//!
//! This module contains the contact entity, its ringtone, and the aggregate
//! state exchanged with storage.

pub mod contact;
pub mod ringtone;
pub mod state;

pub use contact::{Contact, ContactDetails};
pub use ringtone::Ringtone;
pub use state::PhoneBookState;
