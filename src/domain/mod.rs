//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts like
//! phone numbers and email addresses, plus the non-fatal advisory type.
//! Value objects validate at construction time and prevent invalid data
//! from being represented in the system.

pub mod email;
pub mod errors;
pub mod phone;
pub mod warning;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::{PhoneNumber, DEFAULT_REGION};
pub use warning::{DomainWarning, WarningCode};
