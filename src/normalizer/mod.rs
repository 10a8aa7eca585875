//! Phone number normalization port.
//!
//! The core never parses phone numbers itself; it consumes this capability
//! boundary. The production implementation sits on top of the `phonenumber`
//! metadata tables, tests substitute a deterministic fake.

mod libphone;

pub use libphone::LibPhoneNormalizer;

use crate::domain::ValidationError;

/// Converts raw user input into canonical E.164 form.
///
/// Implementations are expected to be long-lived: the backing metadata is
/// large, so one instance is constructed at process start and shared by
/// reference with every consumer.
pub trait PhoneNumberNormalizer: Send + Sync {
    /// Normalize `raw` into E.164, interpreting national-format input
    /// against `default_region` (an ISO 3166-1 alpha-2 code such as `"RO"`).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingPhone` for blank input and
    /// `ValidationError::InvalidPhone` when the input cannot be parsed or is
    /// not a valid number.
    fn to_e164(&self, raw: &str, default_region: &str) -> Result<String, ValidationError>;
}
