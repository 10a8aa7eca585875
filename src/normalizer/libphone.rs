//! Normalizer backed by the `phonenumber` metadata tables.

use super::PhoneNumberNormalizer;
use crate::domain::ValidationError;
use phonenumber::{country, Mode};

/// Production [`PhoneNumberNormalizer`] built on the `phonenumber` crate
/// (the Rust port of libphonenumber).
///
/// Construct once and share via `Arc`; the metadata behind it is large.
#[derive(Debug, Default)]
pub struct LibPhoneNormalizer;

impl LibPhoneNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl PhoneNumberNormalizer for LibPhoneNormalizer {
    fn to_e164(&self, raw: &str, default_region: &str) -> Result<String, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingPhone);
        }

        let region: country::Id = default_region
            .parse()
            .map_err(|_| ValidationError::InvalidPhone(raw.to_string()))?;

        let parsed = phonenumber::parse(Some(region), raw)
            .map_err(|_| ValidationError::InvalidPhone(raw.to_string()))?;

        if !phonenumber::is_valid(&parsed) {
            return Err(ValidationError::InvalidPhone(raw.to_string()));
        }

        Ok(parsed.format().mode(Mode::E164).to_string())
    }
}
