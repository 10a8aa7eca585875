//! PhoneNumber value object.

use super::errors::ValidationError;
use crate::normalizer::PhoneNumberNormalizer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Region used when a caller does not supply one.
pub const DEFAULT_REGION: &str = "RO";

static E164_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("Failed to compile E.164 regex"));

/// A phone number carrying both the user's original input and its canonical
/// E.164 form.
///
/// The canonical form is the contact's identity key: equality, hashing and
/// ordering are defined solely on `e164`. Once constructed, a `PhoneNumber`
/// cannot be mutated.
///
/// There are two construction paths:
///
/// - [`PhoneNumber::create`] normalizes raw user input through the
///   [`PhoneNumberNormalizer`] port.
/// - [`PhoneNumber::from_e164`] rehydrates a stored canonical string and
///   rejects anything that does not match the E.164 shape with
///   [`ValidationError::CorruptedPhone`].
#[derive(Debug, Clone)]
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// Normalize raw user input into a `PhoneNumber`.
    ///
    /// The input is trimmed first. When `default_region` is `None`, the fixed
    /// [`DEFAULT_REGION`] is used.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingPhone` for blank input, or the
    /// normalizer's error verbatim when the input cannot be normalized.
    pub fn create(
        raw: &str,
        normalizer: &dyn PhoneNumberNormalizer,
        default_region: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingPhone);
        }

        let region = match default_region {
            Some(region) if !region.trim().is_empty() => region,
            _ => DEFAULT_REGION,
        };

        let e164 = normalizer.to_e164(raw, region)?;

        Ok(Self {
            raw: raw.to_string(),
            e164,
        })
    }

    /// Rehydrate a `PhoneNumber` from a stored canonical string.
    ///
    /// When `raw` is absent the canonical form doubles as the raw form.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::CorruptedPhone` if `e164` does not match
    /// `^\+[1-9]\d{1,14}$`. This defends against hand-edited or corrupted
    /// persisted files.
    pub fn from_e164(e164: impl Into<String>, raw: Option<String>) -> Result<Self, ValidationError> {
        let e164 = e164.into();

        if !E164_REGEX.is_match(&e164) {
            return Err(ValidationError::CorruptedPhone(e164));
        }

        let raw = raw.unwrap_or_else(|| e164.clone());

        Ok(Self { raw, e164 })
    }

    /// The original user input, as entered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The canonical E.164 form, e.g. `+40721234567`.
    pub fn e164(&self) -> &str {
        &self.e164
    }
}

// Identity is the canonical form only; two numbers entered differently but
// normalizing to the same E.164 string are the same number.
impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.e164)
    }
}
