//! Ringtone assigned to a contact.

use crate::domain::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The ringtone played for a contact's calls.
///
/// Persisted as its integer ordinal, so the declaration order is part of the
/// storage format and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Ringtone {
    Default,
    Classic,
    Marimba,
    Silent,
}

impl Ringtone {
    /// All ringtones, in ordinal order.
    pub const ALL: [Ringtone; 4] = [
        Ringtone::Default,
        Ringtone::Classic,
        Ringtone::Marimba,
        Ringtone::Silent,
    ];

    /// Human-readable name, also accepted by [`Ringtone::parse`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Classic => "Classic",
            Self::Marimba => "Marimba",
            Self::Silent => "Silent",
        }
    }

    /// Parse a ringtone from its name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

impl Default for Ringtone {
    fn default() -> Self {
        Self::Default
    }
}

impl fmt::Display for Ringtone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Ringtone> for u8 {
    fn from(ringtone: Ringtone) -> Self {
        match ringtone {
            Ringtone::Default => 0,
            Ringtone::Classic => 1,
            Ringtone::Marimba => 2,
            Ringtone::Silent => 3,
        }
    }
}

impl TryFrom<u8> for Ringtone {
    type Error = ValidationError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Self::Default),
            1 => Ok(Self::Classic),
            2 => Ok(Self::Marimba),
            3 => Ok(Self::Silent),
            other => Err(ValidationError::UnknownRingtone(other)),
        }
    }
}
