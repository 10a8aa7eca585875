//! Non-fatal domain advisories.

use std::fmt;

/// The fixed set of advisory codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// Another contact already carries the same first/last name pair.
    DuplicateName,
}

impl WarningCode {
    /// Stable machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateName => "DUPLICATE_NAME",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable (code, message) advisory.
///
/// Warnings are never raised as errors; they ride alongside successful
/// results to flag conditions the caller may want to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainWarning {
    code: WarningCode,
    message: String,
}

impl DomainWarning {
    /// Advisory for a contact whose name collides with an existing one.
    pub fn duplicate_name(first_name: &str, last_name: Option<&str>) -> Self {
        let last = match last_name {
            Some(last) => format!(" {}", last),
            None => String::new(),
        };
        Self {
            code: WarningCode::DuplicateName,
            message: format!(
                "Warning: another contact with the name '{}{}' already exists.",
                first_name, last
            ),
        }
    }

    pub fn code(&self) -> WarningCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
