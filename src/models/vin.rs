use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::VinError;

/// Required VIN length in characters
pub const VIN_LENGTH: usize = 17;

/// A VIN that has passed the length check.
///
/// Only the length is validated; check-digit verification is left to the
/// decoder authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vin(String);

impl Vin {
    /// Validate an optional raw VIN.
    ///
    /// `None` and the empty string are reported as [`VinError::Missing`];
    /// anything else that is not exactly 17 characters is
    /// [`VinError::InvalidLength`].
    pub fn parse(raw: Option<&str>) -> Result<Self, VinError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(VinError::Missing),
        };

        let length = raw.chars().count();
        if length != VIN_LENGTH {
            return Err(VinError::InvalidLength { length });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Vin {
    type Error = VinError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(Some(value))
    }
}

impl AsRef<str> for Vin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
