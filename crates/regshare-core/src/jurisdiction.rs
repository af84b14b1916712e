//! # Jurisdiction Codes
//!
//! Newtype for the jurisdiction recorded on a whitelist entry, typically an
//! ISO 3166-1 code ("US", "SG") or a regime-specific label ("US-REG-S").
//! The ledger stores the code verbatim; it does not interpret it when
//! authorizing transfers. Jurisdiction-aware policy lives with whoever
//! maintains the whitelist.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

impl<'de> Deserialize<'de> for JurisdictionCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A jurisdiction code attached to a whitelist entry.
///
/// # Validation
///
/// Must be a non-empty string. No further format restrictions are imposed
/// because regime naming varies across issuances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct JurisdictionCode(String);

impl JurisdictionCode {
    /// Create a jurisdiction code from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJurisdictionCode`] if the string
    /// is empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidJurisdictionCode);
        }
        Ok(Self(trimmed))
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
