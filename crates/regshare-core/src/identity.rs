//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers used throughout the ledger. These
//! prevent accidental identifier confusion: you cannot pass a `BatchId`
//! where an `InvestorId` is expected, and you cannot hand the ledger a raw
//! integer as a batch key.
//!
//! ## Validation
//!
//! [`InvestorId`] is validated to be non-empty at construction time,
//! including on deserialization. [`BatchId`] values are allocated
//! sequentially by the batch store and carry no internal structure.
//! [`EventId`] is UUID-based and always valid by construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// -- Validating Deserialize for InvestorId ------------------------------------

impl<'de> Deserialize<'de> for InvestorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// An opaque investor identity: a wallet address, account reference, or any
/// other stable identifier the surrounding system resolves callers to.
///
/// # Validation
///
/// Must be a non-empty string. No further format restrictions are imposed
/// because identity schemes vary across deployments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InvestorId(String);

impl InvestorId {
    /// Create an investor identifier from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidInvestorId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidInvestorId);
        }
        Ok(Self(trimmed))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InvestorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The key of one share batch. Allocated sequentially by the batch store,
/// starting at zero; never reused, even after every share in the batch has
/// been transferred away.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BatchId(u64);

impl BatchId {
    /// Wrap a raw batch number. Only the batch store's allocator should
    /// mint previously unseen values.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw batch number.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "batch:{}", self.0)
    }
}

/// Unique identifier for one entry in the ledger's audit event log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Generate a new random event identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event:{}", self.0)
    }
}
