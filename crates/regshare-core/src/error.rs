//! # Validation Errors
//!
//! Construction-time errors for the core newtypes. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Rejection of an invalid value at newtype construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Investor identifier was empty or whitespace-only.
    #[error("investor identifier must be non-empty")]
    InvalidInvestorId,

    /// Jurisdiction code was empty or whitespace-only.
    #[error("jurisdiction code must be non-empty")]
    InvalidJurisdictionCode,

    /// Timestamp string or epoch value could not be interpreted.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Eligibility window with `eligible_from` after `eligible_to`.
    #[error("eligibility window starts at {from} but ends at {to}")]
    InvalidWindow {
        /// Start of the rejected window.
        from: String,
        /// End of the rejected window.
        to: String,
    },
}
