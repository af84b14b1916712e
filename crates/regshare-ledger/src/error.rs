//! # Ledger Errors
//!
//! Every rejected operation surfaces as a typed `LedgerError` with no
//! partial state change behind it. There are no transient-failure classes
//! in this deterministic model; nothing is retried or swallowed.

use regshare_core::{BatchId, InvestorId};
use thiserror::Error;

/// Rejection of a requested ledger operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Mint requested with a zero share quantity.
    #[error("mint rejected: quantity must be positive")]
    InvalidQuantity,

    /// Reference to a batch id that was never minted.
    #[error("{batch} does not exist")]
    NotFound {
        /// The unknown batch id.
        batch: BatchId,
    },

    /// Transfer attempted by a non-holder: either `from` does not own the
    /// batch, or the caller is neither the holder nor an approved operator.
    #[error("{caller} is not the holder of {batch} nor an approved operator")]
    NotOwner {
        /// The batch whose transfer was attempted.
        batch: BatchId,
        /// The identity that attempted it.
        caller: InvestorId,
    },

    /// A non-empty legend blocks transfer unconditionally; it must be
    /// scrubbed before the batch can move.
    #[error("{batch} carries a restrictive legend and cannot be transferred")]
    RestrictedByLegend {
        /// The legend-bearing batch.
        batch: BatchId,
    },

    /// The recipient failed the whitelist eligibility check at the
    /// supplied time.
    #[error("recipient {investor} is not eligible to receive restricted shares")]
    RecipientNotEligible {
        /// The ineligible recipient.
        investor: InvestorId,
    },

    /// Enumeration position beyond the owner's holdings.
    #[error("{owner} holds {count} batches; position {position} is out of range")]
    IndexOutOfRange {
        /// The owner being enumerated.
        owner: InvestorId,
        /// The requested position.
        position: usize,
        /// The owner's actual holding count.
        count: usize,
    },

    /// The ownership index has no record of `owner` holding `batch`.
    /// Store and index are mutated in lockstep by the facade, so this
    /// indicates a programming error, not a recoverable runtime condition.
    #[error("ownership index divergence: {owner} does not hold {batch}")]
    NotOwned {
        /// The owner whose sequence was consulted.
        owner: InvestorId,
        /// The batch missing from it.
        batch: BatchId,
    },

    /// Issuer-privileged operation invoked by a non-issuer identity.
    #[error("{caller} is not authorized for issuer operations")]
    Unauthorized {
        /// The identity that attempted the operation.
        caller: InvestorId,
    },
}
