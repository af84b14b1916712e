//! # Audit Event Log
//!
//! Every committed mutation appends one event to the facade's in-order
//! log. Rejected operations append nothing. Transfer events carry the
//! authorization-time timestamp supplied by the caller; no event records
//! a wall-clock read, so replaying the same operations yields the same
//! log.

use serde::{Deserialize, Serialize};

use regshare_core::{BatchId, EventId, InvestorId, Timestamp};

/// One committed mutation, as recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Unique identifier of this log entry.
    pub id: EventId,
    /// What was committed.
    pub action: LedgerAction,
}

impl LedgerEvent {
    /// Record a committed action under a fresh event id.
    pub fn record(action: LedgerAction) -> Self {
        Self {
            id: EventId::new(),
            action,
        }
    }
}

/// The committed mutation kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerAction {
    /// A whitelist record was inserted or replaced.
    WhitelistModified {
        /// The investor whose record changed.
        investor: InvestorId,
    },
    /// A batch was minted.
    Minted {
        /// The freshly allocated batch.
        batch: BatchId,
        /// Initial holder.
        owner: InvestorId,
        /// Share quantity, fixed for the batch's lifetime.
        quantity: u64,
        /// Whether transfer-time restriction checks apply.
        restricted: bool,
    },
    /// A batch's legend was overwritten.
    LegendScrubbed {
        /// The affected batch.
        batch: BatchId,
        /// The replacement legend text.
        new_legend: String,
    },
    /// A batch changed hands.
    Transferred {
        /// The batch that moved.
        batch: BatchId,
        /// Previous holder.
        from: InvestorId,
        /// New holder.
        to: InvestorId,
        /// The authorization time supplied by the caller.
        at: Timestamp,
    },
    /// A holder granted or revoked an operator approval.
    OperatorSet {
        /// The approving holder.
        owner: InvestorId,
        /// The operator whose approval changed.
        operator: InvestorId,
        /// The new approval state.
        approved: bool,
    },
}
