//! # Transfer Authorization Engine
//!
//! Decides whether a batch may change hands and, on success, applies the
//! ownership change to store and index as one all-or-nothing step.
//!
//! Restriction is evaluated per batch, not per holder. Legal restrictions
//! attach to the issuance event, so a holder may simultaneously own both
//! restricted and freely transferable batches.
//!
//! The decision is a pure function of `(batch, from, to, whitelist, at)`.
//! Nothing on this path reads a clock, performs I/O, or calls out, so a
//! verdict is reproducible from the same state and time.

use regshare_core::{BatchId, InvestorId, Timestamp};

use crate::batch::{BatchStore, ShareBatch};
use crate::error::LedgerError;
use crate::index::OwnershipIndex;
use crate::whitelist::WhitelistRegistry;

/// Decide whether `batch` may move from `from` to `to` at `at`.
///
/// Gate order, first failure wins:
///
/// 1. `from` must be the current holder.
/// 2. A restricted batch with a non-empty legend never moves, regardless
///    of the recipient's whitelist standing; the legend must be scrubbed
///    first.
/// 3. A restricted batch requires the recipient to be whitelist-eligible
///    at `at`. The sender's own eligibility is not re-checked; only the
///    recipient's current standing gates acceptance of incoming shares.
///
/// An unrestricted batch passes gates 2 and 3 unconditionally.
pub fn authorize(
    batch_id: BatchId,
    batch: &ShareBatch,
    from: &InvestorId,
    to: &InvestorId,
    whitelist: &WhitelistRegistry,
    at: Timestamp,
) -> Result<(), LedgerError> {
    if batch.owner() != from {
        return Err(LedgerError::NotOwner {
            batch: batch_id,
            caller: from.clone(),
        });
    }

    if batch.restricted() {
        if !batch.legend().is_empty() {
            return Err(LedgerError::RestrictedByLegend { batch: batch_id });
        }
        if !whitelist.is_eligible(to, at) {
            return Err(LedgerError::RecipientNotEligible {
                investor: to.clone(),
            });
        }
    }

    Ok(())
}

/// Authorize and, on success, apply the transfer of `batch_id` from
/// `from` to `to`.
///
/// Every check runs before any mutation, so a rejection leaves store and
/// index untouched. On success the index removal, index append, and store
/// ownership update commit together; no intermediate state is observable
/// through any subsequent call.
///
/// # Errors
///
/// Returns the first failing gate: [`LedgerError::NotFound`],
/// [`LedgerError::NotOwner`], [`LedgerError::RestrictedByLegend`], or
/// [`LedgerError::RecipientNotEligible`].
pub fn authorize_and_transfer(
    store: &mut BatchStore,
    index: &mut OwnershipIndex,
    whitelist: &WhitelistRegistry,
    batch_id: BatchId,
    from: &InvestorId,
    to: &InvestorId,
    at: Timestamp,
) -> Result<(), LedgerError> {
    let batch = store.get(batch_id)?;
    if let Err(rejection) = authorize(batch_id, batch, from, to, whitelist, at) {
        tracing::debug!(
            batch = %batch_id,
            from = %from,
            to = %to,
            at = %at,
            error = %rejection,
            "transfer rejected"
        );
        return Err(rejection);
    }

    // The only fallible mutation; it fires before the other two, so a
    // divergence error still leaves the ledger unchanged.
    index.remove(from, batch_id)?;
    index.add(to.clone(), batch_id);
    // Existence was established above; this cannot fail.
    store.set_owner(batch_id, to.clone())?;

    tracing::info!(batch = %batch_id, from = %from, to = %to, "batch transferred");
    Ok(())
}
