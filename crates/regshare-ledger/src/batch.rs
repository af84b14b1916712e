//! # Share Batch Store
//!
//! The arena of non-fungible share batches. Each batch records one
//! issuance event: a fixed quantity of shares minted to one owner, with a
//! free-text restriction legend and a restriction flag fixed at mint time.
//!
//! Batches transfer whole; they are never split, merged, or deleted, and
//! identifiers are never reused. The store allocates identifiers
//! sequentially from zero, so iteration in key order is mint order.

use std::collections::BTreeMap;

use serde::Serialize;

use regshare_core::{BatchId, InvestorId};

use crate::error::LedgerError;

/// One issuance of shares: a non-fungible record of fixed quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareBatch {
    owner: InvestorId,
    quantity: u64,
    legend: String,
    restricted: bool,
}

impl ShareBatch {
    /// Current holder of the batch.
    pub fn owner(&self) -> &InvestorId {
        &self.owner
    }

    /// Number of shares in the batch. Immutable after mint.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// The restriction legend. Empty string means unrestricted text.
    pub fn legend(&self) -> &str {
        &self.legend
    }

    /// Whether transfer-time restriction checks apply to this batch.
    /// Fixed at mint.
    pub fn restricted(&self) -> bool {
        self.restricted
    }
}

/// Arena of share batches keyed by sequentially allocated [`BatchId`]s.
#[derive(Debug, Default)]
pub struct BatchStore {
    batches: BTreeMap<u64, ShareBatch>,
    next_id: u64,
}

impl BatchStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new batch and allocate its identifier.
    ///
    /// The store performs no whitelist check on `owner`: initial issuance
    /// precedes eligibility windows in some flows, so only transfers are
    /// gated.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidQuantity`] if `quantity` is zero.
    pub fn create(
        &mut self,
        owner: InvestorId,
        legend: impl Into<String>,
        quantity: u64,
        restricted: bool,
    ) -> Result<BatchId, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let id = BatchId::new(self.next_id);
        self.next_id += 1;
        self.batches.insert(
            id.as_u64(),
            ShareBatch {
                owner,
                quantity,
                legend: legend.into(),
                restricted,
            },
        );
        Ok(id)
    }

    /// Look up a batch.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the id was never minted.
    pub fn get(&self, batch: BatchId) -> Result<&ShareBatch, LedgerError> {
        self.batches
            .get(&batch.as_u64())
            .ok_or(LedgerError::NotFound { batch })
    }

    /// Overwrite the legend of a batch.
    ///
    /// Any replacement is accepted, including a non-empty legend that
    /// re-imposes restriction; the store does not enforce that scrubbing
    /// only ever widens permissions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the id was never minted.
    pub fn set_legend(
        &mut self,
        batch: BatchId,
        new_legend: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let record = self
            .batches
            .get_mut(&batch.as_u64())
            .ok_or(LedgerError::NotFound { batch })?;
        record.legend = new_legend.into();
        Ok(())
    }

    /// Reassign ownership of a batch. Called only by the transfer engine
    /// after authorization succeeds; the ownership index must be updated
    /// in the same operation.
    pub(crate) fn set_owner(
        &mut self,
        batch: BatchId,
        new_owner: InvestorId,
    ) -> Result<(), LedgerError> {
        let record = self
            .batches
            .get_mut(&batch.as_u64())
            .ok_or(LedgerError::NotFound { batch })?;
        record.owner = new_owner;
        Ok(())
    }

    /// Total number of batches ever minted.
    pub fn len(&self) -> u64 {
        self.next_id
    }

    /// Whether nothing has been minted yet.
    pub fn is_empty(&self) -> bool {
        self.next_id == 0
    }

    /// Iterate all batches in mint order.
    pub fn iter(&self) -> impl Iterator<Item = (BatchId, &ShareBatch)> {
        self.batches
            .iter()
            .map(|(raw, batch)| (BatchId::new(*raw), batch))
    }
}
