//! # Ledger Facade
//!
//! `ShareLedger` is the single owner of the whitelist registry, batch
//! store, ownership index, operator approvals, and audit log. No component
//! outside the facade mutates them, which is what keeps store and index
//! from diverging.
//!
//! The ledger is one sequentially consistent state machine: mutations go
//! through `&mut self`, so no two of them interleave their intermediate
//! steps, and `&self` reads observe only committed state. Privilege is
//! part of each call's inputs; the facade holds the issuer identity it was
//! constructed with and compares callers against it, rather than
//! consulting any ambient authority.

use std::collections::{HashMap, HashSet};

use regshare_core::{BatchId, InvestorId, Timestamp};

use crate::batch::{BatchStore, ShareBatch};
use crate::error::LedgerError;
use crate::event::{LedgerAction, LedgerEvent};
use crate::index::OwnershipIndex;
use crate::transfer;
use crate::whitelist::{WhitelistEntry, WhitelistRegistry};

/// The compliance-gated share ledger.
#[derive(Debug)]
pub struct ShareLedger {
    issuer: InvestorId,
    whitelist: WhitelistRegistry,
    store: BatchStore,
    index: OwnershipIndex,
    operators: HashMap<InvestorId, HashSet<InvestorId>>,
    events: Vec<LedgerEvent>,
}

impl ShareLedger {
    /// Create an empty ledger administered by `issuer`.
    pub fn new(issuer: InvestorId) -> Self {
        Self {
            issuer,
            whitelist: WhitelistRegistry::new(),
            store: BatchStore::new(),
            index: OwnershipIndex::new(),
            operators: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// The identity permitted to mint, whitelist, and scrub legends.
    pub fn issuer(&self) -> &InvestorId {
        &self.issuer
    }

    fn require_issuer(&self, caller: &InvestorId) -> Result<(), LedgerError> {
        if caller != &self.issuer {
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    // ── Issuer operations ────────────────────────────────────────────

    /// Insert or replace the whitelist record for `investor`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if `caller` is not the issuer.
    pub fn set_whitelist(
        &mut self,
        caller: &InvestorId,
        investor: InvestorId,
        entry: WhitelistEntry,
    ) -> Result<(), LedgerError> {
        self.require_issuer(caller)?;
        self.whitelist.set_entry(investor.clone(), entry);
        self.events
            .push(LedgerEvent::record(LedgerAction::WhitelistModified {
                investor,
            }));
        Ok(())
    }

    /// Mint a new batch of `quantity` shares to `recipient`.
    ///
    /// The recipient need not be whitelisted; issuance precedes
    /// eligibility windows in some flows, and only transfers are gated.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if `caller` is not the
    /// issuer, or [`LedgerError::InvalidQuantity`] if `quantity` is zero.
    pub fn mint(
        &mut self,
        caller: &InvestorId,
        recipient: InvestorId,
        legend: impl Into<String>,
        quantity: u64,
        restricted: bool,
    ) -> Result<BatchId, LedgerError> {
        self.require_issuer(caller)?;
        let batch = self
            .store
            .create(recipient.clone(), legend, quantity, restricted)?;
        self.index.add(recipient.clone(), batch);
        tracing::info!(
            batch = %batch,
            owner = %recipient,
            quantity,
            restricted,
            "batch minted"
        );
        self.events.push(LedgerEvent::record(LedgerAction::Minted {
            batch,
            owner: recipient,
            quantity,
            restricted,
        }));
        Ok(batch)
    }

    /// Overwrite the legend of `batch`. Clearing it to the empty string
    /// lifts the legend gate for that batch alone; other batches keep
    /// their legends.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if `caller` is not the
    /// issuer, or [`LedgerError::NotFound`] for an unknown batch.
    pub fn scrub_legend(
        &mut self,
        caller: &InvestorId,
        batch: BatchId,
        new_legend: impl Into<String>,
    ) -> Result<(), LedgerError> {
        self.require_issuer(caller)?;
        let new_legend = new_legend.into();
        self.store.set_legend(batch, new_legend.clone())?;
        tracing::info!(batch = %batch, cleared = new_legend.is_empty(), "legend scrubbed");
        self.events
            .push(LedgerEvent::record(LedgerAction::LegendScrubbed {
                batch,
                new_legend,
            }));
        Ok(())
    }

    // ── Holder operations ────────────────────────────────────────────

    /// Transfer `batch` from `from` to `to`, authorized at `current_time`.
    ///
    /// The caller must be `from` itself or an operator `from` has
    /// approved. Authorization then proceeds per the engine's gates; on
    /// success the ownership field, the sender's sequence, and the
    /// recipient's sequence update together.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`], [`LedgerError::NotOwner`],
    /// [`LedgerError::RestrictedByLegend`], or
    /// [`LedgerError::RecipientNotEligible`]; the state is unchanged in
    /// every failure case.
    pub fn transfer(
        &mut self,
        caller: &InvestorId,
        from: &InvestorId,
        to: &InvestorId,
        batch: BatchId,
        current_time: Timestamp,
    ) -> Result<(), LedgerError> {
        // Existence first, so probing with an unknown id reports NotFound
        // rather than leaking caller standing.
        self.store.get(batch)?;
        if caller != from && !self.is_operator(from, caller) {
            return Err(LedgerError::NotOwner {
                batch,
                caller: caller.clone(),
            });
        }
        transfer::authorize_and_transfer(
            &mut self.store,
            &mut self.index,
            &self.whitelist,
            batch,
            from,
            to,
            current_time,
        )?;
        self.events
            .push(LedgerEvent::record(LedgerAction::Transferred {
                batch,
                from: from.clone(),
                to: to.clone(),
                at: current_time,
            }));
        Ok(())
    }

    /// Grant or revoke `operator`'s right to transfer any of the caller's
    /// batches. Holders approve only for themselves.
    pub fn set_operator(&mut self, caller: &InvestorId, operator: InvestorId, approved: bool) {
        if approved {
            self.operators
                .entry(caller.clone())
                .or_default()
                .insert(operator.clone());
        } else if let Some(approved_set) = self.operators.get_mut(caller) {
            approved_set.remove(&operator);
            if approved_set.is_empty() {
                self.operators.remove(caller);
            }
        }
        tracing::debug!(owner = %caller, operator = %operator, approved, "operator approval set");
        self.events
            .push(LedgerEvent::record(LedgerAction::OperatorSet {
                owner: caller.clone(),
                operator,
                approved,
            }));
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Whether `operator` may move `owner`'s batches.
    pub fn is_operator(&self, owner: &InvestorId, operator: &InvestorId) -> bool {
        self.operators
            .get(owner)
            .map(|set| set.contains(operator))
            .unwrap_or(false)
    }

    /// Aggregate share quantity across every batch `owner` holds.
    ///
    /// Computed by summing the store's quantities over the owner's
    /// sequence on each call; there is no separately maintained counter
    /// to drift.
    pub fn balance_of(&self, owner: &InvestorId) -> u64 {
        self.index
            .batches(owner)
            .iter()
            .filter_map(|id| self.store.get(*id).ok())
            .map(ShareBatch::quantity)
            .sum()
    }

    /// Current holder of `batch`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for an unknown batch.
    pub fn owner_of(&self, batch: BatchId) -> Result<&InvestorId, LedgerError> {
        Ok(self.store.get(batch)?.owner())
    }

    /// The batch at `position` in `owner`'s enumerable sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IndexOutOfRange`] past the owner's holdings.
    pub fn batch_of_owner_by_index(
        &self,
        owner: &InvestorId,
        position: usize,
    ) -> Result<BatchId, LedgerError> {
        self.index.by_index(owner, position)
    }

    /// Full data of `batch`: legend, quantity, restriction flag, owner.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for an unknown batch.
    pub fn batch_data(&self, batch: BatchId) -> Result<&ShareBatch, LedgerError> {
        self.store.get(batch)
    }

    /// Total number of batches ever minted.
    pub fn total_batches(&self) -> u64 {
        self.store.len()
    }

    /// Total shares across all batches, regardless of holder.
    pub fn total_shares(&self) -> u64 {
        self.store.iter().map(|(_, batch)| batch.quantity()).sum()
    }

    /// The whitelist record for `investor`, if any.
    pub fn whitelist_entry(&self, investor: &InvestorId) -> Option<&WhitelistEntry> {
        self.whitelist.lookup(investor)
    }

    /// Whether `investor` may receive restricted shares at `at`.
    pub fn is_eligible(&self, investor: &InvestorId, at: Timestamp) -> bool {
        self.whitelist.is_eligible(investor, at)
    }

    /// The audit log, in commit order.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }
}
