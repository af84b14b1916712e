//! # Ownership Index
//!
//! Per-owner enumerable sequences of batch identifiers. The index is a
//! derived view over the batch store; it is never independently
//! authoritative. The facade mutates store and index in lockstep, so a
//! removal that misses is a divergence bug surfaced as
//! [`LedgerError::NotOwned`], not a condition callers handle.
//!
//! Sequences preserve insertion order, and removal shifts later entries
//! down one position, so "the Nth batch owned by X" is stable between
//! mutations of X's holdings.

use std::collections::HashMap;

use regshare_core::{BatchId, InvestorId};

use crate::error::LedgerError;

/// Per-owner ordered sequences of owned batch identifiers.
#[derive(Debug, Default)]
pub struct OwnershipIndex {
    sequences: HashMap<InvestorId, Vec<BatchId>>,
}

impl OwnershipIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `batch` to `owner`'s sequence.
    pub fn add(&mut self, owner: InvestorId, batch: BatchId) {
        self.sequences.entry(owner).or_default().push(batch);
    }

    /// Remove `batch` from `owner`'s sequence by identity.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotOwned`] if the sequence does not contain
    /// `batch`. Callers that keep store and index in lockstep never see
    /// this.
    pub fn remove(&mut self, owner: &InvestorId, batch: BatchId) -> Result<(), LedgerError> {
        let sequence = self.sequences.get_mut(owner).ok_or(LedgerError::NotOwned {
            owner: owner.clone(),
            batch,
        })?;
        let position =
            sequence
                .iter()
                .position(|held| *held == batch)
                .ok_or(LedgerError::NotOwned {
                    owner: owner.clone(),
                    batch,
                })?;
        sequence.remove(position);
        if sequence.is_empty() {
            self.sequences.remove(owner);
        }
        Ok(())
    }

    /// The batch at `position` in `owner`'s sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IndexOutOfRange`] if `position` is at or
    /// beyond the owner's holding count.
    pub fn by_index(&self, owner: &InvestorId, position: usize) -> Result<BatchId, LedgerError> {
        let sequence = self.batches(owner);
        sequence
            .get(position)
            .copied()
            .ok_or(LedgerError::IndexOutOfRange {
                owner: owner.clone(),
                position,
                count: sequence.len(),
            })
    }

    /// The owner's full sequence, in acquisition order. Empty for owners
    /// holding nothing.
    pub fn batches(&self, owner: &InvestorId) -> &[BatchId] {
        self.sequences
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of batches currently held by `owner`.
    pub fn count(&self, owner: &InvestorId) -> usize {
        self.batches(owner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor(raw: &str) -> InvestorId {
        InvestorId::new(raw).unwrap()
    }

    #[test]
    fn add_appends_in_order() {
        let mut index = OwnershipIndex::new();
        let sh = investor("sh1");
        index.add(sh.clone(), BatchId::new(0));
        index.add(sh.clone(), BatchId::new(1));
        index.add(sh.clone(), BatchId::new(2));
        assert_eq!(
            index.batches(&sh),
            &[BatchId::new(0), BatchId::new(1), BatchId::new(2)]
        );
        assert_eq!(index.count(&sh), 3);
    }

    #[test]
    fn remove_shifts_later_positions_down() {
        let mut index = OwnershipIndex::new();
        let sh = investor("sh1");
        index.add(sh.clone(), BatchId::new(0));
        index.add(sh.clone(), BatchId::new(1));
        index.add(sh.clone(), BatchId::new(2));

        index.remove(&sh, BatchId::new(1)).unwrap();
        assert_eq!(index.batches(&sh), &[BatchId::new(0), BatchId::new(2)]);
        assert_eq!(index.by_index(&sh, 1).unwrap(), BatchId::new(2));
    }

    #[test]
    fn remove_absent_batch_is_divergence() {
        let mut index = OwnershipIndex::new();
        let sh = investor("sh1");
        index.add(sh.clone(), BatchId::new(0));
        assert!(matches!(
            index.remove(&sh, BatchId::new(5)),
            Err(LedgerError::NotOwned { .. })
        ));
        assert!(matches!(
            index.remove(&investor("sh2"), BatchId::new(0)),
            Err(LedgerError::NotOwned { .. })
        ));
    }

    #[test]
    fn by_index_out_of_range() {
        let mut index = OwnershipIndex::new();
        let sh = investor("sh1");
        index.add(sh.clone(), BatchId::new(0));
        let err = index.by_index(&sh, 1).unwrap_err();
        assert_eq!(
            err,
            LedgerError::IndexOutOfRange {
                owner: sh.clone(),
                position: 1,
                count: 1,
            }
        );
    }

    #[test]
    fn unknown_owner_has_empty_sequence() {
        let index = OwnershipIndex::new();
        let ghost = investor("ghost");
        assert!(index.batches(&ghost).is_empty());
        assert_eq!(index.count(&ghost), 0);
        assert!(matches!(
            index.by_index(&ghost, 0),
            Err(LedgerError::IndexOutOfRange { count: 0, .. })
        ));
    }

    #[test]
    fn emptied_owner_drops_to_zero() {
        let mut index = OwnershipIndex::new();
        let sh = investor("sh1");
        index.add(sh.clone(), BatchId::new(0));
        index.remove(&sh, BatchId::new(0)).unwrap();
        assert_eq!(index.count(&sh), 0);
    }
}
