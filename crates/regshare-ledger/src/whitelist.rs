//! # Whitelist Registry
//!
//! Per-investor eligibility records. A record grants the investor a
//! time-bounded window in which it may receive restricted shares, tagged
//! with a jurisdiction code and an investor category tier.
//!
//! Eligibility is evaluated dynamically against a caller-supplied time at
//! authorization time; records never auto-expire from storage. An investor
//! absent from the registry fails every eligibility check, as does one
//! whose record has been revoked via `is_valid = false`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use regshare_core::{InvestorId, JurisdictionCode, Timestamp, ValidationError};

/// One investor's eligibility record.
///
/// The window is inclusive at both ends; `eligible_from == eligible_to`
/// is a valid single-instant window, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WhitelistEntryRecord")]
pub struct WhitelistEntry {
    eligible_from: Timestamp,
    eligible_to: Timestamp,
    jurisdiction: JurisdictionCode,
    is_valid: bool,
    category: u32,
}

/// Raw wire shape for [`WhitelistEntry`]; deserialization funnels through
/// [`WhitelistEntry::new`] so the window invariant holds for parsed input
/// as well as constructed input.
#[derive(Debug, Deserialize)]
struct WhitelistEntryRecord {
    eligible_from: Timestamp,
    eligible_to: Timestamp,
    jurisdiction: JurisdictionCode,
    is_valid: bool,
    category: u32,
}

impl TryFrom<WhitelistEntryRecord> for WhitelistEntry {
    type Error = ValidationError;

    fn try_from(raw: WhitelistEntryRecord) -> Result<Self, Self::Error> {
        Self::new(
            raw.eligible_from,
            raw.eligible_to,
            raw.jurisdiction,
            raw.is_valid,
            raw.category,
        )
    }
}

impl WhitelistEntry {
    /// Create an eligibility record.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWindow`] if `eligible_from` is
    /// after `eligible_to`.
    pub fn new(
        eligible_from: Timestamp,
        eligible_to: Timestamp,
        jurisdiction: JurisdictionCode,
        is_valid: bool,
        category: u32,
    ) -> Result<Self, ValidationError> {
        if eligible_from > eligible_to {
            return Err(ValidationError::InvalidWindow {
                from: eligible_from.to_iso8601(),
                to: eligible_to.to_iso8601(),
            });
        }
        Ok(Self {
            eligible_from,
            eligible_to,
            jurisdiction,
            is_valid,
            category,
        })
    }

    /// Start of the eligibility window (inclusive).
    pub fn eligible_from(&self) -> Timestamp {
        self.eligible_from
    }

    /// End of the eligibility window (inclusive).
    pub fn eligible_to(&self) -> Timestamp {
        self.eligible_to
    }

    /// Jurisdiction code recorded for the investor.
    pub fn jurisdiction(&self) -> &JurisdictionCode {
        &self.jurisdiction
    }

    /// Whether the record is currently valid. Revocation clears this flag
    /// without deleting the record.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Investor classification tier.
    pub fn category(&self) -> u32 {
        self.category
    }

    /// Whether this record grants eligibility at `at`: the record must be
    /// valid and `at` must fall within the window, inclusive at both ends.
    pub fn covers(&self, at: Timestamp) -> bool {
        self.is_valid && self.eligible_from <= at && at <= self.eligible_to
    }
}

/// The registry of eligibility records, keyed by investor identity.
///
/// The registry performs no privilege checks of its own; the facade
/// restricts upserts to the issuer.
#[derive(Debug, Default)]
pub struct WhitelistRegistry {
    entries: HashMap<InvestorId, WhitelistEntry>,
}

impl WhitelistRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `investor`.
    pub fn set_entry(&mut self, investor: InvestorId, entry: WhitelistEntry) {
        tracing::debug!(
            investor = %investor,
            jurisdiction = %entry.jurisdiction(),
            valid = entry.is_valid(),
            "whitelist entry upserted"
        );
        self.entries.insert(investor, entry);
    }

    /// Whether `investor` may receive restricted shares at `at`.
    ///
    /// True iff a record exists, it has not been revoked, and `at` falls
    /// within its window. An absent investor is simply not eligible.
    pub fn is_eligible(&self, investor: &InvestorId, at: Timestamp) -> bool {
        self.entries
            .get(investor)
            .map(|entry| entry.covers(at))
            .unwrap_or(false)
    }

    /// Raw record accessor for auditing.
    pub fn lookup(&self, investor: &InvestorId) -> Option<&WhitelistEntry> {
        self.entries.get(investor)
    }

    /// Number of stored records, revoked ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor(raw: &str) -> InvestorId {
        InvestorId::new(raw).unwrap()
    }

    fn us() -> JurisdictionCode {
        JurisdictionCode::new("US").unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn entry(from: &str, to: &str, valid: bool) -> WhitelistEntry {
        WhitelistEntry::new(ts(from), ts(to), us(), valid, 1).unwrap()
    }

    #[test]
    fn window_invariant_enforced() {
        let err = WhitelistEntry::new(
            ts("2026-06-01T00:00:00Z"),
            ts("2026-01-01T00:00:00Z"),
            us(),
            true,
            1,
        );
        assert!(matches!(err, Err(ValidationError::InvalidWindow { .. })));
    }

    #[test]
    fn single_instant_window_is_valid() {
        let at = ts("2026-01-01T00:00:00Z");
        let entry = WhitelistEntry::new(at, at, us(), true, 1).unwrap();
        assert!(entry.covers(at));
        assert!(!entry.covers(ts("2026-01-01T00:00:01Z")));
    }

    #[test]
    fn window_inclusive_at_both_ends() {
        let entry = entry("2026-01-01T00:00:00Z", "2026-12-31T00:00:00Z", true);
        assert!(entry.covers(ts("2026-01-01T00:00:00Z")));
        assert!(entry.covers(ts("2026-12-31T00:00:00Z")));
        assert!(!entry.covers(ts("2025-12-31T23:59:59Z")));
        assert!(!entry.covers(ts("2026-12-31T00:00:01Z")));
    }

    #[test]
    fn absent_investor_not_eligible() {
        let registry = WhitelistRegistry::new();
        assert!(!registry.is_eligible(&investor("ghost"), ts("2026-01-01T00:00:00Z")));
    }

    #[test]
    fn revoked_entry_not_eligible_but_still_stored() {
        let mut registry = WhitelistRegistry::new();
        let sh = investor("sh1");
        registry.set_entry(
            sh.clone(),
            entry("2026-01-01T00:00:00Z", "2026-12-31T00:00:00Z", false),
        );
        assert!(!registry.is_eligible(&sh, ts("2026-06-01T00:00:00Z")));
        assert!(registry.lookup(&sh).is_some());
    }

    #[test]
    fn upsert_replaces_record() {
        let mut registry = WhitelistRegistry::new();
        let sh = investor("sh1");
        registry.set_entry(
            sh.clone(),
            entry("2026-01-01T00:00:00Z", "2026-12-31T00:00:00Z", true),
        );
        assert!(registry.is_eligible(&sh, ts("2026-06-01T00:00:00Z")));

        // Revocation without deletion.
        registry.set_entry(
            sh.clone(),
            entry("2026-01-01T00:00:00Z", "2026-12-31T00:00:00Z", false),
        );
        assert!(!registry.is_eligible(&sh, ts("2026-06-01T00:00:00Z")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn entry_deserialize_rejects_inverted_window() {
        let json = r#"{
            "eligible_from": "2026-06-01T00:00:00Z",
            "eligible_to": "2026-01-01T00:00:00Z",
            "jurisdiction": "US",
            "is_valid": true,
            "category": 1
        }"#;
        assert!(serde_json::from_str::<WhitelistEntry>(json).is_err());
    }

    #[test]
    fn entry_serde_roundtrip() {
        let original = entry("2026-01-01T00:00:00Z", "2026-12-31T00:00:00Z", true);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: WhitelistEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }
}
