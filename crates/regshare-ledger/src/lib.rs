//! # regshare-ledger: Compliance-Gated Share Batch Ledger
//!
//! A non-fungible share ledger for compliance-gated equity. Each batch
//! represents one issuance of a fixed quantity of shares, subject to
//! jurisdictional whitelisting, time-bounded trading eligibility, and a
//! free-text legal restriction legend that must be cleared before the
//! batch can move.
//!
//! ## Components
//!
//! - [`whitelist`]: per-investor eligibility records with inclusive time
//!   windows, evaluated against caller-supplied time.
//! - [`batch`]: the arena of share batches, keyed by sequentially
//!   allocated identifiers that are never reused.
//! - [`index`]: per-owner enumerable sequences kept in lockstep with the
//!   store.
//! - [`transfer`]: the authorization engine; a pure decision function
//!   followed by an all-or-nothing application step.
//! - [`ledger`]: the [`ShareLedger`] facade that owns every component and
//!   serializes all mutation.
//! - [`event`]: the audit log of committed mutations.
//!
//! ## Guarantees
//!
//! Every mutating operation either commits all of its sub-steps or none;
//! partial application is never observable through any subsequent call.
//! Authorization is deterministic given state and the supplied timestamp.
//! There is no wall-clock read, I/O wait, or external call on the
//! authorization path.

pub mod batch;
pub mod error;
pub mod event;
pub mod index;
pub mod ledger;
pub mod transfer;
pub mod whitelist;

pub use batch::{BatchStore, ShareBatch};
pub use error::LedgerError;
pub use event::{LedgerAction, LedgerEvent};
pub use index::OwnershipIndex;
pub use ledger::ShareLedger;
pub use whitelist::{WhitelistEntry, WhitelistRegistry};
