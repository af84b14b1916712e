//! # regshare-core: Foundational Types for the Share Ledger
//!
//! This crate is the bedrock of the regshare workspace. It defines the
//! identity and time primitives every other crate builds on. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `InvestorId`, `BatchId`,
//!    `EventId`, `JurisdictionCode` are all newtypes with validated
//!    constructors where validation applies. No bare strings for identifiers.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Eligibility windows compare these
//!    directly; there is no timezone ambiguity anywhere in the system.
//!
//! 3. **Caller-supplied time.** Nothing in this crate reads the wall clock
//!    on an authorization path. `Timestamp::now()` exists for callers that
//!    live at the edge (the CLI), not for ledger internals.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regshare-*` crates (this is the leaf).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod jurisdiction;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{BatchId, EventId, InvestorId};
pub use jurisdiction::JurisdictionCode;
pub use temporal::Timestamp;
