//! # regshare-cli: Scenario Runner for the Share Ledger
//!
//! Library half of the `regshare` binary. Scenario parsing and execution
//! live here so they can be tested without spawning the binary.

pub mod scenario;
