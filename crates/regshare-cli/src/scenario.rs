//! # Scenario Execution
//!
//! A scenario is a JSON document naming the issuer and an ordered list of
//! ledger operations. The runner executes the operations against a fresh
//! in-memory ledger and renders a report of the resulting state. Any
//! rejected operation aborts the run with the ledger's typed error, so a
//! scenario either replays completely or not at all.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};

use regshare_core::{BatchId, InvestorId, Timestamp};
use regshare_ledger::{ShareLedger, WhitelistEntry};

/// Arguments for `regshare run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the scenario JSON file.
    pub scenario: PathBuf,

    /// Include the audit event log in the report.
    #[arg(long)]
    pub events: bool,
}

/// A replayable sequence of ledger operations.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// The issuer identity; used as the caller for privileged operations.
    pub issuer: InvestorId,
    /// Operations, executed in order.
    pub operations: Vec<Operation>,
}

/// One ledger operation, as written in a scenario file.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Upsert a whitelist record (issuer-privileged).
    SetWhitelist {
        /// The investor whose record is written.
        investor: InvestorId,
        /// The eligibility record.
        entry: WhitelistEntry,
    },
    /// Mint a batch (issuer-privileged).
    Mint {
        /// Initial holder.
        recipient: InvestorId,
        /// Restriction legend; empty for none.
        #[serde(default)]
        legend: String,
        /// Share quantity; must be positive.
        quantity: u64,
        /// Whether transfer-time restriction checks apply.
        restricted: bool,
    },
    /// Overwrite a batch's legend (issuer-privileged).
    ScrubLegend {
        /// Raw batch number.
        batch: u64,
        /// Replacement legend; empty clears the restriction.
        #[serde(default)]
        new_legend: String,
    },
    /// Transfer a batch between holders.
    Transfer {
        /// The identity invoking the transfer; defaults to `from`.
        #[serde(default)]
        caller: Option<InvestorId>,
        /// Current holder.
        from: InvestorId,
        /// Recipient.
        to: InvestorId,
        /// Raw batch number.
        batch: u64,
        /// Authorization time for the eligibility check.
        at: Timestamp,
    },
    /// Grant or revoke an operator approval (holder-privileged).
    SetOperator {
        /// The approving holder.
        owner: InvestorId,
        /// The operator whose approval changes.
        operator: InvestorId,
        /// The new approval state.
        approved: bool,
    },
}

/// Final ledger state rendered after a successful run.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Total number of batches minted.
    pub total_batches: u64,
    /// Total shares across all batches.
    pub total_shares: u64,
    /// Aggregate balance per holder.
    pub balances: BTreeMap<String, u64>,
    /// Every batch, in mint order.
    pub batches: Vec<BatchReport>,
    /// Audit log, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<serde_json::Value>,
}

/// One batch row in the report.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    /// Raw batch number.
    pub batch: u64,
    /// Current holder.
    pub owner: String,
    /// Share quantity.
    pub quantity: u64,
    /// Restriction legend.
    pub legend: String,
    /// Whether restriction checks apply on transfer.
    pub restricted: bool,
}

/// Load a scenario from disk.
pub fn load(path: &Path) -> anyhow::Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing scenario {}", path.display()))
}

/// Execute a scenario against a fresh ledger.
///
/// Operations run in order; the first rejection aborts the run with the
/// position and the ledger's typed error.
pub fn execute(scenario: Scenario) -> anyhow::Result<ShareLedger> {
    let mut ledger = ShareLedger::new(scenario.issuer.clone());
    let issuer = scenario.issuer;

    for (position, operation) in scenario.operations.into_iter().enumerate() {
        tracing::debug!(position, ?operation, "executing operation");
        match operation {
            Operation::SetWhitelist { investor, entry } => ledger
                .set_whitelist(&issuer, investor, entry)
                .with_context(|| format!("operation {position} (set_whitelist) rejected"))?,
            Operation::Mint {
                recipient,
                legend,
                quantity,
                restricted,
            } => {
                ledger
                    .mint(&issuer, recipient, legend, quantity, restricted)
                    .with_context(|| format!("operation {position} (mint) rejected"))?;
            }
            Operation::ScrubLegend { batch, new_legend } => ledger
                .scrub_legend(&issuer, BatchId::new(batch), new_legend)
                .with_context(|| format!("operation {position} (scrub_legend) rejected"))?,
            Operation::Transfer {
                caller,
                from,
                to,
                batch,
                at,
            } => {
                let caller = caller.unwrap_or_else(|| from.clone());
                ledger
                    .transfer(&caller, &from, &to, BatchId::new(batch), at)
                    .with_context(|| format!("operation {position} (transfer) rejected"))?;
            }
            Operation::SetOperator {
                owner,
                operator,
                approved,
            } => ledger.set_operator(&owner, operator, approved),
        }
    }

    Ok(ledger)
}

/// Render the final state of a ledger.
pub fn report(ledger: &ShareLedger, include_events: bool) -> anyhow::Result<Report> {
    let mut balances = BTreeMap::new();
    let mut batches = Vec::new();
    for (id, batch) in batches_in_mint_order(ledger) {
        *balances.entry(batch.owner().to_string()).or_insert(0) += batch.quantity();
        batches.push(BatchReport {
            batch: id.as_u64(),
            owner: batch.owner().to_string(),
            quantity: batch.quantity(),
            legend: batch.legend().to_string(),
            restricted: batch.restricted(),
        });
    }

    let events = if include_events {
        Some(serde_json::to_value(ledger.events()).context("serializing event log")?)
    } else {
        None
    };

    Ok(Report {
        total_batches: ledger.total_batches(),
        total_shares: ledger.total_shares(),
        balances,
        batches,
        events,
    })
}

/// Enumerate every batch through the public surface, in mint order.
fn batches_in_mint_order(
    ledger: &ShareLedger,
) -> impl Iterator<Item = (BatchId, &regshare_ledger::ShareBatch)> {
    (0..ledger.total_batches()).filter_map(move |raw| {
        let id = BatchId::new(raw);
        ledger.batch_data(id).ok().map(|batch| (id, batch))
    })
}

/// Handler for `regshare run`.
pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let scenario = load(&args.scenario)?;
    let ledger = execute(scenario)?;
    let report = report(&ledger, args.events)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Handler for `regshare demo`: the canonical issuance flow. Whitelists
/// two shareholders, mints three restricted batches, scrubs the first
/// legend, and transfers the first batch.
pub fn demo() -> anyhow::Result<()> {
    let issuer = InvestorId::new("issuer")?;
    let sh1 = InvestorId::new("shareholder-1")?;
    let sh2 = InvestorId::new("shareholder-2")?;
    let now = Timestamp::now();

    let legend = "Some legend with transfer restrictions";
    let mut ledger = ShareLedger::new(issuer.clone());
    let entry = WhitelistEntry::new(
        now,
        Timestamp::from_epoch_secs(now.epoch_secs() + 365 * 24 * 3600)?,
        regshare_core::JurisdictionCode::new("US")?,
        true,
        1,
    )?;
    ledger.set_whitelist(&issuer, sh1.clone(), entry.clone())?;
    ledger.set_whitelist(&issuer, sh2.clone(), entry)?;

    let first = ledger.mint(&issuer, sh1.clone(), legend, 1000, true)?;
    ledger.mint(&issuer, sh1.clone(), legend, 700, true)?;
    ledger.mint(&issuer, sh1.clone(), legend, 200, true)?;

    ledger.scrub_legend(&issuer, first, "")?;
    ledger.transfer(&sh1, &sh1, &sh2, first, now)?;

    let report = report(&ledger, true)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENARIO: &str = r#"{
        "issuer": "issuer",
        "operations": [
            {
                "op": "set_whitelist",
                "investor": "sh2",
                "entry": {
                    "eligible_from": "2026-01-01T00:00:00Z",
                    "eligible_to": "2026-12-31T00:00:00Z",
                    "jurisdiction": "US",
                    "is_valid": true,
                    "category": 1
                }
            },
            { "op": "mint", "recipient": "sh1", "legend": "lock-up", "quantity": 1000, "restricted": true },
            { "op": "mint", "recipient": "sh1", "quantity": 700, "restricted": true },
            { "op": "scrub_legend", "batch": 0 },
            { "op": "transfer", "from": "sh1", "to": "sh2", "batch": 0, "at": "2026-06-01T00:00:00Z" }
        ]
    }"#;

    #[test]
    fn scenario_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENARIO.as_bytes()).unwrap();

        let scenario = load(file.path()).unwrap();
        assert_eq!(scenario.operations.len(), 5);

        let ledger = execute(scenario).unwrap();
        let report = report(&ledger, true).unwrap();
        assert_eq!(report.total_batches, 2);
        assert_eq!(report.total_shares, 1700);
        assert_eq!(report.balances["sh1"], 700);
        assert_eq!(report.balances["sh2"], 1000);
        assert!(report.events.is_some());
    }

    #[test]
    fn rejected_operation_aborts_with_position() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "issuer": "issuer",
                "operations": [
                    { "op": "mint", "recipient": "sh1", "quantity": 0, "restricted": true }
                ]
            }"#,
        )
        .unwrap();
        let err = execute(scenario).unwrap_err();
        assert!(format!("{err}").contains("operation 0"));
    }

    #[test]
    fn invalid_window_rejected_at_parse_time() {
        let raw = r#"{
            "issuer": "issuer",
            "operations": [
                {
                    "op": "set_whitelist",
                    "investor": "sh1",
                    "entry": {
                        "eligible_from": "2026-12-31T00:00:00Z",
                        "eligible_to": "2026-01-01T00:00:00Z",
                        "jurisdiction": "US",
                        "is_valid": true,
                        "category": 1
                    }
                }
            ]
        }"#;
        assert!(serde_json::from_str::<Scenario>(raw).is_err());
    }

    #[test]
    fn transfer_caller_defaults_to_sender() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "issuer": "issuer",
                "operations": [
                    { "op": "mint", "recipient": "sh1", "quantity": 10, "restricted": false },
                    { "op": "transfer", "from": "sh1", "to": "sh2", "batch": 0, "at": "2026-06-01T00:00:00Z" }
                ]
            }"#,
        )
        .unwrap();
        let ledger = execute(scenario).unwrap();
        assert_eq!(
            ledger.owner_of(BatchId::new(0)).unwrap(),
            &InvestorId::new("sh2").unwrap()
        );
    }
}
