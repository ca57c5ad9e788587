// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # dexkit CLI
//!
//! Entry point for the `dexkit` binary. Parses CLI arguments, initializes
//! logging and dispatches to a subcommand:
//!
//! - `datum`    — print a bundled datum definition, or fill it
//! - `simulate` — run one lifecycle against the mock wallet provider
//! - `version`  — print build version information

mod cli;
mod logging;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use tracing::{error, info};

use dexkit_protocol::config::DEFINITION_VERSION;
use dexkit_protocol::datum::{DatumParameterKey, DatumParameters, DatumValue, DefinitionBuilder};
use dexkit_protocol::definitions;
use dexkit_protocol::transaction::{
    DexTransaction, PayToAddress, TransactionStatus, TransactionSummary,
};
use dexkit_protocol::wallet::{MockWalletProvider, ProviderError};

use cli::{Commands, DatumArgs, DexkitCli, SimulateArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = DexkitCli::parse();
    logging::init_logging(&cli.log, cli.log_format);

    match cli.command {
        Commands::Datum(args) => print_datum(args),
        Commands::Simulate(args) => simulate(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Prints the requested definition, or the datum it produces.
fn print_datum(args: DatumArgs) -> Result<()> {
    println!("{}", render_datum(&args)?);
    Ok(())
}

/// Renders the requested definition as JSON. When sender, action and
/// minimum receive are all given, renders the filled datum instead.
fn render_datum(args: &DatumArgs) -> Result<String> {
    let dex = args.dex.into();
    let kind = args.kind.into();
    let definition = definitions::definition(dex, kind)
        .with_context(|| format!("no {:?} definition bundled for {}", kind, dex))?;

    let (sender, action, min_receive) = match (&args.sender, args.action, args.min_receive) {
        (Some(sender), Some(action), Some(min_receive)) => (sender, action, min_receive),
        _ => {
            return serde_json::to_string_pretty(&definition)
                .context("failed to serialize definition");
        }
    };

    let sender = hex::decode(sender.trim_start_matches("0x"))
        .context("sender must be a hex-encoded key hash")?;
    let action = i64::try_from(action).context("action does not fit a datum integer")?;
    let min_receive =
        i64::try_from(min_receive).context("min-receive does not fit a datum integer")?;

    let mut params = DatumParameters::new();
    params.insert(DatumParameterKey::SenderPubKeyHash, DatumValue::Bytes(sender));
    params.insert(DatumParameterKey::Action, DatumValue::Int(action));
    params.insert(DatumParameterKey::MinReceive, DatumValue::Int(min_receive));

    let datum = DefinitionBuilder::new(definition)
        .push_parameters(&params)
        .context("failed to fill definition")?;

    info!(%dex, fields = params.len(), "datum built");
    serde_json::to_string_pretty(&datum).context("failed to serialize datum")
}

/// Runs the simulation, prints the summary, and fails if the lifecycle
/// ended in `Errored`.
async fn simulate(args: SimulateArgs) -> Result<()> {
    let run = run_simulation(args).await?;
    info!(
        status_writes = run.history.len(),
        final_status = %run.summary.status,
        "simulation done"
    );

    let summary = serde_json::to_string_pretty(&run.summary)
        .context("failed to serialize transaction summary")?;
    println!("{}", summary);

    ensure_submitted(&run.summary)
}

/// What one `simulate` run left behind.
#[derive(Debug)]
struct Simulation {
    summary: TransactionSummary,
    /// Every status write the listeners saw, in order.
    history: Vec<TransactionStatus>,
}

/// Drives one lifecycle along the success path, stopping as soon as the
/// provider reports a failure.
async fn run_simulation(args: SimulateArgs) -> Result<Simulation> {
    let mut provider = MockWalletProvider::succeed_all();
    if let Some(step) = args.fail_at {
        let cause = ProviderError::from(args.cause.clone());
        provider = match TransactionStatus::from(step) {
            TransactionStatus::Building => provider.fail_building(cause),
            TransactionStatus::Signing => provider.fail_signing(cause),
            _ => provider.fail_submitting(cause),
        };
    }
    if let Some(hash) = args.tx_hash {
        provider = provider.with_tx_hash(hash);
    }

    let history = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&history);

    let mut tx = DexTransaction::new(Arc::new(provider));
    tx.on_status_change(move |t| {
        sink.lock().push(t.status());
        info!(tx_id = %t.id(), status = %t.status(), "status changed");
    })
    .on_error(|t| {
        if let Some(err) = t.error() {
            error!(tx_id = %t.id(), step = %err.step, cause = %err.cause, "{}", err.reason);
        }
    })
    .on_finally(|t| info!(tx_id = %t.id(), status = %t.status(), "lifecycle finished"));

    let payment =
        PayToAddress::new(args.address, args.address_type.into()).with_lovelace(args.lovelace);

    tx.transition(TransactionStatus::Building)?;
    tx.attach_payments(&[payment]).await?;
    if !tx.status().is_terminal() {
        tx.advance()?;
        tx.sign().await?;
    }
    if !tx.status().is_terminal() {
        tx.advance()?;
        tx.submit().await?;
    }
    if !tx.status().is_terminal() {
        tx.advance()?;
    }

    let history = history.lock().clone();
    Ok(Simulation {
        summary: tx.summary(),
        history,
    })
}

/// Turns an `Errored` summary into the command's failure.
fn ensure_submitted(summary: &TransactionSummary) -> Result<()> {
    if let Some(err) = &summary.error {
        bail!("transaction failed while {}: {}", err.step, err);
    }
    Ok(())
}

/// Prints build version information.
fn print_version() {
    println!("dexkit v{}", env!("CARGO_PKG_VERSION"));
    println!("  Definitions: v{}", DEFINITION_VERSION);
    println!("  Dexes:       {}", definitions::Dex::VyFinance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{AddressTypeArg, DexArg, KindArg, StepArg};
    use dexkit_protocol::transaction::TransactionStatus::*;

    fn simulate_args(fail_at: Option<StepArg>) -> SimulateArgs {
        SimulateArgs {
            address: "addr_test1qz".into(),
            address_type: AddressTypeArg::Base,
            lovelace: 2_000_000,
            fail_at,
            cause: "network down".into(),
            tx_hash: Some("tx123".into()),
        }
    }

    fn datum_args() -> DatumArgs {
        DatumArgs {
            dex: DexArg::Vyfinance,
            kind: KindArg::Order,
            sender: None,
            action: None,
            min_receive: None,
        }
    }

    #[tokio::test]
    async fn simulate_advances_to_submitted() {
        let run = run_simulation(simulate_args(None)).await.unwrap();

        assert_eq!(run.history, vec![Building, Signing, Submitting, Submitted]);
        assert_eq!(run.summary.status, Submitted);
        assert_eq!(run.summary.hash.as_deref(), Some("tx123"));
        assert!(run.summary.is_signed);
        assert!(ensure_submitted(&run.summary).is_ok());
    }

    #[tokio::test]
    async fn simulate_stops_at_building_failure() {
        let run = run_simulation(simulate_args(Some(StepArg::Building)))
            .await
            .unwrap();

        assert_eq!(run.history, vec![Building, Errored]);
        let error = run.summary.error.as_ref().unwrap();
        assert_eq!(error.step, Building);
        assert_eq!(error.cause.to_string(), "network down");
        assert!(!run.summary.is_signed);
        assert!(ensure_submitted(&run.summary).is_err());
    }

    #[tokio::test]
    async fn simulate_stops_at_signing_failure() {
        let run = run_simulation(simulate_args(Some(StepArg::Signing)))
            .await
            .unwrap();

        assert_eq!(run.history, vec![Building, Signing, Errored]);
        assert_eq!(run.summary.error.as_ref().unwrap().step, Signing);
        assert!(!run.summary.is_signed);
        assert!(run.summary.hash.is_none());
        assert!(ensure_submitted(&run.summary).is_err());
    }

    #[tokio::test]
    async fn simulate_stops_at_submitting_failure() {
        let run = run_simulation(simulate_args(Some(StepArg::Submitting)))
            .await
            .unwrap();

        assert_eq!(run.history, vec![Building, Signing, Submitting, Errored]);
        assert_eq!(run.summary.error.as_ref().unwrap().step, Submitting);
        assert!(run.summary.is_signed);
        assert!(run.summary.hash.is_none());

        let err = ensure_submitted(&run.summary).unwrap_err();
        assert_eq!(
            err.to_string(),
            "transaction failed while Submitting: Failed to submit transaction. (network down)"
        );
    }

    #[tokio::test]
    async fn simulate_summary_serializes() {
        let run = run_simulation(simulate_args(Some(StepArg::Signing)))
            .await
            .unwrap();

        let json = serde_json::to_value(&run.summary).unwrap();
        assert_eq!(json["status"], "Errored");
        assert_eq!(json["error"]["step"], "Signing");
        assert_eq!(json["hash"], serde_json::Value::Null);
    }

    #[test]
    fn datum_without_parameters_prints_definition() {
        let json: serde_json::Value =
            serde_json::from_str(&render_datum(&datum_args()).unwrap()).unwrap();

        assert_eq!(json["constructor"], 0);
        assert_eq!(json["fields"][0]["bytes"], "SenderPubKeyHash");
        assert_eq!(json["fields"][1]["constructor"], "Action");
    }

    #[test]
    fn datum_with_parameters_prints_filled_datum() {
        let args = DatumArgs {
            sender: Some(format!("0x{}", "5a".repeat(28))),
            action: Some(3),
            min_receive: Some(1_500_000),
            ..datum_args()
        };
        let json: serde_json::Value =
            serde_json::from_str(&render_datum(&args).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "constructor": 0,
                "fields": [
                    { "bytes": "5a".repeat(28) },
                    { "constructor": 3, "fields": [ { "int": 1_500_000 } ] }
                ]
            })
        );
    }

    #[test]
    fn datum_rejects_non_hex_sender() {
        let args = DatumArgs {
            sender: Some("not-hex".into()),
            action: Some(0),
            min_receive: Some(1),
            ..datum_args()
        };
        assert!(render_datum(&args).is_err());
    }
}
