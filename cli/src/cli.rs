//! # CLI Interface
//!
//! Defines the command-line argument structure for `dexkit` using `clap`
//! derive. Supports three subcommands: `datum`, `simulate` and `version`.

use clap::{Parser, Subcommand, ValueEnum};

use dexkit_protocol::definitions::{DefinitionKind, Dex};
use dexkit_protocol::transaction::{AddressType, TransactionStatus};

use crate::logging::LogFormat;

/// dexkit command-line tools.
///
/// Inspect and fill DEX datum definitions, and dry-run the transaction
/// lifecycle against a scripted wallet provider.
#[derive(Parser, Debug)]
#[command(
    name = "dexkit",
    about = "DEX transaction lifecycle tools",
    version,
    propagate_version = true
)]
pub struct DexkitCli {
    /// Default log filter, used when `RUST_LOG` is not set.
    #[arg(
        long,
        global = true,
        env = "DEXKIT_LOG",
        default_value = "dexkit=info,dexkit_protocol=info"
    )]
    pub log: String,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "DEXKIT_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a datum definition, or the datum it produces for the given
    /// parameters.
    Datum(DatumArgs),
    /// Run one transaction lifecycle against the mock wallet provider.
    Simulate(SimulateArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `datum` subcommand.
#[derive(Parser, Debug)]
pub struct DatumArgs {
    /// Exchange whose definition to use.
    #[arg(long, value_enum, default_value_t = DexArg::Vyfinance)]
    pub dex: DexArg,

    /// Which datum of the exchange.
    #[arg(long, value_enum, default_value_t = KindArg::Order)]
    pub kind: KindArg,

    /// Hex-encoded sender public key hash. Fills the definition when given.
    #[arg(long, requires_all = ["action", "min_receive"])]
    pub sender: Option<String>,

    /// Order action constructor index.
    #[arg(long, requires = "sender")]
    pub action: Option<u64>,

    /// Minimum amount the order must receive.
    #[arg(long, requires = "sender")]
    pub min_receive: Option<u64>,
}

/// Arguments for the `simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Destination address for the single payment.
    #[arg(long)]
    pub address: String,

    /// Kind of destination address.
    #[arg(long, value_enum, default_value_t = AddressTypeArg::Base)]
    pub address_type: AddressTypeArg,

    /// Lovelace sent to the address.
    #[arg(long, default_value_t = 2_000_000)]
    pub lovelace: u64,

    /// Make the provider fail at this step.
    #[arg(long, value_enum)]
    pub fail_at: Option<StepArg>,

    /// Failure message reported by the provider when `--fail-at` is set.
    #[arg(long, default_value = "simulated failure")]
    pub cause: String,

    /// Fixed transaction id returned by the provider. Derived from the
    /// outputs when omitted.
    #[arg(long)]
    pub tx_hash: Option<String>,
}

/// `--dex` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DexArg {
    Vyfinance,
}

impl From<DexArg> for Dex {
    fn from(arg: DexArg) -> Self {
        match arg {
            DexArg::Vyfinance => Dex::VyFinance,
        }
    }
}

/// `--kind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Order,
}

impl From<KindArg> for DefinitionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Order => DefinitionKind::Order,
        }
    }
}

/// `--address-type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AddressTypeArg {
    Base,
    Enterprise,
    Contract,
}

impl From<AddressTypeArg> for AddressType {
    fn from(arg: AddressTypeArg) -> Self {
        match arg {
            AddressTypeArg::Base => AddressType::Base,
            AddressTypeArg::Enterprise => AddressType::Enterprise,
            AddressTypeArg::Contract => AddressType::Contract,
        }
    }
}

/// `--fail-at` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StepArg {
    Building,
    Signing,
    Submitting,
}

impl From<StepArg> for TransactionStatus {
    fn from(arg: StepArg) -> Self {
        match arg {
            StepArg::Building => TransactionStatus::Building,
            StepArg::Signing => TransactionStatus::Signing,
            StepArg::Submitting => TransactionStatus::Submitting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        DexkitCli::command().debug_assert();
    }

    #[test]
    fn datum_parameters_must_come_together() {
        let result = DexkitCli::try_parse_from(["dexkit", "datum", "--sender", "ab"]);
        assert!(result.is_err());

        let cli = DexkitCli::try_parse_from([
            "dexkit",
            "datum",
            "--sender",
            "ab",
            "--action",
            "3",
            "--min-receive",
            "100",
        ])
        .unwrap();
        match cli.command {
            Commands::Datum(args) => {
                assert_eq!(args.action, Some(3));
                assert_eq!(args.min_receive, Some(100));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn simulate_defaults() {
        let cli = DexkitCli::try_parse_from(["dexkit", "simulate", "--address", "addr1q"]).unwrap();
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.lovelace, 2_000_000);
                assert_eq!(args.address_type, AddressTypeArg::Base);
                assert!(args.fail_at.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
